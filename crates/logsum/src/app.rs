use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("logsum")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Summarize a log: line counts per level and the most frequent messages")
        .long_about(
            "Reads a log file (or stdin) line by line. Lines shaped like '[LEVEL] message' or \
             'LEVEL: message' are counted under their level, anything else under UNKNOWN. \
             Settings come from the command line, then LOGSUM_* environment variables, then a \
             JSON or TOML config file, then built-in defaults.",
        )
        .arg(
            Arg::new("path")
                .help("Log file to read; omit or use '-' for stdin")
                .index(1),
        )
        .arg(
            Arg::new("level")
                .long("level")
                .help("Only count lines of this level (case-insensitive)"),
        )
        .arg(
            Arg::new("top")
                .long("top")
                .help("Show the N most frequent messages (default: 5, 0 disables the listing)")
                .allow_negative_numbers(true),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the report as JSON instead of text")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("out")
                .long("out")
                .help("Also write the JSON report to this file"),
        )
        .arg(
            Arg::new("post")
                .long("post")
                .help("Also POST the JSON report to this URL"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .help("HTTP timeout in seconds for --post (default: 10.0)")
                .allow_negative_numbers(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("JSON or TOML config file; command line and environment override it"),
        )
        .arg(
            Arg::new("env-file")
                .long("env-file")
                .help("Load LOGSUM_* variables from a .env file before resolving settings"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue),
        )
}
