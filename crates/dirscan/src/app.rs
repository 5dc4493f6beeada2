use clap::{Arg, ArgAction, Command};

/// Options carry no clap defaults: a value is present in the matches only
/// when it was typed, so env, config file and built-in defaults can fill
/// the rest.
pub fn build_cli() -> Command {
    Command::new("dirscan")
        .version(env!("CARGO_PKG_VERSION"))
        .about("List the largest files under a directory (recursively)")
        .long_about(
            "Walks a directory tree once, counting entries and their total size, and reports \
             the largest ones. Settings come from the command line, then DIRSCAN_* environment \
             variables (an --env-file wins over the process environment), then a JSON or TOML \
             config file, then built-in defaults.",
        )
        .arg(
            Arg::new("directory")
                .help("Directory to scan (default: current directory)")
                .index(1),
        )
        .arg(
            Arg::new("mode")
                .long("mode")
                .help("Entries to count: 'file' for regular files, 'all' for everything but directories")
                .value_parser(["file", "all"]),
        )
        .arg(
            Arg::new("top")
                .long("top")
                .help("Show the N largest entries (default: 10, 0 disables the listing)")
                .allow_negative_numbers(true),
        )
        .arg(
            Arg::new("min-size")
                .long("min-size")
                .help("Only count entries of at least this many bytes")
                .allow_negative_numbers(true),
        )
        .arg(
            Arg::new("human")
                .long("human")
                .help("Print sizes as KB/MB/GB")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("relative")
                .long("relative")
                .help("Print paths relative to the scanned directory")
                .action(ArgAction::SetTrue),
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
                .help("Load DIRSCAN_* variables from a .env file before resolving settings"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue),
        )
}
