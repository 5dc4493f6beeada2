use std::process::ExitCode;

use tally_core::{TallyError, events, init_logging};

mod app;
mod commands;

fn main() -> ExitCode {
    let tokens: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    let matches = app::build_cli().get_matches();

    // Provisional level from the flag; env and config may still turn it on
    let verbose = matches.get_flag("verbose");
    let logging = init_logging("dirscan", verbose);

    match commands::run_command(&matches, tokens, &logging) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            events::log_app_error(&*e);
            eprintln!("Error: {e}");
            ExitCode::from(TallyError::exit_code(&*e))
        }
    }
}
