//! Binary entrypoint for the `taskforge` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // Settings may come from a `.env` file; a missing file is fine.
    let _ = dotenvy::dotenv();
    // Recording is handled in commands::dispatch via TASKFORGE_RECORD=<dir>.
    match taskforge::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
