//! Authoring pipeline for programming problems.
//!
//! A problem is a typed function signature plus test cases. From it the
//! crate generates solver stubs and judge-ready programs for C++,
//! JavaScript, Rust and Java, turns model-generated test material into
//! stdin/expected-output pairs, and judges solutions on a Judge0 instance.
//!
//! External services sit behind the traits in [`ports`]; [`context`] wires
//! live, recording or replaying adapters for them.

pub mod adapters;
pub mod assist;
pub mod cassette;
pub mod cli;
pub mod codegen;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod judge;
pub mod logging;
pub mod model;
pub mod ports;
pub mod session;
pub mod store;
pub mod testcase;

pub use error::{TaskforgeError, TaskforgeResult};
pub use judge::{JudgeReport, Orchestrator};
pub use model::{Language, ProblemSpec};
pub use session::AuthoringSession;

use clap::error::ErrorKind;
use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// `--help` and `--version` print and succeed.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    logging::init(logging::level_for(cli.verbose));
    commands::dispatch(&cli.command)
}
