//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::model::Language;

/// Top-level CLI parser for `taskforge`.
#[derive(Debug, Parser)]
#[command(
    name = "taskforge",
    version,
    about = "Generate boilerplate, tests and verdicts for programming problems"
)]
pub struct Cli {
    /// More log output (-v info, -vv debug). `RUST_LOG` overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported subcommands. `PROBLEM` is a YAML problem document.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate a problem and summarize it.
    Check {
        /// Problem document.
        problem: PathBuf,
    },
    /// Print generated stubs, or full programs with `--full`.
    Generate {
        /// Problem document.
        problem: PathBuf,
        /// Only this language.
        #[arg(short, long, value_enum)]
        language: Option<Language>,
        /// Print the full judge programs instead of stubs.
        #[arg(long)]
        full: bool,
    },
    /// Generate tests with the language model and append them to the problem.
    Tests {
        /// Problem document.
        problem: PathBuf,
        /// Reference solution shown to the model.
        #[arg(long)]
        solution: PathBuf,
        /// Number of tests to request.
        #[arg(long, default_value_t = 10)]
        count: usize,
        /// Print the normalized tests without saving.
        #[arg(long)]
        dry_run: bool,
    },
    /// Judge a solution against the problem's tests.
    Judge {
        /// Problem document.
        problem: PathBuf,
        /// Language of the solution.
        #[arg(short, long, value_enum)]
        language: Language,
        /// Solution source (the function only).
        #[arg(long)]
        solution: PathBuf,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Replace the description with a generated markdown statement.
    Statement {
        /// Problem document.
        problem: PathBuf,
        /// Topic for the statement; defaults to the current description.
        #[arg(long)]
        seed: Option<String>,
        /// Print the statement without saving.
        #[arg(long)]
        dry_run: bool,
    },
    /// Write the problem directory (statement, structure, tests, boilerplate).
    Export {
        /// Problem document.
        problem: PathBuf,
        /// Directory the problem folder is created in.
        #[arg(long)]
        out: PathBuf,
    },
}
