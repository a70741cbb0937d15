//! Command dispatch and handlers.

pub mod check;
pub mod export;
pub mod generate;
pub mod judge;
pub mod statement;
pub mod testgen;

use std::future::Future;
use std::io::{self, Write};
use std::path::Path;

use crate::cassette::session::RecordingSession;
use crate::cli::Command;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::session::AuthoringSession;
use crate::store::ProblemStore;

/// Dispatch a parsed command to its handler.
///
/// When `TASKFORGE_RECORD` is set to a directory, every port interaction is
/// recorded to per-port cassette files under it.
///
/// # Errors
///
/// Returns an error string if configuration is invalid or the handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let config = Config::from_env().map_err(|e| e.to_string())?;
    let (ctx, session) = if let Some(dir) = &config.record_dir {
        let (ctx, session) = ServiceContext::recording_at(dir, &config)?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(&config), None)
    };

    let result = dispatch_with_context(command, &ctx, &config, &mut io::stdout().lock());

    // Finish recording even when the command failed.
    if let Some(session) = session {
        drop(ctx);
        finish_recording(session)?;
    }

    result
}

/// Dispatch a command with the given service context, writing to `out`.
///
/// # Errors
///
/// Returns an error string if the handler fails.
pub fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    config: &Config,
    out: &mut dyn Write,
) -> Result<(), String> {
    match command {
        Command::Check { problem } => check::run(ctx, config, problem, out),
        Command::Generate { problem, language, full } => {
            generate::run(ctx, config, problem, *language, *full, out)
        }
        Command::Tests { problem, solution, count, dry_run } => {
            testgen::run(ctx, config, problem, solution, *count, *dry_run, out)
        }
        Command::Judge { problem, language, solution, json } => {
            judge::run(ctx, config, problem, *language, solution, *json, out)
        }
        Command::Statement { problem, seed, dry_run } => {
            statement::run(ctx, config, problem, seed.as_deref(), *dry_run, out)
        }
        Command::Export { problem, out: out_dir } => export::run(ctx, config, problem, out_dir, out),
    }
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}

/// Runs `future` to completion on a fresh current-thread runtime.
pub(crate) fn block_on<F: Future>(future: F) -> Result<F::Output, String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start async runtime: {e}"))?;
    Ok(runtime.block_on(future))
}

pub(crate) fn load_session(
    ctx: &ServiceContext,
    config: &Config,
    problem: &Path,
) -> Result<AuthoringSession, String> {
    let doc = ProblemStore::new(ctx.fs.as_ref()).load(problem).map_err(|e| e.to_string())?;
    AuthoringSession::from_document(doc, config.type_policy)
        .map_err(|e| format!("{}: {e}", problem.display()))
}

pub(crate) fn save_session(
    ctx: &ServiceContext,
    problem: &Path,
    session: &AuthoringSession,
) -> Result<(), String> {
    ProblemStore::new(ctx.fs.as_ref())
        .save(problem, &session.to_document())
        .map_err(|e| e.to_string())
}

pub(crate) fn read_source(ctx: &ServiceContext, path: &Path) -> Result<String, String> {
    ctx.fs
        .read_to_string(path)
        .map_err(|e| format!("Failed to read solution {}: {e}", path.display()))
}

pub(crate) fn write_err(err: io::Error) -> String {
    format!("write error: {err}")
}
