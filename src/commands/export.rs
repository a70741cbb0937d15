//! `taskforge export` command.

use std::io::Write;
use std::path::Path;

use crate::config::Config;
use crate::context::ServiceContext;
use crate::store::ProblemStore;

use super::{load_session, write_err};

/// Write the problem directory (statement, structure, tests, boilerplate).
///
/// # Errors
///
/// Returns an error string if the problem is invalid or a write fails.
pub fn run(
    ctx: &ServiceContext,
    config: &Config,
    problem: &Path,
    out_dir: &Path,
    out: &mut dyn Write,
) -> Result<(), String> {
    let session = load_session(ctx, config, problem)?;
    let root = ProblemStore::new(ctx.fs.as_ref())
        .export(&session.to_document(), session.boilerplate(), out_dir)
        .map_err(|e| e.to_string())?;
    writeln!(out, "Exported to {}", root.display()).map_err(write_err)
}
