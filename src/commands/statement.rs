//! `taskforge statement` command: draft the problem description with the model.

use std::io::Write;
use std::path::Path;

use crate::assist;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::session::AuthoringSession;
use crate::store::ProblemStore;

use super::{block_on, save_session, write_err};

/// Generate a statement from `seed`, or from the current description when
/// no seed is given.
///
/// The problem is loaded without validation so that a problem whose
/// description is still empty can be given one.
///
/// # Errors
///
/// Returns an error string if loading, generation or saving fails, or if the
/// problem is still invalid with the new description.
pub fn run(
    ctx: &ServiceContext,
    config: &Config,
    problem: &Path,
    seed: Option<&str>,
    dry_run: bool,
    out: &mut dyn Write,
) -> Result<(), String> {
    let mut doc = ProblemStore::new(ctx.fs.as_ref()).load(problem).map_err(|e| e.to_string())?;
    let seed = seed.unwrap_or(doc.spec.description.as_str()).to_string();

    let statement = block_on(assist::generate_statement(ctx.llm.as_ref(), &config.llm, &seed))?
        .map_err(|e| e.to_string())?;

    if dry_run {
        return writeln!(out, "{statement}").map_err(write_err);
    }

    doc.spec.description = statement;
    let session = AuthoringSession::from_document(doc, config.type_policy)
        .map_err(|e| format!("{}: {e}", problem.display()))?;
    save_session(ctx, problem, &session)?;
    writeln!(out, "Updated statement for {}", session.spec().task_name).map_err(write_err)
}
