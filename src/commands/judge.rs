//! `taskforge judge` command.

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::config::Config;
use crate::context::ServiceContext;
use crate::judge::Orchestrator;
use crate::model::Language;

use super::{block_on, load_session, read_source, write_err};

/// Judge a solution against every stored test and print the report.
///
/// # Errors
///
/// Returns an error string if the solution cannot be prepared, or when any
/// test fails. The report is printed in either case.
pub fn run(
    ctx: &ServiceContext,
    config: &Config,
    problem: &Path,
    language: Language,
    solution: &Path,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), String> {
    let session = load_session(ctx, config, problem)?;
    let code = read_source(ctx, solution)?;

    let run_id = ctx.id_gen.generate_id();
    info!(%run_id, problem = %problem.display(), "judge run");
    let orchestrator = Orchestrator::new(ctx.judge.as_ref(), config.judge_options).with_run_id(run_id);
    let report =
        block_on(session.judge(&orchestrator, language, &code))?.map_err(|e| e.to_string())?;

    if json {
        let text = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("Failed to serialize report: {e}"))?;
        writeln!(out, "{text}").map_err(write_err)?;
    } else {
        writeln!(out, "{}", report.summary()).map_err(write_err)?;
    }

    if report.passed() {
        Ok(())
    } else {
        Err(format!(
            "{} of {} tests failed",
            report.tests_count - report.correct_count,
            report.tests_count
        ))
    }
}
