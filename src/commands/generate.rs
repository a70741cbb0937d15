//! `taskforge generate` command.

use std::io::Write;
use std::path::Path;

use crate::config::Config;
use crate::context::ServiceContext;
use crate::model::Language;

use super::{load_session, write_err};

/// Print stubs (or full programs) for one language or all of them.
///
/// # Errors
///
/// Returns an error string if the problem cannot be loaded or is invalid.
pub fn run(
    ctx: &ServiceContext,
    config: &Config,
    problem: &Path,
    language: Option<Language>,
    full: bool,
    out: &mut dyn Write,
) -> Result<(), String> {
    let session = load_session(ctx, config, problem)?;

    let Some(language) = language else {
        for (i, language) in Language::ALL.into_iter().enumerate() {
            if i > 0 {
                writeln!(out).map_err(write_err)?;
            }
            writeln!(out, "// ===== {language} ({}) =====", language.source_file_name())
                .map_err(write_err)?;
            write_code(out, session.boilerplate().get(language), full)?;
        }
        return Ok(());
    };
    write_code(out, session.boilerplate().get(language), full)
}

fn write_code(
    out: &mut dyn Write,
    artifacts: &crate::codegen::LanguageArtifacts,
    full: bool,
) -> Result<(), String> {
    let code = if full { &artifacts.full_program } else { &artifacts.stub };
    out.write_all(code.as_bytes()).map_err(write_err)
}
