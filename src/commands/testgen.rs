//! `taskforge tests` command: generate test cases with the model.

use std::io::Write;
use std::path::Path;

use crate::assist::{self, TestGenRequest};
use crate::config::Config;
use crate::context::ServiceContext;

use super::{block_on, load_session, read_source, save_session, write_err};

/// Generate `count` tests from a reference solution and append them.
///
/// With `dry_run` the new tests are printed and the problem file is left
/// untouched.
///
/// # Errors
///
/// Returns an error string if loading, generation, parsing or saving fails.
/// Nothing is appended when the model's reply cannot be parsed.
pub fn run(
    ctx: &ServiceContext,
    config: &Config,
    problem: &Path,
    solution: &Path,
    count: usize,
    dry_run: bool,
    out: &mut dyn Write,
) -> Result<(), String> {
    let mut session = load_session(ctx, config, problem)?;
    let solution = read_source(ctx, solution)?;

    let request = TestGenRequest { spec: session.spec(), solution: &solution, count };
    let reply = block_on(assist::generate_tests(ctx.llm.as_ref(), &config.llm, &request))?
        .map_err(|e| e.to_string())?;

    let before = session.tests().len();
    let added = session.ingest_generated_tests(&reply).map_err(|e| e.to_string())?;

    if dry_run {
        for (i, test) in session.tests()[before..].iter().enumerate() {
            writeln!(out, "--- test {} ---", before + i + 1).map_err(write_err)?;
            writeln!(out, "stdin:\n{}", test.stdin.trim_end_matches('\n')).map_err(write_err)?;
            writeln!(out, "expected:\n{}", test.expected_output).map_err(write_err)?;
        }
        return Ok(());
    }

    save_session(ctx, problem, &session)?;
    writeln!(out, "Added {added} tests ({} total)", session.tests().len()).map_err(write_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{config, with_llm, SharedFs, SUM_PROBLEM};

    const REPLY: &str = r#"Here you go:
[{"input": {"a": 2, "b": 3}, "expected_output": 5},
 {"input": [10, -4], "expected_output": {"result": 6}}]"#;

    fn fs() -> SharedFs {
        SharedFs::with(&[("p.yaml", SUM_PROBLEM), ("sol.rs", "fn sum(a: i32, b: i32) -> i32 { a + b }")])
    }

    fn generate(fs: &SharedFs, reply: &str, dry_run: bool) -> Result<String, String> {
        let ctx = with_llm(fs, &[reply]);
        let mut out = Vec::new();
        run(&ctx, &config(), Path::new("p.yaml"), Path::new("sol.rs"), 2, dry_run, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn appends_and_saves_generated_tests() {
        let fs = fs();
        let text = generate(&fs, REPLY, false).unwrap();
        assert_eq!(text, "Added 2 tests (2 total)\n");

        let saved = fs.get("p.yaml").unwrap();
        assert!(saved.contains("stdin"));
        assert!(saved.contains("task_name: Sum of two"));
    }

    #[test]
    fn dry_run_prints_without_saving() {
        let fs = fs();
        let text = generate(&fs, REPLY, true).unwrap();
        assert!(text.contains("--- test 1 ---\nstdin:\n2\n3\nexpected:\n5\n"));
        assert!(text.contains("--- test 2 ---\nstdin:\n10\n-4\nexpected:\n6\n"));
        assert_eq!(fs.get("p.yaml").unwrap(), SUM_PROBLEM);
    }

    #[test]
    fn unparsable_reply_leaves_problem_untouched() {
        let fs = fs();
        let err = generate(&fs, "I cannot help with that.", false).unwrap_err();
        assert!(err.contains("Malformed test data"));
        assert_eq!(fs.get("p.yaml").unwrap(), SUM_PROBLEM);
    }

    #[test]
    fn missing_solution_is_reported() {
        let fs = SharedFs::with(&[("p.yaml", SUM_PROBLEM)]);
        let err = generate(&fs, REPLY, false).unwrap_err();
        assert!(err.contains("Failed to read solution sol.rs"));
    }
}
