//! Problem to verdict without a network: author a problem, ingest generated
//! tests, splice a solution and judge it on an in-memory judge.

use std::collections::HashMap;
use std::sync::Mutex;

use taskforge::judge::{JudgeOptions, JudgeStatus, OverallStatus, PollPolicy, Verdict};
use taskforge::model::{Difficulty, FieldSpec, TypeDescriptor, TypePolicy};
use taskforge::ports::{JudgeClient, JudgeFuture, SubmissionRequest, SubmissionStatus};
use taskforge::{AuthoringSession, Language, Orchestrator, ProblemSpec};

/// "Runs" a program by recognizing the solver's expression and applying it
/// to the two integers on stdin.
#[derive(Default)]
struct ArithmeticJudge {
    pending: Mutex<HashMap<String, SubmissionStatus>>,
}

impl ArithmeticJudge {
    fn evaluate(request: &SubmissionRequest) -> SubmissionStatus {
        let numbers: Vec<i64> =
            request.stdin.lines().filter_map(|line| line.trim().parse().ok()).collect();
        let (a, b) = (numbers[0], numbers[1]);
        let result = if request.source_code.contains("a + b") {
            a + b
        } else if request.source_code.contains("a - b") {
            a - b
        } else {
            let mut status = SubmissionStatus::bare(JudgeStatus::CompilationError);
            status.compile_output = Some("error: unknown solver".into());
            return status;
        };
        let stdout = result.to_string();
        let status = if stdout == request.expected_output.trim() {
            JudgeStatus::Accepted
        } else {
            JudgeStatus::WrongAnswer
        };
        let mut response = SubmissionStatus::bare(status);
        response.stdout = Some(stdout);
        response
    }
}

impl JudgeClient for ArithmeticJudge {
    fn submit(&self, request: &SubmissionRequest) -> JudgeFuture<'_, String> {
        let mut pending = self.pending.lock().unwrap();
        let token = format!("t{}", pending.len());
        pending.insert(token.clone(), Self::evaluate(request));
        Box::pin(async move { Ok(token) })
    }

    fn status(&self, token: &str) -> JudgeFuture<'_, SubmissionStatus> {
        let found = self.pending.lock().unwrap().get(token).cloned();
        Box::pin(async move { found.ok_or_else(|| "unknown token".into()) })
    }
}

fn session() -> AuthoringSession {
    let spec = ProblemSpec {
        task_name: "Sum of two".into(),
        difficulty: Difficulty::Easy,
        description: "Add two integers.".into(),
        function_name: "sum".into(),
        inputs: vec![
            FieldSpec::new("a", TypeDescriptor::parse("int").unwrap()),
            FieldSpec::new("b", TypeDescriptor::parse("int").unwrap()),
        ],
        outputs: vec![FieldSpec::new("result", TypeDescriptor::parse("int").unwrap())],
    };
    let mut session = AuthoringSession::new(spec, TypePolicy::Sentinel).unwrap();
    let reply = r#"```json
[
  {"input": {"a": 2, "b": 3}, "expected_output": 5},
  {"input": {"a": -7, "b": 7}, "expected_output": {"result": 0}},
  {"input": {"a": 100, "b": 1}, "expected_output": 101}
]
```"#;
    assert_eq!(session.ingest_generated_tests(reply).unwrap(), 3);
    session
}

fn options() -> JudgeOptions {
    JudgeOptions { poll: PollPolicy::immediate(3), concurrency: 2, deadline: None }
}

#[tokio::test]
async fn correct_solution_passes_in_every_language() {
    let session = session();
    assert_eq!(session.tests()[0].stdin, "2\n3\n");
    assert_eq!(session.tests()[1].expected_output, "0");

    let judge = ArithmeticJudge::default();
    let orchestrator = Orchestrator::new(&judge, options()).with_run_id("e2e");
    for language in Language::ALL {
        let code = "/* solver */ return a + b;";
        let report = session.judge(&orchestrator, language, code).await.unwrap();
        assert!(report.passed(), "{language}: {}", report.summary());
        assert_eq!(report.summary(), "All 3 tests passed.");
    }
}

#[tokio::test]
async fn wrong_solution_reports_failing_tests() {
    let session = session();
    let judge = ArithmeticJudge::default();
    let orchestrator = Orchestrator::new(&judge, options());

    let report = session.judge(&orchestrator, Language::Rust, "a - b").await.unwrap();
    assert_eq!(report.overall_status, OverallStatus::Fail);
    assert_eq!(report.correct_count, 0);
    assert_eq!(report.failed_test_numbers(), vec![1, 2, 3]);
    assert_eq!(report.outcomes[0].verdict, Verdict::Judged(JudgeStatus::WrongAnswer));
}

#[tokio::test]
async fn compile_error_carries_diagnostic() {
    let session = session();
    let judge = ArithmeticJudge::default();
    let orchestrator = Orchestrator::new(&judge, options());

    let report = session.judge(&orchestrator, Language::Java, "a * b").await.unwrap();
    assert!(!report.passed());
    assert_eq!(report.first_diagnostic.as_deref(), Some("error: unknown solver"));
    assert!(report.summary().contains("Diagnostic output:\nerror: unknown solver"));
}
