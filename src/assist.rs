//! Text-generation collaborators: test cases and problem statements.
//!
//! Both calls return the model's raw text. Turning that text into test cases
//! is [`crate::testcase::parse_tests`]'s job.

use std::fmt::Write as _;

use tracing::debug;

use crate::config::LlmSettings;
use crate::error::{TaskforgeError, TaskforgeResult};
use crate::model::ProblemSpec;
use crate::ports::llm::{CompletionRequest, LlmClient};

const TESTS_SYSTEM_PROMPT: &str =
    "You are an expert at writing test cases for programming problems.";

const STATEMENT_SYSTEM_PROMPT: &str = "You are a programming assistant that writes problem \
statements in the style of LeetCode. Use exactly this markdown layout:\n\n\
## Problem title\n\n\
### Statement\n\
A description of the task on the requested topic.\n\n\
### Example 1:\n\
**Input:**  \n\
`description of the input`\n\n\
**Output:**  \n\
`expected result`\n\n\
(Add further examples when useful.)\n\
Wrap important values such as variable names in backticks.";

/// What to ask for when generating tests.
#[derive(Debug, Clone, Copy)]
pub struct TestGenRequest<'a> {
    /// Problem the tests are for.
    pub spec: &'a ProblemSpec,
    /// A reference solution shown to the model.
    pub solution: &'a str,
    /// How many tests to ask for.
    pub count: usize,
}

/// Builds the user prompt for test generation.
///
/// # Errors
///
/// [`TaskforgeError::Collaborator`] if the problem cannot be rendered as JSON.
pub fn build_tests_prompt(request: &TestGenRequest<'_>) -> TaskforgeResult<String> {
    let spec_json = serde_json::to_string_pretty(request.spec)
        .map_err(|e| TaskforgeError::Collaborator(format!("cannot render problem: {e}")))?;
    let inputs: Vec<&str> = request.spec.inputs.iter().map(|f| f.name.as_str()).collect();

    let mut prompt = String::new();
    let _ = writeln!(prompt, "Problem name: {}\n", request.spec.task_name);
    let _ = writeln!(prompt, "Problem metadata:\n{spec_json}\n");
    let _ = writeln!(prompt, "Reference solution:\n{}\n", request.solution);
    let _ = writeln!(
        prompt,
        "Generate {} test cases for this problem. Cover a variety of scenarios, edge cases included.",
        request.count
    );
    prompt.push_str(
        "Return the tests as a JSON array. Each element is an object with two fields:\n\
         - \"input\": an object keyed by input name",
    );
    let _ = writeln!(prompt, " ({})", inputs.join(", "));
    prompt.push_str(
        "- \"expected_output\": the value the function returns\n\
         Use JSON arrays for list values and arrays of arrays for matrices.\n",
    );
    Ok(prompt)
}

/// Asks the model for test cases and returns its raw reply.
///
/// # Errors
///
/// [`TaskforgeError::Collaborator`] if the model call fails.
pub async fn generate_tests(
    llm: &dyn LlmClient,
    settings: &LlmSettings,
    request: &TestGenRequest<'_>,
) -> TaskforgeResult<String> {
    let prompt = build_tests_prompt(request)?;
    complete(llm, settings, TESTS_SYSTEM_PROMPT, prompt, "test generation").await
}

/// Asks the model for a markdown problem statement about `seed`.
///
/// # Errors
///
/// [`TaskforgeError::Collaborator`] if the model call fails or the seed is blank.
pub async fn generate_statement(
    llm: &dyn LlmClient,
    settings: &LlmSettings,
    seed: &str,
) -> TaskforgeResult<String> {
    if seed.trim().is_empty() {
        return Err(TaskforgeError::Collaborator("statement seed is empty".into()));
    }
    complete(llm, settings, STATEMENT_SYSTEM_PROMPT, seed.to_string(), "statement generation")
        .await
}

async fn complete(
    llm: &dyn LlmClient,
    settings: &LlmSettings,
    system: &str,
    prompt: String,
    what: &str,
) -> TaskforgeResult<String> {
    let request = CompletionRequest::with_settings(settings, system, prompt);
    let response = llm
        .complete(&request)
        .await
        .map_err(|e| TaskforgeError::Collaborator(format!("{what} failed: {e}")))?;
    debug!(
        what,
        prompt_tokens = response.prompt_tokens,
        completion_tokens = response.completion_tokens,
        "collaborator replied"
    );
    Ok(response.text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::model::{Difficulty, FieldSpec, TypeDescriptor};
    use crate::ports::llm::{CompletionResponse, LlmFuture};

    struct CannedLlm {
        reply: Result<String, String>,
        seen: Mutex<Vec<CompletionRequest>>,
    }

    impl CannedLlm {
        fn new(reply: Result<&str, &str>) -> Self {
            Self {
                reply: reply.map(str::to_string).map_err(str::to_string),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl LlmClient for CannedLlm {
        fn complete(&self, request: &CompletionRequest) -> LlmFuture<'_> {
            self.seen.lock().unwrap().push(request.clone());
            let reply = self.reply.clone();
            Box::pin(async move {
                reply
                    .map(|text| CompletionResponse { text, prompt_tokens: 1, completion_tokens: 1 })
                    .map_err(Into::into)
            })
        }
    }

    fn spec() -> ProblemSpec {
        ProblemSpec {
            task_name: "Sum of two".into(),
            difficulty: Difficulty::Easy,
            description: "Add a and b.".into(),
            function_name: "sum".into(),
            inputs: vec![
                FieldSpec::new("a", TypeDescriptor::parse("int").unwrap()),
                FieldSpec::new("b", TypeDescriptor::parse("int").unwrap()),
            ],
            outputs: vec![FieldSpec::new("result", TypeDescriptor::parse("int").unwrap())],
        }
    }

    #[test]
    fn tests_prompt_carries_problem_and_shape() {
        let spec = spec();
        let prompt = build_tests_prompt(&TestGenRequest {
            spec: &spec,
            solution: "int sum(int a, int b) { return a + b; }",
            count: 7,
        })
        .unwrap();
        assert!(prompt.contains("Problem name: Sum of two"));
        assert!(prompt.contains("\"function_name\": \"sum\""));
        assert!(prompt.contains("return a + b;"));
        assert!(prompt.contains("Generate 7 test cases"));
        assert!(prompt.contains("(a, b)"));
        assert!(prompt.contains("\"expected_output\""));
    }

    #[tokio::test]
    async fn generate_tests_sends_settings_and_trims_reply() {
        let llm = CannedLlm::new(Ok("  [{\"input\": {}, \"expected_output\": 1}]\n"));
        let spec = spec();
        let settings = LlmSettings { model: "test-model".into(), max_tokens: 99 };
        let text = generate_tests(
            &llm,
            &settings,
            &TestGenRequest { spec: &spec, solution: "", count: 1 },
        )
        .await
        .unwrap();

        assert_eq!(text, "[{\"input\": {}, \"expected_output\": 1}]");
        let seen = llm.seen.lock().unwrap();
        assert_eq!(seen[0].model, "test-model");
        assert_eq!(seen[0].max_tokens, 99);
        assert_eq!(seen[0].system.as_deref(), Some(TESTS_SYSTEM_PROMPT));
    }

    #[tokio::test]
    async fn model_failure_is_a_collaborator_error() {
        let llm = CannedLlm::new(Err("rate limited"));
        let err = generate_statement(&llm, &LlmSettings::default(), "binary search")
            .await
            .unwrap_err();
        let TaskforgeError::Collaborator(message) = err else {
            panic!("expected collaborator error, got {err:?}");
        };
        assert!(message.contains("rate limited"));
    }

    #[tokio::test]
    async fn statement_uses_seed_as_prompt() {
        let llm = CannedLlm::new(Ok("## Two Sum\n"));
        let text = generate_statement(&llm, &LlmSettings::default(), "hash maps").await.unwrap();
        assert_eq!(text, "## Two Sum");
        let seen = llm.seen.lock().unwrap();
        assert_eq!(seen[0].prompt, "hash maps");
        assert!(seen[0].system.as_deref().unwrap_or_default().contains("### Example 1:"));
    }

    #[tokio::test]
    async fn blank_seed_is_rejected_without_calling_the_model() {
        let llm = CannedLlm::new(Ok("unused"));
        assert!(generate_statement(&llm, &LlmSettings::default(), "  ").await.is_err());
        assert!(llm.seen.lock().unwrap().is_empty());
    }
}
