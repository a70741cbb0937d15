//! Test case normalization: collaborator text in, judge-ready stdin/stdout pairs out.

mod extract;
mod normalize;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{TaskforgeError, TaskforgeResult};
use crate::model::ProblemSpec;

pub use extract::extract_json_array;
pub use normalize::{normalize_expected, serialize_input};

/// One test case as a collaborator emits it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawTestCase {
    /// Object keyed by input name (or an array in declaration order).
    pub input: Value,
    /// Expected result, possibly wrapped in a single-key object.
    #[serde(alias = "expectedOutput", alias = "output")]
    pub expected_output: Value,
}

/// A test case in wire form, ready to submit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedTestCase {
    /// Newline-terminated protocol lines fed to the program.
    pub stdin: String,
    /// What the program must print.
    pub expected_output: String,
}

impl NormalizedTestCase {
    /// Builds a test case from already-rendered text.
    pub fn new(stdin: impl Into<String>, expected_output: impl Into<String>) -> Self {
        Self { stdin: stdin.into(), expected_output: expected_output.into() }
    }
}

/// Normalizes one raw case against the problem's declared inputs.
///
/// # Errors
///
/// [`TaskforgeError::MalformedTestData`] when the input or expected output
/// cannot be rendered.
pub fn normalize_case(raw: &RawTestCase, spec: &ProblemSpec) -> TaskforgeResult<NormalizedTestCase> {
    Ok(NormalizedTestCase {
        stdin: serialize_input(&raw.input, &spec.inputs)?,
        expected_output: normalize_expected(&raw.expected_output)?,
    })
}

/// Extracts and normalizes every test case in `text`.
///
/// All or nothing: a single bad case fails the whole batch.
///
/// # Errors
///
/// [`TaskforgeError::MalformedTestData`] when no JSON array can be located, it
/// does not deserialize into test cases or any case fails to normalize.
pub fn parse_tests(text: &str, spec: &ProblemSpec) -> TaskforgeResult<Vec<NormalizedTestCase>> {
    let array = extract_json_array(text)?;
    let raw: Vec<RawTestCase> = serde_json::from_str(array)?;
    raw.iter()
        .enumerate()
        .map(|(i, case)| {
            normalize_case(case, spec).map_err(|err| match err {
                TaskforgeError::MalformedTestData(message) => {
                    TaskforgeError::MalformedTestData(format!("test {}: {message}", i + 1))
                }
                other => other,
            })
        })
        .collect()
}
