//! Error taxonomy for the authoring pipeline.

use thiserror::Error;

/// Result alias used throughout the library.
pub type TaskforgeResult<T> = Result<T, TaskforgeError>;

/// Errors surfaced synchronously to callers.
///
/// Judge-side failures are not represented here: they resolve into a
/// per-test [`crate::judge::Verdict::InfrastructureError`] so that a judging
/// run always produces a report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskforgeError {
    /// Generated or hand-written test material could not be extracted or parsed.
    #[error("Malformed test data: {0}")]
    MalformedTestData(String),

    /// The problem definition failed validation.
    #[error("Invalid problem: {}", problems.join("; "))]
    InvalidProblem {
        /// Every validation failure found, in the order checked.
        problems: Vec<String>,
    },

    /// A field uses a type outside the supported vocabulary.
    #[error("Unsupported type `{type_name}` for field `{field}`")]
    UnsupportedType {
        /// Name of the offending field.
        field: String,
        /// The type string as written by the author.
        type_name: String,
    },

    /// A full program did not contain the user-code marker exactly once.
    #[error("Full program must contain the user code marker exactly once (found {found})")]
    MarkerCount {
        /// Number of marker occurrences found.
        found: usize,
    },

    /// A text-generation collaborator failed.
    #[error("Collaborator error: {0}")]
    Collaborator(String),

    /// Reading or writing problem files failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// An environment setting could not be interpreted.
    #[error("Config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for TaskforgeError {
    fn from(err: serde_json::Error) -> Self {
        TaskforgeError::MalformedTestData(err.to_string())
    }
}
