//! Remote judge port: submit a program run and poll its status.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::judge::JudgeStatus;

/// Boxed future returned by [`JudgeClient`] methods.
pub type JudgeFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// One program run against one test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRequest {
    /// Judge runtime id.
    pub language_id: u32,
    /// Complete program text.
    pub source_code: String,
    /// Data fed to the program.
    pub stdin: String,
    /// Output the judge compares against.
    pub expected_output: String,
}

/// What the judge reports for a submission at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionStatus {
    /// Current status.
    pub status: JudgeStatus,
    /// Program stdout, if any.
    #[serde(default)]
    pub stdout: Option<String>,
    /// Program stderr, if any.
    #[serde(default)]
    pub stderr: Option<String>,
    /// Compiler output, if any.
    #[serde(default)]
    pub compile_output: Option<String>,
}

impl SubmissionStatus {
    /// A status with no output streams.
    #[must_use]
    pub fn bare(status: JudgeStatus) -> Self {
        Self { status, stdout: None, stderr: None, compile_output: None }
    }

    /// `stderr` if non-empty, otherwise `compile_output` if non-empty.
    #[must_use]
    pub fn diagnostic(&self) -> Option<&str> {
        [&self.stderr, &self.compile_output]
            .into_iter()
            .filter_map(Option::as_deref)
            .find(|text| !text.trim().is_empty())
    }
}

/// A remote code execution service.
pub trait JudgeClient: Send + Sync {
    /// Submits a run and returns its token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    fn submit(&self, request: &SubmissionRequest) -> JudgeFuture<'_, String>;

    /// Fetches the current status of a submission.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    fn status(&self, token: &str) -> JudgeFuture<'_, SubmissionStatus>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_prefers_stderr_then_compile_output() {
        let mut status = SubmissionStatus::bare(JudgeStatus::CompilationError);
        assert_eq!(status.diagnostic(), None);
        status.compile_output = Some("error: expected ';'".into());
        assert_eq!(status.diagnostic(), Some("error: expected ';'"));
        status.stderr = Some("  \n".into());
        assert_eq!(status.diagnostic(), Some("error: expected ';'"));
        status.stderr = Some("panicked".into());
        assert_eq!(status.diagnostic(), Some("panicked"));
    }
}
