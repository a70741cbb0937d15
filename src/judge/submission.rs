//! Prepared sources and the lifecycle of one submission.

use crate::codegen::USER_CODE_MARKER;
use crate::error::{TaskforgeError, TaskforgeResult};
use crate::model::Language;
use crate::ports::judge::{SubmissionRequest, SubmissionStatus};
use crate::testcase::NormalizedTestCase;

use super::report::TestOutcome;
use super::verdict::{JudgeStatus, Verdict};

/// A full program with the solver's code spliced in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedSource {
    source: String,
}

impl PreparedSource {
    /// Replaces the marker in `full_program` with `user_code`.
    ///
    /// # Errors
    ///
    /// [`TaskforgeError::MarkerCount`] unless the marker occurs exactly once.
    pub fn new(full_program: &str, user_code: &str) -> TaskforgeResult<Self> {
        let found = full_program.matches(USER_CODE_MARKER).count();
        if found != 1 {
            return Err(TaskforgeError::MarkerCount { found });
        }
        Ok(Self { source: full_program.replacen(USER_CODE_MARKER, user_code, 1) })
    }

    /// The program text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Where a submission is in its lifecycle.
///
/// `Created -> Submitted -> InFlight* -> Resolved`. `Resolved` is terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    /// Not yet sent.
    Created,
    /// Accepted by the judge under this token.
    Submitted {
        /// Judge token.
        token: String,
    },
    /// Queued or running on the judge.
    InFlight {
        /// Judge token.
        token: String,
        /// Last observed status.
        status: JudgeStatus,
    },
    /// Final.
    Resolved(Verdict),
}

/// One test case's trip through the judge.
#[derive(Debug)]
pub struct JudgeSubmission<'a> {
    index: usize,
    source: &'a PreparedSource,
    test: &'a NormalizedTestCase,
    state: SubmissionState,
    token: Option<String>,
    diagnostic: Option<String>,
}

impl<'a> JudgeSubmission<'a> {
    /// A fresh submission for test `index`.
    #[must_use]
    pub fn new(index: usize, source: &'a PreparedSource, test: &'a NormalizedTestCase) -> Self {
        Self { index, source, test, state: SubmissionState::Created, token: None, diagnostic: None }
    }

    /// The wire request for this submission.
    #[must_use]
    pub fn request(&self, language: Language) -> SubmissionRequest {
        SubmissionRequest {
            language_id: language.judge_language_id(),
            source_code: self.source.as_str().to_string(),
            stdin: self.test.stdin.clone(),
            expected_output: self.test.expected_output.clone(),
        }
    }

    /// 0-based test index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Token once submitted.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// True once a verdict is known.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self.state, SubmissionState::Resolved(_))
    }

    /// Records the token returned by a successful submit. An empty token
    /// resolves the submission as an infrastructure error.
    pub fn accept(&mut self, token: String) {
        if self.is_resolved() {
            return;
        }
        if token.trim().is_empty() {
            self.fail("judge returned no submission token");
            return;
        }
        self.token = Some(token.clone());
        self.state = SubmissionState::Submitted { token };
    }

    /// Applies a polled status.
    pub fn observe(&mut self, status: &SubmissionStatus) {
        let token = match &self.state {
            SubmissionState::Submitted { token } | SubmissionState::InFlight { token, .. } => {
                token.clone()
            }
            SubmissionState::Created | SubmissionState::Resolved(_) => return,
        };
        if status.status.is_in_flight() {
            self.state = SubmissionState::InFlight { token, status: status.status };
        } else {
            self.diagnostic = status.diagnostic().map(str::to_string);
            self.state = SubmissionState::Resolved(Verdict::Judged(status.status));
        }
    }

    /// Resolves as an infrastructure error.
    pub fn fail(&mut self, reason: impl Into<String>) {
        if !self.is_resolved() {
            self.state = SubmissionState::Resolved(Verdict::InfrastructureError(reason.into()));
        }
    }

    /// Converts into the report entry. An unresolved submission becomes an
    /// infrastructure error.
    #[must_use]
    pub fn into_outcome(self) -> TestOutcome {
        let verdict = match self.state {
            SubmissionState::Resolved(verdict) => verdict,
            _ => Verdict::InfrastructureError("submission was never resolved".into()),
        };
        TestOutcome { index: self.index, token: self.token, verdict, diagnostic: self.diagnostic }
    }
}
