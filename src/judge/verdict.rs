//! Judge statuses and per-test verdicts.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A Judge0 submission status, keyed by its numeric id on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum JudgeStatus {
    /// 1: waiting for a worker.
    InQueue,
    /// 2: running.
    Processing,
    /// 3: output matched.
    Accepted,
    /// 4: output differed.
    WrongAnswer,
    /// 5
    TimeLimitExceeded,
    /// 6
    CompilationError,
    /// 7 through 12, one id per signal or exit condition.
    RuntimeError(u32),
    /// 13
    InternalError,
    /// 14
    ExecFormatError,
    /// Any id this client does not know.
    Other(u32),
}

impl JudgeStatus {
    /// Maps a Judge0 status id.
    #[must_use]
    pub fn from_id(id: u32) -> Self {
        match id {
            1 => Self::InQueue,
            2 => Self::Processing,
            3 => Self::Accepted,
            4 => Self::WrongAnswer,
            5 => Self::TimeLimitExceeded,
            6 => Self::CompilationError,
            7..=12 => Self::RuntimeError(id),
            13 => Self::InternalError,
            14 => Self::ExecFormatError,
            other => Self::Other(other),
        }
    }

    /// The Judge0 status id.
    #[must_use]
    pub fn id(self) -> u32 {
        match self {
            Self::InQueue => 1,
            Self::Processing => 2,
            Self::Accepted => 3,
            Self::WrongAnswer => 4,
            Self::TimeLimitExceeded => 5,
            Self::CompilationError => 6,
            Self::RuntimeError(id) | Self::Other(id) => id,
            Self::InternalError => 13,
            Self::ExecFormatError => 14,
        }
    }

    /// True while the judge has not finished with the submission.
    #[must_use]
    pub fn is_in_flight(self) -> bool {
        matches!(self, Self::InQueue | Self::Processing)
    }

    /// Judge0's description text.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::InQueue => "In Queue",
            Self::Processing => "Processing",
            Self::Accepted => "Accepted",
            Self::WrongAnswer => "Wrong Answer",
            Self::TimeLimitExceeded => "Time Limit Exceeded",
            Self::CompilationError => "Compilation Error",
            Self::RuntimeError(7) => "Runtime Error (SIGSEGV)",
            Self::RuntimeError(8) => "Runtime Error (SIGXFSZ)",
            Self::RuntimeError(9) => "Runtime Error (SIGFPE)",
            Self::RuntimeError(10) => "Runtime Error (SIGABRT)",
            Self::RuntimeError(11) => "Runtime Error (NZEC)",
            Self::RuntimeError(_) => "Runtime Error (Other)",
            Self::InternalError => "Internal Error",
            Self::ExecFormatError => "Exec Format Error",
            Self::Other(_) => "Unknown Status",
        }
    }
}

impl From<u32> for JudgeStatus {
    fn from(id: u32) -> Self {
        Self::from_id(id)
    }
}

impl From<JudgeStatus> for u32 {
    fn from(status: JudgeStatus) -> Self {
        status.id()
    }
}

impl fmt::Display for JudgeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Final outcome of one test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The judge finished and reported this status.
    Judged(JudgeStatus),
    /// The submission never produced a judge result (transport failure,
    /// missing token, poll budget or deadline exhausted).
    InfrastructureError(String),
}

impl Verdict {
    /// Only an accepted submission counts as correct.
    #[must_use]
    pub fn is_correct(&self) -> bool {
        matches!(self, Self::Judged(JudgeStatus::Accepted))
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Judged(status) => status.fmt(f),
            Self::InfrastructureError(reason) => write!(f, "Infrastructure Error: {reason}"),
        }
    }
}
