//! Judging: submit a prepared program once per test, poll to a verdict,
//! aggregate into a [`JudgeReport`].

mod orchestrator;
mod policy;
mod report;
mod submission;
mod verdict;

pub use orchestrator::Orchestrator;
pub use policy::{JudgeOptions, PollPolicy};
pub use report::{JudgeReport, OverallStatus, TestOutcome};
pub use submission::{JudgeSubmission, PreparedSource, SubmissionState};
pub use verdict::{JudgeStatus, Verdict};
