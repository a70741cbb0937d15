//! Replayed judge traffic: submission tokens and polled statuses.

use super::Replaying;
use crate::ports::judge::{JudgeClient, JudgeFuture, SubmissionRequest, SubmissionStatus};

impl JudgeClient for Replaying<dyn JudgeClient> {
    fn submit(&self, _request: &SubmissionRequest) -> JudgeFuture<'_, String> {
        let token = self.next_result("submit");
        Box::pin(async move { token })
    }

    fn status(&self, _token: &str) -> JudgeFuture<'_, SubmissionStatus> {
        let status = self.next_result("status");
        Box::pin(async move { status })
    }
}
