//! Recorded judge traffic.

use serde::Serialize;

use super::Recording;
use crate::ports::judge::{JudgeClient, JudgeFuture, SubmissionRequest, SubmissionStatus};

#[derive(Serialize)]
struct TokenInput<'a> {
    token: &'a str,
}

impl JudgeClient for Recording<dyn JudgeClient> {
    fn submit(&self, request: &SubmissionRequest) -> JudgeFuture<'_, String> {
        let request = request.clone();
        Box::pin(async move {
            let result = self.inner.submit(&request).await;
            self.record_result("submit", &request, &result);
            result
        })
    }

    fn status(&self, token: &str) -> JudgeFuture<'_, SubmissionStatus> {
        let token = token.to_string();
        Box::pin(async move {
            let result = self.inner.status(&token).await;
            self.record_result("status", &TokenInput { token: &token }, &result);
            result
        })
    }
}
