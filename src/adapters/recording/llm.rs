//! Recorded model completions.

use super::Recording;
use crate::ports::{CompletionRequest, LlmClient, LlmFuture};

impl LlmClient for Recording<dyn LlmClient> {
    fn complete(&self, request: &CompletionRequest) -> LlmFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let result = self.inner.complete(&request).await;
            self.record_result("complete", &request, &result);
            result
        })
    }
}
