//! Replayed model completions.

use super::Replaying;
use crate::ports::{CompletionRequest, LlmClient, LlmFuture};

impl LlmClient for Replaying<dyn LlmClient> {
    fn complete(&self, _request: &CompletionRequest) -> LlmFuture<'_> {
        let response = self.next_result("complete");
        Box::pin(async move { response })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::{replayer_from, ReplayingLlmClient};
    use super::*;
    use crate::config::LlmSettings;

    #[tokio::test]
    async fn completion_comes_back_with_usage() {
        let llm = ReplayingLlmClient::new(replayer_from(&[(
            "llm",
            "complete",
            json!({"Ok": {"text": "[]", "prompt_tokens": 10, "completion_tokens": 1}}),
        )]));
        let request =
            CompletionRequest::with_settings(&LlmSettings::default(), "system", "prompt".into());
        let response = llm.complete(&request).await.unwrap();
        assert_eq!(response.text, "[]");
        assert_eq!(response.prompt_tokens, 10);
        assert_eq!(response.completion_tokens, 1);
    }
}
