//! Live adapter for the `LlmClient` port using the Anthropic messages API.

use std::error::Error;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ports::llm::{CompletionRequest, CompletionResponse, LlmClient, LlmFuture};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

type BoxError = Box<dyn Error + Send + Sync>;

/// Anthropic client. The API key is read from `ANTHROPIC_API_KEY` on each
/// call, so commands that never reach the model run without one.
#[derive(Default)]
pub struct LiveLlmClient {
    client: Client,
}

impl LiveLlmClient {
    /// Creates a client with a fresh connection pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Body of `POST /v1/messages`: a single user turn.
#[derive(Serialize)]
struct MessagesBody<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: [UserMessage<'a>; 1],
}

#[derive(Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> MessagesBody<'a> {
    fn from_request(request: &'a CompletionRequest) -> Self {
        Self {
            model: &request.model,
            max_tokens: request.max_tokens,
            system: request.system.as_deref(),
            messages: [UserMessage { role: "user", content: &request.prompt }],
        }
    }
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    usage: Usage,
}

/// Only `text` blocks carry completion text.
#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

impl From<MessagesResponse> for CompletionResponse {
    fn from(response: MessagesResponse) -> Self {
        let text = response
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .map(|block| block.text)
            .collect();
        CompletionResponse {
            text,
            prompt_tokens: response.usage.input_tokens,
            completion_tokens: response.usage.output_tokens,
        }
    }
}

/// The API's own error message when the body carries one.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map_or_else(|_| body.to_string(), |envelope| envelope.error.message)
}

impl LlmClient for LiveLlmClient {
    fn complete(&self, request: &CompletionRequest) -> LlmFuture<'_> {
        let request = request.clone();

        Box::pin(async move {
            let api_key = std::env::var(API_KEY_VAR)
                .map_err(|_| -> BoxError { format!("{API_KEY_VAR} is not set").into() })?;

            debug!(model = %request.model, max_tokens = request.max_tokens, "POST completion");
            let response = self
                .client
                .post(MESSAGES_URL)
                .header("x-api-key", &api_key)
                .header("anthropic-version", API_VERSION)
                .json(&MessagesBody::from_request(&request))
                .send()
                .await
                .map_err(|e| -> BoxError { format!("Model request failed: {e}").into() })?;

            let status = response.status();
            let text = response
                .text()
                .await
                .map_err(|e| -> BoxError { format!("Failed to read model response: {e}").into() })?;
            if !status.is_success() {
                return Err(format!("Model API error ({}): {}", status.as_u16(), error_message(&text))
                    .into());
            }

            let parsed: MessagesResponse = serde_json::from_str(&text)
                .map_err(|e| -> BoxError { format!("Failed to parse model response: {e}").into() })?;
            let completion = CompletionResponse::from(parsed);
            debug!(
                prompt_tokens = completion.prompt_tokens,
                completion_tokens = completion.completion_tokens,
                "completion received"
            );
            Ok(completion)
        })
    }
}
