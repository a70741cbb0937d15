//! Collaborator port: the language model that drafts tests and statements.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::config::LlmSettings;

/// What [`LlmClient::complete`] resolves to. Boxed so the trait stays
/// object-safe behind `Box<dyn LlmClient>`.
pub type LlmFuture<'a> = Pin<
    Box<dyn Future<Output = Result<CompletionResponse, Box<dyn Error + Send + Sync>>> + Send + 'a>,
>;

/// One single-turn prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model identifier.
    pub model: String,
    /// Instructions framing the reply format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    /// The problem material.
    pub prompt: String,
    /// Reply budget in tokens.
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// A request using the configured model and budget.
    #[must_use]
    pub fn with_settings(settings: &LlmSettings, system: &str, prompt: String) -> Self {
        Self {
            model: settings.model.clone(),
            system: Some(system.to_string()),
            prompt,
            max_tokens: settings.max_tokens,
        }
    }
}

/// The model's reply and its token usage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Reply text, untrimmed.
    pub text: String,
    /// Tokens billed for the prompt.
    pub prompt_tokens: u32,
    /// Tokens billed for the reply.
    pub completion_tokens: u32,
}

/// A text-generation backend.
pub trait LlmClient: Send + Sync {
    /// Sends `request` and waits for the whole reply.
    ///
    /// # Errors
    ///
    /// Transport, authentication and API failures, as a message.
    fn complete(&self, request: &CompletionRequest) -> LlmFuture<'_>;
}
