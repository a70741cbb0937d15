//! Live adapter for the `JudgeClient` port using the Judge0 HTTP API.

use std::error::Error;

use base64::{engine::general_purpose::STANDARD as base64_engine, Engine as _};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::JudgeEndpoint;
use crate::judge::JudgeStatus;
use crate::ports::judge::{JudgeClient, JudgeFuture, SubmissionRequest, SubmissionStatus};

/// Judge0 client. Every text field travels base64-encoded.
pub struct LiveJudgeClient {
    client: Client,
    endpoint: JudgeEndpoint,
}

impl LiveJudgeClient {
    /// Creates a client for the given endpoint. Every request is cut off
    /// after `endpoint.request_timeout`.
    #[must_use]
    pub fn new(endpoint: JudgeEndpoint) -> Self {
        let client = Client::builder()
            .timeout(endpoint.request_timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "judge HTTP client setup failed, using defaults");
                Client::new()
            });
        Self { client, endpoint }
    }

    fn with_headers(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header("x-rapidapi-host", &self.endpoint.host);
        match &self.endpoint.api_key {
            Some(key) => builder.header("x-rapidapi-key", key),
            None => builder,
        }
    }
}

/// Body of `POST /submissions`.
#[derive(Serialize)]
struct SubmissionBody {
    language_id: u32,
    source_code: String,
    stdin: String,
    expected_output: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    token: Option<String>,
}

#[derive(Deserialize)]
struct StatusResponse {
    status: StatusField,
    stdout: Option<String>,
    stderr: Option<String>,
    compile_output: Option<String>,
}

#[derive(Deserialize)]
struct StatusField {
    id: u32,
}

type BoxError = Box<dyn Error + Send + Sync>;

/// Judge0 wraps base64 output at 76 columns; whitespace is dropped before decoding.
fn decode_field(field: Option<String>) -> Result<Option<String>, BoxError> {
    let Some(encoded) = field else {
        return Ok(None);
    };
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = base64_engine
        .decode(compact.as_bytes())
        .map_err(|e| -> BoxError { format!("Judge returned invalid base64: {e}").into() })?;
    Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
}

impl JudgeClient for LiveJudgeClient {
    fn submit(&self, request: &SubmissionRequest) -> JudgeFuture<'_, String> {
        let body = SubmissionBody {
            language_id: request.language_id,
            source_code: base64_engine.encode(&request.source_code),
            stdin: base64_engine.encode(&request.stdin),
            expected_output: base64_engine.encode(&request.expected_output),
        };
        let url = format!("{}/submissions?base64_encoded=true&wait=false", self.endpoint.base_url);

        Box::pin(async move {
            debug!(%url, language_id = body.language_id, "POST submission");
            let response = self
                .with_headers(self.client.post(&url))
                .json(&body)
                .send()
                .await
                .map_err(|e| -> BoxError { format!("Judge submission request failed: {e}").into() })?;

            let status = response.status();
            let text = response
                .text()
                .await
                .map_err(|e| -> BoxError { format!("Failed to read judge response: {e}").into() })?;
            if !status.is_success() {
                return Err(format!("Judge rejected submission ({}): {text}", status.as_u16()).into());
            }

            let parsed: TokenResponse = serde_json::from_str(&text)
                .map_err(|e| -> BoxError { format!("Failed to parse judge response: {e}").into() })?;
            debug!(token = ?parsed.token, "submission accepted");
            Ok(parsed.token.unwrap_or_default())
        })
    }

    fn status(&self, token: &str) -> JudgeFuture<'_, SubmissionStatus> {
        let url = format!(
            "{}/submissions/{token}?base64_encoded=true&fields=status,stdout,stderr,compile_output",
            self.endpoint.base_url
        );

        Box::pin(async move {
            debug!(%url, "GET submission status");
            let response = self
                .with_headers(self.client.get(&url))
                .send()
                .await
                .map_err(|e| -> BoxError { format!("Judge status request failed: {e}").into() })?;

            let status = response.status();
            let text = response
                .text()
                .await
                .map_err(|e| -> BoxError { format!("Failed to read judge response: {e}").into() })?;
            if !status.is_success() {
                return Err(format!("Judge status error ({}): {text}", status.as_u16()).into());
            }

            let parsed: StatusResponse = serde_json::from_str(&text)
                .map_err(|e| -> BoxError { format!("Failed to parse judge status: {e}").into() })?;
            Ok(SubmissionStatus {
                status: JudgeStatus::from_id(parsed.status.id),
                stdout: decode_field(parsed.stdout)?,
                stderr: decode_field(parsed.stderr)?,
                compile_output: decode_field(parsed.compile_output)?,
            })
        })
    }
}
