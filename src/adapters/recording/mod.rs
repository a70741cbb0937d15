//! Recording adapters: delegate to an inner port and append every call to a
//! cassette.
//!
//! One generic wrapper, [`Recording`], serves every port. Fallible calls are
//! stored as `{"Ok": value}` or `{"Err": message}`, the shape
//! [`super::replaying::Replaying`] reads back.

pub mod filesystem;
pub mod id_gen;
pub mod judge;
pub mod llm;

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;

use super::CassettePort;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{FileSystem, IdGenerator, JudgeClient, LlmClient};

/// Wraps a port implementation and records each call it serves.
pub struct Recording<P: ?Sized + CassettePort> {
    inner: Box<P>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

/// Recording judge client.
pub type RecordingJudgeClient = Recording<dyn JudgeClient>;
/// Recording LLM client.
pub type RecordingLlmClient = Recording<dyn LlmClient>;
/// Recording filesystem.
pub type RecordingFileSystem = Recording<dyn FileSystem>;
/// Recording id generator.
pub type RecordingIdGenerator = Recording<dyn IdGenerator>;

impl<P: ?Sized + CassettePort> Recording<P> {
    /// Wraps `inner`, appending to `recorder`.
    pub fn new(inner: Box<P>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }

    /// Records a call whose return value cannot fail.
    fn record_value<I: Serialize, O: Serialize>(&self, method: &str, input: &I, output: &O) {
        self.push(method, serde_json::to_value(input), serde_json::to_value(output));
    }

    /// Records a fallible call.
    fn record_result<I, T, E>(&self, method: &str, input: &I, result: &Result<T, E>)
    where
        I: Serialize,
        T: Serialize,
        E: std::fmt::Display,
    {
        let output = match result {
            Ok(value) => serde_json::to_value(value).map(|value| json!({ "Ok": value })),
            Err(err) => Ok(json!({ "Err": err.to_string() })),
        };
        self.push(method, serde_json::to_value(input), output);
    }

    fn push(
        &self,
        method: &str,
        input: serde_json::Result<Value>,
        output: serde_json::Result<Value>,
    ) {
        match (input, output) {
            (Ok(input), Ok(output)) => self
                .recorder
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .record(P::PORT, method, input, output),
            (Err(e), _) | (_, Err(e)) => {
                warn!(port = P::PORT, method, error = %e, "interaction not recorded");
            }
        }
    }
}
