//! Replaying adapters that serve recorded interactions.
//!
//! [`Replaying`] is generic over the port like its recording counterpart.
//! It panics when its cassette has no interaction left for the requested
//! method, so a test that drifts from its recording fails loudly.

pub mod filesystem;
pub mod id_gen;
pub mod judge;
pub mod llm;

use std::error::Error;
use std::marker::PhantomData;
use std::sync::{Mutex, PoisonError};

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::CassettePort;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{FileSystem, IdGenerator, JudgeClient, LlmClient};

type BoxError = Box<dyn Error + Send + Sync>;

/// Answers a port's calls from a cassette, ignoring their inputs.
pub struct Replaying<P: ?Sized + CassettePort> {
    replayer: Mutex<CassetteReplayer>,
    port: PhantomData<fn() -> Box<P>>,
}

/// Replaying judge client.
pub type ReplayingJudgeClient = Replaying<dyn JudgeClient>;
/// Replaying LLM client.
pub type ReplayingLlmClient = Replaying<dyn LlmClient>;
/// Replaying filesystem.
pub type ReplayingFileSystem = Replaying<dyn FileSystem>;
/// Replaying id generator.
pub type ReplayingIdGenerator = Replaying<dyn IdGenerator>;

impl<P: ?Sized + CassettePort> Replaying<P> {
    /// Serves `replayer`'s interactions for this port.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer), port: PhantomData }
    }

    /// Output of the next recorded `method` call.
    fn next_output(&self, method: &str) -> Value {
        self.replayer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .next_interaction(P::PORT, method)
            .output
    }

    /// The next recorded `method` call as the `Result` it returned.
    fn next_result<T: DeserializeOwned>(&self, method: &str) -> Result<T, BoxError> {
        let output = self.next_output(method);
        replay_result(output, &format!("{}::{method}", P::PORT))
    }
}

/// Rebuilds a `Result` stored by [`super::recording::Recording`].
///
/// `{"Err": msg}` becomes `Err(msg)`; `{"Ok": v}` deserializes `v`.
pub(crate) fn replay_result<T: DeserializeOwned>(output: Value, context: &str) -> Result<T, BoxError> {
    let mut map = match output {
        Value::Object(map) => map,
        other => return Err(format!("{context}: recorded output is not a result: {other}").into()),
    };
    if let Some(err) = map.remove("Err") {
        return Err(match err {
            Value::String(message) => message.into(),
            other => other.to_string().into(),
        });
    }
    match map.remove("Ok") {
        Some(value) => serde_json::from_value(value)
            .map_err(|e| format!("{context}: failed to deserialize: {e}").into()),
        None => Err(format!("{context}: recorded output is not a result: {}", Value::Object(map)).into()),
    }
}

#[cfg(test)]
pub(crate) fn replayer_from(interactions: &[(&str, &str, Value)]) -> CassetteReplayer {
    use crate::cassette::format::{Cassette, Interaction};

    let interactions = interactions
        .iter()
        .zip(0..)
        .map(|((port, method, output), seq)| Interaction {
            seq,
            port: (*port).into(),
            method: (*method).into(),
            input: serde_json::json!({}),
            output: output.clone(),
        })
        .collect();
    CassetteReplayer::new(&Cassette::new("test", "abc", interactions))
}
