//! Port implementations: live services, cassette recording and cassette replay.

pub mod live;
pub mod recording;
pub mod replaying;

use crate::ports::{FileSystem, IdGenerator, JudgeClient, LlmClient};

/// Names a port's interactions inside a cassette. Implemented for the port
/// trait objects so [`recording::Recording`] and [`replaying::Replaying`]
/// can be generic over the port.
pub trait CassettePort {
    /// Port name, also the cassette file stem.
    const PORT: &'static str;
}

impl CassettePort for dyn JudgeClient {
    const PORT: &'static str = "judge";
}

impl CassettePort for dyn LlmClient {
    const PORT: &'static str = "llm";
}

impl CassettePort for dyn FileSystem {
    const PORT: &'static str = "fs";
}

impl CassettePort for dyn IdGenerator {
    const PORT: &'static str = "id_gen";
}
