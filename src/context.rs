//! The set of ports a command runs against.

use std::path::Path;

use crate::adapters::live::{LiveFileSystem, LiveIdGenerator, LiveJudgeClient, LiveLlmClient};
use crate::adapters::recording::{
    RecordingFileSystem, RecordingIdGenerator, RecordingJudgeClient, RecordingLlmClient,
};
use crate::adapters::replaying::{
    ReplayingFileSystem, ReplayingIdGenerator, ReplayingJudgeClient, ReplayingLlmClient,
};
use crate::cassette::config::CassetteConfig;
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::config::Config;
use crate::ports::{FileSystem, IdGenerator, JudgeClient, LlmClient};

/// Every external boundary the commands touch.
///
/// Constructors wire up live, recording or replaying adapters.
pub struct ServiceContext {
    /// Remote judge.
    pub judge: Box<dyn JudgeClient>,
    /// Text-generation collaborator.
    pub llm: Box<dyn LlmClient>,
    /// Problem documents and exports.
    pub fs: Box<dyn FileSystem>,
    /// Run identifiers.
    pub id_gen: Box<dyn IdGenerator>,
}

impl ServiceContext {
    /// Live adapters for every port.
    #[must_use]
    pub fn live(config: &Config) -> Self {
        Self {
            judge: Box::new(LiveJudgeClient::new(config.judge.clone())),
            llm: Box::new(LiveLlmClient::new()),
            fs: Box::new(LiveFileSystem),
            id_gen: Box::new(LiveIdGenerator),
        }
    }

    /// Live adapters wrapped in recorders writing under `base`.
    ///
    /// Drop the context before calling [`RecordingSession::finish`].
    ///
    /// # Errors
    ///
    /// Returns an error if the session directory cannot be created.
    pub fn recording_at(
        base: &Path,
        config: &Config,
    ) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::new(base)?;
        let live = Self::live(config);
        let ctx = Self {
            judge: Box::new(RecordingJudgeClient::new(live.judge, session.judge.clone())),
            llm: Box::new(RecordingLlmClient::new(live.llm, session.llm.clone())),
            fs: Box::new(RecordingFileSystem::new(live.fs, session.fs.clone())),
            id_gen: Box::new(RecordingIdGenerator::new(live.id_gen, session.id_gen.clone())),
        };
        Ok((ctx, session))
    }

    /// Replays every port from one combined cassette. Each port keeps its own
    /// cursor into the shared interaction list.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let cassette = Cassette::read(path)?;

        Ok(Self {
            judge: Box::new(ReplayingJudgeClient::new(CassetteReplayer::new(&cassette))),
            llm: Box::new(ReplayingLlmClient::new(CassetteReplayer::new(&cassette))),
            fs: Box::new(ReplayingFileSystem::new(CassetteReplayer::new(&cassette))),
            id_gen: Box::new(ReplayingIdGenerator::new(CassetteReplayer::new(&cassette))),
        })
    }

    /// Replays from per-port cassette files. A port without a cassette
    /// panics with "No cassette loaded" when called.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;
        Ok(Self {
            judge: Box::new(ReplayingJudgeClient::new(replayers.judge)),
            llm: Box::new(ReplayingLlmClient::new(replayers.llm)),
            fs: Box::new(ReplayingFileSystem::new(replayers.fs)),
            id_gen: Box::new(ReplayingIdGenerator::new(replayers.id_gen)),
        })
    }
}
