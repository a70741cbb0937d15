//! Live adapters for real external interactions.

pub mod filesystem;
pub mod id_gen;
pub mod judge;
pub mod llm;

pub use filesystem::LiveFileSystem;
pub use id_gen::LiveIdGenerator;
pub use judge::LiveJudgeClient;
pub use llm::LiveLlmClient;
