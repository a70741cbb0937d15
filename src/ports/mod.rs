//! Port traits defining external boundaries.
//!
//! Each trait is a seam between the authoring core and something outside the
//! process: the remote judge, the language model, the disk and ID generation.
//! Implementations live in `src/adapters/`.

pub mod filesystem;
pub mod id_gen;
pub mod judge;
pub mod llm;

pub use filesystem::FileSystem;
pub use id_gen::IdGenerator;
pub use judge::{JudgeClient, JudgeFuture, SubmissionRequest, SubmissionStatus};
pub use llm::{CompletionRequest, CompletionResponse, LlmClient, LlmFuture};
