//! Problem model: value types, target languages and problem signatures.

mod language;
mod problem;
mod reserved;
mod type_descriptor;

pub use language::Language;
pub use problem::{Difficulty, FieldSpec, ProblemSpec, TypePolicy};
pub(crate) use reserved::is_reserved;
pub use type_descriptor::{FieldType, Scalar, TypeDescriptor};
