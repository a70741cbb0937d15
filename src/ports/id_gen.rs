//! Run identifiers.

/// Tags each judging run so its log lines can be correlated.
pub trait IdGenerator: Send + Sync {
    /// A fresh identifier, distinct from every earlier one.
    fn generate_id(&self) -> String;
}
