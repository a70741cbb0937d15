//! Replayed run ids.

use serde_json::Value;

use super::Replaying;
use crate::ports::IdGenerator;

impl IdGenerator for Replaying<dyn IdGenerator> {
    fn generate_id(&self) -> String {
        match self.next_output("generate_id") {
            Value::String(id) => id,
            other => other.to_string(),
        }
    }
}
