//! Serves recorded interactions back in order.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Per `port::method` queues over one cassette.
///
/// Calls to different methods may interleave differently from the recording;
/// calls to the same method must come in recorded order.
#[derive(Debug)]
pub struct CassetteReplayer {
    queues: HashMap<(String, String), VecDeque<Interaction>>,
    served: HashMap<(String, String), u64>,
    loaded: bool,
}

impl CassetteReplayer {
    /// Queues every interaction in `cassette`.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<(String, String), VecDeque<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            queues
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push_back(interaction.clone());
        }
        Self { queues, served: HashMap::new(), loaded: true }
    }

    /// A replayer for a port with no cassette. Every call panics.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self { queues: HashMap::new(), served: HashMap::new(), loaded: false }
    }

    /// Takes the next recorded call to `port::method`.
    ///
    /// # Panics
    ///
    /// Panics with "Cassette exhausted" when nothing is left for this method,
    /// listing what the cassette still holds, and with "No cassette loaded"
    /// for an [`unconfigured`](Self::unconfigured) replayer.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Interaction {
        assert!(self.loaded, "No cassette loaded for {port}: {port}::{method} cannot be replayed");
        let key = (port.to_string(), method.to_string());
        if let Some(interaction) = self.queues.get_mut(&key).and_then(VecDeque::pop_front) {
            *self.served.entry(key).or_insert(0) += 1;
            return interaction;
        }

        let served = self.served.get(&key).copied().unwrap_or(0);
        let mut left: Vec<String> = self
            .queues
            .iter()
            .filter(|(_, queue)| !queue.is_empty())
            .map(|((p, m), queue)| format!("{p}::{m} x{}", queue.len()))
            .collect();
        left.sort();
        panic!(
            "Cassette exhausted: {port}::{method} requested after {served} recorded call(s) \
             were served. Remaining: [{}]",
            left.join(", ")
        );
    }

    /// Interactions not yet served.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }
}
