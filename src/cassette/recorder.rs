//! Accumulates interactions and writes them out as a cassette.

use std::path::{Path, PathBuf};

use serde_json::Value;

use super::format::{Cassette, Interaction};

/// Collects interactions in call order for one cassette file.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    name: String,
    commit: String,
    interactions: Vec<Interaction>,
}

impl CassetteRecorder {
    /// A recorder that will write to `path` on [`finish`](Self::finish).
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        commit: impl Into<String>,
    ) -> Self {
        Self { path: path.into(), name: name.into(), commit: commit.into(), interactions: Vec::new() }
    }

    /// Appends one call; `seq` is its position in this recorder.
    pub fn record(
        &mut self,
        port: impl Into<String>,
        method: impl Into<String>,
        input: Value,
        output: Value,
    ) {
        let seq = self.interactions.len() as u64;
        self.interactions.push(Interaction {
            seq,
            port: port.into(),
            method: method.into(),
            input,
            output,
        });
    }

    /// Calls recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.interactions.len()
    }

    /// True before the first call.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty()
    }

    /// Destination file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the cassette and returns its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, std::io::Error> {
        Cassette::new(self.name, self.commit, self.interactions).write(&self.path)?;
        Ok(self.path)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn numbers_calls_and_writes_cassette() {
        let dir = std::env::temp_dir().join(format!("taskforge_recorder_{}", std::process::id()));
        let path = dir.join("session").join("judge.cassette.yaml");

        let mut recorder = CassetteRecorder::new(&path, "judge-session", "deadbeef");
        assert!(recorder.is_empty());
        recorder.record("judge", "submit", json!({"language_id": 54}), json!({"Ok": "tok"}));
        recorder.record("judge", "status", json!({"token": "tok"}), json!({"Ok": {"status": 2}}));
        recorder.record("judge", "status", json!({"token": "tok"}), json!({"Err": "502"}));
        assert_eq!(recorder.len(), 3);
        assert_eq!(recorder.path(), path);

        assert_eq!(recorder.finish().unwrap(), path);

        let cassette = Cassette::read(&path).unwrap();
        assert_eq!(cassette.name, "judge-session");
        assert_eq!(cassette.commit, "deadbeef");
        let seqs: Vec<u64> = cassette.interactions.iter().map(|i| i.seq).collect();
        assert_eq!(seqs, vec![0, 1, 2]);
        assert_eq!(cassette.interactions[2].output, json!({"Err": "502"}));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn empty_recorder_still_writes_a_cassette() {
        let dir = std::env::temp_dir().join(format!("taskforge_recorder_empty_{}", std::process::id()));
        let path = dir.join("llm.cassette.yaml");

        CassetteRecorder::new(&path, "idle", "unknown").finish().unwrap();
        assert!(Cassette::read(&path).unwrap().interactions.is_empty());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
