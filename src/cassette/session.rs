//! A recording run: one cassette recorder per port, one directory per run.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::{debug, warn};

use super::format::cassette_file_name;
use super::recorder::CassetteRecorder;

/// One recorder per port, all writing into a timestamped directory.
pub struct RecordingSession {
    /// Recorder for judge interactions.
    pub judge: Arc<Mutex<CassetteRecorder>>,
    /// Recorder for LLM interactions.
    pub llm: Arc<Mutex<CassetteRecorder>>,
    /// Recorder for filesystem interactions.
    pub fs: Arc<Mutex<CassetteRecorder>>,
    /// Recorder for ID generator interactions.
    pub id_gen: Arc<Mutex<CassetteRecorder>>,
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Creates `<base>/<timestamp>/` and a recorder per port inside it.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory already exists or cannot be created.
    pub fn new(base: &Path) -> Result<Self, String> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let output_dir = base.join(&timestamp);

        if output_dir.exists() {
            return Err(format!("Cassette directory already exists: {}", output_dir.display()));
        }
        std::fs::create_dir_all(&output_dir)
            .map_err(|e| format!("Failed to create cassette directory: {e}"))?;

        let commit = head_commit();
        let make_recorder = |port: &str| -> Arc<Mutex<CassetteRecorder>> {
            let path = output_dir.join(cassette_file_name(port));
            let name = format!("{timestamp}-{port}");
            Arc::new(Mutex::new(CassetteRecorder::new(path, name, &commit)))
        };

        Ok(Self {
            judge: make_recorder("judge"),
            llm: make_recorder("llm"),
            fs: make_recorder("fs"),
            id_gen: make_recorder("id_gen"),
            output_dir,
        })
    }

    /// Directory holding this session's cassettes.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes a cassette for every port that was used and returns the
    /// session directory. Unused ports get no file, so replaying the
    /// directory leaves them unconfigured.
    ///
    /// The recording adapters must have been dropped first.
    ///
    /// # Errors
    ///
    /// Returns an error if a recorder is still shared or a file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        for (port, recorder) in
            [("judge", self.judge), ("llm", self.llm), ("fs", self.fs), ("id_gen", self.id_gen)]
        {
            let recorder = Arc::try_unwrap(recorder)
                .map_err(|_| format!("Recording adapter for {port} still has references"))?
                .into_inner()
                .map_err(|e| format!("Recorder lock for {port} poisoned: {e}"))?;
            if recorder.is_empty() {
                continue;
            }
            let calls = recorder.len();
            let path =
                recorder.finish().map_err(|e| format!("Failed to write {port} cassette: {e}"))?;
            debug!(port, calls, path = %path.display(), "cassette written");
        }
        Ok(self.output_dir)
    }
}

/// `HEAD` of the working directory's repository, stamped into each cassette.
/// "unknown" outside a repository.
fn head_commit() -> String {
    let hash = std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string());

    hash.unwrap_or_else(|| {
        warn!("could not read git commit hash, recording 'unknown'");
        "unknown".to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_writes_cassettes_for_used_ports_only() {
        let base = std::env::temp_dir().join("taskforge_session_test");
        let _ = std::fs::remove_dir_all(&base);

        let session = RecordingSession::new(&base).unwrap();
        assert!(session.output_dir().starts_with(&base));
        session.judge.lock().unwrap().record(
            "judge",
            "submit",
            serde_json::json!({}),
            serde_json::json!({"Ok": "t"}),
        );

        let dir = session.finish().unwrap();
        assert!(dir.join(cassette_file_name("judge")).is_file());
        for port in ["llm", "fs", "id_gen"] {
            assert!(!dir.join(cassette_file_name(port)).exists(), "{port}");
        }

        let config = crate::cassette::config::CassetteConfig::from_dir(&dir);
        assert!(config.judge.is_some());
        assert!(config.llm.is_none());

        let _ = std::fs::remove_dir_all(&base);
    }

    #[test]
    fn shared_recorder_blocks_finish() {
        let base = std::env::temp_dir().join("taskforge_session_shared_test");
        let _ = std::fs::remove_dir_all(&base);

        let session = RecordingSession::new(&base).unwrap();
        let held = Arc::clone(&session.llm);
        let err = session.finish().unwrap_err();
        assert!(err.contains("llm still has references"));
        drop(held);

        let _ = std::fs::remove_dir_all(&base);
    }

    #[test]
    fn head_commit_is_never_empty() {
        assert!(!head_commit().is_empty());
    }
}
