//! On-disk cassette format.
//!
//! A cassette is a YAML document holding every interaction one or more ports
//! had with the outside world during a recorded run. Outputs of fallible
//! calls are stored as `{"Ok": value}` or `{"Err": message}`.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Port names as they appear in cassettes and cassette file names.
pub const PORTS: [&str; 4] = ["judge", "llm", "fs", "id_gen"];

/// File name of the per-port cassette written by a recording session.
#[must_use]
pub fn cassette_file_name(port: &str) -> String {
    format!("{port}.cassette.yaml")
}

/// One call made through a port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Position in the recording, from 0.
    pub seq: u64,
    /// Port name, one of [`PORTS`].
    pub port: String,
    /// Port method, e.g. `submit` or `complete`.
    pub method: String,
    /// Arguments of the call.
    pub input: Value,
    /// What the call returned.
    pub output: Value,
}

impl Interaction {
    /// True if this interaction is a call to `port::method`.
    #[must_use]
    pub fn is_call(&self, port: &str, method: &str) -> bool {
        self.port == port && self.method == method
    }
}

/// A recorded run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Label, `<timestamp>-<port>` for session recordings.
    pub name: String,
    /// When the recording finished.
    pub recorded_at: DateTime<Utc>,
    /// Commit of the working tree at recording time, or `unknown`.
    pub commit: String,
    /// Interactions in call order.
    pub interactions: Vec<Interaction>,
}

impl Cassette {
    /// A cassette stamped with the current time.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        commit: impl Into<String>,
        interactions: Vec<Interaction>,
    ) -> Self {
        Self { name: name.into(), recorded_at: Utc::now(), commit: commit.into(), interactions }
    }

    /// Reads and parses a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a cassette.
    pub fn read(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))
    }

    /// Writes the cassette as YAML, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn write(&self, path: &Path) -> std::io::Result<()> {
        let yaml = serde_yaml::to_string(self).map_err(std::io::Error::other)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, yaml)
    }

    /// Number of recorded calls to `port`.
    #[must_use]
    pub fn calls_to(&self, port: &str) -> usize {
        self.interactions.iter().filter(|i| i.port == port).count()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn judge_run() -> Cassette {
        Cassette::new(
            "judge-run",
            "abc123",
            vec![
                Interaction {
                    seq: 0,
                    port: "judge".into(),
                    method: "submit".into(),
                    input: json!({"language_id": 73, "stdin": "1\n2\n"}),
                    output: json!({"Ok": "d85cd024"}),
                },
                Interaction {
                    seq: 1,
                    port: "judge".into(),
                    method: "status".into(),
                    input: json!({"token": "d85cd024"}),
                    output: json!({"Ok": {"status": 3, "stdout": "3"}}),
                },
                Interaction {
                    seq: 2,
                    port: "id_gen".into(),
                    method: "generate_id".into(),
                    input: json!({}),
                    output: json!("run-1"),
                },
            ],
        )
    }

    #[test]
    fn written_cassette_reads_back() {
        let dir = std::env::temp_dir().join(format!("taskforge_format_{}", std::process::id()));
        let path = dir.join("nested").join(cassette_file_name("judge"));
        let cassette = judge_run();

        cassette.write(&path).unwrap();
        assert_eq!(Cassette::read(&path).unwrap(), cassette);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = Cassette::read(Path::new("/nonexistent/judge.cassette.yaml")).unwrap_err();
        assert!(err.contains("/nonexistent/judge.cassette.yaml"));
    }

    #[test]
    fn counts_calls_per_port() {
        let cassette = judge_run();
        assert_eq!(cassette.calls_to("judge"), 2);
        assert_eq!(cassette.calls_to("llm"), 0);
        assert!(cassette.interactions[1].is_call("judge", "status"));
        assert!(!cassette.interactions[1].is_call("judge", "submit"));
    }

    #[test]
    fn file_names_follow_port() {
        let names: Vec<String> = PORTS.iter().map(|port| cassette_file_name(port)).collect();
        assert_eq!(
            names,
            ["judge.cassette.yaml", "llm.cassette.yaml", "fs.cassette.yaml", "id_gen.cassette.yaml"]
        );
    }
}
