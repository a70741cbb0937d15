//! Per-port cassette selection for replay.

use std::path::{Path, PathBuf};

use super::format::{cassette_file_name, Cassette};
use super::replayer::CassetteReplayer;

/// Which cassette file replays which port, as written by a
/// [`RecordingSession`](super::session::RecordingSession).
#[derive(Debug, Clone, Default)]
pub struct CassetteConfig {
    /// `judge.cassette.yaml`.
    pub judge: Option<PathBuf>,
    /// `llm.cassette.yaml`.
    pub llm: Option<PathBuf>,
    /// `fs.cassette.yaml`.
    pub fs: Option<PathBuf>,
    /// `id_gen.cassette.yaml`.
    pub id_gen: Option<PathBuf>,
}

/// Per-port replayers, each with its own interaction stream. Ports with no
/// configured cassette get [`CassetteReplayer::unconfigured`].
pub struct PortReplayers {
    /// Judge traffic.
    pub judge: CassetteReplayer,
    /// Model completions.
    pub llm: CassetteReplayer,
    /// Problem-file reads and writes.
    pub fs: CassetteReplayer,
    /// Run ids.
    pub id_gen: CassetteReplayer,
}

impl CassetteConfig {
    /// Config for a directory written by a recording session: every
    /// `<port>.cassette.yaml` present in `dir` is used.
    #[must_use]
    pub fn from_dir(dir: &Path) -> Self {
        let port = |name: &str| {
            let path = dir.join(cassette_file_name(name));
            path.is_file().then_some(path)
        };
        Self { judge: port("judge"), llm: port("llm"), fs: port("fs"), id_gen: port("id_gen") }
    }

    /// Reads one cassette into a replayer.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_cassette(path: &Path) -> Result<CassetteReplayer, String> {
        Cassette::read(path).map(|cassette| CassetteReplayer::new(&cassette))
    }

    /// Loads every configured cassette.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn load_all(&self) -> Result<PortReplayers, String> {
        let load = |path: &Option<PathBuf>| {
            path.as_deref()
                .map_or_else(|| Ok(CassetteReplayer::unconfigured()), Self::load_cassette)
        };
        Ok(PortReplayers {
            judge: load(&self.judge)?,
            llm: load(&self.llm)?,
            fs: load(&self.fs)?,
            id_gen: load(&self.id_gen)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::cassette::format::{Cassette, Interaction};

    fn write_cassette(path: &Path, port: &str, method: &str, output: serde_json::Value) {
        let call =
            Interaction { seq: 0, port: port.into(), method: method.into(), input: json!({}), output };
        Cassette::new("test", "abc", vec![call]).write(path).unwrap();
    }

    #[test]
    fn load_per_port_cassettes() {
        let dir = std::env::temp_dir().join("taskforge_config_test_ports");
        std::fs::create_dir_all(&dir).unwrap();

        let judge_path = dir.join("judge.cassette.yaml");
        write_cassette(&judge_path, "judge", "submit", json!({"Ok": "tok"}));
        let fs_path = dir.join("fs.cassette.yaml");
        write_cassette(&fs_path, "fs", "read_to_string", json!({"Ok": "b"}));

        let config = CassetteConfig {
            judge: Some(judge_path),
            fs: Some(fs_path),
            ..CassetteConfig::default()
        };
        let mut replayers = config.load_all().unwrap();

        let submit = replayers.judge.next_interaction("judge", "submit");
        assert_eq!(submit.output, json!({"Ok": "tok"}));
        let read = replayers.fs.next_interaction("fs", "read_to_string");
        assert_eq!(read.output, json!({"Ok": "b"}));
        assert_eq!(replayers.llm.remaining(), 0);
        assert_eq!(replayers.id_gen.remaining(), 0);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn from_dir_picks_up_present_files() {
        let dir = std::env::temp_dir().join("taskforge_config_test_dir");
        std::fs::create_dir_all(&dir).unwrap();
        write_cassette(&dir.join("llm.cassette.yaml"), "llm", "complete", json!({"Ok": {}}));

        let config = CassetteConfig::from_dir(&dir);
        assert_eq!(config.llm, Some(dir.join("llm.cassette.yaml")));
        assert!(config.judge.is_none());
        assert!(config.fs.is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn unreadable_cassette_is_an_error() {
        let config = CassetteConfig {
            judge: Some(PathBuf::from("/nonexistent/judge.cassette.yaml")),
            ..CassetteConfig::default()
        };
        let err = config.load_all().err().unwrap();
        assert!(err.contains("Failed to read cassette file"));
    }
}
