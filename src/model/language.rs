//! Target languages for generated code and judge submissions.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A target language. Adding a variant forces every generator match to be updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// C++ (GCC on the judge).
    #[value(name = "cpp", alias = "c++", alias = "c_cpp")]
    Cpp,
    /// JavaScript (Node.js on the judge).
    #[value(name = "javascript", alias = "js", alias = "node")]
    JavaScript,
    /// Rust.
    #[value(name = "rust", alias = "rs")]
    Rust,
    /// Java (class `Main`).
    #[value(name = "java")]
    Java,
}

impl Language {
    /// Every supported language, in display order.
    pub const ALL: [Language; 4] = [Language::Cpp, Language::JavaScript, Language::Rust, Language::Java];

    /// Judge0 runtime identifier.
    #[must_use]
    pub fn judge_language_id(self) -> u32 {
        match self {
            Language::Cpp => 54,
            Language::JavaScript => 63,
            Language::Rust => 73,
            Language::Java => 62,
        }
    }

    /// Lowercase machine name.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Language::Cpp => "cpp",
            Language::JavaScript => "javascript",
            Language::Rust => "rust",
            Language::Java => "java",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Language::Cpp => "C++",
            Language::JavaScript => "JavaScript",
            Language::Rust => "Rust",
            Language::Java => "Java",
        }
    }

    /// File name used when exporting boilerplate.
    #[must_use]
    pub fn source_file_name(self) -> &'static str {
        match self {
            Language::Cpp => "function.cpp",
            Language::JavaScript => "function.js",
            Language::Rust => "function.rs",
            Language::Java => "function.java",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cpp" | "c++" | "c_cpp" => Ok(Language::Cpp),
            "javascript" | "js" | "node" => Ok(Language::JavaScript),
            "rust" | "rs" => Ok(Language::Rust),
            "java" => Ok(Language::Java),
            other => Err(format!("unsupported language: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn judge_ids_match_judge0_runtimes() {
        let ids: Vec<u32> = Language::ALL.iter().map(|l| l.judge_language_id()).collect();
        assert_eq!(ids, vec![54, 63, 73, 62]);
    }

    #[test]
    fn parses_editor_aliases() {
        assert_eq!("c_cpp".parse::<Language>().unwrap(), Language::Cpp);
        assert_eq!("C++".parse::<Language>().unwrap(), Language::Cpp);
        assert_eq!("js".parse::<Language>().unwrap(), Language::JavaScript);
        assert!("python".parse::<Language>().is_err());
    }

    #[test]
    fn display_uses_human_names() {
        assert_eq!(Language::Cpp.to_string(), "C++");
        assert_eq!(Language::JavaScript.to_string(), "JavaScript");
    }
}
