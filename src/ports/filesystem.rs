//! Disk access for problem documents, solutions and export bundles.

use std::error::Error;
use std::path::Path;

/// Whole-file text I/O. Paths are taken as given; callers resolve them.
pub trait FileSystem: Send + Sync {
    /// The file's contents.
    ///
    /// # Errors
    ///
    /// Missing, unreadable or non-UTF-8 files.
    fn read_to_string(&self, path: &Path) -> Result<String, Box<dyn Error + Send + Sync>>;

    /// Replaces the file's contents, creating missing parent directories.
    ///
    /// # Errors
    ///
    /// Any failure to create the directories or write the file.
    fn write(&self, path: &Path, contents: &str) -> Result<(), Box<dyn Error + Send + Sync>>;
}
