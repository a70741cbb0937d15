//! Replayed problem-file reads and writes. Nothing touches the disk.

use std::error::Error;
use std::path::Path;

use super::Replaying;
use crate::ports::FileSystem;

impl FileSystem for Replaying<dyn FileSystem> {
    fn read_to_string(&self, _path: &Path) -> Result<String, Box<dyn Error + Send + Sync>> {
        self.next_result("read_to_string")
    }

    fn write(&self, _path: &Path, _contents: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.next_result("write")
    }
}
