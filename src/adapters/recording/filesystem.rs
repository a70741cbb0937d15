//! Recorded problem-file and export I/O.

use std::error::Error;
use std::path::Path;

use serde::Serialize;

use super::Recording;
use crate::ports::FileSystem;

#[derive(Serialize)]
struct ReadInput {
    path: String,
}

#[derive(Serialize)]
struct WriteInput<'a> {
    path: String,
    contents: &'a str,
}

impl FileSystem for Recording<dyn FileSystem> {
    fn read_to_string(&self, path: &Path) -> Result<String, Box<dyn Error + Send + Sync>> {
        let result = self.inner.read_to_string(path);
        self.record_result("read_to_string", &ReadInput { path: path.display().to_string() }, &result);
        result
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        let result = self.inner.write(path, contents);
        let input = WriteInput { path: path.display().to_string(), contents };
        self.record_result("write", &input, &result);
        result
    }
}
