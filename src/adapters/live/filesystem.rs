//! Disk-backed `FileSystem`.

use std::error::Error;
use std::fs;
use std::path::Path;

use crate::ports::filesystem::FileSystem;

/// Reads and writes through `std::fs`.
#[derive(Debug, Default)]
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, Box<dyn Error + Send + Sync>> {
        Ok(fs::read_to_string(path)?)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)?,
            _ => {}
        }
        fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_layout_directories_are_created() {
        let root = std::env::temp_dir().join(format!("taskforge_live_fs_{}", std::process::id()));
        let _ = fs::remove_dir_all(&root);
        let path = root.join("sum/boilerplate/function.rs");

        LiveFileSystem.write(&path, "fn sum() {}").unwrap();
        assert_eq!(LiveFileSystem.read_to_string(&path).unwrap(), "fn sum() {}");

        LiveFileSystem.write(&path, "fn sum(a: i32) {}").unwrap();
        assert_eq!(LiveFileSystem.read_to_string(&path).unwrap(), "fn sum(a: i32) {}");

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn missing_problem_file_is_an_error() {
        let path = std::env::temp_dir().join("taskforge_live_fs_missing/problem.yaml");
        assert!(LiveFileSystem.read_to_string(&path).is_err());
    }
}
