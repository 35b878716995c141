use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{Error, Result};

/// File access used by the rewriter. Text is always UTF-8.
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;
    fn read(&self, path: &Path) -> Result<String>;
    fn write(&self, path: &Path, content: &str) -> Result<()>;
}

/// Local filesystem implementation
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFs {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::internal_io(
                format!("File not found: {}", path.display()),
                Some("read file".to_string()),
            ),
            ErrorKind::InvalidData => Error::internal_io(
                format!("File is not valid UTF-8: {}", path.display()),
                Some("decode file".to_string()),
            ),
            _ => Error::internal_io(e.to_string(), Some("read file".to_string())),
        })
    }

    /// Overwrites `path` in place, so symlinks and permissions are kept.
    fn write(&self, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content)
            .map_err(|e| Error::internal_io(e.to_string(), Some("write file".to_string())))
    }
}

/// Convenience function to get local filesystem
pub fn local() -> LocalFs {
    LocalFs::new()
}
