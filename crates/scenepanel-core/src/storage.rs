//! Raw configuration bytes from the controller's filesystem

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Well-known location of the controller configuration
pub const DEFAULT_CONFIG_PATH: &str = "/spiffs/config.json";

/// Whole-file read access to configuration storage
pub trait Storage {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Storage backed by the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStorage;

impl Storage for FileStorage {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// In-memory storage, keyed by path
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    files: HashMap<PathBuf, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file
    pub fn insert(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }
}

impl Storage for MemoryStorage {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
        })
    }
}
