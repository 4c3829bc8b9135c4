//! Storage backends the config document is persisted to.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Minimal file-system surface the loader needs.
pub trait Storage: Send + Sync {
    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()>;
    fn read_file(&self, path: &Path) -> io::Result<String>;
}

/// In-memory key/value file system, the equivalent of browser local storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    files: RwLock<HashMap<PathBuf, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.files.read().contains_key(&normalize(path))
    }
}

impl Storage for MemoryStorage {
    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()> {
        self.files
            .write()
            .insert(normalize(path), contents.to_string());
        Ok(())
    }

    fn read_file(&self, path: &Path) -> io::Result<String> {
        self.files
            .read()
            .get(&normalize(path))
            .cloned()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("{} not found in memory storage", path.display()),
                )
            })
    }
}

/// Storage rooted at a directory on disk.
#[derive(Debug, Clone)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(normalize(path))
    }
}

impl Storage for FsStorage {
    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()> {
        let full = self.resolve(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(full, contents)
    }

    fn read_file(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(self.resolve(path))
    }
}

/// Drop `.` components and leading roots so `./a.yml` and `a.yml` name the same file.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect()
}
