//! Default port implementations.

use crate::ports::ManifestStore;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use std::cell::RefCell;
use std::collections::BTreeMap;
use tracing::debug;

/// Filesystem-backed store; relative paths resolve against the repo root.
#[derive(Debug, Clone)]
pub struct FsManifestStore {
    repo_root: Utf8PathBuf,
}

impl FsManifestStore {
    pub fn new(repo_root: Utf8PathBuf) -> Self {
        Self { repo_root }
    }

    fn abs(&self, path: &Utf8Path) -> Utf8PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.repo_root.join(path)
        }
    }
}

impl ManifestStore for FsManifestStore {
    fn read_to_string(&self, path: &Utf8Path) -> anyhow::Result<String> {
        let abs = self.abs(path);
        fs::read_to_string(&abs).with_context(|| format!("read {}", abs))
    }

    fn write(&self, path: &Utf8Path, contents: &str) -> anyhow::Result<()> {
        let abs = self.abs(path);
        debug!(path = %abs, bytes = contents.len(), "write manifest");
        fs::write(&abs, contents).with_context(|| format!("write {}", abs))
    }
}

/// In-memory store for embedding and testing.
#[derive(Debug, Default)]
pub struct InMemoryManifestStore {
    files: RefCell<BTreeMap<Utf8PathBuf, String>>,
}

impl InMemoryManifestStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl Into<Utf8PathBuf>, contents: impl Into<String>) {
        self.files.borrow_mut().insert(path.into(), contents.into());
    }

    pub fn get(&self, path: &Utf8Path) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }
}

impl ManifestStore for InMemoryManifestStore {
    fn read_to_string(&self, path: &Utf8Path) -> anyhow::Result<String> {
        self.files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no such file: {}", path))
    }

    fn write(&self, path: &Utf8Path, contents: &str) -> anyhow::Result<()> {
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}
