//! Port traits abstracting all I/O away from the pipeline.

use camino::Utf8Path;

/// File access for manifest and structure files.
pub trait ManifestStore {
    fn read_to_string(&self, path: &Utf8Path) -> anyhow::Result<String>;
    fn write(&self, path: &Utf8Path, contents: &str) -> anyhow::Result<()>;
}
