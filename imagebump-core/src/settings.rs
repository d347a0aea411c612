//! Clap-free settings for the update pipeline.

use camino::Utf8PathBuf;

/// Settings for [`run_update`](crate::pipeline::run_update).
///
/// The structure-file location is explicit configuration threaded into the
/// call, never ambient process state.
#[derive(Debug, Clone)]
pub struct UpdateSettings {
    pub repo_root: Utf8PathBuf,
    pub structure_file: Utf8PathBuf,

    /// Resolve and report changes without writing any file.
    pub dry_run: bool,
}

impl Default for UpdateSettings {
    fn default() -> Self {
        Self {
            repo_root: Utf8PathBuf::from("."),
            structure_file: Utf8PathBuf::from("structure.yaml"),
            dry_run: false,
        }
    }
}
