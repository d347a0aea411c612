//! The update pipeline, extracted from the CLI.
//!
//! One call applies a notification payload to every manifest the structure
//! file names. Each manifest is parsed once, takes every applicable update
//! target best-effort, and is serialized once at the end; a failed target is
//! recorded and the remaining targets still run. Nothing here touches the
//! filesystem directly — all I/O goes through the [`ManifestStore`] port.

use crate::ports::ManifestStore;
use crate::settings::UpdateSettings;
use anyhow::Context;
use camino::Utf8PathBuf;
use diffy::PatchFormatter;
use imagebump_edit::apply_update;
use imagebump_types::notify::ImageUpdate;
use imagebump_types::structure::{AppEntry, FileConfig, Structure};
use imagebump_yaml::Document;
use tracing::{debug, error, warn};

/// One update target that could not be applied. The pipeline keeps going;
/// these are collected for reporting.
#[derive(Debug, Clone)]
pub struct TargetFailure {
    pub file: Utf8PathBuf,
    pub structure_path: String,
    pub message: String,
}

/// Outcome of [`run_update`].
#[derive(Debug, Default)]
pub struct UpdateOutcome {
    /// Files whose content changed (or would change, under dry-run).
    pub files_changed: Vec<Utf8PathBuf>,
    /// Update targets applied successfully.
    pub targets_applied: u64,
    /// Targets that failed to resolve or mutate.
    pub failures: Vec<TargetFailure>,
    /// Unified diff of every change; written files under dry-run too.
    pub patch: String,
}

impl UpdateOutcome {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run the update pipeline: load the structure file, then apply every
/// matching notification record to every configured manifest.
///
/// Per-entry and per-target failures are logged and collected in the
/// outcome; only structural problems with the structure file itself (or the
/// store) abort the run.
pub fn run_update(
    settings: &UpdateSettings,
    store: &dyn ManifestStore,
    notifications: &[ImageUpdate],
) -> anyhow::Result<UpdateOutcome> {
    let raw = store
        .read_to_string(&settings.structure_file)
        .with_context(|| format!("load structure file {}", settings.structure_file))?;
    let structure: Structure = serde_yaml::from_str(&raw)
        .with_context(|| format!("parse structure file {}", settings.structure_file))?;

    let mut outcome = UpdateOutcome::default();
    for entry in &structure.app {
        for input in notifications.iter().filter(|n| n.matches(&entry.name)) {
            process_entry(settings, store, entry, input, &mut outcome);
        }
    }
    Ok(outcome)
}

fn process_entry(
    settings: &UpdateSettings,
    store: &dyn ManifestStore,
    entry: &AppEntry,
    input: &ImageUpdate,
    outcome: &mut UpdateOutcome,
) {
    if let Some(legacy) = &entry.legacy_file {
        if entry.files.is_empty() {
            warn!(
                entry = %entry.name,
                path = %legacy,
                "legacy single-file entry carries no update targets; skipping"
            );
            return;
        }
        warn!(
            entry = %entry.name,
            path = %legacy,
            "ignoring legacy file path; `files` is populated"
        );
    }

    for file in &entry.files {
        if let Err(err) = update_file(settings, store, file, &entry.name, input, outcome) {
            error!(file = %file.path, error = %format!("{err:#}"), "failed to update file");
        }
    }
}

/// Apply every update target of `file` for one notification record. The
/// document is parsed once and written once; a target failure skips only
/// that target.
fn update_file(
    settings: &UpdateSettings,
    store: &dyn ManifestStore,
    file: &FileConfig,
    entry_name: &str,
    input: &ImageUpdate,
    outcome: &mut UpdateOutcome,
) -> anyhow::Result<()> {
    let before = store.read_to_string(&file.path)?;
    let mut doc: Document = before
        .parse()
        .with_context(|| format!("parse manifest {}", file.path))?;

    let mut applied = 0u64;
    for target in &file.update_targets {
        let object_key = target.object_key_or(entry_name);
        match apply_update(&mut doc, target, object_key, input.version(), &input.sha) {
            Ok(()) => {
                applied += 1;
                debug!(
                    file = %file.path,
                    path = %target.structure_path,
                    key = object_key,
                    version = input.version(),
                    "update target applied"
                );
            }
            Err(err) => {
                warn!(
                    file = %file.path,
                    path = %target.structure_path,
                    key = object_key,
                    %err,
                    "update target failed"
                );
                outcome.failures.push(TargetFailure {
                    file: file.path.clone(),
                    structure_path: target.structure_path.clone(),
                    message: err.to_string(),
                });
            }
        }
    }
    outcome.targets_applied += applied;

    if applied == 0 {
        return Ok(());
    }
    let after = doc.to_string();
    if after == before {
        return Ok(());
    }

    outcome
        .patch
        .push_str(&render_patch(&file.path, &before, &after));
    outcome.files_changed.push(file.path.clone());

    if !settings.dry_run {
        store.write(&file.path, &after)?;
    }
    Ok(())
}

fn render_patch(path: &Utf8PathBuf, before: &str, after: &str) -> String {
    let formatter = PatchFormatter::new();
    let patch = diffy::create_patch(before, after);

    let mut out = String::new();
    out.push_str(&format!("diff --git a/{0} b/{0}\n", path));
    out.push_str(&formatter.fmt_patch(&patch).to_string());
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}
