use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use imagebump_core::adapters::FsManifestStore;
use imagebump_core::parse_notifications;
use imagebump_core::pipeline::run_update;
use imagebump_core::settings::UpdateSettings;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "imagebump",
    version,
    about = "Style-preserving image tag and digest updater for deployment manifests."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply a notification payload to the manifests the structure file names.
    Update(UpdateArgs),
}

#[derive(Debug, Parser)]
struct UpdateArgs {
    /// Repository root (default: current directory).
    #[arg(long, default_value = ".")]
    repo_root: Utf8PathBuf,

    /// Structure file listing entries, files, and update targets.
    #[arg(long, default_value = "structure.yaml")]
    structure: Utf8PathBuf,

    /// JSON array of `{"image": "name:version", "sha": "..."}` records.
    #[arg(long)]
    input: String,

    /// Resolve and report changes without writing any file.
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Update(args) => cmd_update(args),
    }
}

fn cmd_update(args: UpdateArgs) -> anyhow::Result<()> {
    let notifications = parse_notifications(&args.input).context("parse --input payload")?;

    let settings = UpdateSettings {
        repo_root: args.repo_root.clone(),
        structure_file: args.structure,
        dry_run: args.dry_run,
    };
    let store = FsManifestStore::new(args.repo_root);

    let outcome = run_update(&settings, &store, &notifications)?;

    if args.dry_run && !outcome.patch.is_empty() {
        print!("{}", outcome.patch);
    }
    if !outcome.is_clean() {
        warn!(failures = outcome.failures.len(), "some update targets failed");
    }
    info!(
        files_changed = outcome.files_changed.len(),
        targets_applied = outcome.targets_applied,
        dry_run = args.dry_run,
        "update complete"
    );
    Ok(())
}
