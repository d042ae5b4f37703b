//! asset-link CLI - links static assets into native mobile projects
//!
//! Usage: asset-link [OPTIONS]
//!
//! Reads `asset-link.toml` (or `rnpm.assets` in `package.json`) from the app
//! root and links the declared assets into `ios/`, `android/` and `macos/`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use asset_link::{
    config, CliOverrides, ConsoleEventSink, FsContentLoader, JsonEventSink,
    JsonManifestRepository, LinkEventSink, LinkOptions, LinkUseCase, LocalFs, WarningKind,
};

/// asset-link - link fonts, images and sounds into native projects
#[derive(Parser, Debug)]
#[command(name = "asset-link")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// App root containing ios/, android/ and macos/
    #[arg(short, long)]
    path: Option<PathBuf>,

    /// Assets linked into every platform
    #[arg(short, long, num_args = 1..)]
    assets: Vec<String>,

    /// Assets linked into iOS only
    #[arg(long, num_args = 1..)]
    ios_assets: Vec<String>,

    /// Assets linked into Android only
    #[arg(long, num_args = 1..)]
    android_assets: Vec<String>,

    /// Assets linked into macOS only
    #[arg(long, num_args = 1..)]
    macos_assets: Vec<String>,

    /// Keep assets that are no longer declared
    #[arg(short, long)]
    no_unlink: bool,

    /// iOS target receiving the resources
    #[arg(short, long)]
    flavor: Option<String>,

    /// Show what would change without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Output NDJSON events for CI
    #[arg(long)]
    json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            path: self.path.clone(),
            assets: self.assets.clone(),
            ios_assets: self.ios_assets.clone(),
            android_assets: self.android_assets.clone(),
            macos_assets: self.macos_assets.clone(),
            no_unlink: self.no_unlink,
            flavor: self.flavor.clone(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cmd_link(&cli)
}

fn cmd_link(cli: &Cli) -> Result<()> {
    let sink: Arc<dyn LinkEventSink> = if cli.json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(ConsoleEventSink::stdio(cli.verbose))
    };

    let (config, warnings) =
        config::load(&cli.overrides()).context("Failed to load configuration")?;
    for warning in &warnings {
        sink.warn(None, WarningKind::UnknownConfigKey, warning.to_string());
    }

    let options = LinkOptions::from_config(&config).with_dry_run(cli.dry_run);
    if options.platforms.is_empty() {
        if !cli.json {
            eprintln!(
                "No assets declared; pass --assets or add an {} file.",
                config::PROJECT_CONFIG_FILE
            );
        }
        return Ok(());
    }

    let use_case = LinkUseCase::new(
        FsContentLoader::new(),
        JsonManifestRepository::new(),
        LocalFs::new(),
    );
    let report = use_case
        .execute_with_events(&options, sink)
        .with_context(|| format!("Failed to link assets in {}", config.root.display()))?;

    if !cli.json && !report.has_changes() {
        println!("Everything is up to date.");
    }
    Ok(())
}
