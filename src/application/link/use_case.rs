//! Link Use Case
//!
//! Orchestrates one link run. For every enabled platform whose directory
//! exists:
//! 1. Load and hash the declared assets
//! 2. Read the previous manifest
//! 3. Reconcile per asset class
//! 4. Apply the change-sets through the platform applier
//! 5. Flush staged writes, then persist the new manifest
//!
//! Platforms run in parallel on scoped threads and share nothing mutable.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use crate::application::appliers::{applier_for, ApplyContext};
use crate::application::staged::StagedWrites;
use crate::config::PROJECT_CONFIG_FILE;
use crate::domain::entities::{AssetEntry, MANIFEST_FILE_NAME};
use crate::domain::ports::{
    ContentLoader, FileSystem, LinkEvent, LinkEventSink, ManifestRepository, NoopEventSink,
    WarningKind,
};
use crate::domain::services::{ReconcilePlan, Reconciler};
use crate::domain::value_objects::{IgnorePatterns, Platform};
use crate::error::{LinkError, LinkResult};
use crate::infrastructure::fs::FileLock;

use super::options::LinkOptions;
use super::result::{LinkReport, PlatformReport};

/// Link use case - brings declared assets into native projects
pub struct LinkUseCase<CL, MR, FS>
where
    CL: ContentLoader,
    MR: ManifestRepository,
    FS: FileSystem,
{
    loader: CL,
    manifests: MR,
    file_system: FS,
}

impl<CL, MR, FS> LinkUseCase<CL, MR, FS>
where
    CL: ContentLoader,
    MR: ManifestRepository,
    FS: FileSystem,
{
    pub fn new(loader: CL, manifests: MR, file_system: FS) -> Self {
        Self {
            loader,
            manifests,
            file_system,
        }
    }

    /// Execute the link use case silently
    pub fn execute(&self, options: &LinkOptions) -> LinkResult<LinkReport> {
        self.execute_with_events(options, Arc::new(NoopEventSink))
    }

    /// Execute the link use case with event reporting.
    ///
    /// A fatal error on one platform does not stop the others; the first one
    /// (in platform order) is returned after every platform has finished.
    pub fn execute_with_events(
        &self,
        options: &LinkOptions,
        event_sink: Arc<dyn LinkEventSink>,
    ) -> LinkResult<LinkReport> {
        let root = options
            .root
            .canonicalize()
            .ok()
            .filter(|path| path.is_dir())
            .ok_or_else(|| LinkError::InvalidRoot {
                path: options.root.clone(),
            })?;
        let ignore =
            IgnorePatterns::with_patterns(&options.ignore).map_err(|e| LinkError::InvalidConfig {
                file: PathBuf::from(PROJECT_CONFIG_FILE),
                message: e.to_string(),
            })?;
        let sink: &dyn LinkEventSink = event_sink.as_ref();

        let results: Vec<LinkResult<PlatformReport>> = thread::scope(|scope| {
            let root = &root;
            let ignore = &ignore;
            let handles: Vec<_> = options
                .platforms
                .iter()
                .map(|(platform, assets)| {
                    scope.spawn(move || {
                        self.run_platform(root, *platform, assets, options, ignore, sink)
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
                })
                .collect()
        });

        let mut report = LinkReport::new();
        let mut first_error = None;
        for ((platform, _), result) in options.platforms.iter().zip(results) {
            match result {
                Ok(platform_report) => report.platforms.push(platform_report),
                Err(err) => {
                    sink.error(*platform, err.to_string());
                    first_error.get_or_insert(err);
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(report),
        }
    }

    fn run_platform(
        &self,
        root: &Path,
        platform: Platform,
        assets: &[PathBuf],
        options: &LinkOptions,
        ignore: &IgnorePatterns,
        sink: &dyn LinkEventSink,
    ) -> LinkResult<PlatformReport> {
        let platform_root = root.join(platform.directory_name());
        if !platform_root.is_dir() {
            sink.on_event(LinkEvent::PlatformSkipped {
                platform,
                reason: format!("{} does not exist", platform_root.display()),
            });
            return Ok(PlatformReport::skipped(platform));
        }

        let _lock = if options.dry_run {
            None
        } else {
            Some(FileLock::acquire(&platform_root)?)
        };

        let loaded = self.loader.load(root, assets)?;
        for conflict in &loaded.conflicts {
            let paths: Vec<String> = conflict
                .paths
                .iter()
                .map(|p| p.display().to_string())
                .collect();
            sink.warn(
                Some(platform),
                WarningKind::BasenameConflict,
                format!(
                    "{} is declared with different content at {}; the last one wins",
                    conflict.basename,
                    paths.join(", ")
                ),
            );
        }
        sink.on_event(LinkEvent::PlatformStarted {
            platform,
            asset_count: loaded.entries.len(),
        });

        let previous = self.previous_entries(&platform_root, platform, sink);
        let plan = Reconciler::plan(root, platform, &previous, &loaded.entries, ignore);

        let mut report = PlatformReport::new(platform);
        let mut staged = StagedWrites::new(&self.file_system);
        self.apply(&plan, &platform_root, platform, options, sink, &mut staged, &mut report)?;
        report.native_files = staged.flush(platform, sink, options.dry_run)?;

        report.manifest_entries = plan.manifest_entries.len();
        if !options.dry_run {
            self.manifests
                .write(&platform_root, &plan.manifest_entries)
                .map_err(|source| LinkError::Manifest {
                    platform: platform.to_string(),
                    source,
                })?;
            sink.on_event(LinkEvent::ManifestWritten {
                platform,
                path: platform_root.join(MANIFEST_FILE_NAME),
                entry_count: plan.manifest_entries.len(),
            });
        }

        sink.on_event(LinkEvent::PlatformCompleted {
            platform,
            added: report.added,
            removed: report.removed,
        });
        Ok(report)
    }

    /// Entries of the previous run; an unreadable manifest counts as empty
    fn previous_entries(
        &self,
        platform_root: &Path,
        platform: Platform,
        sink: &dyn LinkEventSink,
    ) -> Vec<AssetEntry> {
        match self.manifests.read(platform_root, platform) {
            Ok(manifest) => manifest.into_entries(),
            Err(err) => {
                sink.warn(
                    Some(platform),
                    WarningKind::ManifestUnreadable,
                    format!(
                        "{}: {}; relinking everything",
                        platform_root.join(MANIFEST_FILE_NAME).display(),
                        err
                    ),
                );
                Vec::new()
            }
        }
    }

    /// Run each non-empty class change-set through the platform applier
    #[allow(clippy::too_many_arguments)]
    fn apply(
        &self,
        plan: &ReconcilePlan,
        platform_root: &Path,
        platform: Platform,
        options: &LinkOptions,
        sink: &dyn LinkEventSink,
        staged: &mut StagedWrites<'_>,
        report: &mut PlatformReport,
    ) -> LinkResult<()> {
        let mut applier = applier_for(ApplyContext {
            platform,
            platform_root: platform_root.to_path_buf(),
            ios_target: options.ios_target.clone(),
            sink,
        });

        for change in &plan.changes {
            let class = change.class;
            if options.should_unlink && !change.to_remove.is_empty() {
                sink.on_event(LinkEvent::Cleaning {
                    platform,
                    class: class.name(),
                    count: change.to_remove.len(),
                });
                applier.clean(class, &change.to_remove, staged)?;
                report.removed += change.to_remove.len();
            }
            if !change.to_add.is_empty() {
                sink.on_event(LinkEvent::Linking {
                    platform,
                    class: class.name(),
                    count: change.to_add.len(),
                });
                applier.link(class, &change.to_add, staged)?;
                report.added += change.to_add.len();
            }
        }

        applier.finish(staged)
    }
}
