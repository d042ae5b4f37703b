//! Link Options
//!
//! Configuration types for link operations.

use std::path::PathBuf;

use crate::config::Config;
use crate::domain::value_objects::Platform;

/// Options for the link use case
#[derive(Debug, Clone)]
pub struct LinkOptions {
    /// App root; platform projects live in `<root>/ios`, `<root>/android`, ...
    pub root: PathBuf,
    /// Enabled platforms with their declared assets, in run order
    pub platforms: Vec<(Platform, Vec<PathBuf>)>,
    /// Unlink assets that are no longer declared
    pub should_unlink: bool,
    /// Extra gitignore-style patterns for files never linked
    pub ignore: Vec<String>,
    /// Xcode target (flavor) receiving resources
    pub ios_target: Option<String>,
    /// Compute and report native file changes without writing anything
    pub dry_run: bool,
}

impl LinkOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            platforms: Vec::new(),
            should_unlink: true,
            ignore: Vec::new(),
            ios_target: None,
            dry_run: false,
        }
    }

    /// Options for every platform the configuration enables
    pub fn from_config(config: &Config) -> Self {
        let platforms = config
            .enabled_platforms()
            .into_iter()
            .map(|platform| (platform, config.platform(platform).assets.clone()))
            .collect();

        Self {
            root: config.root.clone(),
            platforms,
            should_unlink: config.should_unlink,
            ignore: config.ignore.clone(),
            ios_target: config.ios_target.clone(),
            dry_run: false,
        }
    }

    pub fn with_platform(mut self, platform: Platform, assets: Vec<PathBuf>) -> Self {
        self.platforms.retain(|(p, _)| *p != platform);
        self.platforms.push((platform, assets));
        self
    }

    pub fn with_unlink(mut self, should_unlink: bool) -> Self {
        self.should_unlink = should_unlink;
        self
    }

    pub fn with_ignore(mut self, patterns: Vec<String>) -> Self {
        self.ignore = patterns;
        self
    }

    pub fn with_ios_target(mut self, target: impl Into<String>) -> Self {
        self.ios_target = Some(target.into());
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Directory of a platform project
    pub fn platform_root(&self, platform: Platform) -> PathBuf {
        self.root.join(platform.directory_name())
    }
}
