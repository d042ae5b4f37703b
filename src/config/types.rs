//! Configuration type definitions

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Platform;

/// Project configuration (`<root>/asset-link.toml`)
///
/// A list that is present but empty still enables its platforms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub assets: Option<Vec<String>>,

    #[serde(default)]
    pub ios_assets: Option<Vec<String>>,

    #[serde(default)]
    pub android_assets: Option<Vec<String>>,

    #[serde(default)]
    pub macos_assets: Option<Vec<String>>,

    /// Gitignore-style patterns for files never linked
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Keep assets that are no longer declared
    #[serde(default)]
    pub no_unlink: Option<bool>,

    #[serde(default)]
    pub ios: AppleConfig,
}

/// `[ios]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppleConfig {
    /// Target (flavor) receiving resources; also names the group
    /// `Clients/<target>/Resources`
    #[serde(default)]
    pub target: Option<String>,
}

/// User configuration (`<config dir>/asset-link/config.toml`); only ignore
/// defaults are read from it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub ignore: Vec<String>,
}

/// Legacy `package.json` with an `rnpm.assets` list
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct PackageJson {
    #[serde(default)]
    pub rnpm: Option<RnpmSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RnpmSection {
    #[serde(default)]
    pub assets: Option<Vec<String>>,
}

/// Values taken from the command line. Empty lists mean "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub path: Option<PathBuf>,
    pub assets: Vec<String>,
    pub ios_assets: Vec<String>,
    pub android_assets: Vec<String>,
    pub macos_assets: Vec<String>,
    pub no_unlink: bool,
    pub flavor: Option<String>,
}

/// Values taken from `ASSET_LINK_*` environment variables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub path: Option<PathBuf>,
    pub no_unlink: Option<bool>,
    pub ios_target: Option<String>,
}

/// Assets declared for one platform
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformAssets {
    pub enabled: bool,
    /// Platform-specific entries first, then the shared ones
    pub assets: Vec<PathBuf>,
}

/// Fully resolved configuration for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub root: PathBuf,
    pub should_unlink: bool,
    pub ios: PlatformAssets,
    pub android: PlatformAssets,
    pub macos: PlatformAssets,
    pub ignore: Vec<String>,
    pub ios_target: Option<String>,
}

impl Config {
    pub fn platform(&self, platform: Platform) -> &PlatformAssets {
        match platform {
            Platform::Ios => &self.ios,
            Platform::Android => &self.android,
            Platform::MacOs => &self.macos,
        }
    }

    /// Enabled platforms in fixed order
    pub fn enabled_platforms(&self) -> Vec<Platform> {
        Platform::ALL
            .into_iter()
            .filter(|p| self.platform(*p).enabled)
            .collect()
    }
}
