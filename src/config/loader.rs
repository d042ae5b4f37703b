//! Configuration loading and resolution

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::{LinkError, LinkResult};

use super::types::{
    CliOverrides, Config, EnvOverrides, PackageJson, PlatformAssets, ProjectConfig, UserConfig,
};

/// Project configuration file name
pub const PROJECT_CONFIG_FILE: &str = "asset-link.toml";

pub const ENV_PATH: &str = "ASSET_LINK_PATH";
pub const ENV_NO_UNLINK: &str = "ASSET_LINK_NO_UNLINK";
pub const ENV_IOS_TARGET: &str = "ASSET_LINK_IOS_TARGET";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

impl EnvOverrides {
    /// Read `ASSET_LINK_*` variables from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v: &String| !v.trim().is_empty());
        Self {
            path: non_empty(ENV_PATH).map(PathBuf::from),
            no_unlink: non_empty(ENV_NO_UNLINK)
                .map(|val| val.to_lowercase() != "false" && val != "0"),
            ios_target: non_empty(ENV_IOS_TARGET),
        }
    }
}

/// Default location of the user configuration file
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("asset-link").join("config.toml"))
}

/// Load a TOML file and collect unknown keys as warnings
fn load_toml<T: DeserializeOwned>(path: &Path) -> LinkResult<(T, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let value: T = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| LinkError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((value, warnings))
}

/// Load `<root>/asset-link.toml`; absent means defaults
pub fn load_project_config(root: &Path) -> LinkResult<(ProjectConfig, Vec<ConfigWarning>)> {
    let path = root.join(PROJECT_CONFIG_FILE);
    if !path.is_file() {
        return Ok((ProjectConfig::default(), Vec::new()));
    }
    load_toml(&path)
}

/// Load the user configuration file; absent means defaults
pub fn load_user_config(path: &Path) -> LinkResult<(UserConfig, Vec<ConfigWarning>)> {
    if !path.is_file() {
        return Ok((UserConfig::default(), Vec::new()));
    }
    load_toml(path)
}

/// `rnpm.assets` from a legacy `package.json`
pub fn read_package_assets(root: &Path) -> LinkResult<Option<Vec<String>>> {
    let path = root.join("package.json");
    if !path.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)?;
    let package: PackageJson =
        serde_json::from_str(&content).map_err(|e| LinkError::InvalidConfig {
            file: path.clone(),
            message: e.to_string(),
        })?;
    Ok(package.rnpm.and_then(|rnpm| rnpm.assets))
}

/// Load configuration from every source.
///
/// Precedence: CLI flags, then `ASSET_LINK_*` variables, then
/// `asset-link.toml`, then the user config (ignore patterns only), then
/// `package.json` `rnpm.assets`.
pub fn load(cli: &CliOverrides) -> LinkResult<(Config, Vec<ConfigWarning>)> {
    resolve(cli, &EnvOverrides::from_env(), user_config_path().as_deref())
}

/// `load` with explicit environment and user config location
pub fn resolve(
    cli: &CliOverrides,
    env: &EnvOverrides,
    user_config: Option<&Path>,
) -> LinkResult<(Config, Vec<ConfigWarning>)> {
    let root = cli
        .path
        .clone()
        .or_else(|| env.path.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    let (project, mut warnings) = load_project_config(&root)?;
    let (user, user_warnings) = match user_config {
        Some(path) => load_user_config(path)?,
        None => (UserConfig::default(), Vec::new()),
    };
    warnings.extend(user_warnings);

    let given = |list: &[String]| (!list.is_empty()).then(|| list.to_vec());

    let shared = match given(&cli.assets).or_else(|| project.assets.clone()) {
        Some(assets) => Some(assets),
        None => read_package_assets(&root)?,
    };
    let ios = given(&cli.ios_assets).or_else(|| project.ios_assets.clone());
    let android = given(&cli.android_assets).or_else(|| project.android_assets.clone());
    let macos = given(&cli.macos_assets).or_else(|| project.macos_assets.clone());

    let no_unlink = cli.no_unlink || env.no_unlink.or(project.no_unlink).unwrap_or(false);

    let mut ignore = user.ignore;
    ignore.extend(project.ignore);

    let config = Config {
        should_unlink: !no_unlink,
        ios: platform_assets(ios, shared.as_deref()),
        android: platform_assets(android, shared.as_deref()),
        macos: platform_assets(macos, shared.as_deref()),
        ignore,
        ios_target: cli
            .flavor
            .clone()
            .or_else(|| env.ios_target.clone())
            .or(project.ios.target),
        root,
    };
    Ok((config, warnings))
}

/// A platform is enabled when shared or specific assets are declared; its
/// list is the specific entries followed by the shared ones
fn platform_assets(specific: Option<Vec<String>>, shared: Option<&[String]>) -> PlatformAssets {
    let enabled = specific.is_some() || shared.is_some();
    let assets = specific
        .unwrap_or_default()
        .into_iter()
        .chain(shared.unwrap_or_default().iter().cloned())
        .map(PathBuf::from)
        .collect();
    PlatformAssets { enabled, assets }
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "assets",
        "ios_assets",
        "android_assets",
        "macos_assets",
        "ignore",
        "no_unlink",
        "ios",
        "target",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}

