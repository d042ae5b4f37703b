//! Configuration module for asset-link
//!
//! Implements the configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (ASSET_LINK_*)
//! 3. Project config (asset-link.toml)
//! 4. User config (~/.config/asset-link/config.toml), ignore patterns only
//! 5. Legacy package.json `rnpm.assets` (lowest priority)

mod loader;
mod types;

pub use loader::{
    load, load_project_config, load_user_config, read_package_assets, resolve, user_config_path,
    ConfigWarning, ENV_IOS_TARGET, ENV_NO_UNLINK, ENV_PATH, PROJECT_CONFIG_FILE,
};
pub use types::{
    AppleConfig, CliOverrides, Config, EnvOverrides, PlatformAssets, ProjectConfig, UserConfig,
};
