//! Test environment builder for isolated asset-link runs.
//!
//! Provides `TestEnv` - a temporary app root with an isolated home (so no
//! user config leaks in), plus helpers to run the CLI against it.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

use super::fixtures::{INFO_PLIST, MAIN_APPLICATION_JAVA, PROJECT_PBXPROJ};

/// Result of running the CLI
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as NDJSON events
    pub fn json_events(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line)
                    .unwrap_or_else(|e| panic!("invalid NDJSON line {:?}: {}", line, e))
            })
            .collect()
    }
}

/// Isolated app root and home directory
pub struct TestEnv {
    pub app_root: TempDir,
    pub home_dir: TempDir,
}

impl TestEnv {
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::new()
    }

    /// Path relative to the app root
    pub fn path(&self, relative: &str) -> PathBuf {
        self.app_root.path().join(relative)
    }

    /// Path relative to the isolated home
    pub fn home_path(&self, relative: &str) -> PathBuf {
        self.home_dir.path().join(relative)
    }

    /// Run the CLI from the app root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    /// Run the CLI from the app root with extra environment variables
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_asset-link"));
        cmd.current_dir(self.app_root.path())
            .args(args)
            .env("HOME", self.home_dir.path())
            .env("USERPROFILE", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.home_dir.path().join(".config"))
            .env_remove("ASSET_LINK_PATH")
            .env_remove("ASSET_LINK_NO_UNLINK")
            .env_remove("ASSET_LINK_IOS_TARGET");
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute asset-link");
        Self::output_to_result(output)
    }

    fn output_to_result(output: Output) -> TestResult {
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Read a file under the app root
    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }

    /// Write a file under the app root
    pub fn write(&self, relative: &str, content: impl AsRef<[u8]>) {
        write_file(&self.path(relative), content.as_ref());
    }

    /// Remove a file under the app root
    pub fn remove(&self, relative: &str) {
        std::fs::remove_file(self.path(relative))
            .unwrap_or_else(|e| panic!("Failed to remove {}: {}", relative, e));
    }

    /// Paths recorded in a platform manifest
    pub fn manifest_paths(&self, platform_dir: &str) -> Vec<String> {
        let text = self.read(&format!("{}/link-assets-manifest.json", platform_dir));
        let doc: serde_json::Value = serde_json::from_str(&text).expect("manifest is JSON");
        doc["entries"]
            .as_array()
            .expect("manifest has entries")
            .iter()
            .map(|entry| entry["path"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}

fn write_file(path: &Path, content: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create directories");
    }
    std::fs::write(path, content).expect("Failed to write file");
}

/// Builder for TestEnv with fluent API
pub struct TestEnvBuilder {
    files: Vec<(String, Vec<u8>)>,
    home_files: Vec<(String, String)>,
    ios: bool,
    android: bool,
}

impl TestEnvBuilder {
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            home_files: Vec::new(),
            ios: false,
            android: false,
        }
    }

    /// Add an `ios/` project with an `App` target
    pub fn with_ios(mut self) -> Self {
        self.ios = true;
        self
    }

    /// Add an `android/` project with a Java `MainApplication`
    pub fn with_android(mut self) -> Self {
        self.android = true;
        self
    }

    /// Add a file under the app root
    pub fn with_file(mut self, relative: &str, content: impl AsRef<[u8]>) -> Self {
        self.files
            .push((relative.to_string(), content.as_ref().to_vec()));
        self
    }

    /// Set `asset-link.toml`
    pub fn with_config(self, toml: &str) -> Self {
        self.with_file("asset-link.toml", toml)
    }

    /// Set the user config (`~/.config/asset-link/config.toml`)
    pub fn with_user_config(mut self, toml: &str) -> Self {
        self.home_files.push((
            ".config/asset-link/config.toml".to_string(),
            toml.to_string(),
        ));
        self
    }

    pub fn build(self) -> TestEnv {
        let app_root = TempDir::new().expect("Failed to create app temp dir");
        let home_dir = TempDir::new().expect("Failed to create home temp dir");

        if self.ios {
            let ios = app_root.path().join("ios");
            write_file(
                &ios.join("App.xcodeproj/project.pbxproj"),
                PROJECT_PBXPROJ.as_bytes(),
            );
            write_file(&ios.join("App/Info.plist"), INFO_PLIST.as_bytes());
        }
        if self.android {
            write_file(
                &app_root
                    .path()
                    .join("android/app/src/main/java/com/example/MainApplication.java"),
                MAIN_APPLICATION_JAVA.as_bytes(),
            );
        }
        for (relative, content) in &self.files {
            write_file(&app_root.path().join(relative), content);
        }
        for (relative, content) in &self.home_files {
            write_file(&home_dir.path().join(relative), content.as_bytes());
        }

        TestEnv { app_root, home_dir }
    }
}

impl Default for TestEnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}
