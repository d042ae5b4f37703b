//! Platform value object - which native project an asset set is linked into

use serde::{Deserialize, Serialize};

/// Native platform project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Xcode project under `ios/`
    Ios,
    /// Gradle project under `android/`
    Android,
    /// Xcode project under `macos/` (react-native-macos)
    #[serde(alias = "macOS")]
    MacOs,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Ios, Platform::Android, Platform::MacOs];

    /// Directory name of the platform project relative to the app root
    pub fn directory_name(&self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
            Platform::MacOs => "macos",
        }
    }

    /// Get a human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Ios => "iOS",
            Platform::Android => "Android",
            Platform::MacOs => "macOS",
        }
    }

    /// Whether the platform is driven by an Xcode project
    pub fn is_apple(&self) -> bool {
        matches!(self, Platform::Ios | Platform::MacOs)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
