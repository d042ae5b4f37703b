//! Asset class value object
//!
//! An asset class groups files by extension and maps them to one link policy
//! per platform. Files whose extension matches no class fall into `Custom`.

use std::path::Path;

use super::Platform;

/// Where and how a class of assets is linked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetClass {
    /// A specific extension (`ttf`, `png`, ...)
    Extension(&'static str),
    /// Catch-all for extensions without a dedicated class
    Custom,
}

/// Link policy for one asset class on one platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkPolicy {
    /// Copy into a directory relative to the platform root
    CopyInto(&'static str),
    /// Copy into `res/font` and register in a font-family descriptor
    AndroidFont,
    /// Reference from the Xcode project; register as a font when `add_font`
    XcodeResource { add_font: bool },
}

pub const FONT_EXTENSIONS: [&str; 2] = ["otf", "ttf"];
const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "gif"];
const SOUND_EXTENSIONS: [&str; 1] = ["mp3"];

pub const ANDROID_FONT_DIR: &str = "app/src/main/res/font";
pub const ANDROID_LEGACY_FONT_DIR: &str = "app/src/main/assets/fonts";
const ANDROID_DRAWABLE_DIR: &str = "app/src/main/res/drawable";
const ANDROID_RAW_DIR: &str = "app/src/main/res/raw";
const ANDROID_CUSTOM_DIR: &str = "app/src/main/assets/custom";

impl AssetClass {
    /// Classes handled on a platform, in processing order, ending with `Custom`
    pub fn for_platform(platform: Platform) -> Vec<AssetClass> {
        let extensions: Vec<&'static str> = match platform {
            Platform::Android => FONT_EXTENSIONS
                .iter()
                .chain(IMAGE_EXTENSIONS.iter())
                .chain(SOUND_EXTENSIONS.iter())
                .copied()
                .collect(),
            Platform::Ios | Platform::MacOs => FONT_EXTENSIONS
                .iter()
                .chain(SOUND_EXTENSIONS.iter())
                .copied()
                .collect(),
        };
        extensions
            .into_iter()
            .map(AssetClass::Extension)
            .chain(std::iter::once(AssetClass::Custom))
            .collect()
    }

    /// Display name used in progress messages
    pub fn name(&self) -> &'static str {
        match self {
            AssetClass::Extension(ext) => ext,
            AssetClass::Custom => "custom",
        }
    }

    /// Whether a path belongs to this class among the given set of classes
    pub fn matches(&self, path: &Path, classes: &[AssetClass]) -> bool {
        let ext = extension_of(path);
        match self {
            AssetClass::Extension(own) => ext.as_deref() == Some(*own),
            AssetClass::Custom => !classes.iter().any(|c| match c {
                AssetClass::Extension(own) => ext.as_deref() == Some(*own),
                AssetClass::Custom => false,
            }),
        }
    }

    pub fn is_font(&self) -> bool {
        matches!(self, AssetClass::Extension(ext) if FONT_EXTENSIONS.contains(ext))
    }

    /// Link policy of this class on a platform
    pub fn policy(&self, platform: Platform) -> LinkPolicy {
        match platform {
            Platform::Ios | Platform::MacOs => LinkPolicy::XcodeResource {
                add_font: self.is_font(),
            },
            Platform::Android => match self {
                _ if self.is_font() => LinkPolicy::AndroidFont,
                AssetClass::Extension(ext) if IMAGE_EXTENSIONS.contains(ext) => {
                    LinkPolicy::CopyInto(ANDROID_DRAWABLE_DIR)
                }
                AssetClass::Extension(ext) if SOUND_EXTENSIONS.contains(ext) => {
                    LinkPolicy::CopyInto(ANDROID_RAW_DIR)
                }
                _ => LinkPolicy::CopyInto(ANDROID_CUSTOM_DIR),
            },
        }
    }
}

/// Extension without the leading dot; the comparison is case-sensitive like the
/// file systems the native toolchains run on
fn extension_of(path: &Path) -> Option<String> {
    path.extension().map(|e| e.to_string_lossy().into_owned())
}
