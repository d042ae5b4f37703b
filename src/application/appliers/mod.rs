//! Platform Appliers
//!
//! Turn one asset class's change-set into native project edits. Every edit
//! goes through `StagedWrites`; nothing here touches the disk directly.
//!
//! - `AndroidApplier` - copies into `res/*`/`assets/*`, font-family
//!   descriptors, `MainApplication` registration
//! - `AppleApplier` - Xcode project resources, `Info.plist` fonts

mod android;
mod apple;

use std::path::PathBuf;

use crate::domain::entities::AssetEntry;
use crate::domain::ports::LinkEventSink;
use crate::domain::value_objects::{AssetClass, Platform};
use crate::error::LinkResult;

use super::staged::StagedWrites;

pub use android::AndroidApplier;
pub use apple::AppleApplier;

/// Applies change-sets to one platform project
pub trait PlatformApplier {
    /// Unlink entries that are no longer declared (or whose content changed)
    fn clean(
        &mut self,
        class: AssetClass,
        entries: &[AssetEntry],
        staged: &mut StagedWrites<'_>,
    ) -> LinkResult<()>;

    /// Link newly declared entries
    fn link(
        &mut self,
        class: AssetClass,
        entries: &[AssetEntry],
        staged: &mut StagedWrites<'_>,
    ) -> LinkResult<()>;

    /// Stage edits that depend on every class having run
    fn finish(&mut self, staged: &mut StagedWrites<'_>) -> LinkResult<()>;
}

/// What an applier needs to know about its run
pub struct ApplyContext<'a> {
    pub platform: Platform,
    pub platform_root: PathBuf,
    /// Xcode target (flavor); iOS only
    pub ios_target: Option<String>,
    pub sink: &'a dyn LinkEventSink,
}

/// Applier for a platform
pub fn applier_for<'a>(context: ApplyContext<'a>) -> Box<dyn PlatformApplier + 'a> {
    match context.platform {
        Platform::Android => Box::new(AndroidApplier::new(context)),
        Platform::Ios | Platform::MacOs => Box::new(AppleApplier::new(context)),
    }
}

/// File stem of an entry as a string
fn stem_of(entry: &AssetEntry) -> String {
    entry
        .path()
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Lower-case extension of an entry, empty when absent
fn extension_of(entry: &AssetEntry) -> String {
    entry
        .path()
        .extension()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}
