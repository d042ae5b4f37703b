//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod asset_class;
mod hash;
mod ignore_patterns;
mod platform;

pub use asset_class::{
    AssetClass, LinkPolicy, ANDROID_FONT_DIR, ANDROID_LEGACY_FONT_DIR, FONT_EXTENSIONS,
};
pub use hash::ContentHash;
pub use ignore_patterns::{IgnoreError, IgnorePatterns, BUILTIN_IGNORES};
pub use platform::Platform;
