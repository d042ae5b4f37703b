//! Domain Entities
//!
//! - `AssetEntry` - A declared asset file and its content hash
//! - `Manifest` - The asset set applied to a platform by the previous run

mod asset_entry;
mod manifest;

pub use asset_entry::{absolutize, from_posix, relative_to, to_posix, AssetEntry};
pub use manifest::{Manifest, MANIFEST_FILE_NAME};
