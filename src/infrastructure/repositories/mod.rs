//! Repository Implementations
//!
//! Concrete implementations of domain repository ports.

mod asset;
mod manifest;

pub use asset::FsContentLoader;
pub use manifest::JsonManifestRepository;
