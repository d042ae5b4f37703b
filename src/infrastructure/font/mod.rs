//! Font file inspection

mod sfnt;

pub use sfnt::{read_metadata, FontError, FontMetadata};

#[cfg(test)]
pub(crate) use sfnt::testing;
