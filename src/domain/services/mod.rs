//! Domain Services
//!
//! Pure business logic services that operate on domain entities.
//! These services have no I/O dependencies and are easily testable.

pub mod font_family;
pub mod migrations;
mod reconciler;
pub mod source_patcher;

pub use font_family::{
    font_reference, normalize_name, round_weight, FontDescriptor, FontEntry, FontFamily, FontStyle,
};
pub use migrations::{migrate, Migration, LATEST_SCHEMA_VERSION, MIGRATIONS};
pub use reconciler::{ClassChangeSet, ReconcilePlan, Reconciler};
pub use source_patcher::{PatchError, PatchOutcome, SourceLanguage};
