//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `LinkUseCase` - Orchestrates a link run (load, reconcile, apply, flush, record)
//!
//! ## Support
//!
//! - `appliers` - Per-platform change-set application
//! - `StagedWrites` - Buffered native file writes, flushed once per platform

pub mod appliers;
pub mod link;
mod staged;

pub use link::{LinkOptions, LinkReport, LinkUseCase, PlatformReport};
pub use staged::{FileOperation, StagedWrites};
