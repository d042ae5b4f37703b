//! Link Module
//!
//! Orchestrates the asset link flow.
//!
//! ## Structure
//!
//! - `options` - Configuration types (`LinkOptions`)
//! - `result` - Result types (`LinkReport`, `PlatformReport`)
//! - `use_case` - Core use case logic (`LinkUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use asset_link::application::link::{LinkOptions, LinkUseCase};
//!
//! let use_case = LinkUseCase::new(loader, manifests, fs);
//! let report = use_case.execute(&LinkOptions::from_config(&config))?;
//! ```

mod options;
mod result;
mod use_case;

pub use options::LinkOptions;
pub use result::{LinkReport, PlatformReport};
pub use use_case::LinkUseCase;
