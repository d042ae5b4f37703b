//! Common test utilities for asset-link CLI and scenario tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated app directory and home, plus CLI helpers
//! - Fixtures: Native project templates and a synthesized font builder

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
