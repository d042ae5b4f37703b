//! Domain Layer
//!
//! The core of asset-link - reconciliation and native-document logic without
//! I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Core domain entities (AssetEntry, Manifest)
//! - `value_objects/` - Immutable value types (Platform, AssetClass, ContentHash)
//! - `services/` - Domain services (Reconciler, migrations, font families, source patcher)
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system directly
//! 2. **Pure Functions** - Services are stateless and testable
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
