//! File System Implementations
//!
//! Concrete implementations of the FileSystem port, plus the advisory lock
//! held around a platform run.

mod local;
mod lock;

pub use local::{atomic_write, LocalFs};
pub use lock::{FileLock, LOCK_FILE_NAME};
