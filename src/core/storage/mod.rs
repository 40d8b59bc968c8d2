//! Durable key/value storage backends.
//!
//! The filter state is persisted the way a browser persists local storage:
//! string keys mapping to opaque string values, read and written wholesale.
//!
//! - [`FileStore`] - one JSON object file, written atomically
//! - [`MemoryStore`] - in-memory map for tests and ephemeral use
//!
//! All backends are synchronous and `Send + Sync`. Multi-threaded callers
//! still need to serialize read-modify-write sequences themselves.

mod error;
mod file;
mod memory;

pub use error::{StorageError, StorageResult};
pub use file::FileStore;
pub use memory::MemoryStore;

/// Trait for key/value storage backends.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` when absent.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// Backend name for logging.
    fn name(&self) -> &str;
}
