//! Key-value persistence
//!
//! Progression and tuning are stored as single JSON blobs under string keys.
//! Backends:
//! - `MemoryStore`: headless runs and tests
//! - `LocalStore`: browser LocalStorage (wasm32)
//! - `FileStore`: one JSON file per key in a directory (native)

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local;
pub mod memory;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Errors raised by storage backends
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,

    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// A string key-value store holding JSON blobs.
///
/// Writes are full overwrites; there is no partial update.
pub trait KeyValueStore {
    /// Read a value, `Ok(None)` when the key has never been written
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value stored under `key` (missing keys are not an error)
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
