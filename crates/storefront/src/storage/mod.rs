//! Key-value persistence boundary.
//!
//! The storefront persists exactly two things, the cart snapshot and the
//! search history, each as a string value under a fixed key. Anything that
//! can `get`/`set`/`remove` a string by key can back it:
//!
//! - [`MemoryStore`] - process-local map (tests, throwaway sessions)
//! - [`JsonFileStore`] - one JSON object on disk, rewritten on every `set`
//!
//! Stores are shared between services as `Arc<dyn KeyValueStore>`, so
//! implementations take `&self` and must be `Send + Sync`.

mod file;
mod memory;

use std::path::PathBuf;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Storage key for the cart snapshot.
pub const CART_KEY: &str = "cart";

/// Storage key for the search history.
pub const SEARCH_HISTORY_KEY: &str = "searchHistory";

/// A flat string key-value store.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value under `key`. Returns `true` if one existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<bool, StorageError>;
}

/// Storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Lock poisoned")]
    LockPoisoned,
}
