//! Key-value persistence port.
//!
//! Session state (the logged-in user, per-namespace carts and favorites) is
//! persisted through a small string-keyed port so the backing mechanism is
//! swappable without touching store logic. Two implementations ship:
//! [`MemoryStorage`] for tests and ephemeral sessions, and
//! [`file::JsonFileStorage`] which keeps everything in a single JSON file.
//!
//! # Key layout
//!
//! - `user` - the persisted session user
//! - `cart_user_<id>` / `cart_guest` - cart line items per namespace
//! - `favorites_user_<id>` / `favorites_guest` - favorited product ids
//!
//! Writes are last-write-wins; there are no transactions and no cross-process
//! coordination.

mod file;

pub use file::JsonFileStorage;

use std::collections::HashMap;
use std::sync::Mutex;

use techstore_core::UserId;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage file corrupted: {0}")]
    Corrupt(String),
}

/// The persistence port used by all session stores.
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`. Removing an absent key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// The storage partition scoping cart and favorites state.
///
/// Exactly one namespace is active per store at a time; switching namespaces
/// flushes the outgoing one before loading the incoming one so guest and
/// authenticated data never cross-contaminate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Namespace {
    Guest,
    User(UserId),
}

impl Namespace {
    /// Derive the namespace for an optional session user.
    #[must_use]
    pub fn for_session(user_id: Option<&UserId>) -> Self {
        user_id.map_or(Self::Guest, |id| Self::User(id.clone()))
    }

    /// The storage key for this namespace under the given entity prefix
    /// (`"cart"` or `"favorites"`).
    #[must_use]
    pub fn key(&self, prefix: &str) -> String {
        match self {
            Self::Guest => format!("{prefix}_guest"),
            Self::User(id) => format!("{prefix}_user_{id}"),
        }
    }
}

/// Key under which the session user is persisted.
pub const USER_KEY: &str = "user";

/// In-memory storage backend.
///
/// Used by tests and as the default when no storage path is configured.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

pub(crate) fn poisoned<T>(_: std::sync::PoisonError<T>) -> StorageError {
    StorageError::Corrupt("storage lock poisoned".to_string())
}
