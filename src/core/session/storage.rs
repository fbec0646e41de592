//! Key-value storage backends for the session store

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::core::error::StorageError;

/// Single write in a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageOp<'a> {
    Set(&'a str, String),
    Remove(&'a str),
}

/// String key-value store that survives a page reload
pub trait Storage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove_item(&self, key: &str) -> Result<(), StorageError>;

    /// Read several keys as one snapshot
    fn read_all(&self, keys: &[&str]) -> Result<Vec<Option<String>>, StorageError> {
        keys.iter().map(|key| self.get_item(key)).collect()
    }

    /// Apply several writes as one unit.
    ///
    /// When a write fails every key of the batch is removed, so a reader
    /// finds either the whole batch or none of it. Backends shared between
    /// threads must override this so that no reader observes a partially
    /// applied batch.
    fn apply(&self, ops: &[StorageOp<'_>]) -> Result<(), StorageError> {
        let result = ops.iter().try_for_each(|op| match op {
            StorageOp::Set(key, value) => self.set_item(key, value),
            StorageOp::Remove(key) => self.remove_item(key),
        });
        if result.is_err() {
            for op in ops {
                let (StorageOp::Set(key, _) | StorageOp::Remove(key)) = op;
                if let Err(e) = self.remove_item(key) {
                    tracing::error!("Failed to roll back storage key {}: {}", key, e);
                }
            }
        }
        result
    }
}

/// In-process storage used for server rendering and tests
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.lock().remove(key);
        Ok(())
    }

    fn read_all(&self, keys: &[&str]) -> Result<Vec<Option<String>>, StorageError> {
        let items = self.lock();
        Ok(keys.iter().map(|key| items.get(*key).cloned()).collect())
    }

    fn apply(&self, ops: &[StorageOp<'_>]) -> Result<(), StorageError> {
        let mut items = self.lock();
        for op in ops {
            match op {
                StorageOp::Set(key, value) => {
                    items.insert(key.to_string(), value.clone());
                }
                StorageOp::Remove(key) => {
                    items.remove(*key);
                }
            }
        }
        Ok(())
    }
}

/// Browser `window.localStorage`.
///
/// The handle is looked up on every call so the type stays `Send + Sync`.
/// Calls run on the single browser thread and never yield, so the default
/// batch implementations are already atomic for readers.
#[cfg(feature = "hydrate")]
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

#[cfg(feature = "hydrate")]
impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("No window available".to_string()))?;
        window
            .local_storage()
            .map_err(|_| StorageError::Unavailable("Failed to get localStorage".to_string()))?
            .ok_or_else(|| StorageError::Unavailable("localStorage not available".to_string()))
    }
}

#[cfg(feature = "hydrate")]
impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write {
                key: key.to_string(),
                message: format!("{:?}", e),
            })
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Write {
                key: key.to_string(),
                message: format!("{:?}", e),
            })
    }
}
