//! `localStorage`-backed credential store

use farmacinha_http::{CredentialStore, StorageError};
use web_sys::Storage;

/// Session store kept in the browser's `localStorage`
///
/// Values are stored as plain strings under the same keys the rest of the
/// application reads (`token`, `user`, `name`).
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserLocalStorage;

impl BrowserLocalStorage {
    pub fn new() -> Self {
        Self
    }
}

/// Get localStorage
fn get_local_storage() -> Option<Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl CredentialStore for BrowserLocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        get_local_storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = get_local_storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|err| StorageError::Write {
                key: key.to_string(),
                reason: format!("{err:?}"),
            })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let storage = get_local_storage().ok_or(StorageError::Unavailable)?;
        storage
            .remove_item(key)
            .map_err(|err| StorageError::Write {
                key: key.to_string(),
                reason: format!("{err:?}"),
            })
    }
}
