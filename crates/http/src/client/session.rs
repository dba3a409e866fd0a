//! Persisted session credentials
//!
//! The client never talks to browser storage directly. It reads and clears
//! the session through a [`CredentialStore`], which the application wires to
//! `localStorage` in the browser and to memory everywhere else.

use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;

/// Storage key holding the bearer token
pub const TOKEN_KEY: &str = "token";
/// Storage key holding the signed-in user id
pub const USER_KEY: &str = "user";
/// Storage key holding the signed-in user name
pub const NAME_KEY: &str = "name";

/// Every key that belongs to a session
pub const SESSION_KEYS: [&str; 3] = [TOKEN_KEY, USER_KEY, NAME_KEY];

/// Storage failures
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store cannot be reached (no window, storage disabled)
    #[error("storage unavailable")]
    Unavailable,

    /// A write or delete was rejected
    #[error("write to '{key}' failed: {reason}")]
    Write { key: String, reason: String },
}

/// Key-value store holding the session credential and metadata
pub trait CredentialStore: Send + Sync {
    /// Read a value, `None` when absent or unreadable
    fn get(&self, key: &str) -> Option<String>;

    /// Store a value
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value; deleting a missing key is not an error
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Session values written together at login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub token: String,
    pub user: String,
    pub name: String,
}

/// Read the bearer token, treating an empty value as absent
pub fn read_token(store: &dyn CredentialStore) -> Option<String> {
    store.get(TOKEN_KEY).filter(|token| !token.is_empty())
}

/// Write all session keys, or none of them
///
/// If any write fails the keys written so far are removed again and the
/// original failure is returned.
pub fn establish_session(
    store: &dyn CredentialStore,
    session: &SessionData,
) -> Result<(), StorageError> {
    let entries = [
        (TOKEN_KEY, session.token.as_str()),
        (USER_KEY, session.user.as_str()),
        (NAME_KEY, session.name.as_str()),
    ];

    for (key, value) in entries {
        if let Err(err) = store.set(key, value) {
            tracing::warn!(key, error = %err, "Failed to persist session, rolling back");
            clear_session(store);
            return Err(err);
        }
    }

    Ok(())
}

/// Remove every session key
///
/// All removals are attempted even when one of them fails. Returns the
/// number of keys that could not be removed.
pub fn clear_session(store: &dyn CredentialStore) -> usize {
    let mut failures = 0;
    for key in SESSION_KEYS {
        if let Err(err) = store.remove(key) {
            tracing::warn!(key, error = %err, "Failed to remove session key");
            failures += 1;
        }
    }
    failures
}

/// In-process credential store
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCredentialStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding a bearer token
    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.lock() {
            entries.insert(TOKEN_KEY.to_string(), token.into());
        }
        store
    }

    /// Whether the store holds `key`
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .lock()
            .map(|entries| entries.contains_key(key))
            .unwrap_or(false)
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Unavailable)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Unavailable)?;
        entries.remove(key);
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::mock::MockCredentialStore;
    use super::*;
    use mockall::predicate::eq;

    fn session() -> SessionData {
        SessionData {
            token: "abc123".into(),
            user: "7".into(),
            name: "maria".into(),
        }
    }

    #[test]
    fn empty_token_reads_as_absent() {
        let store = MemoryCredentialStore::with_token("");
        assert_eq!(read_token(&store), None);

        let store = MemoryCredentialStore::with_token("abc123");
        assert_eq!(read_token(&store).as_deref(), Some("abc123"));
    }

    #[test]
    fn establish_then_clear() {
        let store = MemoryCredentialStore::new();
        establish_session(&store, &session()).unwrap();
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("abc123"));
        assert_eq!(store.get(USER_KEY).as_deref(), Some("7"));
        assert_eq!(store.get(NAME_KEY).as_deref(), Some("maria"));

        assert_eq!(clear_session(&store), 0);
        for key in SESSION_KEYS {
            assert!(!store.contains(key));
        }
    }

    #[test]
    fn failed_write_rolls_back() {
        let mut store = MockCredentialStore::new();
        store
            .expect_set()
            .with(eq(TOKEN_KEY), eq("abc123"))
            .times(1)
            .returning(|_, _| Ok(()));
        store
            .expect_set()
            .with(eq(USER_KEY), eq("7"))
            .times(1)
            .returning(|key, _| {
                Err(StorageError::Write {
                    key: key.to_string(),
                    reason: "quota exceeded".into(),
                })
            });
        store.expect_remove().times(3).returning(|_| Ok(()));

        let err = establish_session(&store, &session()).unwrap_err();
        assert!(matches!(err, StorageError::Write { .. }));
    }

    #[test]
    fn clear_attempts_every_key() {
        let mut store = MockCredentialStore::new();
        store
            .expect_remove()
            .with(eq(TOKEN_KEY))
            .times(1)
            .returning(|_| Err(StorageError::Unavailable));
        store
            .expect_remove()
            .with(eq(USER_KEY))
            .times(1)
            .returning(|_| Ok(()));
        store
            .expect_remove()
            .with(eq(NAME_KEY))
            .times(1)
            .returning(|_| Ok(()));

        assert_eq!(clear_session(&store), 1);
    }
}
