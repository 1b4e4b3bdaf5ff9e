//! Named preference files
//!
//! A `Preferences` handle scopes every read and write to one namespace, the
//! way a platform "shared preferences" file scopes keys. Writes replace the
//! previous value outright.

use crate::database::Database;
use crate::error::StorageError;
use crate::Result;

/// Durable string key-value store.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `default` when the key has never been written.
    fn get(&self, key: &str, default: &str) -> Result<String>;

    fn put(&self, key: &str, value: &str) -> Result<()>;
}

pub struct Preferences {
    db: Database,
    namespace: String,
}

impl Preferences {
    pub fn new(db: Database, namespace: impl Into<String>) -> Self {
        Self {
            db,
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn validate_key(key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(())
    }
}

impl KeyValueStore for Preferences {
    fn get(&self, key: &str, default: &str) -> Result<String> {
        Self::validate_key(key)?;
        let value = self.db.get_preference(&self.namespace, key)?;
        Ok(value.unwrap_or_else(|| default.to_string()))
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        Self::validate_key(key)?;
        self.db.put_preference(&self.namespace, key, value)?;

        tracing::debug!(
            namespace = %self.namespace,
            key = %key,
            len = value.len(),
            "Stored preference"
        );

        Ok(())
    }
}

impl Clone for Preferences {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            namespace: self.namespace.clone(),
        }
    }
}
