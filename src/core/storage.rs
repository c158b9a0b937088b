//! Persistence port for the record store.
//!
//! The store never talks to a database directly. It is handed a [`Storage`]
//! implementation at construction and writes whole blobs through it after
//! every mutation. [`MemoryStorage`] backs tests, [`DatabaseStorage`] keeps the
//! blobs in the `storage_entries` table.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, RwLock};

use sea_orm::{ActiveModelTrait, DatabaseConnection, Set, prelude::*};
use tracing::{debug, instrument};

use crate::{
    entities::{StorageEntry, StorageEntryColumn, StorageEntryModel, storage_entry},
    errors::{Error, Result},
};

/// Key of the JSON array of order records.
pub const ORDERS_KEY: &str = "olive-shortages";
/// Key of the JSON array of suppliers.
pub const SUPPLIERS_KEY: &str = "olive-suppliers";
/// Key of the selected display language code.
pub const LOCALE_KEY: &str = "olive-lang";

/// Keyed text storage the record store persists through.
pub trait Storage: Send + Sync {
    /// Reads the value stored under `key`, `None` when nothing is stored.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<()>> + Send;
}

/// `HashMap`-backed storage. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Creates an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage pre-filled with the given entries.
    #[must_use]
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Arc::new(RwLock::new(map)),
        }
    }

    fn read_entry(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().map_err(|_| Error::Storage {
            message: "lock poisoned".to_string(),
        })?;
        Ok(entries.get(key).cloned())
    }

    fn write_entry(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| Error::Storage {
            message: "lock poisoned".to_string(),
        })?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.read_entry(key)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.write_entry(key, value)
    }
}

/// Storage backed by the `storage_entries` table.
#[derive(Debug, Clone)]
pub struct DatabaseStorage {
    db: DatabaseConnection,
}

impl DatabaseStorage {
    /// Wraps an open connection. The table must already exist.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_entry(&self, key: &str) -> Result<Option<StorageEntryModel>> {
        StorageEntry::find()
            .filter(StorageEntryColumn::Key.eq(key))
            .one(&self.db)
            .await
            .map_err(Into::into)
    }
}

impl Storage for DatabaseStorage {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self.find_entry(key).await?.map(|entry| entry.value);
        debug!("Storage read for key '{}': {} bytes", key, value.as_ref().map_or(0, String::len));
        Ok(value)
    }

    #[instrument(skip(self, value))]
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let now = chrono::Utc::now().naive_utc();

        if let Some(existing) = self.find_entry(key).await? {
            let mut entry: storage_entry::ActiveModel = existing.into();
            entry.value = Set(value.to_string());
            entry.updated_at = Set(now);
            entry.update(&self.db).await?;
        } else {
            let entry = storage_entry::ActiveModel {
                key: Set(key.to_string()),
                value: Set(value.to_string()),
                updated_at: Set(now),
                ..Default::default()
            };
            entry.insert(&self.db).await?;
        }

        debug!("Storage write for key '{}': {} bytes", key, value.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_memory_storage_set_and_get() -> Result<()> {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("missing").await?, None);

        storage.set("k", "v1").await?;
        storage.set("k", "v2").await?;
        assert_eq!(storage.get("k").await?, Some("v2".to_string()));

        // Clones share the map
        let other = storage.clone();
        assert_eq!(other.get("k").await?, Some("v2".to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn test_database_storage_set_and_get_new_key() -> Result<()> {
        let storage = DatabaseStorage::new(setup_test_db().await?);

        storage.set(ORDERS_KEY, "[]").await?;

        assert_eq!(storage.get(ORDERS_KEY).await?, Some("[]".to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn test_database_storage_overwrites_existing_key() -> Result<()> {
        let db = setup_test_db().await?;
        let storage = DatabaseStorage::new(db.clone());

        storage.set(LOCALE_KEY, "ar").await?;
        storage.set(LOCALE_KEY, "en").await?;

        assert_eq!(storage.get(LOCALE_KEY).await?, Some("en".to_string()));
        let rows = StorageEntry::find().all(&db).await?;
        assert_eq!(rows.len(), 1, "Overwriting a key must not add a second row");
        Ok(())
    }

    #[tokio::test]
    async fn test_database_storage_missing_key() -> Result<()> {
        let storage = DatabaseStorage::new(setup_test_db().await?);
        assert_eq!(storage.get("this_key_does_not_exist").await?, None);
        Ok(())
    }
}
