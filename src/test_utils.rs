//! Shared test utilities.
//!
//! Helpers for setting up test databases and stores with sensible defaults.

use crate::{
    config::settings::Settings,
    core::{
        order::{Order, OrderDraft},
        storage::MemoryStorage,
        store::OrderStore,
    },
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with the storage table created.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates an empty store over fresh in-memory storage and default settings.
///
/// The default seed suppliers `s1` and `s2` are present.
pub async fn setup_memory_store() -> Result<OrderStore<MemoryStorage>> {
    OrderStore::load(MemoryStorage::new(), &Settings::default()).await
}

/// Builds a valid order record without going through a store.
#[allow(clippy::unwrap_used)]
pub fn sample_order(name: &str) -> Order {
    OrderDraft::named(name).into_order("kg").unwrap()
}
