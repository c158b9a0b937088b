//! Storage entry entity - One keyed blob of persisted application state.
//!
//! The tracker keeps its whole state as a handful of JSON blobs (orders, suppliers)
//! and plain values (selected locale), each stored under a fixed key.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Storage entry database model - stores one key-value pair
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "storage_entries")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Storage key (e.g., `"olive-shortages"`)
    #[sea_orm(unique)]
    pub key: String,
    /// Stored value, JSON text for collections
    #[sea_orm(column_type = "Text")]
    pub value: String,
    /// When this entry was last written
    pub updated_at: DateTime,
}

/// `StorageEntry` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
