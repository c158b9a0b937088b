//! Entity module - `SeaORM` entity definitions for the database.
//! The tracker persists its state as keyed blobs, so a single table is enough.

pub mod storage_entry;

pub use storage_entry::{
    Column as StorageEntryColumn, Entity as StorageEntry, Model as StorageEntryModel,
};
