//! Record store - owns the order and supplier collections.
//!
//! The store keeps both collections in memory and writes the affected
//! collection through its [`Storage`] port after every mutation. Loading never
//! fails on bad data: a missing or corrupt blob falls back to an empty order
//! list, the configured default suppliers, or the configured default locale.

use std::collections::HashSet;

use chrono::Utc;
use serde::de::DeserializeOwned;
use tracing::{info, instrument, warn};

use super::{
    locale::Locale,
    order::{Order, OrderDraft, OrderId, Status, Supplier, SupplierId},
    storage::{LOCALE_KEY, ORDERS_KEY, SUPPLIERS_KEY, Storage},
};
use crate::{
    config::settings::Settings,
    errors::{Error, Result},
};

/// In-memory order and supplier lists mirrored to a [`Storage`].
#[derive(Debug)]
pub struct OrderStore<S> {
    storage: S,
    orders: Vec<Order>,
    suppliers: Vec<Supplier>,
    locale: Locale,
    default_unit: String,
}

impl<S: Storage> OrderStore<S> {
    /// Loads all persisted state through `storage`.
    ///
    /// # Errors
    /// Only a failing storage read is an error; unreadable contents are not.
    #[instrument(skip(storage, settings))]
    pub async fn load(storage: S, settings: &Settings) -> Result<Self> {
        let orders = match storage.get(ORDERS_KEY).await? {
            Some(raw) => parse_or_warn(ORDERS_KEY, &raw).unwrap_or_default(),
            None => Vec::new(),
        };

        let suppliers = storage
            .get(SUPPLIERS_KEY)
            .await?
            .and_then(|raw| parse_or_warn(SUPPLIERS_KEY, &raw))
            .unwrap_or_else(|| settings.default_suppliers());

        let locale = match storage.get(LOCALE_KEY).await? {
            Some(code) => code.parse().unwrap_or_else(|_| {
                warn!("Ignoring unsupported stored locale '{}'", code);
                settings.locale
            }),
            None => settings.locale,
        };

        info!(
            "Loaded {} orders and {} suppliers (locale {})",
            orders.len(),
            suppliers.len(),
            locale
        );

        Ok(Self {
            storage,
            orders,
            suppliers,
            locale,
            default_unit: settings.default_unit().to_string(),
        })
    }

    /// All orders in insertion order.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// All suppliers in insertion order.
    #[must_use]
    pub fn suppliers(&self) -> &[Supplier] {
        &self.suppliers
    }

    /// Currently selected display language.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Finds an order by identity.
    #[must_use]
    pub fn order(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| &o.id == id)
    }

    /// Finds a supplier by identity.
    #[must_use]
    pub fn supplier(&self, id: &SupplierId) -> Option<&Supplier> {
        self.suppliers.iter().find(|s| &s.id == id)
    }

    /// Every supplier with this name, ignoring case. Names are not unique.
    #[must_use]
    pub fn suppliers_named(&self, name: &str) -> Vec<&Supplier> {
        let name = name.trim().to_lowercase();
        self.suppliers
            .iter()
            .filter(|s| s.name.to_lowercase() == name)
            .collect()
    }

    /// Orders assigned to one supplier, in collection order.
    #[must_use]
    pub fn orders_for_supplier(&self, supplier_id: &SupplierId) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|o| o.supplier_id.as_ref() == Some(supplier_id))
            .collect()
    }

    /// Creates a new order from a draft and appends it.
    ///
    /// # Errors
    /// Returns `Error::Validation` without touching the collection when the
    /// draft has no name or a bad quantity, or a storage error if the write fails.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn add(&mut self, draft: OrderDraft) -> Result<Order> {
        let order = draft.into_order(&self.default_unit)?;
        self.orders.push(order.clone());
        info!("Added order {} ({})", order.id, order.name);
        self.persist_orders().await?;
        Ok(order)
    }

    /// Replaces the order with the same identity, or appends it if unknown.
    ///
    /// Field values are stored as given.
    #[instrument(skip(self, order), fields(id = %order.id))]
    pub async fn upsert(&mut self, order: Order) -> Result<()> {
        if let Some(slot) = self.orders.iter_mut().find(|o| o.id == order.id) {
            *slot = order;
        } else {
            self.orders.push(order);
        }
        self.persist_orders().await
    }

    /// Deletes the order with this identity. Returns whether one was removed.
    #[instrument(skip(self))]
    pub async fn remove(&mut self, id: &OrderId) -> Result<bool> {
        let before = self.orders.len();
        self.orders.retain(|o| &o.id != id);
        let removed = self.orders.len() != before;
        if removed {
            info!("Removed order {}", id);
        }
        self.persist_orders().await?;
        Ok(removed)
    }

    /// Assigns `supplier_id` to every listed order and marks it sent.
    ///
    /// Orders not listed keep every field, `updated_at` included. Unknown
    /// identities are ignored. Returns how many orders changed.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn bulk_assign(&mut self, ids: &[OrderId], supplier_id: &SupplierId) -> Result<usize> {
        let targets: HashSet<&OrderId> = ids.iter().collect();
        let now = Utc::now();
        let mut changed = 0;

        for order in self.orders.iter_mut().filter(|o| targets.contains(&o.id)) {
            order.supplier_id = Some(supplier_id.clone());
            order.status = Status::Sent;
            order.updated_at = now;
            changed += 1;
        }

        info!("Sent {} orders to supplier {}", changed, supplier_id);
        self.persist_orders().await?;
        Ok(changed)
    }

    /// Appends a supplier with a fresh identity. Duplicate names are allowed.
    ///
    /// # Errors
    /// Returns `Error::Validation` when the trimmed name is empty.
    #[instrument(skip(self))]
    pub async fn add_supplier(&mut self, name: &str) -> Result<Supplier> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation {
                message: "Supplier name cannot be empty".to_string(),
            });
        }

        let supplier = Supplier {
            id: SupplierId::generate(),
            name: name.to_string(),
        };
        self.suppliers.push(supplier.clone());
        info!("Added supplier {} ({})", supplier.id, supplier.name);
        self.persist_suppliers().await?;
        Ok(supplier)
    }

    /// Switches the display language and stores the choice.
    #[instrument(skip(self))]
    pub async fn set_locale(&mut self, locale: Locale) -> Result<()> {
        self.locale = locale;
        self.storage.set(LOCALE_KEY, locale.code()).await
    }

    async fn persist_orders(&self) -> Result<()> {
        let blob = serde_json::to_string(&self.orders)?;
        self.storage.set(ORDERS_KEY, &blob).await
    }

    async fn persist_suppliers(&self) -> Result<()> {
        let blob = serde_json::to_string(&self.suppliers)?;
        self.storage.set(SUPPLIERS_KEY, &blob).await
    }
}

fn parse_or_warn<T: DeserializeOwned>(key: &str, raw: &str) -> Option<T> {
    serde_json::from_str(raw)
        .inspect_err(|e| warn!("Discarding unreadable '{}' blob: {}", key, e))
        .ok()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::order::{DEFAULT_UNITS, Priority};
    use crate::core::storage::{DatabaseStorage, MemoryStorage};
    use crate::test_utils::{sample_order, setup_memory_store, setup_test_db};

    #[tokio::test]
    async fn test_add_applies_defaults() -> Result<()> {
        let mut store = setup_memory_store().await?;

        let order = store.add(OrderDraft::named("Tomatoes")).await?;

        assert_eq!(order.quantity, 1.0);
        assert_eq!(order.unit, DEFAULT_UNITS[0]);
        assert_eq!(order.priority, Priority::Med);
        assert_eq!(order.status, Status::New);
        assert!(order.eta.is_empty());
        assert_eq!(store.orders(), &[order]);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_rejects_empty_name() -> Result<()> {
        let mut store = setup_memory_store().await?;

        let result = store.add(OrderDraft::named("   ")).await;

        assert!(matches!(result.unwrap_err(), Error::Validation { message: _ }));
        assert!(store.orders().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_add_produces_unique_ids() -> Result<()> {
        let mut store = setup_memory_store().await?;

        for i in 0..25 {
            store.add(OrderDraft::named(format!("Item {i}"))).await?;
        }

        let ids: HashSet<&OrderId> = store.orders().iter().map(|o| &o.id).collect();
        assert_eq!(store.orders().len(), 25);
        assert_eq!(ids.len(), 25);
        Ok(())
    }

    #[tokio::test]
    async fn test_upsert_known_id_replaces_in_place() -> Result<()> {
        let mut store = setup_memory_store().await?;
        store.add(OrderDraft::named("A")).await?;
        let b = store.add(OrderDraft::named("B")).await?;
        store.add(OrderDraft::named("C")).await?;

        let mut edited = b.clone();
        edited.name = "B2".to_string();
        store.upsert(edited).await?;

        let names: Vec<&str> = store.orders().iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B2", "C"]);
        assert_eq!(store.orders()[1].id, b.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_upsert_unknown_id_appends() -> Result<()> {
        let mut store = setup_memory_store().await?;
        store.add(OrderDraft::named("A")).await?;

        let outsider = sample_order("Outsider");
        store.upsert(outsider.clone()).await?;

        assert_eq!(store.orders().len(), 2);
        assert_eq!(store.orders()[1], outsider);
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() -> Result<()> {
        let mut store = setup_memory_store().await?;
        let order = store.add(OrderDraft::named("A")).await?;

        assert!(store.remove(&order.id).await?);
        assert!(!store.remove(&order.id).await?);
        assert!(store.orders().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_bulk_assign_leaves_other_orders_untouched() -> Result<()> {
        let mut store = setup_memory_store().await?;
        let a = store.add(OrderDraft::named("A")).await?;
        let b = store.add(OrderDraft::named("B")).await?;
        let c = store.add(OrderDraft::named("C")).await?;
        let acme = SupplierId::from("acme");

        let changed = store
            .bulk_assign(&[a.id.clone(), c.id.clone(), OrderId::from("ghost")], &acme)
            .await?;

        assert_eq!(changed, 2);
        for id in [&a.id, &c.id] {
            let order = store.order(id).unwrap();
            assert_eq!(order.status, Status::Sent);
            assert_eq!(order.supplier_id.as_ref(), Some(&acme));
        }
        assert_eq!(store.order(&b.id).unwrap(), &b);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_supplier() -> Result<()> {
        let mut store = setup_memory_store().await?;
        let before = store.suppliers().len();

        let first = store.add_supplier(" Acme ").await?;
        let second = store.add_supplier("Acme").await?;

        assert_eq!(first.name, "Acme");
        assert_ne!(first.id, second.id);
        assert_eq!(store.suppliers().len(), before + 2);
        assert!(store.add_supplier("  ").await.is_err());
        assert_eq!(store.suppliers().len(), before + 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_acme_tomatoes_scenario() -> Result<()> {
        let storage = MemoryStorage::with_entries([(SUPPLIERS_KEY, "[]")]);
        let mut store = OrderStore::load(storage, &Settings::default()).await?;

        let acme = store.add_supplier("Acme").await?;
        assert_eq!(store.suppliers(), &[acme.clone()]);

        let mut draft = OrderDraft::named("Tomatoes");
        draft.quantity = Some(5.0);
        let order = store.add(draft).await?;
        assert_eq!(store.orders().len(), 1);
        assert_eq!(order.status, Status::New);
        assert_eq!(order.quantity, 5.0);
        assert_eq!(order.unit, DEFAULT_UNITS[0]);

        store.bulk_assign(&[order.id.clone()], &acme.id).await?;
        let sent = store.order(&order.id).unwrap();
        assert_eq!(sent.status, Status::Sent);
        assert_eq!(sent.supplier_id.as_ref(), Some(&acme.id));
        Ok(())
    }

    #[tokio::test]
    async fn test_load_corrupt_orders_blob_yields_empty() -> Result<()> {
        let storage = MemoryStorage::with_entries([
            (ORDERS_KEY, "{not json"),
            (SUPPLIERS_KEY, "also broken"),
            (LOCALE_KEY, "xx"),
        ]);

        let store = OrderStore::load(storage, &Settings::default()).await?;

        assert!(store.orders().is_empty());
        assert_eq!(store.suppliers(), Settings::default().default_suppliers().as_slice());
        assert_eq!(store.locale(), Locale::Ar);
        Ok(())
    }

    #[tokio::test]
    async fn test_load_missing_suppliers_uses_defaults() -> Result<()> {
        let store = OrderStore::load(MemoryStorage::new(), &Settings::default()).await?;

        let names: Vec<&str> = store.suppliers().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Sidra Company", "M D"]);
        assert_eq!(store.suppliers()[0].id.as_str(), "s1");
        Ok(())
    }

    #[tokio::test]
    async fn test_every_mutation_is_persisted() -> Result<()> {
        let storage = MemoryStorage::new();
        let mut store = OrderStore::load(storage.clone(), &Settings::default()).await?;

        let order = store.add(OrderDraft::named("Milk")).await?;
        let supplier = store.add_supplier("Dairy Co").await?;
        store.bulk_assign(&[order.id.clone()], &supplier.id).await?;
        store.set_locale(Locale::En).await?;

        let reloaded = OrderStore::load(storage, &Settings::default()).await?;
        assert_eq!(reloaded.orders(), store.orders());
        assert_eq!(reloaded.suppliers(), store.suppliers());
        assert_eq!(reloaded.locale(), Locale::En);
        Ok(())
    }

    #[tokio::test]
    async fn test_store_over_database_storage() -> Result<()> {
        let db = setup_test_db().await?;
        let mut store =
            OrderStore::load(DatabaseStorage::new(db.clone()), &Settings::default()).await?;
        let order = store.add(OrderDraft::named("Bread")).await?;
        store.remove(&order.id).await?;
        store.add(OrderDraft::named("Olives")).await?;

        let reloaded = OrderStore::load(DatabaseStorage::new(db), &Settings::default()).await?;
        assert_eq!(reloaded.orders().len(), 1);
        assert_eq!(reloaded.orders()[0].name, "Olives");
        Ok(())
    }

    #[tokio::test]
    async fn test_supplier_lookup() -> Result<()> {
        let store = setup_memory_store().await?;
        let named = store.suppliers_named(" sidra COMPANY ");
        assert_eq!(named.len(), 1);
        assert_eq!(named[0].id.as_str(), "s1");
        assert!(store.supplier(&SupplierId::from("s2")).is_some());
        assert!(store.suppliers_named("nobody").is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_suppliers_named_folds_non_ascii_case() -> Result<()> {
        let mut store = setup_memory_store().await?;
        let first = store.add_supplier("Ölmühle").await?;
        let second = store.add_supplier("ÖLMÜHLE").await?;

        let ids: Vec<&SupplierId> = store
            .suppliers_named("ölmühle")
            .into_iter()
            .map(|s| &s.id)
            .collect();
        assert_eq!(ids, vec![&first.id, &second.id]);
        Ok(())
    }
}
