//! Role-scoped editors - the only way front-ends mutate orders.
//!
//! Every function takes the acting [`Role`] and the [`AccessPolicy`] and
//! refuses operations the role does not hold before touching the store. The
//! raw store operations stay available for seeding and tests.

use tracing::info;

use super::{
    access::{AccessPolicy, Operation, Role},
    filter::OrderFilter,
    order::{Order, OrderDraft, OrderId, Status, Supplier, SupplierId},
    storage::Storage,
    store::OrderStore,
};
use crate::errors::{Error, Result};

/// Status and ETA changes a supplier may make on an assigned order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FulfillmentUpdate {
    /// New status, if it changes
    pub status: Option<Status>,
    /// New ETA text, if it changes
    pub eta: Option<String>,
}

/// Staff files a new shortage report.
pub async fn report_shortage<S: Storage>(
    store: &mut OrderStore<S>,
    policy: &AccessPolicy,
    role: &Role,
    draft: OrderDraft,
) -> Result<Order> {
    policy.authorize(role, Operation::Report)?;
    store.add(draft).await
}

/// Manager replaces an existing order with an edited copy.
///
/// The status must be within the manager's permitted set. `updated_at` is
/// refreshed; `created_at` and the supplier-owned `eta` are kept from the
/// stored record.
pub async fn edit_order<S: Storage>(
    store: &mut OrderStore<S>,
    policy: &AccessPolicy,
    role: &Role,
    mut edited: Order,
) -> Result<Order> {
    policy.authorize(role, Operation::Edit)?;
    let current = store
        .order(&edited.id)
        .ok_or_else(|| Error::OrderNotFound {
            id: edited.id.to_string(),
        })?;

    if edited.status != current.status {
        policy.check_status(role, edited.status)?;
    }

    edited.created_at = current.created_at;
    edited.eta.clone_from(&current.eta);
    edited.touch();
    store.upsert(edited.clone()).await?;
    info!("Manager edited order {}", edited.id);
    Ok(edited)
}

/// Manager quick action: mark one order as sent.
pub async fn send_order<S: Storage>(
    store: &mut OrderStore<S>,
    policy: &AccessPolicy,
    role: &Role,
    id: &OrderId,
) -> Result<Order> {
    policy.authorize(role, Operation::Edit)?;
    let mut order = store
        .order(id)
        .cloned()
        .ok_or_else(|| Error::OrderNotFound { id: id.to_string() })?;

    policy.check_status(role, Status::Sent)?;
    order.status = Status::Sent;
    order.touch();
    store.upsert(order.clone()).await?;
    Ok(order)
}

/// Manager deletes an order. Deleting an unknown order is not an error.
pub async fn remove_order<S: Storage>(
    store: &mut OrderStore<S>,
    policy: &AccessPolicy,
    role: &Role,
    id: &OrderId,
) -> Result<bool> {
    policy.authorize(role, Operation::Remove)?;
    store.remove(id).await
}

/// Manager sends a selection of orders to one supplier.
///
/// The supplier must exist; unknown order ids are skipped.
pub async fn assign_to_supplier<S: Storage>(
    store: &mut OrderStore<S>,
    policy: &AccessPolicy,
    role: &Role,
    ids: &[OrderId],
    supplier_id: &SupplierId,
) -> Result<usize> {
    policy.authorize(role, Operation::BulkAssign)?;
    if store.supplier(supplier_id).is_none() {
        return Err(Error::SupplierNotFound {
            id: supplier_id.to_string(),
        });
    }
    store.bulk_assign(ids, supplier_id).await
}

/// Supplier changes status and/or ETA on one of its own orders.
///
/// Orders assigned elsewhere are reported as not found.
pub async fn update_fulfillment<S: Storage>(
    store: &mut OrderStore<S>,
    policy: &AccessPolicy,
    role: &Role,
    id: &OrderId,
    update: FulfillmentUpdate,
) -> Result<Order> {
    policy.authorize(role, Operation::UpdateFulfillment)?;
    let Role::Supplier(supplier_id) = role else {
        return Err(Error::PermissionDenied {
            role: role.to_string(),
            operation: Operation::UpdateFulfillment.describe().to_string(),
        });
    };

    let mut order = store
        .order(id)
        .filter(|o| o.supplier_id.as_ref() == Some(supplier_id))
        .cloned()
        .ok_or_else(|| Error::OrderNotFound { id: id.to_string() })?;

    if let Some(status) = update.status {
        policy.check_status(role, status)?;
        order.status = status;
    }
    if let Some(eta) = update.eta {
        order.eta = eta.trim().to_string();
    }

    order.touch();
    store.upsert(order.clone()).await?;
    info!("Supplier {} updated order {} to {}", supplier_id, order.id, order.status);
    Ok(order)
}

/// Adds a supplier. Open to every role.
pub async fn register_supplier<S: Storage>(
    store: &mut OrderStore<S>,
    role: &Role,
    name: &str,
) -> Result<Supplier> {
    info!("{} registering supplier '{}'", role, name.trim());
    store.add_supplier(name).await
}

/// A supplier's own orders, in collection order.
///
/// # Errors
/// Returns `Error::PermissionDenied` for any role other than a supplier.
pub fn supplier_orders<'a, S: Storage>(
    store: &'a OrderStore<S>,
    role: &Role,
) -> Result<Vec<&'a Order>> {
    match role {
        Role::Supplier(supplier_id) => Ok(store.orders_for_supplier(supplier_id)),
        Role::Staff | Role::Manager => Err(Error::PermissionDenied {
            role: role.to_string(),
            operation: "list supplier orders".to_string(),
        }),
    }
}

/// Orders the role can see, narrowed by `filter`.
///
/// A supplier only ever sees its own orders, whatever supplier the filter names.
#[must_use]
pub fn visible_orders<'a, S: Storage>(
    store: &'a OrderStore<S>,
    role: &Role,
    filter: &OrderFilter,
) -> Vec<&'a Order> {
    match role {
        Role::Supplier(supplier_id) => {
            let scoped = OrderFilter {
                supplier_id: Some(supplier_id.clone()),
                ..filter.clone()
            };
            scoped.apply(store.orders())
        }
        Role::Staff | Role::Manager => filter.apply(store.orders()),
    }
}
