//! Text helpers shared by the Discord commands.
//!
//! Orders are shown to users with a short reference (`#` plus the first eight
//! characters of the identity). Commands accept either that reference, the
//! full identity, or an autocomplete label ending in the reference.

use std::fmt::Write;

use crate::{
    core::{
        locale::{Locale, priority_label, status_label, t},
        order::{Order, OrderId, Supplier, SupplierId},
        storage::Storage,
        store::OrderStore,
    },
    errors::{Error, Result},
};

const SHORT_ID_LEN: usize = 8;
const MAX_CHOICE_LEN: usize = 100;

fn shorten(id: &str) -> &str {
    id.get(..SHORT_ID_LEN).unwrap_or(id)
}

/// Leading characters of an identity, enough to tell orders apart.
#[must_use]
pub fn short_id(id: &OrderId) -> &str {
    shorten(id.as_str())
}

// Appends " #reference" and truncates `text` so the whole label fits a choice.
fn with_reference(mut text: String, reference: &str) -> String {
    let reference = format!(" #{reference}");
    let room = MAX_CHOICE_LEN.saturating_sub(reference.chars().count());
    if text.chars().count() > room {
        text = text.chars().take(room.saturating_sub(1)).collect();
        text.push('…');
    }
    text.push_str(&reference);
    text
}

/// Quantity without a trailing `.0` for whole numbers.
#[must_use]
pub fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 && quantity.abs() < 1e15 {
        format!("{quantity:.0}")
    } else {
        format!("{quantity}")
    }
}

/// One-line label used for autocomplete choices.
#[must_use]
pub fn order_label(order: &Order) -> String {
    let label = format!(
        "{} · {} {}",
        order.name,
        format_quantity(order.quantity),
        order.unit
    );
    with_reference(label, short_id(&order.id))
}

/// Autocomplete label for a supplier. Same-name suppliers differ by reference.
#[must_use]
pub fn supplier_label(supplier: &Supplier) -> String {
    with_reference(supplier.name.clone(), shorten(supplier.id.as_str()))
}

/// Resolves a user-supplied order reference to a stored identity.
///
/// # Errors
/// Returns `Error::OrderNotFound` when nothing matches or the prefix is ambiguous.
pub fn resolve_order_ref<S: Storage>(store: &OrderStore<S>, reference: &str) -> Result<OrderId> {
    let token = reference
        .rsplit_once('#')
        .map_or(reference, |(_, tail)| tail)
        .trim();

    if token.is_empty() {
        return Err(Error::OrderNotFound {
            id: reference.to_string(),
        });
    }

    if let Some(order) = store.orders().iter().find(|o| o.id.as_str() == token) {
        return Ok(order.id.clone());
    }

    let mut matches = store
        .orders()
        .iter()
        .filter(|o| o.id.as_str().starts_with(token));
    match (matches.next(), matches.next()) {
        (Some(order), None) => Ok(order.id.clone()),
        _ => Err(Error::OrderNotFound {
            id: reference.to_string(),
        }),
    }
}

/// Splits a comma or whitespace separated list of order references.
pub fn resolve_order_refs<S: Storage>(store: &OrderStore<S>, references: &str) -> Result<Vec<OrderId>> {
    references
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| resolve_order_ref(store, part))
        .collect()
}

/// Resolves a user-supplied supplier reference.
///
/// Accepts a full identity, an autocomplete label ending in `#reference`, or a
/// bare name shared by no other supplier.
///
/// # Errors
/// Returns `Error::SupplierNotFound` when nothing matches, or
/// `Error::Validation` when a bare name belongs to several suppliers.
pub fn resolve_supplier_ref<'a, S: Storage>(
    store: &'a OrderStore<S>,
    reference: &str,
) -> Result<&'a Supplier> {
    let reference = reference.trim();
    let not_found = || Error::SupplierNotFound {
        id: reference.to_string(),
    };
    if reference.is_empty() {
        return Err(not_found());
    }

    if let Some(supplier) = store.supplier(&SupplierId::from(reference)) {
        return Ok(supplier);
    }

    if let Some((_, tail)) = reference.rsplit_once('#') {
        let token = tail.trim();
        if !token.is_empty() {
            let mut matches = store
                .suppliers()
                .iter()
                .filter(|s| s.id.as_str().starts_with(token));
            if let (Some(supplier), None) = (matches.next(), matches.next()) {
                return Ok(supplier);
            }
        }
    }

    match store.suppliers_named(reference).as_slice() {
        [] => Err(not_found()),
        [only] => Ok(*only),
        several => Err(Error::Validation {
            message: format!(
                "{} suppliers are named '{reference}', pick one from the list",
                several.len()
            ),
        }),
    }
}

/// Order labels for one supplier's orders, newest first.
///
/// Empty when the supplier reference does not resolve.
#[must_use]
pub fn supplier_order_labels<S: Storage>(store: &OrderStore<S>, supplier: &str) -> Vec<String> {
    resolve_supplier_ref(store, supplier)
        .map(|found| {
            store
                .orders_for_supplier(&found.id)
                .into_iter()
                .rev()
                .map(order_label)
                .collect()
        })
        .unwrap_or_default()
}

/// Embed field (title, body) describing one order.
pub fn order_field(locale: Locale, order: &Order, suppliers: &[Supplier]) -> Result<(String, String)> {
    let supplier_name = order
        .supplier_id
        .as_ref()
        .and_then(|id| suppliers.iter().find(|s| &s.id == id))
        .map_or_else(|| t(locale, "none").to_string(), |s| s.name.clone());

    let title = format!(
        "{} · {} {} #{}",
        order.name,
        format_quantity(order.quantity),
        order.unit,
        short_id(&order.id)
    );

    let mut body = String::new();
    writeln!(
        &mut body,
        "**{}:** {} · **{}:** {}",
        t(locale, "status"),
        status_label(locale, order.status),
        t(locale, "priority"),
        priority_label(locale, order.priority)
    )?;
    write!(&mut body, "**{}:** {supplier_name}", t(locale, "supplier"))?;
    if !order.category.is_empty() {
        write!(&mut body, "\n**{}:** {}", t(locale, "category"), order.category)?;
    }
    if !order.needed_by.is_empty() {
        write!(&mut body, "\n**{}:** {}", t(locale, "neededBy"), order.needed_by)?;
    }
    if !order.eta.is_empty() {
        write!(&mut body, "\n**{}:** {}", t(locale, "eta"), order.eta)?;
    }
    if !order.notes.is_empty() {
        write!(&mut body, "\n**{}:** {}", t(locale, "notes"), order.notes)?;
    }

    Ok((title, body))
}

/// Localized reply for errors caused by user input.
///
/// Returns `None` for internal failures, which the command should propagate.
#[must_use]
pub fn user_message(locale: Locale, error: &Error) -> Option<String> {
    let key = match error {
        Error::Validation { .. } => "invalidInput",
        Error::OrderNotFound { .. } | Error::SupplierNotFound { .. } => "notFound",
        Error::PermissionDenied { .. } | Error::StatusNotPermitted { .. } => "notAllowed",
        _ => return None,
    };
    Some(format!("❌ {}: {error}", t(locale, key)))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::order::OrderDraft;
    use crate::test_utils::{sample_order, setup_memory_store};

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(5.0), "5");
        assert_eq!(format_quantity(2.5), "2.5");
        assert_eq!(format_quantity(0.0), "0");
    }

    #[test]
    fn test_order_label_fits_choice_limit() {
        let mut order = sample_order("Tomatoes");
        assert!(order_label(&order).ends_with(&format!("#{}", short_id(&order.id))));

        order.name = "x".repeat(300);
        let label = order_label(&order);
        assert!(label.chars().count() <= MAX_CHOICE_LEN);
        assert!(label.ends_with(&format!("#{}", short_id(&order.id))));
    }

    #[tokio::test]
    async fn test_resolve_order_ref_forms() -> Result<()> {
        let mut store = setup_memory_store().await?;
        let order = store.add(OrderDraft::named("Tomatoes")).await?;

        assert_eq!(resolve_order_ref(&store, order.id.as_str())?, order.id);
        assert_eq!(resolve_order_ref(&store, short_id(&order.id))?, order.id);
        assert_eq!(resolve_order_ref(&store, &order_label(&order))?, order.id);
        assert!(resolve_order_ref(&store, "#").is_err());
        assert!(resolve_order_ref(&store, "zzzz-not-an-id").is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_resolve_order_refs_list() -> Result<()> {
        let mut store = setup_memory_store().await?;
        let a = store.add(OrderDraft::named("A")).await?;
        let b = store.add(OrderDraft::named("B")).await?;

        let list = format!("{}, #{}", short_id(&a.id), short_id(&b.id));
        assert_eq!(resolve_order_refs(&store, &list)?, vec![a.id, b.id]);
        Ok(())
    }

    #[tokio::test]
    async fn test_resolve_supplier_ref_tells_same_names_apart() -> Result<()> {
        let mut store = setup_memory_store().await?;
        let first = store.add_supplier("Acme").await?;
        let second = store.add_supplier("Acme").await?;

        let first_label = supplier_label(&first);
        let second_label = supplier_label(&second);
        assert_ne!(first_label, second_label);
        assert_eq!(resolve_supplier_ref(&store, &first_label)?.id, first.id);
        assert_eq!(resolve_supplier_ref(&store, &second_label)?.id, second.id);
        assert_eq!(resolve_supplier_ref(&store, second.id.as_str())?.id, second.id);

        let ambiguous = resolve_supplier_ref(&store, "acme").unwrap_err();
        assert!(matches!(ambiguous, Error::Validation { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_resolve_supplier_ref_by_unique_name() -> Result<()> {
        let store = setup_memory_store().await?;
        assert_eq!(resolve_supplier_ref(&store, "sidra company")?.id.as_str(), "s1");
        assert_eq!(resolve_supplier_ref(&store, "M D #s2")?.id.as_str(), "s2");
        assert!(matches!(
            resolve_supplier_ref(&store, "nobody").unwrap_err(),
            Error::SupplierNotFound { .. }
        ));
        assert!(resolve_supplier_ref(&store, "  ").is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_supplier_order_labels_only_lists_that_supplier() -> Result<()> {
        let mut store = setup_memory_store().await?;
        let second_acme = {
            store.add_supplier("Acme").await?;
            store.add_supplier("Acme").await?
        };
        let mine = store.add(OrderDraft::named("Eggs")).await?;
        let other = store.add(OrderDraft::named("Flour")).await?;
        store.bulk_assign(&[mine.id.clone()], &second_acme.id).await?;
        store.bulk_assign(&[other.id.clone()], &SupplierId::from("s1")).await?;

        let labels = supplier_order_labels(&store, &supplier_label(&second_acme));
        assert_eq!(labels, vec![order_label(store.order(&mine.id).unwrap())]);
        assert!(supplier_order_labels(&store, "nobody").is_empty());
        Ok(())
    }

    #[test]
    fn test_user_message_only_for_user_errors() {
        let validation = Error::Validation {
            message: "Item name cannot be empty".to_string(),
        };
        assert!(user_message(Locale::En, &validation).unwrap().contains("Invalid input"));

        let internal = Error::Storage {
            message: "lock poisoned".to_string(),
        };
        assert!(user_message(Locale::En, &internal).is_none());
    }

    #[test]
    fn test_order_field_shows_supplier_name() {
        let mut order = sample_order("Milk");
        order.supplier_id = Some("s1".into());
        let suppliers = vec![Supplier {
            id: "s1".into(),
            name: "Sidra Company".to_string(),
        }];

        let (title, body) = order_field(Locale::En, &order, &suppliers).unwrap();
        assert!(title.starts_with("Milk · 1 kg"));
        assert!(body.contains("Sidra Company"));
        assert!(body.contains("New"));
    }
}
