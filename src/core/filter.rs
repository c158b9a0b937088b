//! Filter view over the order collection.
//!
//! Filtering is a pure function of the collection and the three filter values;
//! it never reorders records.

use super::order::{Order, Status, SupplierId};

/// The three independent predicates of the order list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    /// Keep only orders assigned to this supplier
    pub supplier_id: Option<SupplierId>,
    /// Keep only orders in this status
    pub status: Option<Status>,
    /// Case-insensitive substring of name, category and notes
    pub search: String,
}

impl OrderFilter {
    /// A filter that keeps everything.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Tests a single record against all three predicates.
    #[must_use]
    pub fn matches(&self, order: &Order) -> bool {
        let ok_supplier = self
            .supplier_id
            .as_ref()
            .is_none_or(|id| order.supplier_id.as_ref() == Some(id));
        let ok_status = self.status.is_none_or(|status| order.status == status);
        let ok_search = self.search.is_empty()
            || order
                .search_text()
                .to_lowercase()
                .contains(&self.search.to_lowercase());

        ok_supplier && ok_status && ok_search
    }

    /// Returns the matching records in collection order.
    #[must_use]
    pub fn apply<'a>(&self, orders: &'a [Order]) -> Vec<&'a Order> {
        orders.iter().filter(|order| self.matches(order)).collect()
    }
}
