//! Order and supplier records - the data shared by every role.
//!
//! Records serialize as camelCase JSON objects so the persisted blobs stay
//! readable by any tool that understands the storage format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, Result};

/// Units offered when the settings file does not list any.
pub const DEFAULT_UNITS: [&str; 5] = ["كغ", "لتر", "علبة", "حزمة", "قطعة"];

/// Opaque identity of an order record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

/// Opaque identity of a supplier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupplierId(String);

macro_rules! identity {
    ($ty:ident) => {
        impl $ty {
            /// Generates a fresh random identity.
            #[must_use]
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().simple().to_string())
            }

            /// Borrows the identity as text.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $ty {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $ty {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

identity!(OrderId);
identity!(SupplierId);

/// How urgently an item is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Can wait
    Low,
    /// Normal
    #[default]
    Med,
    /// Urgent
    High,
}

impl Priority {
    /// Every priority, in display order.
    pub const ALL: [Self; 3] = [Self::Low, Self::Med, Self::High];

    /// Wire name of the priority.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Med => "med",
            Self::High => "high",
        }
    }
}

/// Fulfillment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Reported, not yet sent anywhere
    #[default]
    New,
    /// Sent to a supplier
    Sent,
    /// Supplier acknowledged
    Ack,
    /// Supplier is preparing it
    Prep,
    /// Delivered
    Delivered,
    /// Will not be fulfilled
    Cancelled,
}

impl Status {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 6] = [
        Self::New,
        Self::Sent,
        Self::Ack,
        Self::Prep,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Sent => "sent",
            Self::Ack => "ack",
            Self::Prep => "prep",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Validation {
                message: format!("unknown priority '{s}'"),
            })
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Validation {
                message: format!("unknown status '{s}'"),
            })
    }
}

/// One reported shortage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Immutable identity
    pub id: OrderId,
    /// What is missing
    pub name: String,
    /// How much of it
    pub quantity: f64,
    /// Unit the quantity is counted in
    pub unit: String,
    /// Grouping such as veg, meat or dairy
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub priority: Priority,
    /// Date the item is needed by, free text
    #[serde(default)]
    pub needed_by: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub status: Status,
    /// Weak reference to the assigned supplier
    #[serde(
        default,
        serialize_with = "none_as_empty",
        deserialize_with = "empty_as_none"
    )]
    pub supplier_id: Option<SupplierId>,
    /// Expected delivery time, free text set by the supplier
    #[serde(default)]
    pub eta: String,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Text the free-text search runs against.
    #[must_use]
    pub fn search_text(&self) -> String {
        format!("{} {} {}", self.name, self.category, self.notes)
    }

    /// Marks the record as modified now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Partial input for a new order. Everything but the name has a default.
#[derive(Debug, Clone, Default, PartialEq)]
#[allow(missing_docs)]
pub struct OrderDraft {
    pub name: String,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub needed_by: Option<String>,
    pub notes: Option<String>,
    pub supplier_id: Option<SupplierId>,
}

impl OrderDraft {
    /// Starts a draft for the named item.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Checks the draft and turns it into a record.
    ///
    /// # Errors
    /// Returns `Error::Validation` when the trimmed name is empty or the
    /// quantity is negative or not finite.
    pub fn into_order(self, default_unit: &str) -> Result<Order> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(Error::Validation {
                message: "Item name cannot be empty".to_string(),
            });
        }

        let quantity = self.quantity.unwrap_or(1.0);
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(Error::Validation {
                message: format!("Quantity must be a non-negative number, got {quantity}"),
            });
        }

        let now = Utc::now();
        Ok(Order {
            id: OrderId::generate(),
            name,
            quantity,
            unit: non_empty(self.unit).unwrap_or_else(|| default_unit.to_string()),
            category: self.category.unwrap_or_default(),
            priority: self.priority.unwrap_or_default(),
            needed_by: self.needed_by.unwrap_or_default(),
            notes: self.notes.unwrap_or_default(),
            status: Status::New,
            supplier_id: self.supplier_id,
            eta: String::new(),
            created_at: now,
            updated_at: now,
        })
    }
}

/// A named party orders can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// Stored blobs use "" for "no supplier".
#[allow(clippy::ref_option)]
fn none_as_empty<S>(
    value: &Option<SupplierId>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(value.as_ref().map_or("", SupplierId::as_str))
}

fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<SupplierId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.is_empty()).map(SupplierId::from))
}
