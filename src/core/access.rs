//! Roles and the operations each one may run.
//!
//! A role is passed explicitly into every editor call. It is a usability gate
//! for a single trusted operator, not a security boundary.

use std::collections::BTreeSet;
use std::fmt;

use super::order::{Status, SupplierId};
use crate::errors::{Error, Result};

/// Who is acting on the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    /// Reports shortages
    Staff,
    /// Assigns suppliers and manages every order
    Manager,
    /// Works the orders assigned to one supplier
    Supplier(SupplierId),
}

impl Role {
    /// Short name used in messages and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Staff => "staff",
            Self::Manager => "manager",
            Self::Supplier(_) => "supplier",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Store operations gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Create a new shortage report
    Report,
    /// Replace any field of an order
    Edit,
    /// Delete an order
    Remove,
    /// Assign a supplier to several orders and send them
    BulkAssign,
    /// Change status or ETA of an assigned order
    UpdateFulfillment,
}

impl Operation {
    /// Verb phrase used in error messages.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Report => "report shortages",
            Self::Edit => "edit orders",
            Self::Remove => "remove orders",
            Self::BulkAssign => "assign orders to suppliers",
            Self::UpdateFulfillment => "update fulfillment",
        }
    }
}

/// Which operations and target statuses each role gets.
///
/// Manager and supplier status sets are configured independently; neither
/// restricts which state an order may come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    manager_statuses: BTreeSet<Status>,
    supplier_statuses: BTreeSet<Status>,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            manager_statuses: Status::ALL.into_iter().collect(),
            supplier_statuses: [
                Status::Sent,
                Status::Ack,
                Status::Prep,
                Status::Delivered,
                Status::Cancelled,
            ]
            .into_iter()
            .collect(),
        }
    }
}

impl AccessPolicy {
    /// Builds a policy from explicit status sets.
    #[must_use]
    pub fn new(
        manager_statuses: impl IntoIterator<Item = Status>,
        supplier_statuses: impl IntoIterator<Item = Status>,
    ) -> Self {
        Self {
            manager_statuses: manager_statuses.into_iter().collect(),
            supplier_statuses: supplier_statuses.into_iter().collect(),
        }
    }

    /// Returns true when `role` may run `operation`.
    #[must_use]
    pub const fn permits(&self, role: &Role, operation: Operation) -> bool {
        matches!(
            (role, operation),
            (Role::Staff, Operation::Report)
                | (
                    Role::Manager,
                    Operation::Edit | Operation::Remove | Operation::BulkAssign
                )
                | (Role::Supplier(_), Operation::UpdateFulfillment)
        )
    }

    /// Fails with `Error::PermissionDenied` unless `role` may run `operation`.
    pub fn authorize(&self, role: &Role, operation: Operation) -> Result<()> {
        if self.permits(role, operation) {
            Ok(())
        } else {
            Err(Error::PermissionDenied {
                role: role.to_string(),
                operation: operation.describe().to_string(),
            })
        }
    }

    /// Statuses the manager may set, in lifecycle order.
    #[must_use]
    pub fn manager_statuses(&self) -> Vec<Status> {
        self.manager_statuses.iter().copied().collect()
    }

    /// Statuses a supplier may set, in lifecycle order.
    #[must_use]
    pub fn supplier_statuses(&self) -> Vec<Status> {
        self.supplier_statuses.iter().copied().collect()
    }

    /// Fails with `Error::StatusNotPermitted` unless `role` may set `status`.
    pub fn check_status(&self, role: &Role, status: Status) -> Result<()> {
        let allowed = match role {
            Role::Staff => false,
            Role::Manager => self.manager_statuses.contains(&status),
            Role::Supplier(_) => self.supplier_statuses.contains(&status),
        };

        if allowed {
            Ok(())
        } else {
            Err(Error::StatusNotPermitted {
                role: role.to_string(),
                status: status.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_capability_sets_do_not_overlap() {
        let policy = AccessPolicy::default();
        let supplier = Role::Supplier(SupplierId::from("s1"));
        let ops = [
            Operation::Report,
            Operation::Edit,
            Operation::Remove,
            Operation::BulkAssign,
            Operation::UpdateFulfillment,
        ];

        for op in ops {
            let granted = [&Role::Staff, &Role::Manager, &supplier]
                .into_iter()
                .filter(|role| policy.permits(role, op))
                .count();
            assert_eq!(granted, 1, "{op:?} should belong to exactly one role");
        }
    }

    #[test]
    fn test_authorize_reports_role_and_operation() {
        let policy = AccessPolicy::default();
        let err = policy.authorize(&Role::Staff, Operation::Remove).unwrap_err();
        assert!(matches!(
            err,
            Error::PermissionDenied { ref role, .. } if role == "staff"
        ));
    }

    #[test]
    fn test_default_status_sets() {
        let policy = AccessPolicy::default();
        let supplier = Role::Supplier(SupplierId::from("s1"));

        assert_eq!(policy.manager_statuses().len(), 6);
        assert!(policy.check_status(&Role::Manager, Status::New).is_ok());
        assert!(policy.check_status(&supplier, Status::New).is_err());
        assert!(policy.check_status(&supplier, Status::Delivered).is_ok());
        assert!(policy.check_status(&Role::Staff, Status::New).is_err());
    }

    #[test]
    fn test_status_sets_are_configured_independently() {
        let policy = AccessPolicy::new([Status::Sent], [Status::Delivered]);
        let supplier = Role::Supplier(SupplierId::from("s1"));

        assert!(policy.check_status(&Role::Manager, Status::Delivered).is_err());
        assert!(policy.check_status(&supplier, Status::Delivered).is_ok());
        assert!(policy.check_status(&supplier, Status::Sent).is_err());
    }
}
