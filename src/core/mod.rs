//! Core business logic - framework-agnostic order lifecycle.

/// Roles and the operations each may run
pub mod access;
/// Role-scoped editing operations
pub mod editor;
/// Filter view over the order list
pub mod filter;
/// Two-locale message dictionary
pub mod locale;
/// Order and supplier records
pub mod order;
/// Persistence port and its backends
pub mod storage;
/// The record store
pub mod store;
