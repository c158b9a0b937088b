//! Discord interaction handlers
//!
//! This module provides handlers for Discord interactions such as autocomplete.

/// Autocomplete handlers for suppliers, orders, units, statuses and priorities
pub mod autocomplete;
