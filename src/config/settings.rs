//! Application settings loading from config.toml
//!
//! Every section is optional. Missing values fall back to the built-in
//! defaults: Arabic locale, the standard unit list, the two seed suppliers and
//! the default manager/supplier status sets.

use crate::{
    core::{
        access::AccessPolicy,
        locale::Locale,
        order::{DEFAULT_UNITS, Status, Supplier},
    },
    errors::{Error, Result},
};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Language used until one is chosen and stored
    pub locale: Locale,
    /// Units offered for quantities; the first one is the default
    pub units: Vec<String>,
    /// Suppliers used when none are stored yet
    pub suppliers: Vec<SupplierConfig>,
    /// Statuses each role may set
    pub statuses: StatusConfig,
}

/// A seed supplier
#[derive(Debug, Clone, Deserialize)]
pub struct SupplierConfig {
    /// Fixed identity so orders can reference it across resets
    pub id: String,
    /// Display name
    pub name: String,
}

/// Target statuses permitted per role
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    /// Statuses the manager may set
    pub manager: Vec<Status>,
    /// Statuses a supplier may set on its own orders
    pub supplier: Vec<Status>,
}

impl Default for StatusConfig {
    fn default() -> Self {
        let policy = AccessPolicy::default();
        Self {
            manager: policy.manager_statuses(),
            supplier: policy.supplier_statuses(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            units: DEFAULT_UNITS.iter().map(ToString::to_string).collect(),
            suppliers: vec![
                SupplierConfig {
                    id: "s1".to_string(),
                    name: "Sidra Company".to_string(),
                },
                SupplierConfig {
                    id: "s2".to_string(),
                    name: "M D".to_string(),
                },
            ],
            statuses: StatusConfig::default(),
        }
    }
}

impl Settings {
    /// Unit applied to drafts that name none.
    #[must_use]
    pub fn default_unit(&self) -> &str {
        self.units.first().map_or(DEFAULT_UNITS[0], String::as_str)
    }

    /// Seed suppliers as store records.
    #[must_use]
    pub fn default_suppliers(&self) -> Vec<Supplier> {
        self.suppliers
            .iter()
            .map(|s| Supplier {
                id: s.id.as_str().into(),
                name: s.name.clone(),
            })
            .collect()
    }

    /// Role policy built from the configured status sets.
    #[must_use]
    pub fn access_policy(&self) -> AccessPolicy {
        AccessPolicy::new(
            self.statuses.manager.iter().copied(),
            self.statuses.supplier.iter().copied(),
        )
    }
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load settings from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Loads settings from the default location (./config.toml)
pub fn load_default_settings() -> Result<Settings> {
    load_settings("config.toml")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_full_settings() {
        let toml_str = r#"
            locale = "en"
            units = ["kg", "box"]

            [[suppliers]]
            id = "veg"
            name = "Green Farm"

            [statuses]
            manager = ["new", "sent", "cancelled"]
            supplier = ["ack", "delivered"]
        "#;

        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.locale, Locale::En);
        assert_eq!(settings.default_unit(), "kg");
        assert_eq!(settings.default_suppliers().len(), 1);
        assert_eq!(settings.default_suppliers()[0].id.as_str(), "veg");
        assert_eq!(settings.statuses.supplier, vec![Status::Ack, Status::Delivered]);

        let policy = settings.access_policy();
        let supplier = crate::core::access::Role::Supplier("veg".into());
        assert!(policy.check_status(&supplier, Status::Sent).is_err());
        assert!(policy.check_status(&supplier, Status::Ack).is_ok());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings.locale, Locale::Ar);
        assert_eq!(settings.default_unit(), DEFAULT_UNITS[0]);
        assert_eq!(settings.suppliers.len(), 2);
        assert_eq!(settings.statuses.manager.len(), 6);
        assert_eq!(settings.statuses.supplier.len(), 5);
    }

    #[test]
    fn test_empty_unit_list_falls_back() {
        let settings: Settings = toml::from_str("units = []").unwrap();
        assert_eq!(settings.default_unit(), DEFAULT_UNITS[0]);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = load_settings("definitely/not/here.toml");
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));
    }
}
