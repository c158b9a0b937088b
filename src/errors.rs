//! Unified error type for the shortage tracker.

use thiserror::Error;

/// Every failure the crate can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Settings file could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// The underlying database rejected a query.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A blob could not be encoded to JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The storage backend failed outside of the database (lock poisoning etc.).
    #[error("Storage error: {message}")]
    Storage {
        /// What went wrong
        message: String,
    },

    /// User input that the store refuses to accept.
    #[error("Invalid input: {message}")]
    Validation {
        /// Which rule was broken
        message: String,
    },

    /// No order with this identity is visible to the caller.
    #[error("Order not found: {id}")]
    OrderNotFound {
        /// Identity that was looked up
        id: String,
    },

    /// No supplier with this identity or name exists.
    #[error("Supplier not found: {id}")]
    SupplierNotFound {
        /// Identity or name that was looked up
        id: String,
    },

    /// The role is not allowed to run the operation.
    #[error("Role '{role}' may not {operation}")]
    PermissionDenied {
        /// Role that attempted the call
        role: String,
        /// Operation that was refused
        operation: String,
    },

    /// The role may not move an order into this status.
    #[error("Role '{role}' may not set status '{status}'")]
    StatusNotPermitted {
        /// Role that attempted the change
        role: String,
        /// Requested status
        status: String,
    },

    /// Required environment variable missing.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Writing into a message buffer failed.
    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    /// Discord/serenity failure surfaced through poise.
    #[error("Serenity/Poise framework error: {0}")]
    #[allow(clippy::enum_variant_names)]
    FrameworkError(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::FrameworkError(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
