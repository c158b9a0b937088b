/// Database connection and table management
pub mod database;

/// Application settings loading from config.toml
pub mod settings;
