//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.
//!
//! Parsing and correction never fail as a whole: malformed lines are
//! reported as data on the parsed route, not through these types.

use thiserror::Error;

/// Errors that can occur while loading analyzer configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid threshold: {0}")]
    InvalidValue(String),
}

/// Errors raised inside the live geolocation client.
///
/// These never cross the `GeoLookup` boundary; lookups absorb them.
#[derive(Error, Debug)]
pub enum GeoError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid geolocation response: {0}")]
    InvalidResponse(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
