//! Error types shared by the storefront widgets.
use thiserror::Error;

/// Failures surfaced by the core crate.
///
/// Widgets swallow these at their boundary; the type exists so storage and
/// configuration problems stay observable in tests and logs.
#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
    #[error("select-all delay {delay_ms}ms exceeds maximum {max_ms}ms")]
    DelayTooLong { delay_ms: u32, max_ms: u32 },
}
