//! Connector Framework configuration types
//!
//! Base trait implemented by connector-specific configuration.

use crate::error::ConnectorResult;

/// Trait for connector-specific configuration.
///
/// Each connector implements this trait to define its validation rules and
/// how it is rendered in logs.
pub trait ConnectorConfig: Clone + Send + Sync {
    /// Validate the configuration.
    ///
    /// Returns an error if the configuration is invalid.
    fn validate(&self) -> ConnectorResult<()>;

    /// Create a redacted version of this config (for logging/display).
    ///
    /// Sensitive fields should be replaced with placeholders.
    fn redacted(&self) -> Self;
}

/// Placeholder used in place of secrets by [`ConnectorConfig::redacted`].
pub const REDACTED: &str = "***REDACTED***";
