//! Gatekeeper error types

use thiserror::Error;

/// Errors that can occur during gatekeeper operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatekeeperError {
    /// A release check refused the graph
    #[error("Validation failed [{check}]: {reason}")]
    ValidationFailed {
        /// Name of the failing check
        check: String,
        /// Human-readable reason
        reason: String,
    },

    /// A negative control showed a significant association
    #[error("Scientific integrity violation: {0}")]
    ScientificIntegrity(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
