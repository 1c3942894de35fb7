// Error types for the supply request system

use thiserror::Error;

/// Errors raised by request-system operations.
///
/// Validation errors are local and terminal for the offending unit of work
/// only; batch operations log and skip rather than propagate them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SupplyError {
    /// Delivery legs must move at least one item.
    #[error("delivery count must be greater than zero")]
    InvalidCount,

    /// Dimension keys identify a world and cannot be blank.
    #[error("dimension key must not be empty")]
    EmptyDimension,

    /// The request token is not (or no longer) known to the manager.
    #[error("unknown request token")]
    UnknownRequest,

    /// The requested lifecycle transition would move backwards or leave a
    /// terminal state.
    #[error("invalid state transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// Configuration could not be parsed.
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for request-system operations.
pub type Result<T> = std::result::Result<T, SupplyError>;
