//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in return-order operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Line item not in the order.
    #[error("Item not in order: {product_id} ({entry_type})")]
    ItemNotInOrder {
        product_id: String,
        entry_type: String,
    },

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Unknown entry type.
    #[error("Unknown entry type: {0}")]
    UnknownEntryType(String),

    /// Unknown status value.
    #[error("Unknown {kind} status: {value}")]
    UnknownStatus { kind: &'static str, value: String },

    /// Invalid submission state transition.
    #[error("Invalid submission transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    /// Submission attempted with an empty cart.
    #[error("Cannot submit an empty return order")]
    EmptyOrder,

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
