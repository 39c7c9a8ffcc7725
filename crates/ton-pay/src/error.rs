//! Error types for ton-pay

use std::fmt;

use thiserror::Error;

/// Form field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Recipient address.
    Address,
    /// Amount in TON.
    Amount,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Address => write!(f, "address"),
            Field::Amount => write!(f, "amount"),
        }
    }
}

/// A single validation failure on a payment form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Payment error type
#[derive(Error, Debug)]
pub enum PayError {
    #[error("Invalid payment form: {}", join_fields(.0))]
    Invalid(Vec<FieldError>),

    #[error("Wallet not connected")]
    NotConnected,

    #[error("Transaction cancelled by user")]
    Cancelled,

    #[error("Wallet error: {0}")]
    Wallet(String),

    #[error("Hash lookup failed: {0}")]
    Lookup(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl PayError {
    /// Field errors carried by [`PayError::Invalid`], empty otherwise.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            PayError::Invalid(errors) => errors,
            _ => &[],
        }
    }
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias
pub type PayResult<T> = Result<T, PayError>;
