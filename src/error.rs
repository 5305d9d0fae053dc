//! # Error Types
//!
//! This module defines the error taxonomy used throughout the boleta library.
//!
//! Every error is raised synchronously by the facade call that triggers it;
//! nothing is deferred to `encode()`. Unmappable text characters are not an
//! error at all: they substitute `0x3F` silently (see
//! [`codepage`](crate::codepage)).

use thiserror::Error;

/// Main error type for boleta operations
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Unknown codepage or enumeration name
    #[error("Config error: {0}")]
    Config(String),

    /// Malformed payload, invalid dimensions, or oversize data
    #[error("Validation error: {0}")]
    Validation(String),

    /// Operation requires state that has not been established yet
    #[error("State error: {0}")]
    State(String),
}
