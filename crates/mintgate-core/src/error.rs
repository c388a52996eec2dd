//! # Error Types — Core Validation Failures
//!
//! Errors produced while constructing the foundational newtypes. All errors
//! use `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! Higher layers define their own error enums (ledger capacity violations,
//! engine authorization failures) and compose them; this crate only reports
//! malformed inputs.

use thiserror::Error;

/// Validation errors for the foundational types.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A minter address string failed to parse.
    #[error("invalid address {input:?}: {reason}")]
    InvalidAddress {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A hex-encoded digest failed to parse.
    #[error("invalid digest {input:?}: {reason}")]
    InvalidDigest {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A timestamp string failed to parse or was not UTC.
    #[error("invalid timestamp {0}")]
    InvalidTimestamp(String),
}
