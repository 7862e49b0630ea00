//! # Error Types
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations. Parsing errors carry the offending input so a rejected
//! address or path can be reported verbatim.

use thiserror::Error;

/// Errors produced while parsing or validating core types.
#[derive(Error, Debug)]
pub enum CoreError {
    /// An account or object address could not be parsed.
    #[error("invalid address {input:?}: {reason}")]
    InvalidAddress {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A transaction hash could not be parsed.
    #[error("invalid transaction hash {0:?}")]
    InvalidHash(String),

    /// A `<address>::<module>::<name>` path could not be parsed.
    #[error("invalid path {input:?}: {reason}")]
    InvalidPath {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Canonicalization failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    #[error("float values are not permitted in canonical representations: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Error in cryptographic operations.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Signature verification failed.
    #[error("signature verification failed: {0}")]
    VerificationFailed(String),

    /// Key generation or parsing failed.
    #[error("key error: {0}")]
    KeyError(String),

    /// The public key does not derive the claimed sender address.
    #[error("public key does not match sender {0}")]
    AddressMismatch(String),

    /// The message to sign could not be canonicalized.
    #[error("signing message error: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}
