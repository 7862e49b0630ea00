//! # Raw Transactions
//!
//! A `RawTransaction` is what a sender signs: who is sending, which
//! sequence number it consumes, which entry function to call with which
//! positional arguments, how much fee the sender tolerates, when it expires,
//! and which chain it is meant for.
//!
//! ## Signing Message
//!
//! ```text
//! sha256("COUPON::RawTransaction") || JCS(raw_transaction)
//! ```
//!
//! The domain-separation prefix keeps a signed transaction from being
//! replayed as any other signed structure.

use serde::{Deserialize, Serialize};

use crate::canonical::CanonicalBytes;
use crate::digest::sha256;
use crate::error::CanonicalizationError;
use crate::identity::AccountAddress;
use crate::path::FunctionId;

/// Domain-separation tag hashed into every signing message.
pub const RAW_TRANSACTION_SALT: &[u8] = b"COUPON::RawTransaction";

/// An entry-function call: function, type arguments, positional arguments.
///
/// Arguments are JSON strings. Addresses travel as hex literals, coordinates
/// as decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFunctionPayload {
    pub function: FunctionId,
    #[serde(default)]
    pub type_arguments: Vec<String>,
    #[serde(default)]
    pub arguments: Vec<String>,
}

impl EntryFunctionPayload {
    pub fn new(function: FunctionId, type_arguments: Vec<String>, arguments: Vec<String>) -> Self {
        Self {
            function,
            type_arguments,
            arguments,
        }
    }
}

/// The unsigned transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransaction {
    pub sender: AccountAddress,
    pub sequence_number: u64,
    pub payload: EntryFunctionPayload,
    /// Upper bound on the fee the node may charge.
    pub max_fee: u64,
    pub expiration_timestamp_secs: u64,
    pub chain_id: u8,
}

/// Bytes a sender signs. Only obtainable through
/// [`RawTransaction::signing_message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningMessage(Vec<u8>);

impl SigningMessage {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl RawTransaction {
    /// Build the signing message for this transaction.
    pub fn signing_message(&self) -> Result<SigningMessage, CanonicalizationError> {
        let canonical = CanonicalBytes::new(self)?;
        let mut message = sha256(RAW_TRANSACTION_SALT).to_vec();
        message.extend_from_slice(canonical.as_bytes());
        Ok(SigningMessage(message))
    }
}
