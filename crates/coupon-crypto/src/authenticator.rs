//! # Signed Transactions
//!
//! An account address is derived from its Ed25519 public key:
//!
//! ```text
//! address = sha256(public_key || 0x00)
//! ```
//!
//! where `0x00` is the single-key Ed25519 scheme byte. A signed transaction
//! is valid when the authenticator's public key derives the sender address
//! and the signature verifies over the raw transaction's signing message.
//!
//! The transaction hash is SHA-256 over the canonical JSON of the full signed
//! transaction, so two signatures over the same raw transaction hash apart.

use coupon_core::{
    sha256, sha256_canonical, AccountAddress, CanonicalBytes, CanonicalizationError, CryptoError,
    RawTransaction, TransactionHash,
};
use serde::{Deserialize, Serialize};

use crate::ed25519::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};

/// Authentication scheme byte for single Ed25519 keys.
pub const ED25519_SCHEME: u8 = 0x00;

/// Proof that the holder of `public_key` approved a raw transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionAuthenticator {
    pub public_key: Ed25519PublicKey,
    pub signature: Ed25519Signature,
}

/// A raw transaction together with its authenticator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub raw: RawTransaction,
    pub authenticator: TransactionAuthenticator,
}

/// Derive the account address controlled by `public_key`.
pub fn derive_address(public_key: &Ed25519PublicKey) -> AccountAddress {
    let mut preimage = Vec::with_capacity(33);
    preimage.extend_from_slice(public_key.as_bytes());
    preimage.push(ED25519_SCHEME);
    AccountAddress::new(sha256(&preimage))
}

/// Sign `raw` with `key_pair`.
pub fn sign_transaction(
    key_pair: &Ed25519KeyPair,
    raw: &RawTransaction,
) -> Result<TransactionAuthenticator, CryptoError> {
    let message = raw.signing_message()?;
    Ok(TransactionAuthenticator {
        public_key: key_pair.public_key(),
        signature: key_pair.sign(&message),
    })
}

impl SignedTransaction {
    pub fn new(raw: RawTransaction, authenticator: TransactionAuthenticator) -> Self {
        Self { raw, authenticator }
    }

    /// Check address derivation and the signature.
    pub fn verify(&self) -> Result<(), CryptoError> {
        let derived = derive_address(&self.authenticator.public_key);
        if derived != self.raw.sender {
            return Err(CryptoError::AddressMismatch(self.raw.sender.to_hex_literal()));
        }
        let message = self.raw.signing_message()?;
        self.authenticator
            .public_key
            .verify(&message, &self.authenticator.signature)
    }

    /// Hash identifying this transaction on the ledger.
    pub fn hash(&self) -> Result<TransactionHash, CanonicalizationError> {
        let canonical = CanonicalBytes::new(self)?;
        Ok(TransactionHash::new(sha256_canonical(&canonical)))
    }
}
