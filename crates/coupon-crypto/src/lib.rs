//! # coupon-crypto: Keys, Addresses, and Signed Transactions
//!
//! - [`ed25519`]: key pairs, public keys, signatures.
//! - [`authenticator`]: `SignedTransaction`, address derivation, signing,
//!   verification, and transaction hashing.
//!
//! Private keys never serialize and never appear in `Debug` output.

pub mod authenticator;
pub mod ed25519;

pub use authenticator::{
    derive_address, sign_transaction, SignedTransaction, TransactionAuthenticator,
    ED25519_SCHEME,
};
pub use ed25519::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
