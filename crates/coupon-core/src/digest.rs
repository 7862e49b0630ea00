//! # SHA-256 Digests
//!
//! Transaction hashes and signing-message prefixes are SHA-256. Structured
//! values are hashed through [`CanonicalBytes`]; the raw-byte entry point
//! exists for fixed domain-separation tags and key material.

use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;

/// SHA-256 over raw bytes.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// SHA-256 over canonical bytes.
pub fn sha256_canonical(data: &CanonicalBytes) -> [u8; 32] {
    sha256(data.as_bytes())
}
