//! Locally held accounts.
//!
//! Keys are generated in-process and never persisted. The seed can be
//! exported explicitly for the CLI; it is never logged.

use coupon_core::{AccountAddress, CryptoError};
use coupon_crypto::{derive_address, Ed25519KeyPair, Ed25519PublicKey};
use zeroize::Zeroizing;

/// An address together with the key that controls it.
pub struct LocalAccount {
    key: Ed25519KeyPair,
    address: AccountAddress,
}

impl LocalAccount {
    /// Generate a fresh, unfunded account.
    pub fn generate() -> Self {
        Self::from_key(Ed25519KeyPair::generate())
    }

    pub fn from_key(key: Ed25519KeyPair) -> Self {
        let address = derive_address(&key.public_key());
        Self { key, address }
    }

    /// Restore from a hex-encoded 32-byte seed.
    pub fn from_seed_hex(seed: &str) -> Result<Self, CryptoError> {
        Ok(Self::from_key(Ed25519KeyPair::from_seed_hex(seed)?))
    }

    pub fn address(&self) -> AccountAddress {
        self.address
    }

    pub fn public_key(&self) -> Ed25519PublicKey {
        self.key.public_key()
    }

    pub fn seed_hex(&self) -> Zeroizing<String> {
        self.key.seed_hex()
    }

    pub(crate) fn key(&self) -> &Ed25519KeyPair {
        &self.key
    }
}

impl std::fmt::Debug for LocalAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalAccount")
            .field("address", &self.address)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_accounts_are_distinct() {
        assert_ne!(LocalAccount::generate().address(), LocalAccount::generate().address());
    }

    #[test]
    fn seed_restores_same_address() {
        let account = LocalAccount::generate();
        let restored = LocalAccount::from_seed_hex(&account.seed_hex()).unwrap();
        assert_eq!(account.address(), restored.address());
    }

    #[test]
    fn debug_redacts_key() {
        let rendered = format!("{:?}", LocalAccount::generate());
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("Ed25519KeyPair"));
    }
}
