//! # Address and Hash Newtypes
//!
//! Newtype wrappers for the 32-byte identifiers on the ledger. An
//! `ObjectAddress` names a minted token instance; an `AccountAddress` names
//! an actor that signs transactions and holds resources. Both render as
//! `0x` followed by 64 lowercase hex digits.
//!
//! Parsing accepts short literals (`0x1`) by left-padding with zeros, so the
//! placeholder arguments seen in hand-written payloads parse to a real (if
//! usually empty) address rather than failing deserialization.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

const ADDRESS_LENGTH: usize = 32;

/// Address of an account on the ledger.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountAddress([u8; ADDRESS_LENGTH]);

/// Address of an object (a specific minted coupon).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectAddress(AccountAddress);

/// Hash of a signed transaction.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionHash([u8; 32]);

// ---------------------------------------------------------------------------
// AccountAddress
// ---------------------------------------------------------------------------

impl AccountAddress {
    /// Byte length of an address.
    pub const LENGTH: usize = ADDRESS_LENGTH;

    /// Create an address from raw bytes.
    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Return the raw 32 bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Parse `0x`-prefixed (or bare) hex, left-padding short forms.
    pub fn from_hex_literal(input: &str) -> Result<Self, CoreError> {
        let trimmed = input.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if digits.is_empty() {
            return Err(invalid_address(input, "no hex digits"));
        }
        if digits.len() > ADDRESS_LENGTH * 2 {
            return Err(invalid_address(
                input,
                &format!("at most {} hex digits, got {}", ADDRESS_LENGTH * 2, digits.len()),
            ));
        }
        let padded = format!("{digits:0>64}");
        let bytes = hex::decode(&padded).map_err(|e| invalid_address(input, &e.to_string()))?;
        let mut arr = [0u8; ADDRESS_LENGTH];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// Render as `0x` + 64 lowercase hex digits.
    pub fn to_hex_literal(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Abbreviated form for log lines: `0x` + first 8 hex digits.
    pub fn short(&self) -> String {
        format!("0x{}", hex::encode(&self.0[..4]))
    }
}

fn invalid_address(input: &str, reason: &str) -> CoreError {
    CoreError::InvalidAddress {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_literal())
    }
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountAddress({})", self.to_hex_literal())
    }
}

impl FromStr for AccountAddress {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex_literal(s)
    }
}

impl Serialize for AccountAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_literal())
    }
}

impl<'de> Deserialize<'de> for AccountAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex_literal(&s).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// ObjectAddress
// ---------------------------------------------------------------------------

impl ObjectAddress {
    /// Create an object address from raw bytes.
    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(AccountAddress::new(bytes))
    }

    /// Return the raw 32 bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        self.0.as_bytes()
    }

    /// Parse `0x`-prefixed hex, left-padding short forms.
    pub fn from_hex_literal(input: &str) -> Result<Self, CoreError> {
        AccountAddress::from_hex_literal(input).map(Self)
    }

    /// Render as `0x` + 64 lowercase hex digits.
    pub fn to_hex_literal(&self) -> String {
        self.0.to_hex_literal()
    }

    /// Abbreviated form for log lines.
    pub fn short(&self) -> String {
        self.0.short()
    }
}

impl fmt::Display for ObjectAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_literal())
    }
}

impl fmt::Debug for ObjectAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectAddress({})", self.to_hex_literal())
    }
}

impl FromStr for ObjectAddress {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex_literal(s)
    }
}

impl Serialize for ObjectAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ObjectAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        AccountAddress::deserialize(deserializer).map(Self)
    }
}

// ---------------------------------------------------------------------------
// TransactionHash
// ---------------------------------------------------------------------------

impl TransactionHash {
    /// Wrap a raw 32-byte digest.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Return the raw digest.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parse a `0x`-prefixed, exactly 64-digit hex hash.
    pub fn from_hex(input: &str) -> Result<Self, CoreError> {
        let digits = input
            .trim()
            .strip_prefix("0x")
            .ok_or_else(|| CoreError::InvalidHash(input.to_string()))?;
        if digits.len() != 64 {
            return Err(CoreError::InvalidHash(input.to_string()));
        }
        let bytes = hex::decode(digits).map_err(|_| CoreError::InvalidHash(input.to_string()))?;
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// Render as `0x` + 64 lowercase hex digits.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for TransactionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for TransactionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransactionHash({})", self.to_hex())
    }
}

impl FromStr for TransactionHash {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for TransactionHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for TransactionHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
