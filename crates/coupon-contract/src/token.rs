//! # Coupon Token and Object
//!
//! A minted coupon lives in two places at once:
//!
//! - the **object** at its object address, recording who currently owns it;
//! - the **`CouponToken` resource** stored under the owning account,
//!   carrying the coupon's attributes and pointing back at its object.
//!
//! An account holds at most one `CouponToken`. Transfer moves the resource
//! and rewrites the object's owner; redeem deletes both.
//!
//! ## Object Address Derivation
//!
//! ```text
//! object_address = sha256(creator || sequence_number_le || 0xFE)
//! ```
//!
//! The creator's sequence number is unique per transaction, so every mint
//! yields a fresh object address.

use coupon_core::{sha256, AccountAddress, ObjectAddress};
use serde::{Deserialize, Serialize};

/// Name of the published module.
pub const MODULE_NAME: &str = "cryptomilan";

/// Name of the coupon resource struct.
pub const COUPON_TOKEN: &str = "CouponToken";

/// Scheme byte appended when deriving object addresses.
pub const OBJECT_SCHEME: u8 = 0xFE;

/// The `CouponToken` resource held by an account.
///
/// Latitude and longitude are decimal strings and are stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponToken {
    pub object: ObjectAddress,
    pub name: String,
    pub description: String,
    pub latitude: String,
    pub longitude: String,
    pub sponsor: String,
    pub uri: String,
    pub owner: AccountAddress,
}

/// Object metadata for a minted coupon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponObject {
    pub owner: AccountAddress,
    pub creator: AccountAddress,
}

/// Derive the object address for the coupon minted by `creator` in the
/// transaction with `sequence_number`.
pub fn derive_object_address(creator: &AccountAddress, sequence_number: u64) -> ObjectAddress {
    let mut preimage = Vec::with_capacity(AccountAddress::LENGTH + 9);
    preimage.extend_from_slice(creator.as_bytes());
    preimage.extend_from_slice(&sequence_number.to_le_bytes());
    preimage.push(OBJECT_SCHEME);
    ObjectAddress::new(sha256(&preimage))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_address_depends_on_sequence_number() {
        let creator = AccountAddress::from_hex_literal("0xad").unwrap();
        assert_ne!(
            derive_object_address(&creator, 0),
            derive_object_address(&creator, 1)
        );
        assert_eq!(
            derive_object_address(&creator, 7),
            derive_object_address(&creator, 7)
        );
    }

    #[test]
    fn test_object_address_depends_on_creator() {
        let a = AccountAddress::from_hex_literal("0xa").unwrap();
        let b = AccountAddress::from_hex_literal("0xb").unwrap();
        assert_ne!(derive_object_address(&a, 0), derive_object_address(&b, 0));
    }

    #[test]
    fn test_token_serializes_addresses_as_hex() {
        let token = CouponToken {
            object: ObjectAddress::from_hex_literal("0x2").unwrap(),
            name: "Test Token".into(),
            description: "Test Description".into(),
            latitude: "45.4642".into(),
            longitude: "9.1900".into(),
            sponsor: "Test Sponsor".into(),
            uri: "ipfs://test".into(),
            owner: AccountAddress::from_hex_literal("0x1").unwrap(),
        };
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(json["latitude"], "45.4642");
        assert!(json["owner"].as_str().unwrap().starts_with("0x0000"));
        let back: CouponToken = serde_json::from_value(json).unwrap();
        assert_eq!(back, token);
    }
}
