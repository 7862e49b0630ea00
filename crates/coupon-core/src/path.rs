//! # Module, Function and Resource Paths
//!
//! Entry functions and resource types are addressed as
//! `<address>::<module>::<name>`, e.g.
//! `0x0167…9a73::cryptomilan::mint_token_transfer` or
//! `0x0167…9a73::cryptomilan::CouponToken`.
//!
//! Paths are parsed once at the boundary and compared structurally, so
//! `0x1::m::f` and `0x000…001::m::f` name the same function.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;
use crate::identity::AccountAddress;

/// A published module: its address and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId {
    pub address: AccountAddress,
    pub name: String,
}

/// A fully qualified entry function.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionId {
    pub module: ModuleId,
    pub name: String,
}

/// A fully qualified resource (struct) type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructTag {
    pub module: ModuleId,
    pub name: String,
}

impl ModuleId {
    /// Build a module id, validating the module name.
    pub fn new(address: AccountAddress, name: &str) -> Result<Self, CoreError> {
        validate_identifier(name, name)?;
        Ok(Self {
            address,
            name: name.to_string(),
        })
    }

    /// The function `<self>::<name>`.
    pub fn function(&self, name: &str) -> Result<FunctionId, CoreError> {
        validate_identifier(name, name)?;
        Ok(FunctionId {
            module: self.clone(),
            name: name.to_string(),
        })
    }

    /// The struct `<self>::<name>`.
    pub fn struct_tag(&self, name: &str) -> Result<StructTag, CoreError> {
        validate_identifier(name, name)?;
        Ok(StructTag {
            module: self.clone(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.address, self.name)
    }
}

fn validate_identifier(input: &str, ident: &str) -> Result<(), CoreError> {
    let mut chars = ident.chars();
    let valid_head = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');
    if !valid_head || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(CoreError::InvalidPath {
            input: input.to_string(),
            reason: format!("{ident:?} is not a valid identifier"),
        });
    }
    Ok(())
}

fn split_path(input: &str) -> Result<(ModuleId, String), CoreError> {
    let parts: Vec<&str> = input.trim().split("::").collect();
    if parts.len() != 3 {
        return Err(CoreError::InvalidPath {
            input: input.to_string(),
            reason: format!("expected <address>::<module>::<name>, got {} segments", parts.len()),
        });
    }
    let address = AccountAddress::from_hex_literal(parts[0])?;
    validate_identifier(input, parts[1])?;
    validate_identifier(input, parts[2])?;
    Ok((
        ModuleId {
            address,
            name: parts[1].to_string(),
        },
        parts[2].to_string(),
    ))
}

macro_rules! qualified_path_impls {
    ($ty:ident) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}::{}", self.module, self.name)
            }
        }

        impl FromStr for $ty {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let (module, name) = split_path(s)?;
                Ok(Self { module, name })
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

qualified_path_impls!(FunctionId);
qualified_path_impls!(StructTag);

#[cfg(test)]
mod tests {
    use super::*;

    const MODULE_ADDRESS: &str =
        "0x0167bbd306ac7b642caa33afba08778fb2690327ab7533f84c388b4657e99a73";

    #[test]
    fn test_function_id_parse_and_display() {
        let text = format!("{MODULE_ADDRESS}::cryptomilan::mint_token_transfer");
        let f: FunctionId = text.parse().unwrap();
        assert_eq!(f.module.name, "cryptomilan");
        assert_eq!(f.name, "mint_token_transfer");
        assert_eq!(f.to_string(), text);
    }

    #[test]
    fn test_short_address_normalizes() {
        let a: StructTag = "0x1::cryptomilan::CouponToken".parse().unwrap();
        let b: StructTag = format!("0x{}::cryptomilan::CouponToken", "0".repeat(63) + "1")
            .parse()
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_wrong_segment_count() {
        assert!("0x1::cryptomilan".parse::<FunctionId>().is_err());
        assert!("0x1::a::b::c".parse::<FunctionId>().is_err());
    }

    #[test]
    fn test_rejects_bad_identifiers() {
        assert!("0x1::9lives::f".parse::<FunctionId>().is_err());
        assert!("0x1::m::has-dash".parse::<StructTag>().is_err());
        assert!("0x1::m::".parse::<StructTag>().is_err());
    }

    #[test]
    fn test_module_builders() {
        let module = ModuleId::new(AccountAddress::from_hex_literal("0x1").unwrap(), "cryptomilan")
            .unwrap();
        let f = module.function("redeem_token").unwrap();
        assert_eq!(f.module, module);
        assert!(module.struct_tag("Coupon Token").is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let tag: StructTag = "0x1::cryptomilan::CouponToken".parse().unwrap();
        let json = serde_json::to_value(&tag).unwrap();
        assert!(json.as_str().unwrap().ends_with("::cryptomilan::CouponToken"));
        let back: StructTag = serde_json::from_value(json).unwrap();
        assert_eq!(back, tag);
    }
}
