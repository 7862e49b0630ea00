//! # Entry Function Calls
//!
//! Decodes an [`EntryFunctionPayload`] into a typed [`CouponCall`] and
//! back. The module publishes three entry functions:
//!
//! | Function | Arguments |
//! |---|---|
//! | `mint_token_transfer` | name, description, latitude, longitude, sponsor, uri, recipient |
//! | `transfer_token` | from, to, object |
//! | `redeem_token` | owner, object |
//!
//! Text arguments are taken verbatim. Address arguments must parse as hex
//! literals. None of the functions take type arguments.

use coupon_core::{AccountAddress, EntryFunctionPayload, ModuleId, ObjectAddress};

use crate::error::CouponError;

pub const MINT_TOKEN_TRANSFER: &str = "mint_token_transfer";
pub const TRANSFER_TOKEN: &str = "transfer_token";
pub const REDEEM_TOKEN: &str = "redeem_token";

/// Attributes supplied when minting a coupon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintArgs {
    pub name: String,
    pub description: String,
    pub latitude: String,
    pub longitude: String,
    pub sponsor: String,
    pub uri: String,
    pub recipient: AccountAddress,
}

/// A decoded call into the coupon module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CouponCall {
    MintTokenTransfer(MintArgs),
    TransferToken {
        from: AccountAddress,
        to: AccountAddress,
        object: ObjectAddress,
    },
    RedeemToken {
        owner: AccountAddress,
        object: ObjectAddress,
    },
}

impl CouponCall {
    /// Entry function name this call targets.
    pub fn function_name(&self) -> &'static str {
        match self {
            Self::MintTokenTransfer(_) => MINT_TOKEN_TRANSFER,
            Self::TransferToken { .. } => TRANSFER_TOKEN,
            Self::RedeemToken { .. } => REDEEM_TOKEN,
        }
    }

    /// Decode `payload` as a call into `module`.
    pub fn decode(module: &ModuleId, payload: &EntryFunctionPayload) -> Result<Self, CouponError> {
        let function = &payload.function;
        if function.module != *module {
            return Err(CouponError::UnknownFunction(function.to_string()));
        }
        let name = function.name.as_str();
        if !payload.type_arguments.is_empty() {
            return Err(invalid(name, "type arguments are not accepted".to_string()));
        }
        let args = &payload.arguments;
        match name {
            MINT_TOKEN_TRANSFER => {
                expect_arity(name, args, 7)?;
                Ok(Self::MintTokenTransfer(MintArgs {
                    name: args[0].clone(),
                    description: args[1].clone(),
                    latitude: args[2].clone(),
                    longitude: args[3].clone(),
                    sponsor: args[4].clone(),
                    uri: args[5].clone(),
                    recipient: account_arg(name, "recipient", &args[6])?,
                }))
            }
            TRANSFER_TOKEN => {
                expect_arity(name, args, 3)?;
                Ok(Self::TransferToken {
                    from: account_arg(name, "from", &args[0])?,
                    to: account_arg(name, "to", &args[1])?,
                    object: object_arg(name, &args[2])?,
                })
            }
            REDEEM_TOKEN => {
                expect_arity(name, args, 2)?;
                Ok(Self::RedeemToken {
                    owner: account_arg(name, "owner", &args[0])?,
                    object: object_arg(name, &args[1])?,
                })
            }
            _ => Err(CouponError::UnknownFunction(function.to_string())),
        }
    }

    /// Encode this call as a payload against `module`.
    pub fn to_payload(&self, module: &ModuleId) -> Result<EntryFunctionPayload, coupon_core::CoreError> {
        let function = module.function(self.function_name())?;
        let arguments = match self {
            Self::MintTokenTransfer(mint) => vec![
                mint.name.clone(),
                mint.description.clone(),
                mint.latitude.clone(),
                mint.longitude.clone(),
                mint.sponsor.clone(),
                mint.uri.clone(),
                mint.recipient.to_hex_literal(),
            ],
            Self::TransferToken { from, to, object } => vec![
                from.to_hex_literal(),
                to.to_hex_literal(),
                object.to_hex_literal(),
            ],
            Self::RedeemToken { owner, object } => {
                vec![owner.to_hex_literal(), object.to_hex_literal()]
            }
        };
        Ok(EntryFunctionPayload::new(function, Vec::new(), arguments))
    }
}

fn invalid(function: &str, reason: String) -> CouponError {
    CouponError::InvalidArguments {
        function: function.to_string(),
        reason,
    }
}

fn expect_arity(function: &str, args: &[String], expected: usize) -> Result<(), CouponError> {
    if args.len() != expected {
        return Err(invalid(
            function,
            format!("expected {expected} arguments, got {}", args.len()),
        ));
    }
    Ok(())
}

fn account_arg(function: &str, label: &str, raw: &str) -> Result<AccountAddress, CouponError> {
    AccountAddress::from_hex_literal(raw).map_err(|e| invalid(function, format!("{label}: {e}")))
}

fn object_arg(function: &str, raw: &str) -> Result<ObjectAddress, CouponError> {
    ObjectAddress::from_hex_literal(raw).map_err(|e| invalid(function, format!("object: {e}")))
}
