//! # Contract Errors
//!
//! Every rejection the contract can produce. The first four variants are
//! aborts with stable numeric codes; the node renders them into a
//! transaction's `vm_status` as
//!
//! ```text
//! Move abort in <module>: <NAME>(0x<code>): <message>
//! ```
//!
//! Argument decoding failures never reach execution: the node rejects such
//! transactions at submission.

use coupon_core::{AccountAddress, ModuleId, ObjectAddress};
use thiserror::Error;

/// The signer (or the `from`/`owner` argument) does not own the coupon.
pub const ENOT_OWNER: u64 = 1;
/// The object address does not reference a live coupon.
pub const ECOUPON_NOT_FOUND: u64 = 2;
/// The recipient already holds a `CouponToken`.
pub const ECOUPON_ALREADY_HELD: u64 = 3;
/// The `from`/`owner` argument is not the transaction signer.
pub const ESENDER_MISMATCH: u64 = 4;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CouponError {
    #[error("{claimed} does not own coupon {object}")]
    NotOwner {
        object: ObjectAddress,
        claimed: AccountAddress,
    },

    #[error("coupon {0} does not exist")]
    CouponNotFound(ObjectAddress),

    #[error("account {0} already holds a coupon")]
    AlreadyHeld(AccountAddress),

    #[error("argument {argument} does not match signer {signer}")]
    SenderMismatch {
        signer: AccountAddress,
        argument: AccountAddress,
    },

    /// The payload names a function the module does not publish.
    #[error("function {0} is not published by this module")]
    UnknownFunction(String),

    /// Wrong arity, type arguments, or an argument that fails to parse.
    #[error("invalid arguments for {function}: {reason}")]
    InvalidArguments { function: String, reason: String },
}

impl CouponError {
    /// Numeric abort code, for aborts raised during execution.
    pub fn abort_code(&self) -> Option<u64> {
        match self {
            Self::NotOwner { .. } => Some(ENOT_OWNER),
            Self::CouponNotFound(_) => Some(ECOUPON_NOT_FOUND),
            Self::AlreadyHeld(_) => Some(ECOUPON_ALREADY_HELD),
            Self::SenderMismatch { .. } => Some(ESENDER_MISMATCH),
            Self::UnknownFunction(_) | Self::InvalidArguments { .. } => None,
        }
    }

    /// Symbolic abort name, e.g. `ECOUPON_NOT_FOUND`.
    pub fn abort_name(&self) -> Option<&'static str> {
        match self {
            Self::NotOwner { .. } => Some("ENOT_OWNER"),
            Self::CouponNotFound(_) => Some("ECOUPON_NOT_FOUND"),
            Self::AlreadyHeld(_) => Some("ECOUPON_ALREADY_HELD"),
            Self::SenderMismatch { .. } => Some("ESENDER_MISMATCH"),
            Self::UnknownFunction(_) | Self::InvalidArguments { .. } => None,
        }
    }

    /// Render the status string recorded on a failed transaction.
    pub fn vm_status(&self, module: &ModuleId) -> String {
        match (self.abort_name(), self.abort_code()) {
            (Some(name), Some(code)) => {
                format!("Move abort in {module}: {name}({code:#x}): {self}")
            }
            _ => format!("Invalid entry function call: {self}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vm_status_format() {
        let module = ModuleId::new(AccountAddress::from_hex_literal("0x1").unwrap(), "cryptomilan")
            .unwrap();
        let object = ObjectAddress::from_hex_literal("0x2").unwrap();
        let status = CouponError::CouponNotFound(object).vm_status(&module);
        assert!(status.starts_with("Move abort in 0x"));
        assert!(status.contains("::cryptomilan: ECOUPON_NOT_FOUND(0x2): coupon 0x"));
        assert!(status.ends_with("does not exist"));
    }

    #[test]
    fn test_abort_codes_are_distinct() {
        let a = AccountAddress::from_hex_literal("0xa").unwrap();
        let o = ObjectAddress::from_hex_literal("0xb").unwrap();
        let codes = [
            CouponError::NotOwner { object: o, claimed: a }.abort_code(),
            CouponError::CouponNotFound(o).abort_code(),
            CouponError::AlreadyHeld(a).abort_code(),
            CouponError::SenderMismatch { signer: a, argument: a }.abort_code(),
        ];
        assert_eq!(codes, [Some(1), Some(2), Some(3), Some(4)]);
    }

    #[test]
    fn test_argument_errors_have_no_abort_code() {
        let err = CouponError::InvalidArguments {
            function: "mint_token_transfer".into(),
            reason: "expected 7 arguments, got 6".into(),
        };
        assert_eq!(err.abort_code(), None);
        assert!(err.vm_status(&ModuleId::new(AccountAddress::new([0; 32]), "m").unwrap())
            .starts_with("Invalid entry function call"));
    }
}
