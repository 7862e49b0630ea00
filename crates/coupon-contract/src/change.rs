//! # Change Sets and Events
//!
//! A successful call produces a [`ChangeSet`]: the writes to apply and the
//! events to record. Nothing is written while the call executes, so an
//! aborted call leaves state exactly as it found it.

use coupon_core::{AccountAddress, ObjectAddress};
use serde::{Deserialize, Serialize};

use crate::token::{CouponObject, CouponToken};

/// A single state write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    PutToken {
        account: AccountAddress,
        token: CouponToken,
    },
    DeleteToken {
        account: AccountAddress,
    },
    PutObject {
        address: ObjectAddress,
        object: CouponObject,
    },
    DeleteObject {
        address: ObjectAddress,
    },
}

/// Emitted when a coupon is minted to `recipient`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponMinted {
    pub object: ObjectAddress,
    pub creator: AccountAddress,
    pub recipient: AccountAddress,
}

/// Emitted when a coupon changes hands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponTransferred {
    pub object: ObjectAddress,
    pub from: AccountAddress,
    pub to: AccountAddress,
}

/// Emitted when a coupon is redeemed and destroyed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponRedeemed {
    pub object: ObjectAddress,
    pub owner: AccountAddress,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CouponEvent {
    Minted(CouponMinted),
    Transferred(CouponTransferred),
    Redeemed(CouponRedeemed),
}

impl CouponEvent {
    pub const MINTED: &'static str = "CouponMinted";
    pub const TRANSFERRED: &'static str = "CouponTransferred";
    pub const REDEEMED: &'static str = "CouponRedeemed";

    /// Struct name of the event within the module.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Minted(_) => Self::MINTED,
            Self::Transferred(_) => Self::TRANSFERRED,
            Self::Redeemed(_) => Self::REDEEMED,
        }
    }

    pub fn object(&self) -> ObjectAddress {
        match self {
            Self::Minted(e) => e.object,
            Self::Transferred(e) => e.object,
            Self::Redeemed(e) => e.object,
        }
    }

    /// Event payload as JSON.
    pub fn data(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            Self::Minted(e) => serde_json::to_value(e),
            Self::Transferred(e) => serde_json::to_value(e),
            Self::Redeemed(e) => serde_json::to_value(e),
        }
    }
}

/// Writes and events produced by one successful call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub writes: Vec<WriteOp>,
    pub events: Vec<CouponEvent>,
}

impl ChangeSet {
    pub fn write(&mut self, op: WriteOp) {
        self.writes.push(op);
    }

    pub fn emit(&mut self, event: CouponEvent) {
        self.events.push(event);
    }
}
