//! # coupon-contract: The cryptomilan Coupon Module
//!
//! The coupon token state machine, published on the ledger as
//! `<module_address>::cryptomilan`:
//!
//! - [`token`]: the `CouponToken` resource, coupon objects, object address
//!   derivation.
//! - [`call`]: decoding entry-function payloads into typed calls.
//! - [`execute`]: the pure state transition producing a change set.
//! - [`change`]: write operations and emitted events.
//! - [`store`]: the store trait and the in-memory state the node owns.
//! - [`error`]: abort codes.
//!
//! ## Crate Policy
//!
//! - Execution never mutates state. Callers apply the returned
//!   [`ChangeSet`] only when execution succeeds.
//! - No I/O, no clocks, no randomness. Identical inputs give identical
//!   change sets.

pub mod call;
pub mod change;
pub mod error;
pub mod execute;
pub mod store;
pub mod token;

pub use call::{CouponCall, MintArgs, MINT_TOKEN_TRANSFER, REDEEM_TOKEN, TRANSFER_TOKEN};
pub use change::{ChangeSet, CouponEvent, CouponMinted, CouponRedeemed, CouponTransferred, WriteOp};
pub use error::{
    CouponError, ECOUPON_ALREADY_HELD, ECOUPON_NOT_FOUND, ENOT_OWNER, ESENDER_MISMATCH,
};
pub use execute::{execute, ExecutionContext};
pub use store::{CouponState, CouponStore};
pub use token::{derive_object_address, CouponObject, CouponToken, COUPON_TOKEN, MODULE_NAME};
