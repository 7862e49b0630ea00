//! # coupon-core: Foundational Types for the Coupon Ledger
//!
//! Defines the type-system primitives shared by the contract, the node, the
//! client, and the CLI. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for addresses.** `AccountAddress`, `ObjectAddress`
//!    and `TransactionHash` are distinct types. You cannot pass an object
//!    address where an account is expected.
//!
//! 2. **`CanonicalBytes` newtype.** Every byte sequence that gets hashed or
//!    signed flows through `CanonicalBytes::new()` (RFC 8785 JCS).
//!
//! 3. **Typed function and resource paths.** `FunctionId` and `StructTag`
//!    parse the `<address>::<module>::<name>` form once, at the boundary.
//!
//! 4. **Signing messages are constructed, not assembled.** The only way to
//!    obtain a `SigningMessage` is `RawTransaction::signing_message()`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `coupon-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod identity;
pub mod path;
pub mod transaction;

pub use canonical::CanonicalBytes;
pub use digest::{sha256, sha256_canonical};
pub use error::{CanonicalizationError, CoreError, CryptoError};
pub use identity::{AccountAddress, ObjectAddress, TransactionHash};
pub use path::{FunctionId, ModuleId, StructTag};
pub use transaction::{EntryFunctionPayload, RawTransaction, SigningMessage};
