//! # coupon-cli: Coupon Ledger Command-Line Interface
//!
//! Thin wrappers over [`coupon_client::LedgerClient`]. Every command prints
//! one JSON document on stdout; logs go to stderr.
//!
//! ## Subcommands
//!
//! - `keygen`: generate an account key (printed once, never stored)
//! - `fund`: credit an account through the node faucet
//! - `account`: sequence number and balance
//! - `mint` / `transfer` / `redeem`: coupon lifecycle transactions
//! - `resource` / `objects`: state queries
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in the per-area modules, dispatch in `main.rs`.
//! - Handlers delegate to `coupon-client`; no ledger logic here.
//! - Signing keys arrive as hex seeds via `--key-hex` or `COUPON_KEY_HEX`.

pub mod account;
pub mod coupon;
pub mod query;

use anyhow::Context;
use coupon_client::LocalAccount;
use coupon_core::{AccountAddress, ObjectAddress};

/// Restore the signing account from a hex seed.
pub fn signer_from_hex(key_hex: &str) -> anyhow::Result<LocalAccount> {
    LocalAccount::from_seed_hex(key_hex).context("invalid --key-hex")
}

pub(crate) fn parse_address(flag: &str, input: &str) -> anyhow::Result<AccountAddress> {
    AccountAddress::from_hex_literal(input).with_context(|| format!("invalid {flag}"))
}

pub(crate) fn parse_object(flag: &str, input: &str) -> anyhow::Result<ObjectAddress> {
    ObjectAddress::from_hex_literal(input).with_context(|| format!("invalid {flag}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signer_from_hex_rejects_short_seed() {
        let err = signer_from_hex("0x1234").unwrap_err();
        assert!(err.to_string().contains("--key-hex"));
    }

    #[test]
    fn parse_address_names_the_flag() {
        let err = parse_address("--to", "0xzz").unwrap_err();
        assert_eq!(err.to_string(), "invalid --to");
        assert_eq!(
            parse_address("--to", "0x1").unwrap(),
            AccountAddress::from_hex_literal("0x1").unwrap()
        );
    }
}
