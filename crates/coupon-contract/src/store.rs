//! # Coupon State
//!
//! [`CouponStore`] is the read-only view the contract executes against.
//! [`CouponState`] is the in-memory implementation the node owns; it is
//! the only thing that applies a [`ChangeSet`].

use std::collections::BTreeMap;

use coupon_core::{AccountAddress, ObjectAddress};

use crate::change::{ChangeSet, WriteOp};
use crate::token::{CouponObject, CouponToken};

/// Read access to coupon resources and objects.
pub trait CouponStore {
    /// The `CouponToken` held by `account`, if any.
    fn coupon_of(&self, account: &AccountAddress) -> Option<&CouponToken>;

    /// The object at `address`, if it is a live coupon.
    fn object(&self, address: &ObjectAddress) -> Option<&CouponObject>;
}

/// Ordered in-memory coupon state.
#[derive(Debug, Clone, Default)]
pub struct CouponState {
    tokens: BTreeMap<AccountAddress, CouponToken>,
    objects: BTreeMap<ObjectAddress, CouponObject>,
}

impl CouponState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply every write in `changes`, in order.
    pub fn apply(&mut self, changes: &ChangeSet) {
        for op in &changes.writes {
            match op {
                WriteOp::PutToken { account, token } => {
                    self.tokens.insert(*account, token.clone());
                }
                WriteOp::DeleteToken { account } => {
                    self.tokens.remove(account);
                }
                WriteOp::PutObject { address, object } => {
                    self.objects.insert(*address, object.clone());
                }
                WriteOp::DeleteObject { address } => {
                    self.objects.remove(address);
                }
            }
        }
    }

    /// Objects currently owned by `account`, in address order.
    pub fn objects_owned_by(&self, account: &AccountAddress) -> Vec<(ObjectAddress, &CouponObject)> {
        self.objects
            .iter()
            .filter(|(_, object)| object.owner == *account)
            .map(|(address, object)| (*address, object))
            .collect()
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }
}

impl CouponStore for CouponState {
    fn coupon_of(&self, account: &AccountAddress) -> Option<&CouponToken> {
        self.tokens.get(account)
    }

    fn object(&self, address: &ObjectAddress) -> Option<&CouponObject> {
        self.objects.get(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> AccountAddress {
        AccountAddress::from_hex_literal(s).unwrap()
    }

    fn token(object: ObjectAddress, owner: AccountAddress) -> CouponToken {
        CouponToken {
            object,
            name: "n".into(),
            description: "d".into(),
            latitude: "0".into(),
            longitude: "0".into(),
            sponsor: "s".into(),
            uri: "u".into(),
            owner,
        }
    }

    #[test]
    fn test_apply_puts_and_deletes_in_order() {
        let owner = addr("0x1");
        let object = ObjectAddress::from_hex_literal("0x99").unwrap();
        let mut state = CouponState::new();
        let mut changes = ChangeSet::default();
        changes.write(WriteOp::PutObject {
            address: object,
            object: CouponObject { owner, creator: owner },
        });
        changes.write(WriteOp::PutToken { account: owner, token: token(object, owner) });
        state.apply(&changes);
        assert_eq!(state.coupon_of(&owner).unwrap().object, object);
        assert_eq!(state.objects_owned_by(&owner).len(), 1);

        let mut delete = ChangeSet::default();
        delete.write(WriteOp::DeleteToken { account: owner });
        delete.write(WriteOp::DeleteObject { address: object });
        state.apply(&delete);
        assert!(state.coupon_of(&owner).is_none());
        assert!(state.object(&object).is_none());
        assert_eq!((state.token_count(), state.object_count()), (0, 0));
    }

    #[test]
    fn test_objects_owned_by_filters_owner() {
        let a = addr("0xa");
        let b = addr("0xb");
        let mut state = CouponState::new();
        let mut changes = ChangeSet::default();
        for (i, owner) in [a, b, a].into_iter().enumerate() {
            changes.write(WriteOp::PutObject {
                address: ObjectAddress::new([i as u8 + 1; 32]),
                object: CouponObject { owner, creator: a },
            });
        }
        state.apply(&changes);
        assert_eq!(state.objects_owned_by(&a).len(), 2);
        assert_eq!(state.objects_owned_by(&b).len(), 1);
        assert!(state.objects_owned_by(&addr("0xc")).is_empty());
    }
}
