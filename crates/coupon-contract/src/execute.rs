//! # Contract Execution
//!
//! `execute` is a pure function of the current state, the signer, and the
//! decoded call. It either aborts with a [`CouponError`] or returns the
//! [`ChangeSet`] that performs the transition:
//!
//! ```text
//! mint_token_transfer:  Nonexistent   -> Owned(recipient)
//! transfer_token:       Owned(from)   -> Owned(to)
//! redeem_token:         Owned(owner)  -> Nonexistent
//! ```

use coupon_core::{AccountAddress, ObjectAddress};

use crate::call::{CouponCall, MintArgs};
use crate::change::{ChangeSet, CouponEvent, CouponMinted, CouponRedeemed, CouponTransferred, WriteOp};
use crate::error::CouponError;
use crate::store::CouponStore;
use crate::token::{derive_object_address, CouponObject, CouponToken};

/// Who is calling, and with which sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionContext {
    pub sender: AccountAddress,
    pub sequence_number: u64,
}

/// Execute `call` against `store` on behalf of `ctx.sender`.
pub fn execute(
    store: &impl CouponStore,
    ctx: &ExecutionContext,
    call: &CouponCall,
) -> Result<ChangeSet, CouponError> {
    match call {
        CouponCall::MintTokenTransfer(args) => mint_token_transfer(store, ctx, args),
        CouponCall::TransferToken { from, to, object } => {
            transfer_token(store, ctx, *from, *to, *object)
        }
        CouponCall::RedeemToken { owner, object } => redeem_token(store, ctx, *owner, *object),
    }
}

fn mint_token_transfer(
    store: &impl CouponStore,
    ctx: &ExecutionContext,
    args: &MintArgs,
) -> Result<ChangeSet, CouponError> {
    if store.coupon_of(&args.recipient).is_some() {
        return Err(CouponError::AlreadyHeld(args.recipient));
    }
    let object = derive_object_address(&ctx.sender, ctx.sequence_number);
    let token = CouponToken {
        object,
        name: args.name.clone(),
        description: args.description.clone(),
        latitude: args.latitude.clone(),
        longitude: args.longitude.clone(),
        sponsor: args.sponsor.clone(),
        uri: args.uri.clone(),
        owner: args.recipient,
    };

    let mut changes = ChangeSet::default();
    changes.write(WriteOp::PutObject {
        address: object,
        object: CouponObject {
            owner: args.recipient,
            creator: ctx.sender,
        },
    });
    changes.write(WriteOp::PutToken {
        account: args.recipient,
        token,
    });
    changes.emit(CouponEvent::Minted(CouponMinted {
        object,
        creator: ctx.sender,
        recipient: args.recipient,
    }));
    Ok(changes)
}

fn transfer_token(
    store: &impl CouponStore,
    ctx: &ExecutionContext,
    from: AccountAddress,
    to: AccountAddress,
    object: ObjectAddress,
) -> Result<ChangeSet, CouponError> {
    require_signer(ctx, from)?;
    let token = owned_coupon(store, from, object)?;
    if store.coupon_of(&to).is_some() || to == from {
        return Err(CouponError::AlreadyHeld(to));
    }
    let creator = store
        .object(&object)
        .map(|o| o.creator)
        .ok_or(CouponError::CouponNotFound(object))?;

    let mut moved = token.clone();
    moved.owner = to;

    let mut changes = ChangeSet::default();
    changes.write(WriteOp::DeleteToken { account: from });
    changes.write(WriteOp::PutToken {
        account: to,
        token: moved,
    });
    changes.write(WriteOp::PutObject {
        address: object,
        object: CouponObject { owner: to, creator },
    });
    changes.emit(CouponEvent::Transferred(CouponTransferred { object, from, to }));
    Ok(changes)
}

fn redeem_token(
    store: &impl CouponStore,
    ctx: &ExecutionContext,
    owner: AccountAddress,
    object: ObjectAddress,
) -> Result<ChangeSet, CouponError> {
    require_signer(ctx, owner)?;
    owned_coupon(store, owner, object)?;

    let mut changes = ChangeSet::default();
    changes.write(WriteOp::DeleteToken { account: owner });
    changes.write(WriteOp::DeleteObject { address: object });
    changes.emit(CouponEvent::Redeemed(CouponRedeemed { object, owner }));
    Ok(changes)
}

fn require_signer(ctx: &ExecutionContext, argument: AccountAddress) -> Result<(), CouponError> {
    if argument != ctx.sender {
        return Err(CouponError::SenderMismatch {
            signer: ctx.sender,
            argument,
        });
    }
    Ok(())
}

/// The coupon `claimed` holds for `object`, checking object existence first.
fn owned_coupon<'s>(
    store: &'s impl CouponStore,
    claimed: AccountAddress,
    object: ObjectAddress,
) -> Result<&'s CouponToken, CouponError> {
    let record = store
        .object(&object)
        .ok_or(CouponError::CouponNotFound(object))?;
    if record.owner != claimed {
        return Err(CouponError::NotOwner { object, claimed });
    }
    match store.coupon_of(&claimed) {
        Some(token) if token.object == object => Ok(token),
        _ => Err(CouponError::CouponNotFound(object)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CouponState;
    use proptest::prelude::*;

    fn addr(s: &str) -> AccountAddress {
        AccountAddress::from_hex_literal(s).unwrap()
    }

    fn admin() -> AccountAddress {
        addr("0xad")
    }

    fn user1() -> AccountAddress {
        addr("0x11")
    }

    fn user2() -> AccountAddress {
        addr("0x22")
    }

    fn ctx(sender: AccountAddress, sequence_number: u64) -> ExecutionContext {
        ExecutionContext {
            sender,
            sequence_number,
        }
    }

    fn mint_args(recipient: AccountAddress) -> MintArgs {
        MintArgs {
            name: "Test Token".into(),
            description: "Test Description".into(),
            latitude: "45.4642".into(),
            longitude: "9.1900".into(),
            sponsor: "Test Sponsor".into(),
            uri: "ipfs://test".into(),
            recipient,
        }
    }

    /// Mint to `recipient` and return the object address.
    fn minted(state: &mut CouponState, recipient: AccountAddress, seq: u64) -> ObjectAddress {
        let changes = execute(
            &*state,
            &ctx(admin(), seq),
            &CouponCall::MintTokenTransfer(mint_args(recipient)),
        )
        .unwrap();
        state.apply(&changes);
        changes.events[0].object()
    }

    #[test]
    fn test_mint_places_token_and_object() {
        let mut state = CouponState::new();
        let object = minted(&mut state, user1(), 0);
        let token = state.coupon_of(&user1()).unwrap();
        assert_eq!(token.object, object);
        assert_eq!(token.owner, user1());
        assert_eq!(token.name, "Test Token");
        assert_eq!(state.object(&object).unwrap().creator, admin());
    }

    #[test]
    fn test_mint_to_holder_aborts() {
        let mut state = CouponState::new();
        minted(&mut state, user1(), 0);
        let err = execute(
            &state,
            &ctx(admin(), 1),
            &CouponCall::MintTokenTransfer(mint_args(user1())),
        )
        .unwrap_err();
        assert_eq!(err, CouponError::AlreadyHeld(user1()));
    }

    #[test]
    fn test_transfer_moves_resource_and_object() {
        let mut state = CouponState::new();
        let object = minted(&mut state, user1(), 0);
        let changes = execute(
            &state,
            &ctx(user1(), 0),
            &CouponCall::TransferToken {
                from: user1(),
                to: user2(),
                object,
            },
        )
        .unwrap();
        state.apply(&changes);
        assert!(state.coupon_of(&user1()).is_none());
        assert_eq!(state.coupon_of(&user2()).unwrap().owner, user2());
        assert_eq!(state.object(&object).unwrap().owner, user2());
        assert_eq!(changes.events[0].type_name(), CouponEvent::TRANSFERRED);
    }

    #[test]
    fn test_transfer_by_non_owner_aborts() {
        let mut state = CouponState::new();
        let object = minted(&mut state, user1(), 0);
        let err = execute(
            &state,
            &ctx(user2(), 0),
            &CouponCall::TransferToken {
                from: user2(),
                to: admin(),
                object,
            },
        )
        .unwrap_err();
        assert_eq!(err.abort_code(), Some(crate::error::ENOT_OWNER));
    }

    #[test]
    fn test_transfer_on_behalf_of_owner_is_sender_mismatch() {
        let mut state = CouponState::new();
        let object = minted(&mut state, user1(), 0);
        let err = execute(
            &state,
            &ctx(user2(), 0),
            &CouponCall::TransferToken {
                from: user1(),
                to: user2(),
                object,
            },
        )
        .unwrap_err();
        assert_eq!(err.abort_code(), Some(crate::error::ESENDER_MISMATCH));
    }

    #[test]
    fn test_transfer_to_self_aborts() {
        let mut state = CouponState::new();
        let object = minted(&mut state, user1(), 0);
        let err = execute(
            &state,
            &ctx(user1(), 0),
            &CouponCall::TransferToken {
                from: user1(),
                to: user1(),
                object,
            },
        )
        .unwrap_err();
        assert_eq!(err, CouponError::AlreadyHeld(user1()));
    }

    #[test]
    fn test_redeem_deletes_everything() {
        let mut state = CouponState::new();
        let object = minted(&mut state, user1(), 0);
        let changes = execute(
            &state,
            &ctx(user1(), 0),
            &CouponCall::RedeemToken {
                owner: user1(),
                object,
            },
        )
        .unwrap();
        state.apply(&changes);
        assert!(state.coupon_of(&user1()).is_none());
        assert!(state.object(&object).is_none());
        assert_eq!((state.token_count(), state.object_count()), (0, 0));
    }

    #[test]
    fn test_redeem_placeholder_object_is_not_found() {
        let mut state = CouponState::new();
        minted(&mut state, user1(), 0);
        let placeholder = ObjectAddress::from_hex_literal("0x1").unwrap();
        let err = execute(
            &state,
            &ctx(user1(), 0),
            &CouponCall::RedeemToken {
                owner: user1(),
                object: placeholder,
            },
        )
        .unwrap_err();
        assert_eq!(err, CouponError::CouponNotFound(placeholder));
    }

    #[test]
    fn test_redeem_twice_is_not_found() {
        let mut state = CouponState::new();
        let object = minted(&mut state, user1(), 0);
        let call = CouponCall::RedeemToken {
            owner: user1(),
            object,
        };
        let changes = execute(&state, &ctx(user1(), 0), &call).unwrap();
        state.apply(&changes);
        let err = execute(&state, &ctx(user1(), 1), &call).unwrap_err();
        assert_eq!(err.abort_code(), Some(crate::error::ECOUPON_NOT_FOUND));
    }

    #[test]
    fn test_aborted_call_produces_no_writes() {
        let mut state = CouponState::new();
        let object = minted(&mut state, user1(), 0);
        let before = (state.token_count(), state.object_count());
        let result = execute(
            &state,
            &ctx(user2(), 0),
            &CouponCall::RedeemToken {
                owner: user2(),
                object,
            },
        );
        assert!(result.is_err());
        assert_eq!((state.token_count(), state.object_count()), before);
        assert_eq!(state.coupon_of(&user1()).unwrap().object, object);
    }

    proptest! {
        #[test]
        fn prop_mint_then_query_returns_inputs(
            name in ".*",
            description in ".*",
            latitude in "-?[0-9]{1,3}\\.[0-9]{1,6}",
            longitude in "-?[0-9]{1,3}\\.[0-9]{1,6}",
            sponsor in ".*",
            uri in "[a-z]+://[ -~]*",
            recipient in any::<[u8; 32]>(),
            seq in any::<u64>(),
        ) {
            let recipient = AccountAddress::new(recipient);
            let args = MintArgs {
                name, description, latitude, longitude, sponsor, uri, recipient,
            };
            let mut state = CouponState::new();
            let changes = execute(
                &state,
                &ctx(admin(), seq),
                &CouponCall::MintTokenTransfer(args.clone()),
            ).unwrap();
            state.apply(&changes);

            let token = state.coupon_of(&recipient).unwrap();
            prop_assert_eq!(&token.name, &args.name);
            prop_assert_eq!(&token.description, &args.description);
            prop_assert_eq!(&token.latitude, &args.latitude);
            prop_assert_eq!(&token.longitude, &args.longitude);
            prop_assert_eq!(&token.sponsor, &args.sponsor);
            prop_assert_eq!(&token.uri, &args.uri);
            prop_assert_eq!(token.owner, recipient);
            let owned = state.objects_owned_by(&recipient);
            prop_assert_eq!(owned.len(), 1);
            prop_assert_eq!(owned[0].0, token.object);
        }

        #[test]
        fn prop_mint_then_redeem_leaves_nothing(recipient in any::<[u8; 32]>(), seq in any::<u64>()) {
            let recipient = AccountAddress::new(recipient);
            let mut state = CouponState::new();
            let mint = execute(
                &state,
                &ctx(admin(), seq),
                &CouponCall::MintTokenTransfer(mint_args(recipient)),
            ).unwrap();
            state.apply(&mint);
            let object = mint.events[0].object();
            let redeem = execute(
                &state,
                &ctx(recipient, 0),
                &CouponCall::RedeemToken { owner: recipient, object },
            ).unwrap();
            state.apply(&redeem);
            prop_assert!(state.coupon_of(&recipient).is_none());
            prop_assert!(state.objects_owned_by(&recipient).is_empty());
            prop_assert_eq!(state.object_count(), 0);
        }
    }
}
