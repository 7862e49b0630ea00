//! Typed client for the `cryptomilan` coupon module.
//!
//! Builds the three entry-function payloads, reads `CouponToken`
//! resources, and recovers a minted coupon's object address from the
//! `CouponMinted` event of the mint transaction.
//!
//! | Function | Arguments |
//! |---|---|
//! | `mint_token_transfer` | name, description, latitude, longitude, sponsor, uri, recipient |
//! | `transfer_token` | from, to, object |
//! | `redeem_token` | owner, object |

use coupon_contract::{CouponCall, CouponEvent, CouponMinted, CouponToken, MintArgs, COUPON_TOKEN};
use coupon_core::{AccountAddress, EntryFunctionPayload, ModuleId, ObjectAddress, StructTag};

use crate::account::LocalAccount;
use crate::error::LedgerClientError;
use crate::types::UserTransaction;
use crate::LedgerClient;

/// Sub-client for the coupon module, borrowed from a [`LedgerClient`].
#[derive(Debug, Clone)]
pub struct CouponClient<'a> {
    client: &'a LedgerClient,
    module: ModuleId,
}

impl<'a> CouponClient<'a> {
    pub(crate) fn new(client: &'a LedgerClient) -> Self {
        Self {
            client,
            module: client.config().module_id(),
        }
    }

    pub fn module(&self) -> &ModuleId {
        &self.module
    }

    /// `<module>::CouponToken`.
    pub fn token_type(&self) -> StructTag {
        StructTag {
            module: self.module.clone(),
            name: COUPON_TOKEN.to_string(),
        }
    }

    pub fn mint_payload(&self, args: &MintArgs) -> Result<EntryFunctionPayload, LedgerClientError> {
        self.payload(CouponCall::MintTokenTransfer(args.clone()))
    }

    pub fn transfer_payload(
        &self,
        from: &AccountAddress,
        to: &AccountAddress,
        object: &ObjectAddress,
    ) -> Result<EntryFunctionPayload, LedgerClientError> {
        self.payload(CouponCall::TransferToken {
            from: *from,
            to: *to,
            object: *object,
        })
    }

    pub fn redeem_payload(
        &self,
        owner: &AccountAddress,
        object: &ObjectAddress,
    ) -> Result<EntryFunctionPayload, LedgerClientError> {
        self.payload(CouponCall::RedeemToken {
            owner: *owner,
            object: *object,
        })
    }

    fn payload(&self, call: CouponCall) -> Result<EntryFunctionPayload, LedgerClientError> {
        Ok(call.to_payload(&self.module)?)
    }

    /// The `CouponToken` held by `owner`.
    ///
    /// Fails with [`LedgerClientError::ResourceNotFound`] when `owner` holds
    /// none.
    pub async fn get_token(&self, owner: &AccountAddress) -> Result<CouponToken, LedgerClientError> {
        let resource = self
            .client
            .get_account_resource(owner, &self.token_type())
            .await?;
        serde_json::from_value(resource.data).map_err(|e| LedgerClientError::Deserialization {
            endpoint: resource.resource_type,
            reason: e.to_string(),
        })
    }

    /// The object address minted by `txn`, taken from its `CouponMinted`
    /// event.
    pub fn minted_object(&self, txn: &UserTransaction) -> Result<ObjectAddress, LedgerClientError> {
        let event_type = format!("{}::{}", self.module, CouponEvent::MINTED);
        let event = txn
            .events
            .iter()
            .find(|e| e.event_type == event_type)
            .ok_or_else(|| LedgerClientError::MissingEvent {
                hash: txn.hash.to_hex(),
                event_type: event_type.clone(),
            })?;
        let minted: CouponMinted =
            serde_json::from_value(event.data.clone()).map_err(|e| {
                LedgerClientError::Deserialization {
                    endpoint: event_type,
                    reason: e.to_string(),
                }
            })?;
        Ok(minted.object)
    }

    /// Mint a coupon to `args.recipient` and return its object address.
    pub async fn mint(
        &self,
        creator: &LocalAccount,
        args: &MintArgs,
    ) -> Result<ObjectAddress, LedgerClientError> {
        let txn = self
            .client
            .submit_and_wait(creator, self.mint_payload(args)?)
            .await?;
        self.minted_object(&txn)
    }

    /// Transfer `object` from `owner` to `to`.
    pub async fn transfer(
        &self,
        owner: &LocalAccount,
        to: &AccountAddress,
        object: &ObjectAddress,
    ) -> Result<UserTransaction, LedgerClientError> {
        let payload = self.transfer_payload(&owner.address(), to, object)?;
        self.client.submit_and_wait(owner, payload).await
    }

    /// Redeem (destroy) `object` held by `owner`.
    pub async fn redeem(
        &self,
        owner: &LocalAccount,
        object: &ObjectAddress,
    ) -> Result<UserTransaction, LedgerClientError> {
        let payload = self.redeem_payload(&owner.address(), object)?;
        self.client.submit_and_wait(owner, payload).await
    }
}
