//! Asset custody: the value-moving side of deposits and withdrawals.
//!
//! Each asset is handled in one of two modes, selected per call by the
//! signed `mintable` flag:
//! - [`AssetMode::Native`]: deposits lock tokens in the bridge, withdrawals
//!   release them from custody.
//! - [`AssetMode::Wrapped`]: deposits burn the wrapped representation,
//!   withdrawals mint it. The bridge must be the minter of the token contract.
//!
//! Custodians only produce token messages and update custody bookkeeping.
//! The messages run after the handler returns; if any of them fails, the
//! runtime discards the handler's state writes as well.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_json_binary, Addr, CosmosMsg, DepsMut, Empty, StdResult, Uint128, WasmMsg,
};
use cw20::Cw20ExecuteMsg;
use cw721::{Cw721ExecuteMsg, Cw721QueryMsg, OwnerOfResponse};

use common::AssetMode;

use crate::error::ContractError;
use crate::state::{CUSTODIED_NFTS, LOCKED_BALANCES};

// ============================================================================
// Fungible (CW20)
// ============================================================================

/// Custody operations for a CW20 asset.
pub trait FungibleCustody {
    /// Take `amount` from `depositor` through the allowance it granted the bridge.
    fn pull(
        &self,
        deps: DepsMut,
        depositor: &Addr,
        bridge: &Addr,
        amount: Uint128,
    ) -> Result<Vec<CosmosMsg>, ContractError>;

    /// Account for `amount` already transferred to the bridge.
    fn absorb(&self, deps: DepsMut, amount: Uint128) -> Result<Vec<CosmosMsg>, ContractError>;

    /// Deliver `amount` to `recipient`.
    fn pay_out(
        &self,
        deps: DepsMut,
        recipient: &Addr,
        amount: Uint128,
    ) -> Result<Vec<CosmosMsg>, ContractError>;
}

/// Native CW20: lock on deposit, release on withdraw.
pub struct LockRelease {
    pub asset: Addr,
}

/// Wrapped CW20: burn on deposit, mint on withdraw.
pub struct BurnMint {
    pub asset: Addr,
}

pub fn fungible_custodian(mode: AssetMode, asset: Addr) -> Box<dyn FungibleCustody> {
    match mode {
        AssetMode::Native => Box::new(LockRelease { asset }),
        AssetMode::Wrapped => Box::new(BurnMint { asset }),
    }
}

impl LockRelease {
    fn lock(&self, deps: DepsMut, amount: Uint128) -> StdResult<()> {
        LOCKED_BALANCES.update(deps.storage, &self.asset, |locked| -> StdResult<_> {
            Ok(locked.unwrap_or_default().checked_add(amount)?)
        })?;
        Ok(())
    }
}

impl FungibleCustody for LockRelease {
    fn pull(
        &self,
        deps: DepsMut,
        depositor: &Addr,
        bridge: &Addr,
        amount: Uint128,
    ) -> Result<Vec<CosmosMsg>, ContractError> {
        self.lock(deps, amount)?;
        Ok(vec![cw20_execute(
            &self.asset,
            &Cw20ExecuteMsg::TransferFrom {
                owner: depositor.to_string(),
                recipient: bridge.to_string(),
                amount,
            },
        )?])
    }

    fn absorb(&self, deps: DepsMut, amount: Uint128) -> Result<Vec<CosmosMsg>, ContractError> {
        self.lock(deps, amount)?;
        Ok(vec![])
    }

    fn pay_out(
        &self,
        deps: DepsMut,
        recipient: &Addr,
        amount: Uint128,
    ) -> Result<Vec<CosmosMsg>, ContractError> {
        let held = LOCKED_BALANCES
            .may_load(deps.storage, &self.asset)?
            .unwrap_or_default();
        if held < amount {
            return Err(ContractError::InsufficientCustody {
                asset: self.asset.to_string(),
                held,
                requested: amount,
            });
        }
        LOCKED_BALANCES.save(deps.storage, &self.asset, &(held - amount))?;

        Ok(vec![cw20_execute(
            &self.asset,
            &Cw20ExecuteMsg::Transfer {
                recipient: recipient.to_string(),
                amount,
            },
        )?])
    }
}

impl FungibleCustody for BurnMint {
    fn pull(
        &self,
        _deps: DepsMut,
        depositor: &Addr,
        _bridge: &Addr,
        amount: Uint128,
    ) -> Result<Vec<CosmosMsg>, ContractError> {
        Ok(vec![cw20_execute(
            &self.asset,
            &Cw20ExecuteMsg::BurnFrom {
                owner: depositor.to_string(),
                amount,
            },
        )?])
    }

    fn absorb(&self, _deps: DepsMut, amount: Uint128) -> Result<Vec<CosmosMsg>, ContractError> {
        Ok(vec![cw20_execute(&self.asset, &Cw20ExecuteMsg::Burn { amount })?])
    }

    fn pay_out(
        &self,
        _deps: DepsMut,
        recipient: &Addr,
        amount: Uint128,
    ) -> Result<Vec<CosmosMsg>, ContractError> {
        Ok(vec![cw20_execute(
            &self.asset,
            &Cw20ExecuteMsg::Mint {
                recipient: recipient.to_string(),
                amount,
            },
        )?])
    }
}

// ============================================================================
// Non-fungible (CW721)
// ============================================================================

/// Custody operations for a CW721 collection.
pub trait NonFungibleCustody {
    /// Take `token_id` from `depositor`. The depositor must own the token and
    /// have approved the bridge for it.
    fn pull(
        &self,
        deps: DepsMut,
        depositor: &Addr,
        bridge: &Addr,
        token_id: &str,
    ) -> Result<Vec<CosmosMsg>, ContractError>;

    /// Account for a token already transferred to the bridge.
    fn absorb(&self, deps: DepsMut, token_id: &str) -> Result<Vec<CosmosMsg>, ContractError>;

    /// Deliver `token_id` to `recipient`.
    fn pay_out(
        &self,
        deps: DepsMut,
        recipient: &Addr,
        token_id: &str,
        token_uri: &str,
    ) -> Result<Vec<CosmosMsg>, ContractError>;
}

/// Native CW721: custody transfer in both directions.
pub struct CustodyTransfer {
    pub asset: Addr,
}

/// Wrapped CW721: burn on deposit, mint on withdraw.
pub struct NftBurnMint {
    pub asset: Addr,
}

pub fn non_fungible_custodian(mode: AssetMode, asset: Addr) -> Box<dyn NonFungibleCustody> {
    match mode {
        AssetMode::Native => Box::new(CustodyTransfer { asset }),
        AssetMode::Wrapped => Box::new(NftBurnMint { asset }),
    }
}

/// Mint message understood by cw721-base collections.
#[cw_serde]
enum WrappedNftExecuteMsg {
    Mint {
        token_id: String,
        owner: String,
        token_uri: Option<String>,
        extension: Option<Empty>,
    },
}

impl CustodyTransfer {
    fn take_into_custody(&self, deps: DepsMut, token_id: &str) -> Result<(), ContractError> {
        let key = (&self.asset, token_id);
        if CUSTODIED_NFTS.has(deps.storage, key) {
            return Err(ContractError::AssetStateMismatch {
                asset: self.asset.to_string(),
                token_id: token_id.to_string(),
                reason: "token already held in custody".to_string(),
            });
        }
        CUSTODIED_NFTS.save(deps.storage, key, &true)?;
        Ok(())
    }
}

impl NonFungibleCustody for CustodyTransfer {
    fn pull(
        &self,
        mut deps: DepsMut,
        depositor: &Addr,
        bridge: &Addr,
        token_id: &str,
    ) -> Result<Vec<CosmosMsg>, ContractError> {
        ensure_token_owner(&deps, &self.asset, depositor, token_id)?;
        self.take_into_custody(deps.branch(), token_id)?;

        Ok(vec![cw721_execute(
            &self.asset,
            &Cw721ExecuteMsg::TransferNft {
                recipient: bridge.to_string(),
                token_id: token_id.to_string(),
            },
        )?])
    }

    fn absorb(&self, deps: DepsMut, token_id: &str) -> Result<Vec<CosmosMsg>, ContractError> {
        self.take_into_custody(deps, token_id)?;
        Ok(vec![])
    }

    fn pay_out(
        &self,
        deps: DepsMut,
        recipient: &Addr,
        token_id: &str,
        _token_uri: &str,
    ) -> Result<Vec<CosmosMsg>, ContractError> {
        let key = (&self.asset, token_id);
        if !CUSTODIED_NFTS.has(deps.storage, key) {
            return Err(ContractError::TokenNotInCustody {
                asset: self.asset.to_string(),
                token_id: token_id.to_string(),
            });
        }
        CUSTODIED_NFTS.remove(deps.storage, key);

        Ok(vec![cw721_execute(
            &self.asset,
            &Cw721ExecuteMsg::TransferNft {
                recipient: recipient.to_string(),
                token_id: token_id.to_string(),
            },
        )?])
    }
}

impl NonFungibleCustody for NftBurnMint {
    fn pull(
        &self,
        deps: DepsMut,
        depositor: &Addr,
        _bridge: &Addr,
        token_id: &str,
    ) -> Result<Vec<CosmosMsg>, ContractError> {
        ensure_token_owner(&deps, &self.asset, depositor, token_id)?;
        Ok(vec![cw721_execute(
            &self.asset,
            &Cw721ExecuteMsg::Burn {
                token_id: token_id.to_string(),
            },
        )?])
    }

    fn absorb(&self, _deps: DepsMut, token_id: &str) -> Result<Vec<CosmosMsg>, ContractError> {
        Ok(vec![cw721_execute(
            &self.asset,
            &Cw721ExecuteMsg::Burn {
                token_id: token_id.to_string(),
            },
        )?])
    }

    fn pay_out(
        &self,
        deps: DepsMut,
        recipient: &Addr,
        token_id: &str,
        token_uri: &str,
    ) -> Result<Vec<CosmosMsg>, ContractError> {
        if query_token_owner(&deps, &self.asset, token_id).is_some() {
            return Err(ContractError::AssetStateMismatch {
                asset: self.asset.to_string(),
                token_id: token_id.to_string(),
                reason: "token already exists".to_string(),
            });
        }

        let msg = WrappedNftExecuteMsg::Mint {
            token_id: token_id.to_string(),
            owner: recipient.to_string(),
            token_uri: (!token_uri.is_empty()).then(|| token_uri.to_string()),
            extension: None,
        };
        Ok(vec![CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: self.asset.to_string(),
            msg: to_json_binary(&msg)?,
            funds: vec![],
        })])
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn cw20_execute(asset: &Addr, msg: &Cw20ExecuteMsg) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: asset.to_string(),
        msg: to_json_binary(msg)?,
        funds: vec![],
    }))
}

fn cw721_execute(asset: &Addr, msg: &Cw721ExecuteMsg) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: asset.to_string(),
        msg: to_json_binary(msg)?,
        funds: vec![],
    }))
}

/// Current owner of a token, or `None` if the collection does not know it.
fn query_token_owner(deps: &DepsMut, asset: &Addr, token_id: &str) -> Option<String> {
    deps.querier
        .query_wasm_smart::<OwnerOfResponse>(
            asset.to_string(),
            &Cw721QueryMsg::OwnerOf {
                token_id: token_id.to_string(),
                include_expired: None,
            },
        )
        .ok()
        .map(|res| res.owner)
}

fn ensure_token_owner(
    deps: &DepsMut,
    asset: &Addr,
    depositor: &Addr,
    token_id: &str,
) -> Result<(), ContractError> {
    let owner = query_token_owner(deps, asset, token_id).ok_or_else(|| {
        ContractError::AssetStateMismatch {
            asset: asset.to_string(),
            token_id: token_id.to_string(),
            reason: "token does not exist".to_string(),
        }
    })?;
    if owner != depositor.as_str() {
        return Err(ContractError::NotTokenOwner {
            caller: depositor.to_string(),
            token_id: token_id.to_string(),
        });
    }
    Ok(())
}
