//! Deposit handlers.
//!
//! A deposit moves the asset into custody (or burns it) and emits the
//! deposit record as response attributes for relayers. Deposits need no
//! signatures.

use cosmwasm_std::{from_json, Addr, CosmosMsg, DepsMut, Env, MessageInfo, Response, Uint128};
use cw20::Cw20ReceiveMsg;
use cw721::Cw721ReceiveMsg;

use common::AssetMode;

use crate::custody::{fungible_custodian, non_fungible_custodian};
use crate::error::ContractError;
use crate::msg::ReceiveMsg;
use crate::state::update_stats;

/// Deposit CW20 tokens through a prior allowance.
#[allow(clippy::too_many_arguments)]
pub fn execute_deposit_fungible(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
    asset: String,
    amount: Uint128,
    recipient: String,
    destination_network: String,
    mintable: bool,
) -> Result<Response, ContractError> {
    ensure_nonzero(amount)?;
    let asset = deps.api.addr_validate(&asset)?;
    let mode = AssetMode::from_mintable(mintable);

    let messages = fungible_custodian(mode, asset.clone()).pull(
        deps.branch(),
        &info.sender,
        &env.contract.address,
        amount,
    )?;

    fungible_deposit_response(
        deps,
        messages,
        "deposit_fungible",
        FungibleDeposit {
            asset: &asset,
            amount,
            depositor: &info.sender,
            recipient,
            destination_network,
            mode,
        },
    )
}

/// Deposit a CW721 token through a prior approval.
#[allow(clippy::too_many_arguments)]
pub fn execute_deposit_non_fungible(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
    asset: String,
    token_id: String,
    recipient: String,
    destination_network: String,
    mintable: bool,
) -> Result<Response, ContractError> {
    let asset = deps.api.addr_validate(&asset)?;
    let mode = AssetMode::from_mintable(mintable);

    let messages = non_fungible_custodian(mode, asset.clone()).pull(
        deps.branch(),
        &info.sender,
        &env.contract.address,
        &token_id,
    )?;

    non_fungible_deposit_response(
        deps,
        messages,
        "deposit_non_fungible",
        NonFungibleDeposit {
            asset: &asset,
            token_id,
            depositor: &info.sender,
            recipient,
            destination_network,
            mode,
        },
    )
}

/// CW20 receive hook. `info.sender` is the token contract.
pub fn execute_receive(
    mut deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    wrapper: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    ensure_nonzero(wrapper.amount)?;
    let ReceiveMsg::Deposit {
        recipient,
        destination_network,
        mintable,
    } = from_json::<ReceiveMsg>(&wrapper.msg)?;
    let depositor = deps.api.addr_validate(&wrapper.sender)?;
    let mode = AssetMode::from_mintable(mintable);

    let messages =
        fungible_custodian(mode, info.sender.clone()).absorb(deps.branch(), wrapper.amount)?;

    fungible_deposit_response(
        deps,
        messages,
        "receive_fungible",
        FungibleDeposit {
            asset: &info.sender,
            amount: wrapper.amount,
            depositor: &depositor,
            recipient,
            destination_network,
            mode,
        },
    )
}

/// CW721 receive hook. `info.sender` is the collection contract.
pub fn execute_receive_nft(
    mut deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    wrapper: Cw721ReceiveMsg,
) -> Result<Response, ContractError> {
    let ReceiveMsg::Deposit {
        recipient,
        destination_network,
        mintable,
    } = from_json::<ReceiveMsg>(&wrapper.msg)?;
    let depositor = deps.api.addr_validate(&wrapper.sender)?;
    let mode = AssetMode::from_mintable(mintable);

    let messages = non_fungible_custodian(mode, info.sender.clone())
        .absorb(deps.branch(), &wrapper.token_id)?;

    non_fungible_deposit_response(
        deps,
        messages,
        "receive_non_fungible",
        NonFungibleDeposit {
            asset: &info.sender,
            token_id: wrapper.token_id,
            depositor: &depositor,
            recipient,
            destination_network,
            mode,
        },
    )
}

// ============================================================================
// Deposit records
// ============================================================================

struct FungibleDeposit<'a> {
    asset: &'a Addr,
    amount: Uint128,
    depositor: &'a Addr,
    recipient: String,
    destination_network: String,
    mode: AssetMode,
}

struct NonFungibleDeposit<'a> {
    asset: &'a Addr,
    token_id: String,
    depositor: &'a Addr,
    recipient: String,
    destination_network: String,
    mode: AssetMode,
}

fn fungible_deposit_response(
    deps: DepsMut,
    messages: Vec<CosmosMsg>,
    method: &str,
    record: FungibleDeposit,
) -> Result<Response, ContractError> {
    update_stats(deps.storage, |s| s.fungible_deposits += 1)?;

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("method", method)
        .add_attribute("asset", record.asset.to_string())
        .add_attribute("amount", record.amount.to_string())
        .add_attribute("depositor", record.depositor.to_string())
        .add_attribute("recipient", record.recipient)
        .add_attribute("destination_network", record.destination_network)
        .add_attribute("mode", record.mode.as_str()))
}

fn non_fungible_deposit_response(
    deps: DepsMut,
    messages: Vec<CosmosMsg>,
    method: &str,
    record: NonFungibleDeposit,
) -> Result<Response, ContractError> {
    update_stats(deps.storage, |s| s.non_fungible_deposits += 1)?;

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("method", method)
        .add_attribute("asset", record.asset.to_string())
        .add_attribute("token_id", record.token_id)
        .add_attribute("depositor", record.depositor.to_string())
        .add_attribute("recipient", record.recipient)
        .add_attribute("destination_network", record.destination_network)
        .add_attribute("mode", record.mode.as_str()))
}

pub(crate) fn ensure_nonzero(amount: Uint128) -> Result<(), ContractError> {
    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "amount must be greater than zero".to_string(),
        });
    }
    Ok(())
}
