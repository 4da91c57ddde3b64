//! Withdrawal handlers.
//!
//! A withdrawal settles in one call:
//! 1. Recompute the sign hash from the submitted parameters and the chain id
//! 2. Recover signers and check quorum against the current signer set
//! 3. Consume the settlement key (source tx hash, nonce)
//! 4. Release or mint through the asset custodian
//!
//! Failure at any step rejects the call and leaves no trace in state.

use cosmwasm_std::{Binary, DepsMut, Env, MessageInfo, Response, Uint128};

use common::AssetMode;

use super::deposit::ensure_nonzero;
use crate::custody::{fungible_custodian, non_fungible_custodian};
use crate::error::ContractError;
use crate::hash::{
    bytes32_to_hex, fungible_sign_hash, non_fungible_sign_hash, FungibleSignParams,
    NonFungibleSignParams,
};
use crate::state::{mark_settled, update_stats};
use crate::verify::verify_quorum;

/// Release or mint CW20 tokens authorized by a quorum of signers.
#[allow(clippy::too_many_arguments)]
pub fn execute_withdraw_fungible(
    mut deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    asset: String,
    amount: Uint128,
    recipient: String,
    source_tx_hash: Binary,
    nonce: u64,
    mintable: bool,
    signatures: Vec<Binary>,
) -> Result<Response, ContractError> {
    ensure_nonzero(amount)?;
    let asset = deps.api.addr_validate(&asset)?;
    let recipient = deps.api.addr_validate(&recipient)?;
    let tx_hash = parse_source_tx_hash(&source_tx_hash)?;

    let sign_hash = fungible_sign_hash(&FungibleSignParams {
        asset: asset.as_str(),
        amount: amount.u128(),
        recipient: recipient.as_str(),
        source_tx_hash: &tx_hash,
        nonce,
        chain_id: &env.block.chain_id,
        mintable,
    });

    let approvers = verify_quorum(deps.api, deps.storage, &sign_hash, &signatures)?;
    mark_settled(deps.storage, &tx_hash, nonce)?;

    let mode = AssetMode::from_mintable(mintable);
    let messages =
        fungible_custodian(mode, asset.clone()).pay_out(deps.branch(), &recipient, amount)?;

    update_stats(deps.storage, |s| s.fungible_withdrawals += 1)?;

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("method", "withdraw_fungible")
        .add_attribute("asset", asset.to_string())
        .add_attribute("amount", amount.to_string())
        .add_attribute("recipient", recipient.to_string())
        .add_attribute("source_tx_hash", bytes32_to_hex(&tx_hash))
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("mode", mode.as_str())
        .add_attribute("sign_hash", bytes32_to_hex(&sign_hash))
        .add_attribute("approvals", approvers.len().to_string()))
}

/// Release or mint a CW721 token authorized by a quorum of signers.
#[allow(clippy::too_many_arguments)]
pub fn execute_withdraw_non_fungible(
    mut deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    asset: String,
    token_id: String,
    recipient: String,
    source_tx_hash: Binary,
    nonce: u64,
    token_uri: String,
    mintable: bool,
    signatures: Vec<Binary>,
) -> Result<Response, ContractError> {
    let asset = deps.api.addr_validate(&asset)?;
    let recipient = deps.api.addr_validate(&recipient)?;
    let tx_hash = parse_source_tx_hash(&source_tx_hash)?;

    let sign_hash = non_fungible_sign_hash(&NonFungibleSignParams {
        asset: asset.as_str(),
        token_id: &token_id,
        recipient: recipient.as_str(),
        source_tx_hash: &tx_hash,
        nonce,
        chain_id: &env.block.chain_id,
        token_uri: &token_uri,
        mintable,
    });

    let approvers = verify_quorum(deps.api, deps.storage, &sign_hash, &signatures)?;
    mark_settled(deps.storage, &tx_hash, nonce)?;

    let mode = AssetMode::from_mintable(mintable);
    let messages = non_fungible_custodian(mode, asset.clone()).pay_out(
        deps.branch(),
        &recipient,
        &token_id,
        &token_uri,
    )?;

    update_stats(deps.storage, |s| s.non_fungible_withdrawals += 1)?;

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("method", "withdraw_non_fungible")
        .add_attribute("asset", asset.to_string())
        .add_attribute("token_id", token_id)
        .add_attribute("recipient", recipient.to_string())
        .add_attribute("source_tx_hash", bytes32_to_hex(&tx_hash))
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("mode", mode.as_str())
        .add_attribute("sign_hash", bytes32_to_hex(&sign_hash))
        .add_attribute("approvals", approvers.len().to_string()))
}

pub(crate) fn parse_source_tx_hash(source_tx_hash: &Binary) -> Result<[u8; 32], ContractError> {
    source_tx_hash
        .to_vec()
        .try_into()
        .map_err(|_| ContractError::InvalidHashLength {
            got: source_tx_hash.len(),
        })
}
