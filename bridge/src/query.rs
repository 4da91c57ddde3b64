//! Query handlers for the custody bridge contract.

use cosmwasm_std::{Binary, Deps, Env, StdError, StdResult, Uint128};

use crate::execute::{parse_signer, parse_source_tx_hash};
use crate::hash::{
    fungible_sign_hash, non_fungible_sign_hash, personal_message_hash, FungibleSignParams,
    NonFungibleSignParams,
};
use crate::msg::{
    ConfigResponse, IsCustodiedResponse, IsSettledResponse, IsSignerResponse,
    LockedBalanceResponse, PendingOwnerResponse, SignHashResponse, SignersResponse,
    StatsResponse,
};
use crate::state::{
    is_settled, is_signer, load_signers, signer_count, CONFIG, CUSTODIED_NFTS, LOCKED_BALANCES,
    PENDING_OWNER, STATS,
};

// ============================================================================
// Configuration & Signers
// ============================================================================

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        owner: config.owner,
        threshold: config.threshold,
        signer_count: signer_count(deps.storage)?,
    })
}

pub fn query_signers(deps: Deps) -> StdResult<SignersResponse> {
    let config = CONFIG.load(deps.storage)?;
    let signers = load_signers(deps.storage)?
        .iter()
        .map(|s| s.to_hex())
        .collect();
    Ok(SignersResponse {
        signers,
        threshold: config.threshold,
    })
}

pub fn query_is_signer(deps: Deps, signer: String) -> StdResult<IsSignerResponse> {
    let signer = parse_signer(&signer).map_err(|e| StdError::generic_err(e.to_string()))?;
    Ok(IsSignerResponse {
        is_signer: is_signer(deps.storage, &signer),
    })
}

pub fn query_pending_owner(deps: Deps) -> StdResult<Option<PendingOwnerResponse>> {
    Ok(PENDING_OWNER
        .may_load(deps.storage)?
        .map(|new_owner| PendingOwnerResponse { new_owner }))
}

pub fn query_stats(deps: Deps) -> StdResult<StatsResponse> {
    let stats = STATS.may_load(deps.storage)?.unwrap_or_default();
    Ok(StatsResponse {
        fungible_deposits: stats.fungible_deposits,
        non_fungible_deposits: stats.non_fungible_deposits,
        fungible_withdrawals: stats.fungible_withdrawals,
        non_fungible_withdrawals: stats.non_fungible_withdrawals,
    })
}

// ============================================================================
// Settlement & Custody
// ============================================================================

pub fn query_is_settled(
    deps: Deps,
    source_tx_hash: Binary,
    nonce: u64,
) -> StdResult<IsSettledResponse> {
    let tx_hash = parse_tx_hash(&source_tx_hash)?;
    Ok(IsSettledResponse {
        settled: is_settled(deps.storage, &tx_hash, nonce),
    })
}

pub fn query_locked_balance(deps: Deps, asset: String) -> StdResult<LockedBalanceResponse> {
    let asset_addr = deps.api.addr_validate(&asset)?;
    let amount = LOCKED_BALANCES
        .may_load(deps.storage, &asset_addr)?
        .unwrap_or_default();
    Ok(LockedBalanceResponse { asset, amount })
}

pub fn query_is_custodied(
    deps: Deps,
    asset: String,
    token_id: String,
) -> StdResult<IsCustodiedResponse> {
    let asset = deps.api.addr_validate(&asset)?;
    Ok(IsCustodiedResponse {
        custodied: CUSTODIED_NFTS.has(deps.storage, (&asset, token_id.as_str())),
    })
}

// ============================================================================
// Sign Hashes
// ============================================================================

#[allow(clippy::too_many_arguments)]
pub fn query_fungible_sign_hash(
    env: Env,
    asset: String,
    amount: Uint128,
    recipient: String,
    source_tx_hash: Binary,
    nonce: u64,
    mintable: bool,
    chain_id: Option<String>,
) -> StdResult<SignHashResponse> {
    let tx_hash = parse_tx_hash(&source_tx_hash)?;
    let chain_id = chain_id.unwrap_or(env.block.chain_id);
    let hash = fungible_sign_hash(&FungibleSignParams {
        asset: &asset,
        amount: amount.u128(),
        recipient: &recipient,
        source_tx_hash: &tx_hash,
        nonce,
        chain_id: &chain_id,
        mintable,
    });
    Ok(sign_hash_response(hash))
}

#[allow(clippy::too_many_arguments)]
pub fn query_non_fungible_sign_hash(
    env: Env,
    asset: String,
    token_id: String,
    recipient: String,
    source_tx_hash: Binary,
    nonce: u64,
    token_uri: String,
    mintable: bool,
    chain_id: Option<String>,
) -> StdResult<SignHashResponse> {
    let tx_hash = parse_tx_hash(&source_tx_hash)?;
    let chain_id = chain_id.unwrap_or(env.block.chain_id);
    let hash = non_fungible_sign_hash(&NonFungibleSignParams {
        asset: &asset,
        token_id: &token_id,
        recipient: &recipient,
        source_tx_hash: &tx_hash,
        nonce,
        chain_id: &chain_id,
        token_uri: &token_uri,
        mintable,
    });
    Ok(sign_hash_response(hash))
}

fn sign_hash_response(hash: [u8; 32]) -> SignHashResponse {
    SignHashResponse {
        hash: Binary::from(hash.to_vec()),
        prefixed_hash: Binary::from(personal_message_hash(&hash).to_vec()),
    }
}

fn parse_tx_hash(source_tx_hash: &Binary) -> StdResult<[u8; 32]> {
    parse_source_tx_hash(source_tx_hash).map_err(|e| StdError::generic_err(e.to_string()))
}
