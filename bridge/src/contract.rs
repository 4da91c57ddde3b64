//! Custody Bridge Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::{get_contract_version, set_contract_version};

use crate::error::ContractError;
use crate::execute::{
    execute_accept_ownership, execute_add_signers, execute_cancel_ownership_proposal,
    execute_deposit_fungible, execute_deposit_non_fungible, execute_propose_owner,
    execute_receive, execute_receive_nft, execute_remove_signers, execute_update_threshold,
    execute_upgrade, execute_withdraw_fungible, execute_withdraw_non_fungible,
    parse_signer_list, validate_threshold,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_config, query_fungible_sign_hash, query_is_custodied, query_is_settled,
    query_is_signer, query_locked_balance, query_non_fungible_sign_hash, query_pending_owner,
    query_signers, query_stats,
};
use crate::state::{
    Config, Stats, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, SIGNERS, SIGNER_COUNT, STATS,
};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    if CONFIG.may_load(deps.storage)?.is_some() {
        return Err(ContractError::AlreadyInitialized);
    }
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = deps.api.addr_validate(&msg.owner)?;

    let signers = parse_signer_list(&msg.signers)?;
    let signer_count = signers.len() as u32;
    validate_threshold(msg.threshold, signer_count)?;

    for signer in &signers {
        SIGNERS.save(deps.storage, signer.as_bytes(), &true)?;
    }
    SIGNER_COUNT.save(deps.storage, &signer_count)?;

    let config = Config {
        owner,
        threshold: msg.threshold,
    };
    CONFIG.save(deps.storage, &config)?;
    STATS.save(deps.storage, &Stats::default())?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", config.owner.to_string())
        .add_attribute("signer_count", signer_count.to_string())
        .add_attribute("threshold", msg.threshold.to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Deposits
        ExecuteMsg::DepositFungible {
            asset,
            amount,
            recipient,
            destination_network,
            mintable,
        } => execute_deposit_fungible(
            deps,
            env,
            info,
            asset,
            amount,
            recipient,
            destination_network,
            mintable,
        ),
        ExecuteMsg::DepositNonFungible {
            asset,
            token_id,
            recipient,
            destination_network,
            mintable,
        } => execute_deposit_non_fungible(
            deps,
            env,
            info,
            asset,
            token_id,
            recipient,
            destination_network,
            mintable,
        ),
        ExecuteMsg::Receive(cw20_msg) => execute_receive(deps, env, info, cw20_msg),
        ExecuteMsg::ReceiveNft(cw721_msg) => execute_receive_nft(deps, env, info, cw721_msg),

        // Withdrawals
        ExecuteMsg::WithdrawFungible {
            asset,
            amount,
            recipient,
            source_tx_hash,
            nonce,
            mintable,
            signatures,
        } => execute_withdraw_fungible(
            deps,
            env,
            info,
            asset,
            amount,
            recipient,
            source_tx_hash,
            nonce,
            mintable,
            signatures,
        ),
        ExecuteMsg::WithdrawNonFungible {
            asset,
            token_id,
            recipient,
            source_tx_hash,
            nonce,
            token_uri,
            mintable,
            signatures,
        } => execute_withdraw_non_fungible(
            deps,
            env,
            info,
            asset,
            token_id,
            recipient,
            source_tx_hash,
            nonce,
            token_uri,
            mintable,
            signatures,
        ),

        // Signer management
        ExecuteMsg::AddSigners { signers } => execute_add_signers(deps, info, signers),
        ExecuteMsg::RemoveSigners { signers } => execute_remove_signers(deps, info, signers),
        ExecuteMsg::UpdateThreshold { threshold } => {
            execute_update_threshold(deps, info, threshold)
        }

        // Ownership & upgrade
        ExecuteMsg::ProposeOwner { new_owner } => execute_propose_owner(deps, info, new_owner),
        ExecuteMsg::AcceptOwnership {} => execute_accept_ownership(deps, info),
        ExecuteMsg::CancelOwnershipProposal {} => execute_cancel_ownership_proposal(deps, info),
        ExecuteMsg::Upgrade { new_code_id, msg } => {
            execute_upgrade(deps, env, info, new_code_id, msg)
        }
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Signers {} => to_json_binary(&query_signers(deps)?),
        QueryMsg::IsSigner { signer } => to_json_binary(&query_is_signer(deps, signer)?),
        QueryMsg::PendingOwner {} => to_json_binary(&query_pending_owner(deps)?),
        QueryMsg::IsSettled {
            source_tx_hash,
            nonce,
        } => to_json_binary(&query_is_settled(deps, source_tx_hash, nonce)?),
        QueryMsg::LockedBalance { asset } => to_json_binary(&query_locked_balance(deps, asset)?),
        QueryMsg::IsCustodied { asset, token_id } => {
            to_json_binary(&query_is_custodied(deps, asset, token_id)?)
        }
        QueryMsg::FungibleSignHash {
            asset,
            amount,
            recipient,
            source_tx_hash,
            nonce,
            mintable,
            chain_id,
        } => to_json_binary(&query_fungible_sign_hash(
            env,
            asset,
            amount,
            recipient,
            source_tx_hash,
            nonce,
            mintable,
            chain_id,
        )?),
        QueryMsg::NonFungibleSignHash {
            asset,
            token_id,
            recipient,
            source_tx_hash,
            nonce,
            token_uri,
            mintable,
            chain_id,
        } => to_json_binary(&query_non_fungible_sign_hash(
            env,
            asset,
            token_id,
            recipient,
            source_tx_hash,
            nonce,
            token_uri,
            mintable,
            chain_id,
        )?),
        QueryMsg::Stats {} => to_json_binary(&query_stats(deps)?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

/// Move the contract onto new code.
///
/// Only the stored contract version changes. All other state is kept as is.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let stored = get_contract_version(deps.storage)?;
    if stored.contract != CONTRACT_NAME {
        return Err(ContractError::InvalidMigration {
            reason: format!("cannot migrate from contract {}", stored.contract),
        });
    }

    let stored_version = parse_version(&stored.version)?;
    let new_version = parse_version(CONTRACT_VERSION)?;
    if stored_version > new_version {
        return Err(ContractError::InvalidMigration {
            reason: format!(
                "cannot downgrade from {} to {}",
                stored.version, CONTRACT_VERSION
            ),
        });
    }

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("from_version", stored.version)
        .add_attribute("to_version", CONTRACT_VERSION))
}

fn parse_version(version: &str) -> Result<semver::Version, ContractError> {
    version
        .parse()
        .map_err(|e: semver::Error| ContractError::InvalidMigration {
            reason: format!("invalid version {}: {}", version, e),
        })
}
