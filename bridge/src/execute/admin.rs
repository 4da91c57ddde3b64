//! Admin operations handlers.
//!
//! This module handles:
//! - Ownership transfer (propose/accept/cancel)
//! - Code upgrade through self-migration

use cosmwasm_std::{Binary, CosmosMsg, DepsMut, Env, MessageInfo, Response, WasmMsg};

use crate::error::ContractError;
use crate::state::{CONFIG, PENDING_OWNER};

// ============================================================================
// Ownership Transfer
// ============================================================================

/// Propose a new owner. Replaces any earlier proposal.
pub fn execute_propose_owner(
    deps: DepsMut,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    let new_owner_addr = deps.api.addr_validate(&new_owner)?;
    PENDING_OWNER.save(deps.storage, &new_owner_addr)?;

    Ok(Response::new()
        .add_attribute("method", "propose_owner")
        .add_attribute("new_owner", new_owner_addr.to_string()))
}

/// Accept a pending ownership proposal.
pub fn execute_accept_ownership(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let pending = PENDING_OWNER
        .may_load(deps.storage)?
        .ok_or(ContractError::NoPendingOwner)?;

    if info.sender != pending {
        return Err(ContractError::UnauthorizedPendingOwner);
    }

    let mut config = CONFIG.load(deps.storage)?;
    let previous_owner = config.owner;
    config.owner = pending.clone();
    CONFIG.save(deps.storage, &config)?;
    PENDING_OWNER.remove(deps.storage);

    Ok(Response::new()
        .add_attribute("method", "accept_ownership")
        .add_attribute("previous_owner", previous_owner.to_string())
        .add_attribute("new_owner", pending.to_string()))
}

/// Cancel pending ownership proposal.
pub fn execute_cancel_ownership_proposal(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    PENDING_OWNER.remove(deps.storage);

    Ok(Response::new().add_attribute("method", "cancel_ownership_proposal"))
}

// ============================================================================
// Upgrade
// ============================================================================

/// Migrate the bridge onto `new_code_id`.
///
/// The migrate message is sent by the bridge itself, so the bridge must be
/// its own contract admin. Persisted state is carried over untouched.
pub fn execute_upgrade(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    new_code_id: u64,
    msg: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    let migrate = CosmosMsg::Wasm(WasmMsg::Migrate {
        contract_addr: env.contract.address.to_string(),
        new_code_id,
        msg,
    });

    Ok(Response::new()
        .add_message(migrate)
        .add_attribute("method", "upgrade")
        .add_attribute("new_code_id", new_code_id.to_string()))
}
