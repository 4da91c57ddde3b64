//! Signer set and threshold management (owner only).
//!
//! Every change keeps `1 <= threshold <= signer_count`.

use std::collections::BTreeSet;

use cosmwasm_std::{DepsMut, MessageInfo, Response, Storage};

use common::SignerAddress;

use crate::error::ContractError;
use crate::state::{is_signer, signer_count, Config, CONFIG, SIGNERS, SIGNER_COUNT};

/// Add signers to the authorized set.
pub fn execute_add_signers(
    deps: DepsMut,
    info: MessageInfo,
    signers: Vec<String>,
) -> Result<Response, ContractError> {
    ensure_owner(deps.storage, &info)?;

    let new_signers = parse_signer_list(&signers)?;
    for signer in &new_signers {
        if is_signer(deps.storage, signer) {
            return Err(ContractError::DuplicateSigner {
                signer: signer.to_hex(),
            });
        }
    }

    for signer in &new_signers {
        SIGNERS.save(deps.storage, signer.as_bytes(), &true)?;
    }
    let count = signer_count(deps.storage)? + new_signers.len() as u32;
    SIGNER_COUNT.save(deps.storage, &count)?;

    Ok(Response::new()
        .add_attribute("method", "add_signers")
        .add_attribute("signers", join_hex(&new_signers))
        .add_attribute("signer_count", count.to_string()))
}

/// Remove signers from the authorized set.
///
/// The threshold is never lowered implicitly: a removal that would leave
/// fewer signers than the threshold is rejected.
pub fn execute_remove_signers(
    deps: DepsMut,
    info: MessageInfo,
    signers: Vec<String>,
) -> Result<Response, ContractError> {
    let config = ensure_owner(deps.storage, &info)?;

    let removed = parse_signer_list(&signers).map_err(|err| match err {
        // Naming a signer twice removes it twice; the second is absent.
        ContractError::DuplicateSigner { signer } => ContractError::UnknownSigner { signer },
        other => other,
    })?;
    for signer in &removed {
        if !is_signer(deps.storage, signer) {
            return Err(ContractError::UnknownSigner {
                signer: signer.to_hex(),
            });
        }
    }

    let count = signer_count(deps.storage)? - removed.len() as u32;
    if count < config.threshold {
        return Err(ContractError::InvalidThreshold {
            threshold: config.threshold,
            signers: count,
        });
    }

    for signer in &removed {
        SIGNERS.remove(deps.storage, signer.as_bytes());
    }
    SIGNER_COUNT.save(deps.storage, &count)?;

    Ok(Response::new()
        .add_attribute("method", "remove_signers")
        .add_attribute("signers", join_hex(&removed))
        .add_attribute("signer_count", count.to_string()))
}

/// Set the number of distinct signatures a withdrawal requires.
pub fn execute_update_threshold(
    deps: DepsMut,
    info: MessageInfo,
    threshold: u32,
) -> Result<Response, ContractError> {
    let mut config = ensure_owner(deps.storage, &info)?;

    let count = signer_count(deps.storage)?;
    validate_threshold(threshold, count)?;

    let old_threshold = config.threshold;
    config.threshold = threshold;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "update_threshold")
        .add_attribute("old_threshold", old_threshold.to_string())
        .add_attribute("new_threshold", threshold.to_string()))
}

// ============================================================================
// Helpers
// ============================================================================

fn ensure_owner(
    storage: &dyn Storage,
    info: &MessageInfo,
) -> Result<Config, ContractError> {
    let config = CONFIG.load(storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }
    Ok(config)
}

pub(crate) fn validate_threshold(threshold: u32, signers: u32) -> Result<(), ContractError> {
    if threshold == 0 || threshold > signers {
        return Err(ContractError::InvalidThreshold { threshold, signers });
    }
    Ok(())
}

pub(crate) fn parse_signer(signer: &str) -> Result<SignerAddress, ContractError> {
    signer
        .parse()
        .map_err(|err: common::SignerAddressError| ContractError::InvalidSignerAddress {
            signer: signer.to_string(),
            reason: err.to_string(),
        })
}

/// Parse a non-empty list of distinct signer addresses.
pub(crate) fn parse_signer_list(signers: &[String]) -> Result<Vec<SignerAddress>, ContractError> {
    if signers.is_empty() {
        return Err(ContractError::EmptySignerList);
    }

    let mut seen = BTreeSet::new();
    let mut parsed = Vec::with_capacity(signers.len());
    for raw in signers {
        let signer = parse_signer(raw)?;
        if !seen.insert(signer) {
            return Err(ContractError::DuplicateSigner {
                signer: signer.to_hex(),
            });
        }
        parsed.push(signer);
    }
    Ok(parsed)
}

fn join_hex(signers: &[SignerAddress]) -> String {
    signers
        .iter()
        .map(SignerAddress::to_hex)
        .collect::<Vec<_>>()
        .join(",")
}
