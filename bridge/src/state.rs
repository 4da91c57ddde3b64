//! State definitions for the custody bridge contract
//!
//! The storage keys below are the persisted schema of the bridge. They are
//! shared by every code version that may be migrated onto the contract, so a
//! key must never be renamed or have its value type changed. New state goes
//! under new keys, and `migrate` initializes it when absent.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Order, StdResult, Storage, Uint128};
use cw_storage_plus::{Item, Map};

use common::SignerAddress;

use crate::error::ContractError;
use crate::hash::bytes32_to_hex;

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Owner address for signer administration and upgrades
    pub owner: Addr,
    /// Minimum number of distinct signer approvals per withdrawal
    pub threshold: u32,
}

/// Bridge statistics
#[cw_serde]
#[derive(Default)]
pub struct Stats {
    /// Accepted fungible deposits
    pub fungible_deposits: u64,
    /// Accepted non-fungible deposits
    pub non_fungible_deposits: u64,
    /// Settled fungible withdrawals
    pub fungible_withdrawals: u64,
    /// Settled non-fungible withdrawals
    pub non_fungible_withdrawals: u64,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:custody-bridge";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Storage
// ============================================================================

/// Primary config storage
pub const CONFIG: Item<Config> = Item::new("config");

/// Proposed owner awaiting acceptance (if any)
pub const PENDING_OWNER: Item<Addr> = Item::new("pending_owner");

/// Bridge statistics
pub const STATS: Item<Stats> = Item::new("stats");

/// Authorized signers
/// Key: 20-byte signer address, Value: always true
pub const SIGNERS: Map<&[u8], bool> = Map::new("signers");

/// Number of authorized signers
pub const SIGNER_COUNT: Item<u32> = Item::new("signer_count");

/// Settled withdrawals
/// Key: (32-byte source tx hash, nonce), Value: always true
pub const SETTLED: Map<(&[u8], u64), bool> = Map::new("settled");

/// CW20 balances held in custody for native-mode assets
/// Key: CW20 contract address, Value: locked amount
pub const LOCKED_BALANCES: Map<&Addr, Uint128> = Map::new("locked_balances");

/// CW721 tokens held in custody for native-mode assets
/// Key: (CW721 contract address, token id), Value: always true
pub const CUSTODIED_NFTS: Map<(&Addr, &str), bool> = Map::new("custodied_nfts");

// ============================================================================
// Signer Set Accessors
// ============================================================================

pub fn is_signer(storage: &dyn Storage, signer: &SignerAddress) -> bool {
    SIGNERS.has(storage, signer.as_bytes())
}

pub fn signer_count(storage: &dyn Storage) -> StdResult<u32> {
    SIGNER_COUNT.load(storage)
}

/// All signers in storage key order.
pub fn load_signers(storage: &dyn Storage) -> StdResult<Vec<SignerAddress>> {
    SIGNERS
        .keys(storage, None, None, Order::Ascending)
        .map(|key| {
            let key = key?;
            SignerAddress::from_slice(&key).map_err(|e| {
                cosmwasm_std::StdError::parse_err("SignerAddress", e.to_string())
            })
        })
        .collect()
}

// ============================================================================
// Replay Guard
// ============================================================================

pub fn is_settled(storage: &dyn Storage, source_tx_hash: &[u8; 32], nonce: u64) -> bool {
    SETTLED.has(storage, (source_tx_hash.as_slice(), nonce))
}

/// Marks a settlement key as used, failing if it already is.
///
/// Keys are never removed.
pub fn mark_settled(
    storage: &mut dyn Storage,
    source_tx_hash: &[u8; 32],
    nonce: u64,
) -> Result<(), ContractError> {
    if is_settled(storage, source_tx_hash, nonce) {
        return Err(ContractError::ReplayedSettlement {
            source_tx_hash: bytes32_to_hex(source_tx_hash),
            nonce,
        });
    }
    SETTLED.save(storage, (source_tx_hash.as_slice(), nonce), &true)?;
    Ok(())
}

// ============================================================================
// Stats
// ============================================================================

pub fn update_stats(
    storage: &mut dyn Storage,
    action: impl FnOnce(&mut Stats),
) -> StdResult<()> {
    let mut stats = STATS.may_load(storage)?.unwrap_or_default();
    action(&mut stats);
    STATS.save(storage, &stats)
}
