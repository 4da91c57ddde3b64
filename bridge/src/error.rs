//! Error types for the custody bridge contract
//!
//! Every variant aborts the whole call. The runtime rolls back all state
//! writes of a failed call, including those of dispatched token messages.

use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only owner can perform this action")]
    Unauthorized,

    #[error("Unauthorized: caller {caller} does not own token {token_id}")]
    NotTokenOwner { caller: String, token_id: String },

    #[error("Unauthorized: only pending owner can accept")]
    UnauthorizedPendingOwner,

    #[error("No pending ownership transfer")]
    NoPendingOwner,

    // ========================================================================
    // Signer Registry Errors
    // ========================================================================

    #[error("Invalid threshold {threshold}: must be between 1 and {signers} signers")]
    InvalidThreshold { threshold: u32, signers: u32 },

    #[error("Duplicate signer: {signer}")]
    DuplicateSigner { signer: String },

    #[error("Unknown signer: {signer}")]
    UnknownSigner { signer: String },

    #[error("Invalid signer address {signer}: {reason}")]
    InvalidSignerAddress { signer: String, reason: String },

    #[error("Signer list must not be empty")]
    EmptySignerList,

    // ========================================================================
    // Signature Errors
    // ========================================================================

    #[error("Malformed signature at index {index}")]
    MalformedSignature { index: usize },

    #[error("Quorum not met: got {got} valid signatures, need {required}")]
    QuorumNotMet { got: u32, required: u32 },

    // ========================================================================
    // Settlement Errors
    // ========================================================================

    #[error("Settlement already used: tx {source_tx_hash} nonce {nonce}")]
    ReplayedSettlement { source_tx_hash: String, nonce: u64 },

    #[error("Invalid hash length: expected 32 bytes, got {got}")]
    InvalidHashLength { got: usize },

    // ========================================================================
    // Custody Errors
    // ========================================================================

    #[error("Insufficient custody of {asset}: held {held}, requested {requested}")]
    InsufficientCustody {
        asset: String,
        held: Uint128,
        requested: Uint128,
    },

    #[error("Insufficient custody: token {token_id} of {asset} is not held")]
    TokenNotInCustody { asset: String, token_id: String },

    #[error("Asset state mismatch for {asset} token {token_id}: {reason}")]
    AssetStateMismatch {
        asset: String,
        token_id: String,
        reason: String,
    },

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    // ========================================================================
    // Lifecycle Errors
    // ========================================================================

    #[error("Contract already initialized")]
    AlreadyInitialized,

    #[error("Invalid migration: {reason}")]
    InvalidMigration { reason: String },
}
