//! Custody Bridge Contract - Quorum-Signed Cross-Chain Custody
//!
//! This contract holds CW20 and CW721 assets in custody for a cross-chain
//! bridge. Withdrawals are authorized by a threshold of off-chain signers.
//!
//! # Outgoing Flow (Deposit)
//! 1. User deposits tokens, either through an allowance or a CW20/CW721 send
//! 2. The bridge locks native assets or burns wrapped ones
//! 3. Relayers pick up the deposit record from the response attributes
//!
//! # Incoming Flow (Withdraw)
//! 1. Signers sign the withdrawal's sign hash off-chain
//! 2. Anyone submits the withdrawal with the signatures
//! 3. The bridge checks quorum, consumes the settlement key and releases or
//!    mints the asset
//!
//! # Security
//! - Sign hash binds every withdrawal parameter plus the executing chain id
//! - Distinct-signer quorum against the current signer set
//! - Settlement keys (source tx hash, nonce) are single-use
//! - Owner-gated signer management, two-step ownership transfer and upgrade

pub mod contract;
pub mod custody;
pub mod error;
mod execute;
pub mod hash;
pub mod msg;
mod query;
pub mod state;
pub mod verify;

pub use crate::error::ContractError;
pub use crate::hash::{fungible_sign_hash, keccak256, non_fungible_sign_hash};
pub use crate::verify::{recover_signer, verify_quorum};
