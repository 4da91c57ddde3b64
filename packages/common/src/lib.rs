//! Common - Shared Types for Custody Bridge Contracts
//!
//! This package provides type definitions shared between the bridge contract
//! and the off-chain tooling that signs withdrawals for it.

pub mod asset;
pub mod signer;

pub use asset::AssetMode;
pub use signer::{SignerAddress, SignerAddressError, SIGNER_ADDRESS_LEN};
