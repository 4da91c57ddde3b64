//! Message types for the custody bridge contract
//!
//! Signer identities are exchanged as `0x`-prefixed 20-byte hex strings.
//! Source transaction hashes are 32-byte `Binary` values.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Owner address for signer administration and upgrades
    pub owner: String,
    /// Initial signer addresses (hex)
    pub signers: Vec<String>,
    /// Minimum number of distinct signer approvals per withdrawal
    pub threshold: u32,
}

// ============================================================================
// Execute Messages
// ============================================================================

/// Execute messages
#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Deposits
    // ========================================================================
    /// Deposit CW20 tokens for bridging.
    ///
    /// The caller must have granted the bridge an allowance of at least
    /// `amount` on `asset`.
    DepositFungible {
        /// CW20 contract address
        asset: String,
        amount: Uint128,
        /// Recipient on the destination network
        recipient: String,
        /// Destination network tag, forwarded to relayers unchanged
        destination_network: String,
        /// Burn (true) or lock (false) the deposited tokens
        mintable: bool,
    },

    /// Deposit a CW721 token for bridging.
    ///
    /// The caller must own `token_id` and have approved the bridge for it.
    DepositNonFungible {
        /// CW721 contract address
        asset: String,
        token_id: String,
        recipient: String,
        destination_network: String,
        mintable: bool,
    },

    /// Deposit CW20 tokens through `Cw20ExecuteMsg::Send`
    Receive(cw20::Cw20ReceiveMsg),

    /// Deposit a CW721 token through `Cw721ExecuteMsg::SendNft`
    ReceiveNft(cw721::Cw721ReceiveMsg),

    // ========================================================================
    // Withdrawals
    // ========================================================================
    /// Release or mint CW20 tokens authorized by a quorum of signers.
    ///
    /// Authorization: Anyone holding the signatures
    WithdrawFungible {
        asset: String,
        amount: Uint128,
        recipient: String,
        /// Deposit transaction on the source chain (32 bytes)
        source_tx_hash: Binary,
        nonce: u64,
        mintable: bool,
        /// 65-byte `r || s || v` signatures over the fungible sign hash
        signatures: Vec<Binary>,
    },

    /// Release or mint a CW721 token authorized by a quorum of signers.
    ///
    /// Authorization: Anyone holding the signatures
    WithdrawNonFungible {
        asset: String,
        token_id: String,
        recipient: String,
        source_tx_hash: Binary,
        nonce: u64,
        /// Token URI for minted tokens (empty for none)
        token_uri: String,
        mintable: bool,
        signatures: Vec<Binary>,
    },

    // ========================================================================
    // Signer Management (owner only)
    // ========================================================================
    /// Add signers to the authorized set
    AddSigners { signers: Vec<String> },

    /// Remove signers from the authorized set
    RemoveSigners { signers: Vec<String> },

    /// Set the number of signatures a withdrawal requires
    UpdateThreshold { threshold: u32 },

    // ========================================================================
    // Ownership & Upgrade
    // ========================================================================
    /// Propose a new owner
    ProposeOwner { new_owner: String },

    /// Accept a pending ownership proposal (proposed owner only)
    AcceptOwnership {},

    /// Cancel a pending ownership proposal (owner only)
    CancelOwnershipProposal {},

    /// Migrate the bridge to `new_code_id`.
    ///
    /// The bridge must be its own chain-level contract admin.
    Upgrade { new_code_id: u64, msg: Binary },
}

/// Payload of `Receive` and `ReceiveNft` hooks
#[cw_serde]
pub enum ReceiveMsg {
    Deposit {
        recipient: String,
        destination_network: String,
        mintable: bool,
    },
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Owner and threshold
    #[returns(ConfigResponse)]
    Config {},

    /// Authorized signer set
    #[returns(SignersResponse)]
    Signers {},

    #[returns(IsSignerResponse)]
    IsSigner { signer: String },

    #[returns(Option<PendingOwnerResponse>)]
    PendingOwner {},

    /// Whether a settlement key has been consumed
    #[returns(IsSettledResponse)]
    IsSettled { source_tx_hash: Binary, nonce: u64 },

    /// CW20 amount held in custody for native-mode deposits
    #[returns(LockedBalanceResponse)]
    LockedBalance { asset: String },

    /// Whether a CW721 token is held in custody
    #[returns(IsCustodiedResponse)]
    IsCustodied { asset: String, token_id: String },

    /// Digest signers must sign for a fungible withdrawal.
    /// `chain_id` defaults to the executing chain.
    #[returns(SignHashResponse)]
    FungibleSignHash {
        asset: String,
        amount: Uint128,
        recipient: String,
        source_tx_hash: Binary,
        nonce: u64,
        mintable: bool,
        chain_id: Option<String>,
    },

    /// Digest signers must sign for a non-fungible withdrawal.
    /// `chain_id` defaults to the executing chain.
    #[returns(SignHashResponse)]
    NonFungibleSignHash {
        asset: String,
        token_id: String,
        recipient: String,
        source_tx_hash: Binary,
        nonce: u64,
        token_uri: String,
        mintable: bool,
        chain_id: Option<String>,
    },

    #[returns(StatsResponse)]
    Stats {},
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub owner: Addr,
    pub threshold: u32,
    pub signer_count: u32,
}

#[cw_serde]
pub struct SignersResponse {
    pub signers: Vec<String>,
    pub threshold: u32,
}

#[cw_serde]
pub struct IsSignerResponse {
    pub is_signer: bool,
}

#[cw_serde]
pub struct PendingOwnerResponse {
    pub new_owner: Addr,
}

#[cw_serde]
pub struct IsSettledResponse {
    pub settled: bool,
}

#[cw_serde]
pub struct LockedBalanceResponse {
    pub asset: String,
    pub amount: Uint128,
}

#[cw_serde]
pub struct IsCustodiedResponse {
    pub custodied: bool,
}

#[cw_serde]
pub struct SignHashResponse {
    /// Digest over the withdrawal parameters
    pub hash: Binary,
    /// The digest under the personal message prefix, as recovered against
    pub prefixed_hash: Binary,
}

#[cw_serde]
pub struct StatsResponse {
    pub fungible_deposits: u64,
    pub non_fungible_deposits: u64,
    pub fungible_withdrawals: u64,
    pub non_fungible_withdrawals: u64,
}
