//! Sign hash computation for withdrawal authorization
//!
//! Validators sign a digest that binds every parameter of a withdrawal. The
//! contract recomputes the digest from the parameters it is asked to execute,
//! so any mismatch makes signature recovery yield a different (unauthorized)
//! signer.
//!
//! # Encoding
//! Every field occupies exactly one 32-byte word (abi.encode style).
//! Variable-length values (addresses, token ids, URIs) enter as their
//! keccak256 digest, and the first word is a per-variant domain tag, so no
//! two distinct parameter tuples share an encoding.
//!
//! ## Fungible (256 bytes)
//! - Bytes 0-31:    keccak256("custody-bridge:fungible:v1")
//! - Bytes 32-63:   keccak256(asset)
//! - Bytes 64-95:   amount (uint256, big-endian, left-padded)
//! - Bytes 96-127:  keccak256(recipient)
//! - Bytes 128-159: source transaction hash
//! - Bytes 160-191: nonce (uint256, big-endian, left-padded)
//! - Bytes 192-223: chain key
//! - Bytes 224-255: mintable (0 or 1)
//!
//! ## Non-fungible (288 bytes)
//! - Bytes 0-31:    keccak256("custody-bridge:non-fungible:v1")
//! - Bytes 32-63:   keccak256(asset)
//! - Bytes 64-95:   keccak256(token_id)
//! - Bytes 96-127:  keccak256(recipient)
//! - Bytes 128-159: source transaction hash
//! - Bytes 160-191: nonce
//! - Bytes 192-223: chain key
//! - Bytes 224-255: keccak256(token_uri)
//! - Bytes 256-287: mintable (0 or 1)
//!
//! Signatures are produced over the personal-message form of the digest,
//! `keccak256("\x19Ethereum Signed Message:\n32" || digest)`.

use tiny_keccak::{Hasher, Keccak};

/// Domain tag for fungible withdrawals
pub const FUNGIBLE_DOMAIN: &[u8] = b"custody-bridge:fungible:v1";

/// Domain tag for non-fungible withdrawals
pub const NON_FUNGIBLE_DOMAIN: &[u8] = b"custody-bridge:non-fungible:v1";

/// Prefix applied to a 32-byte digest before signing
pub const PERSONAL_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Parameters bound by a fungible withdrawal signature.
#[derive(Debug, Clone, Copy)]
pub struct FungibleSignParams<'a> {
    pub asset: &'a str,
    pub amount: u128,
    pub recipient: &'a str,
    pub source_tx_hash: &'a [u8; 32],
    pub nonce: u64,
    pub chain_id: &'a str,
    pub mintable: bool,
}

/// Parameters bound by a non-fungible withdrawal signature.
#[derive(Debug, Clone, Copy)]
pub struct NonFungibleSignParams<'a> {
    pub asset: &'a str,
    pub token_id: &'a str,
    pub recipient: &'a str,
    pub source_tx_hash: &'a [u8; 32],
    pub nonce: u64,
    pub chain_id: &'a str,
    pub token_uri: &'a str,
    pub mintable: bool,
}

/// Digest validators sign to authorize a fungible withdrawal.
pub fn fungible_sign_hash(params: &FungibleSignParams) -> [u8; 32] {
    let mut data = [0u8; 256];

    data[0..32].copy_from_slice(&keccak256(FUNGIBLE_DOMAIN));
    data[32..64].copy_from_slice(&keccak256(params.asset.as_bytes()));
    data[64..96].copy_from_slice(&u128_word(params.amount));
    data[96..128].copy_from_slice(&keccak256(params.recipient.as_bytes()));
    data[128..160].copy_from_slice(params.source_tx_hash);
    data[160..192].copy_from_slice(&u64_word(params.nonce));
    data[192..224].copy_from_slice(&cosmos_chain_key(params.chain_id));
    data[224..256].copy_from_slice(&bool_word(params.mintable));

    keccak256(&data)
}

/// Digest validators sign to authorize a non-fungible withdrawal.
pub fn non_fungible_sign_hash(params: &NonFungibleSignParams) -> [u8; 32] {
    let mut data = [0u8; 288];

    data[0..32].copy_from_slice(&keccak256(NON_FUNGIBLE_DOMAIN));
    data[32..64].copy_from_slice(&keccak256(params.asset.as_bytes()));
    data[64..96].copy_from_slice(&keccak256(params.token_id.as_bytes()));
    data[96..128].copy_from_slice(&keccak256(params.recipient.as_bytes()));
    data[128..160].copy_from_slice(params.source_tx_hash);
    data[160..192].copy_from_slice(&u64_word(params.nonce));
    data[192..224].copy_from_slice(&cosmos_chain_key(params.chain_id));
    data[224..256].copy_from_slice(&keccak256(params.token_uri.as_bytes()));
    data[256..288].copy_from_slice(&bool_word(params.mintable));

    keccak256(&data)
}

/// Hash actually signed by validators: the digest under the personal
/// message prefix.
pub fn personal_message_hash(digest: &[u8; 32]) -> [u8; 32] {
    let mut data = [0u8; 60];
    data[..28].copy_from_slice(PERSONAL_MESSAGE_PREFIX);
    data[28..].copy_from_slice(digest);
    keccak256(&data)
}

/// Compute chain key for Cosmos/CosmWasm chains
///
/// Matches: `keccak256(abi.encode("COSMW", keccak256(abi.encode(chainId))))`
pub fn cosmos_chain_key(chain_id: &str) -> [u8; 32] {
    let inner_hash = abi_encode_string_hash(chain_id);
    abi_encode_chain_key("COSMW", &inner_hash)
}

/// Convert 32-byte hash to hex string (for attributes)
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}

// ============================================================================
// Internal helpers
// ============================================================================

fn u128_word(value: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

fn u64_word(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

fn bool_word(value: bool) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[31] = value as u8;
    word
}

/// Helper to compute keccak256(abi.encode(string))
fn abi_encode_string_hash(s: &str) -> [u8; 32] {
    // abi.encode for dynamic string:
    // - 32 bytes: offset (0x20 = 32)
    // - 32 bytes: length
    // - ceil(len/32)*32 bytes: data padded to 32-byte boundary
    let str_bytes = s.as_bytes();
    let len = str_bytes.len();
    let padded_len = len.div_ceil(32) * 32;

    let mut data = vec![0u8; 64 + padded_len];
    data[31] = 32;
    data[32 + 24..64].copy_from_slice(&(len as u64).to_be_bytes());
    data[64..64 + len].copy_from_slice(str_bytes);

    keccak256(&data)
}

/// Helper to compute chain key hash for (string chainType, bytes32 rawKey)
fn abi_encode_chain_key(chain_type: &str, raw_key: &[u8; 32]) -> [u8; 32] {
    // abi.encode(string, bytes32) layout:
    // - 32 bytes: offset to string (0x40 = 64)
    // - 32 bytes: bytes32 value
    // - 32 bytes: string length
    // - ceil(len/32)*32 bytes: string data padded
    let type_bytes = chain_type.as_bytes();
    let type_len = type_bytes.len();
    let padded_type_len = type_len.div_ceil(32) * 32;

    let mut data = vec![0u8; 96 + padded_type_len];
    data[31] = 64;
    data[32..64].copy_from_slice(raw_key);
    data[64 + 24..96].copy_from_slice(&(type_len as u64).to_be_bytes());
    data[96..96 + type_len].copy_from_slice(type_bytes);

    keccak256(&data)
}
