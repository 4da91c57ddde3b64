//! Signature recovery and quorum verification.
//!
//! Recovery is a pure function of the digest and the signature bytes. The
//! quorum check composes it with membership in the stored signer set and the
//! threshold as it stands at verification time.

use std::collections::BTreeSet;

use cosmwasm_std::{Api, Binary, Storage};

use common::SignerAddress;

use crate::error::ContractError;
use crate::hash::{keccak256, personal_message_hash};
use crate::state::{is_signer, CONFIG};

/// Length of a recoverable signature: r (32) || s (32) || v (1)
pub const SIGNATURE_LEN: usize = 65;

/// Derive a signer address from a 65-byte uncompressed secp256k1 public key.
pub fn signer_address_from_pubkey(pubkey: &[u8]) -> Option<SignerAddress> {
    if pubkey.len() != 65 || pubkey[0] != 0x04 {
        return None;
    }
    let hash = keccak256(&pubkey[1..]);
    SignerAddress::from_slice(&hash[12..]).ok()
}

/// Recover the signer of `digest` from a recoverable signature.
///
/// The digest is wrapped in the personal message prefix before recovery.
/// Accepts `v` as either 0/1 or 27/28. Returns `None` for any signature that
/// cannot be parsed or recovered.
pub fn recover_signer(api: &dyn Api, digest: &[u8; 32], signature: &[u8]) -> Option<SignerAddress> {
    if signature.len() != SIGNATURE_LEN {
        return None;
    }
    let recovery_param = match signature[64] {
        0 | 27 => 0u8,
        1 | 28 => 1u8,
        _ => return None,
    };
    let message_hash = personal_message_hash(digest);
    let pubkey = api
        .secp256k1_recover_pubkey(&message_hash, &signature[..64], recovery_param)
        .ok()?;
    signer_address_from_pubkey(&pubkey)
}

/// Verify that `signatures` carry a quorum of distinct authorized signers
/// over `digest`.
///
/// Fails closed: one malformed signature, one signer outside the set, or one
/// signer appearing twice rejects the whole list.
pub fn verify_quorum(
    api: &dyn Api,
    storage: &dyn Storage,
    digest: &[u8; 32],
    signatures: &[Binary],
) -> Result<Vec<SignerAddress>, ContractError> {
    let threshold = CONFIG.load(storage)?.threshold;

    let mut seen = BTreeSet::new();
    for (index, signature) in signatures.iter().enumerate() {
        let signer = recover_signer(api, digest, signature.as_slice())
            .ok_or(ContractError::MalformedSignature { index })?;

        if !is_signer(storage, &signer) {
            return Err(ContractError::UnknownSigner {
                signer: signer.to_hex(),
            });
        }

        if !seen.insert(signer) {
            return Err(ContractError::DuplicateSigner {
                signer: signer.to_hex(),
            });
        }
    }

    let got = seen.len() as u32;
    if got < threshold {
        return Err(ContractError::QuorumNotMet {
            got,
            required: threshold,
        });
    }

    Ok(seen.into_iter().collect())
}
