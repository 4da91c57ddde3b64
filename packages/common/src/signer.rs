//! Validator signer identities.
//!
//! A signer is identified by the 20-byte address derived from its secp256k1
//! public key (`keccak256(uncompressed_pubkey[1..])[12..]`). Addresses travel
//! in messages as `0x`-prefixed hex and are stored as raw bytes.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Length of a signer address in bytes
pub const SIGNER_ADDRESS_LEN: usize = 20;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignerAddressError {
    #[error("empty signer address")]
    Empty,

    #[error("expected {} bytes, got {got}", SIGNER_ADDRESS_LEN)]
    InvalidLength { got: usize },

    #[error("invalid hex character")]
    InvalidHex,
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SignerAddress([u8; SIGNER_ADDRESS_LEN]);

impl SignerAddress {
    pub const fn new(bytes: [u8; SIGNER_ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, SignerAddressError> {
        let raw: [u8; SIGNER_ADDRESS_LEN] = bytes
            .try_into()
            .map_err(|_| SignerAddressError::InvalidLength { got: bytes.len() })?;
        Ok(Self(raw))
    }

    pub fn as_bytes(&self) -> &[u8; SIGNER_ADDRESS_LEN] {
        &self.0
    }

    /// Lowercase `0x`-prefixed hex form.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl FromStr for SignerAddress {
    type Err = SignerAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(SignerAddressError::Empty);
        }
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if digits.len() != SIGNER_ADDRESS_LEN * 2 {
            return Err(SignerAddressError::InvalidLength {
                got: digits.len() / 2,
            });
        }
        let bytes = hex::decode(digits).map_err(|_| SignerAddressError::InvalidHex)?;
        Self::from_slice(&bytes)
    }
}

impl fmt::Display for SignerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for SignerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SignerAddress({})", self.to_hex())
    }
}
