//! Asset representation modes.

use cosmwasm_schema::cw_serde;

/// How an asset is represented on this chain.
///
/// The mode is chosen per call through the `mintable` flag and is part of the
/// signed withdrawal message, so validators attest to it together with the
/// transfer itself.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum AssetMode {
    /// Native representation: deposits lock into custody, withdrawals release
    /// from custody.
    Native,
    /// Wrapped representation: deposits burn, withdrawals mint.
    Wrapped,
}

impl AssetMode {
    pub fn from_mintable(mintable: bool) -> Self {
        if mintable {
            AssetMode::Wrapped
        } else {
            AssetMode::Native
        }
    }

    pub fn is_mintable(self) -> bool {
        matches!(self, AssetMode::Wrapped)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AssetMode::Native => "native",
            AssetMode::Wrapped => "wrapped",
        }
    }
}

impl std::fmt::Display for AssetMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
