//! Execute handlers for the custody bridge contract.
//!
//! This module contains all execute message handlers, organized by category:
//! - `deposit` - Deposits through allowance or CW20/CW721 receive hooks
//! - `withdraw` - Quorum-verified withdrawals
//! - `signers` - Signer set and threshold management
//! - `admin` - Ownership transfer and upgrade

mod admin;
mod deposit;
mod signers;
mod withdraw;

pub use admin::*;
pub use deposit::*;
pub use signers::*;
pub use withdraw::*;
