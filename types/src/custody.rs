//! Custody seam for foreign fungible assets.
//!
//! The ledger's custody address may accidentally receive other tokens. Those
//! balances live outside this ledger; the owner moves them out through a
//! `ForeignCustody` implementation supplied by the host.

use crate::address::Address;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CustodyError {
    #[error("custody holds {available} of {token}, requested {requested}")]
    InsufficientHoldings {
        token: Address,
        requested: u128,
        available: u128,
    },

    #[error("unknown asset {0}")]
    UnknownAsset(Address),

    #[error("custody backend error: {0}")]
    Backend(String),
}

/// Moves foreign-asset balances held by a custody address.
///
/// Amounts are raw units of the foreign asset; the ledger does not interpret
/// their scale.
pub trait ForeignCustody {
    /// Transfer `amount` of `token` from `custodian` to `to`.
    fn transfer(
        &self,
        token: &Address,
        custodian: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<(), CustodyError>;

    /// Balance of `token` held by `holder`.
    fn balance_of(&self, token: &Address, holder: &Address) -> Result<u128, CustodyError>;
}
