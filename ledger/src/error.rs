//! Ledger errors.
//!
//! Every failure is synchronous and carries the offending values so a host can
//! render a precise message. [`LedgerError::kind`] groups variants into the
//! coarse categories hosts usually branch on.

use std::fmt;

use thiserror::Error;
use vestra_types::{Address, CustodyError, Timestamp, TokenAmount};
use vestra_utils::format_duration;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("minting {requested} would exceed the supply cap: total {total_supply}, max {max_supply}")]
    MaxSupplyExceeded {
        requested: TokenAmount,
        total_supply: TokenAmount,
        max_supply: TokenAmount,
    },

    #[error("initial supply {initial} must be below the supply cap {max}")]
    InitSupplyGreaterThanCap {
        initial: TokenAmount,
        max: TokenAmount,
    },

    #[error("{caller} is not the ledger owner")]
    Unauthorized { caller: Address },

    #[error("tokenomics allocation has already been initialized")]
    AlreadyInitialized,

    #[error("{beneficiary} already has a vesting schedule")]
    AlreadyVested { beneficiary: Address },

    #[error("new allocation {allocated} for {beneficiary} is below the {released} already released")]
    AllocationBelowReleased {
        beneficiary: Address,
        allocated: TokenAmount,
        released: TokenAmount,
    },

    #[error("{recipient} has already claimed the airdrop")]
    AlreadyClaimed { recipient: Address },

    #[error("{account} is not eligible")]
    NotEligible { account: Address },

    #[error("vesting cliff for {beneficiary} ends at {cliff_ends_at}, now {now}")]
    CliffNotReached {
        beneficiary: Address,
        cliff_ends_at: Timestamp,
        now: Timestamp,
    },

    #[error("nothing to release for {beneficiary}")]
    NothingToRelease { beneficiary: Address },

    #[error("faucet cooldown in progress for {caller}: next claim in {}", cooldown_remaining(.remaining_secs))]
    FaucetCoolDownInProgress {
        caller: Address,
        next_claim_at: Timestamp,
        remaining_secs: u64,
    },

    #[error("cannot rescue {token}: it is this ledger's own asset")]
    InvalidTokenProvided { token: Address },

    #[error("airdrop list length mismatch: {recipients} recipients, {amounts} amounts")]
    LengthMismatch { recipients: usize, amounts: usize },

    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("insufficient balance for {account}: need {needed}, available {available}")]
    InsufficientBalance {
        account: Address,
        needed: TokenAmount,
        available: TokenAmount,
    },

    #[error("arithmetic overflow in ledger computation")]
    Overflow,

    #[error("foreign custody: {0}")]
    Custody(#[from] CustodyError),
}

fn cooldown_remaining(secs: &u64) -> String {
    format_duration(*secs)
}

/// Coarse error categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Supply-cap violations.
    Capacity,
    /// Caller lacks owner rights.
    Authorization,
    /// Operation invalid given the current lifecycle state.
    State,
    /// Caller or timing does not satisfy preconditions.
    Eligibility,
    /// Malformed arguments.
    Input,
    /// Insufficient funds.
    Balance,
    Arithmetic,
    /// The foreign-asset custody collaborator refused the transfer.
    Custody,
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MaxSupplyExceeded { .. } | Self::InitSupplyGreaterThanCap { .. } => {
                ErrorKind::Capacity
            }
            Self::Unauthorized { .. } => ErrorKind::Authorization,
            Self::AlreadyInitialized
            | Self::AlreadyVested { .. }
            | Self::AllocationBelowReleased { .. }
            | Self::AlreadyClaimed { .. } => ErrorKind::State,
            Self::NotEligible { .. }
            | Self::CliffNotReached { .. }
            | Self::NothingToRelease { .. }
            | Self::FaucetCoolDownInProgress { .. } => ErrorKind::Eligibility,
            Self::InvalidTokenProvided { .. } | Self::LengthMismatch { .. } | Self::ZeroAmount => {
                ErrorKind::Input
            }
            Self::InsufficientBalance { .. } => ErrorKind::Balance,
            Self::Overflow => ErrorKind::Arithmetic,
            Self::Custody(_) => ErrorKind::Custody,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Capacity => "capacity",
            Self::Authorization => "authorization",
            Self::State => "state",
            Self::Eligibility => "eligibility",
            Self::Input => "input",
            Self::Balance => "balance",
            Self::Arithmetic => "arithmetic",
            Self::Custody => "custody",
        };
        f.write_str(s)
    }
}

/// Errors loading a [`LedgerConfig`](crate::LedgerConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}
