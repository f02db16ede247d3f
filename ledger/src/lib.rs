//! Capped token ledger.
//!
//! A single owner-administered token with an immutable supply cap. Supply can
//! only grow through owner mints, linear vesting releases, one-shot airdrop
//! claims, a cooldown-gated faucet and a one-time bootstrap allocation. Every
//! one of those paths funnels through [`SupplyManager`], which enforces the cap.
//!
//! Operations take the caller and, where time matters, `now` explicitly; the
//! ledger never reads the wall clock.

pub mod access;
pub mod airdrop;
pub mod allocation;
pub mod config;
pub mod error;
pub mod event;
pub mod faucet;
pub mod ledger;
pub mod supply;
pub mod vesting;

pub use access::AccessGuard;
pub use airdrop::{AirdropEntry, AirdropRegistry};
pub use allocation::{AllocationAddresses, AllocationMint, AllocationPlan, VestingGrant};
pub use config::{FaucetConfig, LedgerConfig, LoggingConfig};
pub use error::{ConfigError, ErrorKind, LedgerError};
pub use event::{EventBus, LedgerEvent, Outbox};
pub use faucet::{Faucet, FaucetSettings};
pub use ledger::{Ledger, LedgerParams, LedgerSummary};
pub use supply::SupplyManager;
pub use vesting::{VestingQuote, VestingRegistry, VestingSchedule};
