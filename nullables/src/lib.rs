//! Nullable infrastructure for deterministic testing.
//!
//! Inspired by the "A-frame architecture" pattern from RsNano.
//! External dependencies of the ledger (logical time, foreign-asset custody)
//! are abstracted so tests can swap in implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network

pub mod clock;
pub mod custody;

pub use clock::NullClock;
pub use custody::NullCustody;
