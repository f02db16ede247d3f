//! Fundamental types for the Vestra ledger.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! addresses, fixed-point token amounts, timestamps and the foreign-asset
//! custody seam.

pub mod address;
pub mod amount;
pub mod custody;
pub mod error;
pub mod time;

pub use address::Address;
pub use amount::{TokenAmount, TOKEN_DECIMALS, TOKEN_UNIT};
pub use custody::{CustodyError, ForeignCustody};
pub use error::TypesError;
pub use time::{Timestamp, SECS_PER_DAY, SECS_PER_MONTH};
