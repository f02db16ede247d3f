//! Per-beneficiary linear vesting schedules with a cliff.
//!
//! `vested(t) = min(total, total × (t − start) / duration)` with floor
//! division. Nothing is releasable before `start + cliff`; after
//! `start + duration` the full allocation is vested.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use vestra_types::{Address, Timestamp, TokenAmount};

use crate::error::LedgerError;

/// A linear vesting schedule for one beneficiary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingSchedule {
    /// Allocation; replaced when the schedule is rewritten.
    pub total_allocated: TokenAmount,
    pub start_time: Timestamp,
    /// Seconds after `start_time` before anything is releasable.
    pub cliff_secs: u64,
    /// Seconds over which the allocation vests linearly.
    pub duration_secs: u64,
    /// Cumulative amount already released (never decreases).
    pub released: TokenAmount,
}

impl VestingSchedule {
    pub fn new(
        total_allocated: TokenAmount,
        start_time: Timestamp,
        cliff_secs: u64,
        duration_secs: u64,
    ) -> Self {
        Self {
            total_allocated,
            start_time,
            cliff_secs,
            duration_secs,
            released: TokenAmount::ZERO,
        }
    }

    pub fn cliff_ends_at(&self) -> Timestamp {
        self.start_time.saturating_add_secs(self.cliff_secs)
    }

    pub fn ends_at(&self) -> Timestamp {
        self.start_time.saturating_add_secs(self.duration_secs)
    }

    pub fn cliff_reached(&self, now: Timestamp) -> bool {
        now >= self.cliff_ends_at()
    }

    /// Amount vested at `now`, ignoring the cliff. Zero-duration schedules
    /// report zero.
    pub fn vested_at(&self, now: Timestamp) -> Result<TokenAmount, LedgerError> {
        if self.duration_secs == 0 {
            return Ok(TokenAmount::ZERO);
        }
        let elapsed = self.start_time.elapsed_since(now);
        if elapsed >= self.duration_secs {
            return Ok(self.total_allocated);
        }
        self.total_allocated
            .checked_mul_div(elapsed, self.duration_secs)
            .ok_or(LedgerError::Overflow)
    }

    /// Vested-but-unreleased amount at `now`, honoring the cliff.
    pub fn releasable_at(&self, now: Timestamp) -> Result<TokenAmount, LedgerError> {
        if !self.cliff_reached(now) {
            return Ok(TokenAmount::ZERO);
        }
        Ok(self.vested_at(now)?.saturating_sub(self.released))
    }
}

/// Vested and releasable amounts for a beneficiary at a point in time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingQuote {
    pub vested: TokenAmount,
    pub releasable: TokenAmount,
}

/// All vesting schedules, keyed by beneficiary.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VestingRegistry {
    schedules: HashMap<Address, VestingSchedule>,
    /// Beneficiaries in the order their schedules were created.
    addresses: Vec<Address>,
}

impl VestingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, beneficiary: &Address) -> Option<&VestingSchedule> {
        self.schedules.get(beneficiary)
    }

    /// Every beneficiary that ever received a schedule, in creation order.
    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    /// Check that a schedule of `amount` over `duration_secs` may be written
    /// for `beneficiary`, returning the released amount it inherits.
    ///
    /// A zero-duration write over an allocated schedule is refused. Any other
    /// write replaces the schedule but keeps what was already released, so the
    /// new allocation may not fall below it.
    pub fn ensure_can_add(
        &self,
        beneficiary: &Address,
        amount: TokenAmount,
        duration_secs: u64,
    ) -> Result<TokenAmount, LedgerError> {
        let Some(existing) = self.schedules.get(beneficiary) else {
            return Ok(TokenAmount::ZERO);
        };
        if !existing.total_allocated.is_zero() && duration_secs == 0 {
            return Err(LedgerError::AlreadyVested {
                beneficiary: beneficiary.clone(),
            });
        }
        if amount < existing.released {
            return Err(LedgerError::AllocationBelowReleased {
                beneficiary: beneficiary.clone(),
                allocated: amount,
                released: existing.released,
            });
        }
        Ok(existing.released)
    }

    /// Write a schedule starting at `now`.
    ///
    /// A zero-duration new schedule is accepted but never releasable.
    pub fn add(
        &mut self,
        beneficiary: &Address,
        amount: TokenAmount,
        cliff_secs: u64,
        duration_secs: u64,
        now: Timestamp,
    ) -> Result<&VestingSchedule, LedgerError> {
        let released = self.ensure_can_add(beneficiary, amount, duration_secs)?;
        if !self.schedules.contains_key(beneficiary) {
            self.addresses.push(beneficiary.clone());
        }
        let mut schedule = VestingSchedule::new(amount, now, cliff_secs, duration_secs);
        schedule.released = released;
        self.schedules.insert(beneficiary.clone(), schedule);
        Ok(&self.schedules[beneficiary])
    }

    /// Amount `beneficiary` may release at `now`, or why they may not.
    pub fn releasable(
        &self,
        beneficiary: &Address,
        now: Timestamp,
    ) -> Result<TokenAmount, LedgerError> {
        let schedule = match self.schedules.get(beneficiary) {
            Some(s) if s.duration_secs != 0 => s,
            _ => {
                return Err(LedgerError::NotEligible {
                    account: beneficiary.clone(),
                })
            }
        };
        if !schedule.cliff_reached(now) {
            return Err(LedgerError::CliffNotReached {
                beneficiary: beneficiary.clone(),
                cliff_ends_at: schedule.cliff_ends_at(),
                now,
            });
        }
        let unreleased = schedule.vested_at(now)?.saturating_sub(schedule.released);
        if unreleased.is_zero() {
            return Err(LedgerError::NothingToRelease {
                beneficiary: beneficiary.clone(),
            });
        }
        Ok(unreleased)
    }

    /// Record a release computed by [`releasable`](Self::releasable), returning
    /// the new cumulative released amount.
    pub fn record_release(
        &mut self,
        beneficiary: &Address,
        amount: TokenAmount,
    ) -> Result<TokenAmount, LedgerError> {
        let schedule = self
            .schedules
            .get_mut(beneficiary)
            .ok_or_else(|| LedgerError::NotEligible {
                account: beneficiary.clone(),
            })?;
        let released = schedule
            .released
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        if released > schedule.total_allocated {
            return Err(LedgerError::Overflow);
        }
        schedule.released = released;
        Ok(released)
    }

    /// Read-only mirror of the release computation.
    ///
    /// Returns a zero quote when there is no schedule, the schedule has zero
    /// duration, or the cliff has not been reached.
    pub fn quote(&self, beneficiary: &Address, now: Timestamp) -> Result<VestingQuote, LedgerError> {
        let schedule = match self.schedules.get(beneficiary) {
            Some(s) if s.duration_secs != 0 && !s.total_allocated.is_zero() => s,
            _ => return Ok(VestingQuote::default()),
        };
        if !schedule.cliff_reached(now) {
            return Ok(VestingQuote::default());
        }
        let vested = schedule.vested_at(now)?;
        Ok(VestingQuote {
            vested,
            releasable: vested.saturating_sub(schedule.released),
        })
    }
}
