//! One-shot tokenomics seeding.
//!
//! The plan is injected at construction instead of living as literals inside
//! the ledger. [`AllocationPlan::standard`] is the default table: two
//! informational mints (ecosystem, liquidity) and two vesting grants (team,
//! advisor).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use vestra_types::{Address, TokenAmount, SECS_PER_MONTH};

use crate::error::LedgerError;

/// A direct mint performed by the bootstrap.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationMint {
    pub label: String,
    pub recipient: Address,
    pub amount: TokenAmount,
}

/// A vesting schedule created by the bootstrap.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingGrant {
    pub label: String,
    pub beneficiary: Address,
    pub amount: TokenAmount,
    pub cliff_secs: u64,
    pub duration_secs: u64,
}

/// Recipients of the standard plan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationAddresses {
    pub ecosystem: Address,
    pub liquidity: Address,
    pub team: Address,
    pub advisor: Address,
}

impl Default for AllocationAddresses {
    fn default() -> Self {
        Self {
            ecosystem: Address::new("vx_ecosystem_fund"),
            liquidity: Address::new("vx_liquidity_pool"),
            team: Address::new("vx_team_vesting"),
            advisor: Address::new("vx_advisor_vesting"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationPlan {
    pub mints: Vec<AllocationMint>,
    pub vesting: Vec<VestingGrant>,
}

impl AllocationPlan {
    pub const ECOSYSTEM_TOKENS: u64 = 1_500_000;
    pub const LIQUIDITY_TOKENS: u64 = 1_000_000;
    pub const TEAM_TOKENS: u64 = 2_000_000;
    pub const TEAM_CLIFF_MONTHS: u64 = 6;
    pub const TEAM_DURATION_MONTHS: u64 = 24;
    pub const ADVISOR_TOKENS: u64 = 500_000;
    pub const ADVISOR_CLIFF_MONTHS: u64 = 3;
    pub const ADVISOR_DURATION_MONTHS: u64 = 12;

    /// The standard table for the given recipients.
    pub fn standard(addresses: &AllocationAddresses) -> Self {
        Self {
            mints: vec![
                AllocationMint {
                    label: "ecosystem".into(),
                    recipient: addresses.ecosystem.clone(),
                    amount: TokenAmount::from_tokens(Self::ECOSYSTEM_TOKENS),
                },
                AllocationMint {
                    label: "liquidity".into(),
                    recipient: addresses.liquidity.clone(),
                    amount: TokenAmount::from_tokens(Self::LIQUIDITY_TOKENS),
                },
            ],
            vesting: vec![
                VestingGrant {
                    label: "team".into(),
                    beneficiary: addresses.team.clone(),
                    amount: TokenAmount::from_tokens(Self::TEAM_TOKENS),
                    cliff_secs: Self::TEAM_CLIFF_MONTHS * SECS_PER_MONTH,
                    duration_secs: Self::TEAM_DURATION_MONTHS * SECS_PER_MONTH,
                },
                VestingGrant {
                    label: "advisor".into(),
                    beneficiary: addresses.advisor.clone(),
                    amount: TokenAmount::from_tokens(Self::ADVISOR_TOKENS),
                    cliff_secs: Self::ADVISOR_CLIFF_MONTHS * SECS_PER_MONTH,
                    duration_secs: Self::ADVISOR_DURATION_MONTHS * SECS_PER_MONTH,
                },
            ],
        }
    }

    /// Sum of all direct mints.
    pub fn minted_total(&self) -> Result<TokenAmount, LedgerError> {
        self.mints.iter().try_fold(TokenAmount::ZERO, |acc, m| {
            acc.checked_add(m.amount).ok_or(LedgerError::Overflow)
        })
    }

    /// Sum of all vesting allocations.
    pub fn vesting_total(&self) -> Result<TokenAmount, LedgerError> {
        self.vesting.iter().try_fold(TokenAmount::ZERO, |acc, g| {
            acc.checked_add(g.amount).ok_or(LedgerError::Overflow)
        })
    }

    /// Reject a plan that grants two schedules to one beneficiary; the second
    /// would be refused halfway through the bootstrap.
    pub fn check_unique_beneficiaries(&self) -> Result<(), LedgerError> {
        let mut seen = HashSet::new();
        for grant in &self.vesting {
            if !seen.insert(&grant.beneficiary) {
                return Err(LedgerError::AlreadyVested {
                    beneficiary: grant.beneficiary.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn mint_recipients(&self) -> Vec<Address> {
        self.mints.iter().map(|m| m.recipient.clone()).collect()
    }

    pub fn vesting_beneficiaries(&self) -> Vec<Address> {
        self.vesting.iter().map(|g| g.beneficiary.clone()).collect()
    }
}
