//! One-shot claimable airdrop allocations.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use vestra_types::{Address, TokenAmount};

use crate::error::LedgerError;

/// A recipient's airdrop allocation. A zero amount means "not eligible".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirdropEntry {
    pub amount: TokenAmount,
    pub claimed: bool,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AirdropRegistry {
    entries: HashMap<Address, AirdropEntry>,
}

impl AirdropRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, recipient: &Address) -> Option<&AirdropEntry> {
        self.entries.get(recipient)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validate a pairwise list before it is applied.
    pub fn check_list(recipients: &[Address], amounts: &[TokenAmount]) -> Result<(), LedgerError> {
        if recipients.len() != amounts.len() {
            return Err(LedgerError::LengthMismatch {
                recipients: recipients.len(),
                amounts: amounts.len(),
            });
        }
        Ok(())
    }

    /// Overwrite entries pairwise. Every written entry starts unclaimed, so
    /// re-listing a recipient restores their eligibility.
    pub fn set_list(
        &mut self,
        recipients: &[Address],
        amounts: &[TokenAmount],
    ) -> Result<(), LedgerError> {
        Self::check_list(recipients, amounts)?;
        for (recipient, amount) in recipients.iter().zip(amounts) {
            self.entries.insert(
                recipient.clone(),
                AirdropEntry {
                    amount: *amount,
                    claimed: false,
                },
            );
        }
        Ok(())
    }

    /// Amount `recipient` may claim, or why they may not.
    pub fn claimable(&self, recipient: &Address) -> Result<TokenAmount, LedgerError> {
        let entry = self.entries.get(recipient).copied().unwrap_or_default();
        if entry.amount.is_zero() {
            return Err(LedgerError::NotEligible {
                account: recipient.clone(),
            });
        }
        if entry.claimed {
            return Err(LedgerError::AlreadyClaimed {
                recipient: recipient.clone(),
            });
        }
        Ok(entry.amount)
    }

    pub fn mark_claimed(&mut self, recipient: &Address) {
        if let Some(entry) = self.entries.get_mut(recipient) {
            entry.claimed = true;
        }
    }
}
