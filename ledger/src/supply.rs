//! Supply manager: balances, the immutable cap, mint and burn.
//!
//! [`SupplyManager::mint`] and [`SupplyManager::mint_many`] are the only paths
//! that create supply. Vesting releases, airdrop claims, faucet drips, admin
//! mints and the bootstrap allocation all go through them, so the cap is
//! enforced in exactly one place.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use vestra_types::{Address, TokenAmount};

use crate::error::LedgerError;

/// Supply counters and the balance store.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SupplyManager {
    max_supply: TokenAmount,
    total_supply: TokenAmount,
    /// Cumulative minted amount (never decreases).
    total_minted: TokenAmount,
    /// Cumulative burned amount (never decreases).
    total_burned: TokenAmount,
    balances: HashMap<Address, TokenAmount>,
}

impl SupplyManager {
    pub fn new(max_supply: TokenAmount) -> Self {
        Self {
            max_supply,
            total_supply: TokenAmount::ZERO,
            total_minted: TokenAmount::ZERO,
            total_burned: TokenAmount::ZERO,
            balances: HashMap::new(),
        }
    }

    pub fn max_supply(&self) -> TokenAmount {
        self.max_supply
    }

    pub fn total_supply(&self) -> TokenAmount {
        self.total_supply
    }

    pub fn total_minted(&self) -> TokenAmount {
        self.total_minted
    }

    pub fn total_burned(&self) -> TokenAmount {
        self.total_burned
    }

    /// Headroom left under the cap.
    pub fn remaining_mintable(&self) -> TokenAmount {
        self.max_supply.saturating_sub(self.total_supply)
    }

    pub fn balance_of(&self, account: &Address) -> TokenAmount {
        self.balances.get(account).copied().unwrap_or(TokenAmount::ZERO)
    }

    /// Number of accounts holding a non-zero balance.
    pub fn holder_count(&self) -> usize {
        self.balances.values().filter(|b| !b.is_zero()).count()
    }

    /// Iterate over all known balances (including emptied accounts).
    pub fn balances(&self) -> impl Iterator<Item = (&Address, &TokenAmount)> {
        self.balances.iter()
    }

    /// Check that `amount` more supply fits under the cap, returning the new total.
    pub fn ensure_mintable(&self, amount: TokenAmount) -> Result<TokenAmount, LedgerError> {
        let new_total = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        if new_total > self.max_supply {
            return Err(LedgerError::MaxSupplyExceeded {
                requested: amount,
                total_supply: self.total_supply,
                max_supply: self.max_supply,
            });
        }
        Ok(new_total)
    }

    /// Create `amount` of supply for `to`. Fails without writing if the cap
    /// would be exceeded.
    pub fn mint(&mut self, to: &Address, amount: TokenAmount) -> Result<(), LedgerError> {
        let new_total = self.ensure_mintable(amount)?;
        let new_minted = self
            .total_minted
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        // A balance is bounded by total supply, so this cannot overflow once
        // the supply check passed.
        let balance = self.balance_of(to).checked_add(amount).ok_or(LedgerError::Overflow)?;

        self.total_supply = new_total;
        self.total_minted = new_minted;
        self.balances.insert(to.clone(), balance);
        Ok(())
    }

    /// Mint a batch against a single cap check over the batch total.
    pub fn mint_many(&mut self, grants: &[(Address, TokenAmount)]) -> Result<(), LedgerError> {
        let mut batch_total = TokenAmount::ZERO;
        for (_, amount) in grants {
            batch_total = batch_total.checked_add(*amount).ok_or(LedgerError::Overflow)?;
        }
        let new_total = self.ensure_mintable(batch_total)?;
        let new_minted = self
            .total_minted
            .checked_add(batch_total)
            .ok_or(LedgerError::Overflow)?;

        for (to, amount) in grants {
            let balance = self.balance_of(to) + *amount;
            self.balances.insert(to.clone(), balance);
        }
        self.total_supply = new_total;
        self.total_minted = new_minted;
        Ok(())
    }

    /// Destroy `amount` from `from`'s own balance.
    pub fn burn(&mut self, from: &Address, amount: TokenAmount) -> Result<(), LedgerError> {
        let available = self.balance_of(from);
        let remaining = available
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::InsufficientBalance {
                account: from.clone(),
                needed: amount,
                available,
            })?;
        let new_total = self
            .total_supply
            .checked_sub(amount)
            .ok_or(LedgerError::Overflow)?;
        let new_burned = self
            .total_burned
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        self.balances.insert(from.clone(), remaining);
        self.total_supply = new_total;
        self.total_burned = new_burned;
        Ok(())
    }

    /// Move `amount` between holders. Supply counters are unchanged.
    pub fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        amount: TokenAmount,
    ) -> Result<(), LedgerError> {
        let available = self.balance_of(from);
        let remaining = available
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::InsufficientBalance {
                account: from.clone(),
                needed: amount,
                available,
            })?;
        if from == to {
            return Ok(());
        }
        let credited = self.balance_of(to).checked_add(amount).ok_or(LedgerError::Overflow)?;

        self.balances.insert(from.clone(), remaining);
        self.balances.insert(to.clone(), credited);
        Ok(())
    }
}
