//! Nullable custody: in-memory foreign-asset balances for testing.

use std::collections::HashMap;
use std::sync::Mutex;
use vestra_types::{Address, CustodyError, ForeignCustody};

/// An in-memory foreign-asset ledger.
///
/// Holds `(token, holder) -> amount` and records every successful transfer so
/// tests can assert on what the rescue path moved.
pub struct NullCustody {
    holdings: Mutex<HashMap<(Address, Address), u128>>,
    transfers: Mutex<Vec<CustodyTransfer>>,
}

/// A transfer performed through [`NullCustody`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustodyTransfer {
    pub token: Address,
    pub from: Address,
    pub to: Address,
    pub amount: u128,
}

impl NullCustody {
    pub fn new() -> Self {
        Self {
            holdings: Mutex::new(HashMap::new()),
            transfers: Mutex::new(Vec::new()),
        }
    }

    /// Credit `holder` with `amount` of `token`.
    pub fn deposit(&self, token: &Address, holder: &Address, amount: u128) {
        let mut holdings = self.holdings.lock().unwrap();
        let entry = holdings.entry((token.clone(), holder.clone())).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// All transfers performed so far, oldest first.
    pub fn transfers(&self) -> Vec<CustodyTransfer> {
        self.transfers.lock().unwrap().clone()
    }
}

impl Default for NullCustody {
    fn default() -> Self {
        Self::new()
    }
}

impl ForeignCustody for NullCustody {
    fn transfer(
        &self,
        token: &Address,
        custodian: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<(), CustodyError> {
        let mut holdings = self.holdings.lock().unwrap();
        let available = holdings
            .get(&(token.clone(), custodian.clone()))
            .copied()
            .ok_or_else(|| CustodyError::UnknownAsset(token.clone()))?;
        if available < amount {
            return Err(CustodyError::InsufficientHoldings {
                token: token.clone(),
                requested: amount,
                available,
            });
        }
        holdings.insert((token.clone(), custodian.clone()), available - amount);
        let dest = holdings.entry((token.clone(), to.clone())).or_insert(0);
        *dest = dest.saturating_add(amount);
        self.transfers.lock().unwrap().push(CustodyTransfer {
            token: token.clone(),
            from: custodian.clone(),
            to: to.clone(),
            amount,
        });
        Ok(())
    }

    fn balance_of(&self, token: &Address, holder: &Address) -> Result<u128, CustodyError> {
        Ok(self
            .holdings
            .lock()
            .unwrap()
            .get(&(token.clone(), holder.clone()))
            .copied()
            .unwrap_or(0))
    }
}
