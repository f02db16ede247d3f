//! Single-owner authority.

use serde::{Deserialize, Serialize};
use vestra_types::Address;

use crate::error::LedgerError;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccessGuard {
    owner: Address,
}

impl AccessGuard {
    pub fn new(owner: Address) -> Self {
        Self { owner }
    }

    pub fn owner(&self) -> &Address {
        &self.owner
    }

    pub fn is_owner(&self, caller: &Address) -> bool {
        *caller == self.owner
    }

    /// Gate for every administrative operation.
    pub fn ensure_owner(&self, caller: &Address) -> Result<(), LedgerError> {
        if !self.is_owner(caller) {
            tracing::warn!(%caller, owner = %self.owner, "rejected non-owner admin call");
            return Err(LedgerError::Unauthorized {
                caller: caller.clone(),
            });
        }
        Ok(())
    }

    /// Hand authority to `new_owner`, returning the previous owner.
    pub fn transfer(&mut self, caller: &Address, new_owner: Address) -> Result<Address, LedgerError> {
        self.ensure_owner(caller)?;
        Ok(std::mem::replace(&mut self.owner, new_owner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_owner_passes() {
        let guard = AccessGuard::new(Address::new("vx_owner"));
        assert!(guard.ensure_owner(&Address::new("vx_owner")).is_ok());
        assert_eq!(
            guard.ensure_owner(&Address::new("vx_eve")).unwrap_err(),
            LedgerError::Unauthorized { caller: Address::new("vx_eve") }
        );
    }

    #[test]
    fn transfer_moves_authority() {
        let mut guard = AccessGuard::new(Address::new("vx_owner"));
        let previous = guard
            .transfer(&Address::new("vx_owner"), Address::new("vx_next"))
            .unwrap();
        assert_eq!(previous, Address::new("vx_owner"));
        assert!(guard.is_owner(&Address::new("vx_next")));
        assert!(guard.ensure_owner(&Address::new("vx_owner")).is_err());
    }

    #[test]
    fn transfer_by_non_owner_fails() {
        let mut guard = AccessGuard::new(Address::new("vx_owner"));
        assert!(guard
            .transfer(&Address::new("vx_eve"), Address::new("vx_eve"))
            .is_err());
        assert_eq!(guard.owner(), &Address::new("vx_owner"));
    }
}
