//! The ledger aggregate. Every public operation lives here.
//!
//! Each operation runs all of its checks before its first write, so a failure
//! leaves state untouched. Events staged by an operation are published through
//! [`Ledger::commit`] only after the writes have landed.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use vestra_types::{Address, ForeignCustody, Timestamp, TokenAmount};

use crate::access::AccessGuard;
use crate::airdrop::{AirdropEntry, AirdropRegistry};
use crate::allocation::AllocationPlan;
use crate::error::LedgerError;
use crate::event::{EventBus, LedgerEvent, Outbox};
use crate::faucet::{Faucet, FaucetSettings};
use crate::supply::SupplyManager;
use crate::vesting::{VestingQuote, VestingRegistry, VestingSchedule};

/// Construction parameters.
#[derive(Clone, Debug)]
pub struct LedgerParams {
    /// Initial owner; also receives the initial supply.
    pub owner: Address,
    /// This ledger's own asset identity and custody address.
    pub asset: Address,
    pub initial_supply: TokenAmount,
    /// Immutable supply cap.
    pub max_supply: TokenAmount,
    pub faucet: FaucetSettings,
    /// Bootstrap table applied once by [`Ledger::init_tokenomics`].
    pub allocation: AllocationPlan,
}

/// Supply and registry counters for dashboards and health checks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub owner: Address,
    pub asset: Address,
    pub max_supply: TokenAmount,
    pub total_supply: TokenAmount,
    pub total_minted: TokenAmount,
    pub total_burned: TokenAmount,
    pub holders: usize,
    pub vesting_schedules: usize,
    pub airdrop_entries: usize,
    pub tokenomics_initialized: bool,
}

/// The capped token ledger.
pub struct Ledger {
    asset: Address,
    access: AccessGuard,
    supply: SupplyManager,
    vesting: VestingRegistry,
    airdrop: AirdropRegistry,
    faucet: Faucet,
    allocation: AllocationPlan,
    tokenomics_initialized: bool,
    outbox: Outbox,
    bus: EventBus,
}

impl Ledger {
    /// Create a ledger and mint the initial supply to the owner.
    pub fn new(params: LedgerParams) -> Result<Self, LedgerError> {
        if params.initial_supply >= params.max_supply {
            return Err(LedgerError::InitSupplyGreaterThanCap {
                initial: params.initial_supply,
                max: params.max_supply,
            });
        }
        params.allocation.check_unique_beneficiaries()?;

        let mut ledger = Self {
            asset: params.asset,
            access: AccessGuard::new(params.owner.clone()),
            supply: SupplyManager::new(params.max_supply),
            vesting: VestingRegistry::new(),
            airdrop: AirdropRegistry::new(),
            faucet: Faucet::new(params.faucet),
            allocation: params.allocation,
            tokenomics_initialized: false,
            outbox: Outbox::default(),
            bus: EventBus::new(),
        };
        if !params.initial_supply.is_zero() {
            ledger.supply.mint(&params.owner, params.initial_supply)?;
            ledger.commit(vec![LedgerEvent::TokensMinted {
                to: params.owner.clone(),
                amount: params.initial_supply,
            }]);
        }
        info!(
            owner = %params.owner,
            asset = %ledger.asset,
            initial = %params.initial_supply,
            cap = %params.max_supply,
            "ledger created"
        );
        Ok(ledger)
    }

    // ── Notifications ──────────────────────────────────────────────────

    /// Register a listener invoked after every committed operation.
    pub fn subscribe(&mut self, listener: Box<dyn Fn(&LedgerEvent) + Send + Sync>) {
        self.bus.subscribe(listener);
    }

    /// Events committed since the last drain.
    pub fn pending_events(&self) -> &[LedgerEvent] {
        self.outbox.pending()
    }

    pub fn drain_events(&mut self) -> Vec<LedgerEvent> {
        self.outbox.drain()
    }

    fn commit(&mut self, events: Vec<LedgerEvent>) {
        for event in events {
            self.bus.emit(&event);
            self.outbox.push(event);
        }
    }

    // ── Views ──────────────────────────────────────────────────────────

    pub fn owner(&self) -> &Address {
        self.access.owner()
    }

    pub fn asset(&self) -> &Address {
        &self.asset
    }

    pub fn balance_of(&self, account: &Address) -> TokenAmount {
        self.supply.balance_of(account)
    }

    pub fn total_supply(&self) -> TokenAmount {
        self.supply.total_supply()
    }

    pub fn max_supply(&self) -> TokenAmount {
        self.supply.max_supply()
    }

    pub fn total_minted(&self) -> TokenAmount {
        self.supply.total_minted()
    }

    pub fn total_burned(&self) -> TokenAmount {
        self.supply.total_burned()
    }

    pub fn remaining_mintable(&self) -> TokenAmount {
        self.supply.remaining_mintable()
    }

    pub fn vesting_schedule(&self, beneficiary: &Address) -> Option<&VestingSchedule> {
        self.vesting.get(beneficiary)
    }

    pub fn airdrop_entry(&self, recipient: &Address) -> Option<&AirdropEntry> {
        self.airdrop.get(recipient)
    }

    pub fn faucet_settings(&self) -> FaucetSettings {
        self.faucet.settings()
    }

    pub fn next_faucet_claim(&self, caller: &Address) -> Timestamp {
        self.faucet.next_claim_at(caller)
    }

    pub fn allocation_plan(&self) -> &AllocationPlan {
        &self.allocation
    }

    pub fn is_tokenomics_initialized(&self) -> bool {
        self.tokenomics_initialized
    }

    /// Iterate over every known balance.
    pub fn balances(&self) -> impl Iterator<Item = (&Address, &TokenAmount)> {
        self.supply.balances()
    }

    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary {
            owner: self.access.owner().clone(),
            asset: self.asset.clone(),
            max_supply: self.supply.max_supply(),
            total_supply: self.supply.total_supply(),
            total_minted: self.supply.total_minted(),
            total_burned: self.supply.total_burned(),
            holders: self.supply.holder_count(),
            vesting_schedules: self.vesting.len(),
            airdrop_entries: self.airdrop.len(),
            tokenomics_initialized: self.tokenomics_initialized,
        }
    }

    // ── Supply ─────────────────────────────────────────────────────────

    /// Owner mint, bounded by the cap.
    pub fn mint(
        &mut self,
        caller: &Address,
        to: &Address,
        amount: TokenAmount,
    ) -> Result<(), LedgerError> {
        self.access.ensure_owner(caller)?;
        if amount.is_zero() {
            return Err(LedgerError::ZeroAmount);
        }
        self.supply.mint(to, amount).inspect_err(|e| {
            debug!(%to, %amount, error = %e, "mint rejected");
        })?;
        self.commit(vec![LedgerEvent::TokensMinted {
            to: to.clone(),
            amount,
        }]);
        info!(%to, %amount, total_supply = %self.supply.total_supply(), "minted");
        Ok(())
    }

    /// Burn from the caller's own balance.
    pub fn burn(&mut self, caller: &Address, amount: TokenAmount) -> Result<(), LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::ZeroAmount);
        }
        self.supply.burn(caller, amount).inspect_err(|e| {
            debug!(%caller, %amount, error = %e, "burn rejected");
        })?;
        self.commit(vec![LedgerEvent::TokensBurned {
            from: caller.clone(),
            amount,
        }]);
        info!(%caller, %amount, total_burned = %self.supply.total_burned(), "burned");
        Ok(())
    }

    /// Move tokens from the caller to `to`.
    pub fn transfer(
        &mut self,
        caller: &Address,
        to: &Address,
        amount: TokenAmount,
    ) -> Result<(), LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::ZeroAmount);
        }
        self.supply.transfer(caller, to, amount)?;
        self.commit(vec![LedgerEvent::Transfer {
            from: caller.clone(),
            to: to.clone(),
            amount,
        }]);
        debug!(from = %caller, %to, %amount, "transfer");
        Ok(())
    }

    pub fn transfer_ownership(
        &mut self,
        caller: &Address,
        new_owner: Address,
    ) -> Result<(), LedgerError> {
        let previous = self.access.transfer(caller, new_owner.clone())?;
        info!(%previous, %new_owner, "ownership transferred");
        self.commit(vec![LedgerEvent::OwnershipTransferred {
            previous,
            new_owner,
        }]);
        Ok(())
    }

    // ── Vesting ────────────────────────────────────────────────────────

    /// Create a vesting schedule for `beneficiary` starting at `now`.
    pub fn add_vesting(
        &mut self,
        caller: &Address,
        beneficiary: &Address,
        amount: TokenAmount,
        cliff_secs: u64,
        duration_secs: u64,
        now: Timestamp,
    ) -> Result<(), LedgerError> {
        self.access.ensure_owner(caller)?;
        self.vesting
            .add(beneficiary, amount, cliff_secs, duration_secs, now)
            .inspect_err(|e| debug!(%beneficiary, error = %e, "vesting rejected"))?;
        info!(%beneficiary, %amount, cliff_secs, duration_secs, "vesting added");
        self.commit(vec![LedgerEvent::VestingAdded {
            beneficiary: beneficiary.clone(),
            amount,
            start_time: now,
            cliff_secs,
            duration_secs,
        }]);
        Ok(())
    }

    /// Release everything vested so far to the caller's own balance.
    pub fn release_vested_tokens(
        &mut self,
        caller: &Address,
        now: Timestamp,
    ) -> Result<TokenAmount, LedgerError> {
        let amount = self
            .vesting
            .releasable(caller, now)
            .inspect_err(|e| debug!(%caller, %now, error = %e, "release rejected"))?;
        // Mint first: it is the only step that can still fail, and it writes
        // nothing when it does.
        self.supply.mint(caller, amount)?;
        let released_total = self.vesting.record_release(caller, amount)?;
        info!(beneficiary = %caller, %amount, %released_total, "vested tokens released");
        self.commit(vec![LedgerEvent::TokensReleased {
            beneficiary: caller.clone(),
            amount,
            released_total,
        }]);
        Ok(amount)
    }

    pub fn get_vested_amount(
        &self,
        beneficiary: &Address,
        now: Timestamp,
    ) -> Result<VestingQuote, LedgerError> {
        self.vesting.quote(beneficiary, now)
    }

    pub fn get_all_vesting_addresses(&self) -> &[Address] {
        self.vesting.addresses()
    }

    // ── Airdrop ────────────────────────────────────────────────────────

    pub fn set_airdrop_list(
        &mut self,
        caller: &Address,
        recipients: &[Address],
        amounts: &[TokenAmount],
    ) -> Result<(), LedgerError> {
        self.access.ensure_owner(caller)?;
        self.airdrop.set_list(recipients, amounts)?;
        info!(entries = recipients.len(), "airdrop list set");
        self.commit(vec![LedgerEvent::AirdropSet {
            recipients: recipients.to_vec(),
            amounts: amounts.to_vec(),
        }]);
        Ok(())
    }

    pub fn claim_airdrop(&mut self, caller: &Address) -> Result<TokenAmount, LedgerError> {
        let amount = self
            .airdrop
            .claimable(caller)
            .inspect_err(|e| debug!(%caller, error = %e, "airdrop claim rejected"))?;
        self.supply.mint(caller, amount)?;
        self.airdrop.mark_claimed(caller);
        info!(recipient = %caller, %amount, "airdrop claimed");
        self.commit(vec![LedgerEvent::AirdropClaimed {
            recipient: caller.clone(),
            amount,
        }]);
        Ok(amount)
    }

    // ── Faucet ─────────────────────────────────────────────────────────

    pub fn faucet_mint(&mut self, caller: &Address, now: Timestamp) -> Result<TokenAmount, LedgerError> {
        let drip = self
            .faucet
            .claimable(caller, now)
            .inspect_err(|e| debug!(%caller, error = %e, "faucet claim rejected"))?;
        self.supply.mint(caller, drip)?;
        self.faucet.record_claim(caller, now);
        info!(recipient = %caller, amount = %drip, "faucet claimed");
        self.commit(vec![LedgerEvent::FaucetClaimed {
            recipient: caller.clone(),
            amount: drip,
            at: now,
        }]);
        Ok(drip)
    }

    pub fn update_faucet_settings(
        &mut self,
        caller: &Address,
        drip: TokenAmount,
        cool_down_secs: u64,
    ) -> Result<(), LedgerError> {
        self.access.ensure_owner(caller)?;
        self.faucet.update(FaucetSettings {
            drip,
            cool_down_secs,
        });
        info!(%drip, cool_down_secs, "faucet settings updated");
        self.commit(vec![LedgerEvent::FaucetSettingsUpdated {
            drip,
            cool_down_secs,
        }]);
        Ok(())
    }

    // ── Bootstrap ──────────────────────────────────────────────────────

    /// Apply the allocation plan. Runs at most once over the ledger's life.
    pub fn init_tokenomics(&mut self, caller: &Address, now: Timestamp) -> Result<(), LedgerError> {
        self.access.ensure_owner(caller)?;
        if self.tokenomics_initialized {
            return Err(LedgerError::AlreadyInitialized);
        }
        let plan = self.allocation.clone();
        for grant in &plan.vesting {
            self.vesting
                .ensure_can_add(&grant.beneficiary, grant.amount, grant.duration_secs)?;
        }
        let minted_total = plan.minted_total()?;
        let vesting_total = plan.vesting_total()?;

        let grants: Vec<(Address, TokenAmount)> = plan
            .mints
            .iter()
            .map(|m| (m.recipient.clone(), m.amount))
            .collect();
        self.supply.mint_many(&grants)?;

        let mut events = Vec::with_capacity(plan.mints.len() + plan.vesting.len() + 1);
        for m in &plan.mints {
            events.push(LedgerEvent::TokensMinted {
                to: m.recipient.clone(),
                amount: m.amount,
            });
        }
        for grant in &plan.vesting {
            self.vesting.add(
                &grant.beneficiary,
                grant.amount,
                grant.cliff_secs,
                grant.duration_secs,
                now,
            )?;
            events.push(LedgerEvent::VestingAdded {
                beneficiary: grant.beneficiary.clone(),
                amount: grant.amount,
                start_time: now,
                cliff_secs: grant.cliff_secs,
                duration_secs: grant.duration_secs,
            });
        }
        self.tokenomics_initialized = true;
        events.push(LedgerEvent::AllocationInitialized {
            mint_recipients: plan.mint_recipients(),
            minted_total,
            vesting_beneficiaries: plan.vesting_beneficiaries(),
            vesting_total,
        });
        info!(%minted_total, %vesting_total, "tokenomics initialized");
        self.commit(events);
        Ok(())
    }

    // ── Rescue ─────────────────────────────────────────────────────────

    /// Move a foreign asset out of this ledger's custody address.
    pub fn rescue_erc20(
        &mut self,
        caller: &Address,
        token: &Address,
        amount: u128,
        to: &Address,
        custody: &dyn ForeignCustody,
    ) -> Result<(), LedgerError> {
        self.access.ensure_owner(caller)?;
        if *token == self.asset {
            return Err(LedgerError::InvalidTokenProvided {
                token: token.clone(),
            });
        }
        custody.transfer(token, &self.asset, to, amount)?;
        info!(%token, %to, amount, "foreign tokens rescued");
        self.commit(vec![LedgerEvent::TokensRescued {
            token: token.clone(),
            to: to.clone(),
            amount,
        }]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use vestra_nullables::{NullClock, NullCustody};
    use vestra_types::SECS_PER_MONTH;

    use crate::allocation::AllocationAddresses;

    fn addr(s: &str) -> Address {
        Address::new(format!("vx_{s}"))
    }

    fn tokens(n: u64) -> TokenAmount {
        TokenAmount::from_tokens(n)
    }

    fn owner() -> Address {
        addr("owner")
    }

    fn params() -> LedgerParams {
        LedgerParams {
            owner: owner(),
            asset: addr("vestra"),
            initial_supply: tokens(500_000),
            max_supply: tokens(10_000_000),
            faucet: FaucetSettings {
                drip: tokens(100),
                cool_down_secs: 3600,
            },
            allocation: AllocationPlan::standard(&AllocationAddresses::default()),
        }
    }

    fn make_ledger() -> Ledger {
        Ledger::new(params()).unwrap()
    }

    #[test]
    fn constructor_mints_initial_supply_to_owner() {
        let ledger = make_ledger();
        assert_eq!(ledger.balance_of(&owner()), tokens(500_000));
        assert_eq!(ledger.total_supply(), tokens(500_000));
        assert_eq!(ledger.max_supply(), tokens(10_000_000));
        assert_eq!(
            ledger.pending_events(),
            &[LedgerEvent::TokensMinted {
                to: owner(),
                amount: tokens(500_000)
            }]
        );
    }

    #[test]
    fn constructor_rejects_initial_at_or_above_cap() {
        let mut p = params();
        p.initial_supply = p.max_supply;
        assert!(matches!(
            Ledger::new(p),
            Err(LedgerError::InitSupplyGreaterThanCap { .. })
        ));
    }

    #[test]
    fn zero_initial_supply_emits_nothing() {
        let mut p = params();
        p.initial_supply = TokenAmount::ZERO;
        let ledger = Ledger::new(p).unwrap();
        assert!(ledger.pending_events().is_empty());
        assert_eq!(ledger.total_supply(), TokenAmount::ZERO);
    }

    #[test]
    fn mint_requires_owner() {
        let mut ledger = make_ledger();
        let err = ledger.mint(&addr("eve"), &addr("eve"), tokens(1)).unwrap_err();
        assert_eq!(err, LedgerError::Unauthorized { caller: addr("eve") });
        assert_eq!(ledger.balance_of(&addr("eve")), TokenAmount::ZERO);
    }

    #[test]
    fn mint_beyond_cap_fails() {
        let mut ledger = make_ledger();
        ledger.mint(&owner(), &addr("a"), tokens(9_500_000)).unwrap();
        assert!(matches!(
            ledger.mint(&owner(), &addr("a"), TokenAmount::new(1)),
            Err(LedgerError::MaxSupplyExceeded { .. })
        ));
    }

    #[test]
    fn zero_amounts_rejected() {
        let mut ledger = make_ledger();
        assert_eq!(
            ledger.mint(&owner(), &addr("a"), TokenAmount::ZERO).unwrap_err(),
            LedgerError::ZeroAmount
        );
        assert_eq!(ledger.burn(&owner(), TokenAmount::ZERO).unwrap_err(), LedgerError::ZeroAmount);
        assert_eq!(
            ledger.transfer(&owner(), &addr("a"), TokenAmount::ZERO).unwrap_err(),
            LedgerError::ZeroAmount
        );
    }

    #[test]
    fn burn_updates_counters_and_emits() {
        let mut ledger = make_ledger();
        ledger.drain_events();
        ledger.burn(&owner(), tokens(100)).unwrap();
        assert_eq!(ledger.total_supply(), tokens(499_900));
        assert_eq!(ledger.total_burned(), tokens(100));
        assert_eq!(
            ledger.drain_events(),
            vec![LedgerEvent::TokensBurned {
                from: owner(),
                amount: tokens(100)
            }]
        );
    }

    #[test]
    fn failed_operation_emits_nothing() {
        let mut ledger = make_ledger();
        ledger.drain_events();
        assert!(ledger.burn(&addr("pauper"), tokens(1)).is_err());
        assert!(ledger.claim_airdrop(&addr("pauper")).is_err());
        assert!(ledger.release_vested_tokens(&addr("pauper"), Timestamp::new(0)).is_err());
        assert!(ledger.pending_events().is_empty());
    }

    #[test]
    fn release_follows_linear_schedule() {
        let clock = NullClock::new(1_000);
        let mut ledger = make_ledger();
        let a = addr("beneficiary");
        ledger
            .add_vesting(&owner(), &a, tokens(1200), SECS_PER_MONTH, 12 * SECS_PER_MONTH, clock.now())
            .unwrap();

        clock.advance(SECS_PER_MONTH - 1);
        assert!(matches!(
            ledger.release_vested_tokens(&a, clock.now()),
            Err(LedgerError::CliffNotReached { .. })
        ));

        clock.advance(1);
        assert_eq!(ledger.release_vested_tokens(&a, clock.now()).unwrap(), tokens(100));
        assert!(matches!(
            ledger.release_vested_tokens(&a, clock.now()),
            Err(LedgerError::NothingToRelease { .. })
        ));

        clock.advance_months(20);
        assert_eq!(ledger.release_vested_tokens(&a, clock.now()).unwrap(), tokens(1100));
        assert_eq!(ledger.balance_of(&a), tokens(1200));
        assert_eq!(ledger.vesting_schedule(&a).unwrap().released, tokens(1200));
    }

    #[test]
    fn release_blocked_by_cap_leaves_schedule_untouched() {
        let mut p = params();
        p.max_supply = tokens(500_010);
        let mut ledger = Ledger::new(p).unwrap();
        let a = addr("a");
        ledger.add_vesting(&owner(), &a, tokens(100), 0, 10, Timestamp::new(0)).unwrap();
        let err = ledger.release_vested_tokens(&a, Timestamp::new(10)).unwrap_err();
        assert!(matches!(err, LedgerError::MaxSupplyExceeded { .. }));
        assert_eq!(ledger.vesting_schedule(&a).unwrap().released, TokenAmount::ZERO);
    }

    #[test]
    fn huge_allocation_vests_linearly() {
        let mut p = params();
        p.initial_supply = TokenAmount::ZERO;
        p.max_supply = TokenAmount::new(u128::MAX);
        let mut ledger = Ledger::new(p).unwrap();
        let a = addr("whale");
        let total = TokenAmount::new(1_000_000_000_000_000 * vestra_types::TOKEN_UNIT);
        ledger
            .add_vesting(&owner(), &a, total, 0, 24 * SECS_PER_MONTH, Timestamp::new(0))
            .unwrap();

        let half = Timestamp::new(12 * SECS_PER_MONTH);
        let quote = ledger.get_vested_amount(&a, half).unwrap();
        assert_eq!(quote.vested, TokenAmount::new(total.raw() / 2));
        assert_eq!(ledger.release_vested_tokens(&a, half).unwrap(), quote.vested);
        assert_eq!(ledger.balance_of(&a), quote.vested);
    }

    #[test]
    fn add_vesting_requires_owner_and_lists_address_once() {
        let mut ledger = make_ledger();
        assert!(matches!(
            ledger.add_vesting(&addr("eve"), &addr("eve"), tokens(1), 0, 1, Timestamp::new(0)),
            Err(LedgerError::Unauthorized { .. })
        ));
        ledger.add_vesting(&owner(), &addr("a"), tokens(1), 0, 1, Timestamp::new(0)).unwrap();
        ledger.add_vesting(&owner(), &addr("b"), tokens(1), 0, 1, Timestamp::new(0)).unwrap();
        assert_eq!(ledger.get_all_vesting_addresses(), &[addr("a"), addr("b")]);
    }

    #[test]
    fn vesting_rewrite_never_mints_twice() {
        let mut ledger = make_ledger();
        let a = addr("a");
        ledger.add_vesting(&owner(), &a, tokens(100), 0, 10, Timestamp::new(0)).unwrap();
        assert_eq!(ledger.release_vested_tokens(&a, Timestamp::new(10)).unwrap(), tokens(100));

        assert_eq!(
            ledger.add_vesting(&owner(), &a, tokens(150), 0, 0, Timestamp::new(10)).unwrap_err(),
            LedgerError::AlreadyVested { beneficiary: a.clone() }
        );
        ledger.add_vesting(&owner(), &a, tokens(150), 0, 10, Timestamp::new(10)).unwrap();
        assert_eq!(ledger.vesting_schedule(&a).unwrap().released, tokens(100));
        assert_eq!(ledger.release_vested_tokens(&a, Timestamp::new(20)).unwrap(), tokens(50));
        assert_eq!(ledger.balance_of(&a), tokens(150));
        assert_eq!(ledger.get_all_vesting_addresses(), &[a]);
    }

    #[test]
    fn airdrop_flow() {
        let mut ledger = make_ledger();
        let x = addr("x");
        assert!(matches!(ledger.claim_airdrop(&x), Err(LedgerError::NotEligible { .. })));
        ledger.set_airdrop_list(&owner(), &[x.clone()], &[tokens(1000)]).unwrap();
        assert_eq!(ledger.claim_airdrop(&x).unwrap(), tokens(1000));
        assert_eq!(ledger.balance_of(&x), tokens(1000));
        assert!(ledger.airdrop_entry(&x).unwrap().claimed);
        assert_eq!(
            ledger.claim_airdrop(&x).unwrap_err(),
            LedgerError::AlreadyClaimed { recipient: x.clone() }
        );
    }

    #[test]
    fn airdrop_list_requires_owner() {
        let mut ledger = make_ledger();
        assert!(matches!(
            ledger.set_airdrop_list(&addr("eve"), &[addr("eve")], &[tokens(1)]),
            Err(LedgerError::Unauthorized { .. })
        ));
    }

    #[test]
    fn faucet_cooldown_then_success() {
        let clock = NullClock::new(50);
        let mut ledger = make_ledger();
        let c = addr("c");
        assert_eq!(ledger.faucet_mint(&c, clock.now()).unwrap(), tokens(100));
        clock.advance(3599);
        assert!(matches!(
            ledger.faucet_mint(&c, clock.now()),
            Err(LedgerError::FaucetCoolDownInProgress { remaining_secs: 1, .. })
        ));
        clock.advance(1);
        assert_eq!(ledger.faucet_mint(&c, clock.now()).unwrap(), tokens(100));
        assert_eq!(ledger.balance_of(&c), tokens(200));
        assert_eq!(ledger.next_faucet_claim(&c), Timestamp::new(50 + 3600 + 3600));
    }

    #[test]
    fn faucet_respects_cap() {
        let mut p = params();
        p.max_supply = tokens(500_050);
        let mut ledger = Ledger::new(p).unwrap();
        let err = ledger.faucet_mint(&addr("c"), Timestamp::new(0)).unwrap_err();
        assert!(matches!(err, LedgerError::MaxSupplyExceeded { .. }));
        // A refused claim does not start the cooldown.
        assert_eq!(ledger.next_faucet_claim(&addr("c")), Timestamp::EPOCH);
    }

    #[test]
    fn faucet_settings_owner_only() {
        let mut ledger = make_ledger();
        assert!(ledger
            .update_faucet_settings(&addr("eve"), tokens(1), 1)
            .is_err());
        ledger.update_faucet_settings(&owner(), TokenAmount::ZERO, 0).unwrap();
        assert_eq!(ledger.faucet_settings().drip, TokenAmount::ZERO);
        assert_eq!(ledger.faucet_mint(&addr("c"), Timestamp::new(0)).unwrap(), TokenAmount::ZERO);
    }

    #[test]
    fn init_tokenomics_once() {
        let mut ledger = make_ledger();
        let addresses = AllocationAddresses::default();
        ledger.init_tokenomics(&owner(), Timestamp::new(77)).unwrap();

        assert!(ledger.is_tokenomics_initialized());
        assert_eq!(ledger.balance_of(&addresses.ecosystem), tokens(1_500_000));
        assert_eq!(ledger.balance_of(&addresses.liquidity), tokens(1_000_000));
        assert_eq!(ledger.total_supply(), tokens(3_000_000));
        let team = ledger.vesting_schedule(&addresses.team).unwrap();
        assert_eq!(team.total_allocated, tokens(2_000_000));
        assert_eq!(team.start_time, Timestamp::new(77));
        assert_eq!(
            ledger.get_all_vesting_addresses(),
            &[addresses.team.clone(), addresses.advisor.clone()]
        );

        assert_eq!(
            ledger.init_tokenomics(&owner(), Timestamp::new(78)).unwrap_err(),
            LedgerError::AlreadyInitialized
        );
        assert_eq!(ledger.total_supply(), tokens(3_000_000));
    }

    #[test]
    fn init_tokenomics_is_atomic_when_schedule_exists() {
        let mut ledger = make_ledger();
        let team = AllocationAddresses::default().team;
        ledger.add_vesting(&owner(), &team, tokens(3_000_000), 0, 1, Timestamp::new(0)).unwrap();
        ledger.release_vested_tokens(&team, Timestamp::new(1)).unwrap();
        ledger.drain_events();
        let supply_before = ledger.total_supply();
        assert_eq!(supply_before, tokens(3_500_000));

        // The 2M team grant would land below the 3M already released.
        assert!(matches!(
            ledger.init_tokenomics(&owner(), Timestamp::new(2)),
            Err(LedgerError::AllocationBelowReleased { .. })
        ));
        assert_eq!(ledger.total_supply(), supply_before);
        assert!(!ledger.is_tokenomics_initialized());
        assert!(ledger.pending_events().is_empty());
    }

    #[test]
    fn init_tokenomics_is_atomic_when_cap_too_small() {
        let mut p = params();
        p.max_supply = tokens(2_000_000);
        let mut ledger = Ledger::new(p).unwrap();
        assert!(matches!(
            ledger.init_tokenomics(&owner(), Timestamp::new(0)),
            Err(LedgerError::MaxSupplyExceeded { .. })
        ));
        assert!(ledger.get_all_vesting_addresses().is_empty());
        assert!(!ledger.is_tokenomics_initialized());
    }

    #[test]
    fn rescue_rejects_own_asset_regardless_of_amount() {
        let mut ledger = make_ledger();
        let custody = NullCustody::new();
        for amount in [0u128, 1, u128::MAX] {
            let err = ledger
                .rescue_erc20(&owner(), &addr("vestra"), amount, &owner(), &custody)
                .unwrap_err();
            assert_eq!(err, LedgerError::InvalidTokenProvided { token: addr("vestra") });
        }
        assert!(custody.transfers().is_empty());
    }

    #[test]
    fn rescue_moves_foreign_asset() {
        let mut ledger = make_ledger();
        let custody = NullCustody::new();
        custody.deposit(&addr("usdc"), &addr("vestra"), 900);
        ledger
            .rescue_erc20(&owner(), &addr("usdc"), 400, &addr("treasury"), &custody)
            .unwrap();
        assert_eq!(custody.balance_of(&addr("usdc"), &addr("treasury")).unwrap(), 400);
        assert_eq!(
            ledger.pending_events().last(),
            Some(&LedgerEvent::TokensRescued {
                token: addr("usdc"),
                to: addr("treasury"),
                amount: 400
            })
        );
    }

    #[test]
    fn rescue_surfaces_custody_failure() {
        let mut ledger = make_ledger();
        let custody = NullCustody::new();
        let err = ledger
            .rescue_erc20(&owner(), &addr("usdc"), 1, &owner(), &custody)
            .unwrap_err();
        assert!(matches!(err, LedgerError::Custody(_)));
        assert!(matches!(
            ledger.rescue_erc20(&addr("eve"), &addr("usdc"), 1, &addr("eve"), &custody),
            Err(LedgerError::Unauthorized { .. })
        ));
    }

    #[test]
    fn listeners_observe_committed_state_only() {
        let mut ledger = make_ledger();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        ledger.subscribe(Box::new(move |event| {
            sink.lock().unwrap().push(event.name());
        }));

        ledger.mint(&owner(), &addr("a"), tokens(5)).unwrap();
        let _ = ledger.mint(&addr("eve"), &addr("a"), tokens(5));
        ledger.transfer(&addr("a"), &addr("b"), tokens(2)).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec!["tokens_minted", "transfer"]);
    }

    #[test]
    fn ownership_transfer_moves_admin_rights() {
        let mut ledger = make_ledger();
        ledger.transfer_ownership(&owner(), addr("next")).unwrap();
        assert_eq!(ledger.owner(), &addr("next"));
        assert!(ledger.mint(&owner(), &addr("a"), tokens(1)).is_err());
        ledger.mint(&addr("next"), &addr("a"), tokens(1)).unwrap();
    }

    #[test]
    fn summary_reflects_state() {
        let mut ledger = make_ledger();
        ledger.init_tokenomics(&owner(), Timestamp::new(0)).unwrap();
        ledger.burn(&owner(), tokens(10)).unwrap();
        let s = ledger.summary();
        assert_eq!(s.total_supply, tokens(2_999_990));
        assert_eq!(s.total_minted, tokens(3_000_000));
        assert_eq!(s.total_burned, tokens(10));
        assert_eq!(s.holders, 3);
        assert_eq!(s.vesting_schedules, 2);
        assert!(s.tokenomics_initialized);
    }
}
