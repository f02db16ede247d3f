//! Notifications emitted by committed ledger operations.
//!
//! Events are staged while an operation runs and published only after every
//! write of that operation has landed. Listeners see `&LedgerEvent` and hold no
//! handle to the ledger, so a notification can never re-enter it or observe a
//! half-applied operation.

use serde::{Deserialize, Serialize};
use vestra_types::{Address, Timestamp, TokenAmount};

/// Ledger-level events for external auditing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// The one-shot bootstrap allocation ran.
    AllocationInitialized {
        mint_recipients: Vec<Address>,
        minted_total: TokenAmount,
        vesting_beneficiaries: Vec<Address>,
        vesting_total: TokenAmount,
    },
    /// Vested tokens were released to a beneficiary.
    TokensReleased {
        beneficiary: Address,
        amount: TokenAmount,
        released_total: TokenAmount,
    },
    AirdropClaimed {
        recipient: Address,
        amount: TokenAmount,
    },
    FaucetClaimed {
        recipient: Address,
        amount: TokenAmount,
        at: Timestamp,
    },
    FaucetSettingsUpdated {
        drip: TokenAmount,
        cool_down_secs: u64,
    },
    /// Supply was created. Emitted for admin mints and bootstrap mints;
    /// release, airdrop and faucet flows report through their own events.
    TokensMinted {
        to: Address,
        amount: TokenAmount,
    },
    /// A foreign asset was moved out of the ledger's custody address.
    TokensRescued {
        token: Address,
        to: Address,
        amount: u128,
    },
    VestingAdded {
        beneficiary: Address,
        amount: TokenAmount,
        start_time: Timestamp,
        cliff_secs: u64,
        duration_secs: u64,
    },
    AirdropSet {
        recipients: Vec<Address>,
        amounts: Vec<TokenAmount>,
    },
    TokensBurned {
        from: Address,
        amount: TokenAmount,
    },
    Transfer {
        from: Address,
        to: Address,
        amount: TokenAmount,
    },
    OwnershipTransferred {
        previous: Address,
        new_owner: Address,
    },
}

impl LedgerEvent {
    /// Short machine name of the event, matching its serialized tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AllocationInitialized { .. } => "allocation_initialized",
            Self::TokensReleased { .. } => "tokens_released",
            Self::AirdropClaimed { .. } => "airdrop_claimed",
            Self::FaucetClaimed { .. } => "faucet_claimed",
            Self::FaucetSettingsUpdated { .. } => "faucet_settings_updated",
            Self::TokensMinted { .. } => "tokens_minted",
            Self::TokensRescued { .. } => "tokens_rescued",
            Self::VestingAdded { .. } => "vesting_added",
            Self::AirdropSet { .. } => "airdrop_set",
            Self::TokensBurned { .. } => "tokens_burned",
            Self::Transfer { .. } => "transfer",
            Self::OwnershipTransferred { .. } => "ownership_transferred",
        }
    }

    /// Render as a single JSON audit line.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Synchronous fan-out event bus for ledger events.
///
/// Listeners are invoked inline after commit; keep handlers fast.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&LedgerEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&LedgerEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &LedgerEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Append-only record of committed events, drained by the host.
#[derive(Debug, Default)]
pub struct Outbox {
    events: Vec<LedgerEvent>,
}

impl Outbox {
    pub fn push(&mut self, event: LedgerEvent) {
        self.events.push(event);
    }

    /// Events committed since the last drain, oldest first.
    pub fn pending(&self) -> &[LedgerEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
