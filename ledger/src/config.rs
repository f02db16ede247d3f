//! Ledger configuration with TOML file support.
//!
//! Supply figures are written in whole tokens and scaled to base units by
//! [`LedgerConfig::into_params`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use vestra_types::{Address, TokenAmount, SECS_PER_DAY};
use vestra_utils::{init_logging, LogFormat, LoggingError};

use crate::allocation::{AllocationAddresses, AllocationPlan};
use crate::error::ConfigError;
use crate::faucet::FaucetSettings;
use crate::ledger::LedgerParams;

/// Configuration for a Vestra ledger instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Initial owner; receives the initial supply.
    #[serde(default = "default_owner")]
    pub owner: Address,

    /// The ledger's own asset identity (also its custody address for rescue).
    #[serde(default = "default_asset")]
    pub asset: Address,

    #[serde(default = "default_initial_supply")]
    pub initial_supply_tokens: u64,

    #[serde(default = "default_max_supply")]
    pub max_supply_tokens: u64,

    #[serde(default)]
    pub faucet: FaucetConfig,

    /// Recipients of the bootstrap allocation.
    #[serde(default)]
    pub allocation: AllocationAddresses,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaucetConfig {
    #[serde(default = "default_drip")]
    pub drip_tokens: u64,

    #[serde(default = "default_cool_down")]
    pub cool_down_secs: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// "human" or "json".
    #[serde(default)]
    pub format: LogFormat,

    /// Filter directive, e.g. "info" or "debug,vestra_ledger=trace".
    #[serde(default = "default_log_level")]
    pub level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_owner() -> Address {
    Address::new("vx_owner")
}

fn default_asset() -> Address {
    Address::new("vx_vestra_token")
}

fn default_initial_supply() -> u64 {
    500_000
}

fn default_max_supply() -> u64 {
    10_000_000
}

fn default_drip() -> u64 {
    100
}

fn default_cool_down() -> u64 {
    SECS_PER_DAY
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl Default for FaucetConfig {
    fn default() -> Self {
        Self {
            drip_tokens: default_drip(),
            cool_down_secs: default_cool_down(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: default_log_level(),
        }
    }
}

impl LoggingConfig {
    /// Install the global subscriber described by this section.
    pub fn install(&self) -> Result<(), LoggingError> {
        init_logging(self.format, &self.level)
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            asset: default_asset(),
            initial_supply_tokens: default_initial_supply(),
            max_supply_tokens: default_max_supply(),
            faucet: FaucetConfig::default(),
            allocation: AllocationAddresses::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl LedgerConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Scale to base units and build the standard allocation plan.
    pub fn into_params(self) -> Result<LedgerParams, ConfigError> {
        let initial_supply = TokenAmount::from_tokens(self.initial_supply_tokens);
        let max_supply = TokenAmount::from_tokens(self.max_supply_tokens);
        if initial_supply >= max_supply {
            return Err(ConfigError::Invalid(format!(
                "initial_supply_tokens ({}) must be below max_supply_tokens ({})",
                self.initial_supply_tokens, self.max_supply_tokens
            )));
        }
        let allocation = AllocationPlan::standard(&self.allocation);
        allocation
            .check_unique_beneficiaries()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        Ok(LedgerParams {
            owner: self.owner,
            asset: self.asset,
            initial_supply,
            max_supply,
            faucet: FaucetSettings {
                drip: TokenAmount::from_tokens(self.faucet.drip_tokens),
                cool_down_secs: self.faucet.cool_down_secs,
            },
            allocation,
        })
    }
}
