//! # Sale Configuration
//!
//! Construction parameters, fixed for the lifetime of the sale.

use super::value_objects::{Address, Timestamp, GWEI, U256};
use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};

/// Default priority fee ceiling (50 gwei).
pub const DEFAULT_MAX_PRIORITY_FEE_GWEI: u64 = 50;

/// Immutable sale parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleConfig {
    /// Asset subunits allocated per currency unit.
    pub rate: U256,
    /// Receives forwarded currency.
    pub bank: Address,
    /// Receives the reserve allocation at settlement.
    pub reserve_wallet: Address,
    /// Receives assets for administratively recorded sales.
    pub off_ledger_wallet: Address,
    /// The sale's own account on the asset ledger.
    pub sale_address: Address,
    /// Ceiling on `currency_raised`.
    pub currency_cap: U256,
    /// Ceiling on `asset_sold`.
    pub asset_cap: U256,
    /// Smallest accepted contribution.
    pub min_contribution: U256,
    /// Ceiling on one participant's running contribution.
    pub max_per_participant: U256,
    /// Tier A admission opens.
    pub opening_time: Timestamp,
    /// Tier B admission opens.
    pub tier_b_opening_time: Timestamp,
    /// Initial closing time.
    pub closing_time: Timestamp,
    /// Anti-automation priority fee ceiling.
    #[serde(default = "default_max_priority_fee")]
    pub max_priority_fee: U256,
}

fn default_max_priority_fee() -> U256 {
    U256::from(DEFAULT_MAX_PRIORITY_FEE_GWEI) * U256::from(GWEI)
}

impl SaleConfig {
    /// Decode a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Malformed(e.to_string()))
    }

    /// Check the parameters against the sale's construction rules.
    ///
    /// `now` is the construction time; the window may not open in the past.
    pub fn validate(&self, now: Timestamp) -> Result<(), ConfigError> {
        if self.rate.is_zero() {
            return Err(ConfigError::ZeroRate);
        }
        if self.currency_cap.is_zero() {
            return Err(ConfigError::ZeroCap("currency"));
        }
        if self.asset_cap.is_zero() {
            return Err(ConfigError::ZeroCap("asset"));
        }
        for (name, addr) in [
            ("bank", self.bank),
            ("reserve wallet", self.reserve_wallet),
            ("off-ledger wallet", self.off_ledger_wallet),
            ("sale address", self.sale_address),
        ] {
            if addr.is_zero() {
                return Err(ConfigError::ZeroAddress(name));
            }
        }
        if self.min_contribution > self.max_per_participant {
            return Err(ConfigError::MinimumAboveMaximum {
                min: self.min_contribution,
                max: self.max_per_participant,
            });
        }
        if self.opening_time > self.tier_b_opening_time
            || self.tier_b_opening_time >= self.closing_time
        {
            return Err(ConfigError::InvalidSchedule {
                opening: self.opening_time,
                tier_b: self.tier_b_opening_time,
                closing: self.closing_time,
            });
        }
        if self.opening_time < now {
            return Err(ConfigError::OpeningInPast {
                opening: self.opening_time,
                now,
            });
        }
        Ok(())
    }
}
