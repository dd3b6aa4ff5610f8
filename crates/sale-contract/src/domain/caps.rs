//! # Cap & Contribution Ledger
//!
//! Tracks raised currency, sold asset and per-participant totals.
//!
//! Validation and mutation are split: `try_reserve` / `try_record` only read
//! and return a [`Reservation`] holding the post-commit counter values, and
//! `commit` writes all counters in one step. A rejected check therefore never
//! leaves a partial update behind.

use super::config::SaleConfig;
use super::value_objects::{Address, U256};
use crate::errors::SaleError;
use std::collections::BTreeMap;
use tracing::debug;

/// Accepted allocation awaiting commit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reservation {
    /// Participant whose running total moves (`None` for recorded sales).
    pub participant: Option<Address>,
    /// Currency accounted by this reservation.
    pub currency_amount: U256,
    /// Asset allocated by this reservation.
    pub asset_amount: U256,
    currency_raised_after: U256,
    asset_sold_after: U256,
    contribution_after: Option<U256>,
}

/// Cumulative sale counters.
///
/// `currency_raised` and `asset_sold` are kept separately: recorded sales
/// move them independently of `rate`.
#[derive(Clone, Debug, Default)]
pub struct CapLedger {
    currency_raised: U256,
    asset_sold: U256,
    contributions: BTreeMap<Address, U256>,
}

impl CapLedger {
    /// Empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total currency accounted so far.
    #[must_use]
    pub fn currency_raised(&self) -> U256 {
        self.currency_raised
    }

    /// Total asset allocated so far.
    #[must_use]
    pub fn asset_sold(&self) -> U256 {
        self.asset_sold
    }

    /// Running contribution of `participant`.
    #[must_use]
    pub fn contribution_of(&self, participant: &Address) -> U256 {
        self.contributions
            .get(participant)
            .copied()
            .unwrap_or_default()
    }

    /// Iterate over `(participant, contribution)` pairs.
    pub fn contributions(&self) -> impl Iterator<Item = (&Address, &U256)> {
        self.contributions.iter()
    }

    /// Validate a participant contribution of `amount`.
    ///
    /// Checks run in order: minimum, rate conversion, individual ceiling,
    /// currency cap, asset cap.
    pub fn try_reserve(
        &self,
        config: &SaleConfig,
        participant: Address,
        amount: U256,
    ) -> Result<Reservation, SaleError> {
        if amount < config.min_contribution {
            return Err(SaleError::BelowMinimum {
                amount,
                minimum: config.min_contribution,
            });
        }

        let asset_amount = config
            .rate
            .checked_mul(amount)
            .ok_or(SaleError::ArithmeticOverflow)?;

        let contribution_after = self
            .contribution_of(&participant)
            .checked_add(amount)
            .ok_or(SaleError::ArithmeticOverflow)?;
        if contribution_after > config.max_per_participant {
            return Err(SaleError::PerParticipantCapExceeded {
                attempted: contribution_after,
                cap: config.max_per_participant,
            });
        }

        let (currency_raised_after, asset_sold_after) =
            self.check_global(config, amount, asset_amount)?;

        debug!(
            participant = %participant,
            currency = %amount,
            asset = %asset_amount,
            "contribution reserved"
        );

        Ok(Reservation {
            participant: Some(participant),
            currency_amount: amount,
            asset_amount,
            currency_raised_after,
            asset_sold_after,
            contribution_after: Some(contribution_after),
        })
    }

    /// Validate an off-ledger sale against the global caps only.
    pub fn try_record(
        &self,
        config: &SaleConfig,
        currency_amount: U256,
        asset_amount: U256,
    ) -> Result<Reservation, SaleError> {
        let (currency_raised_after, asset_sold_after) =
            self.check_global(config, currency_amount, asset_amount)?;

        Ok(Reservation {
            participant: None,
            currency_amount,
            asset_amount,
            currency_raised_after,
            asset_sold_after,
            contribution_after: None,
        })
    }

    fn check_global(
        &self,
        config: &SaleConfig,
        currency_amount: U256,
        asset_amount: U256,
    ) -> Result<(U256, U256), SaleError> {
        let raised = self
            .currency_raised
            .checked_add(currency_amount)
            .ok_or(SaleError::ArithmeticOverflow)?;
        if raised > config.currency_cap {
            return Err(SaleError::GlobalCurrencyCapExceeded {
                attempted: raised,
                cap: config.currency_cap,
            });
        }

        let sold = self
            .asset_sold
            .checked_add(asset_amount)
            .ok_or(SaleError::ArithmeticOverflow)?;
        if sold > config.asset_cap {
            return Err(SaleError::GlobalAssetCapExceeded {
                attempted: sold,
                cap: config.asset_cap,
            });
        }

        Ok((raised, sold))
    }

    /// Apply a reservation produced by this ledger.
    pub fn commit(&mut self, reservation: Reservation) {
        self.currency_raised = reservation.currency_raised_after;
        self.asset_sold = reservation.asset_sold_after;
        if let (Some(participant), Some(total)) =
            (reservation.participant, reservation.contribution_after)
        {
            self.contributions.insert(participant, total);
        }
    }
}
