//! # Error Types
//!
//! Every rejection aborts the whole call and carries a distinguishable reason.

use crate::domain::value_objects::{Address, Timestamp, U256};
use thiserror::Error;

// =============================================================================
// SALE ERRORS
// =============================================================================

/// Reasons a sale operation is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SaleError {
    /// Purchase attempted while the sale is paused (or `pause` while paused).
    #[error("sale is paused")]
    Paused,

    /// `unpause` called while the sale is running.
    #[error("sale is not paused")]
    NotPaused,

    /// Purchase outside `[opening_time, closing_time)`.
    #[error("outside sale window: now={now}, opening={opening}, closing={closing}")]
    OutsideWindow {
        /// Block timestamp of the call.
        now: Timestamp,
        /// Opening time.
        opening: Timestamp,
        /// Current closing time.
        closing: Timestamp,
    },

    /// Beneficiary is not in tier A during the tier-A-only phase.
    #[error("beneficiary {0} is not whitelisted for tier A")]
    NotWhitelistedForTierA(Address),

    /// Beneficiary is in neither tier.
    #[error("beneficiary {0} is not whitelisted")]
    NotWhitelisted(Address),

    /// Contribution under the configured floor.
    #[error("contribution {amount} below minimum {minimum}")]
    BelowMinimum {
        /// Attached amount.
        amount: U256,
        /// Configured minimum.
        minimum: U256,
    },

    /// Beneficiary's running total would exceed the individual ceiling.
    #[error("per-participant cap exceeded: {attempted} > {cap}")]
    PerParticipantCapExceeded {
        /// Running total including this contribution.
        attempted: U256,
        /// Configured ceiling.
        cap: U256,
    },

    /// Raised currency would exceed the currency cap.
    #[error("global currency cap exceeded: {attempted} > {cap}")]
    GlobalCurrencyCapExceeded {
        /// Raised total including this contribution.
        attempted: U256,
        /// Currency cap.
        cap: U256,
    },

    /// Sold asset would exceed the asset cap.
    #[error("global asset cap exceeded: {attempted} > {cap}")]
    GlobalAssetCapExceeded {
        /// Sold total including this allocation.
        attempted: U256,
        /// Asset cap.
        cap: U256,
    },

    /// Anti-automation throttle.
    #[error("priority fee {offered} above ceiling {ceiling}")]
    PriorityFeeTooHigh {
        /// Fee declared by the sender.
        offered: U256,
        /// Configured ceiling.
        ceiling: U256,
    },

    /// Non-owner called an owner-only operation.
    #[error("caller {0} is not the sale owner")]
    Unauthorized(Address),

    /// Sale was already settled.
    #[error("sale already finalized")]
    AlreadyFinalized,

    /// Finalization attempted while the window is still open.
    #[error("sale has not closed yet (closing at {closing})")]
    NotYetClosed {
        /// Current closing time.
        closing: Timestamp,
    },

    /// Early close attempted after the window already closed.
    #[error("sale already closed")]
    AlreadyClosed,

    /// Early close that would extend the window.
    #[error("invalid early close: requested {requested} after current closing {current}")]
    InvalidEarlyClose {
        /// Requested closing time.
        requested: Timestamp,
        /// Current closing time.
        current: Timestamp,
    },

    /// Rate conversion or accumulation overflowed.
    #[error("arithmetic overflow")]
    ArithmeticOverflow,

    /// Construction parameters rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// Asset ledger refused an interaction.
    #[error("asset ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Currency forwarding failed.
    #[error("bank error: {0}")]
    Bank(#[from] BankError),
}

impl SaleError {
    /// Stable label for logs and metrics.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Paused => "paused",
            Self::NotPaused => "not_paused",
            Self::OutsideWindow { .. } => "outside_window",
            Self::NotWhitelistedForTierA(_) => "not_whitelisted_tier_a",
            Self::NotWhitelisted(_) => "not_whitelisted",
            Self::BelowMinimum { .. } => "below_minimum",
            Self::PerParticipantCapExceeded { .. } => "per_participant_cap",
            Self::GlobalCurrencyCapExceeded { .. } => "currency_cap",
            Self::GlobalAssetCapExceeded { .. } => "asset_cap",
            Self::PriorityFeeTooHigh { .. } => "priority_fee",
            Self::Unauthorized(_) => "unauthorized",
            Self::AlreadyFinalized => "already_finalized",
            Self::NotYetClosed { .. } => "not_yet_closed",
            Self::AlreadyClosed => "already_closed",
            Self::InvalidEarlyClose { .. } => "invalid_early_close",
            Self::ArithmeticOverflow => "overflow",
            Self::InvalidConfig(_) => "invalid_config",
            Self::Ledger(_) => "ledger",
            Self::Bank(_) => "bank",
        }
    }
}

// =============================================================================
// CONFIG ERRORS
// =============================================================================

/// Construction parameter violations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Rate must be positive.
    #[error("rate must be non-zero")]
    ZeroRate,

    /// A cap is zero.
    #[error("{0} cap must be non-zero")]
    ZeroCap(&'static str),

    /// A wallet is the zero address.
    #[error("{0} must not be the zero address")]
    ZeroAddress(&'static str),

    /// Minimum above the individual maximum.
    #[error("minimum contribution {min} exceeds per-participant maximum {max}")]
    MinimumAboveMaximum {
        /// Minimum contribution.
        min: U256,
        /// Per-participant maximum.
        max: U256,
    },

    /// Times are not ordered `opening <= tier_b_opening < closing`.
    #[error("invalid schedule: opening={opening}, tier_b={tier_b}, closing={closing}")]
    InvalidSchedule {
        /// Opening time.
        opening: Timestamp,
        /// Tier B opening time.
        tier_b: Timestamp,
        /// Closing time.
        closing: Timestamp,
    },

    /// Opening time lies in the past at construction.
    #[error("opening time {opening} is before current time {now}")]
    OpeningInPast {
        /// Opening time.
        opening: Timestamp,
        /// Construction time.
        now: Timestamp,
    },

    /// JSON decoding failed.
    #[error("malformed config: {0}")]
    Malformed(String),
}

// =============================================================================
// PORT ERRORS
// =============================================================================

/// Errors raised by the asset ledger.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Ledger transfers are paused by its own pause gate.
    #[error("asset ledger is paused")]
    Paused,

    /// Caller does not control the ledger.
    #[error("caller is not the ledger owner")]
    NotOwner,

    /// Holder balance too low.
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        /// Amount requested.
        required: U256,
        /// Amount held.
        available: U256,
    },

    /// Supply accounting overflowed.
    #[error("supply overflow")]
    Overflow,

    /// Transfer to the zero address.
    #[error("invalid recipient")]
    InvalidRecipient,
}

/// Errors raised while forwarding currency.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BankError {
    /// Recipient refused the deposit.
    #[error("deposit to {0} rejected")]
    Rejected(Address),

    /// Balance accounting overflowed.
    #[error("balance overflow")]
    Overflow,
}
