//! # Domain Invariants
//!
//! Properties that MUST hold between any two transactions.
//!
//! - INVARIANT-1: `currency_raised <= currency_cap`, `asset_sold <= asset_cap`
//! - INVARIANT-2: every contribution total `<= max_per_participant`
//! - INVARIANT-3: `closing_time` never grows
//! - INVARIANT-4: `finalized` only after the window closed
//!
//! The checks read stored state only, never the caller's clock.

use super::config::SaleConfig;
use super::entities::SaleState;
use super::value_objects::Timestamp;

/// INVARIANT-1: Global caps.
#[must_use]
pub fn check_caps_invariant(config: &SaleConfig, state: &SaleState) -> bool {
    state.caps.currency_raised() <= config.currency_cap
        && state.caps.asset_sold() <= config.asset_cap
}

/// INVARIANT-2: Per-participant ceiling.
#[must_use]
pub fn check_participant_bound_invariant(config: &SaleConfig, state: &SaleState) -> bool {
    state
        .caps
        .contributions()
        .all(|(_, total)| *total <= config.max_per_participant)
}

/// INVARIANT-3: Closing time only shortens.
#[must_use]
pub fn check_closing_monotonic_invariant(previous: Timestamp, current: Timestamp) -> bool {
    current <= previous
}

/// INVARIANT-4: Finalization happened at or after the closing time.
#[must_use]
pub fn check_finalization_invariant(state: &SaleState) -> bool {
    match (state.finalized, state.finalized_at) {
        (false, None) => true,
        (true, Some(at)) => state.has_closed(at),
        _ => false,
    }
}

/// All state invariants at once.
#[must_use]
pub fn check_all_invariants(config: &SaleConfig, state: &SaleState) -> bool {
    check_caps_invariant(config, state)
        && check_participant_bound_invariant(config, state)
        && check_closing_monotonic_invariant(config.closing_time, state.closing_time)
        && check_finalization_invariant(state)
}
