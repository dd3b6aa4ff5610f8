//! # Admission Gate
//!
//! Decides whether a purchase for a beneficiary may proceed at a given time.
//!
//! ## Phases
//!
//! | Time | Admitted |
//! |------|----------|
//! | `now < opening_time` | nobody |
//! | `opening_time <= now < tier_b_opening_time` | tier A |
//! | `tier_b_opening_time <= now < closing_time` | tier A and tier B |
//! | `now >= closing_time` | nobody |

use super::config::SaleConfig;
use super::entities::SaleState;
use super::value_objects::{Address, Tier, Timestamp};
use crate::errors::SaleError;

/// Run the gate for `participant` at `now`.
///
/// Returns the tier the participant was admitted under.
pub fn admit(
    config: &SaleConfig,
    state: &SaleState,
    now: Timestamp,
    participant: &Address,
) -> Result<Tier, SaleError> {
    if state.paused {
        return Err(SaleError::Paused);
    }

    if now < config.opening_time || state.has_closed(now) {
        return Err(SaleError::OutsideWindow {
            now,
            opening: config.opening_time,
            closing: state.closing_time,
        });
    }

    let whitelist = &state.whitelist;
    if now < config.tier_b_opening_time {
        if whitelist.is_whitelisted(Tier::A, participant) {
            return Ok(Tier::A);
        }
        return Err(SaleError::NotWhitelistedForTierA(*participant));
    }

    whitelist
        .tier_of(participant)
        .ok_or(SaleError::NotWhitelisted(*participant))
}
