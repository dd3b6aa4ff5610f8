//! # Domain Entities
//!
//! Mutable sale state and the admission whitelists.

use super::caps::CapLedger;
use super::config::SaleConfig;
use super::value_objects::{Address, Tier, Timestamp};
use std::collections::BTreeSet;

// =============================================================================
// WHITELIST
// =============================================================================

/// Two disjoint, addition-only admission sets.
#[derive(Clone, Debug, Default)]
pub struct Whitelist {
    tier_a: BTreeSet<Address>,
    tier_b: BTreeSet<Address>,
}

impl Whitelist {
    /// Empty whitelist.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `addr` belongs to `tier`.
    #[must_use]
    pub fn is_whitelisted(&self, tier: Tier, addr: &Address) -> bool {
        match tier {
            Tier::A => self.tier_a.contains(addr),
            Tier::B => self.tier_b.contains(addr),
        }
    }

    /// Tier `addr` is enrolled in, if any.
    #[must_use]
    pub fn tier_of(&self, addr: &Address) -> Option<Tier> {
        if self.tier_a.contains(addr) {
            Some(Tier::A)
        } else if self.tier_b.contains(addr) {
            Some(Tier::B)
        } else {
            None
        }
    }

    /// Enroll `addrs` into `tier`.
    ///
    /// Returns the addresses that were newly added. The zero address and
    /// addresses already in the other tier are skipped.
    pub fn enroll(&mut self, tier: Tier, addrs: &[Address]) -> Vec<Address> {
        let mut added = Vec::new();
        for addr in addrs {
            if addr.is_zero() || self.tier_of(addr).is_some() {
                continue;
            }
            let set = match tier {
                Tier::A => &mut self.tier_a,
                Tier::B => &mut self.tier_b,
            };
            set.insert(*addr);
            added.push(*addr);
        }
        added
    }
}

// =============================================================================
// SALE STATE
// =============================================================================

/// Everything about the sale that changes after construction.
#[derive(Clone, Debug)]
pub struct SaleState {
    /// Current closing time; only ever shortened.
    pub closing_time: Timestamp,
    /// Settlement done; write-once.
    pub finalized: bool,
    /// Timestamp of the settling call.
    pub finalized_at: Option<Timestamp>,
    /// Owner kill switch for purchases.
    pub paused: bool,
    /// Admission sets.
    pub whitelist: Whitelist,
    /// Cap and contribution counters.
    pub caps: CapLedger,
}

impl SaleState {
    /// Initial state for `config`.
    #[must_use]
    pub fn new(config: &SaleConfig) -> Self {
        Self {
            closing_time: config.closing_time,
            finalized: false,
            finalized_at: None,
            paused: false,
            whitelist: Whitelist::new(),
            caps: CapLedger::new(),
        }
    }

    /// Whether the window has closed at `now`. Caps do not close the window.
    #[must_use]
    pub fn has_closed(&self, now: Timestamp) -> bool {
        now >= self.closing_time
    }
}
