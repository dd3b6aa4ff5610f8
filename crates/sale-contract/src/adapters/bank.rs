//! # In-Memory Bank
//!
//! Records forwarded currency per recipient. Recipients can be marked as
//! refusing deposits to exercise the sale's rollback path.

use crate::domain::value_objects::{Address, U256};
use crate::errors::BankError;
use crate::ports::outbound::CurrencyBank;
use std::collections::{BTreeMap, BTreeSet};

/// In-memory currency bank.
#[derive(Clone, Debug, Default)]
pub struct InMemoryBank {
    balances: BTreeMap<Address, U256>,
    refusing: BTreeSet<Address>,
}

impl InMemoryBank {
    /// Empty bank.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currency received by `addr`.
    #[must_use]
    pub fn balance_of(&self, addr: &Address) -> U256 {
        self.balances.get(addr).copied().unwrap_or_default()
    }

    /// Make `addr` refuse (or accept again) deposits.
    pub fn set_refusing(&mut self, addr: Address, refusing: bool) {
        if refusing {
            self.refusing.insert(addr);
        } else {
            self.refusing.remove(&addr);
        }
    }
}

impl CurrencyBank for InMemoryBank {
    fn forward(&mut self, to: Address, amount: U256) -> Result<(), BankError> {
        if self.refusing.contains(&to) {
            return Err(BankError::Rejected(to));
        }
        let balance = self
            .balance_of(&to)
            .checked_add(amount)
            .ok_or(BankError::Overflow)?;
        self.balances.insert(to, balance);
        Ok(())
    }
}
