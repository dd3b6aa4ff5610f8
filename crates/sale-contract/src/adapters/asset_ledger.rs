//! # In-Memory Asset Ledger
//!
//! A pausable, burnable, ownable fungible-asset ledger.
//!
//! The ledger is created with a `controller`: the account that drives it
//! through the [`AssetLedger`] port (the sale's own address). Port calls act
//! on the controller's holdings and only succeed while the controller owns
//! the ledger.

use crate::domain::value_objects::{Address, U256};
use crate::errors::LedgerError;
use crate::ports::outbound::AssetLedger;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

/// Ownership change log entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipTransferred {
    /// Owner before the transfer.
    pub previous_owner: Address,
    /// Owner after the transfer.
    pub new_owner: Address,
}

/// In-memory asset ledger.
#[derive(Clone, Debug)]
pub struct InMemoryAssetLedger {
    controller: Address,
    owner: Address,
    balances: BTreeMap<Address, U256>,
    total_supply: U256,
    paused: bool,
    ownership_log: Vec<OwnershipTransferred>,
}

impl InMemoryAssetLedger {
    /// Empty ledger owned and driven by `controller`.
    #[must_use]
    pub fn new(controller: Address) -> Self {
        Self {
            controller,
            owner: controller,
            balances: BTreeMap::new(),
            total_supply: U256::zero(),
            paused: false,
            ownership_log: Vec::new(),
        }
    }

    /// Ledger whose controller already holds `initial_supply`.
    pub fn with_supply(controller: Address, initial_supply: U256) -> Result<Self, LedgerError> {
        let mut ledger = Self::new(controller);
        ledger.mint(controller, initial_supply)?;
        Ok(ledger)
    }

    /// Current owner.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Total outstanding supply.
    #[must_use]
    pub fn total_supply(&self) -> U256 {
        self.total_supply
    }

    /// Whether transfers are paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Flip the ledger's own pause gate.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Ownership transfers so far, oldest first.
    #[must_use]
    pub fn ownership_log(&self) -> &[OwnershipTransferred] {
        &self.ownership_log
    }

    fn ensure_controlled(&self) -> Result<(), LedgerError> {
        if self.paused {
            return Err(LedgerError::Paused);
        }
        if self.owner != self.controller {
            return Err(LedgerError::NotOwner);
        }
        Ok(())
    }

    fn mint(&mut self, to: Address, amount: U256) -> Result<(), LedgerError> {
        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let balance = self
            .balance_of(&to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.total_supply = supply;
        self.balances.insert(to, balance);
        Ok(())
    }

    fn debit(&mut self, from: Address, amount: U256) -> Result<(), LedgerError> {
        let available = self.balance_of(&from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                required: amount,
                available,
            });
        }
        self.balances.insert(from, available - amount);
        Ok(())
    }
}

impl AssetLedger for InMemoryAssetLedger {
    fn mint_or_transfer(&mut self, to: Address, amount: U256) -> Result<(), LedgerError> {
        self.ensure_controlled()?;
        if to.is_zero() {
            return Err(LedgerError::InvalidRecipient);
        }
        let held = self.balance_of(&self.controller);
        let transferred = held.min(amount);
        let minted = amount - transferred;

        self.debit(self.controller, transferred)?;
        let credited = self
            .balance_of(&to)
            .checked_add(transferred)
            .ok_or(LedgerError::Overflow)?;
        self.balances.insert(to, credited);
        if !minted.is_zero() {
            self.mint(to, minted)?;
        }
        Ok(())
    }

    fn burn(&mut self, amount: U256) -> Result<(), LedgerError> {
        self.ensure_controlled()?;
        self.debit(self.controller, amount)?;
        self.total_supply -= amount;
        Ok(())
    }

    fn balance_of(&self, addr: &Address) -> U256 {
        self.balances.get(addr).copied().unwrap_or_default()
    }

    fn transfer_ownership(&mut self, new_owner: Address) -> Result<(), LedgerError> {
        if self.owner != self.controller {
            return Err(LedgerError::NotOwner);
        }
        if new_owner.is_zero() {
            return Err(LedgerError::InvalidRecipient);
        }
        let entry = OwnershipTransferred {
            previous_owner: self.owner,
            new_owner,
        };
        info!(
            previous_owner = %entry.previous_owner,
            new_owner = %entry.new_owner,
            "OwnershipTransferred"
        );
        self.owner = new_owner;
        self.ownership_log.push(entry);
        Ok(())
    }
}
