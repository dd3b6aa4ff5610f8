//! # Driven Ports (SPI - Outbound)
//!
//! The two external collaborators the sale invokes: the asset ledger and the
//! currency bank.
//!
//! ## Snapshot semantics
//!
//! Port values are owned by the sale and cloned at the start of every call.
//! If the call aborts, the clones replace the live values, so an interaction
//! that already happened inside the aborted call is undone with it.
//! Implementations must therefore be value-like: a clone is an independent
//! copy of the collaborator's state.

use crate::domain::value_objects::{Address, U256};
use crate::errors::{BankError, LedgerError};

// =============================================================================
// ASSET LEDGER
// =============================================================================

/// The fungible-asset ledger, as seen by the account that controls it.
///
/// While the sale owns the ledger, every mutating call acts on the sale's
/// holdings. The ledger's own pause gate is outside the sale's control.
pub trait AssetLedger {
    /// Credit `to` with `amount`, taking it from the controller's holdings
    /// and minting any shortfall.
    fn mint_or_transfer(&mut self, to: Address, amount: U256) -> Result<(), LedgerError>;

    /// Destroy `amount` from the controller's holdings.
    fn burn(&mut self, amount: U256) -> Result<(), LedgerError>;

    /// Balance held by `addr`.
    fn balance_of(&self, addr: &Address) -> U256;

    /// Hand control of the ledger to `new_owner`.
    fn transfer_ownership(&mut self, new_owner: Address) -> Result<(), LedgerError>;
}

// =============================================================================
// CURRENCY BANK
// =============================================================================

/// Native-currency movements out of the sale.
pub trait CurrencyBank {
    /// Forward `amount` of the call's attached value to `to`.
    fn forward(&mut self, to: Address, amount: U256) -> Result<(), BankError>;
}
