//! # Sale Contract - Tiered, Capped Token Sale
//!
//! ## Purpose
//!
//! Admits currency contributions during a bounded window, converts them to
//! asset allocations at a fixed rate, enforces admission tiers plus
//! per-participant and global limits, and performs a one-time settlement that
//! allocates the reserve share and burns the unsold remainder.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Raised/sold never exceed their caps | `domain/caps.rs` - `CapLedger::try_reserve()` |
//! | INVARIANT-2 | Contribution totals stay under the individual ceiling | `domain/caps.rs` - `CapLedger::try_reserve()` |
//! | INVARIANT-3 | Closing time only shortens | `contract.rs` - `close_early()` |
//! | INVARIANT-4 | Settlement runs once, after the window closed | `contract.rs` - `finalize()` |
//! | INVARIANT-5 | A rejected call leaves no effect | `contract.rs` - `TokenSale::transact()` |
//!
//! ## Admission Phases
//!
//! | Window | Admitted |
//! |--------|----------|
//! | `[opening_time, tier_b_opening_time)` | tier A |
//! | `[tier_b_opening_time, closing_time)` | tier A and tier B |
//!
//! ## Outbound Dependencies
//!
//! | Collaborator | Trait | Purpose |
//! |--------------|-------|---------|
//! | Asset ledger | `AssetLedger` | Allocate, burn, hand back ownership |
//! | Bank | `CurrencyBank` | Receive forwarded contributions |
//!
//! ## Usage Example
//!
//! ```ignore
//! use sale_contract::prelude::*;
//!
//! let mut sale = TokenSale::new(owner, config, ledger, bank, now)?;
//! sale.add_to_tier_a(&TxContext::call(owner, now), &[alice])?;
//!
//! let ctx = TxContext::call(alice, opening).with_value(units(1, 0));
//! let receipt = sale.purchase_for_self(&ctx)?;
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod contract;
pub mod domain;
pub mod errors;
pub mod events;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain
    pub use crate::domain::config::{SaleConfig, DEFAULT_MAX_PRIORITY_FEE_GWEI};
    pub use crate::domain::entities::{SaleState, Whitelist};
    pub use crate::domain::settlement::Settlement;
    pub use crate::domain::value_objects::{
        units, Address, Tier, Timestamp, TxContext, GWEI, U256, WEI_PER_UNIT,
    };

    // Invariants
    pub use crate::domain::invariants::check_all_invariants;

    // Ports
    pub use crate::ports::inbound::TokenSaleApi;
    pub use crate::ports::outbound::{AssetLedger, CurrencyBank};

    // Events
    pub use crate::events::{CallOutcome, PurchaseReceipt, SaleCall, SaleEvent, SaleTransaction};

    // Errors
    pub use crate::errors::{BankError, ConfigError, LedgerError, SaleError};

    // Aggregate
    pub use crate::contract::TokenSale;

    // Adapters
    pub use crate::adapters::{InMemoryAssetLedger, InMemoryBank, OwnershipTransferred};

    // Service
    pub use crate::service::{SaleService, ServiceConfig, ServiceStats};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
