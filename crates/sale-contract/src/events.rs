//! # Event Schema
//!
//! Log entries emitted by the sale, plus the request/response envelopes
//! accepted by [`crate::service::SaleService`].
//!
//! Events are appended only when the emitting call succeeds; an aborted call
//! leaves the log untouched.

use crate::domain::value_objects::{Address, Tier, Timestamp, TxContext, U256};
use serde::{Deserialize, Serialize};

// =============================================================================
// SALE EVENTS
// =============================================================================

/// Sale log entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaleEvent {
    /// Accepted purchase.
    TokenPurchase {
        /// Account that submitted the transaction.
        purchaser: Address,
        /// Account credited with the asset.
        beneficiary: Address,
        /// Currency forwarded to the bank.
        currency_amount: U256,
        /// Asset allocated.
        asset_amount: U256,
    },
    /// Off-ledger sale recorded by the owner.
    SaleRecorded {
        /// Currency accounted.
        currency_amount: U256,
        /// Asset allocated to the off-ledger wallet.
        asset_amount: U256,
    },
    /// Purchases halted.
    Pause,
    /// Purchases resumed.
    Unpause,
    /// Window shortened.
    ClosingTimeChanged {
        /// Closing time before the call.
        previous: Timestamp,
        /// Closing time after the call.
        current: Timestamp,
    },
    /// Addresses enrolled into a tier.
    WhitelistUpdated {
        /// Tier enrolled into.
        tier: Tier,
        /// Newly enrolled addresses.
        added: Vec<Address>,
    },
    /// Settlement completed.
    Finalized {
        /// Asset sent to the reserve wallet.
        reserve_allocation: U256,
        /// Asset destroyed from the sale's remaining holdings.
        burned: U256,
    },
}

impl SaleEvent {
    /// Event name as it appears in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::TokenPurchase { .. } => "TokenPurchase",
            Self::SaleRecorded { .. } => "SaleRecorded",
            Self::Pause => "Pause",
            Self::Unpause => "Unpause",
            Self::ClosingTimeChanged { .. } => "ClosingTimeChanged",
            Self::WhitelistUpdated { .. } => "WhitelistUpdated",
            Self::Finalized { .. } => "Finalized",
        }
    }
}

// =============================================================================
// CALL ENVELOPES
// =============================================================================

/// A state-changing call submitted to the sale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaleCall {
    /// Buy for `beneficiary` with `ctx.value` attached.
    Purchase {
        /// Account credited with the asset.
        beneficiary: Address,
    },
    /// Buy for the sender.
    PurchaseForSelf,
    /// Record an off-ledger sale.
    RecordSale {
        /// Currency accounted.
        currency_amount: U256,
        /// Asset allocated to the off-ledger wallet.
        asset_amount: U256,
    },
    /// Shorten the window.
    CloseEarly {
        /// Requested closing time.
        new_closing_time: Timestamp,
    },
    /// Settle the sale.
    Finalize,
    /// Halt purchases.
    Pause,
    /// Resume purchases.
    Unpause,
    /// Enroll addresses into a tier.
    AddToWhitelist {
        /// Target tier.
        tier: Tier,
        /// Addresses to enroll.
        addresses: Vec<Address>,
    },
}

impl SaleCall {
    /// Call name as it appears in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Purchase { .. } => "purchase",
            Self::PurchaseForSelf => "purchase_for_self",
            Self::RecordSale { .. } => "record_sale",
            Self::CloseEarly { .. } => "close_early",
            Self::Finalize => "finalize",
            Self::Pause => "pause",
            Self::Unpause => "unpause",
            Self::AddToWhitelist { .. } => "add_to_whitelist",
        }
    }
}

/// A call together with the context of the transaction carrying it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleTransaction {
    /// Transaction context (sender, value, fee, timestamp).
    pub ctx: TxContext,
    /// The call.
    pub call: SaleCall,
}

/// Result of a successful call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallOutcome {
    /// Purchase receipt.
    Purchased(PurchaseReceipt),
    /// Recorded sale accepted.
    Recorded,
    /// New closing time.
    Closed(Timestamp),
    /// Settlement amounts.
    Finalized {
        /// Asset sent to the reserve wallet.
        reserve_allocation: U256,
        /// Asset destroyed.
        burned: U256,
    },
    /// Pause state after the call.
    PauseState(bool),
    /// Number of newly enrolled addresses.
    Enrolled(usize),
}

/// What a purchase produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    /// Account that submitted the transaction.
    pub purchaser: Address,
    /// Account credited with the asset.
    pub beneficiary: Address,
    /// Tier the beneficiary was admitted under.
    pub tier: Tier,
    /// Currency forwarded.
    pub currency_amount: U256,
    /// Asset allocated.
    pub asset_amount: U256,
}
