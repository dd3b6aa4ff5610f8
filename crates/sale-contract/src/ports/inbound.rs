//! # Driving Ports (API - Inbound)
//!
//! The operations the sale exposes to participants and to its owner.
//! Every state-changing call takes the [`TxContext`] of the transaction that
//! carries it; the sender and the block timestamp come from there.

use crate::domain::value_objects::{Address, Tier, Timestamp, TxContext, U256};
use crate::errors::SaleError;
use crate::events::PurchaseReceipt;

/// Token sale API.
pub trait TokenSaleApi {
    // ----- Participant -----

    /// Buy for `beneficiary` with the currency attached to `ctx`.
    fn purchase(&mut self, ctx: &TxContext, beneficiary: Address)
        -> Result<PurchaseReceipt, SaleError>;

    /// Buy for the sender.
    fn purchase_for_self(&mut self, ctx: &TxContext) -> Result<PurchaseReceipt, SaleError> {
        self.purchase(ctx, ctx.sender)
    }

    // ----- Owner -----

    /// Account an off-ledger sale.
    fn record_sale(
        &mut self,
        ctx: &TxContext,
        currency_amount: U256,
        asset_amount: U256,
    ) -> Result<(), SaleError>;

    /// Shorten the window. Returns the resulting closing time.
    fn close_early(&mut self, ctx: &TxContext, new_closing_time: Timestamp)
        -> Result<Timestamp, SaleError>;

    /// Settle the sale. Returns `(reserve_allocation, burned)`.
    fn finalize(&mut self, ctx: &TxContext) -> Result<(U256, U256), SaleError>;

    /// Halt purchases.
    fn pause(&mut self, ctx: &TxContext) -> Result<(), SaleError>;

    /// Resume purchases.
    fn unpause(&mut self, ctx: &TxContext) -> Result<(), SaleError>;

    /// Enroll `addresses` into `tier`. Returns the number newly added.
    fn add_to_whitelist(
        &mut self,
        ctx: &TxContext,
        tier: Tier,
        addresses: &[Address],
    ) -> Result<usize, SaleError>;

    /// Enroll into tier A.
    fn add_to_tier_a(&mut self, ctx: &TxContext, addresses: &[Address]) -> Result<usize, SaleError> {
        self.add_to_whitelist(ctx, Tier::A, addresses)
    }

    /// Enroll into tier B.
    fn add_to_tier_b(&mut self, ctx: &TxContext, addresses: &[Address]) -> Result<usize, SaleError> {
        self.add_to_whitelist(ctx, Tier::B, addresses)
    }

    // ----- Queries -----

    /// Currency accounted so far.
    fn currency_raised(&self) -> U256;

    /// Asset allocated so far.
    fn asset_sold(&self) -> U256;

    /// Whether the window has closed at `now`.
    fn has_closed(&self, now: Timestamp) -> bool;

    /// Whether settlement ran.
    fn is_finalized(&self) -> bool;

    /// Whether purchases are halted.
    fn paused(&self) -> bool;

    /// Current closing time.
    fn closing_time(&self) -> Timestamp;
}
