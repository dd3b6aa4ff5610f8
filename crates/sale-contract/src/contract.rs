//! # Token Sale Aggregate
//!
//! [`TokenSale`] owns the sale state, the two driven ports and the event log.
//! Every state-changing call goes through [`TokenSale::transact`]:
//!
//! 1. state, ports and event log length are snapshotted;
//! 2. the operation runs checks, then effects, then interactions;
//! 3. on error the snapshot is restored, so the call leaves nothing behind.
//!
//! Counters and flags are written before the first port call. Port calls take
//! `&mut` borrows of the port values, so an interaction cannot call back into
//! the sale.

use crate::domain::{
    admit, check_all_invariants, Address, SaleConfig, SaleState, Settlement, Tier, Timestamp,
    TxContext, U256,
};
use crate::errors::{ConfigError, SaleError};
use crate::events::{CallOutcome, PurchaseReceipt, SaleCall, SaleEvent, SaleTransaction};
use crate::ports::inbound::TokenSaleApi;
use crate::ports::outbound::{AssetLedger, CurrencyBank};
use tracing::{debug, info, warn};

/// The token sale.
#[derive(Clone, Debug)]
pub struct TokenSale<L, B> {
    owner: Address,
    config: SaleConfig,
    state: SaleState,
    ledger: L,
    bank: B,
    events: Vec<SaleEvent>,
}

/// Pre-call copy used to unwind a failed call.
struct Snapshot<L, B> {
    state: SaleState,
    ledger: L,
    bank: B,
    events_len: usize,
}

impl<L, B> TokenSale<L, B>
where
    L: AssetLedger + Clone,
    B: CurrencyBank + Clone,
{
    /// Deploy a sale owned by `owner`.
    ///
    /// `now` is the deployment time; the window may not open before it.
    /// The sale is expected to control `ledger` as `config.sale_address`.
    pub fn new(
        owner: Address,
        config: SaleConfig,
        ledger: L,
        bank: B,
        now: Timestamp,
    ) -> Result<Self, SaleError> {
        if owner.is_zero() {
            return Err(ConfigError::ZeroAddress("owner").into());
        }
        config.validate(now)?;

        info!(
            owner = %owner,
            rate = %config.rate,
            opening = config.opening_time,
            tier_b_opening = config.tier_b_opening_time,
            closing = config.closing_time,
            "token sale deployed"
        );

        Ok(Self {
            owner,
            state: SaleState::new(&config),
            config,
            ledger,
            bank,
            events: Vec::new(),
        })
    }

    // =========================================================================
    // CALL FRAME
    // =========================================================================

    /// Run `op` atomically.
    fn transact<T>(
        &mut self,
        ctx: &TxContext,
        call: &'static str,
        op: impl FnOnce(&mut Self) -> Result<T, SaleError>,
    ) -> Result<T, SaleError> {
        let snapshot = Snapshot {
            state: self.state.clone(),
            ledger: self.ledger.clone(),
            bank: self.bank.clone(),
            events_len: self.events.len(),
        };

        match op(self) {
            Ok(value) => {
                debug_assert!(check_all_invariants(&self.config, &self.state));
                Ok(value)
            }
            Err(err) => {
                self.state = snapshot.state;
                self.ledger = snapshot.ledger;
                self.bank = snapshot.bank;
                self.events.truncate(snapshot.events_len);
                warn!(
                    call,
                    sender = %ctx.sender,
                    reason = err.reason(),
                    error = %err,
                    "call rejected"
                );
                Err(err)
            }
        }
    }

    fn only_owner(&self, ctx: &TxContext) -> Result<(), SaleError> {
        if ctx.sender == self.owner {
            Ok(())
        } else {
            Err(SaleError::Unauthorized(ctx.sender))
        }
    }

    fn emit(&mut self, event: SaleEvent) {
        info!(event = event.name(), "{:?}", event);
        self.events.push(event);
    }

    /// Execute a call envelope.
    pub fn apply(&mut self, tx: &SaleTransaction) -> Result<CallOutcome, SaleError> {
        let ctx = &tx.ctx;
        match &tx.call {
            SaleCall::Purchase { beneficiary } => {
                self.purchase(ctx, *beneficiary).map(CallOutcome::Purchased)
            }
            SaleCall::PurchaseForSelf => self.purchase_for_self(ctx).map(CallOutcome::Purchased),
            SaleCall::RecordSale {
                currency_amount,
                asset_amount,
            } => self
                .record_sale(ctx, *currency_amount, *asset_amount)
                .map(|()| CallOutcome::Recorded),
            SaleCall::CloseEarly { new_closing_time } => self
                .close_early(ctx, *new_closing_time)
                .map(CallOutcome::Closed),
            SaleCall::Finalize => {
                self.finalize(ctx)
                    .map(|(reserve_allocation, burned)| CallOutcome::Finalized {
                        reserve_allocation,
                        burned,
                    })
            }
            SaleCall::Pause => self.pause(ctx).map(|()| CallOutcome::PauseState(true)),
            SaleCall::Unpause => self.unpause(ctx).map(|()| CallOutcome::PauseState(false)),
            SaleCall::AddToWhitelist { tier, addresses } => self
                .add_to_whitelist(ctx, *tier, addresses)
                .map(CallOutcome::Enrolled),
        }
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Ceiling on raised currency.
    #[must_use]
    pub fn currency_cap(&self) -> U256 {
        self.config.currency_cap
    }

    /// Ceiling on sold asset.
    #[must_use]
    pub fn asset_cap(&self) -> U256 {
        self.config.asset_cap
    }

    /// Reserve wallet.
    #[must_use]
    pub fn reserve_wallet(&self) -> Address {
        self.config.reserve_wallet
    }

    /// Off-ledger sales wallet.
    #[must_use]
    pub fn off_ledger_wallet(&self) -> Address {
        self.config.off_ledger_wallet
    }

    /// Conversion rate.
    #[must_use]
    pub fn rate(&self) -> U256 {
        self.config.rate
    }

    /// Sale owner.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Whether `addr` is enrolled in `tier`.
    #[must_use]
    pub fn is_whitelisted(&self, tier: Tier, addr: &Address) -> bool {
        self.state.whitelist.is_whitelisted(tier, addr)
    }

    /// Running contribution of `addr`.
    #[must_use]
    pub fn contribution_of(&self, addr: &Address) -> U256 {
        self.state.caps.contribution_of(addr)
    }

    /// Construction parameters.
    #[must_use]
    pub fn config(&self) -> &SaleConfig {
        &self.config
    }

    /// Mutable sale state.
    #[must_use]
    pub fn state(&self) -> &SaleState {
        &self.state
    }

    /// Event log, oldest first.
    #[must_use]
    pub fn events(&self) -> &[SaleEvent] {
        &self.events
    }

    /// Asset ledger port.
    #[must_use]
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Currency bank port.
    #[must_use]
    pub fn bank(&self) -> &B {
        &self.bank
    }
}

impl<L, B> TokenSaleApi for TokenSale<L, B>
where
    L: AssetLedger + Clone,
    B: CurrencyBank + Clone,
{
    fn purchase(
        &mut self,
        ctx: &TxContext,
        beneficiary: Address,
    ) -> Result<PurchaseReceipt, SaleError> {
        self.transact(ctx, "purchase", |sale| {
            // Checks
            let tier = admit(&sale.config, &sale.state, ctx.timestamp, &beneficiary)?;
            if ctx.priority_fee > sale.config.max_priority_fee {
                return Err(SaleError::PriorityFeeTooHigh {
                    offered: ctx.priority_fee,
                    ceiling: sale.config.max_priority_fee,
                });
            }
            let reservation = sale
                .state
                .caps
                .try_reserve(&sale.config, beneficiary, ctx.value)?;
            let asset_amount = reservation.asset_amount;

            // Effects
            sale.state.caps.commit(reservation);

            // Interactions
            sale.ledger.mint_or_transfer(beneficiary, asset_amount)?;
            sale.bank.forward(sale.config.bank, ctx.value)?;

            sale.emit(SaleEvent::TokenPurchase {
                purchaser: ctx.sender,
                beneficiary,
                currency_amount: ctx.value,
                asset_amount,
            });

            Ok(PurchaseReceipt {
                purchaser: ctx.sender,
                beneficiary,
                tier,
                currency_amount: ctx.value,
                asset_amount,
            })
        })
    }

    fn record_sale(
        &mut self,
        ctx: &TxContext,
        currency_amount: U256,
        asset_amount: U256,
    ) -> Result<(), SaleError> {
        self.transact(ctx, "record_sale", |sale| {
            sale.only_owner(ctx)?;
            if sale.state.finalized {
                return Err(SaleError::AlreadyFinalized);
            }
            let reservation = sale
                .state
                .caps
                .try_record(&sale.config, currency_amount, asset_amount)?;

            sale.state.caps.commit(reservation);

            sale.ledger
                .mint_or_transfer(sale.config.off_ledger_wallet, asset_amount)?;

            sale.emit(SaleEvent::SaleRecorded {
                currency_amount,
                asset_amount,
            });
            Ok(())
        })
    }

    fn close_early(
        &mut self,
        ctx: &TxContext,
        new_closing_time: Timestamp,
    ) -> Result<Timestamp, SaleError> {
        self.transact(ctx, "close_early", |sale| {
            sale.only_owner(ctx)?;
            if sale.state.finalized {
                return Err(SaleError::AlreadyFinalized);
            }
            let now = ctx.timestamp;
            if sale.state.has_closed(now) {
                return Err(SaleError::AlreadyClosed);
            }
            let previous = sale.state.closing_time;
            if new_closing_time > previous {
                return Err(SaleError::InvalidEarlyClose {
                    requested: new_closing_time,
                    current: previous,
                });
            }

            let current = new_closing_time.max(now);
            sale.state.closing_time = current;
            sale.emit(SaleEvent::ClosingTimeChanged { previous, current });
            Ok(current)
        })
    }

    fn finalize(&mut self, ctx: &TxContext) -> Result<(U256, U256), SaleError> {
        self.transact(ctx, "finalize", |sale| {
            sale.only_owner(ctx)?;
            if sale.state.finalized {
                return Err(SaleError::AlreadyFinalized);
            }
            if !sale.state.has_closed(ctx.timestamp) {
                return Err(SaleError::NotYetClosed {
                    closing: sale.state.closing_time,
                });
            }
            let settlement = Settlement::compute(sale.state.caps.asset_sold())?;

            sale.state.finalized = true;
            sale.state.finalized_at = Some(ctx.timestamp);

            sale.ledger
                .mint_or_transfer(sale.config.reserve_wallet, settlement.reserve_allocation)?;
            let burned = sale.ledger.balance_of(&sale.config.sale_address);
            if !burned.is_zero() {
                sale.ledger.burn(burned)?;
            }
            sale.ledger.transfer_ownership(sale.owner)?;

            debug!(
                asset_sold = %settlement.asset_sold,
                reserve = %settlement.reserve_allocation,
                burned = %burned,
                "sale settled"
            );
            sale.emit(SaleEvent::Finalized {
                reserve_allocation: settlement.reserve_allocation,
                burned,
            });
            Ok((settlement.reserve_allocation, burned))
        })
    }

    fn pause(&mut self, ctx: &TxContext) -> Result<(), SaleError> {
        self.transact(ctx, "pause", |sale| {
            sale.only_owner(ctx)?;
            if sale.state.finalized {
                return Err(SaleError::AlreadyFinalized);
            }
            if sale.state.paused {
                return Err(SaleError::Paused);
            }
            sale.state.paused = true;
            sale.emit(SaleEvent::Pause);
            Ok(())
        })
    }

    fn unpause(&mut self, ctx: &TxContext) -> Result<(), SaleError> {
        self.transact(ctx, "unpause", |sale| {
            sale.only_owner(ctx)?;
            if sale.state.finalized {
                return Err(SaleError::AlreadyFinalized);
            }
            if !sale.state.paused {
                return Err(SaleError::NotPaused);
            }
            sale.state.paused = false;
            sale.emit(SaleEvent::Unpause);
            Ok(())
        })
    }

    fn add_to_whitelist(
        &mut self,
        ctx: &TxContext,
        tier: Tier,
        addresses: &[Address],
    ) -> Result<usize, SaleError> {
        self.transact(ctx, "add_to_whitelist", |sale| {
            sale.only_owner(ctx)?;
            if sale.state.finalized {
                return Err(SaleError::AlreadyFinalized);
            }
            let added = sale.state.whitelist.enroll(tier, addresses);
            let skipped = addresses.len() - added.len();
            if skipped > 0 {
                warn!(%tier, skipped, "whitelist entries skipped");
            }
            let count = added.len();
            if count > 0 {
                sale.emit(SaleEvent::WhitelistUpdated { tier, added });
            }
            Ok(count)
        })
    }

    fn currency_raised(&self) -> U256 {
        self.state.caps.currency_raised()
    }

    fn asset_sold(&self) -> U256 {
        self.state.caps.asset_sold()
    }

    fn has_closed(&self, now: Timestamp) -> bool {
        self.state.has_closed(now)
    }

    fn is_finalized(&self) -> bool {
        self.state.finalized
    }

    fn paused(&self) -> bool {
        self.state.paused
    }

    fn closing_time(&self) -> Timestamp {
        self.state.closing_time
    }
}
