//! # Test Fixtures
//!
//! The production deployment parameters: 10 000 asset units per currency
//! unit, a 54 286-unit currency cap, a 708 571 429-unit asset cap, tier A
//! opening on 11 June 2018 13:00 GMT, tier B five hours later, closing on
//! 25 June 2018 13:00 GMT.

use sale_contract::prelude::*;

/// Sale owner.
pub const OWNER: Address = Address::repeat_byte(0x0e);
/// Receives forwarded currency.
pub const BANK: Address = Address::repeat_byte(0xba);
/// Receives the reserve allocation.
pub const RESERVE: Address = Address::repeat_byte(0xf0);
/// Receives recorded off-ledger sales.
pub const OFF_LEDGER: Address = Address::repeat_byte(0x10);
/// The sale's account on the asset ledger.
pub const SALE: Address = Address::repeat_byte(0x5a);

/// 11 June 2018 13:00:00 GMT.
pub const OPENING: Timestamp = 1_528_722_000;
/// 11 June 2018 18:00:00 GMT.
pub const TIER_B_OPENING: Timestamp = 1_528_740_000;
/// 25 June 2018 13:00:00 GMT.
pub const CLOSING: Timestamp = 1_529_931_600;
/// Deployment time, a day before opening.
pub const DEPLOYED: Timestamp = OPENING - 86_400;

/// Supply held by the sale before it opens.
pub fn initial_supply() -> U256 {
    units(1_771_428_571, 0)
}

/// Deployment configuration.
pub fn deployment_config() -> SaleConfig {
    SaleConfig {
        rate: U256::from(10_000),
        bank: BANK,
        reserve_wallet: RESERVE,
        off_ledger_wallet: OFF_LEDGER,
        sale_address: SALE,
        currency_cap: units(54_286, 0),
        asset_cap: units(708_571_429, 0),
        min_contribution: units(0, 200),
        max_per_participant: units(150, 0),
        opening_time: OPENING,
        tier_b_opening_time: TIER_B_OPENING,
        closing_time: CLOSING,
        max_priority_fee: U256::from(DEFAULT_MAX_PRIORITY_FEE_GWEI) * U256::from(GWEI),
    }
}

/// The sale type exercised by the suite.
pub type Sale = TokenSale<InMemoryAssetLedger, InMemoryBank>;

/// Deploy `config` with the sale holding [`initial_supply`].
pub fn deploy_with(config: SaleConfig) -> Sale {
    let ledger = InMemoryAssetLedger::with_supply(config.sale_address, initial_supply())
        .expect("initial supply fits");
    TokenSale::new(OWNER, config, ledger, InMemoryBank::new(), DEPLOYED)
        .expect("deployment config is valid")
}

/// Deploy the production configuration.
pub fn deploy() -> Sale {
    deploy_with(deployment_config())
}

/// Distinct participant address for `n` in `1..=255`.
pub fn participant(n: u8) -> Address {
    let mut bytes = [0u8; 20];
    bytes[0] = 0xaa;
    bytes[19] = n;
    Address::new(bytes)
}

/// Owner call at `at`.
pub fn admin(at: Timestamp) -> TxContext {
    TxContext::call(OWNER, at)
}

/// Contribution of `value` from `who` at `at`.
pub fn contribution(who: Address, at: Timestamp, value: U256) -> TxContext {
    TxContext::call(who, at).with_value(value)
}

/// Enroll `addresses` into `tier` before the sale opens.
pub fn enroll(sale: &mut Sale, tier: Tier, addresses: &[Address]) {
    sale.add_to_whitelist(&admin(DEPLOYED), tier, addresses)
        .expect("owner may enroll");
}
