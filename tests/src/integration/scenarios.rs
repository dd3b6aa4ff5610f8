//! # Purchase Scenarios
//!
//! Conversion, admission phases, individual and global limits, the fee
//! throttle and recorded sales, against the production deployment parameters.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use sale_contract::prelude::*;

    // =========================================================================
    // CONVERSION
    // =========================================================================

    #[test]
    fn test_one_unit_buys_ten_thousand() {
        let mut sale = deploy();
        let alice = participant(1);
        enroll(&mut sale, Tier::A, &[alice]);

        let receipt = sale
            .purchase_for_self(&contribution(alice, OPENING, units(1, 0)))
            .unwrap();

        assert_eq!(receipt.asset_amount, units(10_000, 0));
        assert_eq!(sale.ledger().balance_of(&alice), units(10_000, 0));
        assert_eq!(sale.bank().balance_of(&BANK), units(1, 0));
        assert_eq!(
            sale.ledger().balance_of(&SALE),
            initial_supply() - units(10_000, 0)
        );
    }

    #[test]
    fn test_fractional_contribution_converts_exactly() {
        let mut sale = deploy();
        let alice = participant(1);
        enroll(&mut sale, Tier::A, &[alice]);

        let value = units(0, 333);
        sale.purchase_for_self(&contribution(alice, OPENING, value))
            .unwrap();
        assert_eq!(sale.asset_sold(), value * 10_000);
    }

    // =========================================================================
    // ADMISSION PHASES
    // =========================================================================

    #[test]
    fn test_phase_boundaries() {
        let mut sale = deploy();
        let (a, b) = (participant(1), participant(2));
        enroll(&mut sale, Tier::A, &[a]);
        enroll(&mut sale, Tier::B, &[b]);
        let value = units(1, 0);

        assert!(matches!(
            sale.purchase_for_self(&contribution(a, OPENING - 1, value)),
            Err(SaleError::OutsideWindow { .. })
        ));
        assert!(sale
            .purchase_for_self(&contribution(a, OPENING, value))
            .is_ok());
        assert_eq!(
            sale.purchase_for_self(&contribution(b, TIER_B_OPENING - 1, value)),
            Err(SaleError::NotWhitelistedForTierA(b))
        );
        assert!(sale
            .purchase_for_self(&contribution(b, TIER_B_OPENING, value))
            .is_ok());
        assert!(sale
            .purchase_for_self(&contribution(a, CLOSING - 1, value))
            .is_ok());
        assert!(matches!(
            sale.purchase_for_self(&contribution(b, CLOSING, value)),
            Err(SaleError::OutsideWindow { .. })
        ));
    }

    #[test]
    fn test_beneficiary_is_gated_not_payer() {
        let mut sale = deploy();
        let (member, payer) = (participant(1), participant(9));
        enroll(&mut sale, Tier::A, &[member]);

        let receipt = sale
            .purchase(&contribution(payer, OPENING, units(2, 0)), member)
            .unwrap();
        assert_eq!(receipt.purchaser, payer);
        assert_eq!(receipt.beneficiary, member);
        assert_eq!(sale.contribution_of(&member), units(2, 0));
        assert!(sale.contribution_of(&payer).is_zero());
    }

    // =========================================================================
    // LIMITS
    // =========================================================================

    #[test]
    fn test_minimum_and_individual_maximum() {
        let mut sale = deploy();
        let alice = participant(1);
        enroll(&mut sale, Tier::A, &[alice]);

        assert!(matches!(
            sale.purchase_for_self(&contribution(alice, OPENING, units(0, 199))),
            Err(SaleError::BelowMinimum { .. })
        ));
        sale.purchase_for_self(&contribution(alice, OPENING, units(149, 800)))
            .unwrap();
        sale.purchase_for_self(&contribution(alice, OPENING, units(0, 200)))
            .unwrap();
        assert_eq!(sale.contribution_of(&alice), units(150, 0));
        assert!(matches!(
            sale.purchase_for_self(&contribution(alice, OPENING, units(0, 200))),
            Err(SaleError::PerParticipantCapExceeded { .. })
        ));
    }

    #[test]
    fn test_point_eight_cap_with_two_buyers() {
        let mut config = deployment_config();
        config.currency_cap = units(0, 800);
        let mut sale = deploy_with(config);
        let buyers = [participant(1), participant(2), participant(3)];
        enroll(&mut sale, Tier::B, &buyers);

        for buyer in &buyers[..2] {
            sale.purchase_for_self(&contribution(*buyer, TIER_B_OPENING, units(0, 400)))
                .unwrap();
        }
        assert_eq!(sale.currency_raised(), sale.currency_cap());

        let err = sale
            .purchase_for_self(&contribution(buyers[2], TIER_B_OPENING, units(0, 200)))
            .unwrap_err();
        assert_eq!(
            err,
            SaleError::GlobalCurrencyCapExceeded {
                attempted: units(1, 0),
                cap: units(0, 800),
            }
        );
        assert!(!sale.has_closed(TIER_B_OPENING));
    }

    #[test]
    fn test_priority_fee_throttle() {
        let mut sale = deploy();
        let alice = participant(1);
        enroll(&mut sale, Tier::A, &[alice]);
        let fifty_gwei = U256::from(50) * U256::from(GWEI);

        let ctx = contribution(alice, OPENING, units(1, 0));
        assert!(sale
            .purchase_for_self(&ctx.with_priority_fee(fifty_gwei))
            .is_ok());
        assert_eq!(
            sale.purchase_for_self(&ctx.with_priority_fee(fifty_gwei + 1)),
            Err(SaleError::PriorityFeeTooHigh {
                offered: fifty_gwei + 1,
                ceiling: fifty_gwei,
            })
        );
    }

    // =========================================================================
    // RECORDED SALES
    // =========================================================================

    #[test]
    fn test_recorded_sale_exhausts_asset_cap() {
        let mut sale = deploy();
        let alice = participant(1);
        enroll(&mut sale, Tier::A, &[alice]);
        let remaining = units(10_000, 0);

        sale.record_sale(
            &admin(DEPLOYED),
            units(1_000, 0),
            sale.asset_cap() - remaining,
        )
        .unwrap();
        assert_eq!(
            sale.ledger().balance_of(&OFF_LEDGER),
            sale.asset_cap() - remaining
        );

        assert!(matches!(
            sale.purchase_for_self(&contribution(alice, OPENING, units(1, 200))),
            Err(SaleError::GlobalAssetCapExceeded { .. })
        ));
        sale.purchase_for_self(&contribution(alice, OPENING, units(1, 0)))
            .unwrap();
        assert_eq!(sale.asset_sold(), sale.asset_cap());

        assert!(matches!(
            sale.record_sale(&admin(OPENING), U256::zero(), U256::one()),
            Err(SaleError::GlobalAssetCapExceeded { .. })
        ));
        assert_eq!(sale.currency_raised(), units(1_001, 0));
    }

    #[test]
    fn test_recorded_sale_half_cap_then_overflow() {
        let mut sale = deploy();
        let half = sale.asset_cap() / 2;

        sale.record_sale(&admin(DEPLOYED), U256::zero(), half).unwrap();
        assert_eq!(sale.asset_sold(), half);

        assert!(matches!(
            sale.record_sale(&admin(DEPLOYED), U256::zero(), half + 1),
            Err(SaleError::GlobalAssetCapExceeded { .. })
        ));
        assert_eq!(sale.asset_sold(), half);
        assert_eq!(sale.ledger().balance_of(&OFF_LEDGER), half);
        assert!(sale.currency_raised().is_zero());
    }

    #[test]
    fn test_recorded_sale_ignores_pause_and_window() {
        let mut sale = deploy();
        sale.pause(&admin(DEPLOYED)).unwrap();
        sale.record_sale(&admin(DEPLOYED), units(5, 0), units(50_000, 0))
            .unwrap();
        sale.record_sale(&admin(CLOSING + 1), units(5, 0), units(50_000, 0))
            .unwrap();
        assert_eq!(sale.asset_sold(), units(100_000, 0));
        assert!(sale.bank().balance_of(&BANK).is_zero());
    }
}
