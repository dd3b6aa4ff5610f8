//! # Sale Lifecycle
//!
//! Deploy → whitelist → sell in both tiers → close early → settle, checking
//! the settlement arithmetic and the ledger hand-back at the end.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use sale_contract::prelude::*;

    #[test]
    fn test_full_lifecycle() {
        let mut sale = deploy();
        let (a1, a2, b1) = (participant(1), participant(2), participant(3));
        enroll(&mut sale, Tier::A, &[a1, a2]);
        enroll(&mut sale, Tier::B, &[b1]);

        // Tier A only.
        sale.purchase_for_self(&contribution(a1, OPENING, units(100, 0)))
            .unwrap();
        sale.purchase(&contribution(a1, OPENING + 60, units(20, 0)), a2)
            .unwrap();

        // Pause halts purchases, not recorded sales.
        sale.pause(&admin(OPENING + 120)).unwrap();
        assert_eq!(
            sale.purchase_for_self(&contribution(a2, OPENING + 180, units(1, 0))),
            Err(SaleError::Paused)
        );
        sale.record_sale(&admin(OPENING + 240), units(500, 0), units(5_000_000, 0))
            .unwrap();
        sale.unpause(&admin(OPENING + 300)).unwrap();

        // Both tiers.
        sale.purchase_for_self(&contribution(b1, TIER_B_OPENING, units(150, 0)))
            .unwrap();

        let close_at = TIER_B_OPENING + 3_600;
        assert_eq!(
            sale.close_early(&admin(TIER_B_OPENING + 60), close_at),
            Ok(close_at)
        );
        assert!(matches!(
            sale.purchase_for_self(&contribution(a2, close_at, units(1, 0))),
            Err(SaleError::OutsideWindow { .. })
        ));
        assert_eq!(
            sale.finalize(&admin(close_at - 1)),
            Err(SaleError::NotYetClosed { closing: close_at })
        );

        let sold = sale.asset_sold();
        assert_eq!(sold, units(270 * 10_000 + 5_000_000, 0));
        assert_eq!(sale.currency_raised(), units(770, 0));
        assert_eq!(sale.bank().balance_of(&BANK), units(270, 0));

        let (reserve, burned) = sale.finalize(&admin(close_at)).unwrap();
        let settlement = Settlement::compute(sold).unwrap();

        assert_eq!(reserve, settlement.reserve_allocation);
        assert_eq!(sale.ledger().balance_of(&RESERVE), reserve);
        assert_eq!(sale.ledger().total_supply(), settlement.final_supply().unwrap());
        assert_eq!(sale.ledger().total_supply(), sold * 5 / 2);
        assert_eq!(burned, initial_supply() - sold - reserve);
        assert!(sale.ledger().balance_of(&SALE).is_zero());
        assert_eq!(sale.ledger().owner(), OWNER);
        assert_eq!(
            sale.ledger().ownership_log(),
            &[OwnershipTransferred {
                previous_owner: SALE,
                new_owner: OWNER,
            }]
        );

        assert!(sale.is_finalized());
        assert!(check_all_invariants(sale.config(), sale.state()));

        let names: Vec<&str> = sale.events().iter().map(SaleEvent::name).collect();
        assert_eq!(
            names,
            [
                "WhitelistUpdated",
                "WhitelistUpdated",
                "TokenPurchase",
                "TokenPurchase",
                "Pause",
                "SaleRecorded",
                "Unpause",
                "TokenPurchase",
                "ClosingTimeChanged",
                "Finalized",
            ]
        );
    }

    #[test]
    fn test_nothing_sold_burns_everything() {
        let mut sale = deploy();
        let (reserve, burned) = sale.finalize(&admin(CLOSING)).unwrap();
        assert!(reserve.is_zero());
        assert_eq!(burned, initial_supply());
        assert!(sale.ledger().total_supply().is_zero());
    }

    #[test]
    fn test_settlement_is_one_shot() {
        let mut sale = deploy();
        sale.finalize(&admin(CLOSING)).unwrap();
        assert_eq!(
            sale.finalize(&admin(CLOSING + 1)),
            Err(SaleError::AlreadyFinalized)
        );
        assert_eq!(
            sale.record_sale(&admin(CLOSING + 1), U256::zero(), U256::one()),
            Err(SaleError::AlreadyFinalized)
        );
    }

    #[test]
    fn test_rejected_calls_leave_no_trace() {
        let mut sale = deploy();
        let alice = participant(1);
        enroll(&mut sale, Tier::A, &[alice]);
        sale.purchase_for_self(&contribution(alice, OPENING, units(1, 0)))
            .unwrap();

        let before = (
            sale.currency_raised(),
            sale.asset_sold(),
            sale.events().len(),
            sale.ledger().total_supply(),
            sale.bank().balance_of(&BANK),
            sale.closing_time(),
        );

        let stranger = participant(99);
        let rejected = [
            sale.purchase_for_self(&contribution(stranger, OPENING, units(1, 0)))
                .map(|_| ()),
            sale.purchase_for_self(&contribution(alice, OPENING, units(200, 0)))
                .map(|_| ()),
            sale.record_sale(&TxContext::call(alice, OPENING), U256::one(), U256::one()),
            sale.close_early(&admin(OPENING), CLOSING + 1).map(|_| ()),
            sale.finalize(&admin(OPENING)).map(|_| ()),
            sale.unpause(&admin(OPENING)),
        ];
        assert!(rejected.iter().all(Result::is_err));

        let after = (
            sale.currency_raised(),
            sale.asset_sold(),
            sale.events().len(),
            sale.ledger().total_supply(),
            sale.bank().balance_of(&BANK),
            sale.closing_time(),
        );
        assert_eq!(before, after);
    }

    #[test]
    fn test_config_loads_from_json() {
        let config = deployment_config();
        let mut value = serde_json::to_value(&config).unwrap();
        value
            .as_object_mut()
            .unwrap()
            .remove("max_priority_fee");

        let loaded = SaleConfig::from_json(&value.to_string()).unwrap();
        assert_eq!(loaded, config);
        assert!(loaded.validate(DEPLOYED).is_ok());

        assert!(matches!(
            SaleConfig::from_json("{\"rate\": 1}"),
            Err(ConfigError::Malformed(_))
        ));
    }

    #[test]
    fn test_construction_rules() {
        let mut config = deployment_config();
        config.tier_b_opening_time = CLOSING;
        let ledger = InMemoryAssetLedger::new(SALE);
        let err = TokenSale::new(OWNER, config, ledger, InMemoryBank::new(), DEPLOYED)
            .unwrap_err();
        assert!(matches!(
            err,
            SaleError::InvalidConfig(ConfigError::InvalidSchedule { .. })
        ));

        let mut config = deployment_config();
        config.min_contribution = units(151, 0);
        assert_eq!(
            config.validate(DEPLOYED),
            Err(ConfigError::MinimumAboveMaximum {
                min: units(151, 0),
                max: units(150, 0),
            })
        );
    }
}
