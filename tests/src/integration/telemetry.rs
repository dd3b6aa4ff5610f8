//! # Telemetry
//!
//! Metrics published by `SaleService` land in the `sale-telemetry` registry.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use sale_contract::prelude::*;

    #[tokio::test]
    async fn test_service_publishes_metrics() {
        let svc = SaleService::new(deploy(), ServiceConfig::default());
        let alice = participant(1);
        svc.submit(SaleTransaction {
            ctx: admin(DEPLOYED),
            call: SaleCall::AddToWhitelist {
                tier: Tier::A,
                addresses: vec![alice],
            },
        })
        .await
        .unwrap();

        svc.submit(SaleTransaction {
            ctx: contribution(alice, OPENING, units(1, 0)),
            call: SaleCall::PurchaseForSelf,
        })
        .await
        .unwrap();
        let _ = svc
            .submit(SaleTransaction {
                ctx: contribution(participant(2), OPENING, units(1, 0)),
                call: SaleCall::PurchaseForSelf,
            })
            .await;

        assert!(sale_telemetry::PURCHASES.get() >= 1.0);
        assert!(
            sale_telemetry::REJECTIONS
                .with_label_values(&["not_whitelisted_tier_a"])
                .get()
                >= 1.0
        );

        let text = sale_telemetry::encode_metrics().unwrap();
        assert!(text.contains("sale_purchases_total"));
        assert!(text.contains("sale_rejections_total"));
        assert!(text.contains("sale_call_duration_seconds"));
    }

    #[test]
    fn test_config_from_env_has_defaults() {
        let config = sale_telemetry::TelemetryConfig::from_env();
        assert!(!config.service_name.is_empty());
        assert!(!config.log_level.is_empty());
    }
}
