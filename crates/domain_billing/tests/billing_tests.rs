//! Comprehensive tests for domain_billing

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{RoundingConvention, TaxpayerId};

use domain_billing::adapters::InMemoryInvoiceStore;
use domain_billing::calculator::{self, billable_volume};
use domain_billing::{
    BillingError, ConsumptionLedger, InvoiceKey, Reading, TariffFlag, TariffTier,
    MAXIMUM_VOLUME_CONSUMED,
};

fn taxpayer(value: &str) -> TaxpayerId {
    TaxpayerId::parse(value).unwrap()
}

fn reading(volume: Decimal) -> Reading {
    Reading::new(taxpayer("12345678900"), 3, 2024, volume)
}

fn ledger() -> ConsumptionLedger {
    ConsumptionLedger::new(Arc::new(InMemoryInvoiceStore::new()))
}

fn key(identifier: &str, month: i32, year: i32) -> InvoiceKey {
    InvoiceKey::new(taxpayer(identifier), month, year)
}

// ============================================================================
// Calculator Tests
// ============================================================================

mod calculator_tests {
    use super::*;

    #[test]
    fn test_billable_volume_floor() {
        assert_eq!(billable_volume(dec!(7)), dec!(10));
        assert_eq!(billable_volume(dec!(15)), dec!(15));
        assert_eq!(billable_volume(dec!(10)), dec!(10));
    }

    #[test]
    fn test_tariff_tier_boundaries() {
        let cases = [
            (dec!(10), dec!(2.50)),
            (dec!(10.0001), dec!(3.50)),
            (dec!(20), dec!(3.50)),
            (dec!(20.0001), dec!(5.00)),
            (dec!(50), dec!(5.00)),
            (dec!(50.0001), dec!(6.50)),
        ];

        for (volume, expected_rate) in cases {
            let invoice = calculator::compute_invoice(reading(volume));
            assert_eq!(
                invoice.tariff_rate().amount(),
                expected_rate,
                "wrong rate for {} m³",
                volume
            );
        }
    }

    #[test]
    fn test_floor_selects_minimum_tier() {
        let invoice = calculator::compute_invoice(reading(dec!(7)));
        assert_eq!(invoice.billable_volume(), dec!(10));
        assert_eq!(invoice.tariff_tier(), TariffTier::Minimum);
        assert_eq!(invoice.water_charge().amount(), dec!(25));
        // The reading itself is kept as reported
        assert_eq!(invoice.volume_consumed(), dec!(7));
    }

    #[test]
    fn test_flag_is_case_insensitive() {
        for label in ["AMARELA", "amarela", "Amarela"] {
            let invoice = calculator::compute_invoice(reading(dec!(20)).with_flag(label));
            // 20 × 3.50 = 70; 10% = 7
            assert_eq!(invoice.flag_surcharge().amount(), dec!(7), "label {}", label);
            assert_eq!(invoice.flag(), TariffFlag::Yellow);
        }
    }

    #[test]
    fn test_unrecognized_flag_has_no_surcharge() {
        let invoice = calculator::compute_invoice(reading(dec!(20)).with_flag("azul"));
        assert!(invoice.flag_surcharge().is_zero());
        assert_eq!(invoice.tariff_flag(), "azul");
    }

    #[test]
    fn test_green_flag_has_no_surcharge() {
        let invoice = calculator::compute_invoice(reading(dec!(20)).with_flag("verde"));
        assert!(invoice.flag_surcharge().is_zero());
    }

    #[test]
    fn test_sewage_fee_is_eighty_percent_of_flagged_charge() {
        let with = calculator::compute_invoice(reading(dec!(40)).with_flag("vermelha").with_sewage(true));
        let expected = (with.water_charge().amount() + with.flag_surcharge().amount()) * dec!(0.80);
        assert_eq!(with.sewage_fee().amount(), expected);

        let without = calculator::compute_invoice(reading(dec!(40)).with_flag("vermelha").with_sewage(false));
        assert!(without.sewage_fee().is_zero());
    }

    #[test]
    fn test_end_to_end_example() {
        let invoice = calculator::compute_invoice(
            Reading::new(taxpayer("12345678900"), 3, 2024, dec!(25))
                .with_flag("vermelha")
                .with_sewage(true),
        );

        assert_eq!(invoice.billable_volume(), dec!(25));
        assert_eq!(invoice.tariff_rate().amount(), dec!(5.00));
        assert_eq!(invoice.water_charge().amount(), dec!(125.00));
        assert_eq!(invoice.flag_surcharge().amount(), dec!(25.00));
        assert_eq!(invoice.sewage_fee().amount(), dec!(120.00));
        assert_eq!(invoice.total().amount(), dec!(270.00));
    }

    #[test]
    fn test_fractional_volume_keeps_full_precision() {
        // 12.345 × 3.50 = 43.2075; 10% = 4.32075; 80% of 47.52825 = 38.0226
        let invoice = calculator::compute_invoice(reading(dec!(12.345)).with_flag("amarela").with_sewage(true));
        assert_eq!(invoice.water_charge().amount(), dec!(43.2075));
        assert_eq!(invoice.flag_surcharge().amount(), dec!(4.32075));
        assert_eq!(invoice.sewage_fee().amount(), dec!(38.0226));
        assert_eq!(invoice.total().amount(), dec!(85.55085));
    }

    #[test]
    fn test_invoice_serializes_camel_case() {
        let invoice = calculator::compute_invoice(reading(dec!(25)).with_flag("vermelha").with_sewage(true));
        let json = serde_json::to_value(&invoice).unwrap();

        assert_eq!(json["identifier"], "12345678900");
        assert_eq!(json["tariffFlag"], "vermelha");
        assert_eq!(json["hasSewageService"], true);
        assert!(json.get("sewageFee").is_some());
        assert!(json.get("flagSurcharge").is_some());
    }

    #[test]
    fn test_invoice_key_path() {
        let invoice = calculator::compute_invoice(reading(dec!(25)));
        assert_eq!(invoice.key().to_path(), "12345678900/3/2024");
        assert_eq!(invoice.key(), InvoiceKey::from(&invoice.reading()));
    }

    #[test]
    fn test_rehydrate_recomputes_derived_fields() {
        let original = calculator::compute_invoice(reading(dec!(33)).with_flag("amarela"));
        let restored = domain_billing::Invoice::rehydrate(
            original.id(),
            original.created_at(),
            original.reading(),
        );
        assert_eq!(restored, original);
    }
}

// ============================================================================
// Ledger Tests
// ============================================================================

mod ledger_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_stores_invoice() {
        let ledger = ledger();
        let invoice = ledger.create(reading(dec!(25))).await.unwrap();

        assert_eq!(invoice.key(), key("12345678900", 3, 2024));
        assert_eq!(ledger.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_month() {
        let ledger = ledger();
        for month in [0, 13, -1] {
            let mut r = reading(dec!(10));
            r.month = month;
            let err = ledger.create(r).await.unwrap_err();
            assert!(matches!(err, BillingError::InvalidMonth(m) if m == month));
            assert_eq!(err.to_string(), "Month must be between 1 and 12.");
        }
        assert_eq!(ledger.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_rejects_year_before_2000() {
        let ledger = ledger();
        let mut r = reading(dec!(10));
        r.year = 1999;

        let err = ledger.create(r).await.unwrap_err();
        assert!(matches!(err, BillingError::InvalidYear(1999)));
        assert_eq!(err.to_string(), "Year must be greater than or equal to 2000.");
    }

    #[tokio::test]
    async fn test_create_rejects_non_positive_volume() {
        let ledger = ledger();
        for volume in [dec!(0), dec!(-5)] {
            let err = ledger.create(reading(volume)).await.unwrap_err();
            assert!(matches!(err, BillingError::InvalidVolume(_)));
            assert_eq!(err.to_string(), "Consumed volume must be greater than 0.");
        }
    }

    #[tokio::test]
    async fn test_create_rejects_volume_above_maximum() {
        let ledger = ledger();
        let err = ledger
            .create(reading(dec!(70000000000000000000000000000)).with_flag("vermelha").with_sewage(true))
            .await
            .unwrap_err();

        assert!(matches!(err, BillingError::VolumeTooLarge(_)));
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Consumed volume must be less than or equal to 1000000000."
        );
        assert_eq!(ledger.count().await.unwrap(), 0);

        let err = ledger.create(reading(MAXIMUM_VOLUME_CONSUMED + dec!(0.001))).await.unwrap_err();
        assert!(matches!(err, BillingError::VolumeTooLarge(_)));
    }

    #[tokio::test]
    async fn test_maximum_volume_is_billed() {
        let ledger = ledger();
        let invoice = ledger
            .create(reading(MAXIMUM_VOLUME_CONSUMED).with_flag("vermelha").with_sewage(true))
            .await
            .unwrap();

        // 1e9 × 6.50 = 6.5e9; +20% = 1.3e9; sewage 80% of 7.8e9 = 6.24e9
        assert_eq!(invoice.total().amount(), dec!(14040000000));
        assert_eq!(ledger.total_general().await.unwrap().amount(), dec!(14040000000.00));
    }

    #[tokio::test]
    async fn test_checks_run_in_order() {
        let ledger = ledger();
        ledger.create(reading(dec!(10))).await.unwrap();

        // Month, year and volume all invalid: month wins
        let mut r = reading(dec!(0));
        r.month = 13;
        r.year = 1990;
        assert!(matches!(ledger.create(r).await, Err(BillingError::InvalidMonth(13))));

        // Year and volume invalid: year wins
        let mut r = reading(dec!(0));
        r.year = 1990;
        assert!(matches!(ledger.create(r).await, Err(BillingError::InvalidYear(1990))));

        // Duplicate key with invalid volume: volume wins
        assert!(matches!(
            ledger.create(reading(dec!(0))).await,
            Err(BillingError::InvalidVolume(_))
        ));
        assert!(matches!(
            ledger.create(reading(dec!(2000000000))).await,
            Err(BillingError::VolumeTooLarge(_))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_rejected_regardless_of_other_fields() {
        let ledger = ledger();
        ledger.create(reading(dec!(25)).with_flag("verde")).await.unwrap();

        let err = ledger
            .create(reading(dec!(99)).with_flag("vermelha").with_sewage(true))
            .await
            .unwrap_err();

        assert!(matches!(err, BillingError::DuplicateReading(_)));
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "A consumption record already exists for this identifier, month and year."
        );
        assert_eq!(ledger.count().await.unwrap(), 1);

        let stored = ledger.find_by_key(&key("12345678900", 3, 2024)).await.unwrap();
        assert_eq!(stored.volume_consumed(), dec!(25));
    }

    #[tokio::test]
    async fn test_same_taxpayer_different_months_coexist() {
        let ledger = ledger();
        for month in 1..=3 {
            let mut r = reading(dec!(12));
            r.month = month;
            ledger.create(r).await.unwrap();
        }
        assert_eq!(ledger.list_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_concurrent_creates_for_same_key_store_one() {
        let ledger = ledger();
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let ledger = ledger.clone();
                tokio::spawn(async move { ledger.create(reading(dec!(25))).await })
            })
            .collect();

        let mut created = 0;
        let mut duplicates = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(BillingError::DuplicateReading(_)) => duplicates += 1,
                Err(other) => panic!("unexpected error: {}", other),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(duplicates, 15);
        assert_eq!(ledger.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_all_on_empty_ledger_is_not_found() {
        let err = ledger().list_all().await.unwrap_err();
        assert!(matches!(err, BillingError::EmptyLedger));
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_find_by_key_exact_match() {
        let ledger = ledger();
        ledger.create(reading(dec!(25))).await.unwrap();

        assert!(ledger.find_by_key(&key("12345678900", 3, 2024)).await.is_ok());
        for missing in [
            key("12345678900", 4, 2024),
            key("12345678900", 3, 2023),
            key("12345678901", 3, 2024),
        ] {
            assert!(matches!(
                ledger.find_by_key(&missing).await,
                Err(BillingError::InvoiceNotFound(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_delete_existing_key() {
        let ledger = ledger();
        ledger.create(reading(dec!(25))).await.unwrap();

        ledger.delete_by_key(&key("12345678900", 3, 2024)).await.unwrap();
        assert_eq!(ledger.count().await.unwrap(), 0);
        assert!(ledger.find_by_key(&key("12345678900", 3, 2024)).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_missing_key_leaves_ledger_unchanged() {
        let ledger = ledger();
        ledger.create(reading(dec!(25))).await.unwrap();

        let err = ledger.delete_by_key(&key("00000000000", 3, 2024)).await.unwrap_err();
        assert!(matches!(err, BillingError::InvoiceNotFound(_)));
        assert_eq!(err.to_string(), "No consumption record found for the given parameters.");
        assert_eq!(ledger.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_deleted_key_can_be_created_again() {
        let ledger = ledger();
        ledger.create(reading(dec!(25))).await.unwrap();
        ledger.delete_by_key(&key("12345678900", 3, 2024)).await.unwrap();

        assert!(ledger.create(reading(dec!(30))).await.is_ok());
    }
}

// ============================================================================
// General Total Tests
// ============================================================================

mod total_tests {
    use super::*;

    #[tokio::test]
    async fn test_total_general_on_empty_ledger_is_not_found() {
        let err = ledger().total_general().await.unwrap_err();
        assert!(matches!(err, BillingError::EmptyLedger));
        assert_eq!(err.to_string(), "No consumption records found.");
    }

    #[tokio::test]
    async fn test_total_general_sums_all_totals() {
        let ledger = ledger();
        // 270.00
        ledger
            .create(reading(dec!(25)).with_flag("vermelha").with_sewage(true))
            .await
            .unwrap();
        // 25.00
        let mut r = reading(dec!(3));
        r.identifier = taxpayer("98765432100");
        ledger.create(r).await.unwrap();

        assert_eq!(ledger.total_general().await.unwrap().amount(), dec!(295.00));
    }

    #[tokio::test]
    async fn test_total_general_rounds_once_after_summing() {
        let ledger = ledger();
        // 12.345 m³ yellow + sewage = 85.55085 each; two of them = 171.1017
        for identifier in ["111", "222"] {
            let mut r = reading(dec!(12.345)).with_flag("amarela").with_sewage(true);
            r.identifier = taxpayer(identifier);
            ledger.create(r).await.unwrap();
        }

        assert_eq!(ledger.total_general().await.unwrap().amount(), dec!(171.10));
    }

    #[tokio::test]
    async fn test_rounding_convention_applies_at_midpoint() {
        let store = Arc::new(InMemoryInvoiceStore::new());
        let even = ConsumptionLedger::new(store.clone());
        let away = ConsumptionLedger::new(store).with_rounding(RoundingConvention::HalfAwayFromZero);

        // 10.03 × 3.50 = 35.105
        let mut r = reading(dec!(10.03));
        r.identifier = taxpayer("333");
        even.create(r).await.unwrap();

        assert_eq!(even.total_general().await.unwrap().amount(), dec!(35.10));
        assert_eq!(away.total_general().await.unwrap().amount(), dec!(35.11));
    }
}

// ============================================================================
// Property Tests
// ============================================================================

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn volume_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..20_000_000i64).prop_map(|units| Decimal::new(units, 4))
    }

    fn flag_strategy() -> impl Strategy<Value = &'static str> {
        prop_oneof![
            Just("verde"),
            Just("amarela"),
            Just("vermelha"),
            Just("VERMELHA"),
            Just("azul"),
            Just(""),
        ]
    }

    proptest! {
        #[test]
        fn total_is_sum_of_components(volume in volume_strategy(), flag in flag_strategy(), sewage in any::<bool>()) {
            let invoice = calculator::compute_invoice(reading(volume).with_flag(flag).with_sewage(sewage));
            prop_assert_eq!(
                invoice.total(),
                invoice.water_charge() + invoice.flag_surcharge() + invoice.sewage_fee()
            );
        }

        #[test]
        fn billable_volume_is_floored_consumption(volume in volume_strategy()) {
            let invoice = calculator::compute_invoice(reading(volume));
            prop_assert!(invoice.billable_volume() >= dec!(10));
            prop_assert_eq!(invoice.billable_volume(), volume.max(dec!(10)));
        }

        #[test]
        fn tier_is_monotonic_in_volume(a in volume_strategy(), b in volume_strategy()) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(
                TariffTier::for_volume(billable_volume(low)) <= TariffTier::for_volume(billable_volume(high))
            );
        }

        #[test]
        fn surcharge_never_exceeds_twenty_percent(volume in volume_strategy(), flag in flag_strategy()) {
            let invoice = calculator::compute_invoice(reading(volume).with_flag(flag));
            prop_assert!(invoice.flag_surcharge().amount() <= invoice.water_charge().amount() * dec!(0.20));
            prop_assert!(invoice.flag_surcharge().amount() >= Decimal::ZERO);
        }
    }
}
