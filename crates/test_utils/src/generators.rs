//! Property-Based Test Generators
//!
//! Proptest strategies for readings. The `valid_*` strategies only produce
//! values the ledger accepts; the others cover the rejected ranges.

use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::{TaxpayerId, MIN_BILLING_YEAR};
use domain_billing::Reading;

/// Strategy for non-empty numeric taxpayer identifiers
pub fn taxpayer_id_strategy() -> impl Strategy<Value = TaxpayerId> {
    "[0-9]{11}".prop_map(|s| TaxpayerId::parse(s).expect("regex yields non-empty strings"))
}

/// Strategy for months in 1..=12
pub fn valid_month_strategy() -> impl Strategy<Value = i32> {
    1i32..=12
}

/// Strategy for months outside 1..=12
pub fn invalid_month_strategy() -> impl Strategy<Value = i32> {
    prop_oneof![-100i32..=0, 13i32..=100]
}

/// Strategy for accepted years
pub fn valid_year_strategy() -> impl Strategy<Value = i32> {
    MIN_BILLING_YEAR..=2100
}

/// Strategy for years before the first billing year
pub fn invalid_year_strategy() -> impl Strategy<Value = i32> {
    1900i32..MIN_BILLING_YEAR
}

/// Strategy for positive volumes with up to four decimal places (0.0001 to 2000 m³)
pub fn volume_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=20_000_000i64).prop_map(|units| Decimal::new(units, 4))
}

/// Strategy for zero or negative volumes
pub fn non_positive_volume_strategy() -> impl Strategy<Value = Decimal> {
    (-20_000_000i64..=0i64).prop_map(|units| Decimal::new(units, 4))
}

/// Strategy for flag labels, recognized or not, in mixed case
pub fn flag_label_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("verde".to_string()),
        Just("amarela".to_string()),
        Just("AMARELA".to_string()),
        Just("Vermelha".to_string()),
        Just("vermelha".to_string()),
        "[a-z]{0,10}",
    ]
}

/// Strategy for readings the ledger accepts
pub fn valid_reading_strategy() -> impl Strategy<Value = Reading> {
    (
        taxpayer_id_strategy(),
        valid_month_strategy(),
        valid_year_strategy(),
        volume_strategy(),
        flag_label_strategy(),
        any::<bool>(),
    )
        .prop_map(|(identifier, month, year, volume, flag, sewage)| {
            Reading::new(identifier, month, year, volume)
                .with_flag(flag)
                .with_sewage(sewage)
        })
}
