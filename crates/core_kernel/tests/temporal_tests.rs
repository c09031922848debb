//! Tests for billing periods

use core_kernel::{BillingPeriod, TemporalError, MIN_BILLING_YEAR};

#[test]
fn test_accepts_every_calendar_month() {
    for month in 1..=12 {
        assert!(BillingPeriod::new(month, 2024).is_ok(), "month {} rejected", month);
    }
}

#[test]
fn test_rejects_month_zero_and_thirteen() {
    assert_eq!(BillingPeriod::new(0, 2024), Err(TemporalError::MonthOutOfRange(0)));
    assert_eq!(BillingPeriod::new(13, 2024), Err(TemporalError::MonthOutOfRange(13)));
}

#[test]
fn test_year_boundary_is_inclusive() {
    assert!(BillingPeriod::new(1, MIN_BILLING_YEAR).is_ok());
    assert_eq!(
        BillingPeriod::new(1, MIN_BILLING_YEAR - 1),
        Err(TemporalError::YearOutOfRange(1999))
    );
}

#[test]
fn test_periods_order_chronologically() {
    let dec_2023 = BillingPeriod::new(12, 2023).unwrap();
    let jan_2024 = BillingPeriod::new(1, 2024).unwrap();
    let mar_2024 = BillingPeriod::new(3, 2024).unwrap();

    let mut periods = vec![mar_2024, dec_2023, jan_2024];
    periods.sort();
    assert_eq!(periods, vec![dec_2023, jan_2024, mar_2024]);
}
