//! Custom Test Assertions
//!
//! Assertion helpers for invoices and amounts that give more meaningful
//! failure messages than a bare `assert_eq!`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::Money;
use domain_billing::{Invoice, MINIMUM_BILLABLE_VOLUME};

/// Asserts that two Money values are approximately equal within a tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: &Money) {
    assert!(money.is_zero(), "Expected zero money, got {}", money);
}

/// Asserts that the sum of parts equals the total
pub fn assert_money_sum_equals(parts: &[Money], total: &Money) {
    let sum: Money = parts.iter().sum();
    assert_eq!(
        sum.amount(),
        total.amount(),
        "Sum of parts ({}) does not equal total ({})",
        sum,
        total
    );
}

/// Asserts that an invoice's amounts follow the tariff rules
///
/// Checks the billable floor, the surcharge ceiling, the sewage ratio and
/// that the total is the sum of its components.
pub fn assert_invoice_consistent(invoice: &Invoice) {
    assert!(
        invoice.billable_volume() >= MINIMUM_BILLABLE_VOLUME,
        "Billable volume {} below the floor",
        invoice.billable_volume()
    );
    assert_eq!(
        invoice.billable_volume(),
        invoice.volume_consumed().max(MINIMUM_BILLABLE_VOLUME)
    );
    assert_eq!(
        invoice.water_charge().amount(),
        invoice.tariff_rate().amount() * invoice.billable_volume()
    );
    assert!(
        invoice.flag_surcharge().amount() <= invoice.water_charge().amount() * dec!(0.20),
        "Surcharge {} exceeds 20% of the water charge",
        invoice.flag_surcharge()
    );

    if invoice.has_sewage_service() {
        assert_eq!(
            invoice.sewage_fee().amount(),
            (invoice.water_charge() + invoice.flag_surcharge()).amount() * dec!(0.80)
        );
    } else {
        assert_money_zero(&invoice.sewage_fee());
    }

    assert_money_sum_equals(
        &[invoice.water_charge(), invoice.flag_surcharge(), invoice.sewage_fee()],
        &invoice.total(),
    );
}

/// Asserts that a decimal value is within the specified range (inclusive)
pub fn assert_decimal_in_range(value: Decimal, min: Decimal, max: Decimal) {
    assert!(
        value >= min && value <= max,
        "Value {} not in range [{}, {}]",
        value,
        min,
        max
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::ReadingBuilder;

    #[test]
    fn test_money_approx_eq() {
        assert_money_approx_eq(&Money::new(dec!(270.004)), &Money::new(dec!(270)), dec!(0.01));
    }

    #[test]
    #[should_panic(expected = "differ by more than tolerance")]
    fn test_money_approx_eq_fails() {
        assert_money_approx_eq(&Money::new(dec!(271)), &Money::new(dec!(270)), dec!(0.01));
    }

    #[test]
    fn test_invoice_consistent() {
        assert_invoice_consistent(&ReadingBuilder::new().with_flag("amarela").with_sewage().build_invoice());
        assert_invoice_consistent(&ReadingBuilder::new().with_volume(dec!(3)).build_invoice());
    }

    #[test]
    fn test_decimal_in_range() {
        assert_decimal_in_range(dec!(5.00), dec!(2.50), dec!(6.50));
    }
}
