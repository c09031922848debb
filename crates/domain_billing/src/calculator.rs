//! Billing calculator
//!
//! Turns a reading into an itemized invoice. The pipeline runs in a fixed
//! order and has no failure modes:
//!
//! 1. billable volume = max(consumed, 10 m³)
//! 2. tariff tier selected on the billable volume
//! 3. water charge = billable volume × tier rate
//! 4. flag surcharge = water charge × flag rate
//! 5. sewage fee = 80% of (water charge + flag surcharge), when connected
//! 6. total = water charge + flag surcharge + sewage fee
//!
//! No intermediate amount is rounded. Volumes up to
//! [`MAXIMUM_VOLUME_CONSUMED`](crate::tariff::MAXIMUM_VOLUME_CONSUMED) never
//! overflow; the ledger rejects anything larger before billing.
//!
//! # Example
//!
//! ```rust
//! use core_kernel::TaxpayerId;
//! use domain_billing::{calculator, Reading};
//! use rust_decimal_macros::dec;
//!
//! let reading = Reading::new(TaxpayerId::parse("12345678900").unwrap(), 3, 2024, dec!(25))
//!     .with_flag("vermelha")
//!     .with_sewage(true);
//!
//! let invoice = calculator::compute_invoice(reading);
//! assert_eq!(invoice.total().amount(), dec!(270));
//! ```

use rust_decimal::Decimal;
use serde::Serialize;

use core_kernel::Money;
use crate::invoice::Invoice;
use crate::reading::Reading;
use crate::tariff::{TariffFlag, TariffTier, MINIMUM_BILLABLE_VOLUME, SEWAGE_RATE};

/// Every amount derived from a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InvoiceBreakdown {
    pub billable_volume: Decimal,
    pub tariff_tier: TariffTier,
    pub tariff_rate: Money,
    pub water_charge: Money,
    pub flag_surcharge: Money,
    pub sewage_fee: Money,
    pub total: Money,
}

/// Applies the minimum-billable floor
pub fn billable_volume(volume_consumed: Decimal) -> Decimal {
    volume_consumed.max(MINIMUM_BILLABLE_VOLUME)
}

/// Sewage fee on the flagged water charge
pub fn sewage_fee(water_charge: Money, flag_surcharge: Money, has_sewage_service: bool) -> Money {
    if has_sewage_service {
        SEWAGE_RATE.apply(water_charge + flag_surcharge)
    } else {
        Money::zero()
    }
}

/// Computes the derived amounts for a consumption volume
pub fn compute(volume_consumed: Decimal, flag: TariffFlag, has_sewage_service: bool) -> InvoiceBreakdown {
    let billable_volume = billable_volume(volume_consumed);
    let tariff_tier = TariffTier::for_volume(billable_volume);
    let tariff_rate = tariff_tier.rate();
    let water_charge = tariff_rate * billable_volume;
    let flag_surcharge = flag.surcharge_rate().apply(water_charge);
    let sewage_fee = sewage_fee(water_charge, flag_surcharge, has_sewage_service);

    InvoiceBreakdown {
        billable_volume,
        tariff_tier,
        tariff_rate,
        water_charge,
        flag_surcharge,
        sewage_fee,
        total: water_charge + flag_surcharge + sewage_fee,
    }
}

/// Computes the derived amounts for a reading
pub fn compute_breakdown(reading: &Reading) -> InvoiceBreakdown {
    compute(reading.volume_consumed, reading.flag(), reading.has_sewage_service)
}

/// Bills a reading
///
/// Assumes the reading has already been validated; see
/// [`ConsumptionLedger::create`](crate::ledger::ConsumptionLedger::create).
pub fn compute_invoice(reading: Reading) -> Invoice {
    let breakdown = compute_breakdown(&reading);
    Invoice::issue(reading, breakdown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_floor_applies_below_minimum() {
        assert_eq!(billable_volume(dec!(7)), dec!(10));
        assert_eq!(billable_volume(dec!(0.5)), dec!(10));
        assert_eq!(billable_volume(dec!(15)), dec!(15));
    }

    #[test]
    fn test_minimum_bill_without_extras() {
        let breakdown = compute(dec!(3), TariffFlag::Green, false);
        assert_eq!(breakdown.tariff_tier, TariffTier::Minimum);
        assert_eq!(breakdown.water_charge.amount(), dec!(25));
        assert_eq!(breakdown.total.amount(), dec!(25));
    }

    #[test]
    fn test_yellow_flag_with_sewage() {
        // 30 m³ at 5.00 = 150; +10% = 15; sewage 80% of 165 = 132
        let breakdown = compute(dec!(30), TariffFlag::Yellow, true);
        assert_eq!(breakdown.water_charge.amount(), dec!(150));
        assert_eq!(breakdown.flag_surcharge.amount(), dec!(15));
        assert_eq!(breakdown.sewage_fee.amount(), dec!(132));
        assert_eq!(breakdown.total.amount(), dec!(297));
    }

    #[test]
    fn test_no_sewage_means_zero_fee() {
        let breakdown = compute(dec!(80), TariffFlag::Red, false);
        assert!(breakdown.sewage_fee.is_zero());
        // 80 × 6.50 = 520; +20% = 104
        assert_eq!(breakdown.total.amount(), dec!(624));
    }
}
