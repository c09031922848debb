//! Pre-built Test Fixtures
//!
//! Readings whose invoices are known by hand, so tests can assert exact
//! amounts without recomputing the tariff.

use fake::Fake;
use rust_decimal_macros::dec;

use core_kernel::{Money, TaxpayerId};
use domain_billing::Reading;

/// Fixture for taxpayer identifiers
pub struct TaxpayerFixtures;

impl TaxpayerFixtures {
    /// The identifier used by most fixtures
    pub fn primary() -> TaxpayerId {
        Self::parse("12345678900")
    }

    /// A second, distinct identifier
    pub fn secondary() -> TaxpayerId {
        Self::parse("98765432100")
    }

    /// A random eleven-digit identifier
    pub fn random() -> TaxpayerId {
        let digits: u64 = (0..100_000_000_000u64).fake();
        Self::parse(&format!("{:011}", digits))
    }

    fn parse(value: &str) -> TaxpayerId {
        TaxpayerId::parse(value).expect("fixture identifier is non-empty")
    }
}

/// Fixture for readings
pub struct ReadingFixtures;

impl ReadingFixtures {
    /// 25 m³, red flag, sewage connected: 125 + 25 + 120 = 270
    pub fn reference() -> Reading {
        Reading::new(TaxpayerFixtures::primary(), 3, 2024, dec!(25))
            .with_flag("vermelha")
            .with_sewage(true)
    }

    /// Below the floor, no flag, no sewage: billed as 10 m³ = 25
    pub fn minimum() -> Reading {
        Reading::new(TaxpayerFixtures::secondary(), 3, 2024, dec!(7))
    }

    /// 30 m³, yellow flag, sewage connected: 150 + 15 + 132 = 297
    pub fn yellow_with_sewage() -> Reading {
        Reading::new(TaxpayerFixtures::primary(), 4, 2024, dec!(30))
            .with_flag("amarela")
            .with_sewage(true)
    }

    /// 80 m³, red flag, no sewage: 520 + 104 = 624
    pub fn excess_without_sewage() -> Reading {
        Reading::new(TaxpayerFixtures::primary(), 5, 2024, dec!(80)).with_flag("VERMELHA")
    }
}

/// Expected totals for [`ReadingFixtures`]
pub struct TotalFixtures;

impl TotalFixtures {
    pub fn reference() -> Money {
        Money::new(dec!(270))
    }

    pub fn minimum() -> Money {
        Money::new(dec!(25))
    }

    pub fn yellow_with_sewage() -> Money {
        Money::new(dec!(297))
    }

    pub fn excess_without_sewage() -> Money {
        Money::new(dec!(624))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_billing::compute_invoice;

    #[test]
    fn test_fixture_totals_match_calculator() {
        let cases = [
            (ReadingFixtures::reference(), TotalFixtures::reference()),
            (ReadingFixtures::minimum(), TotalFixtures::minimum()),
            (ReadingFixtures::yellow_with_sewage(), TotalFixtures::yellow_with_sewage()),
            (ReadingFixtures::excess_without_sewage(), TotalFixtures::excess_without_sewage()),
        ];

        for (reading, expected) in cases {
            assert_eq!(compute_invoice(reading).total(), expected);
        }
    }

    #[test]
    fn test_random_identifier_has_eleven_digits() {
        let id = TaxpayerFixtures::random();
        assert_eq!(id.as_str().len(), 11);
        assert!(id.as_str().chars().all(|c| c.is_ascii_digit()));
    }
}
