//! Test Data Builders
//!
//! Builders let tests specify only the fields they care about and take
//! defaults for everything else.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::TaxpayerId;
use domain_billing::{compute_invoice, Invoice, Reading};

use crate::fixtures::TaxpayerFixtures;

/// Builder for readings
///
/// Defaults: primary taxpayer, March 2024, 25 m³, no flag, no sewage.
#[derive(Debug, Clone)]
pub struct ReadingBuilder {
    identifier: TaxpayerId,
    month: i32,
    year: i32,
    volume_consumed: Decimal,
    tariff_flag: Option<String>,
    has_sewage_service: bool,
}

impl Default for ReadingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadingBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            identifier: TaxpayerFixtures::primary(),
            month: 3,
            year: 2024,
            volume_consumed: dec!(25),
            tariff_flag: None,
            has_sewage_service: false,
        }
    }

    pub fn with_identifier(mut self, identifier: TaxpayerId) -> Self {
        self.identifier = identifier;
        self
    }

    /// Sets month and year together
    pub fn with_period(mut self, month: i32, year: i32) -> Self {
        self.month = month;
        self.year = year;
        self
    }

    pub fn with_month(mut self, month: i32) -> Self {
        self.month = month;
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    pub fn with_volume(mut self, volume: Decimal) -> Self {
        self.volume_consumed = volume;
        self
    }

    pub fn with_flag(mut self, label: impl Into<String>) -> Self {
        self.tariff_flag = Some(label.into());
        self
    }

    pub fn with_sewage(mut self) -> Self {
        self.has_sewage_service = true;
        self
    }

    /// Builds the reading
    pub fn build(self) -> Reading {
        let reading = Reading::new(self.identifier, self.month, self.year, self.volume_consumed)
            .with_sewage(self.has_sewage_service);

        match self.tariff_flag {
            Some(label) => reading.with_flag(label),
            None => reading,
        }
    }

    /// Builds the reading and bills it without storing it
    pub fn build_invoice(self) -> Invoice {
        compute_invoice(self.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let reading = ReadingBuilder::new().build();
        assert_eq!(reading.identifier, TaxpayerFixtures::primary());
        assert_eq!((reading.month, reading.year), (3, 2024));
        assert_eq!(reading.volume_consumed, dec!(25));
        assert!(!reading.has_sewage_service);
    }

    #[test]
    fn test_build_invoice() {
        let invoice = ReadingBuilder::new()
            .with_flag("vermelha")
            .with_sewage()
            .build_invoice();

        assert_eq!(invoice.total().amount(), dec!(270));
    }
}
