//! Consumption readings
//!
//! A reading is the raw monthly input before any billing calculation. Its
//! month, year and volume are not range-checked here; the ledger validates
//! them before a reading is billed.

use rust_decimal::Decimal;

use core_kernel::TaxpayerId;
use crate::tariff::TariffFlag;

/// Raw monthly water consumption for one taxpayer
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    /// Taxpayer being billed
    pub identifier: TaxpayerId,
    /// Billing month (expected 1-12)
    pub month: i32,
    /// Billing year (expected >= 2000)
    pub year: i32,
    /// Metered consumption in cubic meters
    pub volume_consumed: Decimal,
    /// Flag label exactly as reported
    pub tariff_flag: String,
    /// Whether the property is connected to the sewage network
    pub has_sewage_service: bool,
}

impl Reading {
    /// Creates a reading under the green flag without sewage service
    pub fn new(identifier: TaxpayerId, month: i32, year: i32, volume_consumed: Decimal) -> Self {
        Self {
            identifier,
            month,
            year,
            volume_consumed,
            tariff_flag: TariffFlag::Green.label().to_string(),
            has_sewage_service: false,
        }
    }

    /// Sets the flag label
    pub fn with_flag(mut self, label: impl Into<String>) -> Self {
        self.tariff_flag = label.into();
        self
    }

    /// Sets whether sewage service is billed
    pub fn with_sewage(mut self, has_sewage_service: bool) -> Self {
        self.has_sewage_service = has_sewage_service;
        self
    }

    /// Parsed scarcity flag
    pub fn flag(&self) -> TariffFlag {
        TariffFlag::parse(&self.tariff_flag)
    }
}
