//! Consumption invoices
//!
//! An invoice is a reading together with every amount derived from it. The
//! derived fields are private and only ever filled in by the calculator, so a
//! stored invoice can never disagree with its own reading.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use core_kernel::{InvoiceId, Money, TaxpayerId};
use crate::calculator::{self, InvoiceBreakdown};
use crate::reading::Reading;
use crate::tariff::{TariffFlag, TariffTier};

/// Identity of an invoice: one per taxpayer per billing month
///
/// Ordering follows (year, month, identifier), which is the order the ledger
/// lists invoices in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct InvoiceKey {
    pub year: i32,
    pub month: i32,
    pub identifier: TaxpayerId,
}

impl InvoiceKey {
    /// Creates a key
    pub fn new(identifier: TaxpayerId, month: i32, year: i32) -> Self {
        Self { year, month, identifier }
    }

    /// Relative resource path `{identifier}/{month}/{year}`
    pub fn to_path(&self) -> String {
        format!("{}/{}/{}", self.identifier, self.month, self.year)
    }
}

impl fmt::Display for InvoiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:02}/{}", self.identifier, self.month, self.year)
    }
}

impl From<&Reading> for InvoiceKey {
    fn from(reading: &Reading) -> Self {
        Self::new(reading.identifier.clone(), reading.month, reading.year)
    }
}

/// A fully computed, stored billing record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    id: InvoiceId,
    identifier: TaxpayerId,
    month: i32,
    year: i32,
    volume_consumed: Decimal,
    tariff_flag: String,
    has_sewage_service: bool,
    billable_volume: Decimal,
    tariff_tier: TariffTier,
    tariff_rate: Money,
    water_charge: Money,
    flag_surcharge: Money,
    sewage_fee: Money,
    total: Money,
    created_at: DateTime<Utc>,
}

impl Invoice {
    /// Bills a reading, assigning a fresh identifier and creation time
    pub(crate) fn issue(reading: Reading, breakdown: InvoiceBreakdown) -> Self {
        Self::assemble(InvoiceId::new_v7(), Utc::now(), reading, breakdown)
    }

    /// Rebuilds a previously stored invoice from its reading
    ///
    /// Derived amounts are recomputed rather than trusted from storage.
    /// Adapters compare the result against the persisted totals to detect
    /// drift (e.g. rows billed under an older tariff table).
    pub fn rehydrate(id: InvoiceId, created_at: DateTime<Utc>, reading: Reading) -> Self {
        let breakdown = calculator::compute_breakdown(&reading);
        Self::assemble(id, created_at, reading, breakdown)
    }

    fn assemble(
        id: InvoiceId,
        created_at: DateTime<Utc>,
        reading: Reading,
        breakdown: InvoiceBreakdown,
    ) -> Self {
        Self {
            id,
            identifier: reading.identifier,
            month: reading.month,
            year: reading.year,
            volume_consumed: reading.volume_consumed,
            tariff_flag: reading.tariff_flag,
            has_sewage_service: reading.has_sewage_service,
            billable_volume: breakdown.billable_volume,
            tariff_tier: breakdown.tariff_tier,
            tariff_rate: breakdown.tariff_rate,
            water_charge: breakdown.water_charge,
            flag_surcharge: breakdown.flag_surcharge,
            sewage_fee: breakdown.sewage_fee,
            total: breakdown.total,
            created_at,
        }
    }

    pub fn id(&self) -> InvoiceId {
        self.id
    }

    pub fn key(&self) -> InvoiceKey {
        InvoiceKey::new(self.identifier.clone(), self.month, self.year)
    }

    pub fn identifier(&self) -> &TaxpayerId {
        &self.identifier
    }

    pub fn month(&self) -> i32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn volume_consumed(&self) -> Decimal {
        self.volume_consumed
    }

    /// Flag label as it was reported
    pub fn tariff_flag(&self) -> &str {
        &self.tariff_flag
    }

    /// Parsed scarcity flag
    pub fn flag(&self) -> TariffFlag {
        TariffFlag::parse(&self.tariff_flag)
    }

    pub fn has_sewage_service(&self) -> bool {
        self.has_sewage_service
    }

    pub fn billable_volume(&self) -> Decimal {
        self.billable_volume
    }

    pub fn tariff_tier(&self) -> TariffTier {
        self.tariff_tier
    }

    pub fn tariff_rate(&self) -> Money {
        self.tariff_rate
    }

    pub fn water_charge(&self) -> Money {
        self.water_charge
    }

    pub fn flag_surcharge(&self) -> Money {
        self.flag_surcharge
    }

    pub fn sewage_fee(&self) -> Money {
        self.sewage_fee
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The reading this invoice was billed from
    pub fn reading(&self) -> Reading {
        Reading {
            identifier: self.identifier.clone(),
            month: self.month,
            year: self.year,
            volume_consumed: self.volume_consumed,
            tariff_flag: self.tariff_flag.clone(),
            has_sewage_service: self.has_sewage_service,
        }
    }
}

/// Sums invoice totals at full precision
///
/// Returns `None` if the sum leaves the decimal range.
pub fn checked_total<'a>(invoices: impl IntoIterator<Item = &'a Invoice>) -> Option<Money> {
    invoices
        .into_iter()
        .try_fold(Money::ZERO, |sum, invoice| sum.checked_add(invoice.total()))
}
