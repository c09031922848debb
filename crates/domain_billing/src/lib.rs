//! Billing Domain - Water Consumption Invoicing
//!
//! This crate turns monthly water-consumption readings into itemized
//! invoices and keeps the ledger of stored invoices.
//!
//! # Components
//!
//! - **Calculator** ([`calculator`]): pure pipeline from a [`Reading`] to an
//!   [`Invoice`] (billable volume, tariff tier, flag surcharge, sewage fee,
//!   total). No I/O, safe to call from any task.
//! - **Ledger** ([`ConsumptionLedger`]): validates readings, enforces one
//!   invoice per (identifier, month, year), and provides list, lookup,
//!   delete and general-total operations over an [`InvoiceStore`].
//!
//! # Tariff
//!
//! | billable volume (m³) | price per m³ |
//! |----------------------|--------------|
//! | up to 10             | 2.50         |
//! | up to 20             | 3.50         |
//! | up to 50             | 5.00         |
//! | above 50             | 6.50         |
//!
//! Consumption below 10 m³ is billed as 10 m³ and readings above
//! 1 000 000 000 m³ are rejected. The yellow flag adds 10% and
//! the red flag 20% to the water charge; the sewage fee is 80% of the water
//! charge plus surcharge.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_billing::{ConsumptionLedger, Reading, adapters::InMemoryInvoiceStore};
//!
//! let ledger = ConsumptionLedger::new(Arc::new(InMemoryInvoiceStore::new()));
//! let invoice = ledger.create(reading).await?;
//! let total = ledger.total_general().await?;
//! ```

pub mod tariff;
pub mod reading;
pub mod calculator;
pub mod invoice;
pub mod ports;
pub mod adapters;
pub mod ledger;
pub mod error;

pub use tariff::{TariffFlag, TariffTier, MAXIMUM_VOLUME_CONSUMED, MINIMUM_BILLABLE_VOLUME, SEWAGE_RATE};
pub use reading::Reading;
pub use calculator::{compute_invoice, InvoiceBreakdown};
pub use invoice::{checked_total, Invoice, InvoiceKey};
pub use ports::InvoiceStore;
pub use ledger::ConsumptionLedger;
pub use error::BillingError;
