//! Adapters for the billing domain
//!
//! Implementations of [`InvoiceStore`](crate::ports::InvoiceStore) that live
//! next to the domain because they need no infrastructure.
//!
//! # Available Adapters
//!
//! - **InMemoryInvoiceStore**: process-local store for development and tests
//!
//! The PostgreSQL adapter lives in `infra_db`.
//!
//! ```rust,ignore
//! use domain_billing::adapters::InMemoryInvoiceStore;
//! use domain_billing::ConsumptionLedger;
//! use std::sync::Arc;
//!
//! let ledger = ConsumptionLedger::new(Arc::new(InMemoryInvoiceStore::new()));
//! ```

pub mod memory;

pub use memory::InMemoryInvoiceStore;
