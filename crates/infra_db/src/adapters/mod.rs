//! Domain Adapters
//!
//! Implementations of domain ports backed by PostgreSQL. Each adapter:
//! - Implements the domain's port trait
//! - Translates between domain models and database row types
//! - Uses the repository layer for database operations
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresInvoiceStore;
//! use domain_billing::ConsumptionLedger;
//!
//! let ledger = ConsumptionLedger::new(Arc::new(PostgresInvoiceStore::new(pool)));
//! ```

pub mod consumption;

pub use consumption::PostgresInvoiceStore;
