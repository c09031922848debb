//! Infrastructure Database Layer
//!
//! PostgreSQL persistence for the billing domain, built on SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern:
//!
//! - [`repositories`] hold the SQL and map rows to plain row structs
//! - [`adapters`] implement the domain's `InvoiceStore` port on top of a
//!   repository, translating rows back into domain invoices
//!
//! The schema lives in `migrations/` at the workspace root and is applied by
//! [`run_migrations`].
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{DatabaseConfig, create_pool, run_migrations};
//! use infra_db::adapters::PostgresInvoiceStore;
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/water_billing")).await?;
//! run_migrations(&pool).await?;
//! let store = PostgresInvoiceStore::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, run_migrations, DatabaseConfig};
pub use error::DatabaseError;
pub use adapters::PostgresInvoiceStore;
