//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! water billing test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built readings and identifiers with known invoices
//! - `builders`: Builder for readings with sensible defaults
//! - `database`: PostgreSQL test container management
//! - `assertions`: Assertion helpers for invoices and amounts
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
