//! Repository implementations
//!
//! Repositories encapsulate the SQL for one table and map between database
//! rows and plain row structs. Queries are built at runtime with
//! `sqlx::query_as`, so the crate compiles without a live database.

pub mod consumption;

pub use consumption::{ConsumptionRepository, ConsumptionRow, NewConsumptionRow};
