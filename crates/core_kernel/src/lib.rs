//! Core Kernel - Foundational types and utilities for the water billing system
//!
//! This crate provides the fundamental building blocks used across the workspace:
//! - Money and rate types with precise decimal arithmetic
//! - Billing periods (month/year) with range validation
//! - Common identifiers and value objects
//! - Port infrastructure shared by storage adapters

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod ports;
pub mod error;

pub use money::{Money, Rate, RoundingConvention};
pub use temporal::{BillingPeriod, TemporalError, MIN_BILLING_YEAR};
pub use identifiers::{InvoiceId, TaxpayerId};
pub use ports::{PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth};
pub use error::CoreError;
