//! Consumption DTOs
//!
//! Monetary amounts and volumes travel as JSON numbers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use core_kernel::TaxpayerId;
use domain_billing::{Invoice, Reading};

use crate::error::ApiError;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateConsumptionRequest {
    #[validate(length(min = 1, message = "Identifier must not be empty"))]
    pub identifier: String,
    pub month: i32,
    pub year: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub volume_consumed: Decimal,
    /// Absent means no flag (green)
    #[serde(default)]
    pub tariff_flag: Option<String>,
    #[serde(default)]
    pub has_sewage_service: bool,
}

impl TryFrom<CreateConsumptionRequest> for Reading {
    type Error = ApiError;

    fn try_from(request: CreateConsumptionRequest) -> Result<Self, Self::Error> {
        let identifier = TaxpayerId::parse(request.identifier)?;
        let reading = Reading::new(identifier, request.month, request.year, request.volume_consumed)
            .with_sewage(request.has_sewage_service);

        Ok(match request.tariff_flag {
            Some(flag) => reading.with_flag(flag),
            None => reading,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceResponse {
    pub id: Uuid,
    pub identifier: String,
    pub month: i32,
    pub year: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub volume_consumed: Decimal,
    pub tariff_flag: String,
    pub has_sewage_service: bool,
    #[serde(with = "rust_decimal::serde::float")]
    pub billable_volume: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tariff_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub water_charge: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub flag_surcharge: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub sewage_fee: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<&Invoice> for InvoiceResponse {
    fn from(invoice: &Invoice) -> Self {
        Self {
            id: *invoice.id().as_uuid(),
            identifier: invoice.identifier().to_string(),
            month: invoice.month(),
            year: invoice.year(),
            volume_consumed: invoice.volume_consumed(),
            tariff_flag: invoice.tariff_flag().to_string(),
            has_sewage_service: invoice.has_sewage_service(),
            billable_volume: invoice.billable_volume(),
            tariff_rate: invoice.tariff_rate().amount(),
            water_charge: invoice.water_charge().amount(),
            flag_surcharge: invoice.flag_surcharge().amount(),
            sewage_fee: invoice.sewage_fee().amount(),
            total: invoice.total().amount(),
            created_at: invoice.created_at(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalGeneralResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_general: Decimal,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
