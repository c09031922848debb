//! Consumption handlers

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use core_kernel::TaxpayerId;
use domain_billing::{InvoiceKey, Reading};

use crate::dto::consumption::*;
use crate::{error::ApiError, extract::ApiJson, AppState};

/// Path segments addressing one invoice
type KeyPath = Path<(String, i32, i32)>;

fn key_from_path((identifier, month, year): (String, i32, i32)) -> Result<InvoiceKey, ApiError> {
    Ok(InvoiceKey::new(TaxpayerId::parse(identifier)?, month, year))
}

/// Registers a reading and returns its invoice
pub async fn create_consumption(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateConsumptionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;
    let reading = Reading::try_from(request)?;

    let invoice = state.ledger.create(reading).await?;
    let location = format!("/api/v1/consumption/{}", invoice.key().to_path());

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(InvoiceResponse::from(&invoice)),
    ))
}

/// Lists every stored invoice
pub async fn list_consumption(
    State(state): State<AppState>,
) -> Result<Json<Vec<InvoiceResponse>>, ApiError> {
    let invoices = state.ledger.list_all().await?;
    Ok(Json(invoices.iter().map(InvoiceResponse::from).collect()))
}

/// Gets the invoice for a taxpayer and month
pub async fn get_consumption(
    State(state): State<AppState>,
    Path(segments): KeyPath,
) -> Result<Json<InvoiceResponse>, ApiError> {
    let key = key_from_path(segments)?;
    let invoice = state.ledger.find_by_key(&key).await?;
    Ok(Json(InvoiceResponse::from(&invoice)))
}

/// Deletes the invoice for a taxpayer and month
pub async fn delete_consumption(
    State(state): State<AppState>,
    Path(segments): KeyPath,
) -> Result<Json<MessageResponse>, ApiError> {
    let key = key_from_path(segments)?;
    state.ledger.delete_by_key(&key).await?;
    Ok(Json(MessageResponse {
        message: "Consumption record removed successfully.".to_string(),
    }))
}

/// Sum of every invoice total, rounded to cents
pub async fn total_general(
    State(state): State<AppState>,
) -> Result<Json<TotalGeneralResponse>, ApiError> {
    let total = state.ledger.total_general().await?;
    Ok(Json(TotalGeneralResponse {
        total_general: total.amount(),
    }))
}
