//! HTTP API Layer
//!
//! This crate provides the REST API for water consumption billing using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for consumption records and health
//! - **Middleware**: Request ids, tracing and audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(ledger, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod handlers;
pub mod dto;

use axum::{
    Router,
    routing::get,
    middleware as axum_middleware,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

use domain_billing::ConsumptionLedger;

use crate::config::ApiConfig;
use crate::middleware::audit_middleware;
use crate::handlers::{consumption, health};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub ledger: ConsumptionLedger,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// Every response carries an `x-request-id` header, generated when the
/// caller did not send one.
pub fn create_router(ledger: ConsumptionLedger, config: ApiConfig) -> Router {
    let state = AppState { ledger, config };

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let consumption_routes = Router::new()
        .route(
            "/",
            get(consumption::list_consumption).post(consumption::create_consumption),
        )
        .route("/total", get(consumption::total_general))
        .route(
            "/:identifier/:month/:year",
            get(consumption::get_consumption).delete(consumption::delete_consumption),
        );

    let api_routes = Router::new()
        .nest("/consumption", consumption_routes)
        .layer(axum_middleware::from_fn(audit_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
