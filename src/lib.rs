//! Backoffice API library
//!
//! Administrative back-office functionality for HR, inventory, and sales
//! operations, exposed as HTTP CRUD resources over a relational schema.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod auth;
pub mod config;
pub mod db;
pub mod documents;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod mailer;
pub mod openapi;
pub mod services;
pub mod storage;
pub mod workflow;

use std::sync::Arc;

use axum::{extract::FromRef, extract::State, response::Json, routing::get, Router};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use serde_json::{json, Value};
use utoipa::ToSchema;

use crate::auth::AuthService;
use crate::handlers::AppServices;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub event_sender: events::EventSender,
    pub services: AppServices,
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(state: &AppState) -> Self {
        state.services.auth.clone()
    }
}

/// Standard response wrapper.
#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            errors: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
            errors: None,
        }
    }
}

/// Standard API result type for JSON responses
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, errors::ServiceError>;

/// Assembles every resource router. Layers and state are applied by the
/// binary.
pub fn app_router() -> Router<AppState> {
    let hr = Router::new()
        .merge(handlers::staff::routes())
        .merge(handlers::attendance::routes())
        .merge(handlers::leave::routes())
        .merge(handlers::loans::routes())
        .merge(handlers::overtime::routes())
        .merge(handlers::fines::routes())
        .merge(handlers::appraisals::routes());

    let inventory = Router::new()
        .merge(handlers::catalog::routes())
        .merge(handlers::stock::routes())
        .merge(handlers::removals::routes());

    let sales = Router::new()
        .merge(handlers::contacts::routes())
        .merge(handlers::inquiries::routes())
        .merge(handlers::quotes::routes())
        .merge(handlers::outgoing_mail::routes())
        .merge(handlers::sales_orders::routes())
        .merge(handlers::job_cards::routes())
        .merge(handlers::auth::user_routes());

    Router::new()
        .route("/status", get(api_status))
        .route("/health", get(health_check))
        .nest("/api/auth", handlers::auth::routes())
        .nest("/api/hr", hr)
        .nest("/api/inventory", inventory)
        .nest("/api/sales", sales)
}

async fn api_status() -> Json<ApiResponse<Value>> {
    let status_data = json!({
        "status": "ok",
        "service": "backoffice-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });
    Json(ApiResponse::success(status_data))
}

async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Value>>, errors::ServiceError> {
    let db_status = match state.db.ping().await {
        Ok(_) => "healthy",
        Err(_) => "unhealthy",
    };
    let health_data = json!({
        "status": db_status,
        "checks": { "database": db_status },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });
    Ok(Json(ApiResponse::success(health_data)))
}
