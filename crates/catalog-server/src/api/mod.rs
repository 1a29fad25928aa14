//! HTTP surface of the catalog.
//!
//! - `GET /`: service banner
//! - `GET /health`: liveness
//! - `GET /docs`: route index
//! - `GET /api/v1/products`: paginated, searchable summaries
//! - `GET /api/v1/products/{id}`: full product record
//! - `GET /api/v1/products/{id}/related`: same-seller-first recommendations
//! - `GET /api/v1/payment-methods`: payment-method catalog

mod payment_methods;
mod product_id;
mod products;
mod query;

use anyhow::Context;
use axum::{
    extract::OriginalUri,
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use catalog_core::DatasetError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::catalog::CatalogSource;
use crate::middleware::{json_charset, panic_response, render_panics, request_id, request_path};

pub(crate) use query::FieldViolation;

pub const SERVICE_NAME: &str = "catalog-api";

#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogSource,
}

/// Error body shared by every failing route.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub detail: String,
    pub status_code: u16,
    pub timestamp: DateTime<Utc>,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<Vec<FieldViolation>>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    fn with_status(status: StatusCode, path: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: format!("HTTP {}", status.as_u16()),
                detail: detail.into(),
                status_code: status.as_u16(),
                timestamp: Utc::now(),
                path: path.into(),
                validation_errors: None,
            },
        }
    }

    pub fn not_found(path: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::with_status(StatusCode::NOT_FOUND, path, detail)
    }

    pub fn product_not_found(path: impl Into<String>, product_id: &str) -> Self {
        Self::not_found(path, format!("product with id {product_id} not found"))
    }

    pub fn validation(path: impl Into<String>, violations: Vec<FieldViolation>) -> Self {
        let mut err = Self::with_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            path,
            "the request parameters are not valid",
        );
        err.body.error = "Validation Error".to_string();
        err.body.validation_errors = Some(violations);
        err
    }

    /// Generic 500 for faults that carry nothing worth showing the client.
    pub fn internal(path: impl Into<String>) -> Self {
        let mut err = Self::with_status(
            StatusCode::INTERNAL_SERVER_ERROR,
            path,
            "an internal server error occurred",
        );
        err.body.error = "Internal Server Error".to_string();
        err
    }

    pub fn dataset(path: impl Into<String>, error: &DatasetError) -> Self {
        tracing::error!(error = %error, "failed to load product data");
        let detail = match error {
            DatasetError::MissingFile { .. } => "product data file not found",
            DatasetError::Io { .. } => "product data file could not be read",
            DatasetError::Malformed(_) | DatasetError::InvalidProduct { .. } => {
                "product data could not be decoded"
            }
        };
        Self::with_status(StatusCode::INTERNAL_SERVER_ERROR, path, detail)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// CORS for the configured origins; `"*"` allows any origin without
/// credentials.
pub fn build_cors(origins: &[String]) -> anyhow::Result<CorsLayer> {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-request-id"),
        ]);

    if origins.iter().any(|o| o == "*") {
        return Ok(base.allow_origin(AllowOrigin::any()));
    }

    let origins = origins
        .iter()
        .map(|o| HeaderValue::from_str(o).with_context(|| format!("invalid CORS origin '{o}'")))
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(base
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true))
}

pub fn build_app(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/docs", get(docs))
        .route("/api/v1/products", get(products::list_products))
        .route("/api/v1/products/{id}", get(products::get_product))
        .route(
            "/api/v1/products/{id}/related",
            get(products::list_related_products),
        )
        .route(
            "/api/v1/payment-methods",
            get(payment_methods::get_payment_methods),
        )
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(
            ServiceBuilder::new()
                .layer(cors)
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn(json_charset))
                .layer(axum::middleware::from_fn(render_panics))
                .layer(CatchPanicLayer::custom(panic_response)),
        )
        .with_state(state)
}

async fn root() -> impl IntoResponse {
    Json(json!({
        "message": "Product Catalog API",
        "docs": "/docs",
        "health": "/health",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
    }))
}

async fn docs() -> impl IntoResponse {
    Json(json!({
        "title": "Product Catalog API",
        "version": env!("CARGO_PKG_VERSION"),
        "routes": [
            { "method": "GET", "path": "/api/v1/products", "query": ["limit (1-100, default 20; 0 is rejected)", "offset (>= 0, default 0)", "search"] },
            { "method": "GET", "path": "/api/v1/products/{id}" },
            { "method": "GET", "path": "/api/v1/products/{id}/related", "query": ["limit (1-25, default 15; 0 is rejected)"] },
            { "method": "GET", "path": "/api/v1/payment-methods" },
            { "method": "GET", "path": "/health" },
        ],
    }))
}

async fn route_not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    tracing::debug!(path = %uri, "no route matched");
    ApiError::not_found(request_path(&uri), "Not Found")
}

async fn method_not_allowed(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::with_status(
        StatusCode::METHOD_NOT_ALLOWED,
        request_path(&uri),
        "Method Not Allowed",
    )
}
