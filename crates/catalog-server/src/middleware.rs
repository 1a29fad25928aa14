use std::any::Any;

use axum::{
    extract::Request,
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::api::ApiError;

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Marker left on the response by [`panic_response`] so that
/// [`render_panics`] can replace it with a full error body.
#[derive(Debug, Clone, Copy)]
struct HandlerPanicked;

const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Path and query of a request, as reported in error bodies.
pub fn request_path(uri: &Uri) -> String {
    uri.path_and_query()
        .map_or_else(|| uri.path().to_string(), ToString::to_string)
}

/// Axum middleware that extracts or generates a request ID.
///
/// If the incoming request has an `x-request-id` header, that value is used.
/// Otherwise a new `UUIDv4` is generated. The ID is:
/// - Inserted into request extensions as [`RequestId`]
/// - Set on the response as the `x-request-id` header
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Pins JSON responses to an explicit UTF-8 charset.
pub async fn json_charset(req: Request, next: Next) -> Response {
    let mut res = next.run(req).await;

    let bare_json = res
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json") && !v.contains("charset"));

    if bare_json {
        res.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8));
    }

    res
}

/// Panic handler for `tower_http::catch_panic::CatchPanicLayer`.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    tracing::error!(panic = message, "request handler panicked");

    let mut res = StatusCode::INTERNAL_SERVER_ERROR.into_response();
    res.extensions_mut().insert(HandlerPanicked);
    res
}

/// Must sit outside the panic-catching layer: it remembers the request path
/// and turns a caught panic into the standard 500 error body.
pub async fn render_panics(req: Request, next: Next) -> Response {
    let path = request_path(req.uri());
    let res = next.run(req).await;

    if res.extensions().get::<HandlerPanicked>().is_some() {
        return ApiError::internal(path).into_response();
    }

    res
}
