//! Material routes and the assembled application router.

use crate::handlers::material::{create, list, read, routes_info, update};
use crate::response::ErrorBody;
use crate::state::AppState;
use axum::{
    http::{header, StatusCode},
    middleware::map_response,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

const BODY_LIMIT_BYTES: usize = 1024 * 1024;

pub fn material_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes_info))
        .route("/materials", get(list).post(create).put(update))
        .route("/materials/:id", get(read))
        .with_state(state)
}

async fn fallback() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorBody::new("not_found", "no such route")))
}

/// Rewrites the plain-text responses produced by middleware and by axum's
/// method router into the JSON error envelope.
async fn json_error_envelope(res: Response) -> Response {
    let is_json = res
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    if is_json {
        return res;
    }
    let code = match res.status() {
        StatusCode::REQUEST_TIMEOUT => "request_timeout",
        StatusCode::PAYLOAD_TOO_LARGE => "payload_too_large",
        StatusCode::METHOD_NOT_ALLOWED => "method_not_allowed",
        _ => return res,
    };
    let status = res.status();
    let message = status.canonical_reason().unwrap_or("error").to_lowercase();
    (status, Json(ErrorBody::new(code, message))).into_response()
}

/// Full router with middleware: common routes, material routes, JSON 404 fallback.
/// The timeout wraps the routes directly; the body limit sits outside it.
pub fn app(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .merge(super::common_routes())
        .merge(material_routes(state))
        .fallback(fallback)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .layer(map_response(json_error_envelope))
}
