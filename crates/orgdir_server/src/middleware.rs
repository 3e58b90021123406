//! Router middleware: API-key gate and request logging.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use log::{info, warn};
use std::time::Instant;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Rejects the request with 401 unless `X-API-Key` matches the configured
/// secret. Runs before any extractor of the matched handler.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    let header_present = provided.is_some();
    let authorized = provided.is_some_and(|key| state.api_key().matches(key));
    if !authorized {
        warn!(
            "event=auth_rejected module=http status=error method={} path={} header_present={header_present}",
            request.method(),
            request.uri().path()
        );
        return Err(ApiError::Unauthorized);
    }
    Ok(next.run(request).await)
}

pub async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;
    info!(
        "event=http_request module=http status=ok method={method} path={path} http_status={} duration_ms={}",
        response.status().as_u16(),
        started.elapsed().as_millis()
    );
    response
}
