use std::time::Instant;

use axum::{
    body::{Body, HttpBody, to_bytes},
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::{error, info};

/// Error bodies above this size are passed through without being logged.
const MAX_LOGGED_BODY: usize = 64 * 1024;

/// One line per request: method, path, status and latency. Server errors
/// additionally get their body logged.
pub async fn log_requests(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    if !status.is_server_error() {
        info!(%method, %path, status = status.as_u16(), elapsed_ms, "Served request");
        return response;
    }

    let loggable = response
        .body()
        .size_hint()
        .upper()
        .is_some_and(|len| len <= MAX_LOGGED_BODY as u64);
    if !loggable {
        error!(%method, %path, status = status.as_u16(), elapsed_ms, "Server error while serving request");
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, MAX_LOGGED_BODY).await {
        Ok(b) => b,
        Err(e) => {
            error!("Failed to read error response body: {}", e);
            return Response::from_parts(parts, Body::empty());
        }
    };
    error!(
        %method,
        %path,
        status = status.as_u16(),
        elapsed_ms,
        body = %String::from_utf8_lossy(&bytes),
        "Server error while serving request"
    );

    parts.headers.remove(axum::http::header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(bytes))
}
