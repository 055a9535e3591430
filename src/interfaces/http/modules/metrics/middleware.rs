//! Per-request metrics recording.
//!
//! Every request through the router contributes to two series:
//! `http_requests_total{method, path, status}` and
//! `http_request_duration_seconds{method, path}`.

use std::time::{Duration, Instant};

use axum::{body::Body, extract::MatchedPath, http::Request, middleware::Next, response::Response};

pub async fn http_metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().to_string();
    let path = route_label(&request);

    let started = Instant::now();
    let response = next.run(request).await;

    record_request(method, path, response.status().as_u16(), started.elapsed());
    response
}

/// Label requests by route template when one matched, falling back to
/// the raw path. Templates keep label cardinality bounded.
fn route_label(request: &Request<Body>) -> String {
    match request.extensions().get::<MatchedPath>() {
        Some(matched) => matched.as_str().to_string(),
        None => request.uri().path().to_string(),
    }
}

fn record_request(method: String, path: String, status: u16, elapsed: Duration) {
    metrics::counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("http_request_duration_seconds", "method" => method, "path" => path)
        .record(elapsed.as_secs_f64());
}
