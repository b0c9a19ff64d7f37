use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::info;

/// Logs how long the binding layer spent on every request.
pub async fn log_latency(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let resp = next.run(req).await;

    info!(
        latency_ms = start.elapsed().as_millis() as u64,
        method = %method,
        uri = %uri,
        status = resp.status().as_u16(),
        "binding layer latency"
    );
    resp
}
