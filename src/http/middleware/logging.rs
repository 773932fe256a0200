//! Request logging middleware.

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::Request,
    middleware::Next,
    response::Response,
};

/// Log a one-line summary of each incoming request.
pub async fn log_request(req: Request<Body>, next: Next) -> Response {
    let remote_addr = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    tracing::info!(
        method = %req.method(),
        path = %req.uri().path(),
        remote_addr = %remote_addr,
        "Request received"
    );

    next.run(req).await
}
