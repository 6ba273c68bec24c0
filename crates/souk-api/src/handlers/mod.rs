//! API route handlers
//!
//! Thin protocol adapters: each handler converts a REST request into an
//! engine or store call and maps the outcome back to HTTP.

use axum::Json;
use serde::Serialize;

pub mod admin;
pub mod auth;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Liveness probe; no dependencies are consulted
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "souk-id",
        version: env!("CARGO_PKG_VERSION"),
    })
}
