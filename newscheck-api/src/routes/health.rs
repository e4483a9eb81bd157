//! Health check endpoint

use std::collections::BTreeMap;

use axum::{extract::State, response::Json, routing::get, Router};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    /// Which upstream credentials are present
    upstreams: BTreeMap<&'static str, bool>,
}

/// Liveness plus configured upstreams. Missing credentials only degrade
/// results, so the service reports "ok" regardless.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        upstreams: state.upstreams.iter().copied().collect(),
    })
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
