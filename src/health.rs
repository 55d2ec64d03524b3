//! `GET /health` liveness endpoint.
//!
//! Always answers 200 with the configured backend address. The backend
//! itself is never contacted.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::server::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// Backend target as `host:port`.
    pub xcms: String,
}

pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        xcms: state.forwarder.backend().to_string(),
    })
}
