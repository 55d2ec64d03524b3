//! The front door's forwarding handler.
//!
//! [`proxy_handler`] serves `GET|POST /api/xcms/{*path}`: it extracts the
//! raw sub-path and query, applies the POST body policy, and delegates to
//! the [`Forwarder`](forward::Forwarder). Any forwarding failure becomes
//! HTTP 500 with an [`ErrorBody`].

pub mod forward;

use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::ALLOW;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::server::AppState;
use forward::ProxiedRequest;

/// Path prefix under which requests are forwarded.
pub const PROXY_PREFIX: &str = "/api/xcms";

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[must_use]
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Sub-path below [`PROXY_PREFIX`], still percent-encoded.
#[must_use]
pub fn backend_path(uri: &Uri) -> &str {
    uri.path()
        .strip_prefix(PROXY_PREFIX)
        .map_or("", |rest| rest.trim_start_matches('/'))
}

/// Decode an inbound POST body.
///
/// Empty or whitespace-only bodies mean "no body"; anything else must be
/// valid JSON.
pub fn parse_json_body(body: &[u8]) -> Result<Option<Value>, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body).map(Some)
}

pub async fn proxy_handler(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    req_headers: HeaderMap,
    body: Bytes,
) -> Response {
    // axum routes HEAD to GET handlers; only GET and POST are forwarded.
    if method == Method::HEAD {
        return (StatusCode::METHOD_NOT_ALLOWED, [(ALLOW, "GET,POST")]).into_response();
    }

    let correlation_id = req_headers
        .get("x-correlation-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| uuid::Uuid::new_v4().to_string(), String::from);

    let path = backend_path(&uri).to_string();

    let json_body = if method == Method::POST {
        match parse_json_body(&body) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(
                    correlation_id = %correlation_id,
                    path = %path,
                    error = %e,
                    "rejected POST with invalid JSON body"
                );
                return error_response(StatusCode::BAD_REQUEST, format!("invalid JSON body: {e}"));
            }
        }
    } else {
        None
    };

    tracing::info!(
        correlation_id = %correlation_id,
        method = %method,
        path = %path,
        backend = %state.forwarder.backend(),
        "forwarding request"
    );

    let start = Instant::now();
    let request = ProxiedRequest {
        method,
        path,
        query: uri.query().map(String::from),
        body: json_body,
    };

    match state.forwarder.forward(request).await {
        Ok(response) => {
            tracing::info!(
                correlation_id = %correlation_id,
                status = response.status.as_u16(),
                latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
                "backend responded"
            );
            response.into_response()
        }
        Err(e) => {
            tracing::error!(
                correlation_id = %correlation_id,
                error = %e,
                latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
                "forwarding failed"
            );
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
