//! The forwarder: one inbound request, one outbound call.
//!
//! [`Forwarder::forward`] maps a [`ProxiedRequest`] onto the fixed
//! [`BackendTarget`], issues the call under a single timeout covering
//! connect, headers and body, and classifies the answer as JSON or text.
//! Failures are returned as [`ForwardError`]; nothing is retried.

use std::time::Duration;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use serde_json::Value;

use crate::config::model::BackendTarget;
use crate::error::ForwardError;

pub type HttpClient = Client<HttpConnector, Full<Bytes>>;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Plain-HTTP client with idle pooling disabled: every call opens a fresh
/// connection to the backend.
#[must_use]
pub fn build_http_client() -> HttpClient {
    let mut connector = HttpConnector::new();
    connector.enforce_http(true);
    Client::builder(TokioExecutor::new())
        .pool_max_idle_per_host(0)
        .build(connector)
}

#[derive(Debug, Clone)]
pub struct ProxiedRequest {
    pub method: Method,
    /// Sub-path below the proxy prefix, without a leading slash.
    pub path: String,
    pub query: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

#[derive(Debug, Clone)]
pub struct ProxiedResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: ResponseBody,
}

impl IntoResponse for ProxiedResponse {
    fn into_response(self) -> Response {
        match self.body {
            ResponseBody::Json(value) => (self.status, Json(value)).into_response(),
            ResponseBody::Text(text) => {
                let content_type = self
                    .content_type
                    .unwrap_or_else(|| HeaderValue::from_static(TEXT_PLAIN));
                (self.status, [(CONTENT_TYPE, content_type)], text).into_response()
            }
        }
    }
}

/// True when the media type (ignoring parameters such as `charset`) is
/// `application/json`.
#[must_use]
pub fn is_json_content_type(value: Option<&HeaderValue>) -> bool {
    value
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|media| media.trim().eq_ignore_ascii_case("application/json"))
}

#[derive(Debug, Clone)]
pub struct Forwarder {
    client: HttpClient,
    backend: BackendTarget,
    timeout_ms: u64,
}

impl Forwarder {
    #[must_use]
    pub fn new(backend: BackendTarget, timeout_ms: u64) -> Self {
        Self {
            client: build_http_client(),
            backend,
            timeout_ms,
        }
    }

    #[must_use]
    pub const fn backend(&self) -> &BackendTarget {
        &self.backend
    }

    pub async fn forward(&self, request: ProxiedRequest) -> Result<ProxiedResponse, ForwardError> {
        let url = self
            .backend
            .url_for(&request.path, request.query.as_deref());

        let mut builder = hyper::Request::builder()
            .method(request.method)
            .uri(url.as_str());

        let body = match request.body {
            Some(value) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Bytes::from(value.to_string())
            }
            None => Bytes::new(),
        };

        let outbound = builder.body(Full::new(body)).map_err(ForwardError::Request)?;

        let exchange = async {
            let response = self
                .client
                .request(outbound)
                .await
                .map_err(ForwardError::Connect)?;
            let status = response.status();
            let content_type = response.headers().get(CONTENT_TYPE).cloned();
            let bytes = response
                .into_body()
                .collect()
                .await
                .map_err(ForwardError::Body)?
                .to_bytes();
            Ok::<_, ForwardError>((status, content_type, bytes))
        };

        let (status, content_type, bytes) =
            tokio::time::timeout(Duration::from_millis(self.timeout_ms), exchange)
                .await
                .map_err(|_| ForwardError::Timeout(self.timeout_ms))??;

        tracing::debug!(
            url = %url,
            status = status.as_u16(),
            bytes = bytes.len(),
            "backend responded"
        );

        let body = if is_json_content_type(content_type.as_ref()) {
            ResponseBody::Json(serde_json::from_slice(&bytes).map_err(ForwardError::InvalidJson)?)
        } else {
            ResponseBody::Text(String::from_utf8_lossy(&bytes).into_owned())
        };

        Ok(ProxiedResponse {
            status,
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_media_type_detection() {
        let json = HeaderValue::from_static("application/json");
        let json_charset = HeaderValue::from_static("Application/JSON; charset=utf-8");
        let html = HeaderValue::from_static("text/html; charset=utf-8");
        let problem = HeaderValue::from_static("application/problem+json");

        assert!(is_json_content_type(Some(&json)));
        assert!(is_json_content_type(Some(&json_charset)));
        assert!(!is_json_content_type(Some(&html)));
        assert!(!is_json_content_type(Some(&problem)));
        assert!(!is_json_content_type(None));
    }

    #[tokio::test]
    async fn text_response_defaults_to_text_plain() {
        let response = ProxiedResponse {
            status: StatusCode::NOT_FOUND,
            content_type: None,
            body: ResponseBody::Text("missing".into()),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[CONTENT_TYPE], TEXT_PLAIN);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"missing");
    }

    #[tokio::test]
    async fn json_response_keeps_status() {
        let response = ProxiedResponse {
            status: StatusCode::CREATED,
            content_type: Some(HeaderValue::from_static("application/json")),
            body: ResponseBody::Json(serde_json::json!({"id": 7})),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_connect_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let forwarder = Forwarder::new(BackendTarget::new("127.0.0.1", port), 1000);
        let err = forwarder
            .forward(ProxiedRequest {
                method: Method::GET,
                path: "status".into(),
                query: None,
                body: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ForwardError::Connect(_)));
        assert!(!err.to_string().is_empty());
    }
}
