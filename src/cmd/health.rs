//! `xcms-bridge health` — check the health of a running instance.
//!
//! Sends a `GET /health` request to the specified URL and displays
//! the response as formatted text or raw JSON.

use http_body_util::BodyExt;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

use crate::cli::HealthArgs;
use crate::error::BridgeError;
use crate::health::HealthResponse;

pub async fn execute(args: HealthArgs) -> Result<(), BridgeError> {
    let url = format!("{}/health", args.url.trim_end_matches('/'));
    let uri: hyper::Uri = url
        .parse()
        .map_err(|e: hyper::http::uri::InvalidUri| BridgeError::UriParse {
            source: Box::new(e),
        })?;

    let connector = hyper_util::client::legacy::connect::HttpConnector::new();
    let client = Client::builder(TokioExecutor::new()).build(connector);

    let req = hyper::Request::builder()
        .uri(uri)
        .body(http_body_util::Full::new(bytes::Bytes::new()))
        .map_err(|e| BridgeError::HttpRequest {
            source: Box::new(e),
        })?;

    let response = tokio::time::timeout(std::time::Duration::from_secs(10), client.request(req))
        .await
        .map_err(|_| BridgeError::HttpRequest {
            source: "health check timed out after 10s".into(),
        })?
        .map_err(|e| BridgeError::HttpRequest {
            source: Box::new(e),
        })?;

    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .map_err(|e| BridgeError::HttpRequest {
            source: Box::new(e),
        })?
        .to_bytes();

    if !status.is_success() {
        return Err(BridgeError::HealthCheckFailed(status));
    }

    if args.json {
        println!("{}", String::from_utf8_lossy(&body));
        return Ok(());
    }

    match serde_json::from_slice::<HealthResponse>(&body) {
        Ok(health) => println!("{}", format_health(&args.url, &health)),
        Err(e) => {
            eprintln!("Failed to parse health response: {e}");
            println!("{}", String::from_utf8_lossy(&body));
        }
    }

    Ok(())
}

fn format_health(url: &str, health: &HealthResponse) -> String {
    format!(
        "\u{2713} xcms-bridge is {} ({url})\n  backend: {}",
        health.status, health.xcms
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_status_and_backend() {
        let health = HealthResponse {
            status: "healthy".into(),
            xcms: "localhost:9001".into(),
        };
        assert_eq!(
            format_health("http://localhost:5000", &health),
            "\u{2713} xcms-bridge is healthy (http://localhost:5000)\n  backend: localhost:9001"
        );
    }
}
