//! # External Services
//!
//! HTTP clients for the services behind the weather, stock and translate responders.

pub mod alphavantage;
pub mod google_translate;
pub mod openweather;

use anyhow::{Result, anyhow};
use reqwest::{Client, Response};

/// HTTP client reused across requests
pub(crate) fn http_client() -> &'static Client {
    use std::sync::OnceLock;
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_default()
    })
}

/// Turns a non-success response into an error, preferring the service's own message.
pub(crate) async fn ensure_success(service: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unable to read error response".to_string());

    Err(anyhow!(
        "{}: {}",
        service,
        service_message(&error_text).unwrap_or_else(|| format!("HTTP {}: {}", status, error_text))
    ))
}

/// Extracts `message` or `error.message` from a JSON error body.
fn service_message(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    json.get("error")
        .and_then(|e| e.get("message"))
        .or_else(|| json.get("message"))
        .and_then(|m| m.as_str())
        .map(str::to_string)
}
