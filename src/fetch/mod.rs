mod client;
mod basic;

pub use client::HttpClient;
pub use basic::BasicClient;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderValue};
use reqwest::{Method, StatusCode, Url};
use serde::Serialize;
use serde_json::Value;

/// Failure of a single backend round trip.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend returned status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unexpected response: expected {0}")]
    UnexpectedShape(&'static str),
}

pub async fn get_json<C: HttpClient>(client: &C, url: &str) -> Result<Value, FetchError> {
    send_json(client, Method::GET, url, None).await
}

pub async fn post_json<C: HttpClient, B: Serialize>(
    client: &C,
    url: &str,
    body: &B,
) -> Result<Value, FetchError> {
    let payload = serde_json::to_vec(body)?;
    send_json(client, Method::POST, url, Some(payload)).await
}

/// Sends one request and decodes the reply as JSON.
///
/// Any non-2xx status is an error; its body is kept for the log.
async fn send_json<C: HttpClient>(
    client: &C,
    method: Method,
    url: &str,
    body: Option<Vec<u8>>,
) -> Result<Value, FetchError> {
    let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let mut req = reqwest::Request::new(method, parsed);
    req.headers_mut()
        .insert(ACCEPT, HeaderValue::from_static("application/json"));
    if let Some(body) = body {
        req.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        *req.body_mut() = Some(body.into());
    }

    let resp = client.execute(req).await?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(FetchError::Status { status, body });
    }

    let text = resp.text().await?;
    Ok(serde_json::from_str(&text)?)
}
