//! HTTP utilities for GitHub REST API calls

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use thiserror::Error;

/// Media type GitHub expects on every REST request.
const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// REST API version header pinned by this client.
const GITHUB_API_VERSION: &str = "2022-11-28";

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Error returned by the HTTP layer.
///
/// Non-success statuses are kept structured so callers can distinguish a
/// missing remote object from any other failure.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("failed to send request: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("GitHub API request failed: {status} {message}")]
    Status { status: StatusCode, message: String },
    #[error("failed to parse response JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl HttpError {
    /// True when the remote object does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, HttpError::Status { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

/// Check an `anyhow` chain for a not-found HTTP error.
pub fn error_is_not_found(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<HttpError>()
            .map(HttpError::is_not_found)
            .unwrap_or(false)
    })
}

/// Sanitize response body for logging
/// Truncates long responses and strips non-printable characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        format!(
            "{}... [truncated, {} bytes total]",
            &body[..MAX_LOG_BODY_LENGTH],
            body.len()
        )
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Extract the GitHub `message` field from an error body, if present.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or_else(|| sanitize_for_log(body))
}

/// HTTP client wrapper for GitHub API calls
#[derive(Clone)]
pub struct GithubHttpClient {
    client: Client,
}

impl GithubHttpClient {
    /// Create a new HTTP client with GitHub default headers
    pub fn new() -> Result<Self, HttpError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );

        let client = Client::builder()
            .user_agent(concat!("octoform/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }

    /// Make a GET request to a GitHub API
    pub async fn get(&self, url: &str, token: &str) -> Result<Value, HttpError> {
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).bearer_auth(token).send().await?;
        Self::decode_response(response).await
    }

    /// Make a POST request to a GitHub API
    pub async fn post(&self, url: &str, token: &str, body: Option<&Value>) -> Result<Value, HttpError> {
        tracing::debug!("POST {}", url);

        let mut request = self.client.post(url).bearer_auth(token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        Self::decode_response(response).await
    }

    /// Make a PUT request to a GitHub API
    pub async fn put(&self, url: &str, token: &str, body: Option<&Value>) -> Result<Value, HttpError> {
        tracing::debug!("PUT {}", url);

        let mut request = self.client.put(url).bearer_auth(token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        Self::decode_response(response).await
    }

    /// Make a DELETE request to a GitHub API
    pub async fn delete(&self, url: &str, token: &str) -> Result<Value, HttpError> {
        tracing::debug!("DELETE {}", url);

        let response = self.client.delete(url).bearer_auth(token).send().await?;
        Self::decode_response(response).await
    }

    async fn decode_response(response: Response) -> Result<Value, HttpError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
            return Err(HttpError::Status {
                status,
                message: extract_error_message(&body),
            });
        }

        // Empty success bodies (204 on secret writes and deletes)
        if body.is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&body)?)
    }
}
