//! Shared HTTP utilities for gateway implementations.

use http::StatusCode;
use serde::de::DeserializeOwned;

use crate::github::error::GitHubError;

use super::error_mapping::map_http_error;

/// Pulls the `message` field out of a GitHub error body, if present.
pub(super) fn extract_github_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
}

/// Decodes a raw response body, insisting on one exact status.
///
/// # Errors
///
/// Returns the mapped HTTP error when `status` differs from `expected`, or
/// `GitHubError::Api` when the body cannot be decoded.
pub(super) fn decode_exact_status<T: DeserializeOwned>(
    operation: &str,
    expected: StatusCode,
    status: StatusCode,
    body: &str,
) -> Result<T, GitHubError> {
    if status != expected {
        return Err(map_http_error(operation, status, extract_github_message(body)));
    }

    serde_json::from_str(body).map_err(|error| GitHubError::Api {
        message: format!("{operation} response deserialisation failed: {error}"),
    })
}
