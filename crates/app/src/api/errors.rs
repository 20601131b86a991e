//! Orders API errors.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::api::records::RecordError;

/// Errors returned by the orders API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network, timeout or TLS failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The referenced resource does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server refused the request as invalid.
    #[error("request rejected with status {status}")]
    Rejected {
        /// HTTP status code
        status: u16,

        /// Message extracted from the error body, if any.
        message: Option<String>,
    },

    /// Any other non-success response, including authentication failures.
    #[error("unexpected response with status {status}: {body}")]
    UnexpectedResponse {
        /// HTTP status code
        status: u16,

        /// Raw response body
        body: String,
    },

    /// The body is not the JSON shape the endpoint promises.
    #[error("malformed response body: {0}")]
    Json(#[source] serde_json::Error),

    /// The body parsed but holds values the client cannot accept.
    #[error("invalid response data: {0}")]
    InvalidRecord(#[from] RecordError),
}

impl ApiError {
    /// Classify a non-success response.
    pub(crate) fn from_response(status: StatusCode, body: &[u8]) -> Self {
        if status == StatusCode::NOT_FOUND {
            return Self::NotFound;
        }

        let auth_failure = status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN;

        if status.is_client_error() && !auth_failure {
            return Self::Rejected {
                status: status.as_u16(),
                message: rejection_message(body),
            };
        }

        Self::UnexpectedResponse {
            status: status.as_u16(),
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }
}

/// Extract a human-readable message from a REST framework error body.
///
/// Looks at `detail`, then the first `non_field_errors` entry, then the first
/// field error (rendered as `field: message`).
pub(crate) fn rejection_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;

    match value {
        Value::Object(map) => {
            if let Some(detail) = map.get("detail").and_then(first_message) {
                return Some(detail);
            }

            if let Some(message) = map.get("non_field_errors").and_then(first_message) {
                return Some(message);
            }

            map.iter().find_map(|(field, errors)| {
                first_message(errors).map(|message| format!("{field}: {message}"))
            })
        }
        other => first_message(&other),
    }
}

fn first_message(value: &Value) -> Option<String> {
    match value {
        Value::String(message) if !message.trim().is_empty() => Some(message.clone()),
        Value::Array(messages) => messages.iter().find_map(first_message),
        _ => None,
    }
}
