/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Error types shared by every layer of the client
//!
//! Failures are never swallowed: each one is logged, optionally surfaced on the
//! error state, and handed back to the caller as an [`AppError`].

use crate::constants::{ERROR_MESSAGE_FIELD, UNREACHABLE_MESSAGE};
use reqwest::StatusCode;
use serde_json::Value;
use std::fmt;

/// Diagnostic view of the request that produced a failed response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSummary {
    /// Path (or absolute URL) the caller asked for
    pub path: String,
    /// HTTP method
    pub method: String,
    /// Headers as sent, with credentials redacted
    pub headers: Vec<(String, String)>,
}

/// A response received from the service with a non-success status
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorResponse {
    /// Status code returned by the service
    pub status: StatusCode,
    /// Canonical reason phrase for the status
    pub status_text: String,
    /// Decoded response body (`Null` when empty)
    pub body: Value,
    /// Request that produced this response
    pub request: RequestSummary,
}

impl ErrorResponse {
    /// Creates an error response, deriving the status text from the status code
    pub fn new(status: StatusCode, body: Value, request: RequestSummary) -> Self {
        Self {
            status,
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
            request,
        }
    }

    /// Returns the human-readable message carried by the body, if any
    ///
    /// A string under the `error` field is taken verbatim. Other values count
    /// unless they are falsy (`null`, `false`, `0`, `""`) and are rendered as
    /// JSON.
    pub fn error_field(&self) -> Option<String> {
        match self.body.get(ERROR_MESSAGE_FIELD)? {
            Value::Null | Value::Bool(false) => None,
            Value::String(message) if message.is_empty() => None,
            Value::String(message) => Some(message.clone()),
            Value::Number(number) if number.as_f64() == Some(0.0) => None,
            other => Some(other.to_string()),
        }
    }
}

/// Main error type for the library
#[derive(Debug)]
pub enum AppError {
    /// The service could not be reached; no response was received
    Network(String),
    /// The service rejected the session (401)
    Unauthorized(Box<ErrorResponse>),
    /// Any other non-success response
    Http(Box<ErrorResponse>),
    /// The request could not be constructed
    RequestBuild(String),
    /// JSON encoding or decoding failed
    Json(serde_json::Error),
    /// Local I/O failed
    Io(std::io::Error),
    /// A successful response body did not have the expected shape
    Deserialization(String),
    /// Caller supplied an unusable value
    InvalidInput(String),
}

impl AppError {
    /// Returns the failed response, when one was received
    pub fn response(&self) -> Option<&ErrorResponse> {
        match self {
            AppError::Unauthorized(response) | AppError::Http(response) => Some(response),
            _ => None,
        }
    }

    /// Returns the status code of the failed response, when one was received
    pub fn status(&self) -> Option<StatusCode> {
        self.response().map(|response| response.status)
    }

    /// True when the service reported the session as no longer valid
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Unauthorized(_))
    }

    /// True when the call never reached the service
    pub fn is_network(&self) -> bool {
        matches!(self, AppError::Network(_))
    }

    /// Generic message describing the failure itself, `None` when there is none
    pub fn message(&self) -> Option<String> {
        match self {
            AppError::Network(_) => Some(UNREACHABLE_MESSAGE.to_string()),
            AppError::Unauthorized(response) | AppError::Http(response) => Some(format!(
                "request failed with status code {}",
                response.status.as_u16()
            )),
            AppError::RequestBuild(message)
            | AppError::Deserialization(message)
            | AppError::InvalidInput(message) => {
                Some(message.clone()).filter(|message| !message.is_empty())
            }
            AppError::Json(e) => Some(e.to_string()),
            AppError::Io(e) => Some(e.to_string()),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Network(e) => write!(f, "network error: {e}"),
            AppError::Unauthorized(_) => write!(f, "unauthorized"),
            AppError::Http(response) => write!(
                f,
                "request failed with status code {}",
                response.status.as_u16()
            ),
            AppError::RequestBuild(e) => write!(f, "request build error: {e}"),
            AppError::Json(e) => write!(f, "json error: {e}"),
            AppError::Io(e) => write!(f, "io error: {e}"),
            AppError::Deserialization(e) => write!(f, "deserialization error: {e}"),
            AppError::InvalidInput(e) => write!(f, "invalid input: {e}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Json(e) => Some(e),
            AppError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            AppError::RequestBuild(e.to_string())
        } else if e.is_decode() {
            AppError::Deserialization(e.to_string())
        } else {
            AppError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Json(e)
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e)
    }
}
