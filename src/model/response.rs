/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Incoming response stage
//!
//! Classifies the outcome of a transmission. Successes pass through untouched;
//! failures are logged, trigger their side effects (session invalidation on
//! 401, the unreachable message when nothing came back) and are returned for
//! propagation. This stage never recovers an error.

use crate::constants::{AUTH_TOKEN_KEY, LOGIN_PATH, UNREACHABLE_MESSAGE};
use crate::error::{AppError, ErrorResponse};
use crate::model::error_state::ErrorState;
use crate::model::request::PreparedRequest;
use crate::session::navigation::Navigator;
use crate::session::store::SessionStore;
use reqwest::header::HeaderMap;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// A successful response with its body decoded
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// Status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Decoded body (`Null` when empty)
    pub body: Value,
}

impl ApiResponse {
    /// Deserializes the body into `T`
    pub fn json<T: DeserializeOwned>(self) -> Result<T, AppError> {
        serde_json::from_value(self.body).map_err(|e| AppError::Deserialization(e.to_string()))
    }
}

/// Decodes a body as JSON, keeping non-JSON text as a JSON string
pub fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Applies the incoming policy to every call
pub struct ResponsePolicy {
    session_store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    error_state: Arc<ErrorState>,
}

impl ResponsePolicy {
    /// Creates the policy over its collaborators
    pub fn new(
        session_store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
        error_state: Arc<ErrorState>,
    ) -> Self {
        Self {
            session_store,
            navigator,
            error_state,
        }
    }

    /// Classifies the outcome of transmitting `request`
    pub async fn evaluate(
        &self,
        request: &PreparedRequest,
        outcome: Result<Response, reqwest::Error>,
    ) -> Result<ApiResponse, AppError> {
        let response = match outcome {
            Ok(response) => response,
            Err(e) => return Err(self.on_failure(&request.id, AppError::from(e)).await),
        };

        let status = response.status();
        let headers = response.headers().clone();
        let text = response.text().await;

        if status.is_success() {
            let body = match text {
                Ok(text) => parse_body(&text),
                Err(e) => return Err(self.on_failure(&request.id, AppError::from(e)).await),
            };
            return Ok(self.on_success(
                &request.id,
                ApiResponse {
                    status,
                    headers,
                    body,
                },
            ));
        }

        // The status alone decides the failure kind; an unreadable body is null.
        let body = match text {
            Ok(text) => parse_body(&text),
            Err(e) => {
                warn!("[{}] Could not read error body: {}", request.id, e);
                Value::Null
            }
        };
        let failed = Box::new(ErrorResponse::new(status, body, request.summary()));
        let error = if status == StatusCode::UNAUTHORIZED {
            AppError::Unauthorized(failed)
        } else {
            AppError::Http(failed)
        };
        Err(self.on_failure(&request.id, error).await)
    }

    /// Logs a successful response and passes it through
    pub fn on_success(&self, id: &str, response: ApiResponse) -> ApiResponse {
        debug!(
            "[{}] Response: status={} body={}",
            id, response.status, response.body
        );
        response
    }

    /// Logs a failure, applies its side effects and hands it back
    pub async fn on_failure(&self, id: &str, error: AppError) -> AppError {
        match error.response() {
            Some(response) => error!(
                "[{}] Response error: status={} status_text={} body={} request={} {} headers={:?}",
                id,
                response.status.as_u16(),
                response.status_text,
                response.body,
                response.request.method,
                response.request.path,
                response.request.headers
            ),
            None => error!("[{}] Response error: {}", id, error),
        }

        if error.is_unauthorized() {
            self.invalidate_session().await;
        } else if error.is_network() {
            self.error_state.show(UNREACHABLE_MESSAGE).await;
        }
        error
    }

    async fn invalidate_session(&self) {
        if let Err(e) = self.session_store.remove(AUTH_TOKEN_KEY).await {
            error!("Failed to clear session token: {}", e);
        }
        self.navigator.redirect(LOGIN_PATH).await;
    }
}
