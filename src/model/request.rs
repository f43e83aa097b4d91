/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Outgoing request stage
//!
//! Turns a call (method, path, body, options) into a fully decorated request:
//! JSON defaults, caller overrides, the bearer token from the session store and
//! the anti-forgery token from the page. Nothing is sent from here.

use crate::constants::{BEARER_PREFIX, CSRF_HEADER, JSON_CONTENT_TYPE, REDACTED};
use crate::error::{AppError, RequestSummary};
use crate::model::options::RequestOptions;
use crate::session::page::TokenSource;
use crate::session::store::SessionStore;
use crate::utils::id::request_id;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// A request ready to be transmitted
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    /// Correlation id used in every log line of this call
    pub id: String,
    /// HTTP method
    pub method: Method,
    /// Path as given by the caller
    pub path: String,
    /// Resolved URL including query parameters
    pub url: Url,
    /// Headers to send
    pub headers: HeaderMap,
    /// JSON body, if any
    pub body: Option<Value>,
}

impl PreparedRequest {
    /// Diagnostic view of this request with credentials redacted
    pub fn summary(&self) -> RequestSummary {
        RequestSummary {
            path: self.path.clone(),
            method: self.method.to_string(),
            headers: redacted_headers(&self.headers),
        }
    }

    /// Builds the transport request on `client`
    pub fn to_builder(&self, client: &Client) -> RequestBuilder {
        let mut request = client
            .request(self.method.clone(), self.url.clone())
            .headers(self.headers.clone());
        if let Some(body) = &self.body {
            request = request.json(body);
        }
        request
    }
}

/// Applies the outgoing policy to every call
pub struct RequestPolicy {
    session_store: Arc<dyn SessionStore>,
    token_source: Arc<dyn TokenSource>,
}

impl RequestPolicy {
    /// Creates the policy over its two token providers
    pub fn new(session_store: Arc<dyn SessionStore>, token_source: Arc<dyn TokenSource>) -> Self {
        Self {
            session_store,
            token_source,
        }
    }

    /// Prepares a request, logging it on success
    ///
    /// A construction failure is logged and returned unchanged as
    /// [`AppError::RequestBuild`].
    pub async fn prepare<B: Serialize + ?Sized>(
        &self,
        method: Method,
        base_url: &str,
        path: &str,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> Result<PreparedRequest, AppError> {
        let id = request_id();
        match self.build(&id, method, base_url, path, body, options).await {
            Ok(prepared) => {
                debug!(
                    "[{}] Request: {} {} headers={:?} body={}",
                    prepared.id,
                    prepared.method,
                    prepared.path,
                    redacted_headers(&prepared.headers),
                    prepared
                        .body
                        .as_ref()
                        .map(serde_json::Value::to_string)
                        .unwrap_or_else(|| "null".to_string())
                );
                Ok(prepared)
            }
            Err(e) => {
                error!("[{}] Request error: {}", id, e);
                Err(e)
            }
        }
    }

    async fn build<B: Serialize + ?Sized>(
        &self,
        id: &str,
        method: Method,
        base_url: &str,
        path: &str,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> Result<PreparedRequest, AppError> {
        let url = resolve_url(base_url, path, &options.query)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        for (name, value) in &options.headers {
            headers.insert(header_name(name)?, header_value(name, value)?);
        }

        let token = match self.session_store.auth_token().await {
            Ok(token) => token,
            Err(e) => {
                warn!("[{}] Session store unavailable, sending unauthenticated: {}", id, e);
                None
            }
        };
        if let Some(token) = token {
            let value = format!("{BEARER_PREFIX}{token}");
            headers.insert(AUTHORIZATION, header_value(AUTHORIZATION.as_str(), &value)?);
        }

        if let Some(csrf) = self.token_source.csrf_token().await {
            headers.insert(header_name(CSRF_HEADER)?, header_value(CSRF_HEADER, &csrf)?);
        }

        let body = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| AppError::RequestBuild(format!("body is not serializable: {e}")))?;

        Ok(PreparedRequest {
            id: id.to_string(),
            method,
            path: path.to_string(),
            url,
            headers,
            body,
        })
    }
}

/// Resolves `path` against `base_url` and appends `query`
///
/// Absolute `http://` or `https://` paths are used as they are.
pub fn resolve_url(
    base_url: &str,
    path: &str,
    query: &[(String, String)],
) -> Result<Url, AppError> {
    let raw = if path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    };

    let mut url = Url::parse(&raw)
        .map_err(|e| AppError::RequestBuild(format!("invalid url '{raw}': {e}")))?;
    if !query.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }
    Ok(url)
}

/// Header list for diagnostics, with the authorization value hidden
pub fn redacted_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let shown = if *name == AUTHORIZATION {
                format!("{BEARER_PREFIX}{REDACTED}")
            } else {
                value.to_str().unwrap_or(REDACTED).to_string()
            };
            (name.to_string(), shown)
        })
        .collect()
}

fn header_name(name: &str) -> Result<HeaderName, AppError> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| AppError::RequestBuild(format!("invalid header name '{name}': {e}")))
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, AppError> {
    HeaderValue::from_str(value)
        .map_err(|e| AppError::RequestBuild(format!("invalid value for header '{name}': {e}")))
}
