/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

use crate::application::config::Config;
use crate::constants::{DEFAULT_ERROR_MESSAGE, USER_AGENT};
use crate::error::AppError;
use crate::model::error_state::ErrorState;
use crate::model::options::RequestOptions;
use crate::model::request::RequestPolicy;
use crate::model::response::{ApiResponse, ResponsePolicy};
use crate::session::navigation::{LoggingNavigator, Navigator};
use crate::session::page::{NoTokenSource, TokenSource};
use crate::session::store::{FileSessionStore, MemorySessionStore, SessionStore};
use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::error;

/// Client for the Outsider API with uniform request and failure handling
///
/// Every call goes through the same pipeline:
/// - the outgoing stage attaches the bearer and anti-forgery tokens
/// - exactly one transmission, with no retries or backoff
/// - the incoming stage logs the outcome, invalidates the session on 401 and
///   surfaces connectivity failures
///
/// The verb helpers ([`read`](Self::read), [`create`](Self::create),
/// [`remove`](Self::remove)) additionally classify any failure onto the shared
/// [`ErrorState`] before returning it.
pub struct ApiClient {
    http_client: Client,
    config: Arc<Config>,
    session_store: Arc<dyn SessionStore>,
    token_source: Arc<dyn TokenSource>,
    navigator: Arc<dyn Navigator>,
    error_state: Arc<ErrorState>,
}

impl ApiClient {
    /// Creates a client reporting failures on `error_state`
    ///
    /// The session store is file-backed when the configuration names a
    /// storage path and in-memory otherwise. There is no page token source and
    /// redirects are only logged until other collaborators are supplied.
    ///
    /// # Returns
    /// * `Ok(ApiClient)` - Client ready to use
    /// * `Err(AppError)` - If the HTTP client cannot be created
    pub fn new(config: Config, error_state: Arc<ErrorState>) -> Result<Self, AppError> {
        let http_client = Client::builder().user_agent(USER_AGENT).build()?;

        let session_store: Arc<dyn SessionStore> = match &config.session.storage_path {
            Some(path) => Arc::new(FileSessionStore::new(path)),
            None => Arc::new(MemorySessionStore::new()),
        };

        Ok(Self {
            http_client,
            config: Arc::new(config),
            session_store,
            token_source: Arc::new(NoTokenSource),
            navigator: Arc::new(LoggingNavigator),
            error_state,
        })
    }

    /// Replaces the session store
    #[must_use]
    pub fn with_session_store(mut self, session_store: Arc<dyn SessionStore>) -> Self {
        self.session_store = session_store;
        self
    }

    /// Replaces the anti-forgery token source
    #[must_use]
    pub fn with_token_source(mut self, token_source: Arc<dyn TokenSource>) -> Self {
        self.token_source = token_source;
        self
    }

    /// Replaces the navigation facility
    #[must_use]
    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    /// Configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Base URL relative paths are joined onto
    pub fn base_url(&self) -> &str {
        &self.config.rest_api.base_url
    }

    /// Error surface this client writes to
    pub fn error_state(&self) -> &Arc<ErrorState> {
        &self.error_state
    }

    /// Session store this client reads the token from
    pub fn session_store(&self) -> &Arc<dyn SessionStore> {
        &self.session_store
    }

    /// Makes a GET request and returns the response body
    ///
    /// # Example
    /// ```ignore
    /// let user: serde_json::Value = client.read("/users/1", None).await?;
    /// ```
    pub async fn read<T: DeserializeOwned>(
        &self,
        path: &str,
        options: Option<RequestOptions>,
    ) -> Result<T, AppError> {
        self.call(Method::GET, path, None::<&Value>, options).await
    }

    /// Makes a POST request with a JSON body and returns the response body
    pub async fn create<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        options: Option<RequestOptions>,
    ) -> Result<T, AppError> {
        self.call(Method::POST, path, Some(body), options).await
    }

    /// Makes a DELETE request and returns the response body
    pub async fn remove<T: DeserializeOwned>(
        &self,
        path: &str,
        options: Option<RequestOptions>,
    ) -> Result<T, AppError> {
        self.call(Method::DELETE, path, None::<&Value>, options).await
    }

    /// Sends one request through the pipeline without classifying failures
    ///
    /// Request-construction failures come back unchanged; transport and
    /// status failures come back after the incoming stage's side effects.
    pub async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> Result<ApiResponse, AppError> {
        let request = RequestPolicy::new(self.session_store.clone(), self.token_source.clone())
            .prepare(method, self.base_url(), path, body, options)
            .await?;

        let outcome = request.to_builder(&self.http_client).send().await;

        ResponsePolicy::new(
            self.session_store.clone(),
            self.navigator.clone(),
            self.error_state.clone(),
        )
        .evaluate(&request, outcome)
        .await
    }

    /// Surfaces a failure on the error state and hands it back
    ///
    /// The message is chosen by [`classify_error`]; `default_message` is used
    /// only when the failure carries nothing better.
    pub async fn handle_api_error(&self, error: AppError, default_message: Option<&str>) -> AppError {
        error!("API Error: {}", error);
        let message = classify_error(&error, default_message);
        self.error_state.show(message).await;
        error
    }

    async fn call<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: Option<RequestOptions>,
    ) -> Result<T, AppError> {
        let options = options.unwrap_or_default();
        let outcome = match self.send(method, path, body, &options).await {
            Ok(response) => response.json(),
            Err(e) => Err(e),
        };
        match outcome {
            Ok(value) => Ok(value),
            Err(e) => Err(self.handle_api_error(e, None).await),
        }
    }
}

/// Chooses the user-facing message for a failure
///
/// In order of preference: the `error` field of the response body, the
/// failure's own message, `default_message`, then a generic fallback.
pub fn classify_error(error: &AppError, default_message: Option<&str>) -> String {
    if let Some(message) = error.response().and_then(|response| response.error_field()) {
        return message;
    }
    if let Some(message) = error.message() {
        return message;
    }
    default_message.unwrap_or(DEFAULT_ERROR_MESSAGE).to_string()
}
