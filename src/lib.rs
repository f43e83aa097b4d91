/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! # Outsider Client
//!
//! API access layer for the Outsider chat and image-generation service.
//!
//! Every call goes through one pipeline with consistent cross-cutting policy:
//!
//! - **Outgoing**: the session token is sent as a bearer `Authorization`
//!   header and the page's anti-forgery token as `X-CSRF-Token`.
//! - **Incoming**: a 401 clears the session token and redirects to `/login`;
//!   a call that never reached the service surfaces a fixed connectivity
//!   message.
//! - **Verb helpers**: `read`, `create` and `remove` return the response body
//!   on success and, on failure, surface a message on the shared
//!   [`ErrorState`](model::error_state::ErrorState) before returning the error.
//!
//! There are no retries, no backoff and no timeouts: each failure is
//! classified, surfaced once and returned to the caller.
//!
//! ## Example
//!
//! ```ignore
//! use outsider_client::prelude::*;
//!
//! let errors = ErrorState::shared();
//! let client = ApiClient::new(Config::new(), errors.clone())?;
//!
//! match client.read::<serde_json::Value>("/users/1", None).await {
//!     Ok(user) => info!("user: {user}"),
//!     Err(_) => info!("shown to the user: {}", errors.message().await),
//! }
//! ```

/// Application configuration
pub mod application;
/// Global constants
pub mod constants;
/// Error types
pub mod error;
/// API client, pipeline stages and error surface
pub mod model;
/// Commonly used types
pub mod prelude;
/// Session store, page token source and navigation collaborators
pub mod session;
/// Logging and identifier utilities
pub mod utils;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
pub fn version() -> &'static str {
    VERSION
}
