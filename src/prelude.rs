/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! # Outsider Client Prelude
//!
//! Brings the client, its collaborators and the common external types into
//! scope with a single import.
//!
//! ```rust
//! use outsider_client::prelude::*;
//!
//! let config = Config::for_environment(Environment::Development);
//! assert_eq!(config.rest_api.base_url, "http://localhost:3001");
//! ```

// ============================================================================
// CORE CONFIGURATION AND SETUP
// ============================================================================

/// Configuration for the API client
pub use crate::application::config::{Config, Environment, RestApiConfig, SessionConfig};

/// Library version information
pub use crate::{VERSION, version};

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Main error type for the library
pub use crate::error::{AppError, ErrorResponse, RequestSummary};

/// User-facing error surface
pub use crate::model::error_state::{ErrorState, ErrorSurface};

// ============================================================================
// API CLIENT
// ============================================================================

/// API client and failure classification
pub use crate::model::http::{ApiClient, classify_error};

/// Per-call overrides
pub use crate::model::options::RequestOptions;

/// Pipeline stages
pub use crate::model::request::{PreparedRequest, RequestPolicy};
pub use crate::model::response::{ApiResponse, ResponsePolicy};

// ============================================================================
// COLLABORATORS
// ============================================================================

/// Session store
pub use crate::session::store::{FileSessionStore, MemorySessionStore, SessionStore};

/// Anti-forgery token sources
pub use crate::session::page::{MetaTagTokenSource, NoTokenSource, StaticTokenSource, TokenSource};

/// Navigation
pub use crate::session::navigation::{LoggingNavigator, Navigator, Route, Router};

// ============================================================================
// UTILITIES
// ============================================================================

/// Logging utilities
pub use crate::utils::logger::setup_logger;

/// Global constants
pub use crate::constants::*;

// ============================================================================
// RE-EXPORTS FROM EXTERNAL CRATES
// ============================================================================

/// Re-export commonly used external types
pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
pub use std::sync::Arc;
pub use tokio;
pub use tracing::{debug, error, info, warn};

/// Re-export reqwest types used in the client's signatures
pub use reqwest::{Method, StatusCode};
