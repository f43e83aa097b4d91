/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Navigation facility and route guard
//!
//! The API layer only needs [`Navigator::redirect`] to send the user back to
//! the login screen. [`Router`] is the full implementation: it keeps the
//! route table, applies the authentication guard and records where the client
//! currently is.

use crate::constants::LOGIN_PATH;
use crate::session::store::SessionStore;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Moves the client to another location; nothing is returned to the caller
#[async_trait]
pub trait Navigator: Send + Sync {
    /// Redirects the client to `path`
    async fn redirect(&self, path: &str);
}

/// Navigator for headless contexts: it only records the redirect in the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingNavigator;

#[async_trait]
impl Navigator for LoggingNavigator {
    async fn redirect(&self, path: &str) {
        info!("Redirecting to {}", path);
    }
}

/// An entry of the route table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Location, e.g. `/chat`
    pub path: String,
    /// Symbolic name
    pub name: String,
    /// Whether a stored session token is needed to enter
    pub requires_auth: bool,
}

impl Route {
    /// A route anyone may enter
    pub fn public(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            requires_auth: false,
        }
    }

    /// A route only an authenticated client may enter
    pub fn protected(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            requires_auth: true,
            ..Self::public(path, name)
        }
    }
}

/// Route table of the chat and image-generation client
pub fn default_routes() -> Vec<Route> {
    vec![
        Route::protected("/", "home"),
        Route::public(LOGIN_PATH, "login"),
        Route::public("/register", "register"),
        Route::protected("/chat", "chat"),
        Route::protected("/generate-image", "generate-image"),
    ]
}

/// Client-side router with an authentication guard
pub struct Router {
    routes: Vec<Route>,
    session_store: Arc<dyn SessionStore>,
    history: RwLock<Vec<String>>,
}

impl Router {
    /// Creates a router over [`default_routes`]
    pub fn new(session_store: Arc<dyn SessionStore>) -> Self {
        Self::with_routes(default_routes(), session_store)
    }

    /// Creates a router over a custom route table
    pub fn with_routes(routes: Vec<Route>, session_store: Arc<dyn SessionStore>) -> Self {
        Self {
            routes,
            session_store,
            history: RwLock::new(Vec::new()),
        }
    }

    /// Looks up the route matching `location`, ignoring query and fragment
    pub fn route(&self, location: &str) -> Option<&Route> {
        let path = location
            .split(['?', '#'])
            .next()
            .unwrap_or(location);
        self.routes.iter().find(|route| route.path == path)
    }

    /// Applies the guard and returns where the client would actually land
    ///
    /// Protected routes resolve to the login screen when no session token is
    /// stored. Unknown locations are let through.
    pub async fn resolve(&self, to: &str) -> String {
        match self.route(to) {
            Some(route) if route.requires_auth && !self.session_store.is_authenticated().await => {
                debug!("Route {} requires authentication", route.path);
                LOGIN_PATH.to_string()
            }
            _ => to.to_string(),
        }
    }

    /// Navigates to `to`, returning the location actually reached
    pub async fn navigate(&self, to: &str) -> String {
        let destination = self.resolve(to).await;
        info!("Navigating to {}", destination);
        self.history.write().await.push(destination.clone());
        destination
    }

    /// Current location, `None` before the first navigation
    pub async fn current(&self) -> Option<String> {
        self.history.read().await.last().cloned()
    }

    /// Every location reached so far, oldest first
    pub async fn history(&self) -> Vec<String> {
        self.history.read().await.clone()
    }
}

#[async_trait]
impl Navigator for Router {
    async fn redirect(&self, path: &str) {
        self.navigate(path).await;
    }
}
