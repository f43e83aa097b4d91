/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use crate::constants::{DEVELOPMENT_BASE_URL, PRODUCTION_BASE_URL};
use dotenv::dotenv;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, error};

/// Deployment context the client is running in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Talks to the hosted service
    Production,
    /// Talks to a service running locally
    #[default]
    Development,
}

impl Environment {
    /// Interprets an environment flag; only `production` selects production
    pub fn from_flag(flag: &str) -> Self {
        if flag.trim().eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    /// Reads the flag from `APP_ENV`
    pub fn from_env() -> Self {
        env_string("APP_ENV")
            .map(|flag| Self::from_flag(&flag))
            .unwrap_or_default()
    }

    /// Base URL of the service for this environment
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Production => PRODUCTION_BASE_URL,
            Environment::Development => DEVELOPMENT_BASE_URL,
        }
    }
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Configuration for the REST API
pub struct RestApiConfig {
    /// Base URL every relative request path is joined onto
    pub base_url: String,
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, Default)]
/// Configuration for the persisted session store
pub struct SessionConfig {
    /// File backing the session store; in-memory when absent
    pub storage_path: Option<String>,
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Main configuration for the API client
pub struct Config {
    /// Deployment context
    pub environment: Environment,
    /// REST API configuration
    pub rest_api: RestApiConfig,
    /// Session store configuration
    pub session: SessionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Creates a configuration from the process environment and an optional `.env` file
    ///
    /// * `APP_ENV` selects the environment (`production` or anything else)
    /// * `API_BASE_URL` overrides the environment's base URL
    /// * `SESSION_STORAGE_PATH` persists the session store to a file
    pub fn new() -> Self {
        match dotenv() {
            Ok(_) => debug!("Successfully loaded .env file"),
            Err(e) => debug!("Failed to load .env file: {e}"),
        }

        let environment = Environment::from_env();
        let base_url =
            env_string("API_BASE_URL").unwrap_or_else(|| environment.base_url().to_string());
        debug!("Using {:?} environment at {}", environment, base_url);

        Config {
            environment,
            rest_api: RestApiConfig { base_url },
            session: SessionConfig {
                storage_path: env_string("SESSION_STORAGE_PATH"),
            },
        }
    }

    /// Creates a configuration for an environment without reading the process environment
    pub fn for_environment(environment: Environment) -> Self {
        Config {
            environment,
            rest_api: RestApiConfig {
                base_url: environment.base_url().to_string(),
            },
            session: SessionConfig::default(),
        }
    }

    /// Creates a development configuration pinned to an explicit base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Config {
            environment: Environment::Development,
            rest_api: RestApiConfig {
                base_url: base_url.into(),
            },
            session: SessionConfig::default(),
        }
    }

    /// Returns the same configuration with the session store backed by a file
    pub fn with_storage_path(mut self, path: impl Into<String>) -> Self {
        self.session.storage_path = Some(path.into());
        self
    }
}

/// Reads a variable, treating blank values as unset
///
/// A value that is not valid unicode is logged and ignored.
fn env_string(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) if value.trim().is_empty() => {
            debug!("{} is blank, using default", name);
            None
        }
        Ok(value) => Some(value.trim().to_string()),
        Err(env::VarError::NotPresent) => {
            debug!("{} is not set, using default", name);
            None
        }
        Err(e) => {
            error!("Failed to read {}: {}, using default", name, e);
            None
        }
    }
}
