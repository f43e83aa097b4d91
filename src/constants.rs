/// Key under which the session token is persisted in the session store
pub const AUTH_TOKEN_KEY: &str = "auth_token";
/// Prefix placed before the session token in the `Authorization` header
pub const BEARER_PREFIX: &str = "Bearer ";
/// Header carrying the anti-forgery token
pub const CSRF_HEADER: &str = "X-CSRF-Token";
/// Name of the page meta tag holding the anti-forgery token
pub const CSRF_META_NAME: &str = "csrf-token";
/// Destination used when a session is invalidated
pub const LOGIN_PATH: &str = "/login";
/// Message surfaced when the service cannot be reached at all
pub const UNREACHABLE_MESSAGE: &str = "Unable to reach the server. Please check your connection.";
/// Fallback message when a failure carries nothing more specific
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";
/// Field of an error response body naming a human-readable message
pub const ERROR_MESSAGE_FIELD: &str = "error";
/// Base URL of the service in production
pub const PRODUCTION_BASE_URL: &str = "https://outsider-284373f8936c.herokuapp.com";
/// Base URL of the service everywhere else
pub const DEVELOPMENT_BASE_URL: &str = "http://localhost:3001";
/// Media type of every request and response body
pub const JSON_CONTENT_TYPE: &str = "application/json";
/// User agent string used in HTTP requests to identify this client
pub const USER_AGENT: &str = concat!("outsider-client/", env!("CARGO_PKG_VERSION"));
/// Placeholder written in place of credentials in diagnostic output
pub const REDACTED: &str = "[REDACTED]";
