use std::fmt;

use async_trait::async_trait;

use super::types::{Credentials, NewTouristPoint, TouristPoint, User};

/// Errors that can occur while talking to the backend.
/// Nothing is retried; callers turn every variant into a user-facing alert.
#[derive(Debug)]
pub enum ApiError {
    /// Client misconfigured (bad base URL, TLS backend failure).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Backend answered with a non-success status.
    Api { status: u16, message: String },
    /// Backend answered 2xx with a body we could not use.
    Parse(String),
}

impl ApiError {
    /// True when the backend rejected the credentials or the bearer token.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::Api { status: 401 | 403, .. })
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Config(msg) => write!(f, "config error: {msg}"),
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// The REST contract the screens depend on.
#[async_trait]
pub trait TourismApi: Send + Sync {
    /// `POST /api/auth/login`, returns the bearer token.
    async fn login(&self, credentials: &Credentials) -> Result<String, ApiError>;

    /// `POST /api/users/register`. Any 2xx counts as created; the body is not read.
    async fn register(&self, credentials: &Credentials) -> Result<(), ApiError>;

    async fn list_users(&self, token: &str) -> Result<Vec<User>, ApiError>;

    async fn delete_user(&self, token: &str, id: &str) -> Result<(), ApiError>;

    async fn list_points(&self, token: &str) -> Result<Vec<TouristPoint>, ApiError>;

    async fn create_point(
        &self,
        token: &str,
        point: &NewTouristPoint,
    ) -> Result<TouristPoint, ApiError>;

    async fn get_point(&self, token: &str, id: &str) -> Result<TouristPoint, ApiError>;
}
