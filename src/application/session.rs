//! Session collaborator: resolves the acting user for mutations that require one.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

/// Raw credentials lifted from a request by the HTTP layer.
#[derive(Debug, Clone, Default)]
pub struct SessionCredentials {
    pub bearer: Option<String>,
    pub cookie: Option<String>,
}

impl SessionCredentials {
    /// The token to check, preferring an explicit bearer token over the cookie.
    pub fn token(&self) -> Option<&str> {
        non_blank(&self.bearer).or_else(|| non_blank(&self.cookie))
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("missing session credentials")]
    Missing,
    #[error("invalid session credentials")]
    Invalid,
}

#[async_trait]
pub trait SessionGuard: Send + Sync {
    async fn require_user_id(
        &self,
        credentials: &SessionCredentials,
    ) -> Result<UserId, SessionError>;
}
