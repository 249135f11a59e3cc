//! Token-backed session guard.
//!
//! Tokens are never stored in the clear: configuration carries the SHA-256
//! of each user's token and requests are hashed and compared in constant time.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::application::session::{SessionCredentials, SessionError, SessionGuard, UserId};
use crate::config::{SessionSettings, SessionUser};

#[derive(Debug, Clone)]
pub struct TokenSessionGuard {
    users: Vec<SessionUser>,
}

impl TokenSessionGuard {
    pub fn new(users: Vec<SessionUser>) -> Self {
        Self { users }
    }

    pub fn from_settings(settings: &SessionSettings) -> Self {
        Self::new(settings.users.clone())
    }

    pub fn hash_token(token: &str) -> Vec<u8> {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hasher.finalize().to_vec()
    }
}

#[async_trait]
impl SessionGuard for TokenSessionGuard {
    async fn require_user_id(
        &self,
        credentials: &SessionCredentials,
    ) -> Result<UserId, SessionError> {
        let token = credentials.token().ok_or(SessionError::Missing)?;
        let hashed = Self::hash_token(token);

        // No early exit: every configured user is compared.
        let mut matched = None;
        for user in &self.users {
            if user.token_sha256.ct_eq(&hashed).unwrap_u8() == 1 && matched.is_none() {
                matched = Some(user);
            }
        }

        match matched {
            Some(user) => Ok(UserId::new(user.id.clone())),
            None => {
                debug!(
                    target = "postdesk::session",
                    "session token did not match any configured user"
                );
                Err(SessionError::Invalid)
            }
        }
    }
}
