//! Driving port for agent authentication.
use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::user::LoginCredentials;

/// Result of a successful login: a signed session token and the numeric
/// user id the client keys subsequent requests on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedAgent {
    pub token: String,
    pub agent_id: i32,
}

/// Validates credentials against the credential store and issues a
/// signed, time-limited session token. No state is written.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthenticatedAgent, Error>;
}
