//! Authentication service.
//!
//! Implements the [`Authenticator`] driving port: email lookup against
//! the credential store, Argon2id verification, and token issuance.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::Error;
use crate::domain::password::verify_password;
use crate::domain::ports::{
    AuthenticatedAgent, Authenticator, UserPersistenceError, UserRepository,
};
use crate::domain::token::TokenIssuer;
use crate::domain::user::LoginCredentials;

fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("credential store unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("credential store error: {message}"))
        }
    }
}

/// Authenticator backed by a user repository and a token issuer.
#[derive(Clone)]
pub struct AuthService<R> {
    users: Arc<R>,
    tokens: TokenIssuer,
}

impl<R> AuthService<R> {
    /// Create a new service from the credential store and token issuer.
    pub fn new(users: Arc<R>, tokens: TokenIssuer) -> Self {
        Self { users, tokens }
    }
}

#[async_trait]
impl<R> Authenticator for AuthService<R>
where
    R: UserRepository,
{
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthenticatedAgent, Error> {
        let user = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| {
                Error::unauthorized("email not found")
                    .with_details(json!({ "code": "unknown_email" }))
            })?;

        let matches = verify_password(credentials.password(), &user.password_hash)
            .map_err(|err| Error::internal(format!("credential verification failed: {err}")))?;
        if !matches {
            return Err(Error::unauthorized("incorrect password")
                .with_details(json!({ "code": "invalid_credential" })));
        }

        let token = self
            .tokens
            .issue(&user)
            .map_err(|err| Error::internal(format!("token issuance failed: {err}")))?;

        Ok(AuthenticatedAgent {
            token,
            agent_id: user.id,
        })
    }
}
