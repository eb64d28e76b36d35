//! Port abstraction for the credential store.
use async_trait::async_trait;

use crate::domain::user::User;

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection => "user repository connection failed: {message}",
        /// Query failed during execution.
        Query => "user repository query failed: {message}",
    }
}

/// Read-only access to user records. Users are provisioned out-of-band.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by unique email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError>;
}
