use async_trait::async_trait;

use super::{Credentials, User};
use crate::shared::DomainError;

/// Authentication surface of the backend service
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Register a new account. Does not sign in.
    async fn create_account(&self, credentials: &Credentials) -> Result<User, DomainError>;

    /// Open an email/password session
    async fn create_session(&self, credentials: &Credentials) -> Result<(), DomainError>;

    /// The user of the current session, `None` when signed out
    async fn current_user(&self) -> Result<Option<User>, DomainError>;

    /// Close the current session
    async fn delete_current_session(&self) -> Result<(), DomainError>;
}
