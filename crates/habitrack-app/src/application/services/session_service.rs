use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use habitrack_domain::session::{AuthGateway, Credentials, User};
use habitrack_domain::shared::DomainError;

/// The signed-in identity of this process.
///
/// Written only by `initialize` and the sign-in/sign-up/sign-out operations;
/// everything else reads it through `current_user` or `require_user`.
pub struct AuthSession {
    gateway: Arc<dyn AuthGateway>,
    current: RwLock<Option<User>>,
}

impl AuthSession {
    pub fn new(gateway: Arc<dyn AuthGateway>) -> Self {
        Self {
            gateway,
            current: RwLock::new(None),
        }
    }

    /// Restore the user of an existing backend session.
    /// Any failure leaves the session signed out.
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> Option<User> {
        let user = match self.gateway.current_user().await {
            Ok(user) => user,
            Err(e) => {
                warn!("Could not restore session, continuing signed out: {}", e);
                None
            }
        };

        if let Some(user) = &user {
            info!(user_id = %user.id, "Session restored");
        }

        *self.current.write().await = user.clone();
        user
    }

    pub async fn current_user(&self) -> Option<User> {
        self.current.read().await.clone()
    }

    pub async fn require_user(&self) -> Result<User, DomainError> {
        self.current_user().await.ok_or_else(|| {
            DomainError::Unauthenticated("Sign in first with `habitrack sign-in`".to_string())
        })
    }

    #[instrument(skip(self, password))]
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let credentials = Credentials::new(email, password);
        credentials.validate()?;

        let account = self.gateway.create_account(&credentials).await?;
        info!(user_id = %account.id, "Account created");

        self.establish(&credentials).await
    }

    #[instrument(skip(self, password))]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let credentials = Credentials::new(email, password);
        credentials.validate()?;

        self.establish(&credentials).await
    }

    /// Ends the backend session. The local user is cleared even when the
    /// backend call fails.
    #[instrument(skip(self))]
    pub async fn sign_out(&self) {
        if let Err(e) = self.gateway.delete_current_session().await {
            warn!("Failed to delete backend session: {}", e);
        }

        if let Some(user) = self.current.write().await.take() {
            info!(user_id = %user.id, "Signed out");
        }
    }

    async fn establish(&self, credentials: &Credentials) -> Result<User, DomainError> {
        self.gateway.create_session(credentials).await?;

        let user = self.gateway.current_user().await?.ok_or_else(|| {
            DomainError::Unauthenticated("Session was not accepted by the backend".to_string())
        })?;

        info!(user_id = %user.id, "Signed in");
        *self.current.write().await = Some(user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use habitrack_domain::shared::UserId;
    use mockall::mock;

    mock! {
        pub Gateway {}

        #[async_trait]
        impl AuthGateway for Gateway {
            async fn create_account(&self, credentials: &Credentials) -> Result<User, DomainError>;
            async fn create_session(&self, credentials: &Credentials) -> Result<(), DomainError>;
            async fn current_user(&self) -> Result<Option<User>, DomainError>;
            async fn delete_current_session(&self) -> Result<(), DomainError>;
        }
    }

    fn ada() -> User {
        User {
            id: UserId::from_string("u-ada"),
            email: "ada@example.com".to_string(),
            name: String::new(),
        }
    }

    #[tokio::test]
    async fn test_initialize_restores_user() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_current_user()
            .times(1)
            .returning(|| Ok(Some(ada())));

        let session = AuthSession::new(Arc::new(gateway));
        assert_eq!(session.initialize().await, Some(ada()));
        assert_eq!(session.require_user().await.unwrap(), ada());
    }

    #[tokio::test]
    async fn test_initialize_failure_means_signed_out() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_current_user()
            .returning(|| Err(DomainError::Network("offline".to_string())));

        let session = AuthSession::new(Arc::new(gateway));
        assert_eq!(session.initialize().await, None);
        assert!(matches!(
            session.require_user().await,
            Err(DomainError::Unauthenticated(_))
        ));
    }

    #[tokio::test]
    async fn test_sign_in_loads_user() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_create_session()
            .withf(|c: &Credentials| c.email() == "ada@example.com" && c.password() == "password123")
            .times(1)
            .returning(|_| Ok(()));
        gateway
            .expect_current_user()
            .times(1)
            .returning(|| Ok(Some(ada())));

        let session = AuthSession::new(Arc::new(gateway));
        let user = session.sign_in(" ada@example.com ", "password123").await.unwrap();

        assert_eq!(user, ada());
        assert_eq!(session.current_user().await, Some(ada()));
    }

    #[tokio::test]
    async fn test_sign_in_validates_before_calling_backend() {
        let mut gateway = MockGateway::new();
        gateway.expect_create_session().never();

        let session = AuthSession::new(Arc::new(gateway));
        let result = session.sign_in("ada@example.com", "short").await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(session.current_user().await, None);
    }

    #[tokio::test]
    async fn test_sign_in_with_wrong_password() {
        let mut gateway = MockGateway::new();
        gateway.expect_create_session().returning(|_| {
            Err(DomainError::InvalidCredentials(
                "Invalid credentials".to_string(),
            ))
        });
        gateway.expect_current_user().never();

        let session = AuthSession::new(Arc::new(gateway));
        let result = session.sign_in("ada@example.com", "password123").await;

        assert!(matches!(result, Err(DomainError::InvalidCredentials(_))));
        assert_eq!(session.current_user().await, None);
    }

    #[tokio::test]
    async fn test_sign_up_creates_account_then_signs_in() {
        let mut seq = mockall::Sequence::new();
        let mut gateway = MockGateway::new();
        gateway
            .expect_create_account()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(ada()));
        gateway
            .expect_create_session()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        gateway
            .expect_current_user()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(Some(ada())));

        let session = AuthSession::new(Arc::new(gateway));
        let user = session.sign_up("ada@example.com", "password123").await.unwrap();

        assert_eq!(user.id.as_str(), "u-ada");
    }

    #[tokio::test]
    async fn test_sign_out_clears_user_even_when_backend_fails() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_current_user()
            .returning(|| Ok(Some(ada())));
        gateway
            .expect_delete_current_session()
            .times(1)
            .returning(|| Err(DomainError::Remote("500".to_string())));

        let session = AuthSession::new(Arc::new(gateway));
        session.initialize().await;
        session.sign_out().await;

        assert_eq!(session.current_user().await, None);
    }
}
