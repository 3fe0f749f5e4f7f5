use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use super::AppwriteClient;
use habitrack_domain::session::{AuthGateway, Credentials, User};
use habitrack_domain::shared::{DomainError, UserId};

/// Lets the backend allocate the account id
const UNIQUE_ID: &str = "unique()";

#[derive(Debug, Deserialize)]
struct AccountBody {
    #[serde(rename = "$id")]
    id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    name: String,
}

impl From<AccountBody> for User {
    fn from(body: AccountBody) -> Self {
        User {
            id: UserId::from_string(&body.id),
            email: body.email,
            name: body.name,
        }
    }
}

#[async_trait]
impl AuthGateway for AppwriteClient {
    async fn create_account(&self, credentials: &Credentials) -> Result<User, DomainError> {
        let request = self.request(Method::POST, "/account").json(&json!({
            "userId": UNIQUE_ID,
            "email": credentials.email(),
            "password": credentials.password(),
        }));

        let body: AccountBody = self.send_json("create account", request).await?;
        info!("Account created: {}", body.id);
        Ok(body.into())
    }

    async fn create_session(&self, credentials: &Credentials) -> Result<(), DomainError> {
        let request = self
            .request(Method::POST, "/account/sessions/email")
            .json(&json!({
                "email": credentials.email(),
                "password": credentials.password(),
            }));

        match self.send_empty("create session", request).await {
            Ok(()) => Ok(()),
            Err(DomainError::Unauthenticated(msg)) => Err(DomainError::InvalidCredentials(msg)),
            Err(e) => Err(e),
        }
    }

    async fn current_user(&self) -> Result<Option<User>, DomainError> {
        if !self.has_session() {
            return Ok(None);
        }

        let request = self.request(Method::GET, "/account");
        match self.send_json::<AccountBody>("get account", request).await {
            Ok(body) => Ok(Some(body.into())),
            Err(DomainError::Unauthenticated(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn delete_current_session(&self) -> Result<(), DomainError> {
        let request = self.request(Method::DELETE, "/account/sessions/current");
        let result = self.send_empty("delete session", request).await;

        // the local session is gone whatever the backend answered
        self.set_fallback_cookies(None);

        if let Err(e) = &result {
            warn!("Session deletion failed on the backend: {}", e);
        }
        result
    }
}
