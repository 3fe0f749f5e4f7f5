mod gateway;

use serde::{Deserialize, Serialize};

use crate::shared::{DomainError, UserId};

pub use gateway::AuthGateway;

/// Minimum password length accepted by the backend
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// The signed-in account as reported by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
}

/// Email + password pair, checked locally before any network call
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.email.is_empty() {
            return Err(DomainError::Validation("Email is required".to_string()));
        }

        if !self.email.contains('@') {
            return Err(DomainError::Validation(format!(
                "'{}' is not a valid email address",
                self.email
            )));
        }

        if self.password.is_empty() {
            return Err(DomainError::Validation("Password is required".to_string()));
        }

        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::Validation(format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            )));
        }

        Ok(())
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

// Keep the password out of logs
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_credentials() {
        let credentials = Credentials::new(" ada@example.com ", "correct horse");
        assert!(credentials.validate().is_ok());
        assert_eq!(credentials.email(), "ada@example.com");
    }

    #[test]
    fn test_empty_email_rejected() {
        let result = Credentials::new("  ", "password123").validate();
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_email_without_at_rejected() {
        let result = Credentials::new("ada.example.com", "password123").validate();
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_short_password_rejected() {
        let result = Credentials::new("ada@example.com", "1234567").validate();
        match result {
            Err(DomainError::Validation(msg)) => assert!(msg.contains("at least 8")),
            other => panic!("Expected validation error, got {:?}", other),
        }

        assert!(Credentials::new("ada@example.com", "12345678")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_debug_hides_password() {
        let credentials = Credentials::new("ada@example.com", "hunter2hunter2");
        let printed = format!("{:?}", credentials);
        assert!(!printed.contains("hunter2"));
    }
}
