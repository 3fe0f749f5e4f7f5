use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn from_string(s: &str) -> Self {
                Self(s.to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

define_id!(HabitId);
define_id!(CompletionId);
define_id!(UserId);

/// Error codes for structured error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authentication (1xxx)
    InvalidCredentials = 1001,
    Unauthenticated = 1002,

    // Resource Not Found (2xxx)
    HabitNotFound = 2001,
    DocumentNotFound = 2002,

    // Business Logic (3xxx)
    AlreadyCompletedToday = 3001,

    // Data & Serialization (4xxx)
    SerializationError = 4004,

    // Remote service & Infrastructure (5xxx)
    InfrastructureError = 5001,
    NetworkError = 5002,
    RemoteServiceError = 5004,
    RealtimeError = 5005,

    // Validation (6xxx)
    ValidationError = 6001,
}

impl ErrorCode {
    /// Get error code as integer
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ErrorCode::InvalidCredentials
            | ErrorCode::Unauthenticated
            | ErrorCode::NetworkError
            | ErrorCode::RemoteServiceError
            | ErrorCode::RealtimeError => ErrorSeverity::Warning,

            ErrorCode::HabitNotFound
            | ErrorCode::DocumentNotFound
            | ErrorCode::AlreadyCompletedToday
            | ErrorCode::ValidationError => ErrorSeverity::Info,

            ErrorCode::SerializationError | ErrorCode::InfrastructureError => {
                ErrorSeverity::Error
            }
        }
    }

    /// Whether the user may simply try the same action again.
    /// Nothing in the client retries automatically.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ErrorCode::NetworkError | ErrorCode::RemoteServiceError | ErrorCode::RealtimeError
        )
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Not signed in: {0}")]
    Unauthenticated(String),

    #[error("Habit not found: {0}")]
    HabitNotFound(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already completed today: {0}")]
    AlreadyCompletedToday(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Remote service error: {0}")]
    Remote(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Realtime error: {0}")]
    Realtime(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl DomainError {
    /// Get error code
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::InvalidCredentials(_) => ErrorCode::InvalidCredentials,
            DomainError::Unauthenticated(_) => ErrorCode::Unauthenticated,
            DomainError::HabitNotFound(_) => ErrorCode::HabitNotFound,
            DomainError::NotFound(_) => ErrorCode::DocumentNotFound,
            DomainError::AlreadyCompletedToday(_) => ErrorCode::AlreadyCompletedToday,
            DomainError::Validation(_) => ErrorCode::ValidationError,
            DomainError::Remote(_) => ErrorCode::RemoteServiceError,
            DomainError::Network(_) => ErrorCode::NetworkError,
            DomainError::Realtime(_) => ErrorCode::RealtimeError,
            DomainError::Infrastructure(_) => ErrorCode::InfrastructureError,
            DomainError::Serialization(_) => ErrorCode::SerializationError,
            DomainError::Deserialization(_) => ErrorCode::SerializationError,
        }
    }

    /// Get error message
    pub fn message(&self) -> &str {
        match self {
            DomainError::InvalidCredentials(msg)
            | DomainError::Unauthenticated(msg)
            | DomainError::HabitNotFound(msg)
            | DomainError::NotFound(msg)
            | DomainError::AlreadyCompletedToday(msg)
            | DomainError::Validation(msg)
            | DomainError::Remote(msg)
            | DomainError::Network(msg)
            | DomainError::Realtime(msg)
            | DomainError::Infrastructure(msg)
            | DomainError::Serialization(msg)
            | DomainError::Deserialization(msg) => msg,
        }
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        self.code().severity()
    }

    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        self.code().is_recoverable()
    }

    /// Validation failures are raised before any network call is made
    pub fn is_validation(&self) -> bool {
        matches!(self, DomainError::Validation(_))
    }

    /// Format error with code
    pub fn format_with_code(&self) -> String {
        format!("[{}] {}", self.code().code(), self)
    }
}
