use reqwest::StatusCode;
use serde::Deserialize;

use habitrack_domain::shared::DomainError;

pub const RESPONSE_FORMAT: &str = "1.5.0";
pub const HEADER_PROJECT: &str = "X-Appwrite-Project";
pub const HEADER_RESPONSE_FORMAT: &str = "X-Appwrite-Response-Format";
pub const HEADER_FALLBACK_COOKIES: &str = "X-Fallback-Cookies";

/// Page size used when listing documents
pub const PAGE_SIZE: usize = 100;

/// Error body returned by the backend on non-2xx responses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: u16,
    #[serde(default, rename = "type")]
    pub kind: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct DocumentList<T> {
    #[serde(default)]
    pub total: u64,
    pub documents: Vec<T>,
}

/// Map an HTTP failure to the domain error taxonomy
pub fn map_status(status: StatusCode, body: &ErrorBody) -> DomainError {
    let message = if body.message.is_empty() {
        format!("{} ({})", status, body.kind)
    } else {
        body.message.clone()
    };

    match status {
        StatusCode::UNAUTHORIZED => DomainError::Unauthenticated(message),
        StatusCode::NOT_FOUND => DomainError::NotFound(message),
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT => DomainError::Validation(message),
        _ => DomainError::Remote(format!("{}: {}", status.as_u16(), message)),
    }
}
