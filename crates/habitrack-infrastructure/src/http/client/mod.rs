mod account;
mod documents;
mod query;
mod types;

pub use query::Query;
pub use types::{map_status, ErrorBody, PAGE_SIZE};

use reqwest::{header, Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

use crate::config::BackendConfig;
use habitrack_domain::shared::DomainError;
use types::{HEADER_FALLBACK_COOKIES, HEADER_PROJECT, HEADER_RESPONSE_FORMAT, RESPONSE_FORMAT};

/// REST client of the hosted backend.
///
/// The session travels in the `X-Fallback-Cookies` header: the backend hands
/// it out on session creation and the client replays it on every request.
/// No request is ever retried.
pub struct AppwriteClient {
    pub(super) client: Client,
    pub(super) config: Arc<BackendConfig>,
    fallback_cookies: RwLock<Option<String>>,
}

impl AppwriteClient {
    pub fn new(config: Arc<BackendConfig>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("habitrack/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            client,
            config,
            fallback_cookies: RwLock::new(None),
        })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Raw session header text, for persisting between runs
    pub fn fallback_cookies(&self) -> Option<String> {
        self.fallback_cookies
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Restore a previously persisted session
    pub fn set_fallback_cookies(&self, cookies: Option<String>) {
        *self
            .fallback_cookies
            .write()
            .unwrap_or_else(|e| e.into_inner()) = cookies;
    }

    pub fn has_session(&self) -> bool {
        self.fallback_cookies().is_some()
    }

    /// Session secret extracted from the stored cookies, used by the realtime socket
    pub fn session_secret(&self) -> Option<String> {
        let raw = self.fallback_cookies()?;
        let cookies: HashMap<String, String> = serde_json::from_str(&raw).ok()?;
        cookies.get(&self.config.session_cookie_name()).cloned()
    }

    pub(super) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.endpoint, path);
        let mut request = self
            .client
            .request(method, url)
            .header(HEADER_PROJECT, &self.config.project_id)
            .header(HEADER_RESPONSE_FORMAT, RESPONSE_FORMAT)
            .header(header::ORIGIN, self.config.origin());

        if let Some(cookies) = self.fallback_cookies() {
            request = request.header(HEADER_FALLBACK_COOKIES, cookies);
        }

        request
    }

    /// Send and decode a JSON response body
    pub(super) async fn send_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> Result<T, DomainError> {
        let response = self.send(operation, request).await?;
        response.json::<T>().await.map_err(|e| {
            DomainError::Deserialization(format!("{}: invalid response body: {}", operation, e))
        })
    }

    /// Send and discard the response body
    pub(super) async fn send_empty(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> Result<(), DomainError> {
        self.send(operation, request).await.map(|_| ())
    }

    async fn send(&self, operation: &str, request: RequestBuilder) -> Result<Response, DomainError> {
        debug!(operation, "backend request");

        let response = request.send().await.map_err(|e| {
            warn!(operation, error = %e, "backend request failed");
            DomainError::Network(format!("{}: {}", operation, e))
        })?;

        if let Some(cookies) = response
            .headers()
            .get(HEADER_FALLBACK_COOKIES)
            .and_then(|v| v.to_str().ok())
        {
            self.set_fallback_cookies(Some(cookies.to_string()));
        }

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let body: ErrorBody = serde_json::from_str(&text).unwrap_or_else(|_| ErrorBody {
            message: text.chars().take(200).collect(),
            ..ErrorBody::default()
        });

        warn!(
            operation,
            status = status.as_u16(),
            kind = %body.kind,
            "backend returned error: {}",
            body.message
        );

        Err(map_status(status, &body))
    }
}
