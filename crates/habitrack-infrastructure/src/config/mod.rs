use std::time::Duration;

pub const ENV_ENDPOINT: &str = "HABITRACK_APPWRITE_ENDPOINT";
pub const ENV_PROJECT_ID: &str = "HABITRACK_APPWRITE_PROJECT_ID";
pub const ENV_PLATFORM: &str = "HABITRACK_APPWRITE_PLATFORM";
pub const ENV_DATABASE_ID: &str = "HABITRACK_APPWRITE_DB";
pub const ENV_HABITS_COLLECTION_ID: &str = "HABITRACK_APPWRITE_HABITS_COLLECTION_ID";
pub const ENV_COMPLETIONS_COLLECTION_ID: &str = "HABITRACK_APPWRITE_COMPLETIONS_COLLECTION_ID";
pub const ENV_REALTIME_HEARTBEAT_SECS: &str = "HABITRACK_REALTIME_HEARTBEAT_SECS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Connection settings of the hosted backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// API root, e.g. `https://cloud.appwrite.io/v1` (no trailing slash)
    pub endpoint: String,
    pub project_id: String,
    pub platform: String,
    pub database_id: String,
    pub habits_collection_id: String,
    pub completions_collection_id: String,
}

impl BackendConfig {
    /// Load from process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let endpoint = required(ENV_ENDPOINT)?;
        let parsed = url::Url::parse(&endpoint).map_err(|e| ConfigError::Invalid {
            name: ENV_ENDPOINT,
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                name: ENV_ENDPOINT,
                reason: format!("expected http(s) URL, got scheme '{}'", parsed.scheme()),
            });
        }

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            project_id: required(ENV_PROJECT_ID)?,
            platform: required(ENV_PLATFORM)?,
            database_id: required(ENV_DATABASE_ID)?,
            habits_collection_id: required(ENV_HABITS_COLLECTION_ID)?,
            completions_collection_id: required(ENV_COMPLETIONS_COLLECTION_ID)?,
        })
    }

    /// `Origin` header identifying the registered client platform
    pub fn origin(&self) -> String {
        format!("appwrite-{}://{}", std::env::consts::OS, self.platform)
    }

    /// Name of the cookie holding the session secret
    pub fn session_cookie_name(&self) -> String {
        format!("a_session_{}", self.project_id)
    }
}

/// Realtime socket settings
#[derive(Debug, Clone)]
pub struct RealtimeConfig {
    /// Interval between client `ping` messages
    pub heartbeat: Duration,
    /// Wait before the first reconnect attempt after a dropped socket
    pub initial_backoff: Duration,
    /// Upper bound of the doubling reconnect wait
    pub max_backoff: Duration,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            heartbeat: Duration::from_secs(20),
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(30),
        }
    }
}

impl RealtimeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_REALTIME_HEARTBEAT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: ENV_REALTIME_HEARTBEAT_SECS,
                reason: format!("'{}' is not a whole number of seconds", raw),
            })?;
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    name: ENV_REALTIME_HEARTBEAT_SECS,
                    reason: "must be greater than zero".to_string(),
                });
            }
            config.heartbeat = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Wait that follows `current` in the reconnect sequence
    pub fn next_backoff(&self, current: Duration) -> Duration {
        current.saturating_mul(2).min(self.max_backoff)
    }
}
