use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is not a valid URL: {value}")]
    InvalidUrl { name: &'static str, value: String },
}

/// Client-side settings for talking to the list endpoints.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub profiles_path: String,
    pub teams_path: String,
    pub locale: String,
    pub request_timeout: Duration,
    /// Zero disables the page cache.
    pub cache_ttl: Duration,
    pub cache_max_capacity: u64,
    pub search_debounce: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            profiles_path: "/profiles".to_string(),
            teams_path: "/teams".to_string(),
            locale: "en".to_string(),
            request_timeout: Duration::from_secs(15),
            cache_ttl: Duration::from_secs(30),
            cache_max_capacity: 256,
            search_debounce: Duration::from_millis(300),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url =
            std::env::var("LIST_API_BASE_URL").map_err(|_| ConfigError::Missing("LIST_API_BASE_URL"))?;
        if url::Url::parse(&base_url).is_err() {
            return Err(ConfigError::InvalidUrl {
                name: "LIST_API_BASE_URL",
                value: base_url,
            });
        }

        let defaults = Self::new(base_url);
        Ok(Self {
            profiles_path: std::env::var("LIST_PROFILES_PATH").unwrap_or(defaults.profiles_path.clone()),
            teams_path: std::env::var("LIST_TEAMS_PATH").unwrap_or(defaults.teams_path.clone()),
            locale: std::env::var("LIST_LOCALE")
                .ok()
                .or_else(sys_locale::get_locale)
                .unwrap_or(defaults.locale.clone()),
            request_timeout: parse_duration_secs("LIST_REQUEST_TIMEOUT_SECS", 15),
            cache_ttl: parse_duration_secs("LIST_CACHE_TTL_SECS", 30),
            cache_max_capacity: std::env::var("LIST_CACHE_MAX_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_max_capacity),
            search_debounce: std::env::var("LIST_SEARCH_DEBOUNCE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.search_debounce),
            base_url: defaults.base_url,
        })
    }

    pub fn cache_enabled(&self) -> bool {
        !self.cache_ttl.is_zero() && self.cache_max_capacity > 0
    }
}

fn parse_duration_secs(env_var: &str, default: u64) -> Duration {
    std::env::var(env_var)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(default))
}
