use std::time::Duration;

use serde::{Serialize, Serializer};
use tracing::debug;

/// Environment variable that overrides the API base URL.
pub const API_BASE_ENV: &str = "VITE_API_BASE";
pub const DEFAULT_BASE_URL: &str = "http://localhost:6969/api";
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(15_000);

/// Resolved settings for an [`ApiClient`](crate::ApiClient).
///
/// Built once and never mutated. Serializes as the effective
/// `{ "baseURL": ..., "timeout": <ms> }` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientConfig {
    #[serde(rename = "baseURL")]
    base_url: String,
    #[serde(serialize_with = "serialize_millis")]
    timeout: Duration,
}

impl ClientConfig {
    /// Resolves the base URL from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves the base URL through `lookup` instead of the real environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: FnOnce(&str) -> Option<String>,
    {
        Self::with_base_url(lookup(API_BASE_ENV))
    }

    /// Uses `base_url` verbatim when it is non-empty, the default otherwise.
    pub fn with_base_url(base_url: Option<String>) -> Self {
        let base_url = match base_url {
            Some(url) if !url.is_empty() => {
                debug!(base_url = %url, "using configured API base URL");
                url
            }
            _ => {
                debug!(base_url = DEFAULT_BASE_URL, "falling back to default API base URL");
                DEFAULT_BASE_URL.to_string()
            }
        };

        Self {
            base_url,
            timeout: REQUEST_TIMEOUT,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn timeout_millis(&self) -> u128 {
        self.timeout.as_millis()
    }

    #[cfg(test)]
    pub(crate) fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_base_url(None)
    }
}

fn serialize_millis<S>(timeout: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u64(timeout.as_millis() as u64)
}
