use std::time::Duration;

use tracing::warn;

pub const BASE_URL_ENV: &str = "MEDIA_CONSOLE_API_BASE_URL";
pub const TIMEOUT_ENV: &str = "MEDIA_CONSOLE_TIMEOUT_SECS";

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Backend base URL, never ending in a slash
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ConsoleConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup(BASE_URL_ENV)
            .map(|url| normalize_base_url(&url))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = match lookup(TIMEOUT_ENV) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) => Duration::from_secs(secs),
                Err(_) => {
                    warn!(value = %raw, "invalid {}, using default timeout", TIMEOUT_ENV);
                    DEFAULT_TIMEOUT
                }
            },
            None => DEFAULT_TIMEOUT,
        };

        Self { base_url, timeout }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = normalize_base_url(base_url);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = ConsoleConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, ConsoleConfig::default());
    }

    #[test]
    fn strips_trailing_slash_from_base_url() {
        let config = ConsoleConfig::from_lookup(lookup_from(&[(
            BASE_URL_ENV,
            "https://media.example.com/api/",
        )]));
        assert_eq!(config.base_url, "https://media.example.com/api");
    }

    #[test]
    fn invalid_timeout_falls_back_to_default() {
        let config = ConsoleConfig::from_lookup(lookup_from(&[(TIMEOUT_ENV, "soon")]));
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);

        let config = ConsoleConfig::from_lookup(lookup_from(&[(TIMEOUT_ENV, "45")]));
        assert_eq!(config.timeout, Duration::from_secs(45));
    }

    #[test]
    fn builder_overrides_normalize() {
        let config = ConsoleConfig::default().with_base_url("http://localhost:9000//");
        assert_eq!(config.base_url, "http://localhost:9000");
    }
}
