//! API Configuration
//!
//! Base URL and request timeout for the remote collection endpoints.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::error::ConfigError;

/// Environment variable holding the API root, e.g. `https://api.example.com`
pub const API_URL_VAR: &str = "INVENTORY_API_URL";
/// Optional per-request timeout in milliseconds
pub const API_TIMEOUT_VAR: &str = "INVENTORY_API_TIMEOUT_MS";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
    timeout: Duration,
}

impl ApiConfig {
    /// Validate `base_url` and strip any trailing slashes.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = base_url.into();
        let trimmed = raw.trim().trim_end_matches('/');
        let has_host = ["http://", "https://"]
            .iter()
            .any(|scheme| trimmed.len() > scheme.len() && trimmed.starts_with(scheme));
        if !has_host {
            return Err(ConfigError::InvalidBaseUrl(raw));
        }
        Ok(Self {
            base_url: trimmed.to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup` (environment, compile-time
    /// values, test fixtures).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup(API_URL_VAR).ok_or(ConfigError::MissingVar(API_URL_VAR))?;
        let config = Self::new(base_url)?;
        match lookup(API_TIMEOUT_VAR) {
            Some(raw) => {
                let millis: u64 = raw
                    .trim()
                    .parse()
                    .ok()
                    .filter(|ms| *ms > 0)
                    .ok_or(ConfigError::InvalidTimeout(raw))?;
                Ok(config.with_timeout(Duration::from_millis(millis)))
            }
            None => Ok(config),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `{base}/{path}`
    pub fn collection_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// `{base}/{path}/{id}` with the identifier percent-encoded
    pub fn item_url(&self, path: &str, id: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            path,
            utf8_percent_encode(id, NON_ALPHANUMERIC)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_trailing_slash_stripped() {
        let config = ApiConfig::new("http://localhost:3000/").unwrap();
        assert_eq!(config.base_url(), "http://localhost:3000");
        assert_eq!(config.collection_url("category"), "http://localhost:3000/category");
    }

    #[test]
    fn test_rejects_missing_scheme() {
        assert_eq!(
            ApiConfig::new("localhost:3000"),
            Err(ConfigError::InvalidBaseUrl("localhost:3000".to_string()))
        );
        assert!(ApiConfig::new("https://").is_err());
    }

    #[test]
    fn test_item_url_encodes_id() {
        let config = ApiConfig::new("https://api.example.com/v1").unwrap();
        assert_eq!(
            config.item_url("product", "a b/c"),
            "https://api.example.com/v1/product/a%20b%2Fc"
        );
        assert_eq!(
            config.item_url("product", "65f1c0ffee"),
            "https://api.example.com/v1/product/65f1c0ffee"
        );
    }

    #[test]
    fn test_from_lookup() {
        let config = ApiConfig::from_lookup(lookup(&[
            (API_URL_VAR, "https://api.example.com"),
            (API_TIMEOUT_VAR, "2500"),
        ]))
        .unwrap();
        assert_eq!(config.timeout(), Duration::from_millis(2500));

        let config = ApiConfig::from_lookup(lookup(&[(API_URL_VAR, "https://api.example.com")])).unwrap();
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_from_lookup_errors() {
        assert_eq!(
            ApiConfig::from_lookup(lookup(&[])),
            Err(ConfigError::MissingVar(API_URL_VAR))
        );
        assert_eq!(
            ApiConfig::from_lookup(lookup(&[
                (API_URL_VAR, "https://api.example.com"),
                (API_TIMEOUT_VAR, "soon"),
            ])),
            Err(ConfigError::InvalidTimeout("soon".to_string()))
        );
    }
}
