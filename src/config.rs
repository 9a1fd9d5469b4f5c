use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the hosted identity provider. Only the demo account works when unset.
    pub provider_url: Option<String>,
    /// Public API key sent with every provider request
    pub api_key: Option<String>,
    /// Directory holding the session cache
    pub session_dir: PathBuf,
    /// Artificial pause before composing a listing
    pub generation_delay_ms: u64,
    /// Used when RUST_LOG is not set
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider_url: None,
            api_key: None,
            session_dir: PathBuf::from(".realty-desk"),
            generation_delay_ms: 1500,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults overlaid with `REALTY_DESK_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty("REALTY_DESK_PROVIDER_URL") {
            config.provider_url = Some(url);
        }
        if let Some(key) = non_empty("REALTY_DESK_API_KEY") {
            config.api_key = Some(key);
        }
        if let Some(dir) = non_empty("REALTY_DESK_SESSION_DIR") {
            config.session_dir = PathBuf::from(dir);
        }
        if let Some(delay) = non_empty("REALTY_DESK_GENERATION_DELAY_MS") {
            config.generation_delay_ms = delay
                .trim()
                .parse()
                .with_context(|| format!("Invalid REALTY_DESK_GENERATION_DELAY_MS '{}'", delay))?;
        }
        if let Some(filter) = non_empty("REALTY_DESK_LOG") {
            config.log_filter = filter;
        }

        Ok(config)
    }

    pub fn generation_delay(&self) -> Duration {
        Duration::from_millis(self.generation_delay_ms)
    }

    /// Provider URL and key, when both are configured
    pub fn hosted_provider(&self) -> Option<(&str, &str)> {
        Some((self.provider_url.as_deref()?, self.api_key.as_deref()?))
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
    fn defaults_without_environment() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.generation_delay(), Duration::from_millis(1500));
        assert_eq!(config.session_dir, PathBuf::from(".realty-desk"));
        assert!(config.hosted_provider().is_none());
    }

    #[test]
    fn overlays_environment() {
        let config = AppConfig::from_lookup(lookup(&[
            ("REALTY_DESK_PROVIDER_URL", "https://auth.example.com"),
            ("REALTY_DESK_API_KEY", "anon"),
            ("REALTY_DESK_GENERATION_DELAY_MS", "0"),
            ("REALTY_DESK_SESSION_DIR", "/tmp/desk"),
        ]))
        .unwrap();

        assert_eq!(config.hosted_provider(), Some(("https://auth.example.com", "anon")));
        assert!(config.generation_delay().is_zero());
        assert_eq!(config.session_dir, PathBuf::from("/tmp/desk"));
    }

    #[test]
    fn url_without_key_is_not_hosted() {
        let config =
            AppConfig::from_lookup(lookup(&[("REALTY_DESK_PROVIDER_URL", "https://auth.example.com")]))
                .unwrap();
        assert!(config.hosted_provider().is_none());
    }

    #[test]
    fn rejects_bad_delay() {
        let err = AppConfig::from_lookup(lookup(&[("REALTY_DESK_GENERATION_DELAY_MS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("soon"));
    }
}
