//! Runtime configuration.

use std::time::Duration;

use log::warn;
use reqwest::Url;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("server URL {0:?} is not an absolute http(s) URL")]
    InvalidServerUrl(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Root of the backend API, without a trailing slash.
    pub server_url: Option<String>,
    /// Per-request timeout; `None` leaves it to the network stack.
    pub timeout: Option<Duration>,
}

impl Config {
    /// Build a configuration from the raw server URL.
    ///
    /// A missing or blank URL is accepted with a warning; every request will
    /// then be reported as unreachable.
    pub fn new(server_url: Option<&str>, timeout_secs: Option<u64>) -> Result<Self, ConfigError> {
        let server_url = match server_url.map(str::trim).filter(|url| !url.is_empty()) {
            Some(url) => {
                let parsed = Url::parse(url)
                    .map_err(|_| ConfigError::InvalidServerUrl(url.to_string()))?;
                if !matches!(parsed.scheme(), "http" | "https") {
                    return Err(ConfigError::InvalidServerUrl(url.to_string()));
                }
                Some(url.trim_end_matches('/').to_string())
            }
            None => {
                warn!("[Config] Server URL not specified -- set MICROCRED_SERVER_URL or SERVER_URL_ROOT");
                None
            }
        };

        Ok(Self {
            server_url,
            timeout: timeout_secs.map(Duration::from_secs),
        })
    }

    /// Absolute URL of `path` under the server root.
    pub fn endpoint(&self, path: &str) -> Option<String> {
        self.server_url
            .as_ref()
            .map(|root| format!("{}/{}", root, path.trim_start_matches('/')))
    }

    /// Short label for the status bar.
    pub fn server_label(&self) -> String {
        self.server_url
            .clone()
            .unwrap_or_else(|| "no server configured".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_removed() {
        let config = Config::new(Some(" https://api.example.com/v1/ "), Some(5)).unwrap();
        assert_eq!(config.server_url.as_deref(), Some("https://api.example.com/v1"));
        assert_eq!(
            config.endpoint("/auth/login").as_deref(),
            Some("https://api.example.com/v1/auth/login")
        );
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_missing_url_is_allowed() {
        let config = Config::new(Some("   "), None).unwrap();
        assert_eq!(config.server_url, None);
        assert_eq!(config.endpoint("courses"), None);
        assert_eq!(Config::new(None, None).unwrap().server_url, None);
    }

    #[test]
    fn test_timeout_is_opt_in() {
        let config = Config::new(Some("https://api.example.com"), None).unwrap();
        assert_eq!(config.timeout, None);
        assert_eq!(Config::default().timeout, None);
    }

    #[test]
    fn test_invalid_url() {
        assert_eq!(
            Config::new(Some("not a url"), None),
            Err(ConfigError::InvalidServerUrl("not a url".into()))
        );
        assert!(Config::new(Some("ftp://files.example.com"), None).is_err());
    }
}
