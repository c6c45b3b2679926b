//! Service configuration.

use report_share_core::{DEFAULT_TOKEN_LENGTH, MAX_TOKEN_LENGTH, MIN_TOKEN_LENGTH};

use crate::error::{Result, ServiceError};

/// Environment variable overriding [`ServiceConfig::base_url`].
pub const ENV_BASE_URL: &str = "REPORT_SHARE_BASE_URL";
/// Environment variable overriding [`ServiceConfig::token_length`].
pub const ENV_TOKEN_LENGTH: &str = "REPORT_SHARE_TOKEN_LENGTH";
/// Environment variable overriding [`ServiceConfig::record_views`].
pub const ENV_RECORD_VIEWS: &str = "REPORT_SHARE_RECORD_VIEWS";

/// Configuration for the share service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Prefix for share URLs.
    pub base_url: String,
    /// Length of newly generated share tokens.
    pub token_length: usize,
    /// Whether granted views append a view event.
    pub record_views: bool,
    /// `requireAuth` used when a share request leaves it out.
    pub default_require_auth: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            token_length: DEFAULT_TOKEN_LENGTH,
            record_views: true,
            default_require_auth: true,
        }
    }
}

impl ServiceConfig {
    /// Defaults overridden by `REPORT_SHARE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup(ENV_BASE_URL) {
            config.base_url = base_url;
        }

        if let Some(raw) = lookup(ENV_TOKEN_LENGTH) {
            config.token_length = raw
                .trim()
                .parse()
                .map_err(|_| ServiceError::Config(format!("{} is not a number: {:?}", ENV_TOKEN_LENGTH, raw)))?;
        }

        if let Some(raw) = lookup(ENV_RECORD_VIEWS) {
            config.record_views = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ServiceError::Config(format!(
                        "{} is not a boolean: {:?}",
                        ENV_RECORD_VIEWS, raw
                    )))
                }
            };
        }

        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_TOKEN_LENGTH..=MAX_TOKEN_LENGTH).contains(&self.token_length) {
            return Err(ServiceError::Config(format!(
                "token length must be between {} and {}, got {}",
                MIN_TOKEN_LENGTH, MAX_TOKEN_LENGTH, self.token_length
            )));
        }
        if self.base_url.trim().is_empty() {
            return Err(ServiceError::Config("base URL is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.token_length, 10);
        assert!(config.record_views);
        assert!(config.default_require_auth);
    }

    #[test]
    fn test_overrides() {
        let config = ServiceConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, "https://reports.example.com"),
            (ENV_TOKEN_LENGTH, "16"),
            (ENV_RECORD_VIEWS, "off"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://reports.example.com");
        assert_eq!(config.token_length, 16);
        assert!(!config.record_views);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            ServiceConfig::from_lookup(lookup(&[(ENV_TOKEN_LENGTH, "ten")])),
            Err(ServiceError::Config(_))
        ));
        assert!(matches!(
            ServiceConfig::from_lookup(lookup(&[(ENV_TOKEN_LENGTH, "2")])),
            Err(ServiceError::Config(_))
        ));
        assert!(matches!(
            ServiceConfig::from_lookup(lookup(&[(ENV_RECORD_VIEWS, "maybe")])),
            Err(ServiceError::Config(_))
        ));
    }
}
