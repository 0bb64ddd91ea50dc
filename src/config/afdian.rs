//! Afdian provider configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::{require_http_url, ValidationError};

/// Afdian account used for checkout links and the order query API
#[derive(Debug, Clone, Deserialize)]
pub struct AfdianConfig {
    /// Creator account id
    #[serde(default)]
    pub user_id: String,

    /// Open API token
    pub token: Option<SecretString>,

    /// Provider base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Query request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AfdianConfig {
    /// Get query timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate provider configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.user_id.is_empty() {
            return Err(ValidationError::MissingRequired("AFDIAN__USER_ID"));
        }
        match &self.token {
            Some(token) if !token.expose_secret().is_empty() => {}
            _ => return Err(ValidationError::MissingRequired("AFDIAN__TOKEN")),
        }
        require_http_url("AFDIAN__API_BASE_URL", &self.api_base_url)?;
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for AfdianConfig {
    fn default() -> Self {
        Self {
            user_id: String::new(),
            token: None,
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://afdian.com".to_string()
}

fn default_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> AfdianConfig {
        AfdianConfig {
            user_id: "creator".to_string(),
            token: Some(SecretString::new("token".to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn test_afdian_config_defaults() {
        let config = AfdianConfig::default();
        assert_eq!(config.api_base_url, "https://afdian.com");
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_validation_missing_user_id() {
        let config = AfdianConfig {
            user_id: String::new(),
            ..valid()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired("AFDIAN__USER_ID"))
        ));
    }

    #[test]
    fn test_validation_missing_token() {
        let config = AfdianConfig {
            token: Some(SecretString::new(String::new())),
            ..valid()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired("AFDIAN__TOKEN"))
        ));
    }

    #[test]
    fn test_validation_bad_base_url() {
        let config = AfdianConfig {
            api_base_url: "afdian.com".to_string(),
            ..valid()
        };
        assert!(config.validate().is_err());
    }
}
