//! Origin site configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::{require_http_url, ValidationError};

/// The storage site that creates orders and receives paid notifications
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OriginConfig {
    /// Public URL of the site, compared against the `X-Cr-Site-Url` header
    #[serde(default)]
    pub site_url: String,

    /// Communication key shared with the site for request signing
    pub communication_key: Option<SecretString>,
}

impl OriginConfig {
    /// Site URL with every trailing `/` removed
    pub fn normalized_site_url(&self) -> &str {
        self.site_url.trim_end_matches('/')
    }

    /// Validate origin configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.site_url.is_empty() {
            return Err(ValidationError::MissingRequired("ORIGIN__SITE_URL"));
        }
        require_http_url("ORIGIN__SITE_URL", &self.site_url)?;
        match &self.communication_key {
            Some(key) if !key.expose_secret().is_empty() => Ok(()),
            _ => Err(ValidationError::MissingRequired("ORIGIN__COMMUNICATION_KEY")),
        }
    }
}
