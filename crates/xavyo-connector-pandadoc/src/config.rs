//! PandaDoc connector configuration.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use url::Url;
use xavyo_connector::config::{ConnectorConfig, REDACTED};
use xavyo_connector::error::ConnectorResult;

use crate::client::MAX_PAGE_SIZE;
use crate::{PandaDocError, PandaDocResult};

/// Public API root for the US region.
const US_BASE_URL: &str = "https://api.pandadoc.com/public/v1";

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Regional PandaDoc deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PandaDocDomain {
    /// `api.pandadoc.com`
    #[default]
    Us,
    /// `api.pandadoc.eu`
    Eu,
}

impl PandaDocDomain {
    /// Get the string representation used in configuration.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            PandaDocDomain::Us => "us",
            PandaDocDomain::Eu => "eu",
        }
    }

    /// API base URL for this region.
    #[must_use]
    pub fn base_url(&self) -> String {
        match self {
            PandaDocDomain::Us => US_BASE_URL.to_string(),
            PandaDocDomain::Eu => US_BASE_URL.replacen(".com", ".eu", 1),
        }
    }
}

impl fmt::Display for PandaDocDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PandaDocDomain {
    type Err = PandaDocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "us" => Ok(PandaDocDomain::Us),
            "eu" => Ok(PandaDocDomain::Eu),
            other => Err(PandaDocError::Config(format!(
                "invalid domain '{other}', expected one of: us, eu"
            ))),
        }
    }
}

/// Configuration for the PandaDoc connector.
#[derive(Debug)]
pub struct PandaDocConfig {
    /// API key sent as `Authorization: API-Key <key>`.
    pub api_key: SecretString,
    /// Regional deployment.
    pub domain: PandaDocDomain,
    /// Replaces the regional base URL (test servers, egress proxies).
    pub base_url_override: Option<String>,
    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Page size used when a builder loads a full collection.
    pub page_size: u32,
}

impl Clone for PandaDocConfig {
    fn clone(&self) -> Self {
        Self {
            api_key: SecretString::from(self.api_key.expose_secret().to_owned()),
            domain: self.domain,
            base_url_override: self.base_url_override.clone(),
            request_timeout_secs: self.request_timeout_secs,
            page_size: self.page_size,
        }
    }
}

/// Shape of the configuration map the host passes in.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawConfig {
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    domain: Option<String>,
    #[serde(default)]
    base_url: Option<String>,
}

impl PandaDocConfig {
    /// Start building a configuration.
    pub fn builder() -> PandaDocConfigBuilder {
        PandaDocConfigBuilder::default()
    }

    /// Parse the host's configuration map (`api-key`, `domain`).
    ///
    /// # Errors
    ///
    /// Returns an error if the map is malformed, the API key is missing, or
    /// the domain is unknown.
    pub fn from_json(value: serde_json::Value) -> PandaDocResult<Self> {
        let raw: RawConfig = serde_json::from_value(value)?;

        let mut builder = Self::builder();
        if let Some(api_key) = raw.api_key {
            builder = builder.api_key(api_key);
        }
        if let Some(domain) = raw.domain {
            builder = builder.domain(domain.parse()?);
        }
        if let Some(base_url) = raw.base_url {
            builder = builder.base_url(base_url);
        }
        builder.build()
    }

    /// Resolved API base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse or lacks a scheme or host.
    pub fn base_url(&self) -> PandaDocResult<Url> {
        let raw = self
            .base_url_override
            .clone()
            .unwrap_or_else(|| self.domain.base_url());

        let url = Url::parse(&raw)?;
        if !matches!(url.scheme(), "http" | "https")
            || url.host_str().map_or(true, str::is_empty)
        {
            return Err(PandaDocError::Config(format!("invalid URL: {raw}")));
        }
        Ok(url)
    }

    /// HTTP request timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid field.
    pub fn check(&self) -> PandaDocResult<()> {
        if self.api_key.expose_secret().trim().is_empty() {
            return Err(PandaDocError::Config("api-key is required".into()));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(PandaDocError::Config(format!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.page_size
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(PandaDocError::Config(
                "request_timeout_secs must be greater than zero".into(),
            ));
        }
        self.base_url()?;
        Ok(())
    }
}

impl ConnectorConfig for PandaDocConfig {
    fn validate(&self) -> ConnectorResult<()> {
        Ok(self.check()?)
    }

    fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.api_key = SecretString::from(REDACTED.to_string());
        copy
    }
}

/// Builder for [`PandaDocConfig`].
#[derive(Debug, Default)]
pub struct PandaDocConfigBuilder {
    api_key: Option<SecretString>,
    domain: PandaDocDomain,
    base_url_override: Option<String>,
    request_timeout_secs: Option<u64>,
    page_size: Option<u32>,
}

impl PandaDocConfigBuilder {
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    pub fn domain(mut self, domain: PandaDocDomain) -> Self {
        self.domain = domain;
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting configuration is invalid.
    pub fn build(self) -> PandaDocResult<PandaDocConfig> {
        let api_key = self
            .api_key
            .ok_or_else(|| PandaDocError::Config("api-key is required".into()))?;

        let config = PandaDocConfig {
            api_key,
            domain: self.domain,
            base_url_override: self.base_url_override,
            request_timeout_secs: self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            page_size: self.page_size.unwrap_or(MAX_PAGE_SIZE),
        };
        config.check()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_domain_base_urls() {
        assert_eq!(
            PandaDocDomain::Us.base_url(),
            "https://api.pandadoc.com/public/v1"
        );
        assert_eq!(
            PandaDocDomain::Eu.base_url(),
            "https://api.pandadoc.eu/public/v1"
        );
    }

    #[test]
    fn test_domain_from_str() {
        assert_eq!("us".parse::<PandaDocDomain>().unwrap(), PandaDocDomain::Us);
        assert_eq!("EU".parse::<PandaDocDomain>().unwrap(), PandaDocDomain::Eu);
        assert_eq!("".parse::<PandaDocDomain>().unwrap(), PandaDocDomain::Us);
        assert!("uk".parse::<PandaDocDomain>().is_err());
    }

    #[test]
    fn test_builder_defaults() {
        let config = PandaDocConfig::builder().api_key("key-123").build().unwrap();
        assert_eq!(config.domain, PandaDocDomain::Us);
        assert_eq!(config.page_size, 50);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(
            config.base_url().unwrap().as_str(),
            "https://api.pandadoc.com/public/v1"
        );
    }

    #[test]
    fn test_builder_requires_api_key() {
        let err = PandaDocConfig::builder().build().unwrap_err();
        assert!(matches!(err, PandaDocError::Config(_)));

        let err = PandaDocConfig::builder().api_key("   ").build().unwrap_err();
        assert!(matches!(err, PandaDocError::Config(_)));
    }

    #[test]
    fn test_builder_rejects_bad_page_size() {
        assert!(PandaDocConfig::builder()
            .api_key("key")
            .page_size(0)
            .build()
            .is_err());
        assert!(PandaDocConfig::builder()
            .api_key("key")
            .page_size(51)
            .build()
            .is_err());
    }

    #[test]
    fn test_invalid_base_url_is_fatal() {
        assert!(PandaDocConfig::builder()
            .api_key("key")
            .base_url("not a url")
            .build()
            .is_err());
        assert!(PandaDocConfig::builder()
            .api_key("key")
            .base_url("ftp://files.example.com")
            .build()
            .is_err());
    }

    #[test]
    fn test_from_json() {
        let config = PandaDocConfig::from_json(json!({
            "api-key": "key-123",
            "domain": "eu"
        }))
        .unwrap();

        assert_eq!(config.api_key.expose_secret(), "key-123");
        assert_eq!(config.domain, PandaDocDomain::Eu);
        assert_eq!(
            config.base_url().unwrap().as_str(),
            "https://api.pandadoc.eu/public/v1"
        );
    }

    #[test]
    fn test_from_json_defaults_domain() {
        let config = PandaDocConfig::from_json(json!({ "api-key": "key-123" })).unwrap();
        assert_eq!(config.domain, PandaDocDomain::Us);
    }

    #[test]
    fn test_from_json_rejects_unknown_domain() {
        let err = PandaDocConfig::from_json(json!({
            "api-key": "key-123",
            "domain": "apac"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("invalid domain"));
    }

    #[test]
    fn test_redacted_hides_api_key() {
        let config = PandaDocConfig::builder()
            .api_key("sk-live-4242")
            .build()
            .unwrap();
        let redacted = config.redacted();
        assert_eq!(redacted.api_key.expose_secret(), REDACTED);
        assert_eq!(config.api_key.expose_secret(), "sk-live-4242");
        assert!(!format!("{config:?}").contains("sk-live-4242"));
    }
}
