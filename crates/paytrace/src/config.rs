use std::env;

use paytrace_protocol::Credentials;
use url::Url;

pub const DEFAULT_DOMAIN: &str = "paytrace.com";
const API_PATH: &str = "/api/default.pay";

/// Account and endpoint settings for a [`Gateway`](crate::Gateway).
#[derive(Clone)]
pub struct PayTraceConfig {
    pub user_name: String,
    pub password: String,
    /// Gateway host, e.g. `paytrace.com` or `stage.paytrace.com`.
    pub domain: String,
}

impl std::fmt::Debug for PayTraceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayTraceConfig")
            .field("user_name", &self.user_name)
            .field("password", &"[REDACTED]")
            .field("domain", &self.domain)
            .finish()
    }
}

impl PayTraceConfig {
    pub fn new(user_name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            password: password.into(),
            domain: DEFAULT_DOMAIN.to_string(),
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Load from `PAYTRACE_USER_NAME`, `PAYTRACE_PASSWORD` and the optional
    /// `PAYTRACE_DOMAIN`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let user_name = env::var("PAYTRACE_USER_NAME")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingRequired("PAYTRACE_USER_NAME"))?;
        let password = env::var("PAYTRACE_PASSWORD")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingRequired("PAYTRACE_PASSWORD"))?;

        let domain = env::var("PAYTRACE_DOMAIN")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_DOMAIN.to_string());
        validate_domain(&domain)?;

        if domain != DEFAULT_DOMAIN {
            tracing::info!(%domain, "using non-default PayTrace domain");
        }

        Ok(Self {
            user_name,
            password,
            domain,
        })
    }

    /// `https://{domain}/api/default.pay`
    pub fn api_url(&self) -> String {
        format!("https://{}{}", self.domain, API_PATH)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.user_name.as_str(), self.password.as_str())
    }
}

/// A domain must be a bare host name: no scheme, path or credentials.
pub fn validate_domain(domain: &str) -> Result<(), ConfigError> {
    let url = Url::parse(&format!("https://{domain}"))
        .map_err(|_| ConfigError::InvalidDomain(domain.to_string()))?;

    let bare = url.host_str().is_some()
        && url.path() == "/"
        && url.username().is_empty()
        && url.query().is_none()
        && !domain.contains('/');
    if bare {
        Ok(())
    } else {
        Err(ConfigError::InvalidDomain(domain.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingRequired(&'static str),

    #[error("invalid domain: {0}")]
    InvalidDomain(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url() {
        let config = PayTraceConfig::new("demo123", "demo123");
        assert_eq!(config.api_url(), "https://paytrace.com/api/default.pay");

        let config = config.with_domain("stage.paytrace.com");
        assert_eq!(config.api_url(), "https://stage.paytrace.com/api/default.pay");
    }

    #[test]
    fn test_validate_domain() {
        assert!(validate_domain("paytrace.com").is_ok());
        assert!(validate_domain("stage.paytrace.com").is_ok());
        assert!(validate_domain("localhost:8443").is_ok());

        assert!(validate_domain("").is_err());
        assert!(validate_domain("paytrace.com/api").is_err());
        assert!(validate_domain("user@paytrace.com").is_err());
        assert!(validate_domain("https://paytrace.com").is_err());
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = PayTraceConfig::new("demo123", "hunter2");
        let debug = format!("{config:?}");
        assert!(debug.contains("demo123"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_credentials() {
        let credentials = PayTraceConfig::new("u", "p").credentials();
        assert_eq!(credentials, Credentials::new("u", "p"));
    }
}
