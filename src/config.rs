use std::time::Duration;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub pdns_url: String, // "http://127.0.0.1:8081/api/v1"
    pub pdns_api_key: String,
    pub pdns_timeout: Duration,
}

impl AppConfig {
    pub fn new(
        pdns_url: &str,
        pdns_api_key: impl Into<String>,
        pdns_timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let pdns_url = pdns_url.trim().trim_end_matches('/');
        if pdns_url.is_empty() {
            return Err(ConfigError::MissingUrl);
        }
        if !pdns_url.starts_with("http://") && !pdns_url.starts_with("https://") {
            return Err(ConfigError::UnsupportedScheme(pdns_url.to_string()));
        }
        if pdns_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self {
            pdns_url: pdns_url.to_string(),
            pdns_api_key: pdns_api_key.into(),
            pdns_timeout,
        })
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("PowerDNS API URL is empty")]
    MissingUrl,
    #[error("PowerDNS API URL must be http:// or https://, got '{0}'")]
    UnsupportedScheme(String),
    #[error("PowerDNS timeout must be greater than zero")]
    ZeroTimeout,
}
