use std::env;

use thiserror::Error;

use crate::config_env::{optional_trimmed_env, parse_optional_u64_env};
use crate::llm::PerplexityGatewayConfig;
use crate::pages::Presentation;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_SESSION_IDLE_TTL_SECS: u64 = 30 * 60;
const DEFAULT_SESSION_PRUNE_INTERVAL_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: String,
    pub presentation: Presentation,
    pub gateway: PerplexityGatewayConfig,
    /// Sessions untouched for this long are dropped, credential included.
    pub session_idle_ttl_secs: u64,
    pub session_prune_interval_secs: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid integer in env var {0}")]
    ParseInt(String),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("failed to load .env file: {0}")]
    Dotenv(String),
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let presentation = match optional_trimmed_env("DRHOME_PRESENTATION") {
            Some(raw) => raw.parse::<Presentation>().map_err(|_| {
                ConfigError::InvalidConfiguration(format!(
                    "DRHOME_PRESENTATION must be 'basic' or 'enhanced', got '{raw}'"
                ))
            })?,
            None => Presentation::Enhanced,
        };

        let mut gateway = PerplexityGatewayConfig::default();
        if let Some(url) = optional_trimmed_env("PERPLEXITY_CHAT_COMPLETIONS_URL") {
            gateway.chat_completions_url = validate_endpoint_url(&url)?;
        }
        if let Some(model) = optional_trimmed_env("PERPLEXITY_MODEL") {
            gateway.model = model;
        }
        gateway.timeout_ms = parse_optional_u64_env("PERPLEXITY_TIMEOUT_MS")?;

        let session_idle_ttl_secs = parse_optional_u64_env("SESSION_IDLE_TTL_SECS")?
            .unwrap_or(DEFAULT_SESSION_IDLE_TTL_SECS);
        let session_prune_interval_secs = parse_optional_u64_env("SESSION_PRUNE_INTERVAL_SECS")?
            .unwrap_or(DEFAULT_SESSION_PRUNE_INTERVAL_SECS);
        if session_idle_ttl_secs == 0 || session_prune_interval_secs == 0 {
            return Err(ConfigError::InvalidConfiguration(
                "SESSION_IDLE_TTL_SECS and SESSION_PRUNE_INTERVAL_SECS must be greater than 0"
                    .to_string(),
            ));
        }

        Ok(Self {
            bind_addr: env::var("API_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            presentation,
            gateway,
            session_idle_ttl_secs,
            session_prune_interval_secs,
        })
    }
}

/// Loads `.env` from the working directory when one exists.
pub fn load_dotenv() -> Result<(), ConfigError> {
    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(ConfigError::Dotenv(err.to_string())),
    }
}

fn validate_endpoint_url(raw: &str) -> Result<String, ConfigError> {
    let parsed = url::Url::parse(raw).map_err(|err| {
        ConfigError::InvalidConfiguration(format!(
            "PERPLEXITY_CHAT_COMPLETIONS_URL is not a valid url: {err}"
        ))
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidConfiguration(
            "PERPLEXITY_CHAT_COMPLETIONS_URL must start with http:// or https://".to_string(),
        ));
    }

    Ok(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::validate_endpoint_url;

    #[test]
    fn accepts_http_and_https_endpoints() {
        assert!(validate_endpoint_url("https://api.perplexity.ai/chat/completions").is_ok());
        assert!(validate_endpoint_url("http://127.0.0.1:9000/chat/completions").is_ok());
    }

    #[test]
    fn rejects_non_http_endpoints() {
        assert!(validate_endpoint_url("ftp://example.com/chat").is_err());
        assert!(validate_endpoint_url("not a url").is_err());
    }
}
