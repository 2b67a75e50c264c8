use crate::badge::Layout;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_PROVIDER_BASE_URL: &str = "https://labs.hackthebox.com";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// Base URL of the profile provider, without a trailing slash.
    pub provider_base_url: String,
    /// Layout used when a request does not ask for one.
    pub layout: Layout,
    pub upstream_timeout: Duration,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            provider_base_url: DEFAULT_PROVIDER_BASE_URL.to_string(),
            layout: Layout::Full,
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            provider_base_url: parse_base_url(
                &std::env::var("HTB_API_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_PROVIDER_BASE_URL.to_string()),
            )?,
            layout: std::env::var("BADGE_LAYOUT")
                .unwrap_or_else(|_| "full".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("BADGE_LAYOUT must be 'full' or 'compact'"))?,
            upstream_timeout: std::env::var("UPSTREAM_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_UPSTREAM_TIMEOUT_SECS.to_string())
                .parse::<u64>()
                .map_err(|_| anyhow::anyhow!("UPSTREAM_TIMEOUT_SECS must be a whole number"))
                .and_then(|secs| {
                    if secs == 0 {
                        anyhow::bail!("UPSTREAM_TIMEOUT_SECS must be greater than zero");
                    }
                    Ok(Duration::from_secs(secs))
                })?,
            user_agent: std::env::var("HTB_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string())
                .trim()
                .to_string(),
        };

        if config.user_agent.is_empty() {
            anyhow::bail!("HTB_USER_AGENT cannot be empty");
        }

        tracing::info!("Configuration loaded successfully");
        tracing::debug!("HTB API Base URL: {}", config.provider_base_url);
        tracing::debug!("Badge layout: {}", config.layout);
        tracing::debug!("Upstream timeout: {:?}", config.upstream_timeout);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}

/// Checks that `raw` is an absolute http(s) URL and strips any trailing slash.
pub fn parse_base_url(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        anyhow::bail!("HTB_API_BASE_URL cannot be empty");
    }

    let parsed = url::Url::parse(trimmed)
        .map_err(|e| anyhow::anyhow!("HTB_API_BASE_URL is not a valid URL: {}", e))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        anyhow::bail!("HTB_API_BASE_URL must start with http:// or https://");
    }
    if parsed.host_str().is_none() {
        anyhow::bail!("HTB_API_BASE_URL must include a host");
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url_trims_trailing_slash() {
        let url = parse_base_url("https://labs.hackthebox.com/").unwrap();
        assert_eq!(url, "https://labs.hackthebox.com");
    }

    #[test]
    fn test_parse_base_url_keeps_port() {
        let url = parse_base_url("http://127.0.0.1:8080").unwrap();
        assert_eq!(url, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_parse_base_url_rejects_bad_values() {
        assert!(parse_base_url("").is_err());
        assert!(parse_base_url("   ").is_err());
        assert!(parse_base_url("labs.hackthebox.com").is_err());
        assert!(parse_base_url("ftp://labs.hackthebox.com").is_err());
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.provider_base_url, DEFAULT_PROVIDER_BASE_URL);
        assert_eq!(config.layout, Layout::Full);
        assert_eq!(config.user_agent, "Mozilla/5.0");
        assert_eq!(config.upstream_timeout, Duration::from_secs(10));
    }
}
