use crate::config::types::{Config, CrawlerConfig, OutputConfig, PingConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.access_key.trim().is_empty() {
        return Err(ConfigError::Validation(
            "access-key cannot be empty".to_string(),
        ));
    }

    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    validate_ping_config(&config.ping)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.domains.is_empty() {
        return Err(ConfigError::Validation(
            "at least one domain is required".to_string(),
        ));
    }

    for domain in &config.domains {
        let url = Url::parse(domain)
            .map_err(|e| ConfigError::InvalidDomain(format!("{}: {}", domain, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidDomain(format!(
                "{}: only http and https are supported",
                domain
            )));
        }
        if url.host_str().is_none() {
            return Err(ConfigError::InvalidDomain(format!(
                "{}: missing host",
                domain
            )));
        }
    }

    if config.thread_count < 1 || config.thread_count > 100 {
        return Err(ConfigError::Validation(format!(
            "thread-count must be between 1 and 100, got {}",
            config.thread_count
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    if let Some(base) = &config.url_base {
        Url::parse(base)
            .map_err(|e| ConfigError::Validation(format!("invalid url-base {}: {}", base, e)))?;
    }

    Ok(())
}

/// Validates ping configuration
fn validate_ping_config(config: &PingConfig) -> Result<(), ConfigError> {
    if config.enabled && config.endpoints.is_empty() {
        return Err(ConfigError::Validation(
            "ping is enabled but no endpoints are configured".to_string(),
        ));
    }
    Ok(())
}
