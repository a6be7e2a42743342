use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::DelayMode;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
access-key = "secret"

[crawler]
domains = ["https://example.com/"]
max-depth = 3
thread-count = 5
user-agent = "TestBot/1.0"
timeout-secs = 10

[output]
directory = "./sitemaps"
gzip = true
split-by-site = true
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.access_key, "secret");
        assert_eq!(config.crawler.max_depth, 3);
        assert_eq!(config.crawler.thread_count, 5);
        assert_eq!(config.crawler.delay_mode, DelayMode::AfterEach);
        assert!(config.crawler.honor_meta_robots);
        assert!(config.output.gzip);
        assert!(config.output.split_by_site);
        assert!(config.filters.use_filters);
        assert!(!config.ping.enabled);
    }

    #[test]
    fn test_defaults_applied() {
        let config_content = r#"
access-key = "secret"

[crawler]
domains = ["https://example.com/"]
max-depth = 2

[output]
directory = "./out"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.thread_count, 10);
        assert_eq!(config.crawler.timeout_secs, 30);
        assert_eq!(config.crawler.user_agent, "SitemillBot/1.0");
        assert_eq!(config.cache.path, "./sitemill-cache.json");
        assert!(!config.cache.resume);
        assert!(config.output.pretty);
    }

    #[test]
    fn test_delay_mode_between_batches() {
        let config_content = r#"
access-key = "secret"

[crawler]
domains = ["https://example.com/"]
max-depth = 2
delay-mode = "between-batches"

[output]
directory = "./out"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.crawler.delay_mode, DelayMode::BetweenBatches);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
access-key = "secret"

[crawler]
domains = []
max-depth = 2

[output]
directory = "./out"
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }
}
