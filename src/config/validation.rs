use crate::config::types::{Config, CrawlerConfig, HttpConfig, OutputConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_http_config(&config.http)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawl policy configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // min_words = 0 is allowed: every non-empty page is then accepted
    if config.min_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "min_pages must be >= 1, got {}",
            config.min_pages
        )));
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.pages_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "pages_dir cannot be empty".to_string(),
        ));
    }

    if config.index_path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "index_path cannot be empty".to_string(),
        ));
    }

    if config.index_path == config.pages_dir {
        return Err(ConfigError::Validation(format!(
            "index_path and pages_dir must differ, both are '{}'",
            config.index_path.display()
        )));
    }

    Ok(())
}
