// src/pipeline/validate.rs

use crate::error::Result;
use crate::models::Config;
use crate::services::KNOWN_SHOWS;

/// Validate configuration and log the effective settings.
pub fn run_validate(config: &Config) -> Result<()> {
    log::info!("Validating configuration...");

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }

    let feed_url = if config.source.feed_url.is_empty() {
        "(not set)"
    } else {
        config.source.feed_url.as_str()
    };
    log::info!("✓ Config OK");
    log::info!("    Feed URL: {}", feed_url);
    log::info!("    Timeout: {}s", config.source.timeout_secs);
    log::info!("    Output: {}", config.output.dir);
    log::info!("    Aggregate feed: {}", config.output.all_shows_file);
    log::info!("    Known shows: {}", KNOWN_SHOWS.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default() {
        assert!(run_validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_reports_errors() {
        let mut config = Config::default();
        config.source.timeout_secs = 0;
        assert!(run_validate(&config).is_err());
    }
}
