//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Source feed location and HTTP settings
    #[serde(default)]
    pub source: SourceConfig,

    /// Where and how generated feeds are written
    #[serde(default)]
    pub output: OutputConfig,

    /// Channel metadata for generated feeds
    #[serde(default)]
    pub channel: ChannelConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Apply overrides from process environment variables.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|name| std::env::var(name).ok());
    }

    /// Apply overrides using the given variable lookup.
    ///
    /// Recognized variables: `FEED_URL`, `OUTPUT_DIR`, `FEED_TIMEOUT_SECS`, `LOG_LEVEL`.
    /// Empty values and unparsable numbers are ignored.
    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(url) = var("FEED_URL") {
            self.source.feed_url = url;
        }
        if let Some(dir) = var("OUTPUT_DIR") {
            self.output.dir = dir;
        }
        if let Some(timeout) = var("FEED_TIMEOUT_SECS") {
            match timeout.trim().parse() {
                Ok(secs) => self.source.timeout_secs = secs,
                Err(e) => log::warn!("Ignoring FEED_TIMEOUT_SECS={timeout:?}: {e}"),
            }
        }
        if let Some(level) = var("LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.source.user_agent.trim().is_empty() {
            return Err(AppError::validation("source.user_agent is empty"));
        }
        if self.source.timeout_secs == 0 {
            return Err(AppError::validation("source.timeout_secs must be > 0"));
        }
        if !self.source.feed_url.is_empty() {
            url::Url::parse(&self.source.feed_url).map_err(|e| {
                AppError::validation(format!(
                    "source.feed_url {:?} is not a valid URL: {e}",
                    self.source.feed_url
                ))
            })?;
        }
        if self.output.dir.trim().is_empty() {
            return Err(AppError::validation("output.dir is empty"));
        }
        if self.output.max_concurrent_writes == 0 {
            return Err(AppError::validation(
                "output.max_concurrent_writes must be > 0",
            ));
        }
        validate_file_name("output.all_shows_file", &self.output.all_shows_file)?;
        if !self.output.all_shows_file.ends_with(".xml") {
            return Err(AppError::validation(
                "output.all_shows_file must end with .xml",
            ));
        }
        validate_file_name("output.manifest_file", &self.output.manifest_file)?;
        url::Url::parse(&self.channel.link).map_err(|e| {
            AppError::validation(format!(
                "channel.link {:?} is not a valid URL: {e}",
                self.channel.link
            ))
        })?;
        if self.channel.all_shows_title.trim().is_empty() {
            return Err(AppError::validation("channel.all_shows_title is empty"));
        }
        Ok(())
    }
}

fn validate_file_name(field: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AppError::validation(format!("{field} is empty")));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(AppError::validation(format!(
            "{field} must be a bare file name, got {name:?}"
        )));
    }
    Ok(())
}

/// Source feed settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// URL of the aggregated newsletter feed (empty until configured)
    #[serde(default)]
    pub feed_url: String,

    /// User-Agent header for the fetch request
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            feed_url: String::new(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory (or object prefix) receiving the generated feeds
    #[serde(default = "defaults::output_dir")]
    pub dir: String,

    /// File name of the aggregate feed
    #[serde(default = "defaults::all_shows_file")]
    pub all_shows_file: String,

    /// File name of the JSON manifest
    #[serde(default = "defaults::manifest_file")]
    pub manifest_file: String,

    #[serde(default = "defaults::write_manifest")]
    pub write_manifest: bool,

    /// Maximum feed documents written at once
    #[serde(default = "defaults::max_concurrent_writes")]
    pub max_concurrent_writes: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: defaults::output_dir(),
            all_shows_file: defaults::all_shows_file(),
            manifest_file: defaults::manifest_file(),
            write_manifest: defaults::write_manifest(),
            max_concurrent_writes: defaults::max_concurrent_writes(),
        }
    }
}

/// Channel metadata written into every generated feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChannelConfig {
    /// `<link>` of every channel
    #[serde(default = "defaults::channel_link")]
    pub link: String,

    /// Title of the aggregate feed
    #[serde(default = "defaults::all_shows_title")]
    pub all_shows_title: String,

    /// Description of the aggregate feed
    #[serde(default = "defaults::all_shows_description")]
    pub all_shows_description: String,

    /// Description of a per-show feed; `{title}` is replaced by the show title
    #[serde(default = "defaults::show_description")]
    pub show_description: String,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            link: defaults::channel_link(),
            all_shows_title: defaults::all_shows_title(),
            all_shows_description: defaults::all_shows_description(),
            show_description: defaults::show_description(),
        }
    }
}

impl ChannelConfig {
    /// Channel description for a show with the given display title.
    pub fn describe_show(&self, title: &str) -> String {
        self.show_description.replace("{title}", title)
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log filter when `RUST_LOG` is unset
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    // Source defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; feedsplit/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Output defaults
    pub fn output_dir() -> String {
        "feeds".into()
    }
    pub fn all_shows_file() -> String {
        "all-shows.xml".into()
    }
    pub fn manifest_file() -> String {
        "manifest.json".into()
    }
    pub fn write_manifest() -> bool {
        true
    }
    pub fn max_concurrent_writes() -> usize {
        4
    }

    // Channel defaults
    pub fn channel_link() -> String {
        "https://www.dropout.tv".into()
    }
    pub fn all_shows_title() -> String {
        "Dropout - All Shows".into()
    }
    pub fn all_shows_description() -> String {
        "Every Dropout episode from the newsletter feed".into()
    }
    pub fn show_description() -> String {
        "{title} episodes from the Dropout newsletter feed".into()
    }

    pub fn log_level() -> String {
        "info".into()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.source.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_write_concurrency() {
        let mut config = Config::default();
        config.output.max_concurrent_writes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_relative_feed_url() {
        let mut config = Config::default();
        config.source.feed_url = "kill-the-newsletter.com/feeds/abc.xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_nested_aggregate_file() {
        let mut config = Config::default();
        config.output.all_shows_file = "nested/all-shows.xml".to_string();
        assert!(config.validate().is_err());

        config.output.all_shows_file = "all-shows.rss".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [source]
            feed_url = "https://kill-the-newsletter.com/feeds/abc.xml"

            [output]
            dir = "public"
            "#,
        )
        .unwrap();

        assert_eq!(config.output.dir, "public");
        assert_eq!(config.output.all_shows_file, "all-shows.xml");
        assert_eq!(config.source.timeout_secs, 30);
        assert_eq!(config.channel.all_shows_title, "Dropout - All Shows");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = Config::default();
        config.apply_env_with(lookup_from(&[
            ("FEED_URL", "https://kill-the-newsletter.com/feeds/xyz.xml"),
            ("OUTPUT_DIR", "out"),
            ("FEED_TIMEOUT_SECS", "5"),
        ]));

        assert_eq!(
            config.source.feed_url,
            "https://kill-the-newsletter.com/feeds/xyz.xml"
        );
        assert_eq!(config.output.dir, "out");
        assert_eq!(config.source.timeout_secs, 5);
    }

    #[test]
    fn env_overrides_ignore_blank_and_invalid_values() {
        let mut config = Config::default();
        config.apply_env_with(lookup_from(&[("OUTPUT_DIR", " "), ("FEED_TIMEOUT_SECS", "soon")]));

        assert_eq!(config.output.dir, "feeds");
        assert_eq!(config.source.timeout_secs, 30);
    }

    #[test]
    fn describe_show_fills_placeholder() {
        let channel = ChannelConfig::default();
        assert_eq!(
            channel.describe_show("Game Changer"),
            "Game Changer episodes from the Dropout newsletter feed"
        );
    }
}
