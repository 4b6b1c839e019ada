//! Configuration management for heartlog.
//!
//! Configuration is loaded from multiple sources with precedence:
//! 1. Environment variables (HEARTLOG_*, OPENAI_API_KEY)
//! 2. Config file (~/.heartlog/config.toml)
//! 3. Default values
//!
//! Standard directory structure:
//! ```text
//! ~/.heartlog/
//! ├── config.toml           # Main configuration
//! └── data/
//!     ├── memories.json
//!     ├── emotions.json
//!     ├── today_word.json
//!     └── images/
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Paths
    pub paths: PathsConfig,

    /// Language-model settings
    pub analyzer: AnalyzerConfig,

    /// Web server settings
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding the tables and the images/ folder
    pub data_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: default_base_dir().join("data"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Chat completions endpoint (OpenAI-compatible)
    pub api_url: String,

    /// API credential. Usually supplied through OPENAI_API_KEY.
    pub api_key: Option<String>,

    /// Model identifier
    pub model: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    pub summary: FieldConfig,
    pub emotion: FieldConfig,
    pub empathy: FieldConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com/v1/chat/completions".to_string(),
            api_key: None,
            model: "gpt-3.5-turbo".to_string(),
            timeout_secs: 30,
            summary: FieldConfig {
                max_tokens: 150,
                temperature: 0.7,
            },
            emotion: FieldConfig {
                max_tokens: 100,
                temperature: 0.7,
            },
            empathy: FieldConfig {
                max_tokens: 100,
                temperature: 0.8,
            },
        }
    }
}

impl AnalyzerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Sampling options for one analysis field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub max_tokens: u32,
    pub temperature: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the web server listens on
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8501".to_string(),
        }
    }
}

/// Base directory: HEARTLOG_DIR, otherwise ~/.heartlog
fn default_base_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("HEARTLOG_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".heartlog")
}

impl Config {
    /// Load configuration from file and environment.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| Error::storage(&config_path, e))?;
            Self::from_toml_str(&content)?
        } else {
            Config::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document; missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Get the config file path.
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("HEARTLOG_CONFIG") {
            PathBuf::from(path)
        } else {
            default_base_dir().join("config.toml")
        }
    }

    /// Apply environment-style overrides from `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("HEARTLOG_DATA_DIR") {
            self.paths.data_dir = PathBuf::from(dir);
        }
        if let Some(url) = lookup("HEARTLOG_API_URL") {
            self.analyzer.api_url = url;
        }
        if let Some(model) = lookup("HEARTLOG_MODEL") {
            self.analyzer.model = model;
        }
        if let Some(timeout) = lookup("HEARTLOG_TIMEOUT_SECS").and_then(|s| s.parse().ok()) {
            self.analyzer.timeout_secs = timeout;
        }
        let non_blank = |name: &str| lookup(name).filter(|k| !k.trim().is_empty());
        if let Some(key) = non_blank("HEARTLOG_API_KEY").or_else(|| non_blank("OPENAI_API_KEY")) {
            self.analyzer.api_key = Some(key);
        }
        if let Some(bind) = lookup("HEARTLOG_BIND") {
            self.server.bind = bind;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.analyzer.timeout_secs == 0 {
            return Err(Error::Config(
                "analyzer.timeout_secs must be greater than 0".into(),
            ));
        }

        for (field, opts) in [
            ("summary", &self.analyzer.summary),
            ("emotion", &self.analyzer.emotion),
            ("empathy", &self.analyzer.empathy),
        ] {
            if !(0.0..=2.0).contains(&opts.temperature) {
                return Err(Error::Config(format!(
                    "analyzer.{}.temperature must be between 0 and 2",
                    field
                )));
            }
        }

        Ok(())
    }

    /// Whether an API credential is configured
    pub fn has_api_key(&self) -> bool {
        self.analyzer.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.analyzer.model, "gpt-3.5-turbo");
        assert_eq!(config.analyzer.timeout_secs, 30);
        assert_eq!(config.analyzer.summary.max_tokens, 150);
        assert_eq!(config.analyzer.summary.temperature, 0.7);
        assert_eq!(config.analyzer.emotion.temperature, 0.7);
        assert_eq!(config.analyzer.empathy.temperature, 0.8);
        assert!(config.analyzer.api_key.is_none());
        assert!(config.paths.data_dir.ends_with("data"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [analyzer]
            model = "gpt-4o-mini"

            [analyzer.empathy]
            max_tokens = 60
            temperature = 1.0
            "#,
        )
        .unwrap();

        assert_eq!(config.analyzer.model, "gpt-4o-mini");
        assert_eq!(config.analyzer.empathy.max_tokens, 60);
        assert_eq!(config.analyzer.summary.max_tokens, 150);
        assert_eq!(config.server.bind, "127.0.0.1:8501");
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml_str("analyzer = 3").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("HEARTLOG_DATA_DIR", "/tmp/heartlog-data"),
            ("HEARTLOG_MODEL", "gpt-4o"),
            ("HEARTLOG_TIMEOUT_SECS", "5"),
            ("OPENAI_API_KEY", "sk-test"),
            ("HEARTLOG_BIND", "0.0.0.0:9000"),
        ]);

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.paths.data_dir, PathBuf::from("/tmp/heartlog-data"));
        assert_eq!(config.analyzer.model, "gpt-4o");
        assert_eq!(config.analyzer.timeout(), Duration::from_secs(5));
        assert_eq!(config.analyzer.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert!(config.has_api_key());
    }

    #[test]
    fn test_heartlog_key_wins_over_openai_key() {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            "HEARTLOG_API_KEY" => Some("hl-key".into()),
            "OPENAI_API_KEY" => Some("sk-key".into()),
            _ => None,
        });
        assert_eq!(config.analyzer.api_key.as_deref(), Some("hl-key"));
    }

    #[test]
    fn test_blank_key_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "OPENAI_API_KEY").then(|| "  ".to_string()));
        assert!(!config.has_api_key());

        // A blank HEARTLOG_API_KEY falls through to OPENAI_API_KEY
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            "HEARTLOG_API_KEY" => Some(String::new()),
            "OPENAI_API_KEY" => Some("sk-real".into()),
            _ => None,
        });
        assert_eq!(config.analyzer.api_key.as_deref(), Some("sk-real"));
    }

    #[test]
    fn test_validation() {
        let mut config = Config::default();
        config.analyzer.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.analyzer.empathy.temperature = 3.5;
        assert!(config.validate().is_err());
    }
}
