//! Application configuration

use crate::cli::Cli;
use riskwatch_classifiers::ClassifierSettings;
use riskwatch_monitor::DEFAULT_WINDOW_CAPACITY;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Contents of `riskwatch.yaml`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Classifier model settings
    #[serde(default)]
    pub classifier: ClassifierSettings,

    /// Feed handling
    #[serde(default)]
    pub monitor: MonitorSettings,
}

impl AppConfig {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Load configuration from file and CLI overrides.
    ///
    /// A missing file yields the defaults.
    pub fn load(config_path: &str, cli: &Cli) -> anyhow::Result<Self> {
        let mut config = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            Self::from_yaml(&content)?
        } else {
            debug!(path = config_path, "No configuration file, using defaults");
            Self::default()
        };

        if let Some(model) = &cli.model {
            config.classifier.model = model.clone();
        }

        Ok(config)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitorSettings {
    /// Incidents kept by `merge`
    #[serde(default = "default_window_capacity")]
    pub window_capacity: usize,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            window_capacity: default_window_capacity(),
        }
    }
}

fn default_window_capacity() -> usize {
    DEFAULT_WINDOW_CAPACITY
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn test_defaults_from_empty_yaml() {
        let config = AppConfig::from_yaml("{}").unwrap();
        assert_eq!(config.monitor.window_capacity, 100);
        assert_eq!(config.classifier.model, ClassifierSettings::default().model);
    }

    #[test]
    fn test_partial_yaml() {
        let config = AppConfig::from_yaml(
            r#"
classifier:
  model: gemini-test
  timeout_secs: 5
monitor:
  window_capacity: 25
"#,
        )
        .unwrap();

        assert_eq!(config.classifier.model, "gemini-test");
        assert_eq!(config.classifier.timeout_secs, 5);
        assert_eq!(config.monitor.window_capacity, 25);
    }

    #[test]
    fn test_load_applies_cli_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "classifier:\n  model: from-file").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let cli = Cli::parse_from(["riskwatch", "--model", "from-cli", "classify", "hi"]);
        let config = AppConfig::load(&path, &cli).unwrap();
        assert_eq!(config.classifier.model, "from-cli");

        let cli = Cli::parse_from(["riskwatch", "classify", "hi"]);
        let config = AppConfig::load(&path, &cli).unwrap();
        assert_eq!(config.classifier.model, "from-file");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let cli = Cli::parse_from(["riskwatch", "monitor", "--data", "feed.json"]);
        let config = AppConfig::load("/nonexistent/riskwatch.yaml", &cli).unwrap();
        assert_eq!(config.monitor.window_capacity, DEFAULT_WINDOW_CAPACITY);
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "monitor: [not, a, map]").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let cli = Cli::parse_from(["riskwatch", "monitor", "--data", "feed.json"]);
        assert!(AppConfig::load(&path, &cli).is_err());
    }
}
