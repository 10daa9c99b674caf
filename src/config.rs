use crate::error::{AppError, Result};
use crate::run::aggregator::DEFAULT_MAX_UNKNOWN_SAMPLES;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Window throughput, in percent, below which a pause is reported as a bottleneck.
    #[serde(default = "default_threshold")]
    pub bottleneck_throughput_threshold: f64,

    #[serde(default = "default_max_unknown_samples")]
    pub max_unknown_samples: usize,

    #[serde(default)]
    pub export_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bottleneck_throughput_threshold: default_threshold(),
            max_unknown_samples: default_max_unknown_samples(),
            export_dir: None,
        }
    }
}

fn default_threshold() -> f64 {
    90.0
}

fn default_max_unknown_samples() -> usize {
    DEFAULT_MAX_UNKNOWN_SAMPLES
}

impl Config {
    /// Reads `path` when given, else the per-user config file if one exists, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => Ok(Config::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Config> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Config> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "gclog", "gclog")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.bottleneck_throughput_threshold) {
            return Err(AppError::Config(format!(
                "bottleneck_throughput_threshold must be between 0 and 100, got {}",
                self.bottleneck_throughput_threshold
            )));
        }
        Ok(())
    }

    /// Export directory with `~` expanded.
    pub fn export_dir(&self) -> Option<PathBuf> {
        self.export_dir
            .as_deref()
            .map(|dir| PathBuf::from(shellexpand::tilde(dir).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.bottleneck_throughput_threshold, 90.0);
        assert_eq!(config.max_unknown_samples, 10);
        assert!(config.export_dir().is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml_str("bottleneck_throughput_threshold = 75.5\n").unwrap();
        assert_eq!(config.bottleneck_throughput_threshold, 75.5);
        assert_eq!(config.max_unknown_samples, 10);

        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_rejects_out_of_range_threshold() {
        let err = Config::from_toml_str("bottleneck_throughput_threshold = 150.0").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = Config::from_toml_str("max_unknown_samples = \"many\"").unwrap_err();
        assert!(matches!(err, AppError::Toml(_)));
    }

    #[test]
    fn test_export_dir_expands_tilde() {
        let config = Config {
            export_dir: Some("~/gc-exports".to_string()),
            ..Config::default()
        };
        let dir = config.export_dir().unwrap();
        assert!(dir.ends_with("gc-exports"));
        assert!(!dir.to_string_lossy().starts_with('~') || std::env::var("HOME").is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = Config::load(Some(Path::new("/nonexistent/gclog.toml"))).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
