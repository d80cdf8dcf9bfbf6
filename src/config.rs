//! Configuration for figure generation.
//!
//! Every field has a default, so an empty file (or no file) reproduces the
//! stock figures.
//!
//! # TOML Structure
//!
//! ```toml
//! [clusters]
//! seed = 42
//! points_per_cluster = 60
//! label_every_n = 12
//! draw_arrows = false
//! jitter = 0.8
//!
//! [output]
//! width = 1200
//! height = 900
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{EmbedplotError, Result};

/// Largest accepted `points_per_cluster`
pub const MAX_POINTS_PER_CLUSTER: usize = 100_000;

/// Root configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Synthetic cluster figure settings
    #[serde(default)]
    pub clusters: ClusterConfig,

    /// Output size overrides
    #[serde(default)]
    pub output: OutputConfig,
}

/// Settings for the synthetic cluster figure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClusterConfig {
    /// RNG seed; the same seed always yields the same points
    pub seed: u64,
    /// Points per cluster, seed words included
    pub points_per_cluster: usize,
    /// Label every N-th point to keep the chart readable
    pub label_every_n: usize,
    /// Draw an arrow from the origin to every point
    pub draw_arrows: bool,
    /// Standard deviation of the Gaussian noise around each centre
    pub jitter: f64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            points_per_cluster: 60,
            label_every_n: 12,
            draw_arrows: false,
            jitter: 0.8,
        }
    }
}

impl ClusterConfig {
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.label_every_n == 0 {
            return Err("label_every_n must be at least 1".to_string());
        }
        if self.points_per_cluster > MAX_POINTS_PER_CLUSTER {
            return Err(format!(
                "points_per_cluster must be at most {}, got {}",
                MAX_POINTS_PER_CLUSTER, self.points_per_cluster
            ));
        }
        if !self.jitter.is_finite() || self.jitter < 0.0 {
            return Err(format!(
                "jitter must be a finite, non-negative number, got {}",
                self.jitter
            ));
        }
        Ok(())
    }
}

/// Output size overrides; unset fields keep each figure's natural size
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl OutputConfig {
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.width == Some(0) || self.height == Some(0) {
            return Err("width and height must be greater than zero".to_string());
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// - `EmbedplotError::ConfigError` if the file cannot be read or parsed
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let contents = std::fs::read_to_string(path).map_err(|e| {
            EmbedplotError::ConfigError(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&contents).map_err(|e| {
            EmbedplotError::ConfigError(format!(
                "Failed to parse TOML in '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from a TOML string.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml)
            .map_err(|e| EmbedplotError::ConfigError(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| EmbedplotError::ConfigError(format!("Failed to serialize to TOML: {}", e)))
    }

    /// Validate all configuration values, returning the first error found.
    pub fn validate(&self) -> Result<()> {
        self.clusters
            .validate()
            .map_err(|e| EmbedplotError::ConfigError(format!("[clusters] {}", e)))?;
        self.output
            .validate()
            .map_err(|e| EmbedplotError::ConfigError(format!("[output] {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_stock_figure() {
        let config = Config::default();
        assert_eq!(config.clusters.seed, 42);
        assert_eq!(config.clusters.points_per_cluster, 60);
        assert_eq!(config.clusters.label_every_n, 12);
        assert!(!config.clusters.draw_arrows);
        assert_eq!(config.clusters.jitter, 0.8);
        assert_eq!(config.output.width, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = Config::from_toml_str(
            r#"
            [clusters]
            points_per_cluster = 200
            draw_arrows = true
            "#,
        )
        .unwrap();
        assert_eq!(config.clusters.points_per_cluster, 200);
        assert!(config.clusters.draw_arrows);
        assert_eq!(config.clusters.seed, 42);
        assert_eq!(config.clusters.jitter, 0.8);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = Config::from_toml_str("[clusters]\nspread = 2.0\n").unwrap_err();
        assert!(matches!(err, EmbedplotError::ConfigError(_)));
    }

    #[test]
    fn test_zero_label_every_n_rejected() {
        let err = Config::from_toml_str("[clusters]\nlabel_every_n = 0\n").unwrap_err();
        assert!(err.to_string().contains("label_every_n"));
    }

    #[test]
    fn test_negative_jitter_rejected() {
        let err = Config::from_toml_str("[clusters]\njitter = -0.5\n").unwrap_err();
        assert!(err.to_string().contains("[clusters]"));
    }

    #[test]
    fn test_huge_points_per_cluster_rejected() {
        let err = Config::from_toml_str("[clusters]\npoints_per_cluster = 4000000000000000000\n")
            .unwrap_err();
        assert!(matches!(err, EmbedplotError::ConfigError(_)));
        assert!(err.to_string().contains("points_per_cluster must be at most"));

        let config = Config::from_toml_str("[clusters]\npoints_per_cluster = 100000\n").unwrap();
        assert_eq!(config.clusters.points_per_cluster, MAX_POINTS_PER_CLUSTER);
    }

    #[test]
    fn test_zero_width_rejected() {
        let err = Config::from_toml_str("[output]\nwidth = 0\n").unwrap_err();
        assert!(err.to_string().contains("[output]"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[output]\nwidth = 1200\nheight = 900").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.output.width, Some(1200));
        assert_eq!(config.output.height, Some(900));
    }

    #[test]
    fn test_from_missing_file() {
        let err = Config::from_file("/nonexistent/embedplot.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::default();
        config.clusters.seed = 7;
        config.output.width = Some(800);
        let text = config.to_toml_string().unwrap();
        assert_eq!(Config::from_toml_str(&text).unwrap(), config);
    }
}
