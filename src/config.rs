//! Configuration loading and management

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::detect::Thresholds;
use crate::landmarks::FrameSize;

/// Environment variable naming a TOML config file
pub const CONFIG_ENV: &str = "REST_ACTION_CONFIG";

/// Detector configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seconds before a session without completion times out
    pub timeout_secs: u64,

    /// Capture resolution the pixel thresholds are tuned for
    pub frame: FrameSize,

    /// Landmarks below this visibility are treated as missing
    pub min_visibility: f32,

    pub thresholds: Thresholds,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout_secs: 60,
            frame: FrameSize::default(),
            min_visibility: 0.5,
            thresholds: Thresholds::default(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from `$REST_ACTION_CONFIG`, or
    /// fall back to defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        let config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML config file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Reject settings the detectors cannot work with
    pub fn validate(&self) -> Result<()> {
        let t = &self.thresholds;
        ensure!(self.timeout_secs > 0, "timeout_secs must be positive");
        ensure!(
            self.frame.width > 0 && self.frame.height > 0,
            "frame size must be non-zero, got {}x{}",
            self.frame.width,
            self.frame.height
        );
        ensure!(
            (0.0..=1.0).contains(&self.min_visibility),
            "min_visibility must be within [0, 1], got {}",
            self.min_visibility
        );
        ensure!(
            t.near_px > 0.0 && t.near_px < t.far_px,
            "near_px ({}) must be positive and below far_px ({})",
            t.near_px,
            t.far_px
        );
        ensure!(
            t.drink_hold_secs > 0.0 && t.absence_secs > 0.0 && t.stretch_hold_secs > 0.0,
            "hold durations must be positive"
        );
        ensure!(t.raise_margin_px >= 0, "raise_margin_px must not be negative");
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.frame, FrameSize { width: 640, height: 480 });
        assert_eq!(config.thresholds.near_px, 50.0);
        assert_eq!(config.thresholds.far_px, 80.0);
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            timeout_secs = 90

            [frame]
            width = 1280

            [thresholds]
            absence_secs = 8.0
            "#,
        )
        .unwrap();

        assert_eq!(config.timeout_secs, 90);
        assert_eq!(config.frame.width, 1280);
        assert_eq!(config.frame.height, 480);
        assert_eq!(config.thresholds.absence_secs, 8.0);
        assert_eq!(config.thresholds.stretch_hold_secs, 1.5);
        assert_eq!(config.min_visibility, 0.5);
    }

    #[test]
    fn test_validate_rejects_collapsed_band() {
        let mut config = Config::default();
        config.thresholds.near_px = 80.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("near_px"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.thresholds.stretch_hold_secs = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.min_visibility = 1.5;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.frame.height = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("detector.toml");

        let mut config = Config::default();
        config.timeout_secs = 30;
        config.thresholds.raise_margin_px = 70;
        std::fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(Some(dir.path().join("absent.toml").as_path())).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }
}
