use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::gesture::DEFAULT_DRAG_THRESHOLD;
use crate::stack::{DismissPolicy, Timing};

pub const DEFAULT_VERIFY_URL: &str = "http://localhost:4000";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub verify_url: String,
    /// Columns a card must be dragged before it counts as a swipe.
    pub drag_threshold: i32,
    pub removal_delay_ms: u64,
    pub recycle_delay_ms: u64,
    pub recycle_settle_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        let partition = Timing::partition();
        let recycle = Timing::recycle();
        Self {
            verify_url: DEFAULT_VERIFY_URL.to_string(),
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            removal_delay_ms: partition.removal_delay.as_millis() as u64,
            recycle_delay_ms: recycle.removal_delay.as_millis() as u64,
            recycle_settle_ms: recycle.settle.as_millis() as u64,
        }
    }
}

impl Config {
    pub fn default_path() -> PathBuf {
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "swipehire") {
            proj_dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("swipehire.toml")
        }
    }

    /// Reads `path` if it exists, then applies environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            Self::parse(&raw).with_context(|| format!("Invalid config: {}", path.display()))?
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var("SWIPEHIRE_VERIFY_URL") {
            config.verify_url = url;
        }
        Ok(config)
    }

    fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn timing(&self, policy: DismissPolicy) -> Timing {
        match policy {
            DismissPolicy::Partition => Timing {
                removal_delay: Duration::from_millis(self.removal_delay_ms),
                settle: Duration::ZERO,
            },
            DismissPolicy::Recycle => Timing {
                removal_delay: Duration::from_millis(self.recycle_delay_ms),
                settle: Duration::from_millis(self.recycle_settle_ms),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_controller_timing() {
        let config = Config::default();
        assert_eq!(config.timing(DismissPolicy::Partition), Timing::partition());
        assert_eq!(config.timing(DismissPolicy::Recycle), Timing::recycle());
        assert_eq!(config.verify_url, DEFAULT_VERIFY_URL);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::parse("drag_threshold = 20\n").unwrap();
        assert_eq!(config.drag_threshold, 20);
        assert_eq!(config.removal_delay_ms, 10);
        assert_eq!(config.verify_url, DEFAULT_VERIFY_URL);
    }

    #[test]
    fn test_bad_type_is_error() {
        assert!(Config::parse("drag_threshold = \"wide\"").is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = std::env::temp_dir().join("swipehire-no-such-config.toml");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.drag_threshold, DEFAULT_DRAG_THRESHOLD);
    }
}
