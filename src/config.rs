//! Top-level board configuration.
//!
//! Configuration is stored in `.vendor-board/config.yaml` and includes:
//! - The pointer distance that turns a press into a drag
//! - The timeout applied to each status update call
//! - The location of the assessments data file

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, Result};
use crate::paths::{config_path, default_data_file};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoardConfig {
    /// Minimum pointer travel (in layout units) before a press becomes a drag
    #[serde(default = "default_activation_distance")]
    pub activation_distance: f64,

    /// Status update timeout in seconds (default: 30, 0 = no timeout)
    #[serde(default = "default_commit_timeout")]
    pub commit_timeout_secs: u64,

    /// Assessments data file (default: `<root>/assessments.yaml`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

fn default_activation_distance() -> f64 {
    8.0
}

fn default_commit_timeout() -> u64 {
    30
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            activation_distance: default_activation_distance(),
            commit_timeout_secs: default_commit_timeout(),
            data_file: None,
        }
    }
}

impl BoardConfig {
    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = config_path();
        if !path.exists() {
            return Ok(BoardConfig::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            BoardError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(BoardConfig::default());
        }
        let config: BoardConfig = serde_yaml_ng::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.activation_distance.is_finite() || self.activation_distance < 0.0 {
            return Err(BoardError::Config(format!(
                "activation_distance must be a non-negative number, got {}",
                self.activation_distance
            )));
        }
        Ok(())
    }

    /// Timeout for a single update call, `None` when disabled
    pub fn commit_timeout(&self) -> Option<Duration> {
        match self.commit_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Resolved assessments data file path
    pub fn data_file(&self) -> PathBuf {
        self.data_file.clone().unwrap_or_else(default_data_file)
    }
}
