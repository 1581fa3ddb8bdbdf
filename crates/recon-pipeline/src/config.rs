//! Admission and fan-out configuration.

use crate::error::PipelineResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the admission and fan-out stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Bounded channel capacity per consumer (default: 64).
    #[serde(default = "default_queue_depth")]
    pub queue_depth: usize,

    /// Refuse envelopes whose tag is not trusted.
    #[serde(default)]
    pub trusted_only: bool,

    /// Require DNS names to sit within their domain.
    #[serde(default)]
    pub check_containment: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            queue_depth: default_queue_depth(),
            trusted_only: false,
            check_containment: false,
        }
    }
}

impl PipelineConfig {
    /// Load config from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> PipelineResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from TOML text.
    pub fn from_toml(content: &str) -> PipelineResult<Self> {
        let config: Self = toml::from_str(content)?;
        if config.queue_depth == 0 {
            return Err(crate::PipelineError::Config(
                "queue_depth must be at least 1".into(),
            ));
        }
        Ok(config)
    }
}

const fn default_queue_depth() -> usize {
    64
}
