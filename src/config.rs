//! Configuration types and validation for the pipeline
//! Author: kartik4091
//! Created: 2025-06-07

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration for the link annotation cleaner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerConfig {
    /// Delete removed annotation objects that nothing references anymore
    pub prune_orphans: bool,
    /// Maximum pruning passes before giving up on the fixpoint
    pub max_prune_passes: usize,
}

/// Global pipeline execution config
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    pub cleaner: CleanerConfig,
    /// Re-read the output file and check its header after writing
    pub verify_output: bool,
}

// Defaults
impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            prune_orphans: true,
            max_prune_passes: 16,
        }
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            cleaner: CleanerConfig::default(),
            verify_output: false,
        }
    }
}

impl ProcessingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.cleaner.max_prune_passes == 0 {
            return Err(Error::ConfigError(
                "max_prune_passes must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
