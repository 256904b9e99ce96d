//! Render configuration
//!
//! Settings can come from a JSON file and be overridden on the command line.

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::engine::buffer::{validate_sample_rate, DEFAULT_SAMPLE_RATE};
use crate::error::{Result, WavError};

/// Render configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output sample rate in Hz (default: 44100)
    pub sample_rate: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

impl RenderConfig {
    /// Create a configuration with the given sample rate
    pub fn new(sample_rate: u32) -> Result<Self> {
        let config = RenderConfig { sample_rate };
        config.validate()?;
        Ok(config)
    }

    /// CD quality (44.1kHz)
    pub fn cd_quality() -> Self {
        RenderConfig {
            sample_rate: 44100,
        }
    }

    /// Video/broadcast rate (48kHz)
    pub fn broadcast() -> Self {
        RenderConfig {
            sample_rate: 48000,
        }
    }

    /// Check the settings can be rendered and written
    pub fn validate(&self) -> Result<()> {
        validate_sample_rate(self.sample_rate)
    }

    /// Load a configuration from a JSON file
    ///
    /// Missing fields fall back to their defaults.
    ///
    /// # Errors
    /// * `FileNotFound` - if the file does not exist
    /// * `Serialization` - if the JSON is malformed
    /// * `InvalidSampleRate` - if the loaded rate is unusable
    pub fn from_json_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(WavError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let text = std::fs::read_to_string(path)?;
        let config: RenderConfig = serde_json::from_str(&text)?;
        config.validate()?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply command-line overrides
    pub fn with_sample_rate(mut self, sample_rate: Option<u32>) -> Result<Self> {
        if let Some(rate) = sample_rate {
            self.sample_rate = rate;
        }
        self.validate()?;
        Ok(self)
    }
}
