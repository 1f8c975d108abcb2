//! Modeling configuration
//!
//! The sample interval and wavelet duration are shared by the geometry,
//! wavelet and convolution stages. They travel as an explicit value so each
//! request stays self-contained.

use crate::error::{ModelrError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// Defaults
// ============================================================================

/// Default sample interval (1 ms)
pub const DEFAULT_DT: f64 = 0.001;

/// Default wavelet duration (200 ms)
pub const DEFAULT_WAVELET_DURATION: f64 = 0.2;

/// Default cap on layer-model cells (samples x traces)
pub const DEFAULT_MAX_GRID_CELLS: usize = 4_000_000;

/// Default cap on amplitude-volume cells (samples x traces x angles x frequencies)
pub const DEFAULT_MAX_VOLUME_CELLS: usize = 50_000_000;

fn default_dt() -> f64 {
    DEFAULT_DT
}

fn default_wavelet_duration() -> f64 {
    DEFAULT_WAVELET_DURATION
}

fn default_max_grid_cells() -> usize {
    DEFAULT_MAX_GRID_CELLS
}

fn default_max_volume_cells() -> usize {
    DEFAULT_MAX_VOLUME_CELLS
}

// ============================================================================
// ModelingConfig
// ============================================================================

/// Sampling and resource limits for one modeling request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelingConfig {
    /// Sample interval in seconds
    #[serde(default = "default_dt")]
    pub dt: f64,
    /// Total wavelet length in seconds
    #[serde(default = "default_wavelet_duration")]
    pub wavelet_duration: f64,
    /// Largest layer model accepted, in cells
    #[serde(default = "default_max_grid_cells")]
    pub max_grid_cells: usize,
    /// Largest amplitude volume accepted, in cells
    #[serde(default = "default_max_volume_cells")]
    pub max_volume_cells: usize,
}

impl Default for ModelingConfig {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            wavelet_duration: DEFAULT_WAVELET_DURATION,
            max_grid_cells: DEFAULT_MAX_GRID_CELLS,
            max_volume_cells: DEFAULT_MAX_VOLUME_CELLS,
        }
    }
}

impl ModelingConfig {
    /// Load configuration from a `.toml` or `.json` file and validate it
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let config: ModelingConfig = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            _ => toml::from_str(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ModelingConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(ModelrError::InvalidConfig {
                reason: format!("dt must be positive, got {}", self.dt),
            });
        }
        if !(self.wavelet_duration.is_finite() && self.wavelet_duration > 0.0) {
            return Err(ModelrError::InvalidConfig {
                reason: format!(
                    "wavelet_duration must be positive, got {}",
                    self.wavelet_duration
                ),
            });
        }
        if self.wavelet_duration < 2.0 * self.dt {
            return Err(ModelrError::InvalidConfig {
                reason: format!(
                    "wavelet_duration ({}) must span at least two samples of dt ({})",
                    self.wavelet_duration, self.dt
                ),
            });
        }
        if self.max_grid_cells == 0 || self.max_volume_cells == 0 {
            return Err(ModelrError::InvalidConfig {
                reason: "cell limits must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Sample interval in milliseconds
    pub fn dt_ms(&self) -> f64 {
        self.dt * 1000.0
    }

    /// Nyquist frequency in Hz
    pub fn nyquist(&self) -> f64 {
        0.5 / self.dt
    }

    /// Convert a two-way time in milliseconds to a whole number of samples
    ///
    /// Rounds half away from zero. Callers validate the sign first.
    pub fn ms_to_samples(&self, ms: f64) -> usize {
        (ms / self.dt_ms()).round().max(0.0) as usize
    }

    /// Number of wavelet samples on each side of time zero
    pub fn wavelet_half_length(&self) -> usize {
        (self.wavelet_duration / (2.0 * self.dt)).round() as usize
    }

    /// Total wavelet length in samples (always odd)
    pub fn wavelet_len(&self) -> usize {
        2 * self.wavelet_half_length() + 1
    }
}
