//! Wavelet Generator
//!
//! Zero-phase source pulses sampled on the shared time axis.

use crate::config::ModelingConfig;
use crate::error::{ModelrError, Result};
use serde::Serialize;
use std::f64::consts::PI;

/// Ricker amplitude at time `t` (seconds) for peak frequency `f` (Hz)
#[inline]
pub fn ricker_amplitude(f: f64, t: f64) -> f64 {
    let arg = (PI * f * t).powi(2);
    (1.0 - 2.0 * arg) * (-arg).exp()
}

/// A sampled source wavelet centered at time zero
///
/// The sample count is always odd; the middle sample is time zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wavelet {
    samples: Vec<f64>,
    dt: f64,
    frequency: f64,
}

impl Wavelet {
    /// Ricker (Mexican hat) wavelet
    ///
    /// # Arguments
    /// * `frequency` - Peak frequency in Hz, positive and below Nyquist
    /// * `config` - Supplies the sample interval and wavelet duration
    ///
    /// # Example
    /// ```
    /// use modelr::{ModelingConfig, Wavelet};
    ///
    /// let config = ModelingConfig::default();
    /// let w = Wavelet::ricker(25.0, &config).unwrap();
    /// assert_eq!(w.len(), config.wavelet_len());
    /// assert_eq!(w.samples()[w.center()], 1.0);
    /// ```
    pub fn ricker(frequency: f64, config: &ModelingConfig) -> Result<Self> {
        if !frequency.is_finite() || frequency <= 0.0 {
            return Err(ModelrError::InvalidWaveletParameter {
                param: "frequency".to_string(),
                value: frequency,
                reason: "must be positive".to_string(),
            });
        }
        if frequency >= config.nyquist() {
            return Err(ModelrError::InvalidWaveletParameter {
                param: "frequency".to_string(),
                value: frequency,
                reason: format!("must be below Nyquist ({} Hz)", config.nyquist()),
            });
        }

        let half = config.wavelet_half_length() as isize;
        let samples = (-half..=half)
            .map(|i| ricker_amplitude(frequency, i as f64 * config.dt))
            .collect();

        Ok(Self {
            samples,
            dt: config.dt,
            frequency,
        })
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Index of the time-zero sample
    pub fn center(&self) -> usize {
        self.samples.len() / 2
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Peak frequency in Hz
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Sample times in seconds, from -duration/2 to +duration/2
    pub fn time_axis(&self) -> Vec<f64> {
        let half = self.center() as isize;
        (-half..=half).map(|i| i as f64 * self.dt).collect()
    }
}
