//! Amplitude volume
//!
//! Synthetic amplitudes indexed (sample, trace, angle, frequency). Axes that
//! are not varied have length one.

use ndarray::Array4;
use serde::Serialize;

/// Output of the convolution stage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmplitudeVolume {
    data: Array4<f64>,
    angles: Vec<f64>,
    frequencies: Vec<f64>,
    dt: f64,
}

impl AmplitudeVolume {
    pub(crate) fn new(data: Array4<f64>, angles: Vec<f64>, frequencies: Vec<f64>, dt: f64) -> Self {
        debug_assert_eq!(data.dim().2, angles.len());
        debug_assert_eq!(data.dim().3, frequencies.len());
        Self {
            data,
            angles,
            frequencies,
            dt,
        }
    }

    pub fn data(&self) -> &Array4<f64> {
        &self.data
    }

    pub fn num_samples(&self) -> usize {
        self.data.dim().0
    }

    pub fn num_traces(&self) -> usize {
        self.data.dim().1
    }

    /// Incidence angles in degrees
    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    /// Wavelet frequencies in Hz
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Sample interval in seconds
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Index of `angle` on the angle axis
    pub fn angle_index(&self, angle: f64) -> Option<usize> {
        self.angles.iter().position(|&a| (a - angle).abs() < 1e-9)
    }

    /// Index of `frequency` on the frequency axis
    pub fn frequency_index(&self, frequency: f64) -> Option<usize> {
        self.frequencies
            .iter()
            .position(|&f| (f - frequency).abs() < 1e-9)
    }
}
