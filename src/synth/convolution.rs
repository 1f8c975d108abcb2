//! Convolution Engine
//!
//! Turns a layer model into synthetic traces: boundaries become reflection
//! spikes, and spikes are convolved with the source wavelet. Output traces
//! have the same length as the model's time axis, with the wavelet's
//! time-zero sample aligned on each spike.

use super::series::ReflectivitySeries;
use super::volume::AmplitudeVolume;
use crate::config::ModelingConfig;
use crate::error::{ModelrError, Result};
use crate::model::{Boundary, LayerModel};
use crate::reflectivity::ReflectivityMethod;
use crate::rock::RockProperties;
use crate::wavelet::Wavelet;
use ndarray::{s, Array2, Array4};
use tracing::{debug, warn};

/// Same-length linear convolution of `signal` with a centered `kernel`
///
/// Output sample `i` is `sum_k signal[i - k + c] * kernel[k]` with `c` the
/// kernel's middle index.
pub fn convolve_same(signal: &[f64], kernel: &[f64]) -> Vec<f64> {
    let n = signal.len();
    let center = kernel.len() / 2;
    let mut out = vec![0.0; n];

    for (j, &x) in signal.iter().enumerate() {
        if x == 0.0 {
            continue;
        }
        for (k, &w) in kernel.iter().enumerate() {
            let i = j + k;
            if i >= center && i - center < n {
                out[i - center] += x * w;
            }
        }
    }
    out
}

/// Convolve a spike series with a wavelet into a trace of the series' length
pub fn synthesize(series: &ReflectivitySeries, wavelet: &Wavelet) -> Vec<f64> {
    let n = series.num_samples();
    let center = wavelet.center();
    let samples = wavelet.samples();
    let mut trace = vec![0.0; n];

    for spike in series.spikes() {
        // wavelet index k lands on output sample spike.sample + k - center
        let k_start = center.saturating_sub(spike.sample);
        let k_end = samples.len().min(n + center - spike.sample);
        for k in k_start..k_end {
            trace[spike.sample + k - center] += spike.coefficient * samples[k];
        }
    }
    trace
}

/// Synthesizes amplitudes for one layer model, rock set and method
pub struct ConvolutionEngine<'a> {
    model: &'a LayerModel,
    rocks: &'a [RockProperties],
    method: ReflectivityMethod,
}

impl<'a> ConvolutionEngine<'a> {
    /// Create an engine, checking there is a rock for every layer
    pub fn new(
        model: &'a LayerModel,
        rocks: &'a [RockProperties],
        method: ReflectivityMethod,
    ) -> Result<Self> {
        if rocks.len() < model.num_layers() {
            return Err(ModelrError::InvalidRequest {
                reason: format!(
                    "model has {} layers but only {} rock properties were supplied",
                    model.num_layers(),
                    rocks.len()
                ),
            });
        }
        Ok(Self {
            model,
            rocks,
            method,
        })
    }

    pub fn method(&self) -> ReflectivityMethod {
        self.method
    }

    /// Reflectivity series of one trace at one angle
    pub fn reflectivity_series(&self, trace: usize, theta_deg: f64) -> Result<ReflectivitySeries> {
        self.check_trace(trace)?;
        Ok(self.series_for(&self.model.boundaries(trace), theta_deg))
    }

    /// One synthetic trace
    pub fn trace(&self, trace: usize, theta_deg: f64, wavelet: &Wavelet) -> Result<Vec<f64>> {
        let series = self.reflectivity_series(trace, theta_deg)?;
        Ok(synthesize(&series, wavelet))
    }

    /// Fixed angle across every trace: (samples x traces)
    pub fn section(&self, theta_deg: f64, wavelet: &Wavelet) -> Array2<f64> {
        self.warn_if_beyond_validity(&[theta_deg]);

        let mut section = Array2::zeros((self.model.num_samples(), self.model.num_traces()));
        for (t, mut column) in section.columns_mut().into_iter().enumerate() {
            let series = self.series_for(&self.model.boundaries(t), theta_deg);
            for (out, v) in column.iter_mut().zip(synthesize(&series, wavelet)) {
                *out = v;
            }
        }
        section
    }

    /// Fixed trace across many angles: (samples x angles)
    pub fn gather(&self, trace: usize, thetas_deg: &[f64], wavelet: &Wavelet) -> Result<Array2<f64>> {
        self.check_trace(trace)?;
        self.warn_if_beyond_validity(thetas_deg);

        let boundaries = self.model.boundaries(trace);
        let mut gather = Array2::zeros((self.model.num_samples(), thetas_deg.len()));
        for (a, mut column) in gather.columns_mut().into_iter().enumerate() {
            let series = self.series_for(&boundaries, thetas_deg[a]);
            for (out, v) in column.iter_mut().zip(synthesize(&series, wavelet)) {
                *out = v;
            }
        }
        Ok(gather)
    }

    /// Every trace, angle and wavelet: (samples x traces x angles x frequencies)
    pub fn volume(
        &self,
        thetas_deg: &[f64],
        wavelets: &[Wavelet],
        config: &ModelingConfig,
    ) -> Result<AmplitudeVolume> {
        if thetas_deg.is_empty() || wavelets.is_empty() {
            return Err(ModelrError::InvalidRequest {
                reason: "at least one angle and one wavelet are required".to_string(),
            });
        }

        let shape = (
            self.model.num_samples(),
            self.model.num_traces(),
            thetas_deg.len(),
            wavelets.len(),
        );
        let cells = shape
            .0
            .saturating_mul(shape.1)
            .saturating_mul(shape.2)
            .saturating_mul(shape.3);
        if cells > config.max_volume_cells {
            return Err(ModelrError::InvalidRequest {
                reason: format!(
                    "volume {:?} exceeds the limit of {} cells",
                    shape, config.max_volume_cells
                ),
            });
        }
        self.warn_if_beyond_validity(thetas_deg);

        let mut data = Array4::zeros(shape);
        for t in 0..shape.1 {
            let boundaries = self.model.boundaries(t);
            for (a, &theta) in thetas_deg.iter().enumerate() {
                let series = self.series_for(&boundaries, theta);
                for (f, wavelet) in wavelets.iter().enumerate() {
                    let trace = synthesize(&series, wavelet);
                    for (out, v) in data.slice_mut(s![.., t, a, f]).iter_mut().zip(trace) {
                        *out = v;
                    }
                }
            }
        }

        debug!(?shape, method = %self.method, "synthesized amplitude volume");
        Ok(AmplitudeVolume::new(
            data,
            thetas_deg.to_vec(),
            wavelets.iter().map(Wavelet::frequency).collect(),
            config.dt,
        ))
    }

    fn series_for(&self, boundaries: &[Boundary], theta_deg: f64) -> ReflectivitySeries {
        ReflectivitySeries::from_boundaries(
            boundaries,
            self.rocks,
            self.method,
            theta_deg,
            self.model.num_samples(),
        )
    }

    fn check_trace(&self, trace: usize) -> Result<()> {
        if trace >= self.model.num_traces() {
            return Err(ModelrError::AxisOutOfRange {
                axis: "trace".to_string(),
                index: trace,
                len: self.model.num_traces(),
            });
        }
        Ok(())
    }

    fn warn_if_beyond_validity(&self, thetas_deg: &[f64]) {
        if let Some(limit) = self.method.validity_limit_deg() {
            let max = max_abs_angle(thetas_deg);
            if max > limit {
                warn!(
                    method = %self.method,
                    max_angle = max,
                    limit,
                    "angles beyond the approximation's validity range"
                );
            }
        }
    }
}

/// Largest incidence angle magnitude, or negative infinity when empty
fn max_abs_angle(thetas_deg: &[f64]) -> f64 {
    thetas_deg.iter().map(|t| t.abs()).fold(f64::NEG_INFINITY, f64::max)
}
