//! Wedge tuning analysis
//!
//! Reads peak/trough picks off a spatial section and compares the apparent
//! time thickness with the true thickness of one layer, trace by trace.

use super::slice::{Slice, SliceAxis};
use crate::error::{ModelrError, Result};
use crate::model::LayerModel;
use serde::Serialize;

/// Per-trace tuning curves
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TuningAnalysis {
    /// Time thickness of the analyzed layer in ms
    pub actual_thickness_ms: Vec<f64>,
    /// `|peak - trough|` in ms
    pub apparent_thickness_ms: Vec<f64>,
    /// Maximum amplitude over time
    pub peak_amplitude: Vec<f64>,
    pub peak_sample: Vec<usize>,
    pub trough_sample: Vec<usize>,
}

impl TuningAnalysis {
    /// Analyze a spatial section against the model it was synthesized from
    ///
    /// # Arguments
    /// * `section` - Spatial slice, one column per model trace
    /// * `model` - Layer model of the section
    /// * `layer` - Layer whose thickness is tracked (the wedge's middle layer)
    pub fn from_section(section: &Slice, model: &LayerModel, layer: usize) -> Result<Self> {
        if section.axis() != SliceAxis::Spatial {
            return Err(ModelrError::InvalidRequest {
                reason: format!("tuning analysis needs a spatial slice, got {}", section.axis()),
            });
        }
        if section.num_columns() != model.num_traces() || section.num_samples() != model.num_samples() {
            return Err(ModelrError::InvalidRequest {
                reason: format!(
                    "section {:?} does not match model ({}, {})",
                    section.data().dim(),
                    model.num_samples(),
                    model.num_traces()
                ),
            });
        }
        if layer >= model.num_layers() {
            return Err(ModelrError::InvalidRequest {
                reason: format!("layer {} outside 0..{}", layer, model.num_layers()),
            });
        }

        let dt_ms = section.dt() * 1000.0;
        let n = model.num_traces();
        let mut analysis = Self {
            actual_thickness_ms: Vec::with_capacity(n),
            apparent_thickness_ms: Vec::with_capacity(n),
            peak_amplitude: Vec::with_capacity(n),
            peak_sample: Vec::with_capacity(n),
            trough_sample: Vec::with_capacity(n),
        };

        for (t, column) in section.data().columns().into_iter().enumerate() {
            // first occurrence wins on ties
            let (mut peak, mut trough) = (0, 0);
            for (i, &v) in column.iter().enumerate() {
                if v > column[peak] {
                    peak = i;
                }
                if v < column[trough] {
                    trough = i;
                }
            }

            analysis.peak_amplitude.push(column[peak]);
            analysis.peak_sample.push(peak);
            analysis.trough_sample.push(trough);
            analysis
                .apparent_thickness_ms
                .push(peak.abs_diff(trough) as f64 * dt_ms);
            analysis
                .actual_thickness_ms
                .push(model.layer_thickness(t, layer) as f64 * dt_ms);
        }

        Ok(analysis)
    }

    pub fn len(&self) -> usize {
        self.peak_amplitude.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peak_amplitude.is_empty()
    }

    /// Actual thickness at the trace with the largest peak amplitude
    pub fn tuning_thickness_ms(&self) -> Option<f64> {
        let mut best: Option<usize> = None;
        for (i, &amp) in self.peak_amplitude.iter().enumerate() {
            if best.map_or(true, |b| amp > self.peak_amplitude[b]) {
                best = Some(i);
            }
        }
        best.map(|i| self.actual_thickness_ms[i])
    }
}
