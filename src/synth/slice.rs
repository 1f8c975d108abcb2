//! Slice extraction
//!
//! Pulls a 2D view out of an amplitude volume by fixing two of its three
//! non-time axes. Time is always the first dimension of the result.

use super::volume::AmplitudeVolume;
use crate::error::{ModelrError, Result};
use ndarray::{s, Array2, ArrayView1};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The axis a slice varies along (besides time)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SliceAxis {
    /// All traces at one angle and one frequency
    #[default]
    Spatial,
    /// All angles at one trace and one frequency (an angle gather)
    Angle,
    /// All frequencies at one trace and one angle
    Frequency,
}

impl SliceAxis {
    pub fn name(&self) -> &'static str {
        match self {
            SliceAxis::Spatial => "spatial",
            SliceAxis::Angle => "angle",
            SliceAxis::Frequency => "frequency",
        }
    }
}

impl fmt::Display for SliceAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for SliceAxis {
    type Err = ModelrError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "spatial" | "trace" => Ok(SliceAxis::Spatial),
            "angle" | "offset" => Ok(SliceAxis::Angle),
            "frequency" => Ok(SliceAxis::Frequency),
            other => Err(ModelrError::InvalidRequest {
                reason: format!("unknown slice axis '{}'", other),
            }),
        }
    }
}

/// Which slice to take; indices on the varying axis are ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SliceSelector {
    pub axis: SliceAxis,
    pub trace: usize,
    pub angle: usize,
    pub frequency: usize,
}

impl SliceSelector {
    pub fn spatial(angle: usize, frequency: usize) -> Self {
        Self {
            axis: SliceAxis::Spatial,
            trace: 0,
            angle,
            frequency,
        }
    }

    pub fn angle(trace: usize, frequency: usize) -> Self {
        Self {
            axis: SliceAxis::Angle,
            trace,
            angle: 0,
            frequency,
        }
    }

    pub fn frequency(trace: usize, angle: usize) -> Self {
        Self {
            axis: SliceAxis::Frequency,
            trace,
            angle,
            frequency: 0,
        }
    }

    /// Check every fixed index against a volume of the given axis lengths
    pub fn check_bounds(&self, num_traces: usize, num_angles: usize, num_frequencies: usize) -> Result<()> {
        let fixed: [(&str, usize, usize, bool); 3] = [
            ("trace", self.trace, num_traces, self.axis != SliceAxis::Spatial),
            ("angle", self.angle, num_angles, self.axis != SliceAxis::Angle),
            ("frequency", self.frequency, num_frequencies, self.axis != SliceAxis::Frequency),
        ];
        for (axis, index, len, checked) in fixed {
            if checked && index >= len {
                return Err(ModelrError::AxisOutOfRange {
                    axis: axis.to_string(),
                    index,
                    len,
                });
            }
        }
        Ok(())
    }
}

/// A 2D (samples x varying axis) amplitude slice
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    data: Array2<f64>,
    axis: SliceAxis,
    axis_values: Vec<f64>,
    dt: f64,
}

impl Slice {
    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn axis(&self) -> SliceAxis {
        self.axis
    }

    /// Coordinates along the varying axis: trace numbers, degrees or Hz
    pub fn axis_values(&self) -> &[f64] {
        &self.axis_values
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn num_samples(&self) -> usize {
        self.data.nrows()
    }

    pub fn num_columns(&self) -> usize {
        self.data.ncols()
    }

    /// One trace of the slice
    pub fn column(&self, index: usize) -> Option<ArrayView1<'_, f64>> {
        (index < self.data.ncols()).then(|| self.data.column(index))
    }

    /// Sample times in milliseconds
    pub fn time_axis_ms(&self) -> Vec<f64> {
        (0..self.num_samples())
            .map(|i| i as f64 * (self.dt * 1000.0))
            .collect()
    }
}

/// Extract the slice named by `selector`
///
/// # Errors
/// `AxisOutOfRange` when a fixed index is beyond the volume's axis length.
pub fn extract_slice(volume: &AmplitudeVolume, selector: &SliceSelector) -> Result<Slice> {
    let (_, traces, angles, frequencies) = volume.data().dim();
    selector.check_bounds(traces, angles, frequencies)?;

    let data = volume.data();
    let (view, axis_values): (_, Vec<f64>) = match selector.axis {
        SliceAxis::Spatial => (
            data.slice(s![.., .., selector.angle, selector.frequency]),
            (0..traces).map(|t| t as f64).collect(),
        ),
        SliceAxis::Angle => (
            data.slice(s![.., selector.trace, .., selector.frequency]),
            volume.angles().to_vec(),
        ),
        SliceAxis::Frequency => (
            data.slice(s![.., selector.trace, selector.angle, ..]),
            volume.frequencies().to_vec(),
        ),
    };

    Ok(Slice {
        data: view.to_owned(),
        axis: selector.axis,
        axis_values,
        dt: volume.dt(),
    })
}
