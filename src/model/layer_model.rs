//! Layer-index grid
//!
//! A 2D grid of layer indices, time samples down and traces across.

use crate::error::{ModelrError, Result};
use ndarray::{Array2, ArrayView1, Axis};
use serde::Serialize;

/// A change of layer index between two consecutive samples of one trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Boundary {
    /// First sample of the lower layer
    pub sample: usize,
    /// Layer index above the boundary
    pub upper: usize,
    /// Layer index below the boundary
    pub lower: usize,
}

/// Earth model as a (samples x traces) grid of layer indices
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerModel {
    grid: Array2<usize>,
    num_layers: usize,
}

impl LayerModel {
    /// Wrap a grid, checking every index is below `num_layers`
    pub fn new(grid: Array2<usize>, num_layers: usize) -> Result<Self> {
        if grid.is_empty() {
            return Err(ModelrError::InvalidGeometry {
                reason: "layer grid is empty".to_string(),
            });
        }
        if let Some(&bad) = grid.iter().find(|&&k| k >= num_layers) {
            return Err(ModelrError::InvalidGeometry {
                reason: format!("layer index {} outside 0..{}", bad, num_layers),
            });
        }
        Ok(Self { grid, num_layers })
    }

    /// A flat model: one boundary per entry of `tops` (in samples), same on every trace
    ///
    /// `tops` must be strictly increasing; layer `k + 1` starts at `tops[k]`.
    pub fn flat(num_samples: usize, num_traces: usize, tops: &[usize]) -> Result<Self> {
        if tops.windows(2).any(|w| w[0] >= w[1]) || tops.last().map_or(false, |&t| t >= num_samples) {
            return Err(ModelrError::InvalidGeometry {
                reason: format!("layer tops {:?} must increase and lie inside {} samples", tops, num_samples),
            });
        }

        let grid = Array2::from_shape_fn((num_samples, num_traces), |(s, _)| {
            tops.iter().take_while(|&&top| top <= s).count()
        });
        Self::new(grid, tops.len() + 1)
    }

    pub fn grid(&self) -> &Array2<usize> {
        &self.grid
    }

    pub fn num_samples(&self) -> usize {
        self.grid.nrows()
    }

    pub fn num_traces(&self) -> usize {
        self.grid.ncols()
    }

    pub fn num_layers(&self) -> usize {
        self.num_layers
    }

    /// Layer index at (sample, trace)
    pub fn get(&self, sample: usize, trace: usize) -> Option<usize> {
        self.grid.get((sample, trace)).copied()
    }

    /// Layer indices down one trace
    pub fn trace(&self, trace: usize) -> ArrayView1<'_, usize> {
        self.grid.index_axis(Axis(1), trace)
    }

    /// Interfaces crossed going down one trace, in time order
    ///
    /// A layer with no samples on this trace produces no entry.
    pub fn boundaries(&self, trace: usize) -> Vec<Boundary> {
        let column = self.trace(trace);
        column
            .iter()
            .zip(column.iter().skip(1))
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(s, (&upper, &lower))| Boundary {
                sample: s + 1,
                upper,
                lower,
            })
            .collect()
    }

    /// Number of samples of `layer` on `trace`
    pub fn layer_thickness(&self, trace: usize, layer: usize) -> usize {
        self.trace(trace).iter().filter(|&&k| k == layer).count()
    }
}
