//! Model Builder
//!
//! Builds layer-index grids for the wedge, body (slab) and step geometries.
//! Times are supplied in milliseconds and turned into whole samples before
//! any interpolation, so boundary placement is exact integer arithmetic.

use super::layer_model::LayerModel;
use crate::config::ModelingConfig;
use crate::error::{ModelrError, Result};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::debug;

fn default_layers() -> usize {
    3
}

// ============================================================================
// Geometry Parameters
// ============================================================================

/// Wedge: middle layer thins linearly from `min_thickness` to `max_thickness`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WedgeParams {
    /// Number of traces
    pub traces: usize,
    /// Time above the wedge top and below the thickest base (ms)
    pub pad: f64,
    /// Thickness at trace 0 (ms)
    #[serde(default)]
    pub min_thickness: f64,
    /// Thickness at the last trace (ms)
    pub max_thickness: f64,
    /// Traces of constant thickness on each side of the ramp
    #[serde(default)]
    pub flank_traces: usize,
    /// 2: the wedge sits inside layer 0. 3: layer 2 lies beneath it.
    #[serde(default = "default_layers")]
    pub layers: usize,
}

/// Body (slab): (top, base) pairs at the left and right edges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyParams {
    pub traces: usize,
    /// Time above offset zero and below the deepest base (ms)
    pub pad: f64,
    /// Zero-thickness traces on each side
    #[serde(default)]
    pub margin: usize,
    /// (top, base) below the pad at the first body trace (ms)
    pub left: (f64, f64),
    /// (top, base) below the pad at the last body trace (ms)
    pub right: (f64, f64),
    #[serde(default = "default_layers")]
    pub layers: usize,
}

/// Step: one boundary at `pad`, dropped by `throw` from `step_trace` onward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepParams {
    pub traces: usize,
    /// Time above the boundary and below its deepest point (ms)
    pub pad: f64,
    /// Vertical offset of the right-hand side (ms)
    #[serde(default)]
    pub throw: f64,
    /// First trace on the thrown side, defaults to the middle trace
    #[serde(default)]
    pub step_trace: Option<usize>,
}

/// Requested earth geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Geometry {
    Wedge(WedgeParams),
    #[serde(alias = "slab")]
    Body(BodyParams),
    Step(StepParams),
}

impl Geometry {
    /// Layer count of the model this geometry builds
    pub fn num_layers(&self) -> usize {
        match self {
            Geometry::Wedge(p) => p.layers,
            Geometry::Body(p) => p.layers,
            Geometry::Step(_) => 2,
        }
    }

    pub fn traces(&self) -> usize {
        match self {
            Geometry::Wedge(p) => p.traces,
            Geometry::Body(p) => p.traces,
            Geometry::Step(p) => p.traces,
        }
    }

    /// Index of the layer whose thickness varies, if any
    pub fn middle_layer(&self) -> Option<usize> {
        match self {
            Geometry::Wedge(_) | Geometry::Body(_) => Some(1),
            Geometry::Step(_) => None,
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn invalid(reason: impl Into<String>) -> ModelrError {
    ModelrError::InvalidGeometry {
        reason: reason.into(),
    }
}

fn check_traces(traces: usize) -> Result<()> {
    if traces == 0 {
        return Err(invalid("trace count must be positive"));
    }
    Ok(())
}

fn check_time(name: &str, ms: f64) -> Result<()> {
    if !ms.is_finite() || ms < 0.0 {
        return Err(invalid(format!("{} must be a non-negative time, got {}", name, ms)));
    }
    Ok(())
}

fn check_layers(layers: usize) -> Result<()> {
    if layers != 2 && layers != 3 {
        return Err(invalid(format!("layer count must be 2 or 3, got {}", layers)));
    }
    Ok(())
}

/// Linear interpolation from `a` (j = 0) to `b` (j = n - 1) in whole samples,
/// rounding half up
fn interpolate(a: usize, b: usize, j: usize, n: usize) -> usize {
    if n <= 1 {
        return a;
    }
    // u128 holds the widest product of two usize values
    let span = (n - 1) as u128;
    let j = j as u128;
    ((a as u128 * (span - j) + b as u128 * j + span / 2) / span) as usize
}

/// Rows of a model with `pad` samples above and below `body` samples
fn padded_rows(pad: usize, body: usize) -> Result<usize> {
    pad.checked_mul(2)
        .and_then(|p| p.checked_add(body))
        .ok_or_else(|| invalid("padded model length overflows"))
}

// ============================================================================
// ModelBuilder
// ============================================================================

/// Builds [`LayerModel`] grids on the configured sample interval
pub struct ModelBuilder<'a> {
    config: &'a ModelingConfig,
}

impl<'a> ModelBuilder<'a> {
    pub fn new(config: &'a ModelingConfig) -> Self {
        Self { config }
    }

    /// Build the model for any geometry
    pub fn build(&self, geometry: &Geometry) -> Result<LayerModel> {
        match geometry {
            Geometry::Wedge(p) => self.wedge(p),
            Geometry::Body(p) => self.body(p),
            Geometry::Step(p) => self.step(p),
        }
    }

    /// Wedge model
    ///
    /// Trace 0 carries `min_thickness` and the last trace `max_thickness`;
    /// flank traces repeat the end values.
    pub fn wedge(&self, params: &WedgeParams) -> Result<LayerModel> {
        check_traces(params.traces)?;
        check_time("pad", params.pad)?;
        check_time("min_thickness", params.min_thickness)?;
        check_time("max_thickness", params.max_thickness)?;
        check_layers(params.layers)?;
        if params.min_thickness > params.max_thickness {
            return Err(invalid(format!(
                "min_thickness ({}) exceeds max_thickness ({})",
                params.min_thickness, params.max_thickness
            )));
        }
        if 2 * params.flank_traces >= params.traces {
            return Err(invalid(format!(
                "{} flank traces per side leave no ramp in {} traces",
                params.flank_traces, params.traces
            )));
        }

        let min = self.samples("min_thickness", params.min_thickness)?;
        let max = self.samples("max_thickness", params.max_thickness)?;
        let flank = params.flank_traces;
        let ramp = params.traces - 2 * flank;

        let profile: Vec<(usize, usize)> = (0..params.traces)
            .map(|t| {
                let j = t.saturating_sub(flank).min(ramp - 1);
                (0, interpolate(min, max, j, ramp))
            })
            .collect();

        debug!(traces = params.traces, min, max, "building wedge model");
        self.layered(params.pad, &profile, params.layers)
    }

    /// Body (slab) model
    ///
    /// Margin traces have zero middle-layer thickness at the adjacent
    /// edge's top.
    pub fn body(&self, params: &BodyParams) -> Result<LayerModel> {
        check_traces(params.traces)?;
        check_time("pad", params.pad)?;
        check_time("left top", params.left.0)?;
        check_time("left base", params.left.1)?;
        check_time("right top", params.right.0)?;
        check_time("right base", params.right.1)?;
        check_layers(params.layers)?;
        if params.left.1 < params.left.0 || params.right.1 < params.right.0 {
            return Err(invalid(format!(
                "base above top gives negative thickness (left {:?}, right {:?})",
                params.left, params.right
            )));
        }
        if 2 * params.margin >= params.traces {
            return Err(invalid(format!(
                "margin of {} traces per side leaves no body in {} traces",
                params.margin, params.traces
            )));
        }

        let (lt, lb) = (
            self.samples("left top", params.left.0)?,
            self.samples("left base", params.left.1)?,
        );
        let (rt, rb) = (
            self.samples("right top", params.right.0)?,
            self.samples("right base", params.right.1)?,
        );
        let margin = params.margin;
        let body_traces = params.traces - 2 * margin;

        let profile: Vec<(usize, usize)> = (0..params.traces)
            .map(|t| {
                if t < margin {
                    (lt, lt)
                } else if t >= margin + body_traces {
                    (rt, rt)
                } else {
                    let j = t - margin;
                    (
                        interpolate(lt, rt, j, body_traces),
                        interpolate(lb, rb, j, body_traces),
                    )
                }
            })
            .collect();

        debug!(traces = params.traces, margin, "building body model");
        self.layered(params.pad, &profile, params.layers)
    }

    /// Step model: two layers, one boundary, optionally offset on the right
    pub fn step(&self, params: &StepParams) -> Result<LayerModel> {
        check_traces(params.traces)?;
        check_time("pad", params.pad)?;
        check_time("throw", params.throw)?;

        let pad = self.samples("pad", params.pad)?;
        if pad == 0 {
            return Err(invalid("pad must be at least one sample for a step model"));
        }
        let throw = self.samples("throw", params.throw)?;
        let step_trace = params.step_trace.unwrap_or(params.traces / 2);
        if step_trace > params.traces {
            return Err(invalid(format!(
                "step trace {} beyond {} traces",
                step_trace, params.traces
            )));
        }

        let rows = padded_rows(pad, throw)?;
        self.check_size(rows, params.traces)?;

        let grid = Array2::from_shape_fn((rows, params.traces), |(s, t)| {
            let boundary = if t >= step_trace { pad + throw } else { pad };
            usize::from(s >= boundary)
        });

        debug!(rows, traces = params.traces, "built step model");
        LayerModel::new(grid, 2)
    }

    /// Fill a grid from per-trace (top, base) offsets of the middle layer
    fn layered(&self, pad_ms: f64, profile: &[(usize, usize)], layers: usize) -> Result<LayerModel> {
        let pad = self.samples("pad", pad_ms)?;
        let deepest = profile.iter().map(|&(_, base)| base).max().unwrap_or(0);
        let rows = padded_rows(pad, deepest)?;
        self.check_size(rows, profile.len())?;

        let lower = if layers == 3 { 2 } else { 0 };
        let grid = Array2::from_shape_fn((rows, profile.len()), |(s, t)| {
            let (top, base) = profile[t];
            if s < pad + top {
                0
            } else if s < pad + base {
                1
            } else {
                lower
            }
        });

        debug!(rows, traces = profile.len(), layers, "built layered model");
        LayerModel::new(grid, layers)
    }

    /// Whole samples for a time in ms, no more than the grid can hold
    fn samples(&self, name: &str, ms: f64) -> Result<usize> {
        check_time(name, ms)?;
        let limit = self.config.max_grid_cells;
        if (ms / self.config.dt_ms()).round() > limit as f64 {
            return Err(invalid(format!(
                "{} of {} ms is longer than the grid limit of {} cells",
                name, ms, limit
            )));
        }
        Ok(self.config.ms_to_samples(ms))
    }

    fn check_size(&self, rows: usize, traces: usize) -> Result<()> {
        let cells = rows.saturating_mul(traces);
        if cells > self.config.max_grid_cells {
            return Err(invalid(format!(
                "{} x {} grid exceeds the limit of {} cells",
                rows, traces, self.config.max_grid_cells
            )));
        }
        Ok(())
    }
}
