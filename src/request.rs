//! Model requests
//!
//! The input contract for one forward-modeling run and the pipeline that
//! executes it: build the model, synthesize the amplitude volume, cut the
//! requested slice.

use crate::config::ModelingConfig;
use crate::error::{ModelrError, Result};
use crate::model::{Geometry, LayerModel, ModelBuilder};
use crate::reflectivity::ReflectivityMethod;
use crate::rock::RockProperties;
use crate::synth::{extract_slice, ConvolutionEngine, Slice, SliceAxis, SliceSelector, TuningAnalysis};
use crate::wavelet::Wavelet;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

// ============================================================================
// Axis Values
// ============================================================================

/// Angles or frequencies: one value, an explicit list, or a half-open range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisValues {
    Single(f64),
    List(Vec<f64>),
    /// `start, start + step, ...` while below `stop`
    Range { start: f64, stop: f64, step: f64 },
}

impl AxisValues {
    /// Expand to the concrete values
    ///
    /// # Errors
    /// `InvalidRequest` for an empty result, a non-finite value, a
    /// non-positive step, or more than `limit` values.
    pub fn values(&self, name: &str, limit: usize) -> Result<Vec<f64>> {
        let invalid = |reason: String| ModelrError::InvalidRequest {
            reason: format!("{}: {}", name, reason),
        };

        let values = match self {
            AxisValues::Single(v) => vec![*v],
            AxisValues::List(list) => list.clone(),
            AxisValues::Range { start, stop, step } => {
                if !(start.is_finite() && stop.is_finite() && step.is_finite()) {
                    return Err(invalid("range bounds must be finite".to_string()));
                }
                if *step <= 0.0 {
                    return Err(invalid(format!("range step must be positive, got {}", step)));
                }
                let count = ((stop - start) / step).ceil().max(0.0);
                if count > limit as f64 {
                    return Err(invalid(format!("range yields more than {} values", limit)));
                }
                (0..count as usize).map(|i| start + i as f64 * step).collect()
            }
        };

        if values.is_empty() {
            return Err(invalid("at least one value is required".to_string()));
        }
        if values.len() > limit {
            return Err(invalid(format!("more than {} values", limit)));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(invalid(format!("value {} is not finite", bad)));
        }
        Ok(values)
    }
}

impl From<f64> for AxisValues {
    fn from(v: f64) -> Self {
        AxisValues::Single(v)
    }
}

impl From<Vec<f64>> for AxisValues {
    fn from(v: Vec<f64>) -> Self {
        AxisValues::List(v)
    }
}

fn default_method() -> String {
    ReflectivityMethod::Zoeppritz.name().to_string()
}

fn default_angles() -> AxisValues {
    AxisValues::Single(0.0)
}

fn default_frequencies() -> AxisValues {
    AxisValues::Single(25.0)
}

// ============================================================================
// ModelRequest
// ============================================================================

/// Everything needed for one forward-modeling run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRequest {
    /// Rock properties per layer index
    pub rocks: Vec<RockProperties>,
    pub geometry: Geometry,
    /// Reflectivity method name
    #[serde(default = "default_method")]
    pub method: String,
    /// Incidence angles in degrees
    #[serde(default = "default_angles")]
    pub angles: AxisValues,
    /// Ricker peak frequencies in Hz
    #[serde(default = "default_frequencies")]
    pub frequencies: AxisValues,
    #[serde(default)]
    pub slice: SliceSelector,
}

/// Result of a run: the model and the requested slice
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelResponse {
    pub method: ReflectivityMethod,
    pub model: LayerModel,
    pub slice: Slice,
}

impl ModelRequest {
    /// Parse a request from JSON text
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse a request from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a request from a `.json` or `.toml` file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            _ => Self::from_json_str(&content),
        }
    }

    /// Run the full pipeline
    ///
    /// Inputs are validated in order (config, method, axes, wavelets, rocks,
    /// geometry, slice indices) before any amplitudes are computed, so a bad
    /// request produces no partial output.
    pub fn run(&self, config: &ModelingConfig) -> Result<ModelResponse> {
        let start = Instant::now();
        config.validate()?;

        let method: ReflectivityMethod = self.method.parse()?;

        let num_layers = self.geometry.num_layers();
        if self.rocks.len() < num_layers {
            return Err(ModelrError::InvalidRequest {
                reason: format!(
                    "{} geometry needs {} rocks, got {}",
                    geometry_kind(&self.geometry),
                    num_layers,
                    self.rocks.len()
                ),
            });
        }

        let model = ModelBuilder::new(config).build(&self.geometry)?;

        // Axes share whatever the grid leaves of the volume budget
        let grid_cells = model.num_samples().saturating_mul(model.num_traces()).max(1);
        let axis_limit = (config.max_volume_cells / grid_cells).max(1);
        let angles = self.angles.values("angles", axis_limit)?;
        let frequencies = self
            .frequencies
            .values("frequencies", (axis_limit / angles.len()).max(1))?;
        let wavelets = frequencies
            .iter()
            .map(|&f| Wavelet::ricker(f, config))
            .collect::<Result<Vec<_>>>()?;

        self.slice
            .check_bounds(model.num_traces(), angles.len(), frequencies.len())?;
        debug!(
            samples = model.num_samples(),
            traces = model.num_traces(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "model built"
        );

        let engine = ConvolutionEngine::new(&model, &self.rocks, method)?;
        let volume = engine.volume(&angles, &wavelets, config)?;
        let slice = extract_slice(&volume, &self.slice)?;

        info!(
            method = %method,
            geometry = geometry_kind(&self.geometry),
            axis = %self.slice.axis,
            shape = ?slice.data().dim(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "model request complete"
        );

        Ok(ModelResponse {
            method,
            model,
            slice,
        })
    }

    /// Run the pipeline and analyze tuning along the geometry's middle layer
    ///
    /// # Errors
    /// `InvalidRequest` if the slice is not spatial or the geometry has no
    /// variable-thickness layer.
    pub fn tuning(&self, config: &ModelingConfig) -> Result<TuningAnalysis> {
        if self.slice.axis != SliceAxis::Spatial {
            return Err(ModelrError::InvalidRequest {
                reason: "tuning analysis requires a spatial slice".to_string(),
            });
        }
        let layer = self.geometry.middle_layer().ok_or_else(|| ModelrError::InvalidRequest {
            reason: format!(
                "{} geometry has no variable-thickness layer",
                geometry_kind(&self.geometry)
            ),
        })?;

        let response = self.run(config)?;
        TuningAnalysis::from_section(&response.slice, &response.model, layer)
    }
}

fn geometry_kind(geometry: &Geometry) -> &'static str {
    match geometry {
        Geometry::Wedge(_) => "wedge",
        Geometry::Body(_) => "body",
        Geometry::Step(_) => "step",
    }
}

/// Run independent requests in parallel, one result per request in input order
pub fn run_batch(requests: &[ModelRequest], config: &ModelingConfig) -> Vec<Result<ModelResponse>> {
    info!(requests = requests.len(), "running batch");
    requests.par_iter().map(|r| r.run(config)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{StepParams, WedgeParams};
    use pretty_assertions::assert_eq;

    fn rocks() -> Vec<RockProperties> {
        vec![
            RockProperties::new(2000.0, Some(1000.0), 2200.0).unwrap(),
            RockProperties::new(2200.0, Some(1100.0), 2300.0).unwrap(),
            RockProperties::new(2500.0, Some(1200.0), 2600.0).unwrap(),
        ]
    }

    fn wedge_request() -> ModelRequest {
        ModelRequest {
            rocks: rocks(),
            geometry: Geometry::Wedge(WedgeParams {
                traces: 20,
                pad: 30.0,
                min_thickness: 0.0,
                max_thickness: 40.0,
                flank_traces: 0,
                layers: 3,
            }),
            method: "zoeppritz".to_string(),
            angles: AxisValues::Single(0.0),
            frequencies: AxisValues::Single(25.0),
            slice: SliceSelector::default(),
        }
    }

    #[test]
    fn test_axis_values_range_matches_arange() {
        let range = AxisValues::Range {
            start: 0.0,
            stop: 45.0,
            step: 5.0,
        };
        let values = range.values("angles", 1000).unwrap();
        assert_eq!(values, vec![0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0]);
    }

    #[test]
    fn test_axis_values_rejects_bad_input() {
        let zero_step = AxisValues::Range {
            start: 0.0,
            stop: 10.0,
            step: 0.0,
        };
        assert!(zero_step.values("angles", 1000).is_err());

        let empty_range = AxisValues::Range {
            start: 10.0,
            stop: 0.0,
            step: 1.0,
        };
        assert!(empty_range.values("angles", 1000).is_err());

        assert!(AxisValues::List(vec![]).values("frequencies", 1000).is_err());
        assert!(AxisValues::List(vec![1.0, 2.0, 3.0]).values("frequencies", 2).is_err());
    }

    #[test]
    fn test_request_deserializes_with_defaults() {
        let request: ModelRequest = serde_json::from_str(
            r#"{
                "rocks": [
                    {"vp": 2000, "vs": 1000, "rho": 2200},
                    {"vp": 2200, "rho": 2300}
                ],
                "geometry": {"kind": "step", "traces": 10, "pad": 20},
                "angles": {"start": 0, "stop": 30, "step": 10},
                "frequencies": [20, 30]
            }"#,
        )
        .unwrap();

        assert_eq!(request.method, "zoeppritz");
        assert_eq!(request.slice, SliceSelector::default());
        assert!(request.rocks[1].is_fluid());
        assert_eq!(request.frequencies, AxisValues::List(vec![20.0, 30.0]));
        assert_eq!(request.angles.values("angles", 100).unwrap(), vec![0.0, 10.0, 20.0]);
    }

    #[test]
    fn test_run_spatial_section() {
        let config = ModelingConfig::default();
        let response = wedge_request().run(&config).unwrap();

        assert_eq!(response.method, ReflectivityMethod::Zoeppritz);
        assert_eq!(response.slice.data().dim(), (100, 20));
        assert_eq!(response.slice.dt(), 0.001);
    }

    #[test]
    fn test_run_angle_gather() {
        let config = ModelingConfig::default();
        let request = ModelRequest {
            angles: AxisValues::List(vec![0.0, 10.0, 20.0, 30.0]),
            slice: SliceSelector::angle(19, 0),
            ..wedge_request()
        };
        let response = request.run(&config).unwrap();
        assert_eq!(response.slice.data().dim(), (100, 4));
        assert_eq!(response.slice.axis_values(), &[0.0, 10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_unknown_method_fails_first() {
        let config = ModelingConfig::default();
        let request = ModelRequest {
            method: "bogus".to_string(),
            ..wedge_request()
        };
        let err = request.run(&config).unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_REFLECTIVITY_METHOD");
    }

    #[test]
    fn test_too_few_rocks() {
        let config = ModelingConfig::default();
        let request = ModelRequest {
            rocks: rocks()[..2].to_vec(),
            ..wedge_request()
        };
        assert_eq!(request.run(&config).unwrap_err().error_code(), "INVALID_REQUEST");
    }

    #[test]
    fn test_slice_index_out_of_range() {
        let config = ModelingConfig::default();
        let request = ModelRequest {
            slice: SliceSelector::spatial(3, 0),
            ..wedge_request()
        };
        assert_eq!(request.run(&config).unwrap_err().error_code(), "AXIS_OUT_OF_RANGE");
    }

    #[test]
    fn test_tuning_requires_variable_layer() {
        let config = ModelingConfig::default();
        let request = ModelRequest {
            geometry: Geometry::Step(StepParams {
                traces: 10,
                pad: 20.0,
                throw: 0.0,
                step_trace: None,
            }),
            ..wedge_request()
        };
        assert!(request.tuning(&config).is_err());

        let analysis = wedge_request().tuning(&config).unwrap();
        assert_eq!(analysis.len(), 20);
    }

    #[test]
    fn test_batch_preserves_order() {
        let config = ModelingConfig::default();
        let bad = ModelRequest {
            method: "bogus".to_string(),
            ..wedge_request()
        };
        let results = run_batch(&[wedge_request(), bad, wedge_request()], &config);

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert_eq!(
            results[0].as_ref().unwrap().slice,
            results[2].as_ref().unwrap().slice
        );
    }

    #[test]
    fn test_huge_range_rejected_before_expansion() {
        let config = ModelingConfig::default();
        let request = ModelRequest {
            angles: AxisValues::Range {
                start: 0.0,
                stop: 1e9,
                step: 1.0,
            },
            ..wedge_request()
        };
        let err = request.run(&config).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_REQUEST");

        // 100 x 20 grid leaves room for 22 angles at 44k cells
        let tight = ModelingConfig {
            max_volume_cells: 44_000,
            ..ModelingConfig::default()
        };
        let many = ModelRequest {
            angles: AxisValues::Range {
                start: 0.0,
                stop: 23.0,
                step: 1.0,
            },
            ..wedge_request()
        };
        assert_eq!(many.run(&tight).unwrap_err().error_code(), "INVALID_REQUEST");
        let fits = ModelRequest {
            angles: AxisValues::Range {
                start: 0.0,
                stop: 22.0,
                step: 1.0,
            },
            ..wedge_request()
        };
        assert_eq!(fits.run(&tight).unwrap().slice.data().dim(), (100, 20));
    }
}
