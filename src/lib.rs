//! Modelr - Synthetic Seismic Forward Modeling
//!
//! Modelr builds simple layered-earth models and computes the synthetic
//! seismic response a survey would record over them:
//! 1. Build a layer-index grid for a wedge, body (slab) or step geometry
//! 2. Evaluate angle-dependent reflection coefficients at every interface
//! 3. Convolve the reflectivity with a Ricker wavelet into an amplitude volume
//! 4. Slice the volume along the trace, angle or frequency axis
//!
//! # Example
//!
//! ```
//! use modelr::{Geometry, ModelRequest, ModelingConfig, RockProperties, WedgeParams};
//!
//! let request = ModelRequest {
//!     rocks: vec![
//!         RockProperties::new(2000.0, Some(1000.0), 2200.0).unwrap(),
//!         RockProperties::new(2200.0, Some(1100.0), 2300.0).unwrap(),
//!         RockProperties::new(2500.0, Some(1200.0), 2600.0).unwrap(),
//!     ],
//!     geometry: Geometry::Wedge(WedgeParams {
//!         traces: 50,
//!         pad: 40.0,
//!         min_thickness: 0.0,
//!         max_thickness: 60.0,
//!         flank_traces: 0,
//!         layers: 3,
//!     }),
//!     method: "zoeppritz".to_string(),
//!     angles: 0.0.into(),
//!     frequencies: 25.0.into(),
//!     slice: Default::default(),
//! };
//!
//! let response = request.run(&ModelingConfig::default()).unwrap();
//! assert_eq!(response.slice.data().dim(), (140, 50));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod reflectivity;
pub mod request;
pub mod rock;
pub mod synth;
pub mod wavelet;

pub use config::ModelingConfig;
pub use error::{ModelrError, Result};
pub use model::{BodyParams, Geometry, LayerModel, ModelBuilder, StepParams, WedgeParams};
pub use reflectivity::ReflectivityMethod;
pub use request::{run_batch, AxisValues, ModelRequest, ModelResponse};
pub use rock::RockProperties;
pub use synth::{
    extract_slice, AmplitudeVolume, ConvolutionEngine, Slice, SliceAxis, SliceSelector,
    TuningAnalysis,
};
pub use wavelet::Wavelet;
