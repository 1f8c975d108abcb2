//! Earth Models
//!
//! Layer-index grids and the builders for each supported geometry.

mod builder;
mod layer_model;

pub use builder::{BodyParams, Geometry, ModelBuilder, StepParams, WedgeParams};
pub use layer_model::{Boundary, LayerModel};
