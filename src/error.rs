//! Error handling for Modelr
//!
//! Every failure is raised synchronously at the point the bad input is seen.
//! Callers translate these into user-facing diagnostics via `error_code()`
//! and `recovery_hint()`.

use thiserror::Error;

/// Result type alias for Modelr operations
pub type Result<T> = std::result::Result<T, ModelrError>;

/// Main error type for Modelr operations
#[derive(Error, Debug)]
pub enum ModelrError {
    // Rock Errors
    #[error("Invalid rock properties (vp={vp}, vs={vs:?}, rho={rho}): {reason}")]
    InvalidRockProperties {
        vp: f64,
        vs: Option<f64>,
        rho: f64,
        reason: String,
    },

    // Reflectivity Errors
    #[error("Unknown reflectivity method: '{name}'")]
    UnknownReflectivityMethod { name: String },

    // Wavelet Errors
    #[error("Invalid wavelet parameter: {param} = {value} ({reason})")]
    InvalidWaveletParameter {
        param: String,
        value: f64,
        reason: String,
    },

    // Geometry Errors
    #[error("Invalid geometry: {reason}")]
    InvalidGeometry { reason: String },

    // Slice Errors
    #[error("Index {index} is out of range for the {axis} axis (length {len})")]
    AxisOutOfRange {
        axis: String,
        index: usize,
        len: usize,
    },

    // Request Errors
    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl ModelrError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            ModelrError::InvalidRockProperties { .. } => "INVALID_ROCK_PROPERTIES",
            ModelrError::UnknownReflectivityMethod { .. } => "UNKNOWN_REFLECTIVITY_METHOD",
            ModelrError::InvalidWaveletParameter { .. } => "INVALID_WAVELET_PARAMETER",
            ModelrError::InvalidGeometry { .. } => "INVALID_GEOMETRY",
            ModelrError::AxisOutOfRange { .. } => "AXIS_OUT_OF_RANGE",
            ModelrError::InvalidRequest { .. } => "INVALID_REQUEST",
            ModelrError::InvalidConfig { .. } => "INVALID_CONFIG",
            ModelrError::Io(_) => "IO_ERROR",
            ModelrError::Serialization(_) => "SERIALIZATION_ERROR",
            ModelrError::ConfigParse(_) => "CONFIG_PARSE_ERROR",
        }
    }

    /// Returns a suggested recovery action for this error
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::InvalidRockProperties { .. } => {
                "Vp and density must be positive; leave Vs empty for a fluid layer"
            }
            Self::UnknownReflectivityMethod { .. } => {
                "Use one of: zoeppritz, akirichards, shuey, shuey2, fatti, bortfeld, const"
            }
            Self::InvalidWaveletParameter { .. } => {
                "Choose a positive frequency below the Nyquist frequency"
            }
            Self::InvalidGeometry { .. } => {
                "Check that thicknesses are non-negative and the trace count is positive"
            }
            Self::AxisOutOfRange { .. } => "Pick a fixed index inside the computed axis",
            Self::InvalidRequest { .. } => "Supply at least one angle, frequency and rock per layer",
            Self::InvalidConfig { .. } => "Sample interval and wavelet duration must be positive",
            _ => "Check the error details and try again",
        }
    }
}
