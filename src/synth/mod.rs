//! Synthesis
//!
//! Reflectivity series, wavelet convolution, amplitude volumes and the
//! slices and tuning curves read from them.

mod convolution;
mod series;
mod slice;
mod tuning;
mod volume;

pub use convolution::{convolve_same, synthesize, ConvolutionEngine};
pub use series::{ReflectivitySeries, Spike};
pub use slice::{extract_slice, Slice, SliceAxis, SliceSelector};
pub use tuning::TuningAnalysis;
pub use volume::AmplitudeVolume;
