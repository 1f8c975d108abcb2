//! Reflectivity Calculator
//!
//! P-P reflection coefficients at a planar boundary between two layers.
//! All methods share one signature: `(upper, lower, angle in degrees)`.
//!
//! Methods are resolved by name from a closed registry, so an unknown name
//! fails before any computation starts.

mod linear;
mod zoeppritz;

pub use linear::{akirichards, bortfeld, fatti, shuey, shuey_two_term};
pub use zoeppritz::{zoeppritz, zoeppritz_complex};

use crate::error::{ModelrError, Result};
use crate::rock::RockProperties;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coefficient returned by the constant stub
pub const CONSTANT_REFLECTIVITY: f64 = 0.3;

/// Incidence angle (degrees) above which the linear approximations are
/// considered unreliable
pub const LINEAR_VALIDITY_LIMIT_DEG: f64 = 35.0;

/// Transmitted P angle (radians) from Snell's law
///
/// Beyond the critical angle the sine is clamped to 1, giving 90 degrees.
#[inline]
pub(crate) fn transmitted_angle(vp1: f64, vp2: f64, theta1: f64) -> f64 {
    (vp2 / vp1 * theta1.sin()).clamp(-1.0, 1.0).asin()
}

// ============================================================================
// Method Registry
// ============================================================================

/// Closed set of reflectivity algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ReflectivityMethod {
    /// Exact elastic solution (real part beyond the critical angle)
    Zoeppritz,
    /// Aki-Richards three-term linearization
    AkiRichards,
    /// Shuey three-term form
    Shuey,
    /// Shuey intercept/gradient form
    ShueyTwoTerm,
    /// Fatti impedance form
    Fatti,
    /// Bortfeld logarithmic form
    Bortfeld,
    /// Fixed coefficient regardless of inputs
    Constant,
}

impl ReflectivityMethod {
    /// Every registered method
    pub const ALL: [ReflectivityMethod; 7] = [
        ReflectivityMethod::Zoeppritz,
        ReflectivityMethod::AkiRichards,
        ReflectivityMethod::Shuey,
        ReflectivityMethod::ShueyTwoTerm,
        ReflectivityMethod::Fatti,
        ReflectivityMethod::Bortfeld,
        ReflectivityMethod::Constant,
    ];

    /// Registry key
    pub fn name(&self) -> &'static str {
        match self {
            ReflectivityMethod::Zoeppritz => "zoeppritz",
            ReflectivityMethod::AkiRichards => "akirichards",
            ReflectivityMethod::Shuey => "shuey",
            ReflectivityMethod::ShueyTwoTerm => "shuey2",
            ReflectivityMethod::Fatti => "fatti",
            ReflectivityMethod::Bortfeld => "bortfeld",
            ReflectivityMethod::Constant => "const",
        }
    }

    /// One-line description for listings
    pub fn description(&self) -> &'static str {
        match self {
            ReflectivityMethod::Zoeppritz => "Exact elastic P-P solution",
            ReflectivityMethod::AkiRichards => "Aki-Richards linear approximation",
            ReflectivityMethod::Shuey => "Shuey three-term approximation",
            ReflectivityMethod::ShueyTwoTerm => "Shuey two-term (intercept/gradient)",
            ReflectivityMethod::Fatti => "Fatti impedance-contrast approximation",
            ReflectivityMethod::Bortfeld => "Bortfeld logarithmic approximation",
            ReflectivityMethod::Constant => "Constant coefficient (testing)",
        }
    }

    /// Largest angle the method is trusted at, if limited
    pub fn validity_limit_deg(&self) -> Option<f64> {
        match self {
            ReflectivityMethod::Zoeppritz | ReflectivityMethod::Constant => None,
            _ => Some(LINEAR_VALIDITY_LIMIT_DEG),
        }
    }

    /// Reflection coefficient for one angle
    ///
    /// Returns exactly zero when `upper` and `lower` are identical, for every
    /// method.
    pub fn coefficient(&self, upper: &RockProperties, lower: &RockProperties, theta_deg: f64) -> f64 {
        if upper.same_as(lower) {
            return 0.0;
        }

        match self {
            ReflectivityMethod::Zoeppritz => zoeppritz(upper, lower, theta_deg),
            ReflectivityMethod::AkiRichards => akirichards(upper, lower, theta_deg),
            ReflectivityMethod::Shuey => shuey(upper, lower, theta_deg),
            ReflectivityMethod::ShueyTwoTerm => shuey_two_term(upper, lower, theta_deg),
            ReflectivityMethod::Fatti => fatti(upper, lower, theta_deg),
            ReflectivityMethod::Bortfeld => bortfeld(upper, lower, theta_deg),
            ReflectivityMethod::Constant => CONSTANT_REFLECTIVITY,
        }
    }

    /// Reflection coefficients for many angles, same length as `thetas_deg`
    pub fn coefficients(
        &self,
        upper: &RockProperties,
        lower: &RockProperties,
        thetas_deg: &[f64],
    ) -> Vec<f64> {
        thetas_deg
            .iter()
            .map(|&theta| self.coefficient(upper, lower, theta))
            .collect()
    }
}

impl fmt::Display for ReflectivityMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReflectivityMethod {
    type Err = ModelrError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zoeppritz" => Ok(ReflectivityMethod::Zoeppritz),
            "akirichards" | "aki_richards" | "aki-richards" => Ok(ReflectivityMethod::AkiRichards),
            "shuey" | "shuey3" => Ok(ReflectivityMethod::Shuey),
            "shuey2" => Ok(ReflectivityMethod::ShueyTwoTerm),
            "fatti" => Ok(ReflectivityMethod::Fatti),
            "bortfeld" => Ok(ReflectivityMethod::Bortfeld),
            "const" | "constant" => Ok(ReflectivityMethod::Constant),
            _ => Err(ModelrError::UnknownReflectivityMethod {
                name: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for ReflectivityMethod {
    type Error = ModelrError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ReflectivityMethod> for String {
    fn from(method: ReflectivityMethod) -> Self {
        method.name().to_string()
    }
}
