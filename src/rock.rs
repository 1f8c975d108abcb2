//! Rock Properties
//!
//! Elastic description of a single layer. Values are immutable once
//! constructed; every constructor path (including deserialization) runs the
//! same validation.

use crate::error::{ModelrError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Elastic properties of one layer
///
/// A missing shear velocity marks a fluid layer; shear terms then use a zero
/// shear modulus.
///
/// # Example
/// ```
/// use modelr::RockProperties;
///
/// let shale = RockProperties::new(2000.0, Some(1000.0), 2200.0).unwrap();
/// assert_eq!(shale.acoustic_impedance(), 4.4e6);
///
/// let brine: RockProperties = "1500,,1000".parse().unwrap();
/// assert!(brine.is_fluid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRock")]
pub struct RockProperties {
    vp: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    vs: Option<f64>,
    rho: f64,
}

#[derive(Deserialize)]
struct RawRock {
    vp: f64,
    #[serde(default)]
    vs: Option<f64>,
    rho: f64,
}

impl TryFrom<RawRock> for RockProperties {
    type Error = ModelrError;

    fn try_from(raw: RawRock) -> Result<Self> {
        RockProperties::new(raw.vp, raw.vs, raw.rho)
    }
}

impl RockProperties {
    /// Create validated rock properties
    ///
    /// # Arguments
    /// * `vp` - Compressional velocity, must be positive
    /// * `vs` - Shear velocity, non-negative, or `None` for a fluid
    /// * `rho` - Density, must be positive
    pub fn new(vp: f64, vs: Option<f64>, rho: f64) -> Result<Self> {
        let invalid = |reason: &str| ModelrError::InvalidRockProperties {
            vp,
            vs,
            rho,
            reason: reason.to_string(),
        };

        if !vp.is_finite() || vp <= 0.0 {
            return Err(invalid("vp must be positive"));
        }
        if !rho.is_finite() || rho <= 0.0 {
            return Err(invalid("rho must be positive"));
        }
        if let Some(s) = vs {
            if !s.is_finite() || s < 0.0 {
                return Err(invalid("vs must be non-negative"));
            }
        }

        Ok(Self { vp, vs, rho })
    }

    /// Create a fluid layer (no shear velocity)
    pub fn fluid(vp: f64, rho: f64) -> Result<Self> {
        Self::new(vp, None, rho)
    }

    pub fn vp(&self) -> f64 {
        self.vp
    }

    /// Shear velocity, zero for fluids
    pub fn vs(&self) -> f64 {
        self.vs.unwrap_or(0.0)
    }

    /// Shear velocity as supplied
    pub fn vs_opt(&self) -> Option<f64> {
        self.vs
    }

    pub fn rho(&self) -> f64 {
        self.rho
    }

    /// Same elastic properties, treating a missing Vs as zero
    pub fn same_as(&self, other: &RockProperties) -> bool {
        self.vp == other.vp && self.vs() == other.vs() && self.rho == other.rho
    }

    /// True when the layer carries no shear
    pub fn is_fluid(&self) -> bool {
        self.vs() == 0.0
    }

    /// Acoustic impedance Vp * rho
    pub fn acoustic_impedance(&self) -> f64 {
        self.vp * self.rho
    }

    /// Shear impedance Vs * rho
    pub fn shear_impedance(&self) -> f64 {
        self.vs() * self.rho
    }

    /// Shear modulus mu = rho * Vs^2
    pub fn mu(&self) -> f64 {
        self.rho * self.vs() * self.vs()
    }

    /// First Lame parameter lambda = rho * Vp^2 - 2 mu
    pub fn lambda(&self) -> f64 {
        self.rho * self.vp * self.vp - 2.0 * self.mu()
    }

    /// Poisson's ratio from the velocity ratio
    pub fn poissons_ratio(&self) -> f64 {
        let vp2 = self.vp * self.vp;
        let vs2 = self.vs() * self.vs();
        (vp2 - 2.0 * vs2) / (2.0 * (vp2 - vs2))
    }
}

impl fmt::Display for RockProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.vs {
            Some(vs) => write!(f, "{},{},{}", self.vp, vs, self.rho),
            None => write!(f, "{},,{}", self.vp, self.rho),
        }
    }
}

/// Parses the `"vp,vs,rho"` triple form. An empty or `none` shear velocity
/// gives a fluid.
impl FromStr for RockProperties {
    type Err = ModelrError;

    fn from_str(s: &str) -> Result<Self> {
        let parse_err = || ModelrError::InvalidRockProperties {
            vp: f64::NAN,
            vs: None,
            rho: f64::NAN,
            reason: format!("expected 'vp,vs,rho', got '{}'", s),
        };

        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(parse_err());
        }

        let vp: f64 = parts[0].parse().map_err(|_| parse_err())?;
        let vs = match parts[1] {
            "" | "none" | "None" => None,
            v => Some(v.parse::<f64>().map_err(|_| parse_err())?),
        };
        let rho: f64 = parts[2].parse().map_err(|_| parse_err())?;

        Self::new(vp, vs, rho)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_valid_rock() {
        let rock = RockProperties::new(2000.0, Some(1000.0), 2200.0).unwrap();
        assert_eq!(rock.vp(), 2000.0);
        assert_eq!(rock.vs(), 1000.0);
        assert!(!rock.is_fluid());
        assert_relative_eq!(rock.mu(), 2200.0 * 1.0e6);
        assert_relative_eq!(rock.lambda(), 2200.0 * 4.0e6 - 2.0 * 2200.0 * 1.0e6);
    }

    #[test]
    fn test_rejects_non_positive_vp_and_rho() {
        let err = RockProperties::new(0.0, Some(1000.0), 2200.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_ROCK_PROPERTIES");

        assert!(RockProperties::new(2000.0, Some(1000.0), -1.0).is_err());
        assert!(RockProperties::new(f64::NAN, Some(1000.0), 2200.0).is_err());
        assert!(RockProperties::new(2000.0, Some(-5.0), 2200.0).is_err());
    }

    #[test]
    fn test_fluid_has_zero_shear() {
        let brine = RockProperties::fluid(1500.0, 1000.0).unwrap();
        assert!(brine.is_fluid());
        assert_eq!(brine.vs(), 0.0);
        assert_eq!(brine.mu(), 0.0);
        assert_relative_eq!(brine.poissons_ratio(), 0.5);
    }

    #[test]
    fn test_parse_triple() {
        let rock: RockProperties = "2200, 1100, 2300".parse().unwrap();
        assert_eq!(rock, RockProperties::new(2200.0, Some(1100.0), 2300.0).unwrap());

        let fluid: RockProperties = "1500,none,1000".parse().unwrap();
        assert!(fluid.is_fluid());

        assert!("2200,1100".parse::<RockProperties>().is_err());
        assert!("a,b,c".parse::<RockProperties>().is_err());
        assert!("-2200,1100,2300".parse::<RockProperties>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let rock = RockProperties::new(2500.0, None, 2600.0).unwrap();
        let parsed: RockProperties = rock.to_string().parse().unwrap();
        assert_eq!(parsed, rock);
    }

    #[test]
    fn test_deserialize_validates() {
        let rock: RockProperties =
            serde_json::from_str(r#"{"vp": 2000.0, "vs": 1000.0, "rho": 2200.0}"#).unwrap();
        assert_eq!(rock.rho(), 2200.0);

        let fluid: RockProperties = serde_json::from_str(r#"{"vp": 1500.0, "rho": 1000.0}"#).unwrap();
        assert!(fluid.is_fluid());

        let bad = serde_json::from_str::<RockProperties>(r#"{"vp": -1.0, "rho": 1000.0}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_missing_vs_matches_zero_vs() {
        let brine = RockProperties::fluid(1500.0, 1000.0).unwrap();
        let zero = RockProperties::new(1500.0, Some(0.0), 1000.0).unwrap();
        assert!(brine.same_as(&zero));
        assert!(zero.same_as(&brine));
        assert!(!brine.same_as(&RockProperties::new(1500.0, Some(1.0), 1000.0).unwrap()));
    }
}
