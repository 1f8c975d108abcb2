//! Exact P-P reflectivity (Zoeppritz)
//!
//! Full plane-wave solution of the boundary conditions at a welded
//! elastic interface, following the closed form of Aki & Richards (1980).
//! The shear-wave cosines are carried multiplied by the opposite layer's
//! shear velocity so that a fluid layer (Vs = 0) stays finite.

use crate::rock::RockProperties;
use num_complex::Complex64;

/// Complex P-P reflection coefficient
///
/// Below the critical angle the imaginary part is zero. Beyond it the
/// vertical slownesses become imaginary and so does the coefficient.
///
/// # Arguments
/// * `upper` - Incident-side layer
/// * `lower` - Transmitted-side layer
/// * `theta_deg` - Incidence angle in degrees
pub fn zoeppritz_complex(upper: &RockProperties, lower: &RockProperties, theta_deg: f64) -> Complex64 {
    if upper.same_as(lower) {
        return Complex64::new(0.0, 0.0);
    }

    let (vp1, vs1, rho1) = (upper.vp(), upper.vs(), upper.rho());
    let (vp2, vs2, rho2) = (lower.vp(), lower.vs(), lower.rho());

    let theta1 = theta_deg.to_radians();
    let p = theta1.sin() / vp1;
    let p2 = p * p;

    // cos of the ray angle in a medium of velocity v, for ray parameter p
    let cosine = |v: f64| Complex64::new(1.0 - p2 * v * v, 0.0).sqrt();

    let cos_t1 = Complex64::new(theta1.cos(), 0.0);
    let cos_t2 = cosine(vp2);

    if upper.is_fluid() && lower.is_fluid() {
        let z1 = rho1 * vp1;
        let z2 = rho2 * vp2;
        return (cos_t1 * z2 - cos_t2 * z1) / (cos_t1 * z2 + cos_t2 * z1);
    }

    let cos_p1 = cosine(vs1);
    let cos_p2 = cosine(vs2);

    let a = rho2 * (1.0 - 2.0 * vs2 * vs2 * p2) - rho1 * (1.0 - 2.0 * vs1 * vs1 * p2);
    let b = rho2 * (1.0 - 2.0 * vs2 * vs2 * p2) + 2.0 * rho1 * vs1 * vs1 * p2;
    let c = rho1 * (1.0 - 2.0 * vs1 * vs1 * p2) + 2.0 * rho2 * vs2 * vs2 * p2;
    let d = 2.0 * (rho2 * vs2 * vs2 - rho1 * vs1 * vs1);

    // vertical P slownesses
    let q1 = cos_t1 / vp1;
    let q2 = cos_t2 / vp2;

    // E, F*vs1*vs2, G*vs2, H*vs1
    let e = q1 * b + q2 * c;
    let f = cos_p1 * (b * vs2) + cos_p2 * (c * vs1);
    let g = -(q1 * cos_p2 * d) + a * vs2;
    let h = -(q2 * cos_p1 * d) + a * vs1;

    let numerator = (q1 * b - q2 * c) * f - (q1 * cos_p2 * d + a * vs2) * h * p2;
    let denominator = e * f + g * h * p2;

    numerator / denominator
}

/// Real-valued P-P reflection coefficient
///
/// Reports the real part of [`zoeppritz_complex`]. Pre-critical values are
/// unchanged; post-critical values keep their sign convention rather than
/// folding to a magnitude.
pub fn zoeppritz(upper: &RockProperties, lower: &RockProperties, theta_deg: f64) -> f64 {
    zoeppritz_complex(upper, lower, theta_deg).re
}
