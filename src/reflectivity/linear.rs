//! Linearized reflectivity approximations
//!
//! Small-contrast approximations to the exact P-P coefficient. They are
//! reliable below roughly 30-40 degrees. Shear terms are written so that a
//! vanishing mean shear velocity (fluid on both sides) gives a zero shear
//! contribution instead of 0/0.

use super::transmitted_angle;
use crate::rock::RockProperties;

/// Contrasts (lower - upper) and means of the two layers
struct Contrast {
    dvp: f64,
    dvs: f64,
    drho: f64,
    vp: f64,
    vs: f64,
    rho: f64,
}

impl Contrast {
    fn new(upper: &RockProperties, lower: &RockProperties) -> Self {
        Self {
            dvp: lower.vp() - upper.vp(),
            dvs: lower.vs() - upper.vs(),
            drho: lower.rho() - upper.rho(),
            vp: 0.5 * (upper.vp() + lower.vp()),
            vs: 0.5 * (upper.vs() + lower.vs()),
            rho: 0.5 * (upper.rho() + lower.rho()),
        }
    }
}

/// Incidence angle and mean of incidence and transmission angles, in radians
fn angles(upper: &RockProperties, lower: &RockProperties, theta_deg: f64) -> (f64, f64) {
    let theta1 = theta_deg.to_radians();
    let theta2 = transmitted_angle(upper.vp(), lower.vp(), theta1);
    (theta1, 0.5 * (theta1 + theta2))
}

/// Aki-Richards three-term approximation
pub fn akirichards(upper: &RockProperties, lower: &RockProperties, theta_deg: f64) -> f64 {
    let c = Contrast::new(upper, lower);
    let (theta1, theta) = angles(upper, lower, theta_deg);

    let p = theta1.sin() / upper.vp();
    let p2vs2 = p * p * c.vs * c.vs;
    let cos2 = theta.cos().powi(2);

    0.5 * (1.0 - 4.0 * p2vs2) * c.drho / c.rho + 0.5 * c.dvp / (c.vp * cos2)
        - 4.0 * p * p * c.vs * c.dvs
}

/// Intercept and gradient of the Shuey form, plus the curvature term
fn shuey_terms(upper: &RockProperties, lower: &RockProperties) -> (f64, f64, f64) {
    let c = Contrast::new(upper, lower);
    let k = c.vs * c.vs / (c.vp * c.vp);

    let r0 = 0.5 * (c.dvp / c.vp + c.drho / c.rho);
    let g = 0.5 * c.dvp / c.vp - 2.0 * k * c.drho / c.rho - 4.0 * c.vs * c.dvs / (c.vp * c.vp);
    let f = 0.5 * c.dvp / c.vp;
    (r0, g, f)
}

/// Shuey three-term approximation
pub fn shuey(upper: &RockProperties, lower: &RockProperties, theta_deg: f64) -> f64 {
    let (r0, g, f) = shuey_terms(upper, lower);
    let (_, theta) = angles(upper, lower, theta_deg);

    let sin2 = theta.sin().powi(2);
    let tan2 = theta.tan().powi(2);
    r0 + g * sin2 + f * (tan2 - sin2)
}

/// Shuey two-term (intercept + gradient) approximation
pub fn shuey_two_term(upper: &RockProperties, lower: &RockProperties, theta_deg: f64) -> f64 {
    let (r0, g, _) = shuey_terms(upper, lower);
    let (_, theta) = angles(upper, lower, theta_deg);

    r0 + g * theta.sin().powi(2)
}

/// Fatti et al. (1994) impedance-contrast form
pub fn fatti(upper: &RockProperties, lower: &RockProperties, theta_deg: f64) -> f64 {
    let c = Contrast::new(upper, lower);
    let (_, theta) = angles(upper, lower, theta_deg);

    let ip = 0.5 * (upper.acoustic_impedance() + lower.acoustic_impedance());
    let dip = lower.acoustic_impedance() - upper.acoustic_impedance();
    let is = 0.5 * (upper.shear_impedance() + lower.shear_impedance());
    let dis = lower.shear_impedance() - upper.shear_impedance();

    let k = c.vs * c.vs / (c.vp * c.vp);
    let sin2 = theta.sin().powi(2);
    let tan2 = theta.tan().powi(2);

    let shear = if is > 0.0 { 4.0 * k * sin2 * dis / is } else { 0.0 };

    (1.0 + tan2) * dip / (2.0 * ip) - shear - (0.5 * tan2 - 2.0 * k * sin2) * c.drho / c.rho
}

/// Bortfeld (1961) logarithmic approximation
///
/// The shear factor `(vs1^2 - vs2^2) ln(rho2/rho1) / ln(vs2/vs1)` is replaced
/// by its limit when the shear velocities coincide, and by zero when either
/// side is a fluid.
pub fn bortfeld(upper: &RockProperties, lower: &RockProperties, theta_deg: f64) -> f64 {
    let (vp1, vs1, rho1) = (upper.vp(), upper.vs(), upper.rho());
    let (vp2, vs2, rho2) = (lower.vp(), lower.vs(), lower.rho());

    let theta1 = theta_deg.to_radians();
    let theta2 = transmitted_angle(vp1, vp2, theta1);

    let acoustic = 0.5 * ((vp2 * rho2 * theta1.cos()) / (vp1 * rho1 * theta2.cos())).ln();

    let p2 = (theta1.sin() / vp1).powi(2);
    let dvs2 = vs1 * vs1 - vs2 * vs2;
    let log_rho = (rho2 / rho1).ln();

    let density_shear = if vs1 <= 0.0 || vs2 <= 0.0 {
        0.0
    } else {
        let log_vs = (vs2 / vs1).ln();
        if log_vs.abs() < 1e-12 {
            -2.0 * vs1 * vs2 * log_rho
        } else {
            dvs2 * log_rho / log_vs
        }
    };

    acoustic + p2 * (2.0 * dvs2 + density_shear)
}
