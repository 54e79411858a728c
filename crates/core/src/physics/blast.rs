//! Air blast overpressure
//!
//! A 1 kt reference curve (p₀ at r₀, steep near field, 1/r far field,
//! blended with a smooth weight) is scaled to any yield by the cube-root
//! law: a yield W produces the 1 kt overpressure at range r·W^(1/3).
//!
//! # Scientific References
//! - Glasstone, S., Dolan, P.J. (1977). "The Effects of Nuclear Weapons."
//!   3rd ed., Chapter III (cube-root scaling).
//! - Collins, G.S., Melosh, H.J., Marcus, R.A. (2005). "Earth Impact Effects
//!   Program." Meteoritics & Planetary Science 40(6), Eqs. 54-58.

use crate::config::{BlastThresholds, OverpressureFit};
use crate::core_types::Joules;

/// Smallest yield (kt) used for scaling; keeps tiny bodies finite
const MIN_KILOTONS: f64 = 1e-6;

/// Cube-root yield scale factor W^(1/3)
pub(crate) fn yield_scale(energy: Joules) -> f64 {
    energy.to_kilotons().max(MIN_KILOTONS).cbrt()
}

/// Peak overpressure at range `r` (Pa)
///
/// p(r₁) = w·p₀(r₀/r₁)^n + (1−w)·p₀(r₀/r₁),  w = 1/(1+(r₁/r₀)⁴),  r₁ = r/W^(1/3)
///
/// # Arguments
/// * `energy` - Yield
/// * `range` - Distance from ground zero (m); ranges below 1 m (scaled) are floored
/// * `fit` - 1 kt reference curve
pub fn overpressure_at(energy: Joules, range: f64, fit: &OverpressureFit) -> f64 {
    let scaled = range / yield_scale(energy);
    let ratio = fit.r0 / scaled.max(1.0);
    let near = fit.p0 * ratio.powf(fit.near_exponent);
    let far = fit.p0 * ratio;
    let w = 1.0 / (1.0 + (scaled / fit.r0).powi(4));
    w * near + (1.0 - w) * far
}

/// Range (m) at which overpressure falls to `threshold` (Pa)
///
/// Inverted from the far-field branch: r = W^(1/3) · p₀r₀ / p.
/// Thresholds below 1 Pa are floored.
pub fn radius_for_overpressure(energy: Joules, threshold: f64, fit: &OverpressureFit) -> f64 {
    (fit.p0 * fit.r0 / threshold.max(1.0)) * yield_scale(energy)
}

/// Peak wind speed behind the shock front
///
/// u = √(2Δp/ρ₀)
pub fn peak_wind_speed(overpressure: f64, air_density: f64) -> f64 {
    (2.0 * overpressure / air_density).max(0.0).sqrt()
}

/// Named blast damage radii (m)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlastRadii {
    /// Window breakage / light damage
    pub windows: f64,
    /// Moderate structural damage
    pub moderate: f64,
    /// Severe structural damage
    pub severe: f64,
}

/// Evaluate the three named blast radii
pub fn compute_blast_radii(
    energy: Joules,
    thresholds: &BlastThresholds,
    fit: &OverpressureFit,
) -> BlastRadii {
    BlastRadii {
        windows: radius_for_overpressure(energy, thresholds.windows, fit),
        moderate: radius_for_overpressure(energy, thresholds.moderate, fit),
        severe: radius_for_overpressure(energy, thresholds.severe, fit),
    }
}
