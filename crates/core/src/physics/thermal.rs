//! Thermal radiation from the fireball
//!
//! A fraction η (luminous efficiency) of the impact energy is radiated as a
//! point source. Fluence falls off as the inverse square of range and is
//! zero once the fireball is below the horizon.
//!
//! # Scientific References
//! - Collins, G.S., Melosh, H.J., Marcus, R.A. (2005). "Earth Impact Effects
//!   Program." Meteoritics & Planetary Science 40(6), Eqs. 32-37.
//! - Glasstone, S., Dolan, P.J. (1977). "The Effects of Nuclear Weapons."
//!   Table 7.41 (ignition and burn fluences).

use crate::config::ThermalParams;
use crate::core_types::Joules;
use std::f64::consts::PI;

/// Thermal fluence at range `r` (J/m²)
///
/// F = ηE / (4πr²), with r floored at 1 m and F = 0 beyond the horizon limit.
pub fn fluence_at(energy: Joules, luminous_efficiency: f64, range: f64, params: &ThermalParams) -> f64 {
    if range > params.horizon_limit || luminous_efficiency <= 0.0 {
        return 0.0;
    }
    let r = range.max(1.0);
    luminous_efficiency * *energy / (4.0 * PI * r * r)
}

/// Range (m) at which fluence falls to `threshold` (J/m²)
///
/// r = √(ηE / 4πF), capped at the horizon limit since fluence is zero beyond
/// it. Returns 0 when η ≤ 0 or the threshold is ≤ 0.
pub fn radius_for_fluence(
    energy: Joules,
    luminous_efficiency: f64,
    threshold: f64,
    params: &ThermalParams,
) -> f64 {
    if luminous_efficiency <= 0.0 || threshold <= 0.0 {
        return 0.0;
    }
    (luminous_efficiency * *energy / (4.0 * PI * threshold))
        .sqrt()
        .min(params.horizon_limit)
}

/// Named thermal radii (m)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalRadii {
    /// Second-degree burns on exposed skin
    pub burns_2nd_degree: f64,
    /// Clothing and dry vegetation ignite
    pub ignition: f64,
}

/// Evaluate both named thermal radii
pub fn compute_thermal_radii(
    energy: Joules,
    luminous_efficiency: f64,
    params: &ThermalParams,
) -> ThermalRadii {
    ThermalRadii {
        burns_2nd_degree: radius_for_fluence(
            energy,
            luminous_efficiency,
            params.burns_2nd_degree,
            params,
        ),
        ignition: radius_for_fluence(energy, luminous_efficiency, params.ignition, params),
    }
}
