//! Impact-generated tsunami in deep water
//!
//! The water cavity depth is limited by the local ocean depth. Outside the
//! cavity the wave amplitude decays as 1/r.
//!
//! # Scientific References
//! - Ward, S.N., Asphaug, E. (2000). "Asteroid impact tsunami: a
//!   probabilistic hazard assessment." Icarus 145.
//! - Collins, G.S., Melosh, H.J., Marcus, R.A. (2005). "Earth Impact Effects
//!   Program." Meteoritics & Planetary Science 40(6), Eqs. 51-53.

use crate::config::TsunamiParams;
use crate::physics::crater::CraterGeometry;

/// Tsunami estimate for an ocean impact (meters)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TsunamiEstimate {
    /// Initial cavity depth
    pub cavity_depth: f64,
    /// Cavity radius
    pub cavity_radius: f64,
    /// Wave amplitude at the reference range
    pub height_at_reference: f64,
    /// Reference range
    pub reference_range: f64,
}

/// Cavity depth = min(0.25 `D_tc`, water depth), water depth floored at 1 m
pub fn cavity_depth(transient_diameter: f64, water_depth: f64) -> f64 {
    (0.25 * transient_diameter).min(water_depth.max(1.0))
}

/// Wave amplitude at range `r`
///
/// `h(r) = ½·cavity·(R_c/r)` for `r > R_c`, else ½·cavity.
pub fn wave_height_at(range: f64, cavity_depth: f64, cavity_radius: f64) -> f64 {
    let half = 0.5 * cavity_depth;
    if range > cavity_radius && range > 0.0 {
        half * (cavity_radius / range)
    } else {
        half
    }
}

/// Tsunami estimate, `None` unless a crater forms in water
pub fn compute_tsunami(
    crater: &CraterGeometry,
    water_depth: Option<f64>,
    params: &TsunamiParams,
) -> Option<TsunamiEstimate> {
    let depth = water_depth?;
    if !crater.formed {
        return None;
    }

    let cavity = cavity_depth(crater.transient_diameter, depth);
    let radius = if crater.transient_diameter > 0.0 {
        crater.transient_diameter / 2.0
    } else {
        crater.final_diameter / 2.0
    };

    Some(TsunamiEstimate {
        cavity_depth: cavity,
        cavity_radius: radius,
        height_at_reference: wave_height_at(params.reference_range, cavity, radius),
        reference_range: params.reference_range,
    })
}
