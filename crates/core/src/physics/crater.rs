//! Crater scaling
//!
//! Transient crater diameter from pi-group scaling, collapse to the final
//! crater (simple bowl or complex crater with central uplift), depth, rim
//! height and ejecta blanket thickness.
//!
//! # Scientific References
//! - Holsapple, K.A., Schmidt, R.M. (1982). "On the scaling of crater
//!   dimensions 2. Impact processes." JGR 87(B3).
//! - Collins, G.S., Melosh, H.J., Marcus, R.A. (2005). "Earth Impact Effects
//!   Program." Meteoritics & Planetary Science 40(6), Eqs. 21, 22, 27, 28, 31.
//! - McGetchin, T.R., Settle, M., Head, J.W. (1973). "Radial thickness
//!   variation in impact crater ejecta." EPSL 20.

use crate::core_types::TargetMedium;
use serde::{Deserialize, Serialize};

/// Transient diameter above which the crater collapses into a complex form (m)
pub const SIMPLE_COMPLEX_TRANSITION: f64 = 2_560.0;

/// Final diameter at the simple-complex transition on Earth (km)
const COMPLEX_REFERENCE_DIAMETER_KM: f64 = 3.2;

/// Morphological crater class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CraterType {
    /// Bowl-shaped crater
    Simple,
    /// Collapsed crater with central peak/terraces
    Complex,
    /// No crater (airburst)
    None,
}

impl CraterType {
    /// Report label
    pub fn label(self) -> &'static str {
        match self {
            CraterType::Simple => "simple",
            CraterType::Complex => "complex",
            CraterType::None => "none",
        }
    }
}

/// Crater dimensions, all in meters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CraterGeometry {
    /// Whether a crater forms at all
    pub formed: bool,
    /// Transient cavity diameter
    pub transient_diameter: f64,
    /// Final rim-to-rim diameter
    pub final_diameter: f64,
    /// Morphology
    pub crater_type: CraterType,
    /// Transient cavity depth
    pub transient_depth: f64,
    /// Rim height above the surrounding surface
    pub rim_height: f64,
}

impl CraterGeometry {
    /// Geometry for impacts that do not crater
    pub fn none() -> Self {
        Self {
            formed: false,
            transient_diameter: 0.0,
            final_diameter: 0.0,
            crater_type: CraterType::None,
            transient_depth: 0.0,
            rim_height: 0.0,
        }
    }

    /// Final crater radius (0 when no crater)
    pub fn final_radius(&self) -> f64 {
        self.final_diameter / 2.0
    }
}

/// Transient crater diameter
///
/// `D_tc = C (ρᵢ/ρₜ)^(1/3) L^0.78 vᵢ^0.44 g^(−0.22) sin(θ)^(1/3)`
///
/// # Arguments
/// * `diameter` - Impactor diameter L (m)
/// * `velocity` - Impact speed at the surface (m/s)
/// * `impactor_density` - ρᵢ (kg/m³)
/// * `angle` - Impact angle from horizontal (rad)
/// * `gravity` - Surface gravity (m/s²)
/// * `target` - Target medium (sets C and ρₜ)
pub fn transient_diameter(
    diameter: f64,
    velocity: f64,
    impactor_density: f64,
    angle: f64,
    gravity: f64,
    target: TargetMedium,
) -> f64 {
    target.crater_scaling_coefficient()
        * (impactor_density / target.bulk_density()).cbrt()
        * diameter.powf(0.78)
        * velocity.powf(0.44)
        * gravity.powf(-0.22)
        * angle.sin().cbrt()
}

/// Final crater diameter and type from the transient diameter (both in m)
///
/// Simple: `D_f = 1.25 D_tc`. Complex: `D_f = 1.17 D_tc^1.13 / D_c^0.13` (km).
pub fn final_from_transient(transient: f64) -> (f64, CraterType) {
    if transient <= SIMPLE_COMPLEX_TRANSITION {
        return (1.25 * transient, CraterType::Simple);
    }
    let transient_km = transient / 1000.0;
    let final_km = 1.17 * transient_km.powf(1.13) / COMPLEX_REFERENCE_DIAMETER_KM.powf(0.13);
    (final_km * 1000.0, CraterType::Complex)
}

/// Transient cavity depth `d = D_tc / 2√2`
pub fn transient_depth(transient: f64) -> f64 {
    transient / (2.0 * std::f64::consts::SQRT_2)
}

/// Rim height h = 0.07 D_tc⁴ / D_f³
pub fn rim_height(transient: f64, final_diameter: f64) -> f64 {
    if final_diameter <= 0.0 {
        return 0.0;
    }
    0.07 * transient.powi(4) / final_diameter.powi(3)
}

/// Ejecta blanket thickness at range `r`
///
/// Equal to the rim thickness inside the rim, falling off as (R/r)³ outside.
pub fn ejecta_thickness_at(range: f64, rim_radius: f64, rim_thickness: f64) -> f64 {
    if range <= rim_radius {
        rim_thickness
    } else {
        rim_thickness * (rim_radius / range).powi(3)
    }
}

/// Full crater geometry for a ground impact
pub fn compute_crater(
    diameter: f64,
    surface_velocity: f64,
    impactor_density: f64,
    angle: f64,
    gravity: f64,
    target: TargetMedium,
) -> CraterGeometry {
    let d_tc = transient_diameter(diameter, surface_velocity, impactor_density, angle, gravity, target);
    let (d_f, crater_type) = final_from_transient(d_tc);

    CraterGeometry {
        formed: true,
        transient_diameter: d_tc,
        final_diameter: d_f,
        crater_type,
        transient_depth: transient_depth(d_tc),
        rim_height: rim_height(d_tc, d_f),
    }
}
