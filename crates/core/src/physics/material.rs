//! Impactor bulk density resolution
//!
//! Density is resolved through a fixed fallback chain:
//! 1. Explicit density from the caller (finite and positive)
//! 2. Material table lookup (unrecognized labels use the stony default)
//! 3. Entry-speed heuristic (fast bodies are assumed porous/cometary)
//!
//! The chain never fails. Callers that need to know which link produced the
//! value inspect [`ResolvedDensity::source`].

use crate::config::MaterialTable;
use crate::core_types::Material;
use serde::{Deserialize, Serialize};

/// Where a resolved density came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DensitySource {
    /// Caller supplied the density
    Explicit,
    /// Looked up from a recognized material label
    MaterialTable,
    /// Label was given but not recognized; stony default used
    UnknownMaterial,
    /// No density and no material; estimated from entry speed
    VelocityHeuristic,
}

impl DensitySource {
    /// True when the value came from a fallback rather than caller data
    pub fn is_defaulted(self) -> bool {
        matches!(
            self,
            DensitySource::UnknownMaterial | DensitySource::VelocityHeuristic
        )
    }
}

/// Density together with its provenance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedDensity {
    /// Bulk density (kg/m³), always positive
    pub value: f64,
    /// Which link of the fallback chain produced it
    pub source: DensitySource,
    /// Parsed material, if the label was recognized
    pub material: Option<Material>,
}

/// Resolve the impactor bulk density
///
/// # Arguments
/// * `explicit_density` - Caller-supplied density (kg/m³), used when finite and > 0
/// * `material_label` - UI material label
/// * `velocity` - Entry speed (m/s), used only by the heuristic
/// * `table` - Material lookup table
///
/// # Returns
/// Positive density with its source
pub fn resolve_density(
    explicit_density: Option<f64>,
    material_label: Option<&str>,
    velocity: f64,
    table: &MaterialTable,
) -> ResolvedDensity {
    let material = material_label.and_then(Material::from_label);

    if let Some(rho) = explicit_density.filter(|rho| rho.is_finite() && *rho > 0.0) {
        return ResolvedDensity {
            value: rho,
            source: DensitySource::Explicit,
            material,
        };
    }

    match (material_label, material) {
        (_, Some(m)) => ResolvedDensity {
            value: table.properties(m).density,
            source: DensitySource::MaterialTable,
            material: Some(m),
        },
        (Some(label), None) => {
            tracing::warn!(label, "Unrecognized material label, using stony density");
            ResolvedDensity {
                value: table.unknown.density,
                source: DensitySource::UnknownMaterial,
                material: None,
            }
        }
        (None, None) => ResolvedDensity {
            value: density_from_velocity(velocity, table),
            source: DensitySource::VelocityHeuristic,
            material: None,
        },
    }
}

/// Estimate bulk density from entry speed alone
///
/// Long-period comets arrive fastest; slow impactors are predominantly rocky
/// near-Earth asteroids.
pub(crate) fn density_from_velocity(velocity: f64, table: &MaterialTable) -> f64 {
    let h = &table.velocity_heuristic;
    if velocity >= h.fast_speed {
        h.fast_density
    } else if velocity <= h.slow_speed {
        h.slow_density
    } else {
        h.intermediate_density
    }
}
