//! Surface impact vs. airburst selection
//!
//! Whether a body survives to the ground depends on its strength, speed,
//! shape and ablation history. None of that is modeled in full here. An
//! explicit mode from the caller is honored; otherwise a per-material
//! diameter threshold stands in as a monotonic proxy (large bodies of any
//! material crater, small weak ones burst aloft).
//!
//! # Scientific References
//! - Chyba, C.F., Thomas, P.J., Zahnle, K.J. (1993). "The 1908 Tunguska
//!   explosion: atmospheric disruption of a stony asteroid." Nature 361.
//! - Collins, G.S., Melosh, H.J., Marcus, R.A. (2005). "Earth Impact Effects
//!   Program." Meteoritics & Planetary Science 40(6), Eq. 11.

use crate::config::{AtmosphereParams, BurstParams, MaterialTable};
use crate::core_types::{BurstMode, BurstModeRequest, Material};
use serde::{Deserialize, Serialize};

/// How the burst decision was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BurstBasis {
    /// Caller forced a surface impact
    ForcedSurface,
    /// Caller forced an airburst at a given altitude
    ForcedAirExplicitAltitude,
    /// Forced airburst, altitude from dynamic pressure vs. strength
    ForcedAirStrengthBalance,
    /// Forced airburst, strength balance gave no positive altitude
    ForcedAirFallback,
    /// Automatic: diameter at or above the material's crater threshold
    MaterialThresholdSurface,
    /// Automatic: diameter below the material's crater threshold
    MaterialThresholdAir,
}

/// Outcome of the burst selection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstDecision {
    /// Regime used for the rest of the calculation
    pub mode: BurstMode,
    /// Burst altitude in meters (0 for surface impacts)
    pub altitude: f64,
    /// Reason for the decision
    pub basis: BurstBasis,
}

impl BurstDecision {
    /// True when the body reaches the ground and a crater forms
    pub fn crater_forms(&self) -> bool {
        self.mode == BurstMode::Surface
    }
}

/// Inputs to the burst decision
#[derive(Debug, Clone, Copy)]
pub struct BurstQuery {
    /// Requested regime
    pub request: BurstModeRequest,
    /// Recognized material, `None` for missing or unknown labels
    pub material: Option<Material>,
    /// Impactor diameter (m)
    pub diameter: f64,
    /// Entry speed (m/s)
    pub velocity: f64,
    /// Bulk strength (Pa)
    pub body_strength: f64,
    /// Altitude override for forced airbursts (m)
    pub explicit_altitude: Option<f64>,
}

/// Burst altitude where ram pressure first exceeds body strength
///
/// Isothermal atmosphere: ρ(z) = ρ₀ exp(−z/H), breakup when ½ρv² = S, so
/// z = H ln(ρ₀v² / 2S).
///
/// # Arguments
/// * `velocity` - Entry speed (m/s)
/// * `strength` - Bulk strength (Pa), floored at 1 Pa
/// * `atmosphere` - Sea-level density and scale height
///
/// # Returns
/// `Some(altitude)` in meters, or `None` when ρ₀v²/2S ≤ 1 (the body would
/// survive to the ground, so the formula gives a non-physical altitude)
pub fn strength_balance_altitude(
    velocity: f64,
    strength: f64,
    atmosphere: &AtmosphereParams,
) -> Option<f64> {
    let ratio = atmosphere.sea_level_density * velocity * velocity / (2.0 * strength.max(1.0));
    if ratio > 1.0 {
        Some(atmosphere.scale_height * ratio.ln())
    } else {
        None
    }
}

/// Diameter (m) at or above which a body of this material is assumed to crater
pub fn crater_threshold(material: Option<Material>, table: &MaterialTable) -> f64 {
    material.map_or(table.unknown.crater_threshold, |m| {
        table.properties(m).crater_threshold
    })
}

/// Decide between surface impact and airburst
pub fn select_burst_mode(
    query: &BurstQuery,
    table: &MaterialTable,
    burst: &BurstParams,
    atmosphere: &AtmosphereParams,
) -> BurstDecision {
    match query.request {
        BurstModeRequest::Surface => BurstDecision {
            mode: BurstMode::Surface,
            altitude: 0.0,
            basis: BurstBasis::ForcedSurface,
        },
        BurstModeRequest::Air => {
            if let Some(altitude) = query.explicit_altitude.filter(|a| a.is_finite() && *a > 0.0) {
                return BurstDecision {
                    mode: BurstMode::Air,
                    altitude,
                    basis: BurstBasis::ForcedAirExplicitAltitude,
                };
            }
            match strength_balance_altitude(query.velocity, query.body_strength, atmosphere) {
                Some(altitude) => BurstDecision {
                    mode: BurstMode::Air,
                    altitude,
                    basis: BurstBasis::ForcedAirStrengthBalance,
                },
                None => {
                    tracing::debug!(
                        velocity = query.velocity,
                        strength = query.body_strength,
                        "Strength balance gives no burst altitude, using fallback"
                    );
                    BurstDecision {
                        mode: BurstMode::Air,
                        altitude: burst.fallback_altitude,
                        basis: BurstBasis::ForcedAirFallback,
                    }
                }
            }
        }
        BurstModeRequest::Auto => {
            if query.diameter >= crater_threshold(query.material, table) {
                BurstDecision {
                    mode: BurstMode::Surface,
                    altitude: 0.0,
                    basis: BurstBasis::MaterialThresholdSurface,
                }
            } else {
                BurstDecision {
                    mode: BurstMode::Air,
                    altitude: burst.nominal_altitude,
                    basis: BurstBasis::MaterialThresholdAir,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(request: BurstModeRequest, material: Option<Material>, diameter: f64) -> BurstQuery {
        BurstQuery {
            request,
            material,
            diameter,
            velocity: 20_000.0,
            body_strength: 1.0e7,
            explicit_altitude: None,
        }
    }

    fn decide(q: &BurstQuery) -> BurstDecision {
        select_burst_mode(
            q,
            &MaterialTable::default(),
            &BurstParams::default(),
            &AtmosphereParams::default(),
        )
    }

    #[test]
    fn test_auto_threshold_flips_mode() {
        let below = decide(&query(BurstModeRequest::Auto, Some(Material::Stony), 199.0));
        let at = decide(&query(BurstModeRequest::Auto, Some(Material::Stony), 200.0));
        assert_eq!(below.mode, BurstMode::Air);
        assert_eq!(below.altitude, 20_000.0);
        assert_eq!(at.mode, BurstMode::Surface);
        assert_eq!(at.altitude, 0.0);
        assert!(at.crater_forms());
    }

    #[test]
    fn test_unknown_material_uses_intermediate_threshold() {
        assert_eq!(crater_threshold(None, &MaterialTable::default()), 200.0);
        let d = decide(&query(BurstModeRequest::Auto, None, 150.0));
        assert_eq!(d.basis, BurstBasis::MaterialThresholdAir);
    }

    #[test]
    fn test_forced_surface_ignores_material() {
        let d = decide(&query(BurstModeRequest::Surface, Some(Material::Comet), 5.0));
        assert_eq!(d.mode, BurstMode::Surface);
        assert_eq!(d.altitude, 0.0);
    }

    #[test]
    fn test_forced_air_strength_balance() {
        // ρ₀v²/2S = 1.225 × 4e8 / 2e7 = 24.5 → z = 8000 ln 24.5 ≈ 25.6 km
        let d = decide(&query(BurstModeRequest::Air, None, 50.0));
        assert_eq!(d.basis, BurstBasis::ForcedAirStrengthBalance);
        assert!((d.altitude - 8000.0 * 24.5_f64.ln()).abs() < 1e-6);
    }

    #[test]
    fn test_forced_air_fallback_for_strong_slow_body() {
        let mut q = query(BurstModeRequest::Air, Some(Material::Iron), 50.0);
        q.velocity = 3_000.0;
        q.body_strength = 1.0e9;
        let d = decide(&q);
        assert_eq!(d.basis, BurstBasis::ForcedAirFallback);
        assert_eq!(d.altitude, 15_000.0);
    }

    #[test]
    fn test_forced_air_explicit_altitude() {
        let mut q = query(BurstModeRequest::Air, None, 50.0);
        q.explicit_altitude = Some(8_500.0);
        let d = decide(&q);
        assert_eq!(d.altitude, 8_500.0);
        assert_eq!(d.basis, BurstBasis::ForcedAirExplicitAltitude);
    }

    #[test]
    fn test_strength_balance_none_below_unity() {
        let atm = AtmosphereParams::default();
        assert!(strength_balance_altitude(100.0, 1.0e7, &atm).is_none());
        // zero strength is floored at 1 Pa instead of dividing by zero
        assert!(strength_balance_altitude(20_000.0, 0.0, &atm).is_some());
    }
}
