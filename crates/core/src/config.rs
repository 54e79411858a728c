//! Model parameter tables and service settings
//!
//! Every constant the physics models depend on lives in an explicitly
//! constructed [`ImpactModelConfig`] that is passed into the calculation.
//! `ImpactModelConfig::default()` reproduces the reference model; tests and
//! the CLI can swap in alternative parameter sets (the CLI loads them from
//! JSON, every field optional).

use crate::casualties::CasualtyRates;
use crate::core_types::Material;
use crate::error::ImpactError;
use crate::lookup::TimeoutPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete parameter set for one impact calculation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactModelConfig {
    /// Density and crater-threshold table per material
    pub materials: MaterialTable,
    /// Standard atmosphere used for entry attenuation and burst altitude
    pub atmosphere: AtmosphereParams,
    /// Airburst altitude defaults
    pub burst: BurstParams,
    /// 1 kt reference overpressure curve
    pub overpressure: OverpressureFit,
    /// Overpressure thresholds for the named blast radii
    pub blast: BlastThresholds,
    /// Fluence thresholds and horizon limit
    pub thermal: ThermalParams,
    /// Seismic coupling
    pub seismic: SeismicParams,
    /// Tsunami reference range
    pub tsunami: TsunamiParams,
    /// Per-effect casualty fractions
    pub casualties: CasualtyRates,
    /// Clamping limits for UI-facing inputs
    pub limits: InputLimits,
    /// Defaults for optional impactor properties
    pub defaults: ImpactorDefaults,
}

// ============================================================================
// MATERIALS
// ============================================================================

/// Physical properties associated with one material class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// Bulk density (kg/m³)
    pub density: f64,
    /// Diameter (m) at or above which the body is assumed to reach the ground
    pub crater_threshold: f64,
}

/// Density fallback when neither density nor material is known
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VelocityDensityHeuristic {
    /// At or above this speed (m/s) the body is assumed porous/cometary
    pub fast_speed: f64,
    /// Density for fast bodies (kg/m³)
    pub fast_density: f64,
    /// At or below this speed (m/s) the body is assumed rocky
    pub slow_speed: f64,
    /// Density for slow bodies (kg/m³)
    pub slow_density: f64,
    /// Density between the two speeds (kg/m³)
    pub intermediate_density: f64,
}

impl Default for VelocityDensityHeuristic {
    fn default() -> Self {
        Self {
            fast_speed: 30_000.0,
            fast_density: 1000.0,
            slow_speed: 20_000.0,
            slow_density: 3000.0,
            intermediate_density: 2500.0,
        }
    }
}

/// Material lookup table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialTable {
    pub comet: MaterialProperties,
    pub carbonaceous: MaterialProperties,
    pub stony: MaterialProperties,
    pub stony_iron: MaterialProperties,
    pub iron: MaterialProperties,
    pub gold: MaterialProperties,
    /// Used for unrecognized material labels and for the auto burst decision
    /// when no material is given
    pub unknown: MaterialProperties,
    /// Used when no material label is given at all
    pub velocity_heuristic: VelocityDensityHeuristic,
}

impl MaterialTable {
    /// Properties for a known material
    pub fn properties(&self, material: Material) -> MaterialProperties {
        match material {
            Material::Comet => self.comet,
            Material::Carbonaceous => self.carbonaceous,
            Material::Stony => self.stony,
            Material::StonyIron => self.stony_iron,
            Material::Iron => self.iron,
            Material::Gold => self.gold,
        }
    }
}

impl Default for MaterialTable {
    fn default() -> Self {
        Self {
            comet: MaterialProperties {
                density: 750.0,
                crater_threshold: 1200.0,
            },
            carbonaceous: MaterialProperties {
                density: 2000.0,
                crater_threshold: 800.0,
            },
            stony: MaterialProperties {
                density: 3000.0,
                crater_threshold: 200.0,
            },
            stony_iron: MaterialProperties {
                density: 4500.0,
                crater_threshold: 120.0,
            },
            iron: MaterialProperties {
                density: 7860.0,
                crater_threshold: 80.0,
            },
            gold: MaterialProperties {
                density: 19320.0,
                crater_threshold: 80.0,
            },
            unknown: MaterialProperties {
                density: 3000.0,
                crater_threshold: 200.0,
            },
            velocity_heuristic: VelocityDensityHeuristic::default(),
        }
    }
}

// ============================================================================
// PHYSICS PARAMETERS
// ============================================================================

/// Isothermal atmosphere and surface gravity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtmosphereParams {
    /// Sea-level air density (kg/m³)
    pub sea_level_density: f64,
    /// Scale height (m)
    pub scale_height: f64,
    /// Surface gravity (m/s²)
    pub gravity: f64,
}

impl Default for AtmosphereParams {
    fn default() -> Self {
        Self {
            sea_level_density: 1.225,
            scale_height: 8000.0,
            gravity: 9.81,
        }
    }
}

/// Airburst altitude defaults (meters)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstParams {
    /// Nominal altitude used by the automatic material/diameter decision
    pub nominal_altitude: f64,
    /// Used when a forced airburst has no physical strength-balance altitude
    pub fallback_altitude: f64,
}

impl Default for BurstParams {
    fn default() -> Self {
        Self {
            nominal_altitude: 20_000.0,
            fallback_altitude: 15_000.0,
        }
    }
}

/// Overpressure curve fit for a 1 kt surface burst
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverpressureFit {
    /// Reference overpressure (Pa)
    pub p0: f64,
    /// Reference range (m)
    pub r0: f64,
    /// Near-field decay exponent
    pub near_exponent: f64,
}

impl Default for OverpressureFit {
    fn default() -> Self {
        Self {
            p0: 75_000.0,
            r0: 290.0,
            near_exponent: 2.3,
        }
    }
}

/// Overpressure thresholds (Pa) for the three named blast radii
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlastThresholds {
    /// Window breakage / light damage
    pub windows: f64,
    /// Moderate structural damage
    pub moderate: f64,
    /// Severe structural damage
    pub severe: f64,
}

impl Default for BlastThresholds {
    fn default() -> Self {
        Self {
            windows: 2_000.0,
            moderate: 10_000.0,
            severe: 30_000.0,
        }
    }
}

/// Thermal radiation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThermalParams {
    /// Fluence for second-degree burns (J/m²)
    pub burns_2nd_degree: f64,
    /// Fluence for ignition of clothing and vegetation (J/m²)
    pub ignition: f64,
    /// Range beyond which the fireball is below the horizon (m)
    pub horizon_limit: f64,
}

impl Default for ThermalParams {
    fn default() -> Self {
        Self {
            burns_2nd_degree: 0.25e6,
            ignition: 1.0e6,
            horizon_limit: 1.5e6,
        }
    }
}

/// Seismic coupling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeismicParams {
    /// Fraction of impact energy radiated as seismic waves
    pub fraction_to_seismic: f64,
}

impl Default for SeismicParams {
    fn default() -> Self {
        Self {
            fraction_to_seismic: 0.01,
        }
    }
}

/// Tsunami reporting parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TsunamiParams {
    /// Range at which the deep-water wave height is reported (m)
    pub reference_range: f64,
}

impl Default for TsunamiParams {
    fn default() -> Self {
        Self {
            reference_range: 50_000.0,
        }
    }
}

// ============================================================================
// INPUTS
// ============================================================================

/// Clamping limits applied to UI-facing parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputLimits {
    /// Smallest accepted diameter (m)
    pub min_diameter: f64,
    /// Slowest accepted entry speed (m/s)
    pub min_speed: f64,
    /// Fastest accepted entry speed (m/s)
    pub max_speed: f64,
    /// Shallowest accepted entry angle (degrees from horizontal)
    pub min_angle_deg: f64,
    /// Steepest accepted entry angle (degrees from horizontal)
    pub max_angle_deg: f64,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            min_diameter: 0.01,
            min_speed: 3_000.0,
            max_speed: 72_000.0,
            min_angle_deg: 5.0,
            max_angle_deg: 90.0,
        }
    }
}

impl InputLimits {
    /// Check that every range is finite, positive and non-inverted
    ///
    /// # Errors
    /// [`ImpactError::InvalidInput`] naming the first offending limit
    pub fn validate(&self) -> Result<(), ImpactError> {
        let positive = [
            ("limits.min_diameter", self.min_diameter),
            ("limits.min_speed", self.min_speed),
            ("limits.min_angle_deg", self.min_angle_deg),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ImpactError::InvalidInput {
                    field,
                    value,
                    expected: "a finite value > 0",
                });
            }
        }
        if !(self.max_speed.is_finite() && self.max_speed >= self.min_speed) {
            return Err(ImpactError::InvalidInput {
                field: "limits.max_speed",
                value: self.max_speed,
                expected: "a finite value >= limits.min_speed",
            });
        }
        if !(self.max_angle_deg.is_finite() && self.max_angle_deg >= self.min_angle_deg) {
            return Err(ImpactError::InvalidInput {
                field: "limits.max_angle_deg",
                value: self.max_angle_deg,
                expected: "a finite value >= limits.min_angle_deg",
            });
        }
        Ok(())
    }
}

/// Values used for optional impactor properties the caller leaves out
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactorDefaults {
    /// Water depth for ocean impacts (m)
    pub water_depth: f64,
    /// Fraction of impact energy emitted as thermal radiation
    pub luminous_efficiency: f64,
    /// Bulk strength of the body (Pa)
    pub body_strength: f64,
}

impl Default for ImpactorDefaults {
    fn default() -> Self {
        Self {
            water_depth: 4000.0,
            luminous_efficiency: 0.003,
            body_strength: 1.0e7,
        }
    }
}

// ============================================================================
// GEODATA SERVICE
// ============================================================================

/// Default geodata service (land/water classification and population counts)
pub const DEFAULT_GEODATA_URL: &str = "https://lobster-app-bhpix.ondigitalocean.app";

/// Settings for the external geodata lookups
#[derive(Debug, Clone, PartialEq)]
pub struct GeodataConfig {
    /// Base URL without trailing slash
    pub base_url: String,
    /// Single-attempt timeout for the land/water lookup
    pub environment_timeouts: TimeoutPolicy,
    /// Fast attempt then one slower retry for the population lookup
    pub population_timeouts: TimeoutPolicy,
}

impl Default for GeodataConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEODATA_URL.to_string(),
            environment_timeouts: TimeoutPolicy::single(Duration::from_secs(10)),
            population_timeouts: TimeoutPolicy::escalating(
                Duration::from_secs(20),
                Duration::from_secs(30),
            ),
        }
    }
}

impl GeodataConfig {
    /// Service rooted at `base_url` with default timeouts
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Read overrides from the environment.
    ///
    /// - `IMPACT_GEODATA_URL`: service base URL
    /// - `IMPACT_GEODATA_TIMEOUT_SECS`: land/water lookup timeout
    ///
    /// Unparsable values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = match std::env::var("IMPACT_GEODATA_URL") {
            Ok(url) if !url.trim().is_empty() => Self::with_base_url(url.trim()),
            _ => Self::default(),
        };

        if let Ok(raw) = std::env::var("IMPACT_GEODATA_TIMEOUT_SECS") {
            match raw.trim().parse::<f64>() {
                Ok(secs) if secs.is_finite() && secs > 0.0 => {
                    config.environment_timeouts =
                        TimeoutPolicy::single(Duration::from_secs_f64(secs));
                }
                _ => tracing::warn!(
                    value = %raw,
                    "Ignoring invalid IMPACT_GEODATA_TIMEOUT_SECS"
                ),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_material_table_matches_reference_values() {
        let table = MaterialTable::default();
        assert_eq!(table.properties(Material::Comet).density, 750.0);
        assert_eq!(table.properties(Material::Gold).density, 19320.0);
        assert_eq!(table.properties(Material::Iron).crater_threshold, 80.0);
        assert_eq!(table.unknown.crater_threshold, 200.0);
    }

    #[test]
    fn test_partial_json_config_keeps_defaults() {
        let json = r#"{ "burst": { "nominal_altitude": 25000.0 }, "seismic": {} }"#;
        let config: ImpactModelConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.burst.nominal_altitude, 25_000.0);
        assert_eq!(config.burst.fallback_altitude, 15_000.0);
        assert_eq!(config.seismic.fraction_to_seismic, 0.01);
        assert_eq!(config.materials, MaterialTable::default());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = GeodataConfig::with_base_url("http://localhost:9000/");
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.population_timeouts.attempts().len(), 2);
    }
}
