//! JSON result consumed by the map UI
//!
//! Field names are part of the UI contract and are spelled out explicitly,
//! including their unit suffixes. Numeric leaves are rounded to two decimals,
//! latitude and longitude to six.

pub mod curiosities;

pub use curiosities::{describe, Curiosities};

use crate::casualties::{CasualtyEstimate, CasualtyTotals, EffectRadii};
use crate::physics::{DensitySource, EffectsAtRange, ImpactOutputs};
use crate::simulation::ImpactRequest;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Round to 2 decimals
pub fn round2(value: f64) -> f64 {
    round_to(value, 100.0)
}

/// Round to 6 decimals
pub fn round6(value: f64) -> f64 {
    round_to(value, 1.0e6)
}

fn round_to(value: f64, scale: f64) -> f64 {
    let scaled = value * scale;
    if scaled.is_finite() {
        scaled.round() / scale
    } else {
        value
    }
}

/// How the land/water flag was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentSource {
    /// Looked up from the geodata service
    Lookup,
    /// Supplied with the request
    Override,
    /// Lookup failed, treated as land
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputsReport {
    pub latitude: f64,
    pub longitude: f64,
    pub material: Option<String>,
    /// Bulk density used (kg/m³)
    pub density: f64,
    pub density_source: DensitySource,
    /// Burst regime used
    pub mode: String,
    #[serde(rename = "burstAltitude_m")]
    pub burst_altitude_m: Option<f64>,
    pub is_water: bool,
    pub environment_source: EnvironmentSource,
    pub water_depth: Option<f64>,
    #[serde(rename = "diameter_m")]
    pub diameter_m: f64,
    #[serde(rename = "speed_ms")]
    pub speed_ms: f64,
    #[serde(rename = "angle_deg")]
    pub angle_deg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyReport {
    #[serde(rename = "J")]
    pub joules: f64,
    #[serde(rename = "MT")]
    pub megatons: f64,
    #[serde(rename = "velocitySurface_kmh")]
    pub velocity_surface_kmh: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CraterReport {
    pub formed: bool,
    #[serde(rename = "transientDiameter_m")]
    pub transient_diameter_m: f64,
    #[serde(rename = "finalDiameter_m")]
    pub final_diameter_m: f64,
    #[serde(rename = "type")]
    pub crater_type: String,
    #[serde(rename = "depth_m")]
    pub depth_m: f64,
    #[serde(rename = "rimHeight_m")]
    pub rim_height_m: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlastReport {
    #[serde(rename = "windows_5kPa")]
    pub windows: f64,
    #[serde(rename = "moderate_20kPa")]
    pub moderate: f64,
    #[serde(rename = "severe_50kPa")]
    pub severe: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalReport {
    #[serde(rename = "burns2ndDeg_0_25MJm2")]
    pub burns_2nd_degree: f64,
    #[serde(rename = "ignition_1MJm2")]
    pub ignition: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeismicReport {
    pub magnitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TsunamiReport {
    #[serde(rename = "cavityDepth_m")]
    pub cavity_depth_m: f64,
    #[serde(rename = "deepHeightAt50km_m")]
    pub deep_height_at_50km_m: f64,
}

/// Largest effect radius and the area it encloses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffectedReport {
    #[serde(rename = "radius_m")]
    pub radius_m: f64,
    #[serde(rename = "area_m2")]
    pub area_m2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CasualtyReport {
    pub totals: CasualtyTotals,
    #[serde(rename = "radiiUsed_m")]
    pub radii_used_m: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleRow {
    pub range: f64,
    pub overpressure: f64,
    pub wind_speed: f64,
    pub thermal_fluence: f64,
    pub ejecta_thickness: f64,
    #[serde(rename = "seismicMMI")]
    pub seismic_mmi: String,
}

impl From<&EffectsAtRange> for SampleRow {
    fn from(row: &EffectsAtRange) -> Self {
        Self {
            range: round2(row.range),
            overpressure: round2(row.overpressure),
            wind_speed: round2(row.wind_speed),
            thermal_fluence: round2(row.thermal_fluence),
            ejecta_thickness: round2(row.ejecta_thickness),
            seismic_mmi: row.intensity.label().to_string(),
        }
    }
}

/// Complete impact result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactReport {
    pub inputs: InputsReport,
    pub energy: EnergyReport,
    pub crater: CraterReport,
    #[serde(rename = "blastRadii_m")]
    pub blast_radii: BlastReport,
    #[serde(rename = "thermalRadii_m")]
    pub thermal_radii: ThermalReport,
    pub seismic: SeismicReport,
    pub tsunami: Option<TsunamiReport>,
    pub affected: AffectedReport,
    pub curiosities: Curiosities,
    /// `None` when population data was unavailable
    pub casualties: Option<CasualtyReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub samples_table: Option<Vec<SampleRow>>,
}

impl ImpactReport {
    /// Assemble the report from the pipeline results
    pub fn assemble(
        request: &ImpactRequest,
        outputs: &ImpactOutputs,
        effects: &EffectRadii,
        casualties: &CasualtyEstimate,
        environment: EnvironmentSource,
    ) -> Self {
        let material = match outputs.density.material {
            Some(m) => Some(m.label().to_string()),
            None => request.material.clone(),
        };
        let affected_radius = effects.max_radius();

        Self {
            inputs: InputsReport {
                latitude: round6(request.latitude),
                longitude: round6(request.longitude),
                material,
                density: round2(outputs.density.value),
                density_source: outputs.density.source,
                mode: outputs.burst.mode.label().to_string(),
                burst_altitude_m: outputs.burst_altitude().map(round2),
                is_water: outputs.target.is_water(),
                environment_source: environment,
                water_depth: outputs.target.water_depth().map(round2),
                diameter_m: round2(request.diameter),
                speed_ms: round2(request.speed),
                angle_deg: round2(request.angle_deg),
            },
            energy: EnergyReport {
                joules: round2(*outputs.energy.energy),
                megatons: round2(*outputs.energy.megatons),
                velocity_surface_kmh: round2(outputs.energy.surface_velocity.to_kilometers_per_hour()),
            },
            crater: CraterReport {
                formed: outputs.crater.formed,
                transient_diameter_m: round2(outputs.crater.transient_diameter),
                final_diameter_m: round2(outputs.crater.final_diameter),
                crater_type: outputs.crater.crater_type.label().to_string(),
                depth_m: round2(outputs.crater.transient_depth),
                rim_height_m: round2(outputs.crater.rim_height),
            },
            blast_radii: BlastReport {
                windows: round2(outputs.blast.windows),
                moderate: round2(outputs.blast.moderate),
                severe: round2(outputs.blast.severe),
            },
            thermal_radii: ThermalReport {
                burns_2nd_degree: round2(outputs.thermal.burns_2nd_degree),
                ignition: round2(outputs.thermal.ignition),
            },
            seismic: SeismicReport {
                magnitude: round2(outputs.seismic_magnitude),
            },
            tsunami: outputs.tsunami.map(|t| TsunamiReport {
                cavity_depth_m: round2(t.cavity_depth),
                deep_height_at_50km_m: round2(t.height_at_reference),
            }),
            affected: AffectedReport {
                radius_m: round2(affected_radius),
                area_m2: round2(PI * affected_radius * affected_radius),
            },
            curiosities: describe(*outputs.energy.megatons),
            casualties: casualties.is_available().then(|| CasualtyReport {
                totals: casualties.totals,
                radii_used_m: casualties.radii_used.clone(),
            }),
            samples_table: (!outputs.samples.is_empty())
                .then(|| outputs.samples.iter().map(SampleRow::from).collect()),
        }
    }

    /// Serialize to a JSON string
    ///
    /// # Errors
    /// Propagates `serde_json` failures
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to an indented JSON string
    ///
    /// # Errors
    /// Propagates `serde_json` failures
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::casualties::EffectRadii;
    use crate::config::ImpactModelConfig;
    use crate::physics::calculate_impact;

    #[test]
    fn test_rounding() {
        assert_eq!(round2(1.23456), 1.23);
        assert_eq!(round2(-0.005), -0.01);
        assert_eq!(round6(12.345_678_9), 12.345_679);
        assert!(round2(f64::NAN).is_nan());
    }

    #[test]
    fn test_contract_field_names() {
        let config = ImpactModelConfig::default();
        let request = ImpactRequest::new(10.0, 20.0, 500.0, 17_000.0, 45.0)
            .with_material("gold")
            .with_distances(vec![10_000.0]);
        let outputs = calculate_impact(&request.to_inputs(false, &config), &config).unwrap();
        let effects = EffectRadii::from_outputs(&outputs);
        let report = ImpactReport::assemble(
            &request,
            &outputs,
            &effects,
            &CasualtyEstimate::unavailable(vec![1]),
            EnvironmentSource::Override,
        );

        let json = serde_json::to_value(&report).unwrap();
        for path in [
            "/energy/J",
            "/energy/MT",
            "/energy/velocitySurface_kmh",
            "/crater/finalDiameter_m",
            "/crater/type",
            "/crater/depth_m",
            "/crater/rimHeight_m",
            "/blastRadii_m/windows_5kPa",
            "/blastRadii_m/moderate_20kPa",
            "/blastRadii_m/severe_50kPa",
            "/thermalRadii_m/burns2ndDeg_0_25MJm2",
            "/thermalRadii_m/ignition_1MJm2",
            "/seismic/magnitude",
            "/affected/radius_m",
            "/affected/area_m2",
            "/curiosities/headline",
            "/inputs/burstAltitude_m",
            "/samplesTable/0/seismicMMI",
        ] {
            assert!(json.pointer(path).is_some(), "missing {path}");
        }
        assert!(json["tsunami"].is_null());
        assert!(json["casualties"].is_null());
        assert_eq!(json["crater"]["type"], "complex");
        assert_eq!(json["inputs"]["material"], "gold");
    }
}
