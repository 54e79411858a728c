//! End-to-end impact effects calculation
//!
//! Chains the individual models in a fixed order:
//! density → burst regime → energy → crater → blast/thermal/seismic →
//! tsunami → per-range samples.
//!
//! Everything here is a pure function of [`ImpactInputs`] and the injected
//! [`ImpactModelConfig`]. Identical inputs give bit-identical outputs.

use crate::config::ImpactModelConfig;
use crate::core_types::{BurstMode, BurstModeRequest, Geometry, TargetMedium};
use crate::error::{ensure_finite, ensure_finite_output, ImpactError};
use crate::physics::blast::{compute_blast_radii, BlastRadii};
use crate::physics::burst::{select_burst_mode, BurstDecision, BurstQuery};
use crate::physics::crater::{compute_crater, CraterGeometry};
use crate::physics::energy::{compute_energy, EnergyBudget};
use crate::physics::material::{resolve_density, ResolvedDensity};
use crate::physics::samples::{sample_effects, EffectsAtRange, SampleContext};
use crate::physics::seismic::seismic_magnitude;
use crate::physics::thermal::{compute_thermal_radii, ThermalRadii};
use crate::physics::tsunami::{compute_tsunami, TsunamiEstimate};
use std::f64::consts::FRAC_PI_2;

/// Physical description of one impact
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactInputs {
    /// Impactor diameter (m), > 0
    pub diameter: f64,
    /// Bulk density (kg/m³); resolved from material or speed when absent
    pub density: Option<f64>,
    /// Entry speed (m/s), > 0
    pub velocity: f64,
    /// Entry angle from horizontal (rad), in (0, π/2]
    pub angle: f64,
    /// Shape class (drag coefficient only)
    pub geometry: Geometry,
    /// Land or water of a given depth
    pub target: TargetMedium,
    /// UI material label
    pub material: Option<String>,
    /// Fraction of energy radiated thermally; model default when absent
    pub luminous_efficiency: Option<f64>,
    /// Bulk strength (Pa); model default when absent
    pub body_strength: Option<f64>,
    /// Requested burst regime
    pub burst_mode: BurstModeRequest,
    /// Airburst altitude override (m), only used for forced airbursts
    pub burst_altitude: Option<f64>,
    /// Ranges (m) for the per-distance sample rows
    pub distances: Vec<f64>,
}

impl ImpactInputs {
    /// Inputs with every optional field left to the model defaults
    pub fn new(diameter: f64, velocity: f64, angle: f64) -> Self {
        Self {
            diameter,
            density: None,
            velocity,
            angle,
            geometry: Geometry::default(),
            target: TargetMedium::Land,
            material: None,
            luminous_efficiency: None,
            body_strength: None,
            burst_mode: BurstModeRequest::default(),
            burst_altitude: None,
            distances: Vec::new(),
        }
    }

    /// Set the material label
    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    /// Set the target medium
    pub fn with_target(mut self, target: TargetMedium) -> Self {
        self.target = target;
        self
    }

    /// Set the burst regime
    pub fn with_burst_mode(mut self, mode: BurstModeRequest) -> Self {
        self.burst_mode = mode;
        self
    }

    /// Set the sample distances
    pub fn with_distances(mut self, distances: Vec<f64>) -> Self {
        self.distances = distances;
        self
    }

    fn validate(&self) -> Result<(), ImpactError> {
        ensure_finite("diameter", self.diameter)?;
        ensure_finite("velocity", self.velocity)?;
        ensure_finite("angle", self.angle)?;
        if let TargetMedium::Water { depth } = self.target {
            ensure_finite("water_depth", depth)?;
        }

        if self.diameter <= 0.0 {
            return Err(ImpactError::InvalidInput {
                field: "diameter",
                value: self.diameter,
                expected: "> 0 m",
            });
        }
        if self.velocity <= 0.0 {
            return Err(ImpactError::InvalidInput {
                field: "velocity",
                value: self.velocity,
                expected: "> 0 m/s",
            });
        }
        if self.angle <= 0.0 || self.angle > FRAC_PI_2 {
            return Err(ImpactError::InvalidInput {
                field: "angle",
                value: self.angle,
                expected: "(0, π/2] rad",
            });
        }
        Ok(())
    }
}

/// Results of one impact calculation
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactOutputs {
    /// Density used and where it came from
    pub density: ResolvedDensity,
    /// Regime actually used and its altitude
    pub burst: BurstDecision,
    /// Mass, energy, yield and surface speed
    pub energy: EnergyBudget,
    /// Crater geometry (all zero when no crater forms)
    pub crater: CraterGeometry,
    /// Overpressure radii
    pub blast: BlastRadii,
    /// Fluence radii
    pub thermal: ThermalRadii,
    /// Effective earthquake magnitude
    pub seismic_magnitude: f64,
    /// Present only for crater-forming ocean impacts
    pub tsunami: Option<TsunamiEstimate>,
    /// One row per usable requested distance
    pub samples: Vec<EffectsAtRange>,
    /// Target the calculation ran against
    pub target: TargetMedium,
    /// Luminous efficiency actually used
    pub luminous_efficiency: f64,
    /// Body strength actually used (Pa)
    pub body_strength: f64,
}

impl ImpactOutputs {
    /// True when the body reached the ground and cratered
    pub fn crater_formed(&self) -> bool {
        self.crater.formed
    }

    /// Burst regime used
    pub fn burst_mode(&self) -> BurstMode {
        self.burst.mode
    }

    /// Burst altitude (m); 0 for surface impacts
    pub fn burst_altitude(&self) -> Option<f64> {
        Some(self.burst.altitude)
    }
}

/// Run the full physics chain
///
/// # Errors
/// - [`ImpactError::NonFiniteInput`] / [`ImpactError::InvalidInput`] when the
///   inputs violate their invariants
/// - [`ImpactError::CalculationFailed`] when a headline output is not finite
pub fn calculate_impact(
    inputs: &ImpactInputs,
    config: &ImpactModelConfig,
) -> Result<ImpactOutputs, ImpactError> {
    inputs.validate()?;
    let density = resolve_density(
        inputs.density,
        inputs.material.as_deref(),
        inputs.velocity,
        &config.materials,
    );
    calculate_impact_with_density(inputs, density, config)
}

/// Run the physics chain with an already resolved density
///
/// # Errors
/// Same as [`calculate_impact`]
pub fn calculate_impact_with_density(
    inputs: &ImpactInputs,
    density: ResolvedDensity,
    config: &ImpactModelConfig,
) -> Result<ImpactOutputs, ImpactError> {
    inputs.validate()?;
    ensure_finite("density", density.value)?;

    let body_strength = inputs
        .body_strength
        .filter(|s| s.is_finite())
        .unwrap_or(config.defaults.body_strength);
    let luminous_efficiency = inputs
        .luminous_efficiency
        .filter(|eta| eta.is_finite())
        .unwrap_or(config.defaults.luminous_efficiency);

    let burst = select_burst_mode(
        &BurstQuery {
            request: inputs.burst_mode,
            material: density.material,
            diameter: inputs.diameter,
            velocity: inputs.velocity,
            body_strength,
            explicit_altitude: inputs.burst_altitude,
        },
        &config.materials,
        &config.burst,
        &config.atmosphere,
    );

    let energy = compute_energy(
        inputs.diameter,
        density.value,
        inputs.velocity,
        inputs.angle,
        inputs.geometry.drag_coefficient(),
        burst.crater_forms(),
        &config.atmosphere,
    );
    ensure_finite_output("energy", *energy.energy)?;
    ensure_finite_output("surface velocity", *energy.surface_velocity)?;

    let crater = if burst.crater_forms() {
        compute_crater(
            inputs.diameter,
            *energy.surface_velocity,
            density.value,
            inputs.angle,
            config.atmosphere.gravity,
            inputs.target,
        )
    } else {
        CraterGeometry::none()
    };
    ensure_finite_output("final crater diameter", crater.final_diameter)?;

    let blast = compute_blast_radii(energy.energy, &config.blast, &config.overpressure);
    let thermal = compute_thermal_radii(energy.energy, luminous_efficiency, &config.thermal);
    let magnitude = seismic_magnitude(energy.energy, &config.seismic);
    for (what, value) in [
        ("blast radius", blast.windows),
        ("thermal radius", thermal.burns_2nd_degree),
        ("seismic magnitude", magnitude),
    ] {
        ensure_finite_output(what, value)?;
    }

    let tsunami = compute_tsunami(&crater, inputs.target.water_depth(), &config.tsunami);

    let samples = sample_effects(
        &inputs.distances,
        &SampleContext {
            energy: energy.energy,
            luminous_efficiency,
            magnitude,
            crater: &crater,
            config,
        },
    );

    tracing::debug!(
        mode = burst.mode.label(),
        altitude_m = burst.altitude,
        megatons = *energy.megatons,
        crater_m = crater.final_diameter,
        "Impact physics evaluated"
    );

    Ok(ImpactOutputs {
        density,
        burst,
        energy,
        crater,
        blast,
        thermal,
        seismic_magnitude: magnitude,
        tsunami,
        samples,
        target: inputs.target,
        luminous_efficiency,
        body_strength,
    })
}
