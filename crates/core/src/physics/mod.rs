//! Impact physics models

pub(crate) mod blast;
pub(crate) mod burst;
pub(crate) mod crater;
pub(crate) mod energy;
pub(crate) mod impact;
pub(crate) mod material;
pub(crate) mod samples;
pub(crate) mod seismic;
pub(crate) mod thermal;
pub(crate) mod tsunami;

pub use blast::BlastRadii;
pub use burst::{BurstBasis, BurstDecision};
pub use crater::{CraterGeometry, CraterType};
pub use energy::EnergyBudget;
pub use impact::{calculate_impact, calculate_impact_with_density, ImpactInputs, ImpactOutputs};
pub use material::{resolve_density, DensitySource, ResolvedDensity};
pub use samples::EffectsAtRange;
pub use seismic::SeismicIntensity;
pub use thermal::ThermalRadii;
pub use tsunami::TsunamiEstimate;

// ============================================================================
// PUBLIC RE-EXPORTS FOR VALIDATION TESTING
// ============================================================================
// Individual model functions are exported so integration tests can check
// them against published reference values.

/// Public re-exports of validation test functions from energy module
pub mod energy_validation {
    pub use super::energy::{kinetic_energy, sphere_mass, surface_velocity};
}

/// Public re-exports of validation test functions from burst and material modules
pub mod burst_validation {
    pub use super::burst::{crater_threshold, strength_balance_altitude};
    pub use super::material::resolve_density;
}

/// Public re-exports of validation test functions from crater module
pub mod crater_validation {
    pub use super::crater::{
        final_from_transient, rim_height, transient_depth, transient_diameter,
        SIMPLE_COMPLEX_TRANSITION,
    };
}

/// Public re-exports of validation test functions from blast module
pub mod blast_validation {
    pub use super::blast::{overpressure_at, peak_wind_speed, radius_for_overpressure};
}

/// Public re-exports of validation test functions from thermal module
pub mod thermal_validation {
    pub use super::thermal::{fluence_at, radius_for_fluence};
}

/// Public re-exports of validation test functions from seismic and tsunami modules
pub mod seismic_validation {
    pub use super::seismic::{intensity_at, seismic_magnitude};
    pub use super::tsunami::{cavity_depth, wave_height_at};
}
