//! Impactor mass, kinetic energy and atmospheric deceleration
//!
//! # Scientific References
//! - Collins, G.S., Melosh, H.J., Marcus, R.A. (2005). "Earth Impact Effects
//!   Program." Meteoritics & Planetary Science 40(6), Eqs. 1 and 8.

use crate::config::AtmosphereParams;
use crate::core_types::{Joules, Megatons, MetersPerSecond};

/// Smallest sine of the entry angle used in the drag exponent
const MIN_SIN_ANGLE: f64 = 1e-3;

/// Mass of a solid sphere
///
/// m = (π/6) ρ d³
///
/// # Arguments
/// * `diameter` - Diameter (m)
/// * `density` - Bulk density (kg/m³)
pub fn sphere_mass(diameter: f64, density: f64) -> f64 {
    std::f64::consts::PI / 6.0 * density * diameter.powi(3)
}

/// Kinetic energy E = ½mv²
pub fn kinetic_energy(mass: f64, velocity: f64) -> Joules {
    Joules::new(0.5 * mass * velocity * velocity)
}

/// Speed at the ground after atmospheric drag
///
/// `v_surf = v₀ exp(−3ρ₀C_dH / (4ρᵢ d sinθ))`
///
/// # Arguments
/// * `entry_velocity` - Speed at the top of the atmosphere (m/s)
/// * `diameter` - Impactor diameter (m)
/// * `density` - Impactor bulk density (kg/m³)
/// * `angle` - Entry angle from horizontal (rad); sinθ floored at 1e-3
/// * `drag_coefficient` - Shape drag coefficient
/// * `atmosphere` - Sea-level density and scale height
pub fn surface_velocity(
    entry_velocity: f64,
    diameter: f64,
    density: f64,
    angle: f64,
    drag_coefficient: f64,
    atmosphere: &AtmosphereParams,
) -> f64 {
    let attenuation = (3.0 * atmosphere.sea_level_density * drag_coefficient * atmosphere.scale_height)
        / (4.0 * density * diameter * angle.sin().max(MIN_SIN_ANGLE));
    entry_velocity * (-attenuation).exp()
}

/// Energy budget of the impact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyBudget {
    /// Impactor mass (kg)
    pub mass: f64,
    /// Kinetic energy at atmospheric entry
    pub energy: Joules,
    /// TNT-equivalent yield
    pub megatons: Megatons,
    /// Speed at the ground (equals entry speed for airbursts)
    pub surface_velocity: MetersPerSecond,
}

/// Compute mass, energy and surface velocity
///
/// Energy is always evaluated at the entry speed. The attenuated surface
/// velocity is only computed when the body reaches the ground, since it feeds
/// crater scaling and nothing else.
pub fn compute_energy(
    diameter: f64,
    density: f64,
    velocity: f64,
    angle: f64,
    drag_coefficient: f64,
    reaches_ground: bool,
    atmosphere: &AtmosphereParams,
) -> EnergyBudget {
    let mass = sphere_mass(diameter, density);
    let energy = kinetic_energy(mass, velocity);
    let v_surface = if reaches_ground {
        surface_velocity(velocity, diameter, density, angle, drag_coefficient, atmosphere)
    } else {
        velocity
    };

    EnergyBudget {
        mass,
        energy,
        megatons: energy.to_megatons(),
        surface_velocity: MetersPerSecond::new(v_surface),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn test_energy_scales_with_diameter_cubed() {
        let e1 = kinetic_energy(sphere_mass(100.0, 3000.0), 20_000.0);
        let e2 = kinetic_energy(sphere_mass(200.0, 3000.0), 20_000.0);
        assert!((*e2 / *e1 - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_energy_scales_with_velocity_squared() {
        let m = sphere_mass(100.0, 3000.0);
        let ratio = *kinetic_energy(m, 40_000.0) / *kinetic_energy(m, 20_000.0);
        assert!((ratio - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_megaton_conversion() {
        let budget = compute_energy(
            500.0,
            19320.0,
            17_000.0,
            FRAC_PI_4,
            1.0,
            true,
            &AtmosphereParams::default(),
        );
        assert!((*budget.megatons * 4.184e15 - *budget.energy).abs() / *budget.energy < 1e-12);
    }

    #[test]
    fn test_surface_velocity_attenuated_for_small_bodies_only() {
        let atm = AtmosphereParams::default();
        let big = surface_velocity(20_000.0, 1000.0, 3000.0, FRAC_PI_4, 1.0, &atm);
        let small = surface_velocity(20_000.0, 2.0, 3000.0, FRAC_PI_4, 1.0, &atm);
        assert!(big > 19_900.0, "km-scale body barely slows: {big}");
        assert!(small < 0.5 * 20_000.0, "2 m body loses most speed: {small}");
        assert!(small > 0.0);
    }

    #[test]
    fn test_airburst_keeps_entry_velocity() {
        let budget = compute_energy(
            20.0,
            750.0,
            19_000.0,
            0.5,
            1.0,
            false,
            &AtmosphereParams::default(),
        );
        assert_eq!(*budget.surface_velocity, 19_000.0);
    }

    #[test]
    fn test_grazing_angle_is_guarded() {
        let v = surface_velocity(20_000.0, 100.0, 3000.0, 0.0, 1.0, &AtmosphereParams::default());
        assert!(v.is_finite());
        assert!(v >= 0.0);
    }
}
