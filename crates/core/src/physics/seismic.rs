//! Seismic magnitude and felt intensity
//!
//! # Scientific References
//! - Schultz, P.H., Gault, D.E. (1975). "Seismic effects from major basin
//!   formations on the Moon and Mercury." The Moon 12.
//! - Collins, G.S., Melosh, H.J., Marcus, R.A. (2005). "Earth Impact Effects
//!   Program." Meteoritics & Planetary Science 40(6), Eq. 40.

use crate::config::SeismicParams;
use crate::core_types::Joules;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Effective Richter magnitude of the impact
///
/// M = 0.67 log₁₀(max(E·f, 1)) − 5.87, seismic fraction f clamped to [0, 1]
pub fn seismic_magnitude(energy: Joules, params: &SeismicParams) -> f64 {
    let fraction = params.fraction_to_seismic.clamp(0.0, 1.0);
    0.67 * (*energy * fraction).max(1.0).log10() - 5.87
}

/// Qualitative shaking band
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeismicIntensity {
    Weak,
    Light,
    Moderate,
    Damage,
    SevereDamage,
}

impl SeismicIntensity {
    /// Band for an effective local magnitude
    pub fn from_effective_magnitude(value: f64) -> Self {
        if value >= 7.0 {
            SeismicIntensity::SevereDamage
        } else if value >= 6.0 {
            SeismicIntensity::Damage
        } else if value >= 5.0 {
            SeismicIntensity::Moderate
        } else if value >= 4.0 {
            SeismicIntensity::Light
        } else {
            SeismicIntensity::Weak
        }
    }

    /// Report label
    pub fn label(self) -> &'static str {
        match self {
            SeismicIntensity::Weak => "weak",
            SeismicIntensity::Light => "light",
            SeismicIntensity::Moderate => "moderate",
            SeismicIntensity::Damage => "damage",
            SeismicIntensity::SevereDamage => "severe damage",
        }
    }
}

impl fmt::Display for SeismicIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Shaking band at range `r` (m) for a given magnitude
///
/// Effective magnitude `M − log₁₀(max(r_km, 1))`.
pub fn intensity_at(magnitude: f64, range: f64) -> SeismicIntensity {
    let r_km = (range / 1000.0).max(1.0);
    SeismicIntensity::from_effective_magnitude(magnitude - r_km.log10())
}
