//! Casualty estimation over population rings
//!
//! Each ring is assigned the single most severe effect reaching its outer
//! bound, and that effect's per-category fractions are applied to the ring
//! population. Earthquake deaths are then applied to the survivors according
//! to the shaking band at the ring's mid radius.

use super::effect::{EffectKind, EffectRadii};
use super::rings::{build_rings, PopulationRing, RingError};
use crate::physics::seismic::{intensity_at, SeismicIntensity};
use serde::{Deserialize, Serialize};

/// Fraction of a ring's population in each casualty category
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectRates {
    pub crater_vaporized: f64,
    pub fireball_deaths: f64,
    pub burns_3rd: f64,
    pub burns_2nd: f64,
    pub shockwave_deaths: f64,
    pub wind_deaths: f64,
}

impl EffectRates {
    fn sum(&self) -> f64 {
        self.crater_vaporized
            + self.fireball_deaths
            + self.burns_3rd
            + self.burns_2nd
            + self.shockwave_deaths
            + self.wind_deaths
    }

    /// Negative rates become 0 and the total is scaled down to at most 1
    fn normalized(&self) -> Self {
        let clean = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        let r = Self {
            crater_vaporized: clean(self.crater_vaporized),
            fireball_deaths: clean(self.fireball_deaths),
            burns_3rd: clean(self.burns_3rd),
            burns_2nd: clean(self.burns_2nd),
            shockwave_deaths: clean(self.shockwave_deaths),
            wind_deaths: clean(self.wind_deaths),
        };
        let total = r.sum();
        if total <= 1.0 {
            return r;
        }
        Self {
            crater_vaporized: r.crater_vaporized / total,
            fireball_deaths: r.fireball_deaths / total,
            burns_3rd: r.burns_3rd / total,
            burns_2nd: r.burns_2nd / total,
            shockwave_deaths: r.shockwave_deaths / total,
            wind_deaths: r.wind_deaths / total,
        }
    }
}

/// Casualty fractions per dominant effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CasualtyRates {
    pub crater: EffectRates,
    pub ignition: EffectRates,
    pub burns_2nd: EffectRates,
    pub blast_severe: EffectRates,
    pub blast_moderate: EffectRates,
    pub blast_windows: EffectRates,
    /// Fraction of survivors killed where shaking is "severe damage"
    pub earthquake_severe: f64,
    /// Fraction of survivors killed where shaking is "damage"
    pub earthquake_damage: f64,
}

impl Default for CasualtyRates {
    fn default() -> Self {
        Self {
            crater: EffectRates {
                crater_vaporized: 1.0,
                ..EffectRates::default()
            },
            ignition: EffectRates {
                fireball_deaths: 0.6,
                burns_3rd: 0.3,
                ..EffectRates::default()
            },
            burns_2nd: EffectRates {
                fireball_deaths: 0.05,
                burns_2nd: 0.4,
                ..EffectRates::default()
            },
            blast_severe: EffectRates {
                shockwave_deaths: 0.5,
                wind_deaths: 0.2,
                ..EffectRates::default()
            },
            blast_moderate: EffectRates {
                shockwave_deaths: 0.1,
                wind_deaths: 0.1,
                ..EffectRates::default()
            },
            blast_windows: EffectRates {
                wind_deaths: 0.01,
                ..EffectRates::default()
            },
            earthquake_severe: 0.02,
            earthquake_damage: 0.005,
        }
    }
}

impl CasualtyRates {
    /// Rates for one effect
    pub fn for_effect(&self, kind: EffectKind) -> &EffectRates {
        match kind {
            EffectKind::Crater => &self.crater,
            EffectKind::Ignition => &self.ignition,
            EffectKind::Burns2nd => &self.burns_2nd,
            EffectKind::BlastSevere => &self.blast_severe,
            EffectKind::BlastModerate => &self.blast_moderate,
            EffectKind::BlastWindows => &self.blast_windows,
        }
    }

    /// Survivor death fraction for a shaking band
    pub fn earthquake_rate(&self, intensity: SeismicIntensity) -> f64 {
        let rate = match intensity {
            SeismicIntensity::SevereDamage => self.earthquake_severe,
            SeismicIntensity::Damage => self.earthquake_damage,
            _ => 0.0,
        };
        if rate.is_finite() {
            rate.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Casualty counts per category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CasualtyTotals {
    pub crater_vaporized: u64,
    pub fireball_deaths: u64,
    pub burns_3rd: u64,
    pub burns_2nd: u64,
    pub shockwave_deaths: u64,
    pub wind_deaths: u64,
    pub earthquake_deaths: u64,
}

impl CasualtyTotals {
    /// Sum over all categories
    pub fn total(&self) -> u64 {
        self.crater_vaporized
            + self.fireball_deaths
            + self.burns_3rd
            + self.burns_2nd
            + self.shockwave_deaths
            + self.wind_deaths
            + self.earthquake_deaths
    }
}

/// Fractional accumulator, rounded into [`CasualtyTotals`] once all rings are in
#[derive(Debug, Default)]
struct Accumulator {
    crater_vaporized: f64,
    fireball_deaths: f64,
    burns_3rd: f64,
    burns_2nd: f64,
    shockwave_deaths: f64,
    wind_deaths: f64,
    earthquake_deaths: f64,
}

impl Accumulator {
    fn add(&mut self, population: f64, rates: &EffectRates, earthquake_rate: f64) {
        self.crater_vaporized += population * rates.crater_vaporized;
        self.fireball_deaths += population * rates.fireball_deaths;
        self.burns_3rd += population * rates.burns_3rd;
        self.burns_2nd += population * rates.burns_2nd;
        self.shockwave_deaths += population * rates.shockwave_deaths;
        self.wind_deaths += population * rates.wind_deaths;
        let survivors = population * (1.0 - rates.sum()).max(0.0);
        self.earthquake_deaths += survivors * earthquake_rate;
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // non-negative, rounded
    fn finish(self) -> CasualtyTotals {
        let count = |v: f64| v.max(0.0).round() as u64;
        CasualtyTotals {
            crater_vaporized: count(self.crater_vaporized),
            fireball_deaths: count(self.fireball_deaths),
            burns_3rd: count(self.burns_3rd),
            burns_2nd: count(self.burns_2nd),
            shockwave_deaths: count(self.shockwave_deaths),
            wind_deaths: count(self.wind_deaths),
            earthquake_deaths: count(self.earthquake_deaths),
        }
    }
}

/// Whether population data backed the estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PopulationStatus {
    /// Population lookup succeeded
    Resolved,
    /// Lookup failed; totals are zero
    Unavailable,
    /// No positive radius, nothing to look up
    NotRequested,
}

/// One ring with the effect assigned to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingAssignment {
    pub ring: PopulationRing,
    pub effect: Option<EffectKind>,
}

/// Outcome of the casualty estimation
#[derive(Debug, Clone, PartialEq)]
pub struct CasualtyEstimate {
    pub totals: CasualtyTotals,
    /// Radii sent to (or attempted with) the population service, largest first
    pub radii_used: Vec<u64>,
    pub rings: Vec<RingAssignment>,
    pub status: PopulationStatus,
}

impl CasualtyEstimate {
    /// Zero totals after a failed population lookup
    pub fn unavailable(radii_used: Vec<u64>) -> Self {
        Self {
            totals: CasualtyTotals::default(),
            radii_used,
            rings: Vec::new(),
            status: PopulationStatus::Unavailable,
        }
    }

    /// Zero totals when there were no radii to query
    pub fn not_requested() -> Self {
        Self {
            totals: CasualtyTotals::default(),
            radii_used: Vec::new(),
            rings: Vec::new(),
            status: PopulationStatus::NotRequested,
        }
    }

    /// True when totals are backed by population data
    pub fn is_available(&self) -> bool {
        self.status != PopulationStatus::Unavailable
    }

    /// Sum of ring populations
    pub fn population_covered(&self) -> u64 {
        self.rings.iter().map(|r| r.ring.population).sum()
    }
}

/// Estimate casualties from cumulative populations
///
/// # Arguments
/// * `effects` - Named effect radii
/// * `radii` - Distinct descending radii the populations were fetched for
/// * `cumulative` - Population within each radius, aligned with `radii`
/// * `magnitude` - Seismic magnitude of the impact
/// * `rates` - Casualty fractions
///
/// # Errors
/// [`RingError::LengthMismatch`] when `cumulative` does not align with `radii`
#[allow(clippy::cast_precision_loss)] // population and radii fit comfortably in f64
pub fn estimate_casualties(
    effects: &EffectRadii,
    radii: &[u64],
    cumulative: &[u64],
    magnitude: f64,
    rates: &CasualtyRates,
) -> Result<CasualtyEstimate, RingError> {
    let rings = build_rings(radii, cumulative)?;
    let mut acc = Accumulator::default();
    let mut assignments = Vec::with_capacity(rings.len());

    for ring in rings {
        let effect = effects.most_severe_covering(ring.outer as f64);
        let effect_rates = effect
            .map(|kind| rates.for_effect(kind).normalized())
            .unwrap_or_default();
        let quake = rates.earthquake_rate(intensity_at(magnitude, ring.mid_radius()));
        acc.add(ring.population as f64, &effect_rates, quake);

        tracing::trace!(
            outer = ring.outer,
            inner = ring.inner,
            population = ring.population,
            effect = effect.map_or("none", EffectKind::label),
            "Ring assigned"
        );
        assignments.push(RingAssignment { ring, effect });
    }

    Ok(CasualtyEstimate {
        totals: acc.finish(),
        radii_used: radii.to_vec(),
        rings: assignments,
        status: PopulationStatus::Resolved,
    })
}
