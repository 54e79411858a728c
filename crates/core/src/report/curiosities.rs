//! Human-scale comparisons for the impact energy
//!
//! # References
//! - Brown, P. et al. (2002). "The flux of small near-Earth objects colliding
//!   with the Earth." Nature 420 (N(≥E) = 3.7 E^-0.9 per year, E in kt).
//! - Popova, O.P. et al. (2013). "Chelyabinsk airburst, damage assessment,
//!   meteorite recovery, and characterization." Science 342.

use serde::{Deserialize, Serialize};

/// Yield of the Hiroshima bomb (Mt)
pub const HIROSHIMA_MEGATONS: f64 = 0.015;

/// A well-known explosive event used for comparison
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceEvent {
    pub name: &'static str,
    pub year: i32,
    /// Approximate yield (Mt)
    pub megatons: f64,
}

/// Reference events, smallest first
pub const REFERENCE_EVENTS: [ReferenceEvent; 5] = [
    ReferenceEvent {
        name: "Chelyabinsk airburst",
        year: 2013,
        megatons: 0.5,
    },
    ReferenceEvent {
        name: "Tunguska event",
        year: 1908,
        megatons: 12.0,
    },
    ReferenceEvent {
        name: "Tsar Bomba",
        year: 1961,
        megatons: 50.0,
    },
    ReferenceEvent {
        name: "Krakatoa eruption",
        year: 1883,
        megatons: 200.0,
    },
    ReferenceEvent {
        name: "Chicxulub impact",
        year: -66_000_000,
        megatons: 1.0e8,
    },
];

/// Headline, comparison and recurrence text for the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curiosities {
    pub headline: String,
    pub detail: String,
    pub periodicity: String,
}

/// Reference event closest in log-energy
pub fn nearest_reference_event(megatons: f64) -> ReferenceEvent {
    let target = megatons.max(1e-12).log10();
    let mut best = REFERENCE_EVENTS[0];
    for event in REFERENCE_EVENTS {
        if (event.megatons.log10() - target).abs() < (best.megatons.log10() - target).abs() {
            best = event;
        }
    }
    best
}

/// Mean years between impacts at least this energetic
///
/// Inverse of `N(≥E) = 3.7 E_kt^-0.9` per year.
pub fn recurrence_interval_years(megatons: f64) -> f64 {
    let kilotons = (megatons * 1000.0).max(1e-9);
    kilotons.powf(0.9) / 3.7
}

fn format_count(value: f64) -> String {
    if value >= 1.0e9 {
        format!("{:.1} billion", value / 1.0e9)
    } else if value >= 1.0e6 {
        format!("{:.1} million", value / 1.0e6)
    } else if value >= 1000.0 {
        format!("{:.0} thousand", value / 1000.0)
    } else if value >= 10.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

fn format_interval(years: f64) -> String {
    if years < 1.0 {
        "several times a year".to_string()
    } else if years < 2.0 {
        "about once a year".to_string()
    } else {
        format!("about once every {} years", format_count(years))
    }
}

/// Build the curiosities block for an impact of the given yield
pub fn describe(megatons: f64) -> Curiosities {
    let hiroshimas = megatons / HIROSHIMA_MEGATONS;
    let headline = format!(
        "Equivalent to {} Hiroshima bombs ({megatons:.2} Mt of TNT)",
        format_count(hiroshimas)
    );

    let event = nearest_reference_event(megatons);
    let ratio = megatons / event.megatons;
    let when = if event.year < 0 {
        format!("{} million years ago", -event.year / 1_000_000)
    } else {
        event.year.to_string()
    };
    let detail = if ratio >= 1.0 {
        format!(
            "Closest historical comparison: the {} ({when}, ~{} Mt). This impact releases {}x that energy.",
            event.name,
            format_count(event.megatons),
            format_count(ratio)
        )
    } else {
        format!(
            "Closest historical comparison: the {} ({when}, ~{} Mt). This impact releases {}% of that energy.",
            event.name,
            format_count(event.megatons),
            format_count(ratio * 100.0)
        )
    };

    Curiosities {
        headline,
        detail,
        periodicity: format!(
            "Impacts this energetic happen {}",
            format_interval(recurrence_interval_years(megatons))
        ),
    }
}
