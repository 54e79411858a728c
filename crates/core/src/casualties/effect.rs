//! Named effect radii and their severity order

use crate::physics::ImpactOutputs;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Effects that define casualty ring boundaries
///
/// Ordering is by [`EffectKind::severity`], never by declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectKind {
    BlastWindows,
    BlastModerate,
    BlastSevere,
    Burns2nd,
    Ignition,
    Crater,
}

impl EffectKind {
    /// Every effect, most severe first
    pub const BY_SEVERITY: [EffectKind; 6] = [
        EffectKind::Crater,
        EffectKind::Ignition,
        EffectKind::Burns2nd,
        EffectKind::BlastSevere,
        EffectKind::BlastModerate,
        EffectKind::BlastWindows,
    ];

    /// Severity rank, higher is more destructive
    pub fn severity(self) -> u8 {
        match self {
            EffectKind::Crater => 6,
            EffectKind::Ignition => 5,
            EffectKind::Burns2nd => 4,
            EffectKind::BlastSevere => 3,
            EffectKind::BlastModerate => 2,
            EffectKind::BlastWindows => 1,
        }
    }

    /// Report label
    pub fn label(self) -> &'static str {
        match self {
            EffectKind::Crater => "crater",
            EffectKind::Ignition => "ignition",
            EffectKind::Burns2nd => "burns-2nd-degree",
            EffectKind::BlastSevere => "blast-severe",
            EffectKind::BlastModerate => "blast-moderate",
            EffectKind::BlastWindows => "blast-windows",
        }
    }
}

impl PartialOrd for EffectKind {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EffectKind {
    fn cmp(&self, other: &Self) -> Ordering {
        self.severity().cmp(&other.severity())
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One labeled radius (m)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectRadius {
    pub kind: EffectKind,
    pub radius: f64,
}

/// The six named effect radii of one impact
#[derive(Debug, Clone, PartialEq)]
pub struct EffectRadii {
    entries: Vec<EffectRadius>,
}

impl EffectRadii {
    /// Build from explicit (kind, radius) pairs. Non-finite or negative radii
    /// are stored as 0.
    pub fn new(entries: impl IntoIterator<Item = (EffectKind, f64)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(kind, radius)| EffectRadius {
                    kind,
                    radius: if radius.is_finite() { radius.max(0.0) } else { 0.0 },
                })
                .collect(),
        }
    }

    /// Radii of a calculated impact. The crater radius is 0 when no crater forms.
    pub fn from_outputs(outputs: &ImpactOutputs) -> Self {
        Self::new([
            (EffectKind::Crater, outputs.crater.final_radius()),
            (EffectKind::Ignition, outputs.thermal.ignition),
            (EffectKind::Burns2nd, outputs.thermal.burns_2nd_degree),
            (EffectKind::BlastSevere, outputs.blast.severe),
            (EffectKind::BlastModerate, outputs.blast.moderate),
            (EffectKind::BlastWindows, outputs.blast.windows),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &EffectRadius> {
        self.entries.iter()
    }

    /// Largest radius in the set
    pub fn max_radius(&self) -> f64 {
        self.entries.iter().map(|e| e.radius).fold(0.0, f64::max)
    }

    /// Most severe effect reaching at least `outer` (whole meters)
    ///
    /// Radii are compared after rounding to whole meters, the same precision
    /// ring bounds are built with.
    pub fn most_severe_covering(&self, outer: f64) -> Option<EffectKind> {
        self.entries
            .iter()
            .filter(|e| e.radius > 0.0 && e.radius.round() >= outer)
            .map(|e| e.kind)
            .max()
    }
}
