//! Casualty estimation from effect radii and population counts

pub mod effect;
pub mod estimator;
pub mod rings;

pub use effect::{EffectKind, EffectRadii, EffectRadius};
pub use estimator::{
    estimate_casualties, CasualtyEstimate, CasualtyRates, CasualtyTotals, EffectRates,
    PopulationStatus, RingAssignment,
};
pub use rings::{build_rings, distinct_radii, PopulationRing, RingError};
