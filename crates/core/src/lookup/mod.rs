//! External geodata lookups
//!
//! Two collaborators feed the impact calculation: a land/water classifier
//! for the impact point and a cumulative population counter for a list of
//! radii. Both sit behind async traits so the orchestrator can run against
//! the HTTP service, fixed values, or test doubles.

pub mod fixed;
#[cfg(feature = "http")]
pub mod http;
pub mod retry;

pub use fixed::{FixedEnvironment, StaticPopulation, UniformPopulation, Unavailable};
#[cfg(feature = "http")]
pub use http::GeodataClient;
pub use retry::{resolve_or_default, with_timeout_escalation, TimeoutPolicy};

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Failure of one lookup attempt
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("lookup timed out after {0:?}")]
    Timeout(Duration),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("service returned HTTP {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("expected {expected} population values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("lookup unavailable")]
    Unavailable,
}

/// A value that was either looked up or substituted after a failure
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<T> {
    Resolved(T),
    Defaulted { value: T, reason: LookupError },
}

impl<T> Resolution<T> {
    pub fn value(&self) -> &T {
        match self {
            Resolution::Resolved(value) | Resolution::Defaulted { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Resolution::Resolved(value) | Resolution::Defaulted { value, .. } => value,
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, Resolution::Defaulted { .. })
    }
}

/// Land/water classification of a coordinate
#[async_trait]
pub trait EnvironmentResolver: Send + Sync {
    /// True when the coordinate lies in open water
    async fn is_water(&self, lat: f64, lng: f64) -> Result<bool, LookupError>;
}

/// Cumulative population within radii of a coordinate
#[async_trait]
pub trait PopulationResolver: Send + Sync {
    /// People living within each radius (m), aligned with `radii`
    async fn populations(&self, lat: f64, lng: f64, radii: &[u64]) -> Result<Vec<u64>, LookupError>;
}

#[async_trait]
impl<T: EnvironmentResolver + ?Sized> EnvironmentResolver for Arc<T> {
    async fn is_water(&self, lat: f64, lng: f64) -> Result<bool, LookupError> {
        (**self).is_water(lat, lng).await
    }
}

#[async_trait]
impl<T: PopulationResolver + ?Sized> PopulationResolver for Arc<T> {
    async fn populations(&self, lat: f64, lng: f64, radii: &[u64]) -> Result<Vec<u64>, LookupError> {
        (**self).populations(lat, lng, radii).await
    }
}
