//! Offline resolvers

use super::{EnvironmentResolver, LookupError, PopulationResolver};
use async_trait::async_trait;
use std::f64::consts::PI;

/// Answers every land/water query with the same flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedEnvironment(pub bool);

#[async_trait]
impl EnvironmentResolver for FixedEnvironment {
    async fn is_water(&self, _lat: f64, _lng: f64) -> Result<bool, LookupError> {
        Ok(self.0)
    }
}

/// Constant population density everywhere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformPopulation {
    /// People per km²
    pub per_square_km: f64,
}

impl UniformPopulation {
    pub fn new(per_square_km: f64) -> Self {
        Self { per_square_km }
    }
}

#[async_trait]
impl PopulationResolver for UniformPopulation {
    async fn populations(&self, _lat: f64, _lng: f64, radii: &[u64]) -> Result<Vec<u64>, LookupError> {
        let density = self.per_square_km.max(0.0) / 1.0e6;
        Ok(radii
            .iter()
            .map(|&r| {
                let r = r as f64;
                (density * PI * r * r).round() as u64
            })
            .collect())
    }
}

/// Replays a fixed list of cumulative counts regardless of the radii asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticPopulation(pub Vec<u64>);

#[async_trait]
impl PopulationResolver for StaticPopulation {
    async fn populations(&self, _lat: f64, _lng: f64, _radii: &[u64]) -> Result<Vec<u64>, LookupError> {
        Ok(self.0.clone())
    }
}

/// Fails every lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Unavailable;

#[async_trait]
impl EnvironmentResolver for Unavailable {
    async fn is_water(&self, _lat: f64, _lng: f64) -> Result<bool, LookupError> {
        Err(LookupError::Unavailable)
    }
}

#[async_trait]
impl PopulationResolver for Unavailable {
    async fn populations(&self, _lat: f64, _lng: f64, _radii: &[u64]) -> Result<Vec<u64>, LookupError> {
        Err(LookupError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_uniform_population_grows_with_area() {
        let pop = UniformPopulation { per_square_km: 100.0 };
        let counts = pop.populations(0.0, 0.0, &[2_000, 1_000]).await.unwrap();
        assert_eq!(counts, vec![1257, 314]);
    }

    #[tokio::test]
    async fn test_unavailable_fails_both_lookups() {
        assert_eq!(Unavailable.is_water(0.0, 0.0).await, Err(LookupError::Unavailable));
        assert!(Unavailable.populations(0.0, 0.0, &[1]).await.is_err());
        assert_eq!(FixedEnvironment(true).is_water(1.0, 2.0).await, Ok(true));
    }
}
