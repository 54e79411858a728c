//! HTTP geodata client
//!
//! Endpoints (relative to the configured base URL):
//! - `GET /is-water?lat={lat}&lng={lng}` → `{"isWater": bool}` or a bare `bool`
//! - `GET /?lat={lat}&lng={lng}&radii={r1}&radii={r2}...` →
//!   `{"populations": [number, ...]}`, positionally aligned with the radii
//!
//! Deadlines are not set on the HTTP client itself; the orchestrator wraps
//! every call in a [`TimeoutPolicy`](super::TimeoutPolicy).

use super::{EnvironmentResolver, LookupError, PopulationResolver};
use crate::config::GeodataConfig;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Client for the land/water and population service
#[derive(Debug, Clone)]
pub struct GeodataClient {
    client: reqwest::Client,
    base_url: String,
}

impl GeodataClient {
    /// Build a client for the configured service
    ///
    /// # Errors
    /// [`LookupError::Transport`] if the TLS backend cannot be initialized
    pub fn new(config: &GeodataConfig) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("impact-sim/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LookupError::Transport(e.to_string()))?;
        Ok(Self::with_client(client, &config.base_url))
    }

    /// Wrap an existing `reqwest` client
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json(&self, url: String, query: &[(&str, String)]) -> Result<Value, LookupError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| LookupError::Malformed(e.to_string()))
    }
}

/// `{"isWater": bool}` or a bare boolean
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IsWaterBody {
    Object {
        #[serde(rename = "isWater")]
        is_water: bool,
    },
    Bare(bool),
}

#[derive(Debug, Deserialize)]
struct PopulationBody {
    populations: Vec<Value>,
}

/// Parse a land/water response body
pub(crate) fn parse_is_water(body: Value) -> Result<bool, LookupError> {
    match serde_json::from_value::<IsWaterBody>(body) {
        Ok(IsWaterBody::Object { is_water } | IsWaterBody::Bare(is_water)) => Ok(is_water),
        Err(e) => Err(LookupError::Malformed(e.to_string())),
    }
}

/// Lenient population count: numbers are rounded, numeric strings are
/// parsed, anything else (or a negative/non-finite value) counts as 0
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to >= 0 and rounded
pub(crate) fn population_value(value: &Value) -> u64 {
    let raw = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match raw {
        Some(v) if v.is_finite() && v > 0.0 => v.round() as u64,
        _ => 0,
    }
}

/// Parse a population response body, checking alignment with `expected` radii
pub(crate) fn parse_populations(body: Value, expected: usize) -> Result<Vec<u64>, LookupError> {
    let parsed: PopulationBody =
        serde_json::from_value(body).map_err(|e| LookupError::Malformed(e.to_string()))?;
    if parsed.populations.len() != expected {
        return Err(LookupError::LengthMismatch {
            expected,
            actual: parsed.populations.len(),
        });
    }
    Ok(parsed.populations.iter().map(population_value).collect())
}

#[async_trait]
impl EnvironmentResolver for GeodataClient {
    async fn is_water(&self, lat: f64, lng: f64) -> Result<bool, LookupError> {
        let body = self
            .get_json(
                format!("{}/is-water", self.base_url),
                &[("lat", lat.to_string()), ("lng", lng.to_string())],
            )
            .await?;
        parse_is_water(body)
    }
}

#[async_trait]
impl PopulationResolver for GeodataClient {
    async fn populations(&self, lat: f64, lng: f64, radii: &[u64]) -> Result<Vec<u64>, LookupError> {
        let mut query = Vec::with_capacity(radii.len() + 2);
        query.push(("lat", lat.to_string()));
        query.push(("lng", lng.to_string()));
        query.extend(radii.iter().map(|r| ("radii", r.to_string())));

        let body = self.get_json(format!("{}/", self.base_url), &query).await?;
        parse_populations(body, radii.len())
    }
}
