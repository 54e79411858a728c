//! UI-facing impact request and server-side clamping

use crate::config::{ImpactModelConfig, InputLimits};
use crate::core_types::{BurstModeRequest, Degrees, Geometry, TargetMedium};
use crate::error::{ensure_finite, ImpactError};
use crate::physics::ImpactInputs;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// One impact as submitted from the map UI
///
/// Only the coordinate and the three headline parameters are required;
/// everything else falls back to the model defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactRequest {
    pub latitude: f64,
    pub longitude: f64,
    /// Impactor diameter (m)
    pub diameter: f64,
    /// Entry speed (m/s)
    pub speed: f64,
    /// Entry angle from horizontal (degrees)
    pub angle_deg: f64,
    #[serde(default)]
    pub material: Option<String>,
    /// Explicit bulk density (kg/m³)
    #[serde(default)]
    pub density: Option<f64>,
    #[serde(default)]
    pub geometry: Geometry,
    #[serde(default)]
    pub mode: BurstModeRequest,
    /// Airburst altitude override (m)
    #[serde(default)]
    pub burst_altitude: Option<f64>,
    /// Known land/water flag; skips the environment lookup when set
    #[serde(default)]
    pub is_water: Option<bool>,
    /// Water depth (m) for ocean impacts
    #[serde(default)]
    pub water_depth: Option<f64>,
    #[serde(default)]
    pub luminous_efficiency: Option<f64>,
    /// Bulk strength (Pa)
    #[serde(default)]
    pub body_strength: Option<f64>,
    /// Ranges (m) for the per-distance sample table
    #[serde(default)]
    pub distances: Vec<f64>,
}

impl ImpactRequest {
    /// Request with the required fields only
    pub fn new(latitude: f64, longitude: f64, diameter: f64, speed: f64, angle_deg: f64) -> Self {
        Self {
            latitude,
            longitude,
            diameter,
            speed,
            angle_deg,
            material: None,
            density: None,
            geometry: Geometry::default(),
            mode: BurstModeRequest::default(),
            burst_altitude: None,
            is_water: None,
            water_depth: None,
            luminous_efficiency: None,
            body_strength: None,
            distances: Vec::new(),
        }
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    pub fn with_mode(mut self, mode: BurstModeRequest) -> Self {
        self.mode = mode;
        self
    }

    /// Fix the land/water flag instead of looking it up
    pub fn with_water(mut self, is_water: bool, depth: Option<f64>) -> Self {
        self.is_water = Some(is_water);
        self.water_depth = depth;
        self
    }

    pub fn with_distances(mut self, distances: Vec<f64>) -> Self {
        self.distances = distances;
        self
    }

    /// Copy with every headline parameter clamped into its accepted range
    ///
    /// Out-of-range values are clamped, never rejected. Latitude is clamped
    /// to ±90° and longitude to ±180°.
    ///
    /// # Errors
    /// - [`ImpactError::NonFiniteInput`] when a required number is NaN or infinite
    /// - [`ImpactError::InvalidInput`] when `limits` is inverted or non-finite
    pub fn clamped(&self, limits: &InputLimits) -> Result<Self, ImpactError> {
        limits.validate()?;
        let latitude = ensure_finite("latitude", self.latitude)?;
        let longitude = ensure_finite("longitude", self.longitude)?;
        let diameter = ensure_finite("diameter", self.diameter)?;
        let speed = ensure_finite("speed", self.speed)?;
        let angle_deg = ensure_finite("angle", self.angle_deg)?;

        let clamped = Self {
            latitude: latitude.clamp(-90.0, 90.0),
            longitude: longitude.clamp(-180.0, 180.0),
            diameter: diameter.max(limits.min_diameter),
            speed: speed.clamp(limits.min_speed, limits.max_speed),
            angle_deg: angle_deg.clamp(limits.min_angle_deg, limits.max_angle_deg),
            ..self.clone()
        };

        if clamped != *self {
            tracing::debug!(
                diameter = clamped.diameter,
                speed = clamped.speed,
                angle_deg = clamped.angle_deg,
                "Request parameters clamped"
            );
        }
        Ok(clamped)
    }

    /// Water depth to use for an ocean impact
    pub fn effective_water_depth(&self, config: &ImpactModelConfig) -> f64 {
        self.water_depth
            .filter(|d| d.is_finite() && *d > 0.0)
            .unwrap_or(config.defaults.water_depth)
    }

    /// Physics inputs for a resolved land/water flag
    pub fn to_inputs(&self, is_water: bool, config: &ImpactModelConfig) -> ImpactInputs {
        let target = if is_water {
            TargetMedium::Water {
                depth: self.effective_water_depth(config),
            }
        } else {
            TargetMedium::Land
        };

        ImpactInputs {
            diameter: self.diameter,
            density: self.density,
            velocity: self.speed,
            angle: f64::from(Degrees::new(self.angle_deg).to_radians()).min(FRAC_PI_2),
            geometry: self.geometry,
            target,
            material: self.material.clone(),
            luminous_efficiency: self.luminous_efficiency,
            body_strength: self.body_strength,
            burst_mode: self.mode,
            burst_altitude: self.burst_altitude,
            distances: self.distances.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let limits = InputLimits::default();
        let r = ImpactRequest::new(95.0, -200.0, 0.0, 100_000.0, 1.0)
            .clamped(&limits)
            .unwrap();
        assert_eq!(r.latitude, 90.0);
        assert_eq!(r.longitude, -180.0);
        assert_eq!(r.diameter, 0.01);
        assert_eq!(r.speed, 72_000.0);
        assert_eq!(r.angle_deg, 5.0);

        let slow = ImpactRequest::new(0.0, 0.0, 10.0, 100.0, 120.0)
            .clamped(&limits)
            .unwrap();
        assert_eq!(slow.speed, 3_000.0);
        assert_eq!(slow.angle_deg, 90.0);
    }

    #[test]
    fn test_inverted_limits_are_an_input_error() {
        let limits: InputLimits = serde_json::from_str(r#"{"min_speed": 80000.0}"#).unwrap();
        let err = ImpactRequest::new(0.0, 0.0, 100.0, 20_000.0, 45.0)
            .clamped(&limits)
            .unwrap_err();
        assert!(matches!(err, ImpactError::InvalidInput { field: "limits.max_speed", .. }));

        let limits = InputLimits {
            min_angle_deg: 60.0,
            max_angle_deg: 30.0,
            ..InputLimits::default()
        };
        let err = ImpactRequest::new(0.0, 0.0, 100.0, 20_000.0, 45.0)
            .clamped(&limits)
            .unwrap_err();
        assert!(matches!(err, ImpactError::InvalidInput { field: "limits.max_angle_deg", .. }));

        let limits = InputLimits {
            min_diameter: f64::NAN,
            ..InputLimits::default()
        };
        assert!(ImpactRequest::new(0.0, 0.0, 100.0, 20_000.0, 45.0)
            .clamped(&limits)
            .unwrap_err()
            .is_input_error());
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = ImpactRequest::new(0.0, 0.0, f64::NAN, 20_000.0, 45.0)
            .clamped(&InputLimits::default())
            .unwrap_err();
        assert_eq!(err, ImpactError::NonFiniteInput { field: "diameter" });
    }

    #[test]
    fn test_to_inputs_converts_angle_and_target() {
        let config = ImpactModelConfig::default();
        let req = ImpactRequest::new(0.0, 0.0, 100.0, 20_000.0, 90.0);
        let inputs = req.to_inputs(true, &config);
        assert!((inputs.angle - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert_eq!(inputs.target, TargetMedium::Water { depth: 4000.0 });
        assert_eq!(req.to_inputs(false, &config).target, TargetMedium::Land);
    }

    #[test]
    fn test_minimal_json_request() {
        let json = r#"{"latitude": 1.5, "longitude": 2.5, "diameter": 50, "speed": 20000, "angleDeg": 45, "material": "iron"}"#;
        let req: ImpactRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.material.as_deref(), Some("iron"));
        assert_eq!(req.mode, BurstModeRequest::Auto);
        assert!(req.is_water.is_none());
        assert!(req.distances.is_empty());
    }
}
