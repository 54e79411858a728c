//! Impactor and target classification types
//!
//! Label parsing is forgiving: the UI sends short material names ("carbon",
//! "stone") as well as the long forms, and anything unrecognized is kept as
//! an unknown label rather than rejected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bulk composition class of the impactor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Material {
    /// Icy/porous cometary body
    Comet,
    /// Carbonaceous chondrite
    Carbonaceous,
    /// Ordinary stony (chondritic) asteroid
    Stony,
    /// Stony-iron (pallasite/mesosiderite)
    StonyIron,
    /// Iron-nickel
    Iron,
    /// Solid gold (used by the educational "what if" presets)
    Gold,
}

impl Material {
    /// All materials, lightest first
    pub const ALL: [Material; 6] = [
        Material::Comet,
        Material::Carbonaceous,
        Material::Stony,
        Material::StonyIron,
        Material::Iron,
        Material::Gold,
    ];

    /// Parse a UI material label. Returns `None` for unrecognized labels.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "comet" | "cometary" | "ice" => Some(Material::Comet),
            "carbon" | "carbonaceous" => Some(Material::Carbonaceous),
            "stony" | "stone" | "rocky" | "chondrite" => Some(Material::Stony),
            "stony-iron" | "stony_iron" | "stonyiron" => Some(Material::StonyIron),
            "iron" | "metal" | "metallic" => Some(Material::Iron),
            "gold" => Some(Material::Gold),
            _ => None,
        }
    }

    /// Canonical label used in reports
    pub fn label(self) -> &'static str {
        match self {
            Material::Comet => "comet",
            Material::Carbonaceous => "carbonaceous",
            Material::Stony => "stony",
            Material::StonyIron => "stony-iron",
            Material::Iron => "iron",
            Material::Gold => "gold",
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error for [`Material::from_str`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown impactor material '{0}'")]
pub struct UnknownMaterial(pub String);

impl FromStr for Material {
    type Err = UnknownMaterial;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Material::from_label(s).ok_or_else(|| UnknownMaterial(s.to_string()))
    }
}

/// Shape class of the impactor. Only affects the atmospheric drag coefficient;
/// mass is always computed for a sphere of the given diameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Geometry {
    /// Sphere (`C_d` 0.47)
    Sphere,
    /// Elongated body (`C_d` 0.8)
    Prolate,
    /// Irregular rubble shape (`C_d` 1.0)
    #[default]
    Irregular,
}

impl Geometry {
    /// Approximate drag coefficient for the shape class
    pub fn drag_coefficient(self) -> f64 {
        match self {
            Geometry::Sphere => 0.47,
            Geometry::Prolate => 0.8,
            Geometry::Irregular => 1.0,
        }
    }
}

/// What the impactor hits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TargetMedium {
    /// Continental crust
    Land,
    /// Ocean of the given depth (meters)
    Water {
        /// Local water depth in meters
        depth: f64,
    },
}

impl TargetMedium {
    /// True for ocean impacts
    pub fn is_water(self) -> bool {
        matches!(self, TargetMedium::Water { .. })
    }

    /// Water depth in meters, `None` on land
    pub fn water_depth(self) -> Option<f64> {
        match self {
            TargetMedium::Land => None,
            TargetMedium::Water { depth } => Some(depth),
        }
    }

    /// Bulk density of the target (kg/m³): sea water or crustal rock
    pub fn bulk_density(self) -> f64 {
        match self {
            TargetMedium::Land => 2700.0,
            TargetMedium::Water { .. } => 1000.0,
        }
    }

    /// Pi-scaling coefficient for transient crater diameter
    pub fn crater_scaling_coefficient(self) -> f64 {
        match self {
            TargetMedium::Land => 1.161,
            TargetMedium::Water { .. } => 1.365,
        }
    }
}

/// Requested burst regime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BurstModeRequest {
    /// Decide from material and diameter
    #[default]
    Auto,
    /// Force a ground impact
    Surface,
    /// Force an airburst
    Air,
}

impl FromStr for BurstModeRequest {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(BurstModeRequest::Auto),
            "surface" | "ground" => Ok(BurstModeRequest::Surface),
            "air" | "airburst" => Ok(BurstModeRequest::Air),
            other => Err(format!("unknown burst mode '{other}'")),
        }
    }
}

/// Burst regime actually used for the calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BurstMode {
    /// Body reaches the ground and excavates a crater
    Surface,
    /// Body disintegrates in the atmosphere
    Air,
}

impl BurstMode {
    /// Report label
    pub fn label(self) -> &'static str {
        match self {
            BurstMode::Surface => "surface",
            BurstMode::Air => "air",
        }
    }
}
