//! Asteroid Impact Effects Core Library
//!
//! Estimates the consequences of an asteroid or comet striking the Earth at a
//! chosen point: impact energy, airburst or surface burst, crater, blast and
//! thermal radii, seismic magnitude, tsunami, and casualties from population
//! counts around the impact point.
//!
//! ## Layout
//!
//! - [`physics`]: pure models, each a function of explicit inputs and an
//!   injected [`ImpactModelConfig`]
//! - [`casualties`]: concentric population rings and per-effect casualty rates
//! - [`lookup`]: async land/water and population resolvers with timeout
//!   escalation and an HTTP client for the geodata service
//! - [`simulation`]: request clamping and the orchestrator running the
//!   end-to-end pipeline
//! - [`report`]: the JSON result contract
//!
//! ## Example
//!
//! ```no_run
//! use impact_sim_core::lookup::{FixedEnvironment, UniformPopulation};
//! use impact_sim_core::{ImpactOrchestrator, ImpactRequest};
//!
//! # async fn demo() -> Result<(), impact_sim_core::ImpactError> {
//! let orchestrator =
//!     ImpactOrchestrator::new(FixedEnvironment(false), UniformPopulation::new(250.0));
//! let request = ImpactRequest::new(-33.87, 151.21, 150.0, 20_000.0, 45.0).with_material("iron");
//! let report = orchestrator.run(&request).await?;
//! println!("{} Mt", report.energy.megatons);
//! # Ok(())
//! # }
//! ```

// Core types and utilities
pub mod config;
pub mod core_types;
pub mod error;

// Models
pub mod casualties;
pub mod physics;

// Request pipeline
pub mod lookup;
pub mod report;
pub mod simulation;

// Re-export core types
pub use core_types::{BurstMode, BurstModeRequest, Geometry, Material, TargetMedium};
pub use core_types::{Degrees, Joules, Megatons, MetersPerSecond};

pub use config::{GeodataConfig, ImpactModelConfig};
pub use error::ImpactError;

// Re-export calculation entry points
pub use physics::{calculate_impact, ImpactInputs, ImpactOutputs};

pub use lookup::{EnvironmentResolver, LookupError, PopulationResolver, Resolution};
pub use report::ImpactReport;
pub use simulation::{ImpactOrchestrator, ImpactRequest, ImpactRun, PipelineStage};

#[cfg(feature = "http")]
pub use lookup::GeodataClient;
