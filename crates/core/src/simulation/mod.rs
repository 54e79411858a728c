//! Impact request pipeline
//!
//! - [`ImpactRequest`]: what the map UI submits, with server-side clamping
//! - [`PipelineStage`]: the ordered steps of one run
//! - [`ImpactOrchestrator`]: drives a request through lookups, physics and
//!   casualty estimation into an [`ImpactReport`](crate::report::ImpactReport)

pub mod orchestrator;
pub mod pipeline;
pub mod request;

pub use orchestrator::{ImpactOrchestrator, ImpactRun};
pub use pipeline::PipelineStage;
pub use request::ImpactRequest;
