//! Request-scoped impact pipeline
//!
//! One [`ImpactOrchestrator::run`] call takes a request from the map UI
//! through every stage in [`PipelineStage`] order and always produces a
//! report unless the physics itself fails. Lookup failures only degrade the
//! result: an unknown environment is treated as land, and a missing
//! population count leaves `casualties` null.

use crate::casualties::{distinct_radii, estimate_casualties, CasualtyEstimate, EffectRadii};
use crate::config::{GeodataConfig, ImpactModelConfig};
use crate::error::ImpactError;
use crate::lookup::{
    resolve_or_default, with_timeout_escalation, EnvironmentResolver, PopulationResolver,
    Resolution, TimeoutPolicy,
};
use crate::physics::{calculate_impact_with_density, resolve_density, ImpactOutputs};
use crate::report::{EnvironmentSource, ImpactReport};
use crate::simulation::pipeline::{PipelineStage, StageTracker};
use crate::simulation::ImpactRequest;

/// Everything produced by one run, for callers that need more than the JSON
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactRun {
    pub report: ImpactReport,
    pub outputs: ImpactOutputs,
    pub casualties: CasualtyEstimate,
    /// Land/water flag and how it was obtained
    pub environment: Resolution<bool>,
    pub environment_source: EnvironmentSource,
    /// Stages visited, ending with `Done`
    pub stages: Vec<PipelineStage>,
}

/// Runs impact requests against an environment and a population resolver
pub struct ImpactOrchestrator<E, P> {
    environment: E,
    population: P,
    model: ImpactModelConfig,
    environment_timeouts: TimeoutPolicy,
    population_timeouts: TimeoutPolicy,
}

impl<E, P> ImpactOrchestrator<E, P>
where
    E: EnvironmentResolver,
    P: PopulationResolver,
{
    /// Orchestrator with the default model and geodata timeouts
    pub fn new(environment: E, population: P) -> Self {
        let geodata = GeodataConfig::default();
        Self {
            environment,
            population,
            model: ImpactModelConfig::default(),
            environment_timeouts: geodata.environment_timeouts,
            population_timeouts: geodata.population_timeouts,
        }
    }

    /// Replace the model parameters
    pub fn with_model(mut self, model: ImpactModelConfig) -> Self {
        self.model = model;
        self
    }

    /// Replace the lookup deadlines
    pub fn with_timeouts(mut self, environment: TimeoutPolicy, population: TimeoutPolicy) -> Self {
        self.environment_timeouts = environment;
        self.population_timeouts = population;
        self
    }

    pub fn model(&self) -> &ImpactModelConfig {
        &self.model
    }

    /// Run one request and return the JSON report
    ///
    /// # Errors
    /// [`ImpactError`] when the request holds non-finite numbers or the
    /// physics produces non-finite results
    pub async fn run(&self, request: &ImpactRequest) -> Result<ImpactReport, ImpactError> {
        self.run_detailed(request).await.map(|run| run.report)
    }

    /// Run one request and keep the intermediate results
    ///
    /// # Errors
    /// Same as [`ImpactOrchestrator::run`]
    pub async fn run_detailed(&self, request: &ImpactRequest) -> Result<ImpactRun, ImpactError> {
        let request = request.clamped(&self.model.limits)?;
        let (lat, lng) = (request.latitude, request.longitude);
        tracing::info!(
            lat,
            lng,
            diameter = request.diameter,
            speed = request.speed,
            angle_deg = request.angle_deg,
            "Impact run started"
        );

        let mut stages = StageTracker::new();
        let (environment, environment_source) = match request.is_water {
            Some(is_water) => {
                tracing::debug!(is_water, "Environment supplied with request");
                (Resolution::Resolved(is_water), EnvironmentSource::Override)
            }
            None => {
                let resolved = resolve_or_default(&self.environment_timeouts, "is-water", false, || {
                    self.environment.is_water(lat, lng)
                })
                .await;
                let source = if resolved.is_defaulted() {
                    EnvironmentSource::Default
                } else {
                    EnvironmentSource::Lookup
                };
                (resolved, source)
            }
        };
        let is_water = *environment.value();

        stages.advance(PipelineStage::ResolvingMaterial);
        let density = resolve_density(
            request.density,
            request.material.as_deref(),
            request.speed,
            &self.model.materials,
        );
        if density.source.is_defaulted() {
            tracing::warn!(
                material = request.material.as_deref().unwrap_or("none"),
                density = density.value,
                "Density fell back to a default"
            );
        }

        stages.advance(PipelineStage::ComputingPhysics);
        let inputs = request.to_inputs(is_water, &self.model);
        let outputs = calculate_impact_with_density(&inputs, density, &self.model)?;
        let effects = EffectRadii::from_outputs(&outputs);
        let radii = distinct_radii(effects.iter().map(|e| e.radius));

        stages.advance(PipelineStage::ResolvingPopulation);
        let populations = if radii.is_empty() {
            tracing::debug!("No positive effect radius, skipping population lookup");
            None
        } else {
            Some(
                with_timeout_escalation(&self.population_timeouts, "population", || {
                    self.population.populations(lat, lng, &radii)
                })
                .await,
            )
        };

        stages.advance(PipelineStage::EstimatingCasualties);
        let casualties = match populations {
            None => CasualtyEstimate::not_requested(),
            Some(Ok(cumulative)) => estimate_casualties(
                &effects,
                &radii,
                &cumulative,
                outputs.seismic_magnitude,
                &self.model.casualties,
            )
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "Population data unusable, casualties unavailable");
                CasualtyEstimate::unavailable(radii.clone())
            }),
            Some(Err(err)) => {
                tracing::warn!(error = %err, "Population lookup failed, casualties unavailable");
                CasualtyEstimate::unavailable(radii.clone())
            }
        };

        let report =
            ImpactReport::assemble(&request, &outputs, &effects, &casualties, environment_source);
        let stages = stages.finish();

        tracing::info!(
            megatons = *outputs.energy.megatons,
            mode = outputs.burst.mode.label(),
            crater_formed = outputs.crater.formed,
            casualties = casualties.totals.total(),
            casualties_available = casualties.is_available(),
            "Impact run finished"
        );

        Ok(ImpactRun {
            report,
            outputs,
            casualties,
            environment,
            environment_source,
            stages,
        })
    }
}

#[cfg(feature = "http")]
impl ImpactOrchestrator<crate::lookup::GeodataClient, crate::lookup::GeodataClient> {
    /// Orchestrator backed by the HTTP geodata service
    ///
    /// # Errors
    /// [`crate::lookup::LookupError::Transport`] if the HTTP client cannot be built
    pub fn online(config: &GeodataConfig) -> Result<Self, crate::lookup::LookupError> {
        let client = crate::lookup::GeodataClient::new(config)?;
        Ok(Self::new(client.clone(), client).with_timeouts(
            config.environment_timeouts.clone(),
            config.population_timeouts.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::casualties::PopulationStatus;
    use crate::lookup::{FixedEnvironment, StaticPopulation, UniformPopulation, Unavailable};

    fn gold_request() -> ImpactRequest {
        ImpactRequest::new(-33.86, 151.2, 500.0, 17_000.0, 45.0).with_material("gold")
    }

    #[tokio::test]
    async fn test_land_run_reaches_done() {
        let orchestrator =
            ImpactOrchestrator::new(FixedEnvironment(false), UniformPopulation::new(100.0));
        let run = orchestrator.run_detailed(&gold_request()).await.unwrap();

        assert_eq!(run.stages.last(), Some(&PipelineStage::Done));
        assert_eq!(run.stages.len(), 6);
        assert_eq!(run.environment, Resolution::Resolved(false));
        assert_eq!(run.environment_source, EnvironmentSource::Lookup);
        assert_eq!(run.casualties.status, PopulationStatus::Resolved);
        assert!(run.report.casualties.is_some());
        assert!(run.report.tsunami.is_none());
    }

    #[tokio::test]
    async fn test_failed_environment_defaults_to_land() {
        let orchestrator = ImpactOrchestrator::new(Unavailable, UniformPopulation::new(10.0));
        let run = orchestrator.run_detailed(&gold_request()).await.unwrap();
        assert!(run.environment.is_defaulted());
        assert!(!run.environment.into_value());
        assert_eq!(run.environment_source, EnvironmentSource::Default);
        assert!(!run.report.inputs.is_water);
    }

    #[tokio::test]
    async fn test_override_skips_lookup() {
        let orchestrator = ImpactOrchestrator::new(Unavailable, UniformPopulation::new(10.0));
        let request = gold_request().with_water(true, Some(4000.0));
        let run = orchestrator.run_detailed(&request).await.unwrap();
        assert_eq!(run.environment, Resolution::Resolved(true));
        assert_eq!(run.environment_source, EnvironmentSource::Override);
        assert!(run.report.tsunami.is_some());
    }

    #[tokio::test]
    async fn test_length_mismatch_marks_casualties_unavailable() {
        let orchestrator =
            ImpactOrchestrator::new(FixedEnvironment(false), StaticPopulation(vec![1, 2]));
        let run = orchestrator.run_detailed(&gold_request()).await.unwrap();
        assert_eq!(run.casualties.status, PopulationStatus::Unavailable);
        assert!(run.report.casualties.is_none());
        assert!(!run.casualties.radii_used.is_empty());
    }

    #[tokio::test]
    async fn test_non_finite_request_is_an_error() {
        let orchestrator =
            ImpactOrchestrator::new(FixedEnvironment(false), UniformPopulation::new(10.0));
        let request = ImpactRequest::new(0.0, 0.0, 100.0, f64::INFINITY, 45.0);
        let err = orchestrator.run(&request).await.unwrap_err();
        assert!(err.is_input_error());
    }

    #[tokio::test]
    async fn test_inverted_limits_from_json_do_not_panic() {
        let model: ImpactModelConfig =
            serde_json::from_str(r#"{"limits": {"min_speed": 80000.0}}"#).unwrap();
        let orchestrator =
            ImpactOrchestrator::new(FixedEnvironment(false), UniformPopulation::new(10.0))
                .with_model(model);
        let request = ImpactRequest::new(0.0, 0.0, 100.0, 20_000.0, 45.0);
        let err = orchestrator.run(&request).await.unwrap_err();
        assert!(matches!(err, ImpactError::InvalidInput { field: "limits.max_speed", .. }));
    }
}
