//! End-to-end impact scenarios
//!
//! Runs complete requests through the orchestrator with offline resolvers and
//! checks the report against the physical properties the model must honour.
//!
//! Run tests with: `cargo test --test impact_scenarios`

mod common;

use approx::assert_relative_eq;
use impact_sim_core::{
    casualties::PopulationStatus,
    core_types::TargetMedium,
    lookup::{FixedEnvironment, UniformPopulation, Unavailable},
    physics::{
        crater_validation::{final_from_transient, SIMPLE_COMPLEX_TRANSITION},
        CraterType,
    },
    BurstMode, BurstModeRequest, ImpactError, ImpactInputs, ImpactModelConfig, ImpactOrchestrator,
    ImpactRequest,
};
use std::f64::consts::FRAC_PI_4;

fn land_orchestrator() -> ImpactOrchestrator<FixedEnvironment, UniformPopulation> {
    ImpactOrchestrator::new(FixedEnvironment(false), UniformPopulation::new(150.0))
}

// ═══════════════════════════════════════════════════════════════════════════════
// SECTION 1: REFERENCE SCENARIOS
// ═══════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn scenario_a_gold_land_impact() {
    let run = land_orchestrator()
        .run_detailed(&common::scenario_a())
        .await
        .unwrap();
    let out = &run.outputs;

    assert!(out.crater.formed);
    assert_eq!(out.burst.mode, BurstMode::Surface);
    assert_eq!(out.crater.crater_type, CraterType::Complex);
    assert_relative_eq!(*out.energy.megatons, 43_670.0, max_relative = 0.01);

    for r in [
        out.blast.windows,
        out.blast.moderate,
        out.blast.severe,
        out.thermal.burns_2nd_degree,
        out.thermal.ignition,
        out.crater.final_diameter,
    ] {
        assert!(r.is_finite() && r > 0.0, "radius {r}");
    }
    assert!(out.blast.windows >= out.blast.moderate);
    assert!(out.blast.moderate >= out.blast.severe);
    assert!(out.thermal.ignition <= out.thermal.burns_2nd_degree);

    assert!(run.report.tsunami.is_none());
    let casualties = run.report.casualties.expect("population resolved");
    assert!(casualties.totals.total() > 0);
    assert!(casualties.radii_used_m.windows(2).all(|w| w[0] > w[1]));
    assert_eq!(run.report.crater.crater_type, "complex");
}

#[tokio::test]
async fn scenario_b_small_comet_airbursts_even_over_water() {
    let orchestrator =
        ImpactOrchestrator::new(FixedEnvironment(true), UniformPopulation::new(150.0));
    let run = orchestrator
        .run_detailed(&common::scenario_b())
        .await
        .unwrap();

    assert!(!run.report.crater.formed);
    assert_eq!(run.report.inputs.mode, "air");
    assert!(run.report.inputs.is_water);
    let altitude = run.report.inputs.burst_altitude_m.unwrap();
    assert!(altitude > 0.0);
    assert!(run.report.tsunami.is_none());
    assert_eq!(run.report.crater.final_diameter_m, 0.0);
    assert_eq!(run.report.crater.crater_type, "none");
}

#[tokio::test]
async fn scenario_c_ocean_impact_makes_tsunami() {
    let run = land_orchestrator()
        .run_detailed(&common::scenario_c())
        .await
        .unwrap();
    let tsunami = run.outputs.tsunami.expect("ocean crater raises a tsunami");

    assert_eq!(run.outputs.target, TargetMedium::Water { depth: 4000.0 });
    assert!(tsunami.cavity_depth > 0.0);
    assert!(tsunami.cavity_depth <= 4000.0);
    assert!(tsunami.cavity_depth <= 0.25 * run.outputs.crater.transient_diameter);
    assert!(tsunami.height_at_reference > 0.0);
    assert_eq!(tsunami.reference_range, 50_000.0);

    let report = run.report.tsunami.unwrap();
    assert!(report.cavity_depth_m > 0.0);
}

#[tokio::test]
async fn scenario_d_population_failure_leaves_casualties_null() {
    let orchestrator = ImpactOrchestrator::new(FixedEnvironment(false), Unavailable)
        .with_timeouts(
            impact_sim_core::lookup::TimeoutPolicy::single(std::time::Duration::from_millis(200)),
            impact_sim_core::lookup::TimeoutPolicy::escalating(
                std::time::Duration::from_millis(50),
                std::time::Duration::from_millis(100),
            ),
        );
    let run = orchestrator
        .run_detailed(&common::scenario_a())
        .await
        .unwrap();

    assert_eq!(run.casualties.status, PopulationStatus::Unavailable);
    assert!(!run.casualties.radii_used.is_empty());
    assert_eq!(run.casualties.totals.total(), 0);

    let json = serde_json::to_value(&run.report).unwrap();
    assert!(json["casualties"].is_null());
    assert!(json["energy"]["MT"].as_f64().unwrap() > 0.0);
    assert!(json["crater"]["formed"].as_bool().unwrap());
    assert!(json["blastRadii_m"]["windows_5kPa"].as_f64().unwrap() > 0.0);
    assert!(json["affected"]["area_m2"].as_f64().unwrap() > 0.0);
    assert!(json["curiosities"]["headline"].is_string());
}

#[tokio::test]
async fn identical_requests_give_identical_json() {
    let orchestrator = land_orchestrator();
    let request = common::scenario_c().with_distances(vec![1_000.0, 50_000.0, 250_000.0]);

    let first = orchestrator.run(&request).await.unwrap().to_json().unwrap();
    let second = orchestrator.run(&request).await.unwrap().to_json().unwrap();
    assert_eq!(first, second);
}

// ═══════════════════════════════════════════════════════════════════════════════
// SECTION 2: PHYSICAL PROPERTIES
// ═══════════════════════════════════════════════════════════════════════════════

fn surface_inputs(diameter: f64, velocity: f64) -> ImpactInputs {
    ImpactInputs::new(diameter, velocity, FRAC_PI_4)
        .with_material("stony")
        .with_burst_mode(BurstModeRequest::Surface)
}

#[test]
fn energy_scales_with_size_and_speed() {
    let config = ImpactModelConfig::default();
    let base = impact_sim_core::calculate_impact(&surface_inputs(100.0, 20_000.0), &config).unwrap();
    let wide = impact_sim_core::calculate_impact(&surface_inputs(200.0, 20_000.0), &config).unwrap();
    let fast = impact_sim_core::calculate_impact(&surface_inputs(100.0, 40_000.0), &config).unwrap();

    assert_relative_eq!(*wide.energy.energy / *base.energy.energy, 8.0, max_relative = 1e-9);
    assert_relative_eq!(*fast.energy.energy / *base.energy.energy, 4.0, max_relative = 1e-9);
}

#[test]
fn crossing_material_threshold_flips_to_crater() {
    let config = ImpactModelConfig::default();
    let threshold = config.materials.stony.crater_threshold;

    let below = ImpactInputs::new(threshold - 1.0, 20_000.0, FRAC_PI_4).with_material("stony");
    let at = ImpactInputs::new(threshold, 20_000.0, FRAC_PI_4).with_material("stony");
    let below = impact_sim_core::calculate_impact(&below, &config).unwrap();
    let at = impact_sim_core::calculate_impact(&at, &config).unwrap();

    assert!(!below.crater_formed());
    assert_eq!(below.burst_mode(), BurstMode::Air);
    assert!(at.crater_formed());
    assert_eq!(at.burst_mode(), BurstMode::Surface);
}

#[test]
fn crater_type_switches_at_transition_without_sign_flip() {
    let (simple, simple_type) = final_from_transient(SIMPLE_COMPLEX_TRANSITION);
    let (complex, complex_type) = final_from_transient(SIMPLE_COMPLEX_TRANSITION + 1.0);

    assert_eq!(simple_type, CraterType::Simple);
    assert_eq!(complex_type, CraterType::Complex);
    assert!(simple > 0.0 && complex > 0.0);
    assert_relative_eq!(simple, 1.25 * SIMPLE_COMPLEX_TRANSITION);
}

#[test]
fn radii_ordered_across_sizes() {
    let config = ImpactModelConfig::default();
    for diameter in [5.0, 50.0, 300.0, 2_000.0, 10_000.0] {
        let out = impact_sim_core::calculate_impact(
            &ImpactInputs::new(diameter, 25_000.0, FRAC_PI_4),
            &config,
        )
        .unwrap();
        assert!(out.blast.windows >= out.blast.moderate, "d={diameter}");
        assert!(out.blast.moderate >= out.blast.severe, "d={diameter}");
        assert!(out.thermal.ignition <= out.thermal.burns_2nd_degree, "d={diameter}");
        assert!(out.blast.severe >= 0.0 && out.thermal.ignition >= 0.0);
    }
}

#[tokio::test]
async fn out_of_range_request_is_clamped_not_rejected() {
    let request = ImpactRequest::new(120.0, 0.0, 0.0, 1_000.0, 1.0);
    let report = land_orchestrator().run(&request).await.unwrap();
    assert_eq!(report.inputs.latitude, 90.0);
    assert_eq!(report.inputs.speed_ms, 3_000.0);
    assert_eq!(report.inputs.angle_deg, 5.0);
    assert_eq!(report.inputs.diameter_m, 0.01);
}

#[tokio::test]
async fn non_finite_request_is_distinct_error() {
    let request = ImpactRequest::new(0.0, f64::NAN, 100.0, 20_000.0, 45.0);
    let err = land_orchestrator().run(&request).await.unwrap_err();
    assert_eq!(err, ImpactError::NonFiniteInput { field: "longitude" });
}
