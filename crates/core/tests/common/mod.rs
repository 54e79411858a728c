//! Shared fixtures for the integration tests

#![allow(dead_code)]

use impact_sim_core::ImpactRequest;

/// Route `tracing` output through the test harness once per test binary.
/// `RUST_LOG` controls verbosity; silent by default.
#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_test_writer()
        .try_init();
}

/// 500 m gold body at 17 km/s, 45°
pub fn scenario_a() -> ImpactRequest {
    ImpactRequest::new(40.7128, -74.006, 500.0, 17_000.0, 45.0).with_material("gold")
}

/// 20 m comet at 19 km/s, 30°
pub fn scenario_b() -> ImpactRequest {
    ImpactRequest::new(35.0, -40.0, 20.0, 19_000.0, 30.0).with_material("comet")
}

/// Scenario A over 4000 m of water
pub fn scenario_c() -> ImpactRequest {
    scenario_a().with_water(true, Some(4000.0))
}
