//! Effects evaluated at caller-chosen ranges
//!
//! Each row combines the forward models (overpressure, wind, fluence, ejecta,
//! shaking) at one ground range. Rows are produced in the order the ranges
//! were requested.

use crate::config::ImpactModelConfig;
use crate::core_types::Joules;
use crate::physics::blast::{overpressure_at, peak_wind_speed};
use crate::physics::crater::{ejecta_thickness_at, CraterGeometry};
use crate::physics::seismic::{intensity_at, SeismicIntensity};
use crate::physics::thermal::fluence_at;

/// All effects at one range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectsAtRange {
    /// Ground range from the impact point (m)
    pub range: f64,
    /// Peak overpressure (Pa)
    pub overpressure: f64,
    /// Peak wind speed behind the shock (m/s)
    pub wind_speed: f64,
    /// Thermal fluence (J/m²)
    pub thermal_fluence: f64,
    /// Ejecta blanket thickness (m), zero without a crater
    pub ejecta_thickness: f64,
    /// Shaking band
    pub intensity: SeismicIntensity,
}

/// Quantities shared by every sample row
#[derive(Debug, Clone, Copy)]
pub struct SampleContext<'a> {
    pub energy: Joules,
    pub luminous_efficiency: f64,
    pub magnitude: f64,
    pub crater: &'a CraterGeometry,
    pub config: &'a ImpactModelConfig,
}

/// Evaluate one row
pub fn effects_at(range: f64, ctx: &SampleContext<'_>) -> EffectsAtRange {
    let overpressure = overpressure_at(ctx.energy, range, &ctx.config.overpressure);
    let ejecta_thickness = if ctx.crater.formed {
        ejecta_thickness_at(
            range,
            ctx.crater.transient_diameter / 2.0,
            ctx.crater.rim_height,
        )
    } else {
        0.0
    };

    EffectsAtRange {
        range,
        overpressure,
        wind_speed: peak_wind_speed(overpressure, ctx.config.atmosphere.sea_level_density),
        thermal_fluence: fluence_at(
            ctx.energy,
            ctx.luminous_efficiency,
            range,
            &ctx.config.thermal,
        ),
        ejecta_thickness,
        intensity: intensity_at(ctx.magnitude, range),
    }
}

/// Evaluate a row for every usable range
///
/// Negative and non-finite ranges are skipped.
pub fn sample_effects(ranges: &[f64], ctx: &SampleContext<'_>) -> Vec<EffectsAtRange> {
    ranges
        .iter()
        .copied()
        .filter(|r| {
            let usable = r.is_finite() && *r >= 0.0;
            if !usable {
                tracing::warn!(range = *r, "Skipping unusable sample distance");
            }
            usable
        })
        .map(|r| effects_at(r, ctx))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::crater::final_from_transient;

    fn cratered() -> CraterGeometry {
        let (final_diameter, crater_type) = final_from_transient(2000.0);
        CraterGeometry {
            formed: true,
            transient_diameter: 2000.0,
            final_diameter,
            crater_type,
            transient_depth: 707.0,
            rim_height: 50.0,
        }
    }

    #[test]
    fn test_rows_follow_request_order_and_skip_bad_ranges() {
        let config = ImpactModelConfig::default();
        let crater = cratered();
        let ctx = SampleContext {
            energy: Joules::new(1.0e18),
            luminous_efficiency: 0.003,
            magnitude: 6.0,
            crater: &crater,
            config: &config,
        };
        let rows = sample_effects(&[50_000.0, f64::NAN, 500.0, -1.0, 2_000.0], &ctx);
        let ranges: Vec<f64> = rows.iter().map(|r| r.range).collect();
        assert_eq!(ranges, vec![50_000.0, 500.0, 2_000.0]);

        // inside the rim: full thickness; at twice the rim radius: 1/8
        assert_eq!(rows[1].ejecta_thickness, 50.0);
        assert!((rows[2].ejecta_thickness - 6.25).abs() < 1e-9);
        assert!(rows[1].overpressure > rows[0].overpressure);
        assert!(rows[1].wind_speed > rows[0].wind_speed);
        assert!(rows[1].intensity >= rows[0].intensity);
    }

    #[test]
    fn test_no_ejecta_without_crater() {
        let config = ImpactModelConfig::default();
        let crater = CraterGeometry::none();
        let ctx = SampleContext {
            energy: Joules::new(1.0e15),
            luminous_efficiency: 0.003,
            magnitude: 3.0,
            crater: &crater,
            config: &config,
        };
        let row = effects_at(100.0, &ctx);
        assert_eq!(row.ejecta_thickness, 0.0);
        assert!(row.thermal_fluence > 0.0);
    }
}
