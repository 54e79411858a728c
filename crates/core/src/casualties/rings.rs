//! Concentric population rings
//!
//! The population service returns cumulative counts within each radius.
//! Successive differences give the population of each annulus, so the rings
//! partition the disk of the largest radius with no overlap and no gap.

/// Annulus between two consecutive distinct radii (m)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopulationRing {
    /// Outer bound (inclusive)
    pub outer: u64,
    /// Inner bound, 0 for the innermost disk
    pub inner: u64,
    /// People living between `inner` and `outer`
    pub population: u64,
}

impl PopulationRing {
    /// Radius halfway between the bounds (m)
    #[allow(clippy::cast_precision_loss)] // radii are far below 2^52 m
    pub fn mid_radius(&self) -> f64 {
        (self.outer + self.inner) as f64 / 2.0
    }
}

/// Ring construction failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RingError {
    /// Population list not aligned with the radius list
    #[error("expected {expected} population values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Distinct positive radii, rounded to whole meters, largest first
///
/// This is exactly the list sent to the population service.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // finite, positive, rounded
pub fn distinct_radii(radii: impl IntoIterator<Item = f64>) -> Vec<u64> {
    let mut rounded: Vec<u64> = radii
        .into_iter()
        .filter(|r| r.is_finite())
        .map(f64::round)
        .filter(|r| *r > 0.0)
        .map(|r| r as u64)
        .collect();
    rounded.sort_unstable_by(|a, b| b.cmp(a));
    rounded.dedup();
    rounded
}

/// Partition cumulative counts into rings
///
/// `radii` must be distinct and descending (as from [`distinct_radii`]) and
/// `cumulative[i]` the population within `radii[i]`. Counts that grow
/// inwards are clamped to the enclosing count, so ring populations never go
/// negative and always sum to `cumulative[0]`.
///
/// # Errors
/// [`RingError::LengthMismatch`] when the two slices differ in length
pub fn build_rings(radii: &[u64], cumulative: &[u64]) -> Result<Vec<PopulationRing>, RingError> {
    if radii.len() != cumulative.len() {
        return Err(RingError::LengthMismatch {
            expected: radii.len(),
            actual: cumulative.len(),
        });
    }

    let mut monotone = Vec::with_capacity(cumulative.len());
    let mut running = u64::MAX;
    for &count in cumulative {
        if count > running {
            tracing::warn!(
                count,
                enclosing = running,
                "Population grows inwards, clamping to enclosing count"
            );
        }
        running = running.min(count);
        monotone.push(running);
    }

    Ok(radii
        .iter()
        .enumerate()
        .map(|(i, &outer)| {
            let (inner, inner_count) = match (radii.get(i + 1), monotone.get(i + 1)) {
                (Some(&r), Some(&c)) => (r, c),
                _ => (0, 0),
            };
            PopulationRing {
                outer,
                inner,
                population: monotone[i] - inner_count,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_radii_rounds_and_sorts() {
        let r = distinct_radii([1000.4, 5000.0, 999.6, 0.0, -3.0, f64::NAN, 0.4, 20_000.0]);
        assert_eq!(r, vec![20_000, 5_000, 1_000]);
    }

    #[test]
    fn test_ring_populations_telescope() {
        let rings = build_rings(&[30_000, 10_000, 1_000], &[900, 400, 50]).unwrap();
        let pops: Vec<u64> = rings.iter().map(|r| r.population).collect();
        assert_eq!(pops, vec![500, 350, 50]);
        assert_eq!(rings[0].inner, 10_000);
        assert_eq!(rings[2].inner, 0);
        assert_eq!(pops.iter().sum::<u64>(), 900);
    }

    #[test]
    fn test_non_monotone_counts_clamped() {
        let rings = build_rings(&[3_000, 2_000, 1_000], &[100, 150, 20]).unwrap();
        let pops: Vec<u64> = rings.iter().map(|r| r.population).collect();
        assert_eq!(pops, vec![0, 80, 20]);
        assert_eq!(pops.iter().sum::<u64>(), 100);
    }

    #[test]
    fn test_length_mismatch() {
        let err = build_rings(&[3_000, 2_000], &[100]).unwrap_err();
        assert_eq!(err, RingError::LengthMismatch { expected: 2, actual: 1 });
    }

    #[test]
    fn test_empty_input() {
        assert!(build_rings(&[], &[]).unwrap().is_empty());
    }

    #[test]
    fn test_mid_radius() {
        let ring = PopulationRing { outer: 3_000, inner: 1_000, population: 0 };
        assert_eq!(ring.mid_radius(), 2_000.0);
    }
}
