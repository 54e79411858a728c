//! Semantic unit types for type-safe physical quantity handling
//!
//! Newtype wrappers keep impactor inputs from being mixed up at the API
//! boundary (a diameter in meters passed where a speed is expected, degrees
//! passed where radians are expected).
//!
//! # Design Philosophy
//! - All quantities use f64: impact energies span 10^12 to 10^24 J and the
//!   scaling laws raise inputs to fractional powers
//! - Implements common traits (Add, Sub, Mul, Div, Ord, Display, Deref)
//! - Total ordering via Ord trait (NaN handled as greater than all values)
//! - Serde support, serialized as the bare number
//!
//! # Usage
//! ```
//! use impact_sim_core::core_types::units::{Degrees, Joules, Megatons};
//!
//! let angle = Degrees::new(45.0);
//! assert!((*angle.to_radians() - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
//!
//! let yield_mt: Megatons = Joules::new(4.184e15).into();
//! assert!((*yield_mt - 1.0).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Deref, Div, Mul, Sub};

/// Joules released by one megaton of TNT
pub const JOULES_PER_MEGATON: f64 = 4.184e15;

/// Joules released by one kiloton of TNT
pub const JOULES_PER_KILOTON: f64 = 4.184e12;

/// Shared plumbing for every f64 quantity: total ordering, deref to the raw
/// value, conversions and same-unit arithmetic.
macro_rules! impl_quantity {
    ($name:ident, $unit:literal) => {
        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.total_cmp(&other.0)
            }
        }

        impl Deref for $name {
            type Target = f64;
            #[inline]
            fn deref(&self) -> &f64 {
                &self.0
            }
        }

        impl From<$name> for f64 {
            fn from(q: $name) -> f64 {
                q.0
            }
        }

        impl Add for $name {
            type Output = $name;
            fn add(self, rhs: $name) -> $name {
                $name(self.0 + rhs.0)
            }
        }

        impl Sub for $name {
            type Output = $name;
            fn sub(self, rhs: $name) -> $name {
                $name(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $name {
            type Output = $name;
            fn mul(self, rhs: f64) -> $name {
                $name(self.0 * rhs)
            }
        }

        impl Div<f64> for $name {
            type Output = $name;
            fn div(self, rhs: f64) -> $name {
                $name(self.0 / rhs)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:.2} {}", self.0, $unit)
            }
        }
    };
}

// ============================================================================
// VELOCITY
// ============================================================================

/// Speed in meters per second
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct MetersPerSecond(f64);

impl_quantity!(MetersPerSecond, "m/s");

impl MetersPerSecond {
    /// Create a new speed
    #[inline]
    #[must_use]
    pub fn new(value: f64) -> Self {
        MetersPerSecond(value)
    }

    /// Convert to km/h (the unit the impact summary displays)
    #[inline]
    #[must_use]
    pub fn to_kilometers_per_hour(self) -> f64 {
        self.0 * 3.6
    }

    /// Convert to km/s
    #[inline]
    #[must_use]
    pub fn to_kilometers_per_second(self) -> f64 {
        self.0 / 1000.0
    }
}

// ============================================================================
// ENERGY
// ============================================================================

/// Energy in joules
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Joules(f64);

impl_quantity!(Joules, "J");

impl Joules {
    /// Create a new energy value
    #[inline]
    #[must_use]
    pub fn new(value: f64) -> Self {
        Joules(value)
    }

    /// TNT-equivalent yield in kilotons
    #[inline]
    #[must_use]
    pub fn to_kilotons(self) -> f64 {
        self.0 / JOULES_PER_KILOTON
    }

    /// TNT-equivalent yield in megatons
    #[inline]
    #[must_use]
    pub fn to_megatons(self) -> Megatons {
        Megatons(self.0 / JOULES_PER_MEGATON)
    }
}

/// TNT-equivalent yield in megatons
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Megatons(f64);

impl_quantity!(Megatons, "Mt");

impl Megatons {
    /// Create a new yield value
    #[inline]
    #[must_use]
    pub fn new(value: f64) -> Self {
        Megatons(value)
    }
}

impl From<Joules> for Megatons {
    fn from(j: Joules) -> Self {
        j.to_megatons()
    }
}

// ============================================================================
// ANGLES
// ============================================================================

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Degrees(f64);

impl_quantity!(Degrees, "°");

impl Degrees {
    /// Create a new angle in degrees
    #[inline]
    #[must_use]
    pub fn new(value: f64) -> Self {
        Degrees(value)
    }

    /// Convert to radians
    #[inline]
    #[must_use]
    pub fn to_radians(self) -> Radians {
        Radians(self.0.to_radians())
    }
}

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Radians(f64);

impl_quantity!(Radians, "rad");

impl Radians {
    /// Create a new angle in radians
    #[inline]
    #[must_use]
    pub fn new(value: f64) -> Self {
        Radians(value)
    }

    /// Convert to degrees
    #[inline]
    #[must_use]
    pub fn to_degrees(self) -> Degrees {
        Degrees(self.0.to_degrees())
    }
}

impl From<Degrees> for Radians {
    fn from(d: Degrees) -> Self {
        d.to_radians()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_megaton_conversion() {
        let e = Joules::new(2.5 * JOULES_PER_MEGATON);
        assert!((*e.to_megatons() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_kilotons_are_thousandth_of_megatons() {
        let e = Joules::new(1.0e18);
        assert!((e.to_kilotons() / *e.to_megatons() - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_speed_unit_conversions() {
        let v = MetersPerSecond::new(17_000.0);
        assert_eq!(v.to_kilometers_per_hour(), 61_200.0);
        assert_eq!(v.to_kilometers_per_second(), 17.0);
    }

    #[test]
    fn test_degrees_to_radians() {
        let r = Degrees::new(90.0).to_radians();
        assert!((*r - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((*r.to_degrees() - 90.0).abs() < 1e-12);
    }

    #[test]
    fn test_ordering_is_total() {
        let a = Megatons::new(10.0);
        let b = Megatons::new(20.0);
        assert!(a < b);
        assert_eq!(a.max(b), b);
    }
}
