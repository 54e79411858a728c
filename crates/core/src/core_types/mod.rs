//! Core types and utilities

pub mod impactor;
pub mod units;

pub use impactor::*;
pub use units::*;
