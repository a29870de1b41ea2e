//! Error types for simulation construction.

use thiserror::Error;

/// A parameter rejected while constructing a sensor, map, vehicle or simulation.
///
/// These indicate a configuration mistake. Once constructed, nothing in the
/// scan or mapping pipeline fails at runtime.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The sensor range must be positive and finite.
    #[error("invalid sensor range: {0}")]
    InvalidRange(f64),

    /// The field of view must be positive, finite and at most 360 degrees.
    #[error("invalid field of view: {0} degrees")]
    InvalidFieldOfView(f64),

    /// The angular step between rays must be positive and finite.
    #[error("invalid angular step: {0} degrees")]
    InvalidAngularStep(f64),

    /// The grid resolution must be positive and finite.
    #[error("invalid grid resolution: {0}")]
    InvalidResolution(f64),

    /// The per-observation increment must be positive and no greater than the maximum confidence.
    #[error("invalid occupancy increment: {increment} (max confidence {max_confidence})")]
    InvalidIncrement {
        /// The rejected increment.
        increment: f64,
        /// The maximum confidence it was checked against.
        max_confidence: f64,
    },

    /// The maximum confidence must lie in (0, 1].
    #[error("invalid max confidence: {0}")]
    InvalidMaxConfidence(f64),

    /// The world must be at least one grid cell in each dimension.
    #[error("world of {width} x {height} is smaller than one cell of size {resolution}")]
    EmptyGrid {
        width: f64,
        height: f64,
        resolution: f64,
    },

    /// The grid would hold more than [crate::MAX_CELLS] cells.
    #[error("grid of {rows} x {cols} cells exceeds the limit of {max_cells}")]
    GridTooLarge {
        rows: f64,
        cols: f64,
        max_cells: usize,
    },

    /// A vehicle attribute is out of range.
    #[error("invalid vehicle attribute `{name}`: {value}")]
    InvalidVehicle {
        /// The attribute name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}

/// Returns true for finite values strictly greater than zero.
pub(crate) fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
