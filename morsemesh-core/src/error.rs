//! Error types for morsemesh

use thiserror::Error;

/// Main error type for morsemesh operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Shape mismatch: values are {values:?} but partitions are {partitions:?}")]
    ShapeMismatch {
        values: (usize, usize),
        partitions: (usize, usize),
    },

    #[error("Invalid range: [{min}, {max}] must have finite bounds")]
    InvalidRange { min: f64, max: f64 },

    #[error("Non-finite scalar value at grid position ({x}, {y})")]
    NonFiniteValue { x: usize, y: usize },

    #[error("Vertex references partition {0} which has no face bucket")]
    MissingFace(u32),

    #[error("Too many partitions: {partitions} exceeds the limit of {limit}")]
    TooManyPartitions { partitions: usize, limit: usize },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Algorithm error: {0}")]
    Algorithm(String),
}

/// Result type alias for morsemesh operations
pub type Result<T> = std::result::Result<T, Error>;
