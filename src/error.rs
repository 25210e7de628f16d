//! Error type shared by the detection, fitting and geometry stages.

use thiserror::Error;

/// Failure conditions surfaced by the trait pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// No image or no points where the operation requires them.
    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    /// Collinear/coincident points, or a fit that produced no usable result.
    #[error("degenerate fit: {0}")]
    DegenerateFit(String),

    /// Fewer clicked points than the requested trait kind needs.
    #[error("insufficient points: need {required}, got {available}")]
    InsufficientPoints { required: usize, available: usize },

    /// Option values rejected at the boundary.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Trait parameters that violate the finite/positive invariants.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Malformed manual orientation text.
    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Error>;
