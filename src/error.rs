use thiserror::Error;

/// Top-level error type for the transfinite interpolation crate.
#[derive(Debug, Error)]
pub enum TransfiniteError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Sampling(#[from] SamplingError),
}

/// Errors raised while building boundary curves and surfaces.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,

    #[error("invalid knot vector: {0}")]
    InvalidKnots(String),

    #[error("{control_points} control points but {weights} weights")]
    WeightCountMismatch {
        control_points: usize,
        weights: usize,
    },

    #[error("weight {index} = {value} is not a positive finite number")]
    NonPositiveWeight { index: usize, value: f64 },
}

/// Errors raised while constructing a transfinite mapping.
#[derive(Debug, Error)]
pub enum MappingError {
    #[error("spatial dimension {0} is not supported (expected 2 or 3)")]
    UnsupportedDimension(usize),

    #[error("expected {expected} boundaries, found {found}")]
    BoundaryCount { expected: usize, found: usize },

    #[error("boundary {0} was not supplied")]
    MissingBoundary(usize),

    #[error("boundary index {index} is out of range (mapping has {count} boundaries)")]
    InvalidBoundaryIndex { index: usize, count: usize },
}

/// Errors raised while sampling a mapping over a grid.
#[derive(Debug, Error)]
pub enum SamplingError {
    #[error("invalid sampling parameters: {0}")]
    InvalidParameters(String),
}

/// Convenience type alias for results using [`TransfiniteError`].
pub type Result<T> = std::result::Result<T, TransfiniteError>;
