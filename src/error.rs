use thiserror::Error;

/// Failures reported by the triangulation step.
///
/// These are surfaced to whoever asked for the triangulation; the driver
/// decides whether to skip the frame or stop the run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("{dimensions}D triangulation needs at least {required} points, got {actual}")]
    TooFewPoints {
        dimensions: usize,
        required: usize,
        actual: usize,
    },

    #[error("degenerate point set: all points are {0}")]
    Degenerate(&'static str),

    #[error("point {index} has a non-finite coordinate")]
    NonFinite { index: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
