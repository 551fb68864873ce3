//! Error types
//!
//! Construction-time failures only. Once a [`Simulation`](crate::sim::Simulation)
//! exists, stepping it cannot fail.

use thiserror::Error;

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(#[from] GeometryError),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    #[error("i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Problems with the container polygon's base vertices.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("polygon needs at least 3 vertices, got {count}")]
    TooFewVertices { count: usize },

    #[error("vertex {index} is not finite")]
    NonFiniteVertex { index: usize },

    #[error("edge {index} has length {length}, too short to define a direction")]
    ZeroLengthEdge { index: usize, length: f64 },

    #[error("polygon area {area} is effectively zero")]
    ZeroArea { area: f64 },

    #[error("polygon is not convex at vertex {index}")]
    NonConvex { index: usize },
}

/// Problems with the scalar parameters of a simulation.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("ball radius must be positive, got {0}")]
    NonPositiveRadius(f64),

    #[error("trail capacity must be at least 1")]
    ZeroTrailCapacity,

    #[error("{0} must be finite")]
    NonFinite(&'static str),

    #[error("a regular polygon needs at least 3 sides, got {0}")]
    TooFewSides(usize),

    #[error("polygon size must be positive, got {0}")]
    NonPositiveSize(f64),
}

/// Convenience type alias for results using [`SimError`].
pub type Result<T> = std::result::Result<T, SimError>;
