//! Error types for grid construction.

use std::fmt;

/// Errors arising from [`SpatialGrid`](crate::SpatialGrid) construction.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// The spacing `dx` is zero, negative, or not finite.
    NonPositiveSpacing {
        /// The offending spacing.
        dx: f64,
    },
    /// The bounds do not describe a non-empty finite interval.
    EmptyDomain {
        /// Left bound.
        xmin: f64,
        /// Right bound.
        xmax: f64,
    },
    /// The grid would have fewer points than the stencil needs.
    TooFewPoints {
        /// Number of points the bounds and spacing produce.
        len: usize,
        /// Minimum number of points.
        min: usize,
    },
    /// The grid would have more points than can be indexed.
    DimensionTooLarge {
        /// Number of spacings the bounds produce.
        value: f64,
        /// Maximum number of points.
        max: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveSpacing { dx } => {
                write!(f, "dx must be finite and > 0, got {dx}")
            }
            Self::EmptyDomain { xmin, xmax } => {
                write!(f, "domain [{xmin}, {xmax}] must be finite with xmin < xmax")
            }
            Self::TooFewPoints { len, min } => {
                write!(f, "grid has {len} points, at least {min} required")
            }
            Self::DimensionTooLarge { value, max } => {
                write!(f, "grid spans {value} spacings, at most {max} points supported")
            }
        }
    }
}

impl std::error::Error for GridError {}
