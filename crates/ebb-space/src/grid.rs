//! Uniform 1D grid over `[xmin, xmax]`.

use std::ops::Range;

use crate::error::GridError;

/// Relative tolerance used to snap `(xmax - xmin) / dx` onto an integer.
///
/// `0.3 / 0.1` evaluates to `2.9999999999999996`; without snapping the
/// last grid point would silently go missing.
const SNAP_TOLERANCE: f64 = 1e-9;

/// An ordered, fixed-size sequence of uniformly spaced coordinates.
///
/// Point `i` sits at `xmin + i * dx` for `0 <= i < len`, with
/// `len = floor((xmax - xmin) / dx) + 1`. The grid is immutable after
/// construction.
///
/// # Examples
///
/// ```
/// use ebb_space::SpatialGrid;
///
/// let grid = SpatialGrid::new(0.0, 1.0, 0.01).unwrap();
/// assert_eq!(grid.len(), 101);
/// assert_eq!(grid.coords()[0], 0.0);
/// assert!((grid.coords()[100] - 1.0).abs() < 1e-12);
///
/// // Interior points exclude both ends.
/// assert_eq!(grid.interior(), 1..100);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialGrid {
    xmin: f64,
    xmax: f64,
    dx: f64,
    coords: Vec<f64>,
}

impl SpatialGrid {
    /// Minimum length: one interior point plus two ends.
    pub const MIN_LEN: usize = 3;

    /// Maximum length. Longer spans are rejected before any coordinate
    /// is allocated.
    pub const MAX_LEN: usize = i32::MAX as usize;

    /// Create a grid spanning `[xmin, xmax]` with spacing `dx`.
    ///
    /// Returns `Err(GridError::NonPositiveSpacing)` if `dx` is not finite
    /// and positive, `Err(GridError::EmptyDomain)` if the bounds are not
    /// finite or `xmin >= xmax`, and `Err(GridError::TooFewPoints)` if
    /// fewer than [`MIN_LEN`](Self::MIN_LEN) points result.
    pub fn new(xmin: f64, xmax: f64, dx: f64) -> Result<Self, GridError> {
        if !(dx.is_finite() && dx > 0.0) {
            return Err(GridError::NonPositiveSpacing { dx });
        }
        if !(xmin.is_finite() && xmax.is_finite() && xmin < xmax) {
            return Err(GridError::EmptyDomain { xmin, xmax });
        }

        let spans = snapped_floor((xmax - xmin) / dx);
        if !(spans < Self::MAX_LEN as f64) {
            return Err(GridError::DimensionTooLarge {
                value: spans,
                max: Self::MAX_LEN,
            });
        }
        let len = spans as usize + 1;
        if len < Self::MIN_LEN {
            return Err(GridError::TooFewPoints {
                len,
                min: Self::MIN_LEN,
            });
        }

        let coords = (0..len).map(|i| xmin + i as f64 * dx).collect();
        Ok(Self {
            xmin,
            xmax,
            dx,
            coords,
        })
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Always `false`: construction rejects short grids.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Left bound.
    pub fn xmin(&self) -> f64 {
        self.xmin
    }

    /// Right bound as configured. The last coordinate may fall short of
    /// it when `dx` does not divide the domain.
    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    /// Uniform spacing.
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// All coordinates in grid order.
    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    /// Coordinate of point `i`, or `None` if out of range.
    pub fn coord(&self, i: usize) -> Option<f64> {
        self.coords.get(i).copied()
    }

    /// Index range of interior points (`1..len - 1`).
    pub fn interior(&self) -> Range<usize> {
        1..self.len() - 1
    }

    /// Index of the grid point nearest `x`, clamped to the grid.
    pub fn nearest_index(&self, x: f64) -> usize {
        let raw = ((x - self.xmin) / self.dx).round();
        if raw.is_nan() || raw <= 0.0 {
            0
        } else {
            (raw as usize).min(self.len() - 1)
        }
    }

    /// Midpoint of the sampled coordinates.
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.coords[0] + self.coords[self.len() - 1])
    }
}

/// `floor(ratio)`, snapping onto the nearest integer when `ratio` is
/// within [`SNAP_TOLERANCE`] of it.
fn snapped_floor(ratio: f64) -> f64 {
    let nearest = ratio.round();
    if (ratio - nearest).abs() <= SNAP_TOLERANCE * nearest.abs().max(1.0) {
        nearest
    } else {
        ratio.floor()
    }
}
