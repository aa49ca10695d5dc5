//! Exponential absorbing zones at both ends of the domain.
//!
//! Within `width` points of each edge the field is multiplied by a
//! smooth mask that approaches `exp(-strength)` at the outermost point
//! and rises toward 1 at the zone's inner edge:
//!
//! ```text
//! f_left[i]  = exp(-|(x[width] - x[i]) / width * strength|)   for i in 0..width
//! f_right[j] = f_left[width - 1 - j]
//! ```
//!
//! The left zone scales each point by its own factor. The right zone has
//! two policies, selected by [`RightZone`]: the reference [`Broadcast`]
//! overwrites every right-zone point with the zone's first value scaled
//! by `f_right`, while [`Mirror`] treats it like the left zone.
//!
//! [`Broadcast`]: RightZone::Broadcast
//! [`Mirror`]: RightZone::Mirror

use ebb_core::PropagatorError;
use ebb_propagator::context::StepContext;
use ebb_propagator::propagator::Propagator;
use ebb_space::SpatialGrid;

/// How the right-hand damping zone is updated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RightZone {
    /// `u[N - width + j] = u[N - width] * f_right[j]`.
    ///
    /// Every point takes the value at the zone's inner edge, read before
    /// any write, scaled by its factor. Each point's own prior value is
    /// discarded.
    #[default]
    Broadcast,
    /// `u[N - width + j] *= f_right[j]`, symmetric to the left zone.
    Mirror,
}

/// Precomputed damping factors for one grid and zone width.
///
/// # Examples
///
/// ```
/// use ebb_propagators::{DampingProfile, RightZone};
///
/// let coords: Vec<f64> = (0..10).map(|i| i as f64).collect();
/// let profile = DampingProfile::new(&coords, 2, 0.8).unwrap();
/// assert_eq!(profile.left().len(), 2);
///
/// let mut u = vec![1.0; 10];
/// profile.apply(&mut u, RightZone::Mirror).unwrap();
/// assert!(u[0] < u[1] && u[1] < u[2]);
/// assert_eq!(&u[2..8], &[1.0; 6]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DampingProfile {
    left: Vec<f64>,
    grid_len: usize,
}

impl DampingProfile {
    /// Default zone width in grid points.
    pub const DEFAULT_WIDTH: usize = 7;

    /// Default damping strength.
    pub const DEFAULT_STRENGTH: f64 = 0.8;

    /// Compute the factors for a zone of `width` points over `coords`.
    ///
    /// `width = 0` yields an empty profile whose [`apply`](Self::apply)
    /// only checks the length.
    ///
    /// # Errors
    ///
    /// Returns `PropagatorError::InvalidConfiguration` if `strength` is
    /// negative or not finite, or if `2 * width >= coords.len()` so the
    /// two zones would meet.
    pub fn new(coords: &[f64], width: usize, strength: f64) -> Result<Self, PropagatorError> {
        if !(strength.is_finite() && strength >= 0.0) {
            return Err(PropagatorError::InvalidConfiguration {
                reason: format!("damping strength must be finite and >= 0, got {strength}"),
            });
        }
        let grid_len = coords.len();
        if width > 0 && width >= grid_len.div_ceil(2) {
            return Err(PropagatorError::InvalidConfiguration {
                reason: format!("damping zones of width {width} overlap on a {grid_len}-point grid"),
            });
        }

        let left = match coords.get(width) {
            Some(&inner) if width > 0 => {
                let t = width as f64;
                coords[..width]
                    .iter()
                    .map(|&x| (-((inner - x) / t * strength).abs()).exp())
                    .collect()
            }
            _ => Vec::new(),
        };
        Ok(Self { left, grid_len })
    }

    /// Zone width in grid points.
    pub fn width(&self) -> usize {
        self.left.len()
    }

    /// Number of grid points the profile was computed for.
    pub fn grid_len(&self) -> usize {
        self.grid_len
    }

    /// Left-zone factors, outermost first.
    pub fn left(&self) -> &[f64] {
        &self.left
    }

    /// Right-zone factors, innermost first.
    pub fn right(&self) -> impl Iterator<Item = f64> + '_ {
        self.left.iter().rev().copied()
    }

    /// Damp `u` in place.
    ///
    /// # Errors
    ///
    /// Returns `PropagatorError::InvalidConfiguration` if `u` does not
    /// have [`grid_len`](Self::grid_len) points. `u` is untouched then.
    pub fn apply(&self, u: &mut [f64], right_zone: RightZone) -> Result<(), PropagatorError> {
        if u.len() != self.grid_len {
            return Err(PropagatorError::InvalidConfiguration {
                reason: format!(
                    "field has {} points, damping profile expects {}",
                    u.len(),
                    self.grid_len
                ),
            });
        }
        let width = self.width();
        if width == 0 {
            return Ok(());
        }

        for (v, f) in u[..width].iter_mut().zip(&self.left) {
            *v *= f;
        }

        let start = self.grid_len - width;
        match right_zone {
            RightZone::Broadcast => {
                let pivot = u[start];
                for (v, f) in u[start..].iter_mut().zip(self.right()) {
                    *v = pivot * f;
                }
            }
            RightZone::Mirror => {
                for (v, f) in u[start..].iter_mut().zip(self.right()) {
                    *v *= f;
                }
            }
        }
        Ok(())
    }
}

/// Damp `u` over grid `x` with zones of `nxb` points and strength `alpha`,
/// using the [`Broadcast`](RightZone::Broadcast) right zone.
///
/// Takes and returns the field by value; the solver uses
/// [`DampingProfile`] directly to avoid recomputing the factors.
///
/// # Errors
///
/// Returns `PropagatorError::InvalidConfiguration` if `u` and `x` differ
/// in length or the zones overlap.
pub fn absorbing_boundary(
    mut u: Vec<f64>,
    x: &[f64],
    nxb: usize,
    alpha: f64,
) -> Result<Vec<f64>, PropagatorError> {
    DampingProfile::new(x, nxb, alpha)?.apply(&mut u, RightZone::Broadcast)?;
    Ok(u)
}

// ── Propagator ─────────────────────────────────────────────────────

/// Pipeline stage that damps the freshly computed future field.
///
/// Runs after [`Leapfrog`](crate::Leapfrog). It sets the only values the
/// boundary points ever take.
///
/// Constructed via the builder pattern: [`AbsorbingBoundary::builder`].
#[derive(Debug)]
pub struct AbsorbingBoundary {
    profile: DampingProfile,
    right_zone: RightZone,
}

/// Builder for [`AbsorbingBoundary`].
///
/// Required: `grid`.
pub struct AbsorbingBoundaryBuilder<'g> {
    grid: Option<&'g SpatialGrid>,
    width: usize,
    strength: f64,
    right_zone: RightZone,
}

impl AbsorbingBoundary {
    /// Create a new builder for configuring an `AbsorbingBoundary`.
    pub fn builder<'g>() -> AbsorbingBoundaryBuilder<'g> {
        AbsorbingBoundaryBuilder {
            grid: None,
            width: DampingProfile::DEFAULT_WIDTH,
            strength: DampingProfile::DEFAULT_STRENGTH,
            right_zone: RightZone::default(),
        }
    }

    /// The precomputed factors.
    pub fn profile(&self) -> &DampingProfile {
        &self.profile
    }

    /// The right-zone policy.
    pub fn right_zone(&self) -> RightZone {
        self.right_zone
    }
}

impl<'g> AbsorbingBoundaryBuilder<'g> {
    /// Grid the damping factors are computed over.
    pub fn grid(mut self, grid: &'g SpatialGrid) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Zone width in grid points (default: 7).
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Damping strength (default: 0.8). Must be finite and >= 0.
    pub fn strength(mut self, strength: f64) -> Self {
        self.strength = strength;
        self
    }

    /// Right-zone policy (default: [`RightZone::Broadcast`]).
    pub fn right_zone(mut self, right_zone: RightZone) -> Self {
        self.right_zone = right_zone;
        self
    }

    /// Build the stage, precomputing its factors.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `grid` is not set, `strength` is negative or not
    /// finite, or the zones overlap on the grid.
    pub fn build(self) -> Result<AbsorbingBoundary, String> {
        let grid = self.grid.ok_or_else(|| "grid is required".to_string())?;
        let profile = DampingProfile::new(grid.coords(), self.width, self.strength)
            .map_err(|e| e.to_string())?;
        Ok(AbsorbingBoundary {
            profile,
            right_zone: self.right_zone,
        })
    }
}

impl Propagator for AbsorbingBoundary {
    fn name(&self) -> &str {
        "absorbing_boundary"
    }

    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), PropagatorError> {
        self.profile.apply(ctx.future(), self.right_zone)
    }
}
