//! Field at time zero.
//!
//! [`InitialCondition`] maps a coordinate to a displacement. The solver
//! samples it once per grid point at construction and again on reset.

/// Displacement at `t = 0` as a function of position.
///
/// Implemented by [`GaussianPulse`] and by any `Fn(f64) -> f64 + Send`,
/// so a closure can stand in for a custom profile:
///
/// ```
/// use ebb_propagators::InitialCondition;
///
/// let plucked = |x: f64| if (0.4..=0.6).contains(&x) { 1.0 } else { 0.0 };
/// assert_eq!(plucked.displacement(0.5), 1.0);
/// assert_eq!(plucked.sample(&[0.0, 0.5, 1.0]), vec![0.0, 1.0, 0.0]);
/// ```
pub trait InitialCondition: Send {
    /// Displacement at coordinate `x`.
    fn displacement(&self, x: f64) -> f64;

    /// Sample every coordinate in order.
    fn sample(&self, coords: &[f64]) -> Vec<f64> {
        coords.iter().map(|&x| self.displacement(x)).collect()
    }
}

impl<F> InitialCondition for F
where
    F: Fn(f64) -> f64 + Send,
{
    fn displacement(&self, x: f64) -> f64 {
        self(x)
    }
}

/// A narrow Gaussian bump `exp(-(x - b)² / 2e-3)` with unit peak.
///
/// # Examples
///
/// ```
/// use ebb_propagators::{GaussianPulse, InitialCondition};
///
/// let pulse = GaussianPulse::default();
/// assert_eq!(pulse.center(), 0.5);
/// assert_eq!(pulse.displacement(0.5), 1.0);
/// assert!(pulse.displacement(0.0) < 1e-50);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaussianPulse {
    center: f64,
}

impl GaussianPulse {
    /// Centre used when none is given.
    pub const DEFAULT_CENTER: f64 = 0.5;

    /// Denominator of the exponent, `2σ²` with `σ² = 1e-3`.
    pub const SPREAD: f64 = 2e-3;

    /// A pulse peaking at `center`.
    pub fn new(center: f64) -> Self {
        Self { center }
    }

    /// Where the pulse peaks.
    pub fn center(&self) -> f64 {
        self.center
    }
}

impl Default for GaussianPulse {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CENTER)
    }
}

impl InitialCondition for GaussianPulse {
    fn displacement(&self, x: f64) -> f64 {
        let d = x - self.center;
        (-d * d / Self::SPREAD).exp()
    }
}

/// Sample a [`GaussianPulse`] centred at `b` over `coords`.
pub fn initial_condition(coords: &[f64], b: f64) -> Vec<f64> {
    GaussianPulse::new(b).sample(coords)
}
