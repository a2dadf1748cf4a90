//! Heat method parameters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters for the heat method.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeatParams {
    /// Diffusion time as a multiple of the squared mean spacing.
    ///
    /// Larger values smooth the result; `1.0` follows the usual choice
    /// `t = h²`.
    pub time_factor: f64,

    /// Relative residual at which the conjugate gradient stops.
    pub tolerance: f64,

    /// Iteration cap for each linear solve.
    pub max_iterations: usize,

    /// Multiple of the vertex areas added to the Poisson system diagonal.
    pub regularization: f64,
}

impl Default for HeatParams {
    fn default() -> Self {
        Self {
            time_factor: 1.0,
            tolerance: 1e-10,
            max_iterations: 20_000,
            regularization: 1e-8,
        }
    }
}

impl HeatParams {
    /// Create new parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looser tolerance for interactive use on large meshes.
    #[must_use]
    pub fn interactive() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 5_000,
            ..Self::default()
        }
    }

    /// Set the diffusion time factor.
    #[must_use]
    pub const fn with_time_factor(mut self, factor: f64) -> Self {
        self.time_factor = factor;
        self
    }

    /// Set the solver tolerance.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the iteration cap.
    #[must_use]
    pub const fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Set the Poisson regularization.
    #[must_use]
    pub const fn with_regularization(mut self, regularization: f64) -> Self {
        self.regularization = regularization;
        self
    }
}
