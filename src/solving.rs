//! Newton-Raphson solver configuration.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_positive, Result};

/// Configuration for the implied volatility iteration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverOptions {
    /// Absolute pricing residual `|price(sigma) - V_market|` accepted as converged.
    pub tolerance: f64,
    /// Iteration counter limit; the counter starts at 1, so at most `max_iterations - 1` Newton steps run.
    pub max_iterations: usize,
    /// Optional lower clamp applied to sigma after every Newton step. Must be
    /// strictly positive; [`solve`](crate::solve) rejects any other value.
    ///
    /// `None` lets sigma leave the positive domain, in which case the next
    /// pricing call fails with [`IvError::InvalidInput`](crate::IvError::InvalidInput).
    pub volatility_floor: Option<f64>,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_iterations: 100,
            volatility_floor: None,
        }
    }
}

impl SolverOptions {
    /// Override the convergence tolerance while preserving other defaults.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the iteration counter limit (at least 1).
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    /// Clamp every Newton update to at least `floor`.
    ///
    /// # Errors
    ///
    /// Returns [`IvError::InvalidInput`](crate::IvError::InvalidInput) unless
    /// `floor` is strictly positive and finite.
    pub fn with_volatility_floor(mut self, floor: f64) -> Result<Self> {
        self.volatility_floor = Some(ensure_positive("volatility_floor", floor)?);
        Ok(self)
    }
}
