use thiserror::Error;

/// Unified error type for `bsiv` operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IvError {
    /// Raised when a pricing input lies outside the domain of the Black-Scholes formula.
    #[error("invalid input: {parameter} must be positive and finite, found {value}")]
    InvalidInput {
        /// Name of the offending parameter (`spot`, `strike`, `volatility`, ...).
        parameter: &'static str,
        /// The value that was supplied.
        value: f64,
    },

    /// Raised when the Newton step cannot be taken because vega vanished or overflowed.
    #[error(
        "Newton iteration diverged at iteration {iteration}: vega {vega} at sigma {sigma}"
    )]
    NumericalDivergence {
        /// Iteration counter at the time of failure.
        iteration: usize,
        /// Volatility at which vega was evaluated.
        sigma: f64,
        /// The offending vega value.
        vega: f64,
    },

    /// Raised when a raw option-type token cannot be mapped to [`OptionType`](crate::OptionType).
    #[error("unknown option type `{token}`; expected one of c, call, 1, p, put, -1")]
    UnknownOptionType { token: String },
}

impl IvError {
    /// Helper to format an [`InvalidInput`](IvError::InvalidInput) error.
    pub fn invalid_input(parameter: &'static str, value: f64) -> Self {
        Self::InvalidInput { parameter, value }
    }

    /// Helper to raise when vega makes the Newton update undefined.
    pub fn divergence(iteration: usize, sigma: f64, vega: f64) -> Self {
        Self::NumericalDivergence {
            iteration,
            sigma,
            vega,
        }
    }
}

/// Rejects values that are not strictly positive and finite. NaN is rejected too.
pub(crate) fn ensure_positive(parameter: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(IvError::invalid_input(parameter, value))
    }
}

pub(crate) fn ensure_finite(parameter: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(IvError::invalid_input(parameter, value))
    }
}

/// Type alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, IvError>;
