//! Newton-Raphson inversion of the Black-Scholes price in volatility.

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::error::{ensure_positive, IvError, Result};
use crate::market::{MarketParameters, OptionType};
use crate::pricing::{price, vega};
use crate::solving::SolverOptions;

/// Outcome of one [`solve`] call.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VolatilityEstimate {
    /// Volatility after the final Newton update.
    pub sigma: f64,
    /// Final value of the iteration counter, which starts at 1.
    pub iterations: usize,
    /// Whether the last evaluated residual was within tolerance.
    pub converged: bool,
    /// `|price(sigma) - V_market|` from the last evaluation, before the final update.
    pub residual: f64,
}

/// Transient loop state owned by a single solve.
#[derive(Debug)]
struct ConvergenceState {
    sigma: f64,
    error: f64,
    iterations: usize,
}

impl ConvergenceState {
    fn new(sigma_initial: f64) -> Self {
        Self {
            sigma: sigma_initial,
            error: f64::INFINITY,
            iterations: 1,
        }
    }

    fn is_iterating(&self, options: &SolverOptions) -> bool {
        self.error > options.tolerance && self.iterations < options.max_iterations
    }

    fn finish(self, options: &SolverOptions) -> VolatilityEstimate {
        VolatilityEstimate {
            sigma: self.sigma,
            iterations: self.iterations,
            converged: self.error <= options.tolerance,
            residual: self.error,
        }
    }
}

/// Recovers the volatility at which the Black-Scholes premium equals `market_price`.
///
/// The loop tests the residual computed *before* the latest update, so a
/// converged estimate has already taken one more Newton step than strictly
/// needed and `iterations` is one greater than the number of steps required
/// to cross the tolerance. Hitting `max_iterations` is not an error; it is
/// reported through [`VolatilityEstimate::converged`].
///
/// ```
/// use bsiv::{solve, MarketParameters, OptionType, SolverOptions};
///
/// let market = MarketParameters::new(100.0, 120.0, 0.05, 1.0).unwrap();
/// let estimate = solve(OptionType::Call, &market, 0.25, 2.0, &SolverOptions::default()).unwrap();
/// assert!(estimate.converged);
/// assert!((estimate.sigma - 0.161_482_728_841_394).abs() < 1e-9);
/// ```
///
/// # Errors
///
/// * [`IvError::InvalidInput`] if `market_price` or a configured
///   `volatility_floor` is not positive, or if sigma
///   leaves the positive domain during iteration (propagated from the pricer).
/// * [`IvError::NumericalDivergence`] if vega is zero or non-finite.
pub fn solve(
    option_type: OptionType,
    market: &MarketParameters,
    sigma_initial: f64,
    market_price: f64,
    options: &SolverOptions,
) -> Result<VolatilityEstimate> {
    ensure_positive("market_price", market_price)?;
    if let Some(floor) = options.volatility_floor {
        ensure_positive("volatility_floor", floor)?;
    }
    let (spot, strike, tau, rate) = (
        market.spot(),
        market.strike(),
        market.maturity(),
        market.rate(),
    );

    let mut state = ConvergenceState::new(sigma_initial);
    while state.is_iterating(options) {
        let residual = price(option_type, spot, strike, state.sigma, tau, rate)? - market_price;
        let slope = vega(spot, strike, state.sigma, tau, rate)?;
        if slope == 0.0 || !slope.is_finite() {
            warn!(
                "vega {slope} at sigma {} leaves the Newton step undefined",
                state.sigma
            );
            return Err(IvError::divergence(state.iterations, state.sigma, slope));
        }

        let mut next = state.sigma - residual / slope;
        if let Some(floor) = options.volatility_floor {
            next = next.max(floor);
        }
        trace!(
            "iteration {}: sigma {} residual {residual} vega {slope} -> {next}",
            state.iterations,
            state.sigma
        );

        state.error = residual.abs();
        state.sigma = next;
        state.iterations += 1;
    }

    let estimate = state.finish(options);
    if !estimate.converged {
        warn!(
            "implied volatility did not converge after {} iterations; residual {}",
            estimate.iterations, estimate.residual
        );
    }
    debug!(
        "{option_type} implied volatility {} after {} iterations (converged: {})",
        estimate.sigma, estimate.iterations, estimate.converged
    );
    Ok(estimate)
}

/// Bundles [`SolverOptions`] with the solve entry point.
#[derive(Clone, Debug, Default)]
pub struct ImpliedVolatilitySolver {
    options: SolverOptions,
}

impl ImpliedVolatilitySolver {
    pub fn new(options: SolverOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    /// See [`solve`].
    pub fn solve(
        &self,
        option_type: OptionType,
        market: &MarketParameters,
        sigma_initial: f64,
        market_price: f64,
    ) -> Result<VolatilityEstimate> {
        solve(option_type, market, sigma_initial, market_price, &self.options)
    }
}
