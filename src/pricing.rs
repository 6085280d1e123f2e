//! Closed-form Black-Scholes pricer and its volatility sensitivity.

use libm::erfc;

use crate::error::{ensure_finite, ensure_positive, Result};
use crate::market::{MarketParameters, OptionType, PricingInput};

/// `sqrt(2 pi)`.
const SQRT_2PI: f64 = 2.506_628_274_631_000_5;

/// Standard normal cumulative distribution function, `Phi(x)`.
pub(crate) fn normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / std::f64::consts::SQRT_2)
}

/// Standard normal probability density function, `phi(x)`.
pub(crate) fn normal_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / SQRT_2PI
}

/// Computes the standardized variables `(d1, d2)`.
///
/// All of `spot`, `strike`, `sigma` and `tau` must be strictly positive; the
/// callers in this module validate before calling.
pub(crate) fn d1_d2(spot: f64, strike: f64, sigma: f64, tau: f64, rate: f64) -> (f64, f64) {
    let vol_sqrt_t = sigma * tau.sqrt();
    let d1 = ((spot / strike).ln() + (rate + 0.5 * sigma * sigma) * tau) / vol_sqrt_t;
    (d1, d1 - vol_sqrt_t)
}

fn validate(spot: f64, strike: f64, sigma: f64, tau: f64, rate: f64) -> Result<()> {
    ensure_positive("spot", spot)?;
    ensure_positive("strike", strike)?;
    ensure_positive("volatility", sigma)?;
    ensure_positive("maturity", tau)?;
    ensure_finite("rate", rate)?;
    Ok(())
}

/// Black-Scholes premium of a European call or put.
///
/// ```
/// use bsiv::{price, OptionType};
///
/// let premium = price(OptionType::Call, 100.0, 100.0, 0.2, 1.0, 0.05).unwrap();
/// assert!((premium - 10.450_583_572_185_57).abs() < 1e-10);
/// ```
///
/// # Errors
///
/// Returns [`IvError::InvalidInput`](crate::IvError::InvalidInput) when `spot`,
/// `strike`, `sigma` or `tau` is not strictly positive, or `rate` is not finite.
pub fn price(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    sigma: f64,
    tau: f64,
    rate: f64,
) -> Result<f64> {
    validate(spot, strike, sigma, tau, rate)?;
    let (d1, d2) = d1_d2(spot, strike, sigma, tau, rate);
    let discounted_strike = strike * (-rate * tau).exp();

    let premium = match option_type {
        OptionType::Call => normal_cdf(d1) * spot - normal_cdf(d2) * discounted_strike,
        OptionType::Put => normal_cdf(-d2) * discounted_strike - normal_cdf(-d1) * spot,
    };
    Ok(premium)
}

/// Analytic vega, `dV/dsigma = K exp(-r tau) phi(d2) sqrt(tau)`, identical for calls and puts.
pub fn vega(spot: f64, strike: f64, sigma: f64, tau: f64, rate: f64) -> Result<f64> {
    validate(spot, strike, sigma, tau, rate)?;
    let (_, d2) = d1_d2(spot, strike, sigma, tau, rate);
    Ok(strike * (-rate * tau).exp() * normal_pdf(d2) * tau.sqrt())
}

/// Prices a validated [`PricingInput`].
pub fn price_input(option_type: OptionType, input: &PricingInput) -> Result<f64> {
    let market = input.market();
    price(
        option_type,
        market.spot(),
        market.strike(),
        input.volatility(),
        market.maturity(),
        market.rate(),
    )
}

/// Vega of a validated [`PricingInput`].
pub fn vega_input(input: &PricingInput) -> Result<f64> {
    let market = input.market();
    vega(
        market.spot(),
        market.strike(),
        input.volatility(),
        market.maturity(),
        market.rate(),
    )
}

/// Model-free `(lower, upper)` premium bounds.
///
/// Calls lie in `[max(S - K exp(-r tau), 0), S]`, puts in
/// `[max(K exp(-r tau) - S, 0), K exp(-r tau)]`. An observed premium outside
/// these bounds has no implied volatility.
pub fn no_arbitrage_bounds(option_type: OptionType, market: &MarketParameters) -> (f64, f64) {
    let spot = market.spot();
    let discounted_strike = market.discounted_strike();
    match option_type {
        OptionType::Call => ((spot - discounted_strike).max(0.0), spot),
        OptionType::Put => ((discounted_strike - spot).max(0.0), discounted_strike),
    }
}
