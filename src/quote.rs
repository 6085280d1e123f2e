//! Observed option quotes, repricing checks, and batch inversion.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{ensure_positive, IvError, Result};
use crate::market::{MarketParameters, OptionType};
use crate::pricing::{no_arbitrage_bounds, price};
use crate::solver::{solve, VolatilityEstimate};
use crate::solving::SolverOptions;

/// A single observed premium on a European option.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawOptionQuote")]
pub struct OptionQuote {
    option_type: OptionType,
    market: MarketParameters,
    market_price: f64,
}

/// Result of repricing a quote at an estimated volatility.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Verification {
    /// Black-Scholes premium at the estimated sigma.
    pub repriced: f64,
    /// `repriced - market_price`.
    pub residual: f64,
}

impl OptionQuote {
    pub fn new(
        option_type: OptionType,
        market: MarketParameters,
        market_price: f64,
    ) -> Result<Self> {
        Ok(Self {
            option_type,
            market,
            market_price: ensure_positive("market_price", market_price)?,
        })
    }

    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    pub fn market(&self) -> &MarketParameters {
        &self.market
    }

    pub fn market_price(&self) -> f64 {
        self.market_price
    }

    /// Whether the premium lies inside the model-free bounds for this contract.
    pub fn within_arbitrage_bounds(&self) -> bool {
        let (lower, upper) = no_arbitrage_bounds(self.option_type, &self.market);
        self.market_price >= lower && self.market_price <= upper
    }

    /// Runs the Newton-Raphson solver on this quote.
    pub fn implied_volatility(
        &self,
        sigma_initial: f64,
        options: &SolverOptions,
    ) -> Result<VolatilityEstimate> {
        solve(
            self.option_type,
            &self.market,
            sigma_initial,
            self.market_price,
            options,
        )
    }

    /// Reprices the quote at `estimate.sigma`.
    pub fn verify(&self, estimate: &VolatilityEstimate) -> Result<Verification> {
        let repriced = price(
            self.option_type,
            self.market.spot(),
            self.market.strike(),
            estimate.sigma,
            self.market.maturity(),
            self.market.rate(),
        )?;
        Ok(Verification {
            repriced,
            residual: repriced - self.market_price,
        })
    }
}

#[derive(Deserialize)]
struct RawOptionQuote {
    option_type: OptionType,
    market: MarketParameters,
    market_price: f64,
}

impl TryFrom<RawOptionQuote> for OptionQuote {
    type Error = IvError;

    fn try_from(raw: RawOptionQuote) -> Result<Self> {
        Self::new(raw.option_type, raw.market, raw.market_price)
    }
}

/// Solves every quote independently on the rayon pool, preserving input order.
pub fn solve_quotes(
    quotes: &[OptionQuote],
    sigma_initial: f64,
    options: &SolverOptions,
) -> Vec<Result<VolatilityEstimate>> {
    quotes
        .par_iter()
        .map(|quote| quote.implied_volatility(sigma_initial, options))
        .collect()
}
