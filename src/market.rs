//! Market-observable inputs and their validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ensure_positive, IvError, Result};

/// European option payoff direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// `+1.0` for calls, `-1.0` for puts.
    pub fn sign(self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }
}

impl FromStr for OptionType {
    type Err = IvError;

    /// Maps the raw tokens accepted at the input boundary (`c`/`1`, `p`/`-1`).
    fn from_str(token: &str) -> Result<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "c" | "call" | "1" => Ok(OptionType::Call),
            "p" | "put" | "-1" => Ok(OptionType::Put),
            _ => Err(IvError::UnknownOptionType {
                token: token.to_string(),
            }),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => f.write_str("Call"),
            OptionType::Put => f.write_str("Put"),
        }
    }
}

/// Spot, strike, rate and maturity shared by every pricing call on one contract.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMarketParameters")]
pub struct MarketParameters {
    spot: f64,
    strike: f64,
    rate: f64,
    maturity: f64,
}

impl MarketParameters {
    /// Validates `spot > 0`, `strike > 0`, `maturity > 0` and a finite `rate`.
    pub fn new(spot: f64, strike: f64, rate: f64, maturity: f64) -> Result<Self> {
        Ok(Self {
            spot: ensure_positive("spot", spot)?,
            strike: ensure_positive("strike", strike)?,
            rate: ensure_finite("rate", rate)?,
            maturity: ensure_positive("maturity", maturity)?,
        })
    }

    /// Current price of the underlying (`S`).
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Strike price (`K`).
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Continuously compounded risk-free rate (`r`).
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Time to maturity in years (`tau`).
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// `exp(-r * tau)`.
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }

    /// Strike discounted to today.
    pub fn discounted_strike(&self) -> f64 {
        self.strike * self.discount_factor()
    }
}

/// Unvalidated wire form; deserialization goes through [`MarketParameters::new`].
#[derive(Deserialize)]
struct RawMarketParameters {
    spot: f64,
    strike: f64,
    rate: f64,
    maturity: f64,
}

impl TryFrom<RawMarketParameters> for MarketParameters {
    type Error = IvError;

    fn try_from(raw: RawMarketParameters) -> Result<Self> {
        Self::new(raw.spot, raw.strike, raw.rate, raw.maturity)
    }
}

/// Market parameters paired with a candidate volatility.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPricingInput")]
pub struct PricingInput {
    market: MarketParameters,
    volatility: f64,
}

impl PricingInput {
    /// Validates `volatility > 0`; `market` is already validated by construction.
    pub fn new(market: MarketParameters, volatility: f64) -> Result<Self> {
        Ok(Self {
            market,
            volatility: ensure_positive("volatility", volatility)?,
        })
    }

    pub fn market(&self) -> &MarketParameters {
        &self.market
    }

    pub fn volatility(&self) -> f64 {
        self.volatility
    }
}

#[derive(Deserialize)]
struct RawPricingInput {
    market: MarketParameters,
    volatility: f64,
}

impl TryFrom<RawPricingInput> for PricingInput {
    type Error = IvError;

    fn try_from(raw: RawPricingInput) -> Result<Self> {
        Self::new(raw.market, raw.volatility)
    }
}
