//! Black-Scholes implied volatility recovery.
//!
//! Given an observed European option premium together with spot, strike,
//! rate and maturity, this crate finds the volatility that reproduces the
//! premium under the closed-form Black-Scholes model. It offers tools to
//!
//! - validate market inputs and option-type tokens (`market` module),
//! - price calls and puts and evaluate vega (`pricing` module),
//! - configure the Newton-Raphson iteration (`solving` module),
//! - invert price into volatility (`solver` module), and
//! - verify and batch-solve observed quotes (`quote` module).
//!
//! Every function is pure and synchronous; each solve owns its own loop
//! state, so independent solves can run concurrently without locking.
//!
//! # Quick start
//!
//! ```
//! use bsiv::{price, solve, MarketParameters, OptionType, SolverOptions};
//!
//! let market = MarketParameters::new(100.0, 120.0, 0.05, 1.0)?;
//! let option_type: OptionType = "c".parse()?;
//!
//! let estimate = solve(option_type, &market, 0.25, 2.0, &SolverOptions::default())?;
//! assert!(estimate.converged);
//!
//! let repriced = price(option_type, 100.0, 120.0, estimate.sigma, 1.0, 0.05)?;
//! assert!((repriced - 2.0).abs() < 1e-7);
//! # Ok::<(), bsiv::IvError>(())
//! ```
//!
//! The solver does not clamp volatility by default. A premium outside the
//! no-arbitrage bounds can push sigma negative, which surfaces as
//! [`IvError::InvalidInput`]; see [`SolverOptions::volatility_floor`].

pub mod error;
pub mod market;
pub mod pricing;
pub mod quote;
pub mod solver;
pub mod solving;

pub use error::{IvError, Result};
pub use market::{MarketParameters, OptionType, PricingInput};
pub use pricing::{no_arbitrage_bounds, price, vega};
pub use quote::{solve_quotes, OptionQuote, Verification};
pub use solver::{solve, ImpliedVolatilitySolver, VolatilityEstimate};
pub use solving::SolverOptions;
