use approx::assert_relative_eq;
use bsiv::{
    price, solve, solve_quotes, vega, IvError, MarketParameters, OptionQuote, OptionType,
    SolverOptions,
};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const BOTH: [OptionType; 2] = [OptionType::Call, OptionType::Put];

/// Out-of-the-money call: strike 120 on spot 100, quoted at 2.0.
#[test]
fn otm_call_converges_and_reprices() {
    let market = MarketParameters::new(100.0, 120.0, 0.05, 1.0).unwrap();
    let option_type: OptionType = "c".parse().unwrap();
    let estimate = solve(option_type, &market, 0.25, 2.0, &SolverOptions::default()).unwrap();

    assert!(estimate.converged);
    assert!(estimate.iterations < 10);
    assert_eq!(estimate.iterations, 6);
    assert_relative_eq!(estimate.sigma, 0.161_482_728_841_394, epsilon = 1e-12);

    let repriced = price(option_type, 100.0, 120.0, estimate.sigma, 1.0, 0.05).unwrap();
    assert_relative_eq!(repriced, 2.0, epsilon = 1e-7);
}

#[test]
fn premium_is_strictly_increasing_in_volatility() {
    for (spot, strike, rate, tau) in [(100.0, 100.0, 0.05, 1.0), (100.0, 120.0, 0.05, 1.0)] {
        for option_type in BOTH {
            let mut previous = f64::NEG_INFINITY;
            for step in 1..=300 {
                let sigma = step as f64 * 0.01;
                let premium = price(option_type, spot, strike, sigma, tau, rate).unwrap();
                assert!(
                    premium > previous,
                    "{option_type} K={strike} not increasing at sigma {sigma}"
                );
                previous = premium;
            }
        }
    }
}

#[test]
fn vega_is_positive_on_sampled_inputs() {
    let mut rng = SmallRng::seed_from_u64(7);
    for _ in 0..2_000 {
        let spot = rng.gen_range(80.0..125.0);
        let strike = rng.gen_range(80.0..125.0);
        let sigma = rng.gen_range(0.1..1.0);
        let tau = rng.gen_range(0.25..2.0);
        let rate = rng.gen_range(-0.02..0.08);
        let value = vega(spot, strike, sigma, tau, rate).unwrap();
        assert!(value > 0.0, "vega {value} at S={spot} K={strike} sigma={sigma}");
    }
}

#[test]
fn premiums_respect_model_free_bounds() {
    let mut rng = SmallRng::seed_from_u64(11);
    for _ in 0..1_000 {
        let market = MarketParameters::new(
            rng.gen_range(50.0..150.0),
            rng.gen_range(50.0..150.0),
            rng.gen_range(0.0..0.1),
            rng.gen_range(0.1..3.0),
        )
        .unwrap();
        let sigma = rng.gen_range(0.05..1.5);
        for option_type in BOTH {
            let premium = price(
                option_type,
                market.spot(),
                market.strike(),
                sigma,
                market.maturity(),
                market.rate(),
            )
            .unwrap();
            let (lower, upper) = bsiv::no_arbitrage_bounds(option_type, &market);
            assert!(premium >= lower - 1e-9 && premium <= upper + 1e-9);
        }
    }
}

/// Prices at a known sigma, then recovers it starting from 0.2.
#[test]
fn round_trip_recovers_volatility() {
    let markets = [
        (100.0, 100.0, 0.05, 1.0),
        (100.0, 105.0, 0.03, 0.5),
        (100.0, 95.0, 0.01, 2.0),
        (50.0, 52.0, 0.0, 1.5),
    ];
    let options = SolverOptions::default();
    for (spot, strike, rate, tau) in markets {
        let market = MarketParameters::new(spot, strike, rate, tau).unwrap();
        for option_type in BOTH {
            for step in 1..=40 {
                let sigma = step as f64 * 0.05;
                let target = price(option_type, spot, strike, sigma, tau, rate).unwrap();
                let estimate = solve(option_type, &market, 0.2, target, &options).unwrap();
                assert!(estimate.converged, "{option_type} K={strike} sigma={sigma}");
                assert_relative_eq!(estimate.sigma, sigma, epsilon = 1e-6);

                let repriced = price(option_type, spot, strike, estimate.sigma, tau, rate).unwrap();
                assert!((repriced - target).abs() <= options.tolerance);
            }
        }
    }
}

#[test]
fn zero_volatility_is_invalid_input() {
    assert!(matches!(
        price(OptionType::Call, 100.0, 100.0, 0.0, 1.0, 0.05),
        Err(IvError::InvalidInput { parameter: "volatility", .. })
    ));

    let market = MarketParameters::new(100.0, 100.0, 0.05, 1.0).unwrap();
    let err = solve(OptionType::Call, &market, 0.0, 10.0, &SolverOptions::default()).unwrap_err();
    assert_eq!(err, IvError::invalid_input("volatility", 0.0));
}

/// A premium below intrinsic drives sigma negative after one step.
#[test]
fn out_of_bounds_premium_fails_instead_of_looping() {
    let market = MarketParameters::new(100.0, 120.0, 0.05, 1.0).unwrap();
    let quote = OptionQuote::new(OptionType::Put, market, 0.5).unwrap();
    assert!(!quote.within_arbitrage_bounds());

    let err = quote
        .implied_volatility(0.25, &SolverOptions::default())
        .unwrap_err();
    assert!(matches!(
        err,
        IvError::InvalidInput { parameter: "volatility", value } if value < 0.0
    ));
}

#[test]
fn parallel_batch_matches_sequential_solves() {
    let mut rng = SmallRng::seed_from_u64(3);
    let options = SolverOptions::default();
    let quotes: Vec<OptionQuote> = (0..64)
        .map(|i| {
            let option_type = if i % 2 == 0 { OptionType::Call } else { OptionType::Put };
            let market = MarketParameters::new(100.0, rng.gen_range(95.0..105.0), 0.02, 1.0)
                .unwrap();
            let premium = price(
                option_type,
                market.spot(),
                market.strike(),
                rng.gen_range(0.15..0.6),
                market.maturity(),
                market.rate(),
            )
            .unwrap();
            OptionQuote::new(option_type, market, premium).unwrap()
        })
        .collect();

    let batch = solve_quotes(&quotes, 0.2, &options);
    for (quote, result) in quotes.iter().zip(batch) {
        let sequential = quote.implied_volatility(0.2, &options).unwrap();
        assert_eq!(result.unwrap(), sequential);
    }
}
