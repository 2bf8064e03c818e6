mod test_utils;

use approx::assert_abs_diff_eq;
use bs_calc::models::bs::{self, call_price, put_price};
use bs_calc::{
    compare_call_put, norm_cdf, price_option, BlackScholesCalculator, OptionType, PricingError,
    PricingRequest,
};
use statrs::distribution::{ContinuousCDF, Normal};
use test_utils::{both_types, reference_request, request_grid};

/// Normal CDF agrees with statrs to 1e-6 across (-10, 10) and is monotone.
#[test]
fn test_norm_cdf_matches_reference_distribution() {
    let normal = Normal::new(0.0, 1.0).unwrap();
    let mut previous = 0.0;
    for i in -1000..=1000 {
        let x = i as f64 / 100.0;
        let ours = norm_cdf(x);
        assert!(
            (ours - normal.cdf(x)).abs() < 1e-6,
            "norm_cdf({}) = {}, statrs = {}",
            x,
            ours,
            normal.cdf(x)
        );
        assert!(ours >= previous, "norm_cdf not monotone at {}", x);
        assert!((0.0..=1.0).contains(&ours));
        previous = ours;
    }
}

#[test]
fn test_norm_cdf_symmetry_points() {
    assert_eq!(norm_cdf(0.0), 0.5);
    for x in [-3.0, -1.0, 0.0, 1.0, 3.0] {
        assert_abs_diff_eq!(norm_cdf(x) + norm_cdf(-x), 1.0, epsilon = 1e-12);
    }
}

/// S=100, K=100, T=1, r=5%, σ=20% gives the textbook 10.4506 / 5.5735.
#[test]
fn test_reference_values() {
    let req = reference_request();
    assert_abs_diff_eq!(call_price(&req).unwrap(), 10.4506, epsilon = 1e-3);
    assert_abs_diff_eq!(put_price(&req).unwrap(), 5.5735, epsilon = 1e-3);
}

#[test]
fn test_prices_are_non_negative() {
    for req in request_grid() {
        for option_type in both_types() {
            let p = bs::price(&req, option_type).unwrap();
            assert!(p >= 0.0, "{:?} {} priced at {}", req, option_type, p);
            assert!(p.is_finite());
        }
    }
}

/// C - P = S - K·e^(-rT) for every valid request without dividends.
#[test]
fn test_put_call_parity_over_grid() {
    for req in request_grid() {
        let call = call_price(&req).unwrap();
        let put = put_price(&req).unwrap();
        let forward_gap = req.spot - req.strike * (-req.rate * req.time_to_expiry).exp();
        assert!(
            (call - put - forward_gap).abs() < 1e-6,
            "parity violated for {:?}: C-P={}, S-Ke^-rT={}",
            req,
            call - put,
            forward_gap
        );
    }
}

#[test]
fn test_parity_check_reported_by_comparison() {
    let req = PricingRequest::new(150.0, 155.0, 45.0 / 365.0, 0.045, 0.25).unwrap();
    let cmp = compare_call_put(&req).unwrap();
    assert!(cmp.parity_holds(1e-9), "gap = {}", cmp.parity_gap());
    assert_eq!(cmp.call.option_type, OptionType::Call);
    assert_eq!(cmp.put.option_type, OptionType::Put);
}

/// As σ → 0 the call tends to max(S - K·e^(-rT), 0).
#[test]
fn test_vanishing_volatility_limit() {
    for (spot, strike, t, r) in [
        (100.0_f64, 100.0_f64, 1.0_f64, 0.05_f64),
        (90.0, 100.0, 1.0, 0.05),
        (110.0, 100.0, 0.5, 0.02),
        (100.0, 100.0, 2.0, 0.0),
    ] {
        let limit = (spot - strike * (-r * t).exp()).max(0.0);
        let tiny = PricingRequest::new(spot, strike, t, r, 1e-8).unwrap();
        let zero = PricingRequest::new(spot, strike, t, r, 0.0).unwrap();
        assert_abs_diff_eq!(call_price(&tiny).unwrap(), limit, epsilon = 1e-6);
        assert_abs_diff_eq!(call_price(&zero).unwrap(), limit, epsilon = 1e-12);
    }
}

/// As T → 0 prices tend to intrinsic value, and T = 0 is exactly intrinsic.
#[test]
fn test_expiry_limit() {
    for spot in [80.0, 100.0, 120.0] {
        let near = PricingRequest::new(spot, 100.0, 1e-10, 0.05, 0.2).unwrap();
        let at = PricingRequest::new(spot, 100.0, 0.0, 0.05, 0.2).unwrap();
        let call_intrinsic = (spot - 100.0_f64).max(0.0);
        let put_intrinsic = (100.0 - spot).max(0.0);

        assert_abs_diff_eq!(call_price(&near).unwrap(), call_intrinsic, epsilon = 1e-3);
        assert_abs_diff_eq!(put_price(&near).unwrap(), put_intrinsic, epsilon = 1e-3);
        assert_eq!(call_price(&at).unwrap(), call_intrinsic);
        assert_eq!(put_price(&at).unwrap(), put_intrinsic);
    }
}

#[test]
fn test_expired_otm_call_is_exactly_zero() {
    let req = PricingRequest::new(90.0, 100.0, 0.0, 0.05, 0.2).unwrap();
    assert_eq!(bs::price(&req, OptionType::Call).unwrap(), 0.0);
}

#[test]
fn test_invalid_inputs_are_rejected() {
    let base = reference_request();
    let cases = [
        PricingRequest { spot: 0.0, ..base },
        PricingRequest { spot: -1.0, ..base },
        PricingRequest {
            strike: 0.0,
            ..base
        },
        PricingRequest {
            volatility: -0.1,
            ..base
        },
        PricingRequest {
            time_to_expiry: -0.5,
            ..base
        },
        PricingRequest {
            rate: f64::NAN,
            ..base
        },
        PricingRequest {
            spot: f64::INFINITY,
            ..base
        },
    ];
    for req in cases {
        match bs::price(&req, OptionType::Call) {
            Err(PricingError::InvalidInput(msg)) => assert!(!msg.is_empty()),
            other => panic!("expected InvalidInput for {:?}, got {:?}", req, other),
        }
        assert!(price_option(&req, OptionType::Put).is_err());
        assert!(BlackScholesCalculator::new(req, OptionType::Call).is_err());
    }

    assert!(PricingRequest::new(0.0, 100.0, 1.0, 0.05, 0.2).is_err());
}

/// Inputs that pass validation but overflow the closed form are reported,
/// never returned as NaN or silently clamped to zero.
#[test]
fn test_overflowing_inputs_never_yield_silent_prices() {
    let deep_negative_rate = PricingRequest::new(100.0, 100.0, 1.0, -800.0, 0.2).unwrap();
    for option_type in both_types() {
        match price_option(&deep_negative_rate, option_type) {
            Err(PricingError::InvalidInput(msg)) => assert!(msg.contains("not finite")),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    // Extreme but finite volatility still satisfies parity
    let extreme_vol = PricingRequest::new(100.0, 100.0, 1.0, 0.05, 1e160).unwrap();
    let call = call_price(&extreme_vol).unwrap();
    let put = put_price(&extreme_vol).unwrap();
    assert_abs_diff_eq!(call, 100.0, epsilon = 1e-9);
    assert_abs_diff_eq!(
        call - put,
        100.0 - 100.0 * (-0.05_f64).exp(),
        epsilon = 1e-9
    );
}

#[test]
fn test_negative_rate_is_valid() {
    let req = PricingRequest::new(100.0, 100.0, 1.0, -0.01, 0.2).unwrap();
    assert!(call_price(&req).unwrap() > 0.0);
}

#[test]
fn test_delta_bounds_over_grid() {
    for req in request_grid() {
        let call = price_option(&req, OptionType::Call).unwrap();
        let put = price_option(&req, OptionType::Put).unwrap();
        assert!((0.0..=1.0).contains(&call.greeks.delta));
        assert!((-1.0..=0.0).contains(&put.greeks.delta));
        assert!(call.greeks.gamma >= 0.0);
        assert!(call.greeks.vega >= 0.0);
    }
}

#[test]
fn test_time_value_decomposition() {
    let req = PricingRequest::new(45.0, 50.0, 0.25, 0.035, 0.15)
        .unwrap()
        .with_dividend_yield(0.04)
        .unwrap();
    let result = price_option(&req, OptionType::Put).unwrap();
    assert_eq!(result.intrinsic_value, 5.0);
    assert_abs_diff_eq!(
        result.time_value,
        result.price - result.intrinsic_value,
        epsilon = 1e-12
    );
}

#[test]
fn test_option_type_parsing() {
    assert_eq!("CALL".parse::<OptionType>().unwrap(), OptionType::Call);
    assert_eq!(" p ".parse::<OptionType>().unwrap(), OptionType::Put);
    assert!("straddle".parse::<OptionType>().is_err());
}
