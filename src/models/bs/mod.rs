//! Black-Scholes-Merton pricing of European options with a continuous
//! dividend yield.
//!
//! Two limits of the closed form are handled explicitly instead of dividing by
//! zero:
//!
//! - `T = 0`: the option is worth its intrinsic value `max(S - K, 0)` /
//!   `max(K - S, 0)`.
//! - `σ√T = 0` with `T > 0`: the underlying is deterministic, so the option is
//!   worth its discounted forward intrinsic value
//!   `max(S·e^(-qT) - K·e^(-rT), 0)` (and the mirror for puts).

mod calculator;
mod greeks;

pub use calculator::BlackScholesCalculator;
pub use greeks::greeks;

use crate::error::{PricingError, Result};
use crate::models::stats::norm_cdf;
use crate::models::traits::PricingModel;
use crate::models::types::{Greeks, OptionType, PricingRequest};
use crate::models::utils::{discount_factor, intrinsic_value, log_moneyness};

/// Calendar days per year, used to express theta per day.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Vega and rho are quoted per percentage point of volatility / rate.
pub(crate) const PERCENT: f64 = 100.0;

/// The Black-Scholes model as a [`PricingModel`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BlackScholes;

impl PricingModel for BlackScholes {
    fn name(&self) -> &str {
        "black-scholes"
    }

    fn price(&self, request: &PricingRequest, option_type: OptionType) -> Result<f64> {
        price(request, option_type)
    }

    fn greeks(&self, request: &PricingRequest, option_type: OptionType) -> Result<Greeks> {
        greeks(request, option_type)
    }
}

/// Intermediate quantities shared by the price and Greek formulas.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Terms {
    pub t: f64,
    /// e^(-qT)
    pub df_q: f64,
    /// e^(-rT)
    pub df_r: f64,
    /// σ√T
    pub vol_sqrt_t: f64,
}

impl Terms {
    pub fn new(request: &PricingRequest) -> Self {
        let t = request.time_to_expiry;
        Self {
            t,
            df_q: discount_factor(request.dividend_yield, t),
            df_r: discount_factor(request.rate, t),
            vol_sqrt_t: request.volatility * t.sqrt(),
        }
    }

    /// True when the formula has no diffusion term (σ√T underflows to zero).
    pub fn is_deterministic(&self) -> bool {
        self.vol_sqrt_t <= 0.0
    }
}

/// d1 = [ln(S/K) + (r - q + σ²/2)T] / (σ√T).
///
/// Returns `None` when `σ√T = 0`, where d1 is undefined.
pub fn d1(request: &PricingRequest) -> Option<f64> {
    let terms = Terms::new(request);
    if terms.is_deterministic() {
        return None;
    }
    Some(d1_d2(request, &terms).0)
}

/// d2 = d1 - σ√T. Returns `None` when `σ√T = 0`.
pub fn d2(request: &PricingRequest) -> Option<f64> {
    let terms = Terms::new(request);
    if terms.is_deterministic() {
        return None;
    }
    Some(d1_d2(request, &terms).1)
}

// ln(S/K)/(σ√T) + (r - q)√T/σ ± σ√T/2, with σ² never formed.
pub(crate) fn d1_d2(request: &PricingRequest, terms: &Terms) -> (f64, f64) {
    let moneyness = -log_moneyness(request.strike, request.spot) / terms.vol_sqrt_t;
    let drift = (request.rate - request.dividend_yield) * terms.t.sqrt() / request.volatility;
    let half_var = 0.5 * terms.vol_sqrt_t;
    (moneyness + drift + half_var, moneyness + drift - half_var)
}

// Inputs that pass validation can still overflow the discount factors
// (e.g. r = -800); report that instead of returning a NaN or infinite value.
pub(crate) fn ensure_finite(value: f64, what: &str, request: &PricingRequest) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PricingError::invalid_input(format!(
            "{} is not finite for S={}, K={}, T={}, r={}, q={}, sigma={}",
            what,
            request.spot,
            request.strike,
            request.time_to_expiry,
            request.rate,
            request.dividend_yield,
            request.volatility
        )))
    }
}

/// Theoretical price of a European option.
///
/// # Errors
///
/// [`PricingError::InvalidInput`] when the request fails
/// [`PricingRequest::validate`] or the inputs overflow the closed form.
pub fn price(request: &PricingRequest, option_type: OptionType) -> Result<f64> {
    request.validate()?;
    ensure_finite(price_unchecked(request, option_type), "price", request)
}

/// Price of a European call.
pub fn call_price(request: &PricingRequest) -> Result<f64> {
    price(request, OptionType::Call)
}

/// Price of a European put.
pub fn put_price(request: &PricingRequest) -> Result<f64> {
    price(request, OptionType::Put)
}

pub(crate) fn price_unchecked(request: &PricingRequest, option_type: OptionType) -> f64 {
    if request.time_to_expiry == 0.0 {
        return intrinsic_value(request.spot, request.strike, option_type);
    }

    let terms = Terms::new(request);
    let fwd_spot = request.spot * terms.df_q;
    let pv_strike = request.strike * terms.df_r;

    if terms.is_deterministic() {
        return floor_at_zero(match option_type {
            OptionType::Call => fwd_spot - pv_strike,
            OptionType::Put => pv_strike - fwd_spot,
        });
    }

    let (d1, d2) = d1_d2(request, &terms);

    let value = match option_type {
        OptionType::Call => fwd_spot * norm_cdf(d1) - pv_strike * norm_cdf(d2),
        OptionType::Put => pv_strike * norm_cdf(-d2) - fwd_spot * norm_cdf(-d1),
    };

    // Cancellation in deep OTM wings can leave a tiny negative residue
    floor_at_zero(value)
}

// `f64::max` would turn NaN into 0; non-finite values pass through for `price`
// to reject.
fn floor_at_zero(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn atm_request() -> PricingRequest {
        PricingRequest::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap()
    }

    #[test]
    fn test_reference_prices() {
        let req = atm_request();
        assert_relative_eq!(call_price(&req).unwrap(), 10.4506, epsilon = 1e-3);
        assert_relative_eq!(put_price(&req).unwrap(), 5.5735, epsilon = 1e-3);
    }

    #[test]
    fn test_d1_d2() {
        let req = atm_request();
        // (0 + 0.07) / 0.2 = 0.35
        assert_relative_eq!(d1(&req).unwrap(), 0.35, epsilon = 1e-12);
        assert_relative_eq!(d2(&req).unwrap(), 0.15, epsilon = 1e-12);
    }

    #[test]
    fn test_d1_undefined_without_diffusion() {
        let mut req = atm_request();
        req.volatility = 0.0;
        assert!(d1(&req).is_none());
        req.volatility = 0.2;
        req.time_to_expiry = 0.0;
        assert!(d2(&req).is_none());
    }

    #[test]
    fn test_expiry_is_intrinsic() {
        let req = PricingRequest::new(90.0, 100.0, 0.0, 0.05, 0.2).unwrap();
        assert_eq!(call_price(&req).unwrap(), 0.0);
        assert_eq!(put_price(&req).unwrap(), 10.0);
    }

    #[test]
    fn test_zero_vol_is_discounted_forward_intrinsic() {
        let req = PricingRequest::new(100.0, 100.0, 1.0, 0.05, 0.0).unwrap();
        let expected = 100.0 - 100.0 * (-0.05_f64).exp();
        assert_relative_eq!(call_price(&req).unwrap(), expected, epsilon = 1e-12);
        assert_eq!(put_price(&req).unwrap(), 0.0);
    }

    #[test]
    fn test_rejects_invalid_spot() {
        let req = PricingRequest {
            spot: 0.0,
            ..atm_request()
        };
        let err = price(&req, OptionType::Call).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_huge_volatility_tends_to_forward() {
        // σ² would overflow here; the call is worth the dividend-discounted spot
        let req = PricingRequest::new(100.0, 100.0, 1.0, 0.05, 1e160).unwrap();
        assert_relative_eq!(call_price(&req).unwrap(), 100.0, epsilon = 1e-9);
        assert_relative_eq!(
            put_price(&req).unwrap(),
            100.0 * (-0.05_f64).exp(),
            epsilon = 1e-9
        );
        let (d1, d2) = (d1(&req).unwrap(), d2(&req).unwrap());
        assert!(d1 > 0.0 && d2 < 0.0);
    }

    #[test]
    fn test_overflowing_discount_is_an_error() {
        let req = PricingRequest::new(100.0, 100.0, 1.0, -800.0, 0.2).unwrap();
        assert!(call_price(&req).unwrap_err().is_invalid_input());
        assert!(put_price(&req).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_zero_vol_overflow_is_an_error() {
        // e^(-rT) and e^(-qT) both overflow, leaving inf - inf
        let req = PricingRequest::new(100.0, 100.0, 1.0, -800.0, 0.0)
            .unwrap()
            .with_dividend_yield(-800.0)
            .unwrap();
        assert!(call_price(&req).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_dividend_lowers_call() {
        let base = atm_request();
        let with_div = base.with_dividend_yield(0.03).unwrap();
        assert!(call_price(&with_div).unwrap() < call_price(&base).unwrap());
        assert!(put_price(&with_div).unwrap() > put_price(&base).unwrap());
    }
}
