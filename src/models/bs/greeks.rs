use super::{d1_d2, ensure_finite, Terms, DAYS_PER_YEAR, PERCENT};
use crate::error::Result;
use crate::models::stats::{norm_cdf, norm_pdf};
use crate::models::types::{Greeks, OptionType, PricingRequest};

/// Black-Scholes Greeks for a European option.
///
/// Theta is returned per calendar day, vega per volatility point and rho per
/// rate point. At expiry delta is the payoff step (1 / -1 when in the money,
/// 0 otherwise) and every other Greek is zero.
pub fn greeks(request: &PricingRequest, option_type: OptionType) -> Result<Greeks> {
    request.validate()?;
    let g = greeks_unchecked(request, option_type);
    for (name, value) in [
        ("delta", g.delta),
        ("gamma", g.gamma),
        ("theta", g.theta),
        ("vega", g.vega),
        ("rho", g.rho),
    ] {
        ensure_finite(value, name, request)?;
    }
    Ok(g)
}

pub(crate) fn greeks_unchecked(request: &PricingRequest, option_type: OptionType) -> Greeks {
    let s = request.spot;
    let k = request.strike;

    if request.time_to_expiry == 0.0 {
        let delta = match option_type {
            OptionType::Call if s > k => 1.0,
            OptionType::Put if s < k => -1.0,
            _ => 0.0,
        };
        return Greeks {
            delta,
            ..Greeks::default()
        };
    }

    let terms = Terms::new(request);
    if terms.is_deterministic() {
        return deterministic_greeks(request, option_type, &terms);
    }

    let r = request.rate;
    let q = request.dividend_yield;
    let sqrt_t = terms.t.sqrt();
    let fwd_spot = s * terms.df_q;
    let pv_strike = k * terms.df_r;

    let (d1, d2) = d1_d2(request, &terms);
    let pdf_d1 = norm_pdf(d1);

    let gamma = terms.df_q * pdf_d1 / (s * terms.vol_sqrt_t);
    let vega = fwd_spot * pdf_d1 * sqrt_t / PERCENT;
    let decay = -fwd_spot * pdf_d1 * request.volatility / (2.0 * sqrt_t);

    let (delta, theta, rho) = match option_type {
        OptionType::Call => {
            let delta = terms.df_q * norm_cdf(d1);
            let theta = decay + q * fwd_spot * norm_cdf(d1) - r * pv_strike * norm_cdf(d2);
            let rho = k * terms.t * terms.df_r * norm_cdf(d2);
            (delta, theta, rho)
        }
        OptionType::Put => {
            let delta = -terms.df_q * norm_cdf(-d1);
            let theta = decay - q * fwd_spot * norm_cdf(-d1) + r * pv_strike * norm_cdf(-d2);
            let rho = -k * terms.t * terms.df_r * norm_cdf(-d2);
            (delta, theta, rho)
        }
    };

    Greeks {
        delta,
        gamma,
        theta: theta / DAYS_PER_YEAR,
        vega,
        rho: rho / PERCENT,
    }
}

// σ√T = 0: the price is max(±(S·e^(-qT) - K·e^(-rT)), 0), so only the
// discounting terms survive.
fn deterministic_greeks(
    request: &PricingRequest,
    option_type: OptionType,
    terms: &Terms,
) -> Greeks {
    let fwd_spot = request.spot * terms.df_q;
    let pv_strike = request.strike * terms.df_r;
    let r = request.rate;
    let q = request.dividend_yield;

    let in_the_money = match option_type {
        OptionType::Call => fwd_spot > pv_strike,
        OptionType::Put => pv_strike > fwd_spot,
    };
    if !in_the_money {
        return Greeks::default();
    }

    let sign = match option_type {
        OptionType::Call => 1.0,
        OptionType::Put => -1.0,
    };

    Greeks {
        delta: sign * terms.df_q,
        gamma: 0.0,
        theta: sign * (q * fwd_spot - r * pv_strike) / DAYS_PER_YEAR,
        vega: 0.0,
        rho: sign * request.strike * terms.t * terms.df_r / PERCENT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::bs::price_unchecked;
    use approx::assert_relative_eq;

    fn request(spot: f64, vol: f64, t: f64) -> PricingRequest {
        PricingRequest::new(spot, 100.0, t, 0.05, vol).unwrap()
    }

    #[test]
    fn test_atm_reference_greeks() {
        let g = greeks(&request(100.0, 0.2, 1.0), OptionType::Call).unwrap();
        // Textbook values for S=K=100, T=1, r=5%, σ=20%
        assert_relative_eq!(g.delta, 0.636_830_7, epsilon = 1e-6);
        assert_relative_eq!(g.gamma, 0.018_762_0, epsilon = 1e-6);
        assert_relative_eq!(g.vega, 0.375_240_1, epsilon = 1e-6);
        assert_relative_eq!(g.theta * DAYS_PER_YEAR, -6.414_028, epsilon = 1e-5);
        assert_relative_eq!(g.rho * 100.0, 53.232_482, epsilon = 1e-5);
    }

    #[test]
    fn test_dividend_put_reference_greeks() {
        let req = PricingRequest::new(100.0, 95.0, 0.5, 0.04, 0.25)
            .unwrap()
            .with_dividend_yield(0.02)
            .unwrap();
        let g = greeks(&req, OptionType::Put).unwrap();
        assert_relative_eq!(
            price_unchecked(&req, OptionType::Put),
            4.224_240,
            epsilon = 1e-6
        );
        assert_relative_eq!(g.delta, -0.328_438_4, epsilon = 1e-6);
        assert_relative_eq!(g.gamma, 0.020_325_0, epsilon = 1e-6);
        assert_relative_eq!(g.vega * PERCENT, 25.406_252, epsilon = 1e-5);
        assert_relative_eq!(g.theta * DAYS_PER_YEAR, -5.525_717, epsilon = 1e-5);
        assert_relative_eq!(g.rho * PERCENT, -18.534_040, epsilon = 1e-5);
    }

    #[test]
    fn test_overflowing_discount_greeks_are_rejected() {
        let req = PricingRequest::new(100.0, 100.0, 1.0, -800.0, 0.2).unwrap();
        for option_type in [OptionType::Call, OptionType::Put] {
            assert!(greeks(&req, option_type).unwrap_err().is_invalid_input());
        }
    }

    #[test]
    fn test_delta_matches_finite_difference() {
        let h = 1e-4;
        for option_type in [OptionType::Call, OptionType::Put] {
            let up = price_unchecked(&request(100.0 + h, 0.25, 0.5), option_type);
            let down = price_unchecked(&request(100.0 - h, 0.25, 0.5), option_type);
            let g = greeks_unchecked(&request(100.0, 0.25, 0.5), option_type);
            assert_relative_eq!(g.delta, (up - down) / (2.0 * h), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_vega_matches_finite_difference() {
        let h = 1e-5;
        let up = price_unchecked(&request(105.0, 0.3 + h, 0.75), OptionType::Put);
        let down = price_unchecked(&request(105.0, 0.3 - h, 0.75), OptionType::Put);
        let g = greeks_unchecked(&request(105.0, 0.3, 0.75), OptionType::Put);
        assert_relative_eq!(g.vega * PERCENT, (up - down) / (2.0 * h), epsilon = 1e-5);
    }

    #[test]
    fn test_gamma_and_vega_equal_for_call_and_put() {
        let req = request(93.0, 0.35, 0.4);
        let call = greeks_unchecked(&req, OptionType::Call);
        let put = greeks_unchecked(&req, OptionType::Put);
        assert_relative_eq!(call.gamma, put.gamma, epsilon = 1e-12);
        assert_relative_eq!(call.vega, put.vega, epsilon = 1e-12);
        // delta parity without dividends: Δc - Δp = 1
        assert_relative_eq!(call.delta - put.delta, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_expiry_greeks() {
        let itm_call = greeks_unchecked(&request(110.0, 0.2, 0.0), OptionType::Call);
        assert_eq!(itm_call.delta, 1.0);
        assert_eq!(itm_call.gamma, 0.0);
        assert_eq!(itm_call.theta, 0.0);

        let otm_put = greeks_unchecked(&request(110.0, 0.2, 0.0), OptionType::Put);
        assert_eq!(otm_put, Greeks::default());

        let itm_put = greeks_unchecked(&request(90.0, 0.2, 0.0), OptionType::Put);
        assert_eq!(itm_put.delta, -1.0);
    }

    #[test]
    fn test_zero_vol_greeks() {
        let g = greeks_unchecked(&request(100.0, 0.0, 1.0), OptionType::Call);
        assert_eq!(g.delta, 1.0);
        assert_eq!(g.gamma, 0.0);
        assert_eq!(g.vega, 0.0);
        let pv_strike = 100.0 * (-0.05_f64).exp();
        assert_relative_eq!(g.theta, -0.05 * pv_strike / DAYS_PER_YEAR, epsilon = 1e-12);
        assert_relative_eq!(g.rho, pv_strike / PERCENT, epsilon = 1e-12);

        let put = greeks_unchecked(&request(100.0, 0.0, 1.0), OptionType::Put);
        assert_eq!(put, Greeks::default());
    }
}
