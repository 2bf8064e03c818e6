pub mod bs;
pub mod stats;
pub mod types;

/// Common traits used by all pricing models
pub mod traits {
    use crate::error::Result;
    use crate::models::types::{Greeks, OptionType, PricingRequest, PricingResult};
    use crate::models::utils::{intrinsic_value, moneyness};

    /// Closed-form pricing model for European options.
    ///
    /// The analysis layer (sweeps, scenario ladders, call/put comparison) is
    /// generic over this trait, so it never depends on a concrete formula.
    pub trait PricingModel {
        /// Short model name used in logs and chart captions
        fn name(&self) -> &str;

        /// Theoretical price. Implementations must validate the request.
        fn price(&self, request: &PricingRequest, option_type: OptionType) -> Result<f64>;

        /// Sensitivities. Implementations must validate the request.
        fn greeks(&self, request: &PricingRequest, option_type: OptionType) -> Result<Greeks>;

        /// Price, Greeks and payoff decomposition in one result.
        fn evaluate(
            &self,
            request: &PricingRequest,
            option_type: OptionType,
        ) -> Result<PricingResult> {
            let price = self.price(request, option_type)?;
            let greeks = self.greeks(request, option_type)?;
            let intrinsic = intrinsic_value(request.spot, request.strike, option_type);

            Ok(PricingResult {
                option_type,
                request: *request,
                price,
                greeks,
                intrinsic_value: intrinsic,
                time_value: price - intrinsic,
                moneyness: moneyness(request.spot, request.strike, option_type),
            })
        }
    }
}

/// Utility functions for option pricing and calculations
pub mod utils {
    use crate::models::types::{Moneyness, OptionType};

    /// Calculate log-moneyness: ln(K/S)
    pub fn log_moneyness(strike: f64, spot: f64) -> f64 {
        (strike / spot).ln()
    }

    /// Continuous discount factor e^(-rate * t)
    pub fn discount_factor(rate: f64, t: f64) -> f64 {
        (-rate * t).exp()
    }

    /// Payoff of the option if exercised at the given spot
    pub fn intrinsic_value(spot: f64, strike: f64, option_type: OptionType) -> f64 {
        match option_type {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        }
    }

    /// Classify spot against strike for the given option type
    pub fn moneyness(spot: f64, strike: f64, option_type: OptionType) -> Moneyness {
        if spot == strike {
            return Moneyness::AtTheMoney;
        }
        let call_itm = spot > strike;
        match (option_type, call_itm) {
            (OptionType::Call, true) | (OptionType::Put, false) => Moneyness::InTheMoney,
            _ => Moneyness::OutOfTheMoney,
        }
    }
}
