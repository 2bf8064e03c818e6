use super::greeks::{greeks, greeks_unchecked};
use super::{price, price_unchecked};
use crate::error::Result;
use crate::models::types::{Greeks, Moneyness, OptionType, PricingRequest, PricingResult};
use crate::models::utils::{intrinsic_value, moneyness};

/// A validated option ready for repeated evaluation.
///
/// Construction validates the request and checks that the price and Greeks are
/// finite, so the accessors are infallible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholesCalculator {
    request: PricingRequest,
    option_type: OptionType,
}

impl BlackScholesCalculator {
    pub fn new(request: PricingRequest, option_type: OptionType) -> Result<Self> {
        price(&request, option_type)?;
        greeks(&request, option_type)?;
        Ok(Self {
            request,
            option_type,
        })
    }

    pub fn request(&self) -> &PricingRequest {
        &self.request
    }

    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// d1, or `None` at expiry / zero volatility
    pub fn d1(&self) -> Option<f64> {
        super::d1(&self.request)
    }

    /// d2, or `None` at expiry / zero volatility
    pub fn d2(&self) -> Option<f64> {
        super::d2(&self.request)
    }

    pub fn price(&self) -> f64 {
        price_unchecked(&self.request, self.option_type)
    }

    pub fn greeks(&self) -> Greeks {
        greeks_unchecked(&self.request, self.option_type)
    }

    pub fn intrinsic_value(&self) -> f64 {
        intrinsic_value(self.request.spot, self.request.strike, self.option_type)
    }

    pub fn time_value(&self) -> f64 {
        self.price() - self.intrinsic_value()
    }

    pub fn moneyness(&self) -> Moneyness {
        moneyness(self.request.spot, self.request.strike, self.option_type)
    }

    /// Same option with the other payoff type.
    pub fn counterpart(&self) -> Result<Self> {
        let option_type = match self.option_type {
            OptionType::Call => OptionType::Put,
            OptionType::Put => OptionType::Call,
        };
        Self::new(self.request, option_type)
    }

    pub fn evaluate(&self) -> PricingResult {
        let price = self.price();
        let intrinsic = self.intrinsic_value();
        PricingResult {
            option_type: self.option_type,
            request: self.request,
            price,
            greeks: self.greeks(),
            intrinsic_value: intrinsic,
            time_value: price - intrinsic,
            moneyness: self.moneyness(),
        }
    }
}
