use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{PricingError, Result};

/// European option payoff type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionType {
    type Err = PricingError;

    /// Accepts `call`, `c`, `put` or `p` in any case.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            other => Err(PricingError::invalid_input(format!(
                "unknown option type '{}', expected call or put",
                other
            ))),
        }
    }
}

/// Market inputs for a single Black-Scholes evaluation.
///
/// Fields are public so callers can build requests incrementally (sweeps mutate
/// one field at a time); every pricing entry point re-validates through
/// [`PricingRequest::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingRequest {
    /// Spot price of the underlying (S)
    pub spot: f64,
    /// Strike price (K)
    pub strike: f64,
    /// Time to expiry in years (T)
    pub time_to_expiry: f64,
    /// Continuously compounded risk-free rate (r), as decimal
    pub rate: f64,
    /// Annualised volatility (σ), as decimal
    pub volatility: f64,
    /// Continuous dividend yield (q), as decimal
    #[serde(default)]
    pub dividend_yield: f64,
}

impl PricingRequest {
    /// Create a validated request with zero dividend yield.
    pub fn new(
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        rate: f64,
        volatility: f64,
    ) -> Result<Self> {
        let request = Self {
            spot,
            strike,
            time_to_expiry,
            rate,
            volatility,
            dividend_yield: 0.0,
        };
        request.validate()?;
        Ok(request)
    }

    /// Return a copy with the given dividend yield, re-validated.
    pub fn with_dividend_yield(mut self, dividend_yield: f64) -> Result<Self> {
        self.dividend_yield = dividend_yield;
        self.validate()?;
        Ok(self)
    }

    /// Check the request lies inside the model's domain.
    ///
    /// Rejects S <= 0, K <= 0, σ < 0, T < 0 and any non-finite field. T = 0 and
    /// σ = 0 are accepted; they are priced as limits of the closed form.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("spot", self.spot),
            ("strike", self.strike),
            ("time_to_expiry", self.time_to_expiry),
            ("rate", self.rate),
            ("volatility", self.volatility),
            ("dividend_yield", self.dividend_yield),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(PricingError::invalid_input(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }

        if self.spot <= 0.0 {
            return Err(PricingError::invalid_input(format!(
                "spot price must be positive, got {}",
                self.spot
            )));
        }
        if self.strike <= 0.0 {
            return Err(PricingError::invalid_input(format!(
                "strike price must be positive, got {}",
                self.strike
            )));
        }
        if self.volatility < 0.0 {
            return Err(PricingError::invalid_input(format!(
                "volatility must be non-negative, got {}",
                self.volatility
            )));
        }
        if self.time_to_expiry < 0.0 {
            return Err(PricingError::invalid_input(format!(
                "time to expiry must be non-negative, got {}",
                self.time_to_expiry
            )));
        }
        Ok(())
    }
}

/// Option sensitivities.
///
/// Delta and gamma are raw derivatives. Theta is per calendar day, vega per one
/// volatility point and rho per one rate point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    pub delta: f64,
    pub gamma: f64,
    pub theta: f64,
    pub vega: f64,
    pub rho: f64,
}

/// Position of spot relative to strike from the holder's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Moneyness {
    InTheMoney,
    AtTheMoney,
    OutOfTheMoney,
}

impl fmt::Display for Moneyness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Moneyness::InTheMoney => "in-the-money",
            Moneyness::AtTheMoney => "at-the-money",
            Moneyness::OutOfTheMoney => "out-of-the-money",
        };
        f.write_str(label)
    }
}

/// Full evaluation of one option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    pub option_type: OptionType,
    pub request: PricingRequest,
    /// Theoretical price
    pub price: f64,
    pub greeks: Greeks,
    /// Payoff if exercised now
    pub intrinsic_value: f64,
    /// Price minus intrinsic value
    pub time_value: f64,
    pub moneyness: Moneyness,
}

/// Quantity that can be read off a [`PricingResult`], used to pick the series
/// for tables and charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Price,
    Delta,
    Gamma,
    Theta,
    Vega,
    Rho,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Price,
        Metric::Delta,
        Metric::Gamma,
        Metric::Theta,
        Metric::Vega,
        Metric::Rho,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Price => "price",
            Metric::Delta => "delta",
            Metric::Gamma => "gamma",
            Metric::Theta => "theta",
            Metric::Vega => "vega",
            Metric::Rho => "rho",
        }
    }

    /// Axis label including the unit convention.
    pub fn axis_label(&self) -> &'static str {
        match self {
            Metric::Price => "Option price",
            Metric::Delta => "Delta",
            Metric::Gamma => "Gamma",
            Metric::Theta => "Theta (per day)",
            Metric::Vega => "Vega (per vol point)",
            Metric::Rho => "Rho (per rate point)",
        }
    }

    pub fn value_of(&self, result: &PricingResult) -> f64 {
        match self {
            Metric::Price => result.price,
            Metric::Delta => result.greeks.delta,
            Metric::Gamma => result.greeks.gamma,
            Metric::Theta => result.greeks.theta,
            Metric::Vega => result.greeks.vega,
            Metric::Rho => result.greeks.rho,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Metric::ALL
            .into_iter()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| {
                PricingError::invalid_input(format!(
                    "unknown metric '{}', expected one of price, delta, gamma, theta, vega, rho",
                    s
                ))
            })
    }
}
