use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::{PricingError, Result};
use crate::models::traits::PricingModel;
use crate::models::types::{OptionType, PricingRequest, PricingResult};

/// Input that a sweep varies while holding the others fixed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SweepParameter {
    Spot,
    Strike,
    Volatility,
    Time,
    Rate,
}

impl SweepParameter {
    pub fn as_str(&self) -> &'static str {
        match self {
            SweepParameter::Spot => "spot",
            SweepParameter::Strike => "strike",
            SweepParameter::Volatility => "vol",
            SweepParameter::Time => "time",
            SweepParameter::Rate => "rate",
        }
    }

    /// Axis label for charts and table headers
    pub fn axis_label(&self) -> &'static str {
        match self {
            SweepParameter::Spot => "Spot price",
            SweepParameter::Strike => "Strike price",
            SweepParameter::Volatility => "Volatility",
            SweepParameter::Time => "Time to expiry (years)",
            SweepParameter::Rate => "Risk-free rate",
        }
    }

    /// Current value of this parameter in `request`
    pub fn value_in(&self, request: &PricingRequest) -> f64 {
        match self {
            SweepParameter::Spot => request.spot,
            SweepParameter::Strike => request.strike,
            SweepParameter::Volatility => request.volatility,
            SweepParameter::Time => request.time_to_expiry,
            SweepParameter::Rate => request.rate,
        }
    }

    /// Copy of `request` with this parameter replaced by `value`
    pub fn apply(&self, request: &PricingRequest, value: f64) -> PricingRequest {
        let mut out = *request;
        match self {
            SweepParameter::Spot => out.spot = value,
            SweepParameter::Strike => out.strike = value,
            SweepParameter::Volatility => out.volatility = value,
            SweepParameter::Time => out.time_to_expiry = value,
            SweepParameter::Rate => out.rate = value,
        }
        out
    }
}

impl fmt::Display for SweepParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SweepParameter {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "spot" | "s" => Ok(SweepParameter::Spot),
            "strike" | "k" => Ok(SweepParameter::Strike),
            "vol" | "volatility" | "sigma" => Ok(SweepParameter::Volatility),
            "time" | "t" | "expiry" => Ok(SweepParameter::Time),
            "rate" | "r" => Ok(SweepParameter::Rate),
            other => Err(PricingError::InvalidSweep(format!(
                "unknown sweep parameter '{}', expected spot, strike, vol, time or rate",
                other
            ))),
        }
    }
}

/// Range of a single-parameter sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepSpec {
    pub parameter: SweepParameter,
    pub from: f64,
    pub to: f64,
    pub steps: usize,
}

impl SweepSpec {
    /// Symmetric range `[base * (1 - span), base * (1 + span)]` around the
    /// request's current value. Rates and zero-valued inputs use an absolute
    /// half-width of `span / 10` instead.
    pub fn around(
        request: &PricingRequest,
        parameter: SweepParameter,
        span: f64,
        steps: usize,
    ) -> Self {
        let base = parameter.value_in(request);
        let (from, to) = if parameter == SweepParameter::Rate || base == 0.0 {
            let half = span / 10.0;
            (base - half, base + half)
        } else {
            (base * (1.0 - span), base * (1.0 + span))
        };
        Self {
            parameter,
            from,
            to,
            steps,
        }
    }

    /// Evenly spaced grid values, endpoints included.
    pub fn grid(&self) -> Result<Vec<f64>> {
        linspace(self.from, self.to, self.steps)
    }
}

/// One evaluated grid point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPoint {
    /// Value of the swept parameter
    pub value: f64,
    pub result: PricingResult,
}

/// `steps` evenly spaced values from `from` to `to` inclusive.
pub fn linspace(from: f64, to: f64, steps: usize) -> Result<Vec<f64>> {
    if steps < 2 {
        return Err(PricingError::InvalidSweep(format!(
            "a sweep needs at least 2 steps, got {}",
            steps
        )));
    }
    if !from.is_finite() || !to.is_finite() {
        return Err(PricingError::InvalidSweep(format!(
            "sweep bounds must be finite, got [{}, {}]",
            from, to
        )));
    }
    if from == to {
        return Err(PricingError::InvalidSweep(format!(
            "sweep bounds must differ, got [{}, {}]",
            from, to
        )));
    }

    let step = (to - from) / (steps - 1) as f64;
    let mut values: Vec<f64> = (0..steps).map(|i| from + step * i as f64).collect();
    // Land exactly on the upper bound
    values[steps - 1] = to;
    Ok(values)
}

/// Evaluate `model` across the grid described by `spec`.
///
/// Every grid point must be a valid request; the first invalid point aborts the
/// sweep with its validation error.
pub fn sweep<M: PricingModel>(
    model: &M,
    base: &PricingRequest,
    option_type: OptionType,
    spec: &SweepSpec,
) -> Result<Vec<SweepPoint>> {
    base.validate()?;
    let grid = spec.grid()?;
    debug!(
        model = model.name(),
        parameter = %spec.parameter,
        from = spec.from,
        to = spec.to,
        steps = spec.steps,
        "running sweep"
    );

    grid.into_iter()
        .map(|value| -> Result<SweepPoint> {
            let request = spec.parameter.apply(base, value);
            match model.evaluate(&request, option_type) {
                Ok(result) => Ok(SweepPoint { value, result }),
                Err(PricingError::InvalidInput(msg)) => Err(PricingError::InvalidInput(format!(
                    "{} at {}={}",
                    msg, spec.parameter, value
                ))),
                Err(e) => Err(e),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        let v = linspace(80.0, 120.0, 5).unwrap();
        assert_eq!(v, vec![80.0, 90.0, 100.0, 110.0, 120.0]);
    }

    #[test]
    fn test_linspace_descending() {
        let v = linspace(1.0, 0.0, 3).unwrap();
        assert_eq!(v, vec![1.0, 0.5, 0.0]);
    }

    #[test]
    fn test_linspace_rejects_degenerate() {
        assert!(linspace(0.0, 1.0, 1).is_err());
        assert!(linspace(1.0, 1.0, 10).is_err());
        assert!(linspace(f64::NAN, 1.0, 10).is_err());
    }

    #[test]
    fn test_parameter_parsing() {
        assert_eq!(
            "Sigma".parse::<SweepParameter>().unwrap(),
            SweepParameter::Volatility
        );
        assert_eq!(
            "k".parse::<SweepParameter>().unwrap(),
            SweepParameter::Strike
        );
        assert!("gamma".parse::<SweepParameter>().is_err());
    }

    #[test]
    fn test_around_rate_uses_absolute_width() {
        let req = PricingRequest::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
        let spec = SweepSpec::around(&req, SweepParameter::Rate, 0.5, 11);
        assert!((spec.from - 0.0).abs() < 1e-12);
        assert!((spec.to - 0.1).abs() < 1e-12);

        let spot = SweepSpec::around(&req, SweepParameter::Spot, 0.5, 11);
        assert_eq!((spot.from, spot.to), (50.0, 150.0));
    }
}
