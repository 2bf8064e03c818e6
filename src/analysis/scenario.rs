use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::models::bs::DAYS_PER_YEAR;
use crate::models::traits::PricingModel;
use crate::models::types::{OptionType, PricingRequest, PricingResult};
use crate::models::utils::discount_factor;

/// Spot multipliers for the spot sensitivity ladder
pub const SPOT_MULTIPLIERS: [f64; 5] = [0.9, 0.95, 1.0, 1.05, 1.1];

/// Absolute volatility shifts for the volatility ladder
pub const VOL_SHIFTS: [f64; 5] = [-0.10, -0.05, 0.0, 0.05, 0.10];

/// Remaining calendar days for the time-decay ladder
pub const DECAY_DAYS: [u32; 5] = [90, 60, 30, 15, 7];

/// One rung of a scenario ladder
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioRow {
    /// Value of the bumped input (spot, volatility or days left)
    pub value: f64,
    pub result: PricingResult,
}

/// How price and Greeks move when one input is bumped at a time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioReport {
    pub base: PricingResult,
    pub spot_ladder: Vec<ScenarioRow>,
    pub vol_ladder: Vec<ScenarioRow>,
    /// Rows keyed by calendar days to expiry
    pub time_decay: Vec<ScenarioRow>,
}

/// Build spot, volatility and time-decay ladders around `base`.
///
/// Volatility rungs that would be zero or negative are skipped.
pub fn scenario_analysis<M: PricingModel>(
    model: &M,
    base: &PricingRequest,
    option_type: OptionType,
) -> Result<ScenarioReport> {
    let base_result = model.evaluate(base, option_type)?;

    let spot_ladder = SPOT_MULTIPLIERS
        .iter()
        .map(|m| -> Result<ScenarioRow> {
            let request = PricingRequest {
                spot: base.spot * m,
                ..*base
            };
            Ok(ScenarioRow {
                value: request.spot,
                result: model.evaluate(&request, option_type)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut vol_ladder = Vec::with_capacity(VOL_SHIFTS.len());
    for shift in VOL_SHIFTS {
        let volatility = base.volatility + shift;
        if volatility <= 0.0 {
            debug!(volatility, "skipping non-positive volatility scenario");
            continue;
        }
        let request = PricingRequest {
            volatility,
            ..*base
        };
        vol_ladder.push(ScenarioRow {
            value: volatility,
            result: model.evaluate(&request, option_type)?,
        });
    }

    let time_decay = DECAY_DAYS
        .iter()
        .map(|&days| -> Result<ScenarioRow> {
            let request = PricingRequest {
                time_to_expiry: days as f64 / DAYS_PER_YEAR,
                ..*base
            };
            Ok(ScenarioRow {
                value: days as f64,
                result: model.evaluate(&request, option_type)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ScenarioReport {
        base: base_result,
        spot_ladder,
        vol_ladder,
        time_decay,
    })
}

/// Call and put on the same inputs, with the put-call parity check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallPutComparison {
    pub call: PricingResult,
    pub put: PricingResult,
    /// C - P
    pub price_difference: f64,
    /// S·e^(-qT) - K·e^(-rT)
    pub parity_target: f64,
}

impl CallPutComparison {
    /// Absolute violation of put-call parity
    pub fn parity_gap(&self) -> f64 {
        (self.price_difference - self.parity_target).abs()
    }

    pub fn parity_holds(&self, tolerance: f64) -> bool {
        self.parity_gap() <= tolerance
    }
}

/// Price both payoff types on `request` and compare them.
pub fn compare_call_put<M: PricingModel>(
    model: &M,
    request: &PricingRequest,
) -> Result<CallPutComparison> {
    let call = model.evaluate(request, OptionType::Call)?;
    let put = model.evaluate(request, OptionType::Put)?;

    let t = request.time_to_expiry;
    let parity_target = request.spot * discount_factor(request.dividend_yield, t)
        - request.strike * discount_factor(request.rate, t);

    Ok(CallPutComparison {
        price_difference: call.price - put.price,
        parity_target,
        call,
        put,
    })
}
