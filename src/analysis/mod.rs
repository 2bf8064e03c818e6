//! Analyses built on top of a [`PricingModel`](crate::models::traits::PricingModel):
//! single-parameter sweeps, scenario ladders and call/put comparison.

pub mod scenario;
pub mod sweep;

pub use scenario::{
    compare_call_put, scenario_analysis, CallPutComparison, ScenarioReport, ScenarioRow,
};
pub use sweep::{linspace, sweep, SweepParameter, SweepPoint, SweepSpec};
