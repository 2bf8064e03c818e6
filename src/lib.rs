//! # bs-calc: Black-Scholes Option Pricing
//!
//! `bs-calc` prices European options with the Black-Scholes-Merton closed form and
//! computes the standard Greeks. On top of the pricing core it provides
//! single-parameter sweeps, scenario ladders, a call/put comparison with a
//! put-call parity check, SVG charts of swept series and a small CLI.
//!
//! ## Core Features
//!
//! - **Pricing**: call and put prices with a continuous dividend yield
//! - **Greeks**: delta, gamma, theta (per day), vega and rho (per percentage point)
//! - **Edge cases**: intrinsic value at expiry, discounted forward value at zero volatility
//! - **Analysis**: parameter sweeps, scenario ladders, put-call parity check
//! - **Charts**: SVG line charts of any price or Greek against a swept input
//!
//! ## Quick Start
//!
//! ```rust
//! use bs_calc::{price_option, OptionType, PricingRequest};
//!
//! // S=100, K=100, T=1y, r=5%, σ=20%
//! let request = PricingRequest::new(100.0, 100.0, 1.0, 0.05, 0.2)?;
//! let call = price_option(&request, OptionType::Call)?;
//!
//! assert!((call.price - 10.4506).abs() < 1e-3);
//! println!("Call: ${:.4}, delta {:.4}", call.price, call.greeks.delta);
//! # Ok::<(), bs_calc::PricingError>(())
//! ```
//!
//! ## Input Validation
//!
//! Spot and strike must be positive, volatility and time non-negative, and every
//! input finite. Anything else is rejected with [`PricingError::InvalidInput`].

// ================================================================================================
// MODULES
// ================================================================================================

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod plot;
pub mod report;

// ================================================================================================
// IMPORTS
// ================================================================================================

use std::path::Path;

use models::bs::BlackScholes;
use models::traits::PricingModel;

// ================================================================================================
// PUBLIC RE-EXPORTS
// ================================================================================================

// Core request / result types
pub use models::types::{Greeks, Metric, Moneyness, OptionType, PricingRequest, PricingResult};

// Black-Scholes model and calculator
pub use models::bs::{BlackScholesCalculator, DAYS_PER_YEAR};
pub use models::stats::{norm_cdf, norm_pdf};

// Analysis types
pub use analysis::{
    CallPutComparison, ScenarioReport, ScenarioRow, SweepParameter, SweepPoint, SweepSpec,
};

// Configuration and errors
pub use config::{CalculatorConfig, ChartConfig, MarketDefaults, SweepConfig};
pub use error::{PricingError, Result};

// ================================================================================================
// DEFAULT CONFIGURATIONS
// ================================================================================================

/// Pre-configured sweep and chart settings.
///
/// - [`standard()`]: 50-point sweeps on a 1024x640 canvas
/// - [`high_resolution()`]: 400-point sweeps on a large canvas
/// - [`quick()`]: 11-point sweeps on a small canvas
pub mod default_configs {
    use crate::config::CalculatorConfig;

    /// Balanced defaults for interactive use.
    ///
    /// ```rust
    /// let config = bs_calc::default_configs::standard();
    /// assert_eq!(config.sweep.steps, 50);
    /// ```
    pub fn standard() -> CalculatorConfig {
        CalculatorConfig::standard()
    }

    /// Smooth curves for reports.
    pub fn high_resolution() -> CalculatorConfig {
        CalculatorConfig::high_resolution()
    }

    /// Coarse grid for quick checks and tests.
    pub fn quick() -> CalculatorConfig {
        CalculatorConfig::quick()
    }
}

// ================================================================================================
// PRICING API
// ================================================================================================

/// Price one European option and compute its Greeks.
///
/// # Errors
///
/// [`PricingError::InvalidInput`] when the request is outside the model's domain.
pub fn price_option(request: &PricingRequest, option_type: OptionType) -> Result<PricingResult> {
    BlackScholes.evaluate(request, option_type)
}

/// Price the call and the put on the same inputs and check put-call parity.
///
/// ```rust
/// use bs_calc::{compare_call_put, PricingRequest};
///
/// let request = PricingRequest::new(100.0, 95.0, 0.5, 0.03, 0.3)?;
/// let cmp = compare_call_put(&request)?;
/// assert!(cmp.parity_holds(1e-9));
/// # Ok::<(), bs_calc::PricingError>(())
/// ```
pub fn compare_call_put(request: &PricingRequest) -> Result<CallPutComparison> {
    analysis::compare_call_put(&BlackScholes, request)
}

/// Spot, volatility and time-decay ladders around `request`.
pub fn scenario_analysis(
    request: &PricingRequest,
    option_type: OptionType,
) -> Result<ScenarioReport> {
    analysis::scenario_analysis(&BlackScholes, request, option_type)
}

/// Evaluate the option across a single-parameter grid.
///
/// # Errors
///
/// - [`PricingError::InvalidSweep`] for fewer than two steps or degenerate bounds
/// - [`PricingError::InvalidInput`] when a grid point leaves the model's domain
///   (for example a spot sweep that reaches zero)
pub fn sweep(
    request: &PricingRequest,
    option_type: OptionType,
    spec: &SweepSpec,
) -> Result<Vec<SweepPoint>> {
    analysis::sweep(&BlackScholes, request, option_type, spec)
}

/// Sweep and chart one metric in a single call.
///
/// Returns the swept points so callers can print or export them as well.
pub fn sweep_and_plot(
    request: &PricingRequest,
    option_type: OptionType,
    spec: &SweepSpec,
    metric: Metric,
    path: impl AsRef<Path>,
    chart: &ChartConfig,
) -> Result<Vec<SweepPoint>> {
    let points = sweep(request, option_type, spec)?;
    plot::plot_sweep(&points, spec.parameter, metric, path.as_ref(), chart)?;
    Ok(points)
}
