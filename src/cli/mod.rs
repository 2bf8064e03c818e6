//! Command-line surface of `bs-calc`.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::analysis::sweep::SweepParameter;
use crate::config::MarketDefaults;
use crate::error::{PricingError, Result};
use crate::models::bs::DAYS_PER_YEAR;
use crate::models::types::{Metric, OptionType, PricingRequest};

pub mod commands;
pub mod interactive;

#[derive(Parser, Debug)]
#[command(
    name = "bs-calc",
    about = "Black-Scholes option pricing calculator",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Built-in configuration preset, used when no config file is given
    #[arg(long, global = true, value_enum, default_value_t = Preset::Standard)]
    pub preset: Preset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    Standard,
    HighResolution,
    Quick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Price one option and print its Greeks
    Price {
        #[command(flatten)]
        market: MarketArgs,

        /// Option type (call/put)
        #[arg(short, long, default_value = "call")]
        option_type: OptionType,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Price call and put side by side and check put-call parity
    Compare {
        #[command(flatten)]
        market: MarketArgs,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Spot, volatility and time-decay scenario ladders
    Scenarios {
        #[command(flatten)]
        market: MarketArgs,

        #[arg(short, long, default_value = "call")]
        option_type: OptionType,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Sweep one input across a range, print the table and draw a chart
    Sweep {
        #[command(flatten)]
        market: MarketArgs,

        #[arg(short, long, default_value = "call")]
        option_type: OptionType,

        /// Parameter to sweep (spot, strike, vol, time, rate)
        #[arg(short, long, default_value = "spot")]
        param: SweepParameter,

        /// Lower bound (defaults to a range around the current value)
        #[arg(long, requires = "to")]
        from: Option<f64>,

        /// Upper bound
        #[arg(long, requires = "from")]
        to: Option<f64>,

        /// Number of grid points
        #[arg(long)]
        steps: Option<usize>,

        /// Quantity to chart (price, delta, gamma, theta, vega, rho)
        #[arg(short, long)]
        metric: Option<Metric>,

        /// SVG chart path
        #[arg(long)]
        output: Option<PathBuf>,

        /// Also write the sweep as CSV
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Skip chart rendering
        #[arg(long)]
        no_chart: bool,
    },

    /// Prompt for inputs and price options until told to stop
    Interactive,
}

/// Market inputs shared by the pricing subcommands.
///
/// Rates and volatility are decimals (0.05 = 5%).
#[derive(Args, Debug, Clone)]
pub struct MarketArgs {
    /// Spot price of the underlying
    #[arg(short, long)]
    pub spot: f64,

    /// Strike price
    #[arg(short = 'k', long)]
    pub strike: f64,

    /// Time to expiry in years
    #[arg(short, long, conflicts_with = "days", required_unless_present = "days")]
    pub time: Option<f64>,

    /// Time to expiry in calendar days
    #[arg(long)]
    pub days: Option<f64>,

    /// Risk-free rate (defaults to the configured rate)
    #[arg(short, long)]
    pub rate: Option<f64>,

    /// Volatility
    #[arg(long, visible_alias = "sigma")]
    pub vol: f64,

    /// Dividend yield (defaults to the configured yield)
    #[arg(short = 'q', long)]
    pub dividend: Option<f64>,
}

impl MarketArgs {
    /// Build a validated request, filling omitted inputs from `defaults`.
    pub fn to_request(&self, defaults: &MarketDefaults) -> Result<PricingRequest> {
        let time_to_expiry = match (self.time, self.days) {
            (Some(t), _) => t,
            (None, Some(days)) => days / DAYS_PER_YEAR,
            (None, None) => {
                return Err(PricingError::InvalidInput(
                    "time to expiry is required (--time or --days)".to_string(),
                ))
            }
        };

        PricingRequest::new(
            self.spot,
            self.strike,
            time_to_expiry,
            self.rate.unwrap_or(defaults.rate),
            self.vol,
        )?
        .with_dividend_yield(self.dividend.unwrap_or(defaults.dividend_yield))
    }
}
