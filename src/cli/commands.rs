use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::{Cli, Commands, MarketArgs, OutputFormat, Preset};
use crate::analysis::{self, SweepParameter, SweepSpec};
use crate::config::CalculatorConfig;
use crate::models::bs::BlackScholes;
use crate::models::traits::PricingModel;
use crate::models::types::{Metric, OptionType};
use crate::plot;
use crate::report;

/// Parity violations above this are reported as warnings
const PARITY_TOLERANCE: f64 = 1e-6;

/// Resolve the configuration: explicit file first, then the preset.
pub fn load_config(path: Option<&Path>, preset: Preset) -> Result<CalculatorConfig> {
    match path {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            CalculatorConfig::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))
        }
        None => Ok(match preset {
            Preset::Standard => CalculatorConfig::standard(),
            Preset::HighResolution => CalculatorConfig::high_resolution(),
            Preset::Quick => CalculatorConfig::quick(),
        }),
    }
}

/// Dispatch a parsed command line, writing results to stdout.
pub fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref(), cli.preset)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Price {
            market,
            option_type,
            format,
        } => price(&market, option_type, format, &config, &mut out),
        Commands::Compare { market, format } => compare(&market, format, &config, &mut out),
        Commands::Scenarios {
            market,
            option_type,
            format,
        } => scenarios(&market, option_type, format, &config, &mut out),
        Commands::Sweep {
            market,
            option_type,
            param,
            from,
            to,
            steps,
            metric,
            output,
            csv,
            no_chart,
        } => {
            let opts = SweepOptions {
                option_type,
                parameter: param,
                bounds: from.zip(to),
                steps,
                metric,
                output: if no_chart {
                    None
                } else {
                    Some(output.unwrap_or_else(|| config.chart.output.clone()))
                },
                csv,
            };
            sweep(&market, &opts, &config, &mut out)
        }
        Commands::Interactive => {
            let stdin = io::stdin();
            let priced = super::interactive::run_session(stdin.lock(), &mut out, &BlackScholes)?;
            info!(priced, "interactive session finished");
            Ok(())
        }
    }
}

pub fn price(
    market: &MarketArgs,
    option_type: OptionType,
    format: OutputFormat,
    config: &CalculatorConfig,
    out: &mut dyn Write,
) -> Result<()> {
    let request = market.to_request(&config.market)?;
    let result = BlackScholes.evaluate(&request, option_type)?;
    info!(
        option_type = %option_type,
        price = result.price,
        "priced option"
    );

    match format {
        OutputFormat::Table => write!(out, "{}", report::format_summary(&result))?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?,
    }
    Ok(())
}

pub fn compare(
    market: &MarketArgs,
    format: OutputFormat,
    config: &CalculatorConfig,
    out: &mut dyn Write,
) -> Result<()> {
    let request = market.to_request(&config.market)?;
    let cmp = analysis::compare_call_put(&BlackScholes, &request)?;
    if !cmp.parity_holds(PARITY_TOLERANCE) {
        warn!(gap = cmp.parity_gap(), "put-call parity violated");
    }

    match format {
        OutputFormat::Table => write!(out, "{}", report::format_comparison(&cmp))?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&cmp)?)?,
    }
    Ok(())
}

pub fn scenarios(
    market: &MarketArgs,
    option_type: OptionType,
    format: OutputFormat,
    config: &CalculatorConfig,
    out: &mut dyn Write,
) -> Result<()> {
    let request = market.to_request(&config.market)?;
    let scenario_report = analysis::scenario_analysis(&BlackScholes, &request, option_type)?;

    match format {
        OutputFormat::Table => write!(out, "{}", report::format_scenarios(&scenario_report))?,
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&scenario_report)?)?
        }
    }
    Ok(())
}

/// Options of the `sweep` subcommand after defaults are applied
#[derive(Debug, Clone)]
pub struct SweepOptions {
    pub option_type: OptionType,
    pub parameter: SweepParameter,
    /// Explicit `(from, to)`; `None` sweeps around the current value
    pub bounds: Option<(f64, f64)>,
    pub steps: Option<usize>,
    pub metric: Option<Metric>,
    /// Chart path; `None` skips the chart
    pub output: Option<PathBuf>,
    pub csv: Option<PathBuf>,
}

pub fn sweep(
    market: &MarketArgs,
    opts: &SweepOptions,
    config: &CalculatorConfig,
    out: &mut dyn Write,
) -> Result<()> {
    let request = market.to_request(&config.market)?;
    let steps = opts.steps.unwrap_or(config.sweep.steps);
    let spec = match opts.bounds {
        Some((from, to)) => SweepSpec {
            parameter: opts.parameter,
            from,
            to,
            steps,
        },
        None => SweepSpec::around(&request, opts.parameter, config.sweep.span, steps),
    };

    let points = analysis::sweep(&BlackScholes, &request, opts.option_type, &spec)?;
    write!(
        out,
        "{}",
        report::format_sweep_table(&points, spec.parameter)
    )?;

    if let Some(path) = &opts.csv {
        plot::write_sweep_csv(&points, spec.parameter, path)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    if let Some(path) = &opts.output {
        let metric = opts.metric.unwrap_or(config.sweep.metric);
        plot::plot_sweep(&points, spec.parameter, metric, path, &config.chart)
            .with_context(|| format!("failed to draw chart {}", path.display()))?;
        writeln!(out, "Chart saved to {}", path.display())?;
    }
    Ok(())
}
