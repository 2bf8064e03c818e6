// Example: plot_sweep.rs
// Sweeps spot across +/-40% of the strike and writes two SVG charts: the call
// price and the call delta.
//
// Usage:
//     cargo run --example plot_sweep -- [output_dir]

use std::env;
use std::path::PathBuf;

use anyhow::Result;
use bs_calc::report::format_sweep_table;
use bs_calc::{
    default_configs, sweep_and_plot, Metric, OptionType, PricingRequest, SweepParameter, SweepSpec,
};

fn main() -> Result<()> {
    let out_dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let request = PricingRequest::new(100.0, 100.0, 0.5, 0.05, 0.2)?;
    let config = default_configs::high_resolution();
    let spec = SweepSpec::around(&request, SweepParameter::Spot, 0.4, config.sweep.steps);

    let price_path = out_dir.join("call_price.svg");
    let points = sweep_and_plot(
        &request,
        OptionType::Call,
        &spec,
        Metric::Price,
        &price_path,
        &config.chart,
    )?;
    println!("Chart saved to {}", price_path.display());

    let delta_path = out_dir.join("call_delta.svg");
    bs_calc::plot::plot_sweep(
        &points,
        spec.parameter,
        Metric::Delta,
        &delta_path,
        &config.chart,
    )?;
    println!("Chart saved to {}", delta_path.display());

    // Print every 40th row to keep the table short
    let sample: Vec<_> = points.iter().step_by(40).cloned().collect();
    print!("{}", format_sweep_table(&sample, spec.parameter));
    Ok(())
}
