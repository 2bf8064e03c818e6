//! Plain-text rendering of pricing results for terminal output.

use std::fmt::Write;

use crate::analysis::scenario::{CallPutComparison, ScenarioReport, ScenarioRow};
use crate::analysis::sweep::{SweepParameter, SweepPoint};
use crate::models::types::{Metric, PricingResult};

const WIDTH: usize = 60;

fn rule(out: &mut String, ch: char, width: usize) {
    let _ = writeln!(out, "{}", ch.to_string().repeat(width));
}

/// Full summary of one option: inputs, price, Greeks and value breakdown.
pub fn format_summary(result: &PricingResult) -> String {
    let req = &result.request;
    let g = &result.greeks;
    let mut out = String::new();

    rule(&mut out, '=', WIDTH);
    let _ = writeln!(out, "BLACK-SCHOLES OPTION PRICING SUMMARY");
    rule(&mut out, '=', WIDTH);
    let _ = writeln!(
        out,
        "Option Type: {}",
        result.option_type.as_str().to_uppercase()
    );
    let _ = writeln!(out, "Spot Price (S): ${:.2}", req.spot);
    let _ = writeln!(out, "Strike Price (K): ${:.2}", req.strike);
    let _ = writeln!(
        out,
        "Time to Expiration (T): {:.4} years",
        req.time_to_expiry
    );
    let _ = writeln!(out, "Risk-free Rate (r): {:.2}%", req.rate * 100.0);
    let _ = writeln!(out, "Volatility (σ): {:.2}%", req.volatility * 100.0);
    let _ = writeln!(
        out,
        "Dividend Yield (q): {:.2}%",
        req.dividend_yield * 100.0
    );
    rule(&mut out, '-', WIDTH);
    let _ = writeln!(out, "Price: ${:.4}", result.price);
    let _ = writeln!(
        out,
        "Delta: {:.4} (${:.2} per $1 move per 100 shares)",
        g.delta,
        g.delta * 100.0
    );
    let _ = writeln!(out, "Gamma: {:.6} (delta change per $1 move)", g.gamma);
    let _ = writeln!(out, "Theta: {:.4} (per day)", g.theta);
    let _ = writeln!(out, "Vega: {:.4} (per 1% volatility change)", g.vega);
    let _ = writeln!(out, "Rho: {:.4} (per 1% rate change)", g.rho);
    rule(&mut out, '-', WIDTH);
    let _ = writeln!(
        out,
        "Option is {}",
        result.moneyness.to_string().to_uppercase()
    );
    let _ = writeln!(out, "Intrinsic Value: ${:.4}", result.intrinsic_value);
    let _ = writeln!(out, "Time Value: ${:.4}", result.time_value);
    rule(&mut out, '=', WIDTH);
    out
}

/// Call and put side by side followed by the parity check.
pub fn format_comparison(cmp: &CallPutComparison) -> String {
    let mut out = String::new();
    rule(&mut out, '=', 80);
    let _ = writeln!(out, "CALL vs PUT COMPARISON");
    rule(&mut out, '=', 80);
    let _ = writeln!(
        out,
        "{:<15} {:<15} {:<15}",
        "Metric", "Call Option", "Put Option"
    );
    rule(&mut out, '-', 50);

    for metric in Metric::ALL {
        let call = metric.value_of(&cmp.call);
        let put = metric.value_of(&cmp.put);
        let name = capitalize(metric.as_str());
        if metric == Metric::Price {
            let _ = writeln!(out, "{:<15} ${:<14.4} ${:<14.4}", name, call, put);
        } else {
            let _ = writeln!(out, "{:<15} {:<15.4} {:<15.4}", name, call, put);
        }
    }

    let _ = writeln!(out, "\nPUT-CALL PARITY CHECK:");
    let _ = writeln!(out, "Call - Put = {:.4}", cmp.price_difference);
    let _ = writeln!(out, "S*e^(-qT) - K*e^(-rT) = {:.4}", cmp.parity_target);
    let _ = writeln!(out, "Difference = {:.6}", cmp.parity_gap());
    out
}

/// Spot, volatility and time-decay ladders as three tables.
pub fn format_scenarios(report: &ScenarioReport) -> String {
    let base = &report.base;
    let req = &base.request;
    let mut out = String::new();

    rule(&mut out, '=', 80);
    let _ = writeln!(
        out,
        "SCENARIO ANALYSIS: How Parameter Changes Affect Option Pricing"
    );
    rule(&mut out, '=', 80);
    let _ = writeln!(out, "\nBase Case Results:");
    let _ = writeln!(
        out,
        "Stock: ${}, Strike: ${}, Time: {:.3}yr, Rate: {:.1}%, Vol: {:.1}%",
        req.spot,
        req.strike,
        req.time_to_expiry,
        req.rate * 100.0,
        req.volatility * 100.0
    );
    let _ = writeln!(out, "Option Price: ${:.4}", base.price);

    let _ = writeln!(out, "\n1. STOCK PRICE SENSITIVITY ANALYSIS:");
    let _ = writeln!(
        out,
        "{:<12} {:<12} {:<8} {:<8}",
        "Stock Price", "Option Price", "Delta", "Gamma"
    );
    rule(&mut out, '-', 50);
    for ScenarioRow { value, result } in &report.spot_ladder {
        let _ = writeln!(
            out,
            "${:<11.2} ${:<11.4} {:<8.4} {:<8.6}",
            value, result.price, result.greeks.delta, result.greeks.gamma
        );
    }

    let _ = writeln!(out, "\n2. VOLATILITY SENSITIVITY ANALYSIS:");
    let _ = writeln!(
        out,
        "{:<12} {:<12} {:<8} {:<8}",
        "Volatility", "Option Price", "Vega", "Delta"
    );
    rule(&mut out, '-', 50);
    for ScenarioRow { value, result } in &report.vol_ladder {
        let vol = format!("{:.1}%", value * 100.0);
        let _ = writeln!(
            out,
            "{:<12} ${:<11.4} {:<8.4} {:<8.4}",
            vol, result.price, result.greeks.vega, result.greeks.delta
        );
    }

    let _ = writeln!(out, "\n3. TIME DECAY ANALYSIS:");
    let _ = writeln!(
        out,
        "{:<12} {:<12} {:<8} {:<8}",
        "Days Left", "Option Price", "Theta", "Delta"
    );
    rule(&mut out, '-', 50);
    for ScenarioRow { value, result } in &report.time_decay {
        let _ = writeln!(
            out,
            "{:<12} ${:<11.4} {:<8.4} {:<8.4}",
            value, result.price, result.greeks.theta, result.greeks.delta
        );
    }
    out
}

/// Sweep as a table with one row per grid point.
pub fn format_sweep_table(points: &[SweepPoint], parameter: SweepParameter) -> String {
    let mut out = String::new();
    let _ = write!(out, "{:<12}", parameter.as_str());
    for metric in Metric::ALL {
        let _ = write!(out, " {:>12}", metric.as_str());
    }
    let _ = writeln!(out);
    rule(&mut out, '-', 12 + 13 * Metric::ALL.len());

    for point in points {
        let _ = write!(out, "{:<12.4}", point.value);
        for metric in Metric::ALL {
            let _ = write!(out, " {:>12.6}", metric.value_of(&point.result));
        }
        let _ = writeln!(out);
    }
    out
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
