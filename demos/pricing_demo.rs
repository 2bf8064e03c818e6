// demos/pricing_demo.rs

//! Demonstration of Black-Scholes pricing
//!
//! This example shows how to:
//! 1. Price a call and read its Greeks
//! 2. Compare call and put and check put-call parity
//! 3. Run scenario ladders on a dividend-paying underlying

use anyhow::Result;
use bs_calc::report::{format_comparison, format_scenarios, format_summary};
use bs_calc::{compare_call_put, price_option, scenario_analysis, OptionType, PricingRequest};

fn main() -> Result<()> {
    println!("Black-Scholes Pricing Demo");
    println!("==========================");

    // Technology stock call: slightly out of the money, 45 days out
    let tech = PricingRequest::new(150.0, 155.0, 45.0 / 365.0, 0.045, 0.25)?;
    let call = price_option(&tech, OptionType::Call)?;
    print!("{}", format_summary(&call));

    println!("\nStep 2: Call vs put on the same inputs...");
    let cmp = compare_call_put(&tech)?;
    print!("{}", format_comparison(&cmp));

    // Utility stock put with a 4% dividend yield
    println!("\nStep 3: Scenario ladders for a dividend-paying put...");
    let utility = PricingRequest::new(45.0, 50.0, 0.25, 0.035, 0.15)?.with_dividend_yield(0.04)?;
    let report = scenario_analysis(&utility, OptionType::Put)?;
    print!("{}", format_scenarios(&report));

    Ok(())
}
