//! Prompt-driven calculator session.
//!
//! Rates and volatility are entered as percentages, time either in days or in
//! years. A non-numeric answer or end of input ends the session.

use anyhow::Result;
use std::io::{BufRead, Write};
use thiserror::Error;
use tracing::debug;

use crate::models::bs::DAYS_PER_YEAR;
use crate::models::traits::PricingModel;
use crate::models::types::{OptionType, PricingRequest};
use crate::report::format_summary;

/// Unit of the time-to-expiry answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Days,
    Years,
}

impl TimeUnit {
    /// `d`/`days` selects days; anything else means years.
    pub fn parse(answer: &str) -> Self {
        match answer.trim().to_lowercase().as_str() {
            "d" | "day" | "days" => TimeUnit::Days,
            _ => TimeUnit::Years,
        }
    }

    pub fn to_years(self, value: f64) -> f64 {
        match self {
            TimeUnit::Days => value / DAYS_PER_YEAR,
            TimeUnit::Years => value,
        }
    }
}

/// Inputs collected from one round of prompts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Answers {
    pub request: PricingRequest,
    pub option_type: OptionType,
}

/// Why a round of prompts stopped without producing answers
#[derive(Debug, Clone, PartialEq, Error)]
enum Stop {
    #[error("end of input")]
    EndOfInput,
    #[error("quit requested")]
    Quit,
    #[error("not a number: {0}")]
    NotANumber(String),
}

/// Unknown answers fall back to a call.
pub fn parse_option_type(answer: &str) -> OptionType {
    answer.parse().unwrap_or(OptionType::Call)
}

/// Parse a number, accepting a trailing `%` and a leading `$`.
pub fn parse_number(answer: &str) -> Option<f64> {
    let cleaned = answer
        .trim()
        .trim_start_matches('$')
        .trim_end_matches('%')
        .trim();
    cleaned.parse::<f64>().ok()
}

struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Stop::EndOfInput.into());
        }
        let answer = line.trim().to_string();
        if answer.eq_ignore_ascii_case("q") {
            return Err(Stop::Quit.into());
        }
        Ok(answer)
    }

    fn ask_number(&mut self, prompt: &str) -> Result<f64> {
        let answer = self.ask(prompt)?;
        parse_number(&answer).ok_or_else(|| Stop::NotANumber(answer).into())
    }

    fn collect(&mut self) -> Result<Answers> {
        writeln!(self.output, "\n{}", "=".repeat(70))?;
        writeln!(
            self.output,
            "INTERACTIVE BLACK-SCHOLES OPTIONS PRICING CALCULATOR"
        )?;
        writeln!(self.output, "{}", "=".repeat(70))?;
        writeln!(
            self.output,
            "Please enter the following parameters for your option:"
        )?;
        writeln!(self.output, "(Enter 'q' at any time to quit)")?;

        let spot = self.ask_number("\n1. Current Stock Price (S): $")?;
        let strike = self.ask_number("2. Strike Price (K): $")?;

        writeln!(self.output, "\n3. Time to Expiration:")?;
        writeln!(self.output, "   - Years (e.g., 0.25 for 3 months)")?;
        writeln!(self.output, "   - Days (converted to years)")?;
        let time_value = self.ask_number("   Enter time value: ")?;
        let unit = TimeUnit::parse(&self.ask("   Is this in (d)ays or (y)ears? [d/y]: ")?);

        let rate = self.ask_number("\n4. Risk-free Interest Rate (as %): ")? / 100.0;
        let volatility = self.ask_number("5. Volatility (as %): ")? / 100.0;
        let option_type =
            parse_option_type(&self.ask("\n6. Option Type - (c)all or (p)ut? [c/p]: ")?);

        // Validation happens when the answers are priced
        let request = PricingRequest {
            spot,
            strike,
            time_to_expiry: unit.to_years(time_value),
            rate,
            volatility,
            dividend_yield: 0.0,
        };
        Ok(Answers {
            request,
            option_type,
        })
    }
}

/// Run prompt rounds until the user stops. Returns the number of options priced.
///
/// Invalid market inputs (e.g. a zero spot) are reported and the user is asked
/// whether to continue; non-numeric answers end the session.
pub fn run_session<R: BufRead, W: Write, M: PricingModel>(
    input: R,
    output: W,
    model: &M,
) -> Result<usize> {
    let mut prompter = Prompter { input, output };
    let mut priced = 0;

    loop {
        let answers = match prompter.collect() {
            Ok(answers) => answers,
            Err(e) => match e.downcast_ref::<Stop>() {
                Some(Stop::NotANumber(answer)) => {
                    debug!(answer = %answer, "non-numeric answer");
                    writeln!(
                        prompter.output,
                        "Invalid input! Please enter numeric values."
                    )?;
                    break;
                }
                Some(Stop::Quit) | Some(Stop::EndOfInput) => {
                    writeln!(prompter.output, "\nExiting...")?;
                    break;
                }
                None => return Err(e),
            },
        };

        match model.evaluate(&answers.request, answers.option_type) {
            Ok(result) => {
                write!(prompter.output, "{}", format_summary(&result))?;
                priced += 1;
            }
            Err(e) => writeln!(prompter.output, "Error: {}", e)?,
        }

        match prompter.ask("\nWould you like to calculate another option? (y/n): ") {
            Ok(answer) if answer.eq_ignore_ascii_case("y") => continue,
            Ok(_) => break,
            Err(e) if e.is::<Stop>() => break,
            Err(e) => return Err(e),
        }
    }

    writeln!(
        prompter.output,
        "\nThank you for using the Black-Scholes Calculator!"
    )?;
    Ok(priced)
}
