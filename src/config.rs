use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::types::Metric;

/// Market inputs used when the caller does not supply them
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MarketDefaults {
    /// Risk-free rate (decimal)
    #[serde(default = "default_rate")]
    pub rate: f64,
    /// Dividend yield (decimal)
    #[serde(default)]
    pub dividend_yield: f64,
}

impl Default for MarketDefaults {
    fn default() -> Self {
        Self {
            rate: default_rate(),
            dividend_yield: 0.0,
        }
    }
}

/// Parameter sweep settings
#[derive(Debug, Clone, Deserialize)]
pub struct SweepConfig {
    /// Number of grid points, endpoints included
    #[serde(default = "default_steps")]
    pub steps: usize,
    /// Quantity plotted against the swept parameter
    #[serde(default = "default_metric")]
    pub metric: Metric,
    /// Relative half-width of the range used when no bounds are given:
    /// `[base * (1 - span), base * (1 + span)]`
    #[serde(default = "default_span")]
    pub span: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            metric: default_metric(),
            span: default_span(),
        }
    }
}

/// SVG chart settings
#[derive(Debug, Clone, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Output path used when none is given on the command line
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default = "default_caption_font_size")]
    pub caption_font_size: u32,
    /// Draw a marker at every sampled point in addition to the line
    #[serde(default = "default_show_points")]
    pub show_points: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            output: default_output(),
            caption_font_size: default_caption_font_size(),
            show_points: default_show_points(),
        }
    }
}

/// Main configuration struct, loadable from TOML.
///
/// ```toml
/// [market]
/// rate = 0.045
///
/// [sweep]
/// steps = 120
/// metric = "delta"
///
/// [chart]
/// output = "delta.svg"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalculatorConfig {
    #[serde(default)]
    pub market: MarketDefaults,
    #[serde(default)]
    pub sweep: SweepConfig,
    #[serde(default)]
    pub chart: ChartConfig,
}

impl CalculatorConfig {
    /// Parse a TOML document. Missing sections and keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Default grid and chart size
    pub fn standard() -> Self {
        Self::default()
    }

    /// Dense grid and a large canvas for smooth curves
    pub fn high_resolution() -> Self {
        Self {
            sweep: SweepConfig {
                steps: 400,
                ..SweepConfig::default()
            },
            chart: ChartConfig {
                width: 1600,
                height: 1000,
                caption_font_size: 36,
                show_points: false,
                ..ChartConfig::default()
            },
            ..Self::default()
        }
    }

    /// Coarse grid for quick looks and tests
    pub fn quick() -> Self {
        Self {
            sweep: SweepConfig {
                steps: 11,
                ..SweepConfig::default()
            },
            chart: ChartConfig {
                width: 640,
                height: 400,
                caption_font_size: 20,
                ..ChartConfig::default()
            },
            ..Self::default()
        }
    }
}

fn default_rate() -> f64 {
    0.05
}

fn default_steps() -> usize {
    50
}

fn default_metric() -> Metric {
    Metric::Price
}

fn default_span() -> f64 {
    0.5
}

fn default_width() -> u32 {
    1024
}

fn default_height() -> u32 {
    640
}

fn default_output() -> PathBuf {
    PathBuf::from("sweep.svg")
}

fn default_caption_font_size() -> u32 {
    28
}

fn default_show_points() -> bool {
    true
}
