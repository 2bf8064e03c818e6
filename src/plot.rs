//! Chart rendering and tabular export for swept series.
//!
//! Charts are written as SVG through the plotters SVG backend.

use plotters::prelude::*;
use std::path::Path;
use tracing::{debug, info};

use crate::analysis::sweep::{SweepParameter, SweepPoint};
use crate::config::ChartConfig;
use crate::error::{PricingError, Result};
use crate::models::types::{Metric, OptionType};

fn plot_err<E: std::fmt::Display>(e: E) -> PricingError {
    PricingError::Plot(e.to_string())
}

/// Labels for a chart
#[derive(Debug, Clone)]
pub struct ChartLabels {
    pub caption: String,
    pub x_desc: String,
    pub y_desc: String,
}

/// Draw an ordered `(x, y)` series as a line chart.
///
/// Needs at least two points, all finite. Flat series are padded so the
/// y-axis never collapses to a zero-height range.
pub fn plot_series(
    series: &[(f64, f64)],
    labels: &ChartLabels,
    path: &Path,
    config: &ChartConfig,
) -> Result<()> {
    if series.len() < 2 {
        return Err(PricingError::Plot(format!(
            "need at least 2 points to draw a chart, got {}",
            series.len()
        )));
    }
    if let Some((x, y)) = series
        .iter()
        .find(|(x, y)| !x.is_finite() || !y.is_finite())
    {
        return Err(PricingError::Plot(format!(
            "cannot plot non-finite point ({}, {})",
            x, y
        )));
    }

    let (x_min, x_max) = padded_range(series.iter().map(|p| p.0), 0.0);
    let (y_min, y_max) = padded_range(series.iter().map(|p| p.1), 0.05);
    debug!(
        x_min,
        x_max,
        y_min,
        y_max,
        points = series.len(),
        "chart ranges"
    );

    let root = SVGBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(&labels.caption, ("sans-serif", config.caption_font_size))
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc(labels.x_desc.as_str())
        .y_desc(labels.y_desc.as_str())
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(std::iter::once(PathElement::new(
            series.to_vec(),
            BLUE.stroke_width(2),
        )))
        .map_err(plot_err)?;

    if config.show_points {
        chart
            .draw_series(series.iter().map(|pt| Circle::new(*pt, 2, RED.filled())))
            .map_err(plot_err)?;
    }

    root.present().map_err(plot_err)?;
    info!("Chart saved to {}", path.display());
    Ok(())
}

/// Chart one metric of a sweep against the swept parameter.
pub fn plot_sweep(
    points: &[SweepPoint],
    parameter: SweepParameter,
    metric: Metric,
    path: &Path,
    config: &ChartConfig,
) -> Result<()> {
    let series: Vec<(f64, f64)> = points
        .iter()
        .map(|p| (p.value, metric.value_of(&p.result)))
        .collect();

    let option_type = points
        .first()
        .map(|p| p.result.option_type)
        .unwrap_or(OptionType::Call);
    let labels = ChartLabels {
        caption: format!(
            "Black-Scholes {} {} vs {}",
            option_type,
            metric,
            parameter.axis_label().to_lowercase()
        ),
        x_desc: parameter.axis_label().to_string(),
        y_desc: metric.axis_label().to_string(),
    };

    plot_series(&series, &labels, path, config)
}

/// Write a sweep as CSV: the swept value, price and every Greek per row.
pub fn write_sweep_csv(
    points: &[SweepPoint],
    parameter: SweepParameter,
    path: &Path,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    let mut header = vec![parameter.as_str()];
    header.extend(Metric::ALL.iter().map(|m| m.as_str()));
    writer.write_record(&header)?;

    for point in points {
        let mut record = vec![point.value.to_string()];
        record.extend(
            Metric::ALL
                .iter()
                .map(|m| m.value_of(&point.result).to_string()),
        );
        writer.write_record(&record)?;
    }
    writer.flush()?;
    info!("Wrote {} rows to {}", points.len(), path.display());
    Ok(())
}

// Min/max of `values` widened by `pad` of the span. A zero span is widened
// around the value so the axis keeps a positive extent.
fn padded_range(values: impl Iterator<Item = f64>, pad: f64) -> (f64, f64) {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    let span = hi - lo;
    if span <= f64::EPSILON * lo.abs().max(hi.abs()).max(1.0) {
        let half = (lo.abs() * 0.05).max(1e-6);
        return (lo - half, hi + half);
    }
    (lo - span * pad, hi + span * pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_range_flat_series() {
        let (lo, hi) = padded_range([0.0, 0.0, 0.0].into_iter(), 0.05);
        assert!(lo < 0.0 && hi > 0.0);
    }

    #[test]
    fn test_padded_range_adds_margin() {
        let (lo, hi) = padded_range([1.0, 3.0].into_iter(), 0.05);
        assert!((lo - 0.9).abs() < 1e-12);
        assert!((hi - 3.1).abs() < 1e-12);
    }
}
