//! Two-panel insights chart.
//!
//! Left: mean closed PnL per sentiment label, one bar per leverage segment.
//! Right: trade count distribution per sentiment label as box plots.
//! Rendered as SVG so no system fonts are needed.

use crate::join::JoinedRecord;
use crate::segment::LeverageSegment;
use crate::summary::{pnl_by_sentiment_and_segment, trade_count_distribution, SegmentPnl};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::collections::BTreeMap;
use std::ops::Range;
use std::path::Path;
use trader_sentiment_core::{InsightsError, Result};

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 600;
const CAPTION_FONT: (&str, u32) = ("sans-serif", 20);
const GROUP_WIDTH: f64 = 0.8;
const SEGMENT_COLORS: [RGBColor; 2] = [RGBColor(221, 132, 82), RGBColor(76, 114, 176)];

fn chart_error<E: std::fmt::Display>(err: E) -> InsightsError {
    InsightsError::Chart(err.to_string())
}

/// Renders both panels to `path`, overwriting any existing file.
///
/// # Errors
///
/// Returns `InsightsError::Chart` if drawing or writing the SVG fails.
pub fn render_insights_chart(
    path: &Path,
    rows: &[JoinedRecord],
    leverage_threshold: f64,
) -> Result<()> {
    let pnl = pnl_by_sentiment_and_segment(rows, leverage_threshold);
    let trade_counts = trade_count_distribution(rows);
    let labels: Vec<String> = trade_counts.keys().cloned().collect();

    let root = SVGBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_error)?;

    let panels = root.split_evenly((1, 2));
    draw_pnl_panel(&panels[0], &labels, &pnl)?;
    draw_trade_count_panel(&panels[1], &labels, &trade_counts)?;

    root.present().map_err(chart_error)?;
    tracing::info!("Chart written to {}", path.display());
    Ok(())
}

fn draw_pnl_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    labels: &[String],
    pnl: &[SegmentPnl],
) -> Result<()> {
    let y_range = padded_range(pnl.iter().map(|cell| cell.mean_closed_pnl));

    let mut chart = ChartBuilder::on(area)
        .caption("Average PnL: Sentiment & Leverage", CAPTION_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(category_axis(labels), y_range)
        .map_err(chart_error)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len().max(1))
        .x_label_formatter(&|x| category_label(labels, *x))
        .x_desc("Classification")
        .y_desc("closedPnL")
        .draw()
        .map_err(chart_error)?;

    #[allow(clippy::cast_precision_loss)]
    let bar_width = GROUP_WIDTH / LeverageSegment::ALL.len() as f64;
    let group_start = -GROUP_WIDTH / 2.0;

    for (slot, segment) in LeverageSegment::ALL.iter().enumerate() {
        let color = SEGMENT_COLORS[slot];
        #[allow(clippy::cast_precision_loss)]
        let offset = group_start + bar_width * slot as f64;

        let bars: Vec<Rectangle<(f64, f64)>> = pnl
            .iter()
            .filter(|cell| cell.segment == *segment)
            .filter_map(|cell| {
                #[allow(clippy::cast_precision_loss)]
                let index = labels.iter().position(|l| *l == cell.classification)? as f64;
                let x0 = index + offset;
                Some(Rectangle::new(
                    [(x0, 0.0), (x0 + bar_width, cell.mean_closed_pnl)],
                    color.filled(),
                ))
            })
            .collect();

        chart
            .draw_series(bars)
            .map_err(chart_error)?
            .label(segment.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(chart_error)?;

    Ok(())
}

fn draw_trade_count_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    labels: &[String],
    trade_counts: &BTreeMap<String, Vec<f64>>,
) -> Result<()> {
    let max_count = trade_counts
        .values()
        .flatten()
        .copied()
        .fold(0.0_f64, f64::max);
    #[allow(clippy::cast_possible_truncation)]
    let y_max = (max_count * 1.1 + 1.0) as f32;

    let mut chart = ChartBuilder::on(area)
        .caption("Trade Frequency by Sentiment", CAPTION_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(category_axis(labels), 0.0_f32..y_max)
        .map_err(chart_error)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len().max(1))
        .x_label_formatter(&|x| category_label(labels, *x))
        .x_desc("Classification")
        .y_desc("trade_count")
        .draw()
        .map_err(chart_error)?;

    chart
        .draw_series(labels.iter().enumerate().filter_map(|(i, label)| {
            let values = trade_counts.get(label).filter(|v| !v.is_empty())?;
            #[allow(clippy::cast_precision_loss)]
            let center = i as f64;
            Some(
                Boxplot::new_vertical(center, &Quartiles::new(values.as_slice()))
                    .width(30)
                    .whisker_width(0.5)
                    .style(SEGMENT_COLORS[1]),
            )
        }))
        .map_err(chart_error)?;
    Ok(())
}

/// Category `i` is centred on `x = i` and spans `[i - 0.5, i + 0.5)`.
#[allow(clippy::cast_precision_loss)]
fn category_axis(labels: &[String]) -> Range<f64> {
    -0.5..labels.len().max(1) as f64 - 0.5
}

/// Only ticks sitting on a category centre get a label.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn category_label(labels: &[String], x: f64) -> String {
    let index = x.round();
    if index < 0.0 || (x - index).abs() > 1e-6 {
        return String::new();
    }
    labels.get(index as usize).cloned().unwrap_or_default()
}

/// Value range that always includes zero, padded by 10% of its span.
fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (low, high) = values.fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let pad = ((high - low) * 0.1).max(1.0);
    let low = if low < 0.0 { low - pad } else { 0.0 };
    let high = if high > 0.0 { high + pad } else { 1.0 };
    low..high
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn row(classification: &str, leverage: f64, trade_count: usize) -> JoinedRecord {
        JoinedRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            account: "A".to_string(),
            closed_pnl: dec!(-3.5),
            size: dec!(10),
            leverage,
            trade_count,
            long_ratio: 1.0,
            classification: classification.to_string(),
        }
    }

    #[test]
    fn writes_svg_with_both_panels() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("insights_chart.svg");
        let rows = vec![row("Fear", 12.5, 2), row("Greed", 2.0, 1), row("Greed", 4.0, 7)];

        render_insights_chart(&path, &rows, 10.0).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Trade Frequency by Sentiment"));
        assert!(svg.contains("High Leverage"));
        assert!(svg.contains("Greed"));
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chart.svg");
        std::fs::write(&path, "stale").unwrap();

        render_insights_chart(&path, &[row("Fear", 1.0, 1)], 10.0).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(!svg.contains("stale"));
    }

    #[test]
    fn empty_rows_still_render() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.svg");

        render_insights_chart(&path, &[], 10.0).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn category_labels_only_on_centres() {
        let labels = vec!["Fear".to_string(), "Greed".to_string()];
        assert_eq!(category_label(&labels, 0.0), "Fear");
        assert_eq!(category_label(&labels, 1.0), "Greed");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, 2.0), "");
        assert_eq!(category_label(&labels, -1.0), "");
    }

    #[test]
    fn category_axis_centres_each_label() {
        let labels = vec!["Fear".to_string(), "Greed".to_string(), "Neutral".to_string()];
        let axis = category_axis(&labels);
        assert!((axis.start + 0.5).abs() < f64::EPSILON);
        assert!((axis.end - 2.5).abs() < f64::EPSILON);

        let axis = category_axis(&[]);
        assert!((axis.end - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn padded_range_includes_zero() {
        let range = padded_range([5.0, 10.0].into_iter());
        assert!(range.start.abs() < f64::EPSILON);
        assert!(range.end > 10.0);

        let range = padded_range([-4.0, 2.0].into_iter());
        assert!(range.start < -4.0);
        assert!(range.end > 2.0);

        let range = padded_range(std::iter::empty());
        assert!(range.start.abs() < f64::EPSILON);
        assert!((range.end - 1.0).abs() < f64::EPSILON);
    }
}
