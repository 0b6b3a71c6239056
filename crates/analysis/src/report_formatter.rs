#![allow(clippy::format_push_string)]
#![allow(clippy::uninlined_format_args)]

use crate::join::JoinReport;
use crate::summary::{SegmentSummary, SentimentSummary};
use trader_sentiment_data::LoadReport;

pub struct ReportFormatter;

impl ReportFormatter {
    /// One line per input file: `<label> Data: <rows> rows, <cols> cols`.
    #[must_use]
    pub fn format_shape(label: &str, report: &LoadReport) -> String {
        format!("{} Data: {} rows, {} cols", label, report.rows, report.columns)
    }

    #[must_use]
    pub fn format_sentiment_summary(summary: &[SentimentSummary]) -> String {
        let mut output = String::new();

        output.push_str("\n--- Summary Stats by Sentiment ---\n");
        let width = label_width(summary.iter().map(|s| s.classification.as_str()), "Classification");
        output.push_str(&format!(
            "{:<width$}  {:>14}  {:>12}  {:>10}  {:>6}\n",
            "Classification",
            "closedPnL",
            "trade_count",
            "leverage",
            "rows",
            width = width
        ));

        if summary.is_empty() {
            output.push_str("(no rows matched a sentiment date)\n");
            return output;
        }

        for row in summary {
            output.push_str(&format!(
                "{:<width$}  {:>14.6}  {:>12.6}  {:>10.6}  {:>6}\n",
                row.classification,
                row.mean_closed_pnl,
                row.mean_trade_count,
                row.mean_leverage,
                row.rows,
                width = width
            ));
        }

        output
    }

    #[must_use]
    pub fn format_segment_summary(summary: &[SegmentSummary]) -> String {
        let mut output = String::new();

        output.push_str("\n--- Average PnL by Leverage Segment ---\n");
        for row in summary {
            output.push_str(&format!(
                "{:<14}  {:>14.6}  ({} rows)\n",
                row.segment.as_str(),
                row.mean_closed_pnl,
                row.rows
            ));
        }

        output
    }

    /// Short note on rows lost to the sentiment join. Empty when nothing was dropped.
    #[must_use]
    pub fn format_join_note(report: &JoinReport) -> String {
        if report.unmatched_rows == 0 {
            return String::new();
        }
        format!(
            "Note: {} of {} daily trader rows ({:.1}%) had no sentiment label and were excluded.",
            report.unmatched_rows,
            report.metric_rows,
            report.dropped_fraction() * 100.0
        )
    }

    #[must_use]
    pub fn format_completion(chart_path: &str) -> String {
        format!(
            "\nAnalysis Complete. Check '{}' for visualizations.",
            chart_path
        )
    }
}

fn label_width<'a>(labels: impl Iterator<Item = &'a str>, header: &str) -> usize {
    labels
        .map(str::len)
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0)
}
