//! Grouped descriptive statistics over joined rows.

use crate::join::JoinedRecord;
use crate::segment::LeverageSegment;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Means of the daily trader rows sharing one sentiment label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub classification: String,
    pub rows: usize,
    pub mean_closed_pnl: f64,
    pub mean_trade_count: f64,
    pub mean_leverage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSummary {
    pub segment: LeverageSegment,
    pub rows: usize,
    pub mean_closed_pnl: f64,
}

/// Mean PnL for one (sentiment, leverage segment) cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentPnl {
    pub classification: String,
    pub segment: LeverageSegment,
    pub rows: usize,
    pub mean_closed_pnl: f64,
}

#[derive(Default)]
struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    #[allow(clippy::cast_precision_loss)]
    fn value(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

fn pnl_of(row: &JoinedRecord) -> f64 {
    row.closed_pnl.to_f64().unwrap_or(0.0)
}

/// Mean PnL, trade count and leverage per classification, ordered by label.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summarize_by_sentiment(rows: &[JoinedRecord]) -> Vec<SentimentSummary> {
    let mut groups: BTreeMap<&str, (Mean, Mean, Mean)> = BTreeMap::new();

    for row in rows {
        let (pnl, count, leverage) = groups.entry(row.classification.as_str()).or_default();
        pnl.push(pnl_of(row));
        count.push(row.trade_count as f64);
        leverage.push(row.leverage);
    }

    groups
        .into_iter()
        .map(|(classification, (pnl, count, leverage))| SentimentSummary {
            classification: classification.to_string(),
            rows: pnl.count,
            mean_closed_pnl: pnl.value(),
            mean_trade_count: count.value(),
            mean_leverage: leverage.value(),
        })
        .collect()
}

/// Mean PnL per leverage segment. Segments with no rows are omitted.
#[must_use]
pub fn summarize_by_segment(rows: &[JoinedRecord], leverage_threshold: f64) -> Vec<SegmentSummary> {
    let mut groups: BTreeMap<LeverageSegment, Mean> = BTreeMap::new();

    for row in rows {
        groups
            .entry(LeverageSegment::classify(row.leverage, leverage_threshold))
            .or_default()
            .push(pnl_of(row));
    }

    groups
        .into_iter()
        .map(|(segment, pnl)| SegmentSummary {
            segment,
            rows: pnl.count,
            mean_closed_pnl: pnl.value(),
        })
        .collect()
}

/// Mean PnL per (classification, segment), ordered by label then segment.
#[must_use]
pub fn pnl_by_sentiment_and_segment(
    rows: &[JoinedRecord],
    leverage_threshold: f64,
) -> Vec<SegmentPnl> {
    let mut groups: BTreeMap<(&str, LeverageSegment), Mean> = BTreeMap::new();

    for row in rows {
        let segment = LeverageSegment::classify(row.leverage, leverage_threshold);
        groups
            .entry((row.classification.as_str(), segment))
            .or_default()
            .push(pnl_of(row));
    }

    groups
        .into_iter()
        .map(|((classification, segment), pnl)| SegmentPnl {
            classification: classification.to_string(),
            segment,
            rows: pnl.count,
            mean_closed_pnl: pnl.value(),
        })
        .collect()
}

/// Trade counts of every joined row, grouped by classification.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn trade_count_distribution(rows: &[JoinedRecord]) -> BTreeMap<String, Vec<f64>> {
    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for row in rows {
        groups
            .entry(row.classification.clone())
            .or_default()
            .push(row.trade_count as f64);
    }
    groups
}
