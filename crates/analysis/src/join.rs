//! Inner join of daily trader metrics with the sentiment series.

use crate::metrics::DailyTraderMetric;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use trader_sentiment_data::SentimentRecord;

/// A daily trader row with that day's sentiment label attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedRecord {
    pub date: NaiveDate,
    pub account: String,
    pub closed_pnl: Decimal,
    pub size: Decimal,
    pub leverage: f64,
    pub trade_count: usize,
    pub long_ratio: f64,
    pub classification: String,
}

impl JoinedRecord {
    fn from_metric(metric: &DailyTraderMetric, classification: &str) -> Self {
        Self {
            date: metric.date,
            account: metric.account.clone(),
            closed_pnl: metric.closed_pnl,
            size: metric.size,
            leverage: metric.leverage,
            trade_count: metric.trade_count,
            long_ratio: metric.long_ratio,
            classification: classification.to_string(),
        }
    }
}

/// Row accounting for one join.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinReport {
    pub metric_rows: usize,
    pub joined_rows: usize,
    /// Metric rows whose date had no sentiment label
    pub unmatched_rows: usize,
    /// Distinct trading days with no sentiment label
    pub unmatched_dates: usize,
}

impl JoinReport {
    /// Fraction of metric rows lost to the join, 0.0 when there were none.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn dropped_fraction(&self) -> f64 {
        if self.metric_rows == 0 {
            return 0.0;
        }
        self.unmatched_rows as f64 / self.metric_rows as f64
    }
}

/// Joins metrics with sentiment on date, keeping only rows that match on
/// both sides. Output preserves metric order. If `sentiment` repeats a
/// date, the first label is used.
#[must_use]
pub fn join_sentiment(
    metrics: &[DailyTraderMetric],
    sentiment: &[SentimentRecord],
) -> (Vec<JoinedRecord>, JoinReport) {
    let mut labels: HashMap<NaiveDate, &str> = HashMap::with_capacity(sentiment.len());
    for record in sentiment {
        labels
            .entry(record.date)
            .or_insert(record.classification.as_str());
    }

    let mut joined = Vec::with_capacity(metrics.len());
    let mut unmatched_dates = BTreeSet::new();

    for metric in metrics {
        match labels.get(&metric.date) {
            Some(classification) => joined.push(JoinedRecord::from_metric(metric, classification)),
            None => {
                unmatched_dates.insert(metric.date);
            }
        }
    }

    let report = JoinReport {
        metric_rows: metrics.len(),
        joined_rows: joined.len(),
        unmatched_rows: metrics.len() - joined.len(),
        unmatched_dates: unmatched_dates.len(),
    };

    if report.unmatched_rows > 0 {
        tracing::warn!(
            "Join dropped {} of {} daily trader rows ({:.1}%) across {} date(s) without sentiment",
            report.unmatched_rows,
            report.metric_rows,
            report.dropped_fraction() * 100.0,
            report.unmatched_dates
        );
    }
    tracing::info!("Joined {} daily trader rows with sentiment", report.joined_rows);

    (joined, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn metric(d: u32, account: &str) -> DailyTraderMetric {
        DailyTraderMetric {
            date: day(d),
            account: account.to_string(),
            closed_pnl: dec!(1),
            size: dec!(10),
            leverage: 3.0,
            trade_count: 1,
            long_ratio: 1.0,
        }
    }

    #[test]
    fn keeps_only_matching_dates() {
        let metrics = vec![metric(1, "A"), metric(2, "A"), metric(3, "B")];
        let sentiment = vec![
            SentimentRecord::new(day(1), "Fear"),
            SentimentRecord::new(day(3), "Greed"),
            SentimentRecord::new(day(4), "Neutral"),
        ];

        let (joined, report) = join_sentiment(&metrics, &sentiment);

        let dates: BTreeSet<NaiveDate> = joined.iter().map(|r| r.date).collect();
        let metric_dates: BTreeSet<NaiveDate> = metrics.iter().map(|m| m.date).collect();
        let sentiment_dates: BTreeSet<NaiveDate> = sentiment.iter().map(|s| s.date).collect();
        let expected: BTreeSet<NaiveDate> =
            metric_dates.intersection(&sentiment_dates).copied().collect();

        assert_eq!(dates, expected);
        assert_eq!(joined[0].classification, "Fear");
        assert_eq!(joined[1].classification, "Greed");
        assert_eq!(report.metric_rows, 3);
        assert_eq!(report.joined_rows, 2);
        assert_eq!(report.unmatched_rows, 1);
        assert_eq!(report.unmatched_dates, 1);
    }

    #[test]
    fn never_duplicates_rows() {
        let metrics = vec![metric(1, "A"), metric(1, "B")];
        let sentiment = vec![
            SentimentRecord::new(day(1), "Fear"),
            SentimentRecord::new(day(1), "Greed"),
        ];

        let (joined, _) = join_sentiment(&metrics, &sentiment);

        assert_eq!(joined.len(), 2);
        assert!(joined.iter().all(|r| r.classification == "Fear"));
    }

    #[test]
    fn no_overlap_yields_empty_join() {
        let (joined, report) =
            join_sentiment(&[metric(5, "A")], &[SentimentRecord::new(day(1), "Fear")]);

        assert!(joined.is_empty());
        assert!((report.dropped_fraction() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn dropped_fraction_handles_empty_input() {
        let (_, report) = join_sentiment(&[], &[]);
        assert!(report.dropped_fraction().abs() < f64::EPSILON);
    }
}
