//! Per-trader daily metrics.
//!
//! Trades are grouped by (calendar day, account). Each group yields summed
//! PnL and size, mean leverage, a trade count and the share of long trades.

use crate::side::{SideClass, SideMapping};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use trader_sentiment_core::{InsightsError, Result, UnknownSidePolicy};
use trader_sentiment_data::TradeRecord;

/// Aggregates for one account on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTraderMetric {
    pub date: NaiveDate,
    pub account: String,
    /// Sum of realized PnL
    pub closed_pnl: Decimal,
    /// Sum of position sizes; trades without a size contribute nothing
    pub size: Decimal,
    /// Mean leverage across the day's trades
    pub leverage: f64,
    pub trade_count: usize,
    /// Share of long trades in [0, 1]
    pub long_ratio: f64,
}

/// Counters from one metric engineering pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineerReport {
    pub trades: usize,
    pub groups: usize,
    /// Trades whose side matched neither alias list
    pub unknown_sides: usize,
}

#[derive(Default)]
struct GroupAccumulator {
    closed_pnl: Decimal,
    size: Decimal,
    leverage_sum: f64,
    trade_count: usize,
    long_trades: usize,
    sided_trades: usize,
}

impl GroupAccumulator {
    #[allow(clippy::cast_precision_loss)]
    fn finish(self, date: NaiveDate, account: String) -> DailyTraderMetric {
        let long_ratio = if self.sided_trades == 0 {
            0.0
        } else {
            self.long_trades as f64 / self.sided_trades as f64
        };

        DailyTraderMetric {
            date,
            account,
            closed_pnl: self.closed_pnl,
            size: self.size,
            leverage: self.leverage_sum / self.trade_count as f64,
            trade_count: self.trade_count,
            long_ratio,
        }
    }
}

pub struct MetricEngineer {
    sides: SideMapping,
}

impl MetricEngineer {
    #[must_use]
    pub fn new(sides: SideMapping) -> Self {
        Self { sides }
    }

    /// Groups cleaned trades into daily per-account metrics, ordered by
    /// (date, account).
    ///
    /// Unknown sides count as short, are left out of the long ratio, or fail
    /// the pass, depending on the mapping's policy.
    ///
    /// # Errors
    ///
    /// Returns `UnrecognizedSide` under the `error` policy. `row` is the
    /// 1-based position of the trade in `trades`.
    pub fn engineer(&self, trades: &[TradeRecord]) -> Result<(Vec<DailyTraderMetric>, EngineerReport)> {
        let mut groups: BTreeMap<(NaiveDate, String), GroupAccumulator> = BTreeMap::new();
        let mut report = EngineerReport {
            trades: trades.len(),
            ..EngineerReport::default()
        };

        for (i, trade) in trades.iter().enumerate() {
            let group = groups
                .entry((trade.date(), trade.account.clone()))
                .or_default();

            group.closed_pnl += trade.closed_pnl;
            if let Some(size) = trade.size {
                group.size += size;
            }
            group.leverage_sum += trade.leverage;
            group.trade_count += 1;

            match self.sides.classify(trade.side.as_deref()) {
                SideClass::Long => {
                    group.long_trades += 1;
                    group.sided_trades += 1;
                }
                SideClass::Short => group.sided_trades += 1,
                SideClass::Unknown => {
                    report.unknown_sides += 1;
                    match self.sides.policy() {
                        UnknownSidePolicy::Short => group.sided_trades += 1,
                        UnknownSidePolicy::Skip => {}
                        UnknownSidePolicy::Error => {
                            return Err(InsightsError::UnrecognizedSide {
                                row: i + 1,
                                value: trade.side.clone().unwrap_or_default(),
                            });
                        }
                    }
                }
            }
        }

        let metrics: Vec<DailyTraderMetric> = groups
            .into_iter()
            .map(|((date, account), group)| group.finish(date, account))
            .collect();
        report.groups = metrics.len();

        if report.unknown_sides > 0 {
            tracing::warn!(
                "{} trade(s) had an unrecognized side; policy {:?} applied",
                report.unknown_sides,
                self.sides.policy()
            );
        }
        tracing::info!(
            "Engineered {} daily trader rows from {} trades",
            report.groups,
            report.trades
        );

        Ok((metrics, report))
    }
}

impl Default for MetricEngineer {
    fn default() -> Self {
        Self::new(SideMapping::default())
    }
}
