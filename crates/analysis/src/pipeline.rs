//! End-to-end pipeline: load, clean, engineer, join, summarize, plot.
//!
//! Every stage takes its inputs from an explicit [`AppConfig`], so callers
//! and tests can point the run at any pair of files.

use crate::chart::render_insights_chart;
use crate::join::{join_sentiment, JoinReport, JoinedRecord};
use crate::metrics::{EngineerReport, MetricEngineer};
use crate::segment::LeverageSegment;
use crate::side::SideMapping;
use crate::summary::{summarize_by_segment, summarize_by_sentiment, SegmentSummary, SentimentSummary};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::{Path, PathBuf};
use trader_sentiment_core::{AppConfig, Result};
use trader_sentiment_data::{CsvStorage, LoadReport, SentimentRecord, TradeRecord};

/// Both input files after cleaning, before any aggregation.
#[derive(Debug, Clone)]
pub struct LoadedInputs {
    pub sentiment: Vec<SentimentRecord>,
    pub sentiment_report: LoadReport,
    pub trades: Vec<TradeRecord>,
    pub trade_report: LoadReport,
}

/// Joined dataset plus the bookkeeping from each stage that produced it.
#[derive(Debug, Clone)]
pub struct PreparedData {
    pub sentiment_report: LoadReport,
    pub trade_report: LoadReport,
    pub engineer_report: EngineerReport,
    pub join_report: JoinReport,
    pub joined: Vec<JoinedRecord>,
}

#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub data: PreparedData,
    pub by_sentiment: Vec<SentimentSummary>,
    pub by_segment: Vec<SegmentSummary>,
    pub chart_path: PathBuf,
}

/// Loads and cleans both files named in `config.paths`.
///
/// # Errors
///
/// Returns an error if either file is missing, lacks a required column or
/// holds an unparseable value.
pub fn load_inputs(config: &AppConfig) -> Result<LoadedInputs> {
    let (sentiment, sentiment_report) =
        CsvStorage::load_sentiment(&config.paths.sentiment_csv, &config.sentiment_columns)?;
    let (trades, trade_report) =
        CsvStorage::load_trades(&config.paths.trades_csv, &config.trade_columns)?;

    Ok(LoadedInputs {
        sentiment,
        sentiment_report,
        trades,
        trade_report,
    })
}

/// Engineers daily trader metrics from already loaded inputs and joins them
/// with sentiment.
///
/// # Errors
///
/// Returns an error if the side mapping rejects a trade.
pub fn prepare_from(config: &AppConfig, inputs: LoadedInputs) -> Result<PreparedData> {
    let engineer = MetricEngineer::new(SideMapping::from_config(&config.sides));
    let (metrics, engineer_report) = engineer.engineer(&inputs.trades)?;

    let (joined, join_report) = join_sentiment(&metrics, &inputs.sentiment);

    Ok(PreparedData {
        sentiment_report: inputs.sentiment_report,
        trade_report: inputs.trade_report,
        engineer_report,
        join_report,
        joined,
    })
}

/// Loads both files, engineers daily trader metrics and joins them with
/// sentiment.
///
/// # Errors
///
/// Returns an error if either file cannot be loaded or the side mapping
/// rejects a trade.
pub fn prepare(config: &AppConfig) -> Result<PreparedData> {
    prepare_from(config, load_inputs(config)?)
}

/// Summarizes already loaded inputs and writes the chart to
/// `config.paths.chart_output`.
///
/// # Errors
///
/// Returns an error if engineering or chart rendering fails.
pub fn analyze_from(config: &AppConfig, inputs: LoadedInputs) -> Result<AnalysisOutcome> {
    let data = prepare_from(config, inputs)?;
    let threshold = config.analysis.leverage_threshold;

    let by_sentiment = summarize_by_sentiment(&data.joined);
    let by_segment = summarize_by_segment(&data.joined, threshold);

    let chart_path = config.paths.chart_output.clone();
    render_insights_chart(&chart_path, &data.joined, threshold)?;

    Ok(AnalysisOutcome {
        data,
        by_sentiment,
        by_segment,
        chart_path,
    })
}

/// Runs the full analysis and writes the chart to `config.paths.chart_output`.
///
/// # Errors
///
/// Returns an error if any stage fails.
pub fn run_analysis(config: &AppConfig) -> Result<AnalysisOutcome> {
    analyze_from(config, load_inputs(config)?)
}

/// One row of the exported joined dataset.
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    date: NaiveDate,
    account: &'a str,
    #[serde(rename = "closedPnL")]
    closed_pnl: Decimal,
    size: Decimal,
    leverage: f64,
    trade_count: usize,
    long_ratio: f64,
    #[serde(rename = "Classification")]
    classification: &'a str,
    #[serde(rename = "Leverage_Segment")]
    leverage_segment: &'static str,
}

/// Runs the pipeline up to the join and writes the joined rows to `output`.
///
/// # Errors
///
/// Returns an error if any stage fails or the CSV cannot be written.
pub fn export_joined(config: &AppConfig, output: &Path) -> Result<PreparedData> {
    let data = prepare(config)?;
    let threshold = config.analysis.leverage_threshold;

    let rows: Vec<ExportRow<'_>> = data
        .joined
        .iter()
        .map(|r| ExportRow {
            date: r.date,
            account: &r.account,
            closed_pnl: r.closed_pnl,
            size: r.size,
            leverage: r.leverage,
            trade_count: r.trade_count,
            long_ratio: r.long_ratio,
            classification: &r.classification,
            leverage_segment: LeverageSegment::classify(r.leverage, threshold).as_str(),
        })
        .collect();

    CsvStorage::write_records(output, &rows)?;
    Ok(data)
}
