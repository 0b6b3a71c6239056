//! Trader behaviour analysis against daily market sentiment.
//!
//! Trades are rolled up into per-account daily metrics, joined with the
//! Fear & Greed series on date, summarized by sentiment and leverage
//! segment, and plotted.

pub mod chart;
pub mod join;
pub mod metrics;
pub mod pipeline;
pub mod report_formatter;
pub mod segment;
pub mod side;
pub mod summary;

pub use chart::render_insights_chart;
pub use join::{join_sentiment, JoinReport, JoinedRecord};
pub use metrics::{DailyTraderMetric, EngineerReport, MetricEngineer};
pub use pipeline::{
    analyze_from, export_joined, load_inputs, prepare, prepare_from, run_analysis, AnalysisOutcome,
    LoadedInputs, PreparedData,
};
pub use report_formatter::ReportFormatter;
pub use segment::LeverageSegment;
pub use side::{SideClass, SideMapping};
pub use summary::{
    pnl_by_sentiment_and_segment, summarize_by_segment, summarize_by_sentiment,
    trade_count_distribution, SegmentPnl, SegmentSummary, SentimentSummary,
};
