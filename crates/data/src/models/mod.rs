//! Data models for the sentiment series and the trade log.
//!
//! Money-valued fields use `rust_decimal::Decimal` so that daily sums are exact.

pub mod sentiment;
pub mod trade;

pub use sentiment::SentimentRecord;
pub use trade::TradeRecord;
