//! Loading and cleaning for the trader sentiment pipeline.
//!
//! This crate provides:
//! - Typed models for the daily sentiment series and the trade log
//! - Header-validated CSV loaders that drop incomplete rows
//! - Lenient date parsing for exchange exports
//! - A generic CSV writer for derived datasets

pub mod csv_storage;
pub mod dates;
pub mod models;

pub use csv_storage::{CsvStorage, LoadReport};
pub use dates::{parse_date, parse_timestamp};
pub use models::{SentimentRecord, TradeRecord};
