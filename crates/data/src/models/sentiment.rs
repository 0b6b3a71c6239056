//! Daily market sentiment model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of the Fear & Greed series.
///
/// Unique by `date` after loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentRecord {
    /// Calendar day the label applies to
    pub date: NaiveDate,
    /// Label such as "Fear", "Extreme Greed"
    pub classification: String,
}

impl SentimentRecord {
    pub fn new(date: NaiveDate, classification: impl Into<String>) -> Self {
        Self {
            date,
            classification: classification.into(),
        }
    }
}
