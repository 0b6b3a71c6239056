//! Trade execution model.
//!
//! One row of an exchange fill export after cleaning.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A cleaned trade record.
///
/// `account`, `closed_pnl`, `leverage` and `timestamp` are always present;
/// rows missing any of them are dropped at load time. The other fields are
/// kept as exported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Execution time as exported (wall clock, no offset)
    pub timestamp: NaiveDateTime,
    /// Account identifier (wallet address for Hyperliquid)
    pub account: String,
    /// Traded coin or market
    pub symbol: Option<String>,
    /// Raw side string, interpreted later by the side mapping
    pub side: Option<String>,
    /// Position size in quote currency
    pub size: Option<Decimal>,
    /// Notional / margin ratio
    pub leverage: f64,
    /// Realized PnL in quote currency
    pub closed_pnl: Decimal,
}

impl TradeRecord {
    /// Calendar day of execution, used as the join key.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn date_truncates_timestamp() {
        let trade = TradeRecord {
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(23, 59, 59)
                .unwrap(),
            account: "0xabc".to_string(),
            symbol: Some("BTC".to_string()),
            side: Some("long".to_string()),
            size: Some(dec!(100)),
            leverage: 5.0,
            closed_pnl: dec!(10),
        };

        assert_eq!(trade.date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }
}
