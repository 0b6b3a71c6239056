use crate::dates::{parse_date, parse_timestamp};
use crate::models::{SentimentRecord, TradeRecord};
use csv::{ReaderBuilder, StringRecord, Trim, Writer};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;
use trader_sentiment_core::{InsightsError, Result, SentimentColumns, TradeColumns};

/// Cell values treated as missing, in addition to blank cells.
const MISSING_MARKERS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-nan", "null", "NULL", "None", "#N/A", "<NA>",
];

/// Returns true if a raw CSV cell counts as a missing value.
#[must_use]
pub(crate) fn is_missing(field: &str) -> bool {
    MISSING_MARKERS.contains(&field.trim())
}

/// Shape and cleaning summary for one loaded file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Data rows read, before cleaning
    pub rows: usize,
    /// Columns in the header row
    pub columns: usize,
    /// Rows that survived cleaning
    pub kept: usize,
    /// Rows dropped for a missing required value
    pub dropped_incomplete: usize,
    /// Trade rows dropped because the timestamp was blank
    pub dropped_missing_time: usize,
    /// Sentiment rows dropped because their date was already seen
    pub dropped_duplicates: usize,
}

impl LoadReport {
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.dropped_incomplete + self.dropped_missing_time + self.dropped_duplicates
    }
}

/// Header positions of the trade columns.
struct TradeIndex {
    time: usize,
    account: usize,
    closed_pnl: usize,
    leverage: usize,
    size: usize,
    symbol: usize,
    side: usize,
}

impl TradeIndex {
    fn locate(headers: &StringRecord, columns: &TradeColumns, path: &Path) -> Result<Self> {
        Ok(Self {
            time: column_index(headers, &columns.time, path)?,
            account: column_index(headers, &columns.account, path)?,
            closed_pnl: column_index(headers, &columns.closed_pnl, path)?,
            leverage: column_index(headers, &columns.leverage, path)?,
            size: column_index(headers, &columns.size, path)?,
            symbol: column_index(headers, &columns.symbol, path)?,
            side: column_index(headers, &columns.side, path)?,
        })
    }
}

pub struct CsvStorage;

impl CsvStorage {
    /// Loads the daily sentiment series.
    ///
    /// Rows with a missing value in any column are dropped. When a date
    /// repeats, the first row wins.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, a configured column is
    /// absent, or a date cannot be parsed
    pub fn load_sentiment(
        path: &Path,
        columns: &SentimentColumns,
    ) -> Result<(Vec<SentimentRecord>, LoadReport)> {
        let mut reader = open_reader(path)?;
        let headers = reader
            .headers()
            .map_err(|e| InsightsError::csv(path, e))?
            .clone();

        let date_idx = column_index(&headers, &columns.date, path)?;
        let class_idx = column_index(&headers, &columns.classification, path)?;

        let mut report = LoadReport {
            columns: headers.len(),
            ..LoadReport::default()
        };
        let mut seen = HashSet::new();
        let mut records = Vec::new();

        for result in reader.records() {
            let record = result.map_err(|e| InsightsError::csv(path, e))?;
            report.rows += 1;

            if record.len() < headers.len() || record.iter().any(is_missing) {
                report.dropped_incomplete += 1;
                continue;
            }

            let raw_date = &record[date_idx];
            let date = parse_date(raw_date).ok_or_else(|| InsightsError::InvalidDate {
                file: path.to_path_buf(),
                row: line_of(&record),
                column: columns.date.clone(),
                value: raw_date.to_string(),
            })?;

            if !seen.insert(date) {
                report.dropped_duplicates += 1;
                tracing::debug!("Duplicate sentiment date {} at line {}", date, line_of(&record));
                continue;
            }

            records.push(SentimentRecord::new(date, &record[class_idx]));
        }

        report.kept = records.len();
        if report.dropped_duplicates > 0 {
            tracing::warn!(
                "Dropped {} duplicate sentiment date(s) from {}",
                report.dropped_duplicates,
                path.display()
            );
        }
        tracing::info!(
            "Loaded {} sentiment rows from {} ({} kept, {} dropped)",
            report.rows,
            path.display(),
            report.kept,
            report.dropped()
        );

        Ok((records, report))
    }

    /// Loads the trade execution log.
    ///
    /// Rows missing the closed PnL, leverage or account are dropped, as are
    /// rows with a blank timestamp. Missing size, symbol or side are kept.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, a configured column is
    /// absent, or a timestamp or numeric field cannot be parsed
    pub fn load_trades(
        path: &Path,
        columns: &TradeColumns,
    ) -> Result<(Vec<TradeRecord>, LoadReport)> {
        let mut reader = open_reader(path)?;
        let headers = reader
            .headers()
            .map_err(|e| InsightsError::csv(path, e))?
            .clone();

        let idx = TradeIndex::locate(&headers, columns, path)?;

        let mut report = LoadReport {
            columns: headers.len(),
            ..LoadReport::default()
        };
        let mut trades = Vec::new();

        for result in reader.records() {
            let record = result.map_err(|e| InsightsError::csv(path, e))?;
            report.rows += 1;

            let (Some(account), Some(raw_pnl), Some(raw_leverage)) = (
                present(&record, idx.account),
                present(&record, idx.closed_pnl),
                present(&record, idx.leverage),
            ) else {
                report.dropped_incomplete += 1;
                continue;
            };

            let Some(raw_time) = present(&record, idx.time) else {
                report.dropped_missing_time += 1;
                continue;
            };

            let row = line_of(&record);
            let number_error = |column: &str, value: &str| InsightsError::InvalidNumber {
                file: path.to_path_buf(),
                row,
                column: column.to_string(),
                value: value.to_string(),
            };

            let timestamp = parse_timestamp(raw_time).ok_or_else(|| InsightsError::InvalidDate {
                file: path.to_path_buf(),
                row,
                column: columns.time.clone(),
                value: raw_time.to_string(),
            })?;
            let closed_pnl =
                parse_decimal(raw_pnl).ok_or_else(|| number_error(&columns.closed_pnl, raw_pnl))?;
            let leverage = raw_leverage
                .parse::<f64>()
                .ok()
                .filter(|l| l.is_finite())
                .ok_or_else(|| number_error(&columns.leverage, raw_leverage))?;
            let size = present(&record, idx.size)
                .map(|raw| parse_decimal(raw).ok_or_else(|| number_error(&columns.size, raw)))
                .transpose()?;

            trades.push(TradeRecord {
                timestamp,
                account: account.to_string(),
                symbol: present(&record, idx.symbol).map(str::to_string),
                side: present(&record, idx.side).map(str::to_string),
                size,
                leverage,
                closed_pnl,
            });
        }

        report.kept = trades.len();
        if report.dropped_missing_time > 0 {
            tracing::warn!(
                "Dropped {} trade row(s) with no timestamp from {}",
                report.dropped_missing_time,
                path.display()
            );
        }
        tracing::info!(
            "Loaded {} trade rows from {} ({} kept, {} dropped)",
            report.rows,
            path.display(),
            report.kept,
            report.dropped()
        );

        Ok((trades, report))
    }

    /// Writes serializable records to a CSV file with a header row.
    ///
    /// An existing file is overwritten.
    ///
    /// # Errors
    /// Returns error if file cannot be created or writing fails
    pub fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
        let file = File::create(path).map_err(|e| InsightsError::io(path, e))?;
        let mut writer = Writer::from_writer(file);

        for record in records {
            writer
                .serialize(record)
                .map_err(|e| InsightsError::csv(path, e))?;
        }

        writer.flush().map_err(|e| InsightsError::io(path, e))?;
        tracing::info!("Wrote {} rows to {}", records.len(), path.display());
        Ok(())
    }
}

fn open_reader(path: &Path) -> Result<csv::Reader<File>> {
    let file = File::open(path).map_err(|e| InsightsError::io(path, e))?;
    Ok(ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(file))
}

fn column_index(headers: &StringRecord, name: &str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| InsightsError::MissingColumn {
            file: path.to_path_buf(),
            column: name.to_string(),
        })
}

fn present(record: &StringRecord, idx: usize) -> Option<&str> {
    record.get(idx).filter(|v| !is_missing(v))
}

fn line_of(record: &StringRecord) -> usize {
    record
        .position()
        .map_or(0, |p| usize::try_from(p.line()).unwrap_or(usize::MAX))
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}
