use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading, cleaning and reporting on the two datasets.
#[derive(Error, Debug)]
pub enum InsightsError {
    /// Input or output file could not be opened, read or written.
    #[error("IO error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed delimited data.
    #[error("CSV error in {}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Required column absent from the header row.
    #[error("{}: missing required column '{column}'", file.display())]
    MissingColumn { file: PathBuf, column: String },

    #[error("{}: row {row}: cannot parse '{value}' in column '{column}' as a date", file.display())]
    InvalidDate {
        file: PathBuf,
        row: usize,
        column: String,
        value: String,
    },

    #[error("{}: row {row}: cannot parse '{value}' in column '{column}' as a number", file.display())]
    InvalidNumber {
        file: PathBuf,
        row: usize,
        column: String,
        value: String,
    },

    /// Side value matched neither alias list under the `error` policy.
    #[error("row {row}: unrecognized trade side '{value}'")]
    UnrecognizedSide { row: usize, value: String },

    #[error("chart rendering failed: {0}")]
    Chart(String),

    #[error("configuration error: {0}")]
    Config(Box<figment::Error>),
}

impl From<figment::Error> for InsightsError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl InsightsError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, InsightsError>;
