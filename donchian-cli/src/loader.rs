//! Bar loading from CSV and data quality checks.
//!
//! Expected header: `timestamp,open,high,low,close,volume`, with an optional
//! `symbol` column. Rows without a symbol take the file stem. The channel
//! itself never validates bars; [`check_bars`] exists so the CLI can warn
//! before feeding them.

use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use donchian_core::domain::Bar;
use serde::Deserialize;
use thiserror::Error;

/// Errors from the data loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error at row {row}: {source}")]
    Csv {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("unrecognized timestamp '{value}' at row {row}")]
    Timestamp { row: usize, value: String },
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    symbol: Option<String>,
    timestamp: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    #[serde(default)]
    volume: u64,
}

const TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parse a bar timestamp. Bare dates map to midnight.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Load bars from a CSV file. The file stem is the fallback symbol.
pub fn load_bars(path: &Path) -> Result<Vec<Bar>, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let symbol = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    read_bars(file, &symbol)
}

/// Read bars from any CSV source, in file order.
pub fn read_bars<R: Read>(reader: R, default_symbol: &str) -> Result<Vec<Bar>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut bars = Vec::new();

    for (i, record) in csv_reader.deserialize::<CsvRow>().enumerate() {
        // Row 1 is the header.
        let row = i + 2;
        let record = record.map_err(|source| LoadError::Csv { row, source })?;
        let timestamp = parse_timestamp(&record.timestamp).ok_or_else(|| LoadError::Timestamp {
            row,
            value: record.timestamp.clone(),
        })?;
        bars.push(Bar {
            symbol: record
                .symbol
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| default_symbol.to_string()),
            timestamp,
            open: record.open,
            high: record.high,
            low: record.low,
            close: record.close,
            volume: record.volume,
        });
    }

    Ok(bars)
}

/// Data quality findings, as bar indices into the loaded slice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataReport {
    pub total: usize,
    /// Bars with a NaN price.
    pub void: Vec<usize>,
    /// Non-void bars failing the OHLC ordering check.
    pub insane: Vec<usize>,
    /// Bars whose timestamp is not after the previous bar's.
    pub out_of_order: Vec<usize>,
}

impl DataReport {
    pub fn is_clean(&self) -> bool {
        self.void.is_empty() && self.insane.is_empty() && self.out_of_order.is_empty()
    }
}

pub fn check_bars(bars: &[Bar]) -> DataReport {
    let mut report = DataReport {
        total: bars.len(),
        ..DataReport::default()
    };
    for (i, bar) in bars.iter().enumerate() {
        if bar.is_void() {
            report.void.push(i);
        } else if !bar.is_sane() {
            report.insane.push(i);
        }
        if i > 0 && bar.timestamp <= bars[i - 1].timestamp {
            report.out_of_order.push(i);
        }
    }
    report
}

/// Remove void bars (any NaN price) before they reach an indicator. A NaN
/// inside a rolling window poisons the extremum in a position-dependent way.
/// Returns the dropped bars' original indices.
pub fn drop_void_bars(bars: &mut Vec<Bar>) -> Vec<usize> {
    let mut dropped = Vec::new();
    let mut index = 0;
    bars.retain(|bar| {
        let keep = !bar.is_void();
        if !keep {
            dropped.push(index);
        }
        index += 1;
        keep
    });
    dropped
}
