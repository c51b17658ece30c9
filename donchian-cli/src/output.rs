//! Streaming a channel over loaded bars and writing the per-bar rows.

use std::io::Write;

use chrono::NaiveDateTime;
use donchian_core::domain::Bar;
use donchian_core::indicator::Indicator;
use donchian_core::indicators::DonchianChannel;
use serde::Serialize;
use thiserror::Error;

use crate::config::OutputFormat;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON write failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Channel state after one bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelRow {
    pub timestamp: NaiveDateTime,
    pub symbol: String,
    /// What `update` returned.
    pub value: f64,
    pub upper: f64,
    pub lower: f64,
    pub middle: f64,
    pub ready: bool,
}

/// Feed every bar through `channel`, one row per bar.
pub fn run_channel(channel: &mut DonchianChannel, bars: &[Bar]) -> Vec<ChannelRow> {
    bars.iter()
        .map(|bar| {
            let value = channel.update(bar);
            ChannelRow {
                timestamp: bar.timestamp,
                symbol: bar.symbol.clone(),
                value,
                upper: channel.upper_band().current().value,
                lower: channel.lower_band().current().value,
                middle: channel.mid_band(),
                ready: channel.is_ready(),
            }
        })
        .collect()
}

pub fn write_rows<W: Write>(
    rows: &[ChannelRow],
    format: OutputFormat,
    skip_warmup: bool,
    mut writer: W,
) -> Result<usize, OutputError> {
    let selected: Vec<&ChannelRow> = rows.iter().filter(|r| r.ready || !skip_warmup).collect();

    match format {
        OutputFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(writer);
            for row in &selected {
                csv_writer.serialize(row)?;
            }
            csv_writer.flush()?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, &selected)?;
            writeln!(writer)?;
            writer.flush()?;
        }
    }

    Ok(selected.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::read_bars;

    const BARS: &str = "\
timestamp,open,high,low,close,volume
2024-01-02,7,10,5,8,1
2024-01-03,8,12,6,9,1
2024-01-04,6,9,4,5,1
2024-01-05,8,15,7,14,1
2024-01-06,9,11,5,10,1
";

    fn rows(period: usize) -> Vec<ChannelRow> {
        let bars = read_bars(BARS.as_bytes(), "TEST").unwrap();
        let mut channel = DonchianChannel::new("dch", period).unwrap();
        run_channel(&mut channel, &bars)
    }

    #[test]
    fn rows_follow_lagged_channel() {
        let rows = rows(3);
        assert_eq!(rows.len(), 5);
        assert!(!rows[2].ready);
        assert!(rows[3].ready);
        assert_eq!(rows[3].upper, 12.0);
        assert_eq!(rows[3].lower, 4.0);
        assert_eq!(rows[3].value, 14.0);
        assert_eq!(rows[4].middle, 9.5);
        assert_eq!(rows[4].symbol, "TEST");
    }

    #[test]
    fn csv_output_skips_warmup() {
        let rows = rows(3);
        let mut buf = Vec::new();
        let written = write_rows(&rows, OutputFormat::Csv, true, &mut buf).unwrap();
        assert_eq!(written, 2);
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("timestamp,symbol,value,upper,lower,middle,ready")
        );
        assert_eq!(lines.count(), 2);
    }

    /// Accepts nothing; every write fails.
    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn buffered_write_failure_surfaces_for_every_format() {
        let rows = rows(2);
        for format in [OutputFormat::Json, OutputFormat::Csv] {
            let writer = std::io::BufWriter::new(FullDisk);
            let result = write_rows(&rows, format, false, writer);
            assert!(result.is_err(), "{format:?} swallowed the write error");
        }
    }

    #[test]
    fn json_output_keeps_all_rows() {
        let rows = rows(2);
        let mut buf = Vec::new();
        let written = write_rows(&rows, OutputFormat::Json, false, &mut buf).unwrap();
        assert_eq!(written, 5);
        let parsed: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let arr = parsed.as_array().unwrap();
        assert_eq!(arr.len(), 5);
        assert_eq!(arr[0]["ready"], false);
        assert_eq!(arr[4]["upper"], 15.0);
    }
}
