//! Indicator traits, shared bookkeeping, and the named-series container.
//!
//! Two shapes of indicator live here:
//! - [`Indicator`] is streaming: one input per `update` call, internal state
//!   carried between calls. This is how the channel and its bands run.
//! - [`SeriesIndicator`] is batch: a full bar history in, a same-length numeric
//!   series out, with NaN during warmup. Batch indicators are built on top of
//!   the streaming ones.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::domain::{Bar, DataPoint, Timestamped};

/// Errors raised while constructing indicators.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndicatorError {
    #[error("indicator '{name}': period must be >= 1, got {period}")]
    InvalidPeriod { name: String, period: usize },

    #[error("rolling window size must be >= 1")]
    InvalidWindowSize,
}

/// Streaming indicator.
///
/// Each `update` consumes one input, advances the sample count by one, and
/// stamps the new current value with the input's time.
pub trait Indicator {
    type Input: Timestamped;

    /// Human-readable name (e.g., "donchian_20_upper").
    fn name(&self) -> &str;

    /// Feed one input and return the new current value.
    fn update(&mut self, input: &Self::Input) -> f64;

    /// Most recent output. Value 0 before the first update.
    fn current(&self) -> DataPoint;

    /// True once enough history has been observed for a meaningful value.
    fn is_ready(&self) -> bool;

    /// Number of `update` calls since construction or the last reset.
    fn samples(&self) -> u64;

    /// Number of `update` calls needed before `is_ready` turns true.
    fn warm_up_period(&self) -> usize;

    /// Return to the freshly constructed state.
    fn reset(&mut self);
}

/// Name, sample count and current value, shared by every [`Indicator`] impl.
#[derive(Debug, Clone)]
pub struct IndicatorState {
    name: String,
    samples: u64,
    current: DataPoint,
}

impl IndicatorState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            samples: 0,
            current: DataPoint::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn samples(&self) -> u64 {
        self.samples
    }

    pub fn current(&self) -> DataPoint {
        self.current
    }

    /// Count a sample before its value is computed. Extremum logic needs to
    /// know whether the incoming value is the first one.
    pub fn begin_sample(&mut self) -> u64 {
        self.samples += 1;
        self.samples
    }

    /// Store the value computed for the current sample and return it.
    pub fn record(&mut self, time: NaiveDateTime, value: f64) -> f64 {
        self.current = DataPoint::new(time, value);
        value
    }

    pub fn reset(&mut self) {
        self.samples = 0;
        self.current = DataPoint::default();
    }
}

/// Batch indicator over a full bar history.
///
/// # Look-ahead contamination guard
/// No value at bar t may depend on price data from bar t+1 or later.
pub trait SeriesIndicator: Send + Sync {
    /// Human-readable name (e.g., "donchian_upper_20").
    fn name(&self) -> &str;

    /// Number of leading NaN values before the series produces valid output.
    fn lookback(&self) -> usize;

    /// Compute the series for the entire bar history.
    ///
    /// Returns a `Vec<f64>` of the same length as `bars`.
    fn compute(&self, bars: &[Bar]) -> Vec<f64>;
}

/// Container for named indicator series, queried by bar index.
#[derive(Debug, Clone, Default)]
pub struct IndicatorValues {
    series: HashMap<String, Vec<f64>>,
}

impl IndicatorValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a named indicator series.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.series.insert(name.into(), values);
    }

    /// Get the indicator value at a specific bar index.
    pub fn get(&self, name: &str, bar_index: usize) -> Option<f64> {
        self.series
            .get(name)
            .and_then(|v| v.get(bar_index).copied())
    }

    /// Get the full series for a named indicator.
    pub fn get_series(&self, name: &str) -> Option<&[f64]> {
        self.series.get(name).map(|v| v.as_slice())
    }

    /// Series names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.series.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of indicator series stored.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_values_insert_and_get() {
        let mut iv = IndicatorValues::new();
        iv.insert(
            "donchian_upper_20",
            vec![f64::NAN; 20]
                .into_iter()
                .chain(vec![100.0, 101.0])
                .collect(),
        );
        assert!(iv.get("donchian_upper_20", 0).unwrap().is_nan());
        assert_eq!(iv.get("donchian_upper_20", 20), Some(100.0));
        assert_eq!(iv.get("donchian_upper_20", 21), Some(101.0));
        assert_eq!(iv.get("donchian_upper_20", 22), None); // out of bounds
    }

    #[test]
    fn indicator_values_missing_name() {
        let iv = IndicatorValues::new();
        assert_eq!(iv.get("nonexistent", 0), None);
    }

    #[test]
    fn indicator_values_names_sorted() {
        let mut iv = IndicatorValues::new();
        assert!(iv.is_empty());
        iv.insert("b", vec![1.0, 2.0]);
        iv.insert("a", vec![1.0, 2.0]);
        assert_eq!(iv.len(), 2);
        assert_eq!(iv.names(), vec!["a", "b"]);
    }

    #[test]
    fn state_records_and_resets() {
        let mut state = IndicatorState::new("x");
        assert_eq!(state.current(), DataPoint::default());
        assert_eq!(state.begin_sample(), 1);
        let t = NaiveDateTime::MIN;
        assert_eq!(state.record(t, 4.5), 4.5);
        assert_eq!(state.current().value, 4.5);
        state.reset();
        assert_eq!(state.samples(), 0);
        assert_eq!(state.current().value, 0.0);
        assert_eq!(state.name(), "x");
    }

    #[test]
    fn invalid_period_message_names_indicator() {
        let err = IndicatorError::InvalidPeriod {
            name: "dch".into(),
            period: 0,
        };
        assert_eq!(err.to_string(), "indicator 'dch': period must be >= 1, got 0");
    }
}
