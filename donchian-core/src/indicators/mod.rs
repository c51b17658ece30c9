//! Concrete indicator implementations.
//!
//! [`Maximum`] and [`Minimum`] are scalar rolling extrema over `DataPoint`
//! input. [`DonchianChannel`] composes one of each over bars. The batch
//! [`DonchianSeries`] runs a channel across a full bar history for callers
//! that want whole series instead of a stream.

mod extremum;

pub mod donchian;
pub mod maximum;
pub mod minimum;

pub use donchian::{DonchianBand, DonchianChannel, DonchianSeries};
pub use maximum::Maximum;
pub use minimum::Minimum;

use crate::domain::Bar;
use crate::indicator::{IndicatorError, IndicatorValues, SeriesIndicator};

/// Compute every channel series for `bars` into one container, keyed by
/// series name (`donchian_upper_{period}`, `donchian_lower_{period}`, ...).
pub fn compute_channel(bars: &[Bar], period: usize) -> Result<IndicatorValues, IndicatorError> {
    let mut values = IndicatorValues::new();
    for band in [
        DonchianBand::Upper,
        DonchianBand::Lower,
        DonchianBand::Value,
        DonchianBand::Middle,
    ] {
        let series = DonchianSeries::new(period, band)?;
        values.insert(series.name(), series.compute(bars));
    }
    Ok(values)
}

/// Create synthetic bars from (high, low) pairs for testing.
///
/// open = close = midpoint, one bar per day from 2024-01-02.
#[cfg(test)]
pub fn make_hl_bars(data: &[(f64, f64)]) -> Vec<Bar> {
    let base = chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    data.iter()
        .enumerate()
        .map(|(i, &(high, low))| {
            let mid = (high + low) / 2.0;
            Bar {
                symbol: "TEST".to_string(),
                timestamp: base + chrono::Duration::days(i as i64),
                open: mid,
                high,
                low,
                close: mid,
                volume: 1000,
            }
        })
        .collect()
}

/// Daily data points from raw values for testing.
#[cfg(test)]
pub fn points(values: &[f64]) -> Vec<crate::domain::DataPoint> {
    let base = chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| crate::domain::DataPoint::new(base + chrono::Duration::days(i as i64), v))
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compute_channel_fills_all_series() {
        let bars = make_hl_bars(&[(10.0, 5.0), (12.0, 6.0), (9.0, 4.0), (15.0, 7.0)]);
        let values = compute_channel(&bars, 3).unwrap();
        assert_eq!(
            values.names(),
            vec![
                "donchian_lower_3",
                "donchian_middle_3",
                "donchian_upper_3",
                "donchian_value_3"
            ]
        );
        assert_eq!(values.get("donchian_upper_3", 3), Some(12.0));
        assert_eq!(values.get("donchian_lower_3", 3), Some(4.0));
        assert!(values.get("donchian_value_3", 2).unwrap().is_nan());
    }

    #[test]
    fn compute_channel_rejects_zero_period() {
        assert!(compute_channel(&[], 0).is_err());
    }
}
