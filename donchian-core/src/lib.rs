//! Donchian Core — streaming indicators over price bars.
//!
//! - Domain types (bars, timestamped data points)
//! - Streaming `Indicator` trait with shared name/sample/current bookkeeping
//! - Rolling window and rolling extremum (Maximum, Minimum)
//! - Donchian channel composed from the two extrema with a one-bar lag
//! - Batch `SeriesIndicator` adapter and the named-series container

pub mod domain;
pub mod indicator;
pub mod indicators;
pub mod window;

pub use domain::{Bar, DataPoint, Timestamped};
pub use indicator::{Indicator, IndicatorError, IndicatorValues, SeriesIndicator};
pub use indicators::{DonchianChannel, DonchianSeries, Maximum, Minimum};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: indicator types can move to a worker thread.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<Bar>();
        require_sync::<Bar>();
        require_send::<DataPoint>();
        require_sync::<DataPoint>();
        require_send::<Maximum>();
        require_sync::<Maximum>();
        require_send::<Minimum>();
        require_sync::<Minimum>();
        require_send::<DonchianChannel>();
        require_sync::<DonchianChannel>();
        require_send::<DonchianSeries>();
        require_sync::<DonchianSeries>();
        require_send::<IndicatorValues>();
        require_sync::<IndicatorValues>();
    }

    /// The channel runs through the generic `Indicator` seam.
    #[test]
    fn channel_drives_through_indicator_trait() {
        fn feed<I: Indicator>(ind: &mut I, inputs: &[I::Input]) -> f64 {
            inputs.iter().map(|i| ind.update(i)).last().unwrap_or(0.0)
        }
        let bars = indicators::make_hl_bars(&[(10.0, 5.0), (12.0, 6.0)]);
        let mut dc = DonchianChannel::new("dch", 1).unwrap();
        assert_eq!(feed(&mut dc, &bars), 12.5);
        assert!(dc.is_ready());
    }
}
