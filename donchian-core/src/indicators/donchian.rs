//! Donchian Channel — highest high / lowest low over a lagged lookback window.
//!
//! The channel owns a [`Maximum`] fed with highs and a [`Minimum`] fed with
//! lows. Each update pushes the *previous* bar into both bands, then keeps the
//! incoming bar for the next call, so the bar just passed in never sits inside
//! its own window.
//!
//! `update` returns `upper + lower / 2`: upper plus half of lower, not the
//! midpoint. The midpoint is available separately through [`DonchianChannel::mid_band`].

use tracing::debug;

use crate::domain::{Bar, DataPoint};
use crate::indicator::{Indicator, IndicatorError, IndicatorState, SeriesIndicator};

use super::{Maximum, Minimum};

#[derive(Debug, Clone)]
pub struct DonchianChannel {
    state: IndicatorState,
    period: usize,
    upper: Maximum,
    lower: Minimum,
    previous: Option<Bar>,
}

impl DonchianChannel {
    pub fn new(name: impl Into<String>, period: usize) -> Result<Self, IndicatorError> {
        let name = name.into();
        if period == 0 {
            return Err(IndicatorError::InvalidPeriod { name, period });
        }
        Ok(Self {
            upper: Maximum::new(format!("{name}_upper"), period)?,
            lower: Minimum::new(format!("{name}_lower"), period)?,
            state: IndicatorState::new(name),
            period,
            previous: None,
        })
    }

    /// Channel named `donchian_{period}`.
    pub fn with_period(period: usize) -> Result<Self, IndicatorError> {
        Self::new(format!("donchian_{period}"), period)
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Highest high over the window.
    pub fn upper_band(&self) -> &Maximum {
        &self.upper
    }

    /// Lowest low over the window.
    pub fn lower_band(&self) -> &Minimum {
        &self.lower
    }

    /// True midpoint `(upper + lower) / 2` of the current bands.
    pub fn mid_band(&self) -> f64 {
        (self.upper.current().value + self.lower.current().value) / 2.0
    }

    /// Bar held back for the next update, if any.
    pub fn previous_bar(&self) -> Option<&Bar> {
        self.previous.as_ref()
    }
}

impl Indicator for DonchianChannel {
    type Input = Bar;

    fn name(&self) -> &str {
        self.state.name()
    }

    fn update(&mut self, bar: &Bar) -> f64 {
        let was_ready = self.is_ready();
        self.state.begin_sample();

        if let Some(prev) = self.previous.take() {
            self.upper.update(&DataPoint::new(prev.timestamp, prev.high));
            self.lower.update(&DataPoint::new(prev.timestamp, prev.low));
        }
        self.previous = Some(bar.clone());

        if !was_ready && self.is_ready() {
            debug!(
                indicator = self.state.name(),
                samples = self.state.samples(),
                "donchian channel ready"
            );
        }

        let value = self.upper.current().value + self.lower.current().value / 2.0;
        self.state.record(bar.timestamp, value)
    }

    fn current(&self) -> DataPoint {
        self.state.current()
    }

    fn is_ready(&self) -> bool {
        self.upper.is_ready() && self.lower.is_ready()
    }

    fn samples(&self) -> u64 {
        self.state.samples()
    }

    /// One call more than the bands need, because of the lag.
    fn warm_up_period(&self) -> usize {
        self.period + 1
    }

    fn reset(&mut self) {
        self.upper.reset();
        self.lower.reset();
        self.previous = None;
        self.state.reset();
    }
}

/// Which series of the channel to emit in batch mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DonchianBand {
    Upper,
    Lower,
    /// The value returned by `update`.
    Value,
    Middle,
}

impl DonchianBand {
    pub fn label(self) -> &'static str {
        match self {
            DonchianBand::Upper => "upper",
            DonchianBand::Lower => "lower",
            DonchianBand::Value => "value",
            DonchianBand::Middle => "middle",
        }
    }
}

/// Batch view of one channel series: streams a fresh channel over the bars
/// and emits NaN until it is ready.
///
/// Lookback: period (the one-bar lag adds one bar to the band warmup).
#[derive(Debug, Clone)]
pub struct DonchianSeries {
    period: usize,
    band: DonchianBand,
    name: String,
}

impl DonchianSeries {
    pub fn new(period: usize, band: DonchianBand) -> Result<Self, IndicatorError> {
        let name = format!("donchian_{}_{period}", band.label());
        if period == 0 {
            return Err(IndicatorError::InvalidPeriod { name, period });
        }
        Ok(Self { period, band, name })
    }

    pub fn upper(period: usize) -> Result<Self, IndicatorError> {
        Self::new(period, DonchianBand::Upper)
    }

    pub fn lower(period: usize) -> Result<Self, IndicatorError> {
        Self::new(period, DonchianBand::Lower)
    }

    pub fn value(period: usize) -> Result<Self, IndicatorError> {
        Self::new(period, DonchianBand::Value)
    }

    pub fn middle(period: usize) -> Result<Self, IndicatorError> {
        Self::new(period, DonchianBand::Middle)
    }

    pub fn band(&self) -> DonchianBand {
        self.band
    }
}

impl SeriesIndicator for DonchianSeries {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let mut channel = match DonchianChannel::new(self.name.clone(), self.period) {
            Ok(channel) => channel,
            Err(_) => return vec![f64::NAN; bars.len()],
        };

        bars.iter()
            .map(|bar| {
                let value = channel.update(bar);
                if !channel.is_ready() {
                    return f64::NAN;
                }
                match self.band {
                    DonchianBand::Upper => channel.upper_band().current().value,
                    DonchianBand::Lower => channel.lower_band().current().value,
                    DonchianBand::Value => value,
                    DonchianBand::Middle => channel.mid_band(),
                }
            })
            .collect()
    }
}
