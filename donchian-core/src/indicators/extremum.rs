//! Rolling extremum over a trailing window of scalar samples.
//!
//! Shared engine behind [`Maximum`](super::Maximum) and
//! [`Minimum`](super::Minimum). Tracks how many samples ago the current
//! extremum arrived so the window only has to be rescanned when that sample
//! is about to fall out.
//!
//! Inputs are not validated. NaN never compares as more extreme, so its effect
//! depends on where it sits when a rescan happens; callers strip void bars first.

use crate::domain::DataPoint;
use crate::indicator::{IndicatorError, IndicatorState};
use crate::window::RollingWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Extreme {
    Highest,
    Lowest,
}

impl Extreme {
    /// `candidate` replaces `current` when it is at least as extreme.
    fn at_least(self, candidate: f64, current: f64) -> bool {
        match self {
            Extreme::Highest => candidate >= current,
            Extreme::Lowest => candidate <= current,
        }
    }

    fn strictly(self, candidate: f64, current: f64) -> bool {
        match self {
            Extreme::Highest => candidate > current,
            Extreme::Lowest => candidate < current,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct RollingExtremum {
    extreme: Extreme,
    period: usize,
    window: RollingWindow<f64>,
    periods_since: usize,
    state: IndicatorState,
}

impl RollingExtremum {
    pub(crate) fn new(
        extreme: Extreme,
        name: impl Into<String>,
        period: usize,
    ) -> Result<Self, IndicatorError> {
        let name = name.into();
        if period == 0 {
            return Err(IndicatorError::InvalidPeriod { name, period });
        }
        Ok(Self {
            extreme,
            period,
            window: RollingWindow::new(period)?,
            periods_since: 0,
            state: IndicatorState::new(name),
        })
    }

    pub(crate) fn update(&mut self, input: &DataPoint) -> f64 {
        let samples = self.state.begin_sample();
        self.window.push(input.value);

        let value = if samples == 1
            || self
                .extreme
                .at_least(input.value, self.state.current().value)
        {
            self.periods_since = 0;
            input.value
        } else if self.periods_since + 1 >= self.period {
            // The extremum was the oldest sample and has just been evicted.
            let (age, value) = self.scan();
            self.periods_since = age;
            value
        } else {
            self.periods_since += 1;
            self.state.current().value
        };

        self.state.record(input.time, value)
    }

    /// Extremum of the window and its age. Most recent wins ties.
    fn scan(&self) -> (usize, f64) {
        let mut best_age = 0;
        let mut best = f64::NAN;
        for (age, &v) in self.window.iter().enumerate() {
            if age == 0 || self.extreme.strictly(v, best) {
                best_age = age;
                best = v;
            }
        }
        (best_age, best)
    }

    pub(crate) fn name(&self) -> &str {
        self.state.name()
    }

    pub(crate) fn current(&self) -> DataPoint {
        self.state.current()
    }

    pub(crate) fn samples(&self) -> u64 {
        self.state.samples()
    }

    pub(crate) fn period(&self) -> usize {
        self.period
    }

    pub(crate) fn periods_since(&self) -> usize {
        self.periods_since
    }

    pub(crate) fn is_ready(&self) -> bool {
        self.state.samples() >= self.period as u64
    }

    pub(crate) fn reset(&mut self) {
        self.window.reset();
        self.periods_since = 0;
        self.state.reset();
    }
}
