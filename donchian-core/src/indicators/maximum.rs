//! Maximum — highest value over the trailing `period` samples.
//!
//! Before the window fills, reports the highest value seen so far.
//! Ready once `period` samples have been observed.

use crate::domain::DataPoint;
use crate::indicator::{Indicator, IndicatorError};

use super::extremum::{Extreme, RollingExtremum};

#[derive(Debug, Clone)]
pub struct Maximum {
    inner: RollingExtremum,
}

impl Maximum {
    pub fn new(name: impl Into<String>, period: usize) -> Result<Self, IndicatorError> {
        Ok(Self {
            inner: RollingExtremum::new(Extreme::Highest, name, period)?,
        })
    }

    pub fn period(&self) -> usize {
        self.inner.period()
    }

    /// Samples since the current maximum was observed (0 = the latest sample).
    pub fn periods_since_maximum(&self) -> usize {
        self.inner.periods_since()
    }
}

impl Indicator for Maximum {
    type Input = DataPoint;

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn update(&mut self, input: &DataPoint) -> f64 {
        self.inner.update(input)
    }

    fn current(&self) -> DataPoint {
        self.inner.current()
    }

    fn is_ready(&self) -> bool {
        self.inner.is_ready()
    }

    fn samples(&self) -> u64 {
        self.inner.samples()
    }

    fn warm_up_period(&self) -> usize {
        self.inner.period()
    }

    fn reset(&mut self) {
        self.inner.reset();
    }
}
