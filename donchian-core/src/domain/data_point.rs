//! DataPoint — a single timestamped scalar, the input and output of scalar indicators.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Timestamped;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub time: NaiveDateTime,
    pub value: f64,
}

impl DataPoint {
    pub fn new(time: NaiveDateTime, value: f64) -> Self {
        Self { time, value }
    }
}

/// The point an indicator reports before it has seen any input: value 0 at the
/// earliest representable time.
impl Default for DataPoint {
    fn default() -> Self {
        Self {
            time: NaiveDateTime::MIN,
            value: 0.0,
        }
    }
}

impl Timestamped for DataPoint {
    fn time(&self) -> NaiveDateTime {
        self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_zero_at_min_time() {
        let p = DataPoint::default();
        assert_eq!(p.value, 0.0);
        assert_eq!(p.time, NaiveDateTime::MIN);
    }
}
