//! Domain types: bars, scalar data points, and the timestamp seam indicators consume.

pub mod bar;
pub mod data_point;

pub use bar::Bar;
pub use data_point::DataPoint;

use chrono::NaiveDateTime;

/// Anything carrying the time it refers to. Indicator inputs implement this so
/// the indicator can stamp its own output with the input's time.
pub trait Timestamped {
    fn time(&self) -> NaiveDateTime;
}
