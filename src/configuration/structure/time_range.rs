use chrono::Timelike;
use serde::Serialize;


pub const LAST_HOUR_OF_DAY: u8 = 23;


/// An hour-of-day window during which no action is ever taken.
///
/// `start_hour` may be greater than `end_hour`, in which case the window wraps around midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NoActionTimeRange {
    pub start_hour: u8,

    pub end_hour: u8,
}

impl NoActionTimeRange {
    pub const fn new(start_hour: u8, end_hour: u8) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    /// Returns `true` if `hour` falls within `[start_hour, end_hour)`.
    /// An empty window (`start_hour == end_hour`) contains no hour.
    pub fn contains_hour(&self, hour: u8) -> bool {
        if self.start_hour <= self.end_hour {
            (self.start_hour..self.end_hour).contains(&hour)
        } else {
            hour >= self.start_hour || hour < self.end_hour
        }
    }

    /// Returns `true` if the hour of `time` falls within the window.
    pub fn contains<T>(&self, time: &T) -> bool
    where
        T: Timelike,
    {
        // `Timelike::hour` is always in 0..=23.
        self.contains_hour(time.hour() as u8)
    }
}
