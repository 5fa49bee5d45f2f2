use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

/// Window in which service at a job must start. Arriving before `start` means
/// waiting, arriving after `end` is infeasible. Either bound may be open.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeWindow {
    start: Option<Timestamp>,
    end: Option<Timestamp>,
}

impl TimeWindow {
    pub fn new(start: Option<Timestamp>, end: Option<Timestamp>) -> Self {
        TimeWindow { start, end }
    }

    pub fn from_seconds(start: i64, end: i64) -> Result<Self, jiff::Error> {
        Ok(TimeWindow {
            start: Some(Timestamp::from_second(start)?),
            end: Some(Timestamp::from_second(end)?),
        })
    }

    pub fn start(&self) -> Option<Timestamp> {
        self.start
    }

    pub fn end(&self) -> Option<Timestamp> {
        self.end
    }

    pub fn is_valid(&self) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start <= end,
            _ => true,
        }
    }

    /// Service start time when arriving at `arrival`.
    pub fn service_start(&self, arrival: Timestamp) -> Timestamp {
        match self.start {
            Some(start) if start > arrival => start,
            _ => arrival,
        }
    }

    pub fn waiting_duration(&self, arrival: Timestamp) -> SignedDuration {
        match self.start {
            Some(start) if start > arrival => start.duration_since(arrival),
            _ => SignedDuration::ZERO,
        }
    }

    pub fn is_satisfied(&self, arrival: Timestamp) -> bool {
        match self.end {
            Some(end) => arrival <= end,
            None => true,
        }
    }
}
