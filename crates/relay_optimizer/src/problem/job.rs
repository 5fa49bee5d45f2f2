use jiff::SignedDuration;

use crate::{
    define_index_newtype,
    problem::{capacity::Capacity, location::LocationIdx, time_window::TimeWindow},
};

define_index_newtype!(JobIdx, Job);

/// A service visit: the vehicle travels to `location_id`, waits for the time
/// window to open if needed and stays `duration` on site.
#[derive(Debug, Clone)]
pub struct Job {
    external_id: String,
    location_id: LocationIdx,
    size: Capacity,
    duration: SignedDuration,
    time_window: TimeWindow,
}

impl Job {
    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn location_id(&self) -> LocationIdx {
        self.location_id
    }

    pub fn size(&self) -> &Capacity {
        &self.size
    }

    pub fn duration(&self) -> SignedDuration {
        self.duration
    }

    pub fn time_window(&self) -> &TimeWindow {
        &self.time_window
    }
}

#[derive(Default)]
pub struct JobBuilder {
    external_id: Option<String>,
    location_id: Option<usize>,
    size: Option<Capacity>,
    duration: Option<SignedDuration>,
    time_window: Option<TimeWindow>,
}

impl JobBuilder {
    pub fn set_external_id(&mut self, external_id: impl Into<String>) -> &mut JobBuilder {
        self.external_id = Some(external_id.into());
        self
    }

    pub fn set_location_id(&mut self, location_id: usize) -> &mut JobBuilder {
        self.location_id = Some(location_id);
        self
    }

    pub fn set_size(&mut self, size: Capacity) -> &mut JobBuilder {
        self.size = Some(size);
        self
    }

    pub fn set_duration(&mut self, duration: SignedDuration) -> &mut JobBuilder {
        self.duration = Some(duration);
        self
    }

    pub fn set_time_window(&mut self, time_window: TimeWindow) -> &mut JobBuilder {
        self.time_window = Some(time_window);
        self
    }

    pub fn build(&mut self) -> Job {
        let location_id = self.location_id.unwrap_or_default();
        Job {
            external_id: self
                .external_id
                .take()
                .unwrap_or_else(|| format!("job-{location_id}")),
            location_id: LocationIdx::new(location_id),
            size: self.size.take().unwrap_or(Capacity::EMPTY),
            duration: self.duration.unwrap_or(SignedDuration::ZERO),
            time_window: self.time_window.take().unwrap_or_default(),
        }
    }
}
