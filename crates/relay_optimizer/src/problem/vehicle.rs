use jiff::Timestamp;
use serde::Serialize;

use crate::define_index_newtype;

use super::{capacity::Capacity, location::LocationIdx};

define_index_newtype!(VehicleIdx, Vehicle);

#[derive(Serialize, Debug, Clone)]
pub struct Vehicle {
    external_id: String,
    capacity: Capacity,
    start_location_id: LocationIdx,
    end_location_id: Option<LocationIdx>,
    earliest_start: Timestamp,
    latest_arrival: Timestamp,
    cost_per_distance: f64,
    cost_per_time: f64,
}

impl Vehicle {
    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn capacity(&self) -> &Capacity {
        &self.capacity
    }

    pub fn start_location_id(&self) -> LocationIdx {
        self.start_location_id
    }

    /// Location the vehicle drives back to after its last job, `None` for
    /// open routes.
    pub fn end_location_id(&self) -> Option<LocationIdx> {
        self.end_location_id
    }

    pub fn should_return_to_depot(&self) -> bool {
        self.end_location_id.is_some()
    }

    pub fn earliest_start(&self) -> Timestamp {
        self.earliest_start
    }

    pub fn latest_arrival(&self) -> Timestamp {
        self.latest_arrival
    }

    pub fn cost_per_distance(&self) -> f64 {
        self.cost_per_distance
    }

    pub fn cost_per_time(&self) -> f64 {
        self.cost_per_time
    }
}

pub struct VehicleBuilder {
    external_id: Option<String>,
    capacity: Option<Capacity>,
    start_location_id: Option<usize>,
    end_location_id: Option<usize>,
    return_to_depot: bool,
    earliest_start: Timestamp,
    latest_arrival: Timestamp,
    cost_per_distance: f64,
    cost_per_time: f64,
}

impl Default for VehicleBuilder {
    fn default() -> Self {
        VehicleBuilder {
            external_id: None,
            capacity: None,
            start_location_id: None,
            end_location_id: None,
            return_to_depot: false,
            earliest_start: Timestamp::UNIX_EPOCH,
            latest_arrival: Timestamp::MAX,
            cost_per_distance: 1.0,
            cost_per_time: 0.0,
        }
    }
}

impl VehicleBuilder {
    pub fn set_vehicle_id(&mut self, external_id: impl Into<String>) -> &mut VehicleBuilder {
        self.external_id = Some(external_id.into());
        self
    }

    pub fn set_capacity(&mut self, capacity: Capacity) -> &mut VehicleBuilder {
        self.capacity = Some(capacity);
        self
    }

    pub fn set_start_location_id(&mut self, location_id: usize) -> &mut VehicleBuilder {
        self.start_location_id = Some(location_id);
        self
    }

    /// Closes the route at `location_id`. Implies returning to depot.
    pub fn set_end_location_id(&mut self, location_id: usize) -> &mut VehicleBuilder {
        self.end_location_id = Some(location_id);
        self.return_to_depot = true;
        self
    }

    /// Closes the route at the start location unless an end location is set.
    pub fn set_return(&mut self, return_to_depot: bool) -> &mut VehicleBuilder {
        self.return_to_depot = return_to_depot;
        self
    }

    pub fn set_earliest_start(&mut self, earliest_start: Timestamp) -> &mut VehicleBuilder {
        self.earliest_start = earliest_start;
        self
    }

    pub fn set_latest_arrival(&mut self, latest_arrival: Timestamp) -> &mut VehicleBuilder {
        self.latest_arrival = latest_arrival;
        self
    }

    pub fn set_cost_per_distance(&mut self, cost: f64) -> &mut VehicleBuilder {
        self.cost_per_distance = cost;
        self
    }

    pub fn set_cost_per_time(&mut self, cost: f64) -> &mut VehicleBuilder {
        self.cost_per_time = cost;
        self
    }

    pub fn build(&mut self) -> Vehicle {
        let start_location_id = LocationIdx::new(self.start_location_id.unwrap_or_default());
        let end_location_id = if self.return_to_depot {
            Some(
                self.end_location_id
                    .map(LocationIdx::new)
                    .unwrap_or(start_location_id),
            )
        } else {
            None
        };

        Vehicle {
            external_id: self
                .external_id
                .take()
                .unwrap_or_else(|| format!("vehicle-{start_location_id}")),
            capacity: self.capacity.take().unwrap_or(Capacity::EMPTY),
            start_location_id,
            end_location_id,
            earliest_start: self.earliest_start,
            latest_arrival: self.latest_arrival,
            cost_per_distance: self.cost_per_distance,
            cost_per_time: self.cost_per_time,
        }
    }
}
