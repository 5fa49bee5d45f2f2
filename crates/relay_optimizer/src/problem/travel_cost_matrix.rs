use crate::problem::location::{Location, LocationIdx};

pub type Distance = f64;
pub type Time = f64;

/// Distance and travel time (in seconds) of a single edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Travel {
    pub distance: Distance,
    pub time: Time,
}

impl Travel {
    pub const ZERO: Travel = Travel {
        distance: 0.0,
        time: 0.0,
    };
}

/// Flat `num_locations * num_locations` matrices, the entry of a pair lives
/// at `from * num_locations + to`. Pairs without data hold `f64::INFINITY`
/// and are reported as unreachable.
#[derive(Debug, Clone)]
pub struct TravelMatrices {
    distances: Vec<Distance>,
    times: Vec<Time>,
    num_locations: usize,
    is_symmetric: bool,
}

fn is_flat_matrix_symmetric(matrix: &[f64], num_locations: usize) -> bool {
    for i in 0..num_locations {
        for j in (i + 1)..num_locations {
            if matrix[i * num_locations + j] != matrix[j * num_locations + i] {
                return false;
            }
        }
    }
    true
}

impl TravelMatrices {
    /// Builds the matrices from dense rows. `f64::INFINITY` or `f64::NAN`
    /// entries mark missing pairs, as do entries absent from short rows.
    pub fn new(distances: Vec<Vec<Distance>>, times: Vec<Vec<Time>>) -> Self {
        let num_locations = distances.len();
        let flatten = |rows: Vec<Vec<f64>>| {
            let mut flat = Vec::with_capacity(num_locations * num_locations);
            let mut rows = rows.into_iter();
            for _ in 0..num_locations {
                let mut row = rows.next().unwrap_or_default();
                row.resize(num_locations, f64::INFINITY);
                flat.extend(
                    row.into_iter()
                        .map(|value| if value.is_nan() { f64::INFINITY } else { value }),
                );
            }
            flat
        };

        let distances: Vec<Distance> = flatten(distances);
        let times: Vec<Time> = flatten(times);
        let is_symmetric = is_flat_matrix_symmetric(&distances, num_locations)
            && is_flat_matrix_symmetric(&times, num_locations);

        TravelMatrices {
            distances,
            times,
            num_locations,
            is_symmetric,
        }
    }

    /// Straight-line distances between the location coordinates, travel time
    /// is `distance / speed`. Locations without coordinates stay unreachable.
    pub fn from_euclidean(locations: &[Location], speed: f64) -> Self {
        let num_locations = locations.len();
        let mut distances: Vec<Distance> = vec![f64::INFINITY; num_locations * num_locations];
        let mut times: Vec<Time> = vec![f64::INFINITY; num_locations * num_locations];

        for (i, from) in locations.iter().enumerate() {
            for (j, to) in locations.iter().enumerate() {
                if let Some(distance) = from.euclidean_distance(to) {
                    distances[i * num_locations + j] = distance;
                    times[i * num_locations + j] = distance / speed;
                }
            }
        }

        TravelMatrices {
            distances,
            times,
            num_locations,
            is_symmetric: true,
        }
    }

    #[inline(always)]
    fn index(&self, from: LocationIdx, to: LocationIdx) -> usize {
        from.get() * self.num_locations + to.get()
    }

    pub fn num_locations(&self) -> usize {
        self.num_locations
    }

    pub fn is_symmetric(&self) -> bool {
        self.is_symmetric
    }

    /// Travel data between two locations, `None` when the pair is unknown.
    #[inline]
    pub fn travel(&self, from: LocationIdx, to: LocationIdx) -> Option<Travel> {
        if from == to {
            return Some(Travel::ZERO);
        }

        if from.get() >= self.num_locations || to.get() >= self.num_locations {
            return None;
        }

        let index = self.index(from, to);
        let distance = self.distances[index];
        let time = self.times[index];

        if distance.is_finite() && time.is_finite() {
            Some(Travel { distance, time })
        } else {
            None
        }
    }

    pub fn is_reachable(&self, from: LocationIdx, to: LocationIdx) -> bool {
        self.travel(from, to).is_some()
    }

    /// First pair with a negative distance or time, in row order.
    pub fn first_negative_pair(&self) -> Option<(LocationIdx, LocationIdx)> {
        self.distances
            .iter()
            .zip(&self.times)
            .position(|(&distance, &time)| distance < 0.0 || time < 0.0)
            .map(|index| {
                (
                    LocationIdx::new(index / self.num_locations),
                    LocationIdx::new(index % self.num_locations),
                )
            })
    }

    /// Largest finite distance and time of the matrices.
    pub fn max_travel(&self) -> Travel {
        let max_finite = |values: &[f64]| {
            values
                .iter()
                .copied()
                .filter(|value| value.is_finite())
                .fold(0.0_f64, f64::max)
        };

        Travel {
            distance: max_finite(&self.distances),
            time: max_finite(&self.times),
        }
    }
}

fn set_edge(
    matrix: &mut [f64],
    num_locations: usize,
    is_symmetric: bool,
    (from, to): (usize, usize),
    value: f64,
) {
    matrix[from * num_locations + to] = value;
    if is_symmetric {
        matrix[to * num_locations + from] = value;
    }
}

/// Incrementally fills sparse matrices, one edge at a time.
pub struct TravelMatricesBuilder {
    distances: Vec<Distance>,
    times: Vec<Time>,
    num_locations: usize,
    is_symmetric: bool,
}

impl TravelMatricesBuilder {
    /// With `is_symmetric`, every edge added also sets the reverse edge.
    ///
    /// Edges are addressed by location index: `add_transport_distance` and
    /// `add_transport_time` panic when `from` or `to` is not below
    /// `num_locations`.
    pub fn new(num_locations: usize, is_symmetric: bool) -> Self {
        TravelMatricesBuilder {
            distances: vec![f64::INFINITY; num_locations * num_locations],
            times: vec![f64::INFINITY; num_locations * num_locations],
            num_locations,
            is_symmetric,
        }
    }

    pub fn add_transport_distance(
        &mut self,
        from: usize,
        to: usize,
        distance: Distance,
    ) -> &mut TravelMatricesBuilder {
        set_edge(
            &mut self.distances,
            self.num_locations,
            self.is_symmetric,
            (from, to),
            distance,
        );
        self
    }

    pub fn add_transport_time(
        &mut self,
        from: usize,
        to: usize,
        time: Time,
    ) -> &mut TravelMatricesBuilder {
        set_edge(
            &mut self.times,
            self.num_locations,
            self.is_symmetric,
            (from, to),
            time,
        );
        self
    }

    pub fn build(self) -> TravelMatrices {
        let is_symmetric = self.is_symmetric
            || (is_flat_matrix_symmetric(&self.distances, self.num_locations)
                && is_flat_matrix_symmetric(&self.times, self.num_locations));

        TravelMatrices {
            distances: self.distances,
            times: self.times,
            num_locations: self.num_locations,
            is_symmetric,
        }
    }
}
