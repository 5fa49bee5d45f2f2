use jiff::{SignedDuration, Timestamp};

use crate::problem::{job::Job, travel_cost_matrix::Time};

#[inline]
pub(crate) fn travel_duration(time: Time) -> SignedDuration {
    SignedDuration::from_secs_f64(time)
}

#[inline]
pub(crate) fn compute_arrival_time(previous_departure: Timestamp, time: Time) -> Timestamp {
    previous_departure + travel_duration(time)
}

#[inline]
pub(crate) fn compute_departure_time(
    job: &Job,
    arrival_time: Timestamp,
    waiting_duration: SignedDuration,
) -> Timestamp {
    arrival_time + waiting_duration + job.duration()
}
