use rstar::RTree;
use rstar::primitives::GeomWithData;

use super::{
    job::{Job, JobIdx},
    location::Location,
};
use crate::utils::enumerate_idx::EnumerateIdx;

type JobLocationIndexObject = GeomWithData<[f64; 2], JobIdx>;

/// Spatial index over the coordinates of job locations. Jobs whose location
/// has no coordinates are not indexed.
pub struct JobLocationIndex {
    tree: RTree<JobLocationIndexObject>,
}

impl JobLocationIndex {
    pub fn new(locations: &[Location], jobs: &[Job]) -> JobLocationIndex {
        let tree = RTree::bulk_load(
            jobs.iter()
                .enumerate_idx()
                .filter_map(|(job_id, job): (JobIdx, &Job)| {
                    let point = locations[job.location_id()].point()?;
                    Some(JobLocationIndexObject::new([point.x(), point.y()], job_id))
                })
                .collect(),
        );

        JobLocationIndex { tree }
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Indexed jobs ordered by increasing Euclidean distance to `point`.
    pub fn nearest_neighbor_iter(&self, point: geo::Point) -> impl Iterator<Item = JobIdx> + '_ {
        self.tree
            .nearest_neighbor_iter(&[point.x(), point.y()])
            .map(|object| object.data)
    }
}
