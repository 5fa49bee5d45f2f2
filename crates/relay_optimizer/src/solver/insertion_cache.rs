use fxhash::FxHashMap;

use crate::{
    problem::job::JobIdx,
    solver::{
        insertion::Insertion,
        solution::{route::WorkingSolutionRoute, route_id::RouteIdx},
    },
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsertionCacheEntry {
    /// Cost used for selection, noise included.
    pub cost: f64,
    pub insertion: Insertion,
}

/// Best insertion of a job into a route, valid as long as the route keeps the
/// same version. `None` means the job fits nowhere in that route version.
#[derive(Default)]
pub struct InsertionCache {
    cache: FxHashMap<(RouteIdx, usize, JobIdx), Option<InsertionCacheEntry>>,
}

impl InsertionCache {
    pub fn new() -> Self {
        Self {
            cache: FxHashMap::default(),
        }
    }

    pub fn get(
        &self,
        route_id: RouteIdx,
        version: usize,
        job_id: JobIdx,
    ) -> Option<&Option<InsertionCacheEntry>> {
        self.cache.get(&(route_id, version, job_id))
    }

    pub fn insert(
        &mut self,
        route_id: RouteIdx,
        version: usize,
        job_id: JobIdx,
        entry: Option<InsertionCacheEntry>,
    ) {
        self.cache.insert((route_id, version, job_id), entry);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Drops every entry computed against an outdated route version.
    pub fn clear(&mut self, routes: &[WorkingSolutionRoute]) {
        self.cache.retain(|(route_id, version, _), _| {
            if let Some(route) = routes.get(route_id.get()) {
                *version == route.version()
            } else {
                false
            }
        });
    }
}
