use std::sync::Arc;

use super::cache::SnapshotCache;
use super::types::{FixSnapshot, Freshness, Health, Navigation, SkyView, TrackPoint};

/// Read-only handle over the [SnapshotCache], handed to API consumers.
///
/// Every accessor returns an immutable snapshot: later writes replace the
/// cached value instead of mutating what a reader already holds.
#[derive(Debug, Clone)]
pub struct Query {
    cache: Arc<SnapshotCache>,
}

impl Query {
    pub fn new(cache: Arc<SnapshotCache>) -> Self {
        Self { cache }
    }

    pub fn sky_view(&self) -> Arc<SkyView> {
        self.cache.sky()
    }

    pub fn fix(&self) -> Arc<FixSnapshot> {
        self.cache.fix()
    }

    pub fn track_point(&self) -> Option<TrackPoint> {
        self.cache.track()
    }

    pub fn log_freshness(&self) -> Arc<Freshness> {
        self.cache.freshness()
    }

    pub fn navigation(&self) -> Navigation {
        let (sky, fix) = self.cache.sky_and_fix();
        Navigation {
            sky: sky.as_ref().clone(),
            fix: fix.as_ref().clone(),
        }
    }

    pub fn health(&self) -> Health {
        self.cache.health()
    }
}
