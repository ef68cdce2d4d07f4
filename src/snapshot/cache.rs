use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::types::{FixSnapshot, Freshness, Health, SkyView, TaskState, TrackPoint};

/// Latest telemetry, one lock per group.
///
/// Groups hold an `Arc` that writers replace wholesale: a new value is built
/// off-lock and swapped in, so the write lock only covers a pointer store and
/// readers only clone the pointer. When both the sky and fix groups are
/// locked, the sky lock is always taken first.
#[derive(Debug)]
pub struct SnapshotCache {
    sky: RwLock<Arc<SkyView>>,
    fix: RwLock<Arc<FixSnapshot>>,
    track: RwLock<Option<TrackPoint>>,
    freshness: RwLock<Arc<Freshness>>,
    health: RwLock<Health>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self {
            sky: RwLock::new(Arc::new(SkyView::default())),
            fix: RwLock::new(Arc::new(FixSnapshot::default())),
            track: RwLock::new(None),
            freshness: RwLock::new(Arc::new(Freshness::Pending)),
            health: RwLock::new(Health {
                ingestion: TaskState::Idle,
                watchdog: TaskState::Idle,
            }),
        }
    }

    pub fn publish_sky(&self, sky: SkyView) {
        let sky = Arc::new(sky);
        *write(&self.sky) = sky;
    }

    /// Replace the sky view and the fix as one unit.
    pub fn commit_fix(&self, sky: SkyView, fix: FixSnapshot) {
        let sky = Arc::new(sky);
        let fix = Arc::new(fix);
        let mut sky_slot = write(&self.sky);
        let mut fix_slot = write(&self.fix);
        *sky_slot = sky;
        *fix_slot = fix;
    }

    pub fn publish_track(&self, point: TrackPoint) {
        *write(&self.track) = Some(point);
    }

    pub fn publish_freshness(&self, freshness: Freshness) {
        let freshness = Arc::new(freshness);
        *write(&self.freshness) = freshness;
    }

    pub fn set_ingestion_state(&self, state: TaskState) {
        write(&self.health).ingestion = state;
    }

    pub fn set_watchdog_state(&self, state: TaskState) {
        write(&self.health).watchdog = state;
    }

    pub(super) fn sky(&self) -> Arc<SkyView> {
        read(&self.sky).clone()
    }

    pub(super) fn fix(&self) -> Arc<FixSnapshot> {
        read(&self.fix).clone()
    }

    pub(super) fn sky_and_fix(&self) -> (Arc<SkyView>, Arc<FixSnapshot>) {
        let sky = read(&self.sky);
        let fix = read(&self.fix);
        (sky.clone(), fix.clone())
    }

    pub(super) fn track(&self) -> Option<TrackPoint> {
        *read(&self.track)
    }

    pub(super) fn freshness(&self) -> Arc<Freshness> {
        read(&self.freshness).clone()
    }

    pub(super) fn health(&self) -> Health {
        *read(&self.health)
    }
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::new()
    }
}

// A panicking writer cannot leave a torn value behind (it only ever stores a
// finished Arc), so a poisoned lock still holds a valid snapshot.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::types::SatelliteReading;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn fix_for(n: usize) -> FixSnapshot {
        FixSnapshot {
            altitude: n as f64,
            track_heading: n as f64,
            magnetic_track: n as f64,
            magnetic_variation: n as f64,
            timestamp: n.to_string(),
            speed_kmh: format!("{:.2}", n as f64),
            fix_status_label: format!("cycle {}", n),
            satellite_count: n,
        }
    }

    fn sky_for(n: usize) -> SkyView {
        SkyView {
            satellites: (0..n % 8)
                .map(|i| SatelliteReading {
                    identifier: i as u32,
                    constellation_tag: format!("cycle{}_{}", n, i),
                    signal_strength: n as f64,
                    used_in_fix: true,
                })
                .collect(),
        }
    }

    fn assert_fix_consistent(fix: &FixSnapshot) {
        let n = fix.satellite_count;
        assert_eq!(*fix, fix_for(n), "torn fix snapshot");
    }

    #[test]
    fn defaults_before_first_write() {
        let cache = SnapshotCache::new();
        assert!(cache.sky().satellites.is_empty());
        assert_eq!(*cache.fix(), FixSnapshot::default());
        assert_eq!(cache.fix().fix_status_label, "Unknown");
        assert_eq!(cache.fix().speed_kmh, "0.00");
        assert_eq!(cache.track(), None);
        assert_eq!(*cache.freshness(), Freshness::Pending);
        assert_eq!(cache.health().ingestion, TaskState::Idle);
    }

    #[test]
    fn readers_keep_their_snapshot() {
        let cache = SnapshotCache::new();
        cache.commit_fix(SkyView::default(), fix_for(1));
        let held = cache.fix();
        cache.commit_fix(SkyView::default(), fix_for(2));
        assert_eq!(held.satellite_count, 1);
        assert_eq!(cache.fix().satellite_count, 2);
    }

    #[test]
    fn concurrent_reads_never_see_torn_groups() {
        let cache = SnapshotCache::new();
        let done = AtomicBool::new(false);

        std::thread::scope(|scope| {
            scope.spawn(|| {
                for n in 0..20_000 {
                    cache.commit_fix(sky_for(n), fix_for(n));
                    if n % 3 == 0 {
                        cache.publish_sky(sky_for(n + 1));
                    }
                }
                done.store(true, Ordering::Release);
            });

            for _ in 0..4 {
                scope.spawn(|| {
                    while !done.load(Ordering::Acquire) {
                        assert_fix_consistent(&cache.fix());

                        let sky = cache.sky();
                        if let Some(first) = sky.satellites.first() {
                            let cycle = first.signal_strength;
                            assert!(sky.satellites.iter().all(|s| s.signal_strength == cycle));
                        }

                        // The paired read can only ever observe the commit
                        // itself or a later sky-only publish of n + 1.
                        let (sky, fix) = cache.sky_and_fix();
                        assert_fix_consistent(&fix);
                        let n = fix.satellite_count;
                        assert!(
                            *sky == sky_for(n) || *sky == sky_for(n + 1),
                            "sky view does not belong to fix cycle {}",
                            n
                        );
                    }
                });
            }
        });

        assert_eq!(cache.fix().satellite_count, 19_999);
    }
}
