mod cache;
mod query;
mod types;

pub use cache::SnapshotCache;
pub use query::Query;
pub use types::{
    FixSnapshot, Freshness, Health, Navigation, SatelliteReading, SkyView, TaskState, TrackPoint,
};
