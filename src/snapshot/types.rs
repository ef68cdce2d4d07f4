use serde::Serialize;
use utoipa::ToSchema;

use crate::gnss::{speed_kmh_display, ZERO_TIMESTAMP};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SatelliteReading {
    pub identifier: u32,
    #[serde(rename = "PRN")]
    pub constellation_tag: String,
    #[serde(rename = "ss")]
    pub signal_strength: f64,
    #[serde(rename = "used")]
    pub used_in_fix: bool,
}

/// Satellites seen since the last fix report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct SkyView {
    pub satellites: Vec<SatelliteReading>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FixSnapshot {
    pub altitude: f64,
    pub track_heading: f64,
    pub magnetic_track: f64,
    pub magnetic_variation: f64,
    pub timestamp: String,
    pub speed_kmh: String,
    pub fix_status_label: String,
    pub satellite_count: usize,
}

impl Default for FixSnapshot {
    fn default() -> Self {
        Self {
            altitude: 0.0,
            track_heading: 0.0,
            magnetic_track: 0.0,
            magnetic_variation: 0.0,
            timestamp: ZERO_TIMESTAMP.to_string(),
            speed_kmh: speed_kmh_display(0.0),
            fix_status_label: "Unknown".to_string(),
            satellite_count: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct TrackPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub quantized_speed: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Freshness {
    /// No watchdog tick has completed yet.
    Pending,
    Fresh {
        last_modified: String,
        staleness_seconds: i64,
    },
    FileAbsent,
}

/// Sky view and fix taken from the same cycle.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Navigation {
    pub sky: SkyView,
    pub fix: FixSnapshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    Idle,
    Running,
    Stopped,
    SourceLost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Health {
    pub ingestion: TaskState,
    pub watchdog: TaskState,
}

impl Health {
    pub fn is_ingesting(&self) -> bool {
        self.ingestion == TaskState::Running
    }
}
