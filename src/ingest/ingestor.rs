use chrono::Local;
use log::{debug, error, info, trace, warn};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

use crate::gnss::{
    decode, display_timestamp, quantize_speed, resolve_status_label, speed_kmh_display,
    ConstellationTable, FixReport, Report, SkyReport, TRACK_SPEED_FLOOR,
};
use crate::snapshot::{
    FixSnapshot, SatelliteReading, SkyView, SnapshotCache, TaskState, TrackPoint,
};

/// Why [Ingestor::run] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestExit {
    Shutdown,
    SourceClosed,
}

/// Turns raw gpsd messages into cache snapshots.
pub struct Ingestor {
    cache: Arc<SnapshotCache>,
    table: ConstellationTable,
    rx: mpsc::Receiver<String>,
    shutdown: watch::Receiver<bool>,
    /// Satellites seen since the last fix report
    cycle: Vec<SatelliteReading>,
    last_track: Option<TrackPoint>,
}

impl Ingestor {
    pub fn new(
        cache: Arc<SnapshotCache>,
        table: ConstellationTable,
        rx: mpsc::Receiver<String>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            cache,
            table,
            rx,
            shutdown,
            cycle: Vec::new(),
            last_track: None,
        }
    }

    pub async fn run(mut self) -> IngestExit {
        self.cache.set_ingestion_state(TaskState::Running);
        info!("Ingestion started");

        loop {
            if *self.shutdown.borrow() {
                break;
            }

            let message = tokio::select! {
                message = self.rx.recv() => message,
                _ = self.shutdown.changed() => break,
            };

            match message {
                Some(raw) => self.handle(&raw),
                None => {
                    error!("Report source closed, telemetry is no longer updated");
                    self.cache.set_ingestion_state(TaskState::SourceLost);
                    return IngestExit::SourceClosed;
                }
            }
        }

        info!("Ingestion stopped");
        self.cache.set_ingestion_state(TaskState::Stopped);
        IngestExit::Shutdown
    }

    fn handle(&mut self, raw: &str) {
        match decode(raw) {
            Ok(Report::Sky(sky)) => self.on_sky(&sky),
            Ok(Report::Fix(fix)) => self.on_fix(&fix),
            Ok(Report::Unrecognized) => trace!("Ignoring report: {}", raw),
            Err(e) => warn!("Skipping report: {}", e),
        }
    }

    fn on_sky(&mut self, sky: &SkyReport) {
        for (prn, ss, used) in sky.measured() {
            let tag = self.table.classify(prn);
            if self.cycle.iter().any(|s| s.constellation_tag == tag) {
                continue;
            }
            self.cycle.push(SatelliteReading {
                identifier: prn,
                constellation_tag: tag,
                signal_strength: ss,
                used_in_fix: used,
            });
        }

        self.cache.publish_sky(SkyView {
            satellites: self.cycle.clone(),
        });
    }

    fn on_fix(&mut self, report: &FixReport) {
        let satellite_count = self.cycle.len();
        self.cycle.clear();

        let timestamp = display_timestamp(report.time(), &Local).unwrap_or_else(|e| {
            warn!("Keeping raw timestamp {:?}: {}", report.time(), e);
            report.time().to_string()
        });

        let fix = FixSnapshot {
            altitude: report.altitude(),
            track_heading: report.track(),
            magnetic_track: report.magtrack(),
            magnetic_variation: report.magvar(),
            timestamp,
            speed_kmh: speed_kmh_display(report.speed()),
            fix_status_label: resolve_status_label(report.status(), report.mode()),
            satellite_count,
        };
        debug!(
            "Fix: {} with {} satellites",
            fix.fix_status_label, fix.satellite_count
        );
        self.cache.commit_fix(SkyView::default(), fix);

        if let Some((latitude, longitude)) = report.position() {
            let quantized_speed = match report.speed {
                Some(speed) => quantize_speed(speed),
                None => self
                    .last_track
                    .map(|p| p.quantized_speed)
                    .unwrap_or(TRACK_SPEED_FLOOR),
            };
            let point = TrackPoint {
                latitude,
                longitude,
                quantized_speed,
            };
            self.last_track = Some(point);
            self.cache.publish_track(point);
        }
    }
}
