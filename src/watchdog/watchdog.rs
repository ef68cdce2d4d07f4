use chrono::{DateTime, Local};
use log::{error, info, warn};
use std::fmt::Write as _;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use super::actuator::AlarmActuator;
use super::error::WatchdogError;
use crate::config::WatchdogConfig;
use crate::gnss::DISPLAY_FORMAT;
use crate::snapshot::{Freshness, SnapshotCache, TaskState};

/// Periodically checks how long ago the monitored log file was written.
pub struct Watchdog {
    config: WatchdogConfig,
    cache: Arc<SnapshotCache>,
    actuator: Box<dyn AlarmActuator>,
    shutdown: watch::Receiver<bool>,
    /// Last level successfully written to the actuator
    alarm: Option<bool>,
}

impl Watchdog {
    pub fn new(
        config: WatchdogConfig,
        cache: Arc<SnapshotCache>,
        actuator: Box<dyn AlarmActuator>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            config,
            cache,
            actuator,
            shutdown,
            alarm: None,
        }
    }

    pub async fn run(mut self) {
        self.cache.set_watchdog_state(TaskState::Running);
        info!(
            "Watching {} every {:?}",
            self.config.log_file, self.config.interval
        );

        let mut ticker = tokio::time::interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            if *self.shutdown.borrow() {
                break;
            }
            tokio::select! {
                _ = ticker.tick() => self.tick(Local::now()),
                _ = self.shutdown.changed() => break,
            }
        }

        self.cache.set_watchdog_state(TaskState::Stopped);
        info!("Watchdog stopped");
    }

    pub fn tick(&mut self, now: DateTime<Local>) {
        let freshness = match self.check(now) {
            Ok(freshness) => freshness,
            Err(e) => {
                warn!("Log freshness check skipped: {}", e);
                return;
            }
        };

        let (alarm, forced) = match &freshness {
            Freshness::Fresh {
                staleness_seconds, ..
            } => (self.is_stale(*staleness_seconds), false),
            Freshness::FileAbsent | Freshness::Pending => (true, true),
        };

        self.cache.publish_freshness(freshness);
        self.drive(alarm, forced);
    }

    fn is_stale(&self, staleness_seconds: i64) -> bool {
        let staleness = Duration::from_secs(u64::try_from(staleness_seconds).unwrap_or(0));
        staleness >= self.config.threshold
    }

    fn check(&self, now: DateTime<Local>) -> Result<Freshness, WatchdogError> {
        let path = resolve_path(&self.config.log_file, &now)?;
        let metadata = match std::fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Freshness::FileAbsent),
            Err(e) => return Err(e.into()),
        };

        let modified: DateTime<Local> = metadata.modified()?.into();
        // An mtime ahead of our clock counts as just written.
        let staleness_seconds = (now - modified).num_seconds().max(0);

        Ok(Freshness::Fresh {
            last_modified: modified.format(DISPLAY_FORMAT).to_string(),
            staleness_seconds,
        })
    }

    fn drive(&mut self, alarm: bool, forced: bool) {
        if !forced && self.alarm == Some(alarm) {
            return;
        }

        if let Err(e) = self.actuator.set_alarm(alarm) {
            error!("Cannot drive status indicator: {}", e);
            return;
        }

        if self.alarm != Some(alarm) {
            if alarm {
                warn!("Log file {} is stale or missing", self.config.log_file);
            } else {
                info!("Log file {} is being written", self.config.log_file);
            }
        }
        self.alarm = Some(alarm);
    }
}

/// Expand strftime escapes in the configured log path against `now`.
pub fn resolve_path(pattern: &str, now: &DateTime<Local>) -> Result<PathBuf, WatchdogError> {
    let mut path = String::new();
    write!(path, "{}", now.format(pattern))
        .map_err(|_| WatchdogError::Pattern(pattern.to_string()))?;
    Ok(PathBuf::from(path))
}
