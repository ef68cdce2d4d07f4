use log::info;
use std::path::PathBuf;

use super::error::ActuatorError;

/// Output driven by the watchdog: `true` raises the alarm.
pub trait AlarmActuator: Send {
    fn set_alarm(&mut self, alarm: bool) -> Result<(), ActuatorError>;
}

/// Reports the level in the log only.
pub struct LogActuator;

impl AlarmActuator for LogActuator {
    fn set_alarm(&mut self, alarm: bool) -> Result<(), ActuatorError> {
        if alarm {
            info!("Status indicator: ALARM");
        } else {
            info!("Status indicator: OK");
        }
        Ok(())
    }
}

/// Writes `1`/`0` into a file, typically a sysfs LED `brightness` or GPIO
/// `value` node.
pub struct FileActuator {
    path: PathBuf,
    active_low: bool,
}

impl FileActuator {
    pub fn new(path: PathBuf, active_low: bool) -> Self {
        Self { path, active_low }
    }

    fn level(&self, alarm: bool) -> &'static str {
        if alarm != self.active_low {
            "1"
        } else {
            "0"
        }
    }
}

impl AlarmActuator for FileActuator {
    fn set_alarm(&mut self, alarm: bool) -> Result<(), ActuatorError> {
        std::fs::write(&self.path, self.level(alarm)).map_err(|e| ActuatorError::Write {
            path: self.path.display().to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_actuator_levels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("value");

        let mut high = FileActuator::new(path.clone(), false);
        high.set_alarm(true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1");
        high.set_alarm(false).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "0");

        let mut low = FileActuator::new(path.clone(), true);
        low.set_alarm(true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "0");
    }

    #[test]
    fn file_actuator_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut actuator = FileActuator::new(dir.path().join("gone").join("value"), false);
        assert!(matches!(
            actuator.set_alarm(true),
            Err(ActuatorError::Write { .. })
        ));
    }
}
