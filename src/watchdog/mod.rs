mod actuator;
mod error;
mod watchdog;

pub use actuator::{AlarmActuator, FileActuator, LogActuator};
pub use watchdog::{resolve_path, Watchdog};
