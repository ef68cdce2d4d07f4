use strum_macros::Display;

/// gpsd overloads `status`: a value of exactly 1 means "look at `mode`".
const MODE_BASED_STATUS: i64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FixMode {
    Unknown,
    #[strum(serialize = "no fix")]
    NoFix,
    #[strum(serialize = "Normal Mode 2D")]
    Fix2d,
    #[strum(serialize = "Normal Mode 3D")]
    Fix3d,
}

impl FixMode {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => FixMode::NoFix,
            2 => FixMode::Fix2d,
            3 => FixMode::Fix3d,
            _ => FixMode::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FixStatus {
    Unknown,
    Normal,
    #[strum(serialize = "DGPS")]
    Dgps,
    #[strum(serialize = "RTK FIX")]
    RtkFix,
    #[strum(serialize = "RTK FLOAT")]
    RtkFloat,
    #[strum(serialize = "DR FIX")]
    DeadReckoning,
    #[strum(serialize = "GNSSDR")]
    GnssDeadReckoning,
    #[strum(serialize = "Time (surveyed)")]
    TimeSurveyed,
    Simulated,
    #[strum(serialize = "P(Y)")]
    PrecisionCode,
}

impl FixStatus {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => FixStatus::Normal,
            2 => FixStatus::Dgps,
            3 => FixStatus::RtkFix,
            4 => FixStatus::RtkFloat,
            5 => FixStatus::DeadReckoning,
            6 => FixStatus::GnssDeadReckoning,
            7 => FixStatus::TimeSurveyed,
            8 => FixStatus::Simulated,
            9 => FixStatus::PrecisionCode,
            _ => FixStatus::Unknown,
        }
    }
}

/// Human label for a TPV `status`/`mode` pair.
pub fn resolve_status_label(status: i64, mode: i64) -> String {
    if status == MODE_BASED_STATUS {
        FixMode::from_code(mode).to_string()
    } else {
        FixStatus::from_code(status).to_string()
    }
}
