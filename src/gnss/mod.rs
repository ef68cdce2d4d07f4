mod constellation;
mod error;
mod report;
mod status;
mod units;

pub use constellation::{classify, ConstellationTable};
pub use report::{decode, FixReport, Report, SkyReport};
pub use status::resolve_status_label;
pub use units::{
    display_timestamp, quantize_speed, speed_kmh_display, DISPLAY_FORMAT, TRACK_SPEED_FLOOR,
    ZERO_TIMESTAMP,
};
