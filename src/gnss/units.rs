use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// Placeholder carried when a report has no `time` member.
pub const ZERO_TIMESTAMP: &str = "0";

pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const MPS_TO_KMH: f64 = 3.6;
const TRACK_SPEED_STEP: f64 = 5.0;
pub const TRACK_SPEED_FLOOR: f64 = 0.5;

/// m/s to km/h, two decimals.
pub fn speed_kmh_display(speed_mps: f64) -> String {
    format!("{:.2}", speed_mps * MPS_TO_KMH)
}

/// Nearest multiple of 5, never below 0.5. Keeps the map marker from
/// jittering on a noisy speed.
pub fn quantize_speed(speed: f64) -> f64 {
    ((speed / TRACK_SPEED_STEP).round() * TRACK_SPEED_STEP).max(TRACK_SPEED_FLOOR)
}

/// Convert a wire timestamp (`2024-05-01T12:34:56.000Z`) into `tz` for
/// display. The zero placeholder passes through untouched.
pub fn display_timestamp<Tz>(raw: &str, tz: &Tz) -> Result<String, chrono::ParseError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if raw == ZERO_TIMESTAMP {
        return Ok(raw.to_string());
    }
    let parsed = DateTime::parse_from_rfc3339(raw)?;
    Ok(parsed.with_timezone(tz).format(DISPLAY_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn speed_conversion() {
        assert_eq!(speed_kmh_display(10.0), "36.00");
        assert_eq!(speed_kmh_display(0.0), "0.00");
        assert_eq!(speed_kmh_display(1.234), "4.44");
    }

    #[test]
    fn speed_quantization() {
        assert_eq!(quantize_speed(7.0), 5.0);
        assert_eq!(quantize_speed(0.0), 0.5);
        assert_eq!(quantize_speed(12.0), 10.0);
        assert_eq!(quantize_speed(13.0), 15.0);
        assert_eq!(quantize_speed(2.0), 0.5);
        assert_eq!(quantize_speed(-3.0), 0.5);
    }

    #[test]
    fn timestamp_into_utc() {
        let shown = display_timestamp("2024-05-01T12:34:56.000Z", &Utc).unwrap();
        assert_eq!(shown, "2024-05-01 12:34:56");
    }

    #[test]
    fn timestamp_into_offset() {
        let cst = FixedOffset::east_opt(8 * 3600).unwrap();
        let shown = display_timestamp("2024-05-01T20:00:00Z", &cst).unwrap();
        assert_eq!(shown, "2024-05-02 04:00:00");
    }

    #[test]
    fn zero_timestamp_untouched() {
        assert_eq!(display_timestamp(ZERO_TIMESTAMP, &Utc).unwrap(), "0");
    }

    #[test]
    fn garbage_timestamp_is_an_error() {
        assert!(display_timestamp("yesterday", &Utc).is_err());
    }
}
