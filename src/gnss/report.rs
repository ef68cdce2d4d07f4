use serde::Deserialize;

use super::error::DecodeError;
use super::units::ZERO_TIMESTAMP;

/// One gpsd JSON report, keyed on its `class` member.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "class")]
pub enum Report {
    #[serde(rename = "SKY")]
    Sky(SkyReport),
    #[serde(rename = "TPV")]
    Fix(FixReport),
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SkyReport {
    #[serde(default)]
    pub satellites: Vec<SkySatellite>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SkySatellite {
    #[serde(rename = "PRN")]
    pub prn: u32,
    #[serde(default)]
    pub ss: Option<f64>,
    #[serde(default)]
    pub used: bool,
}

impl SkyReport {
    /// `(prn, signal strength, used)` for every satellite with a measured
    /// signal strength. Entries without one are skipped.
    pub fn measured(&self) -> impl Iterator<Item = (u32, f64, bool)> + '_ {
        self.satellites
            .iter()
            .filter_map(|s| s.ss.map(|ss| (s.prn, ss, s.used)))
    }
}

/// Time/position/velocity report. Every member is optional on the wire;
/// the accessors fall back to zero.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FixReport {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub alt: Option<f64>,
    #[serde(rename = "altMSL")]
    pub alt_msl: Option<f64>,
    #[serde(rename = "altHAE")]
    pub alt_hae: Option<f64>,
    pub track: Option<f64>,
    pub magtrack: Option<f64>,
    pub magvar: Option<f64>,
    pub speed: Option<f64>,
    pub time: Option<String>,
    pub mode: Option<i64>,
    pub status: Option<i64>,
}

impl FixReport {
    /// `alt`, or the newer `altMSL` / `altHAE` members.
    pub fn altitude(&self) -> f64 {
        self.alt.or(self.alt_msl).or(self.alt_hae).unwrap_or(0.0)
    }

    pub fn track(&self) -> f64 {
        self.track.unwrap_or(0.0)
    }

    pub fn magtrack(&self) -> f64 {
        self.magtrack.unwrap_or(0.0)
    }

    pub fn magvar(&self) -> f64 {
        self.magvar.unwrap_or(0.0)
    }

    pub fn speed(&self) -> f64 {
        self.speed.unwrap_or(0.0)
    }

    pub fn mode(&self) -> i64 {
        self.mode.unwrap_or(0)
    }

    pub fn status(&self) -> i64 {
        self.status.unwrap_or(0)
    }

    pub fn time(&self) -> &str {
        self.time.as_deref().unwrap_or(ZERO_TIMESTAMP)
    }

    /// Latitude and longitude, only when both are present.
    pub fn position(&self) -> Option<(f64, f64)> {
        Some((self.lat?, self.lon?))
    }
}

pub fn decode(raw: impl AsRef<[u8]>) -> Result<Report, DecodeError> {
    Ok(serde_json::from_slice(raw.as_ref())?)
}
