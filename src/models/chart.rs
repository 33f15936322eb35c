//! Request parsing and response types for chart computation.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Aspect, Body, ZodiacPosition};
use crate::ephemeris::EphemerisError;

/// Errors produced while building a chart from request input.
#[derive(Debug, Error)]
pub enum ChartError {
    /// Malformed date or time string. The message mirrors the service's
    /// original wire contract.
    #[error("Invalid date or time format: {0}")]
    Format(String),

    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },

    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
}

/// Query parameters for `GET /chart`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartQuery {
    /// Local birth date, `YYYY/MM/DD`.
    pub date: String,
    /// Local birth time, `HH:MM`.
    pub time: String,
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
    /// UTC offset in hours.
    pub tz: f64,
    /// Include minor aspects in the aspect list.
    #[serde(default)]
    pub minor: bool,
}

/// Query parameters for `GET /positions`.
#[derive(Debug, Clone, Deserialize)]
pub struct PositionsQuery {
    pub date: String,
    /// Defaults to 00:00.
    pub time: Option<String>,
    /// UTC offset in hours, defaults to 0 (UT).
    pub tz: Option<f64>,
}

/// Parse a `YYYY/MM/DD` date string.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ChartError> {
    let parts: Vec<&str> = raw.trim().split('/').collect();
    if parts.len() != 3 {
        return Err(ChartError::Format(format!(
            "Invalid date format. Must be YYYY/MM/DD, got '{}'",
            raw.trim()
        )));
    }

    let mut nums = [0i32; 3];
    for (slot, part) in nums.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|_| ChartError::Format(format!("'{}' is not a number", part)))?;
    }

    NaiveDate::from_ymd_opt(nums[0], nums[1] as u32, nums[2] as u32).ok_or_else(|| {
        ChartError::Format(format!("'{}' is not a valid calendar date", raw.trim()))
    })
}

/// Parse an `HH:MM` time string.
pub fn parse_time(raw: &str) -> Result<NaiveTime, ChartError> {
    let parts: Vec<&str> = raw.trim().split(':').collect();
    if parts.len() != 2 {
        return Err(ChartError::Format(format!(
            "Invalid time format. Must be HH:MM, got '{}'",
            raw.trim()
        )));
    }

    let hour: u32 = parts[0]
        .parse()
        .map_err(|_| ChartError::Format(format!("'{}' is not a number", parts[0])))?;
    let minute: u32 = parts[1]
        .parse()
        .map_err(|_| ChartError::Format(format!("'{}' is not a number", parts[1])))?;

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| {
        ChartError::Format(format!("'{}' is not a valid time of day", raw.trim()))
    })
}

/// Validate geographic coordinates and a UTC offset.
pub fn validate_location(lat: f64, lon: f64, tz: f64) -> Result<(), ChartError> {
    if !(-90.0..=90.0).contains(&lat) || !lat.is_finite() {
        return Err(ChartError::OutOfRange {
            field: "lat",
            value: lat,
        });
    }
    if !(-180.0..=180.0).contains(&lon) || !lon.is_finite() {
        return Err(ChartError::OutOfRange {
            field: "lon",
            value: lon,
        });
    }
    validate_utc_offset(tz)
}

/// Validate a UTC offset in hours. Real offsets span UTC-12 to UTC+14.
pub fn validate_utc_offset(tz: f64) -> Result<(), ChartError> {
    if !(-12.0..=14.0).contains(&tz) || !tz.is_finite() {
        return Err(ChartError::OutOfRange {
            field: "tz",
            value: tz,
        });
    }
    Ok(())
}

/// Shift a local date/time by a UTC offset to get Universal Time.
pub fn local_to_utc(date: NaiveDate, time: NaiveTime, utc_offset_hours: f64) -> NaiveDateTime {
    let offset_secs = (utc_offset_hours * 3600.0).round() as i64;
    NaiveDateTime::new(date, time) - Duration::seconds(offset_secs)
}

/// A body's placement within a chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyPlacement {
    pub body: Body,
    #[serde(flatten)]
    pub position: ZodiacPosition,
    /// House number 1-12; absent when no location was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house: Option<u8>,
    pub retrograde: bool,
}

/// House cusps as computed for a chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseCusps {
    pub system: String,
    /// Twelve cusps, first house first.
    pub cusps: Vec<ZodiacPosition>,
}

/// Response body for `GET /chart`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartResponse {
    pub date: String,
    pub time: String,
    pub latitude: f64,
    pub longitude: f64,
    pub utc_offset_hours: f64,
    pub julian_day: f64,
    pub bodies: Vec<BodyPlacement>,
    pub ascendant: ZodiacPosition,
    pub midheaven: ZodiacPosition,
    pub houses: HouseCusps,
    pub aspects: Vec<Aspect>,
}

/// Response body for `GET /positions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionsResponse {
    pub date: String,
    pub time: String,
    pub julian_day: f64,
    pub bodies: Vec<BodyPlacement>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_slash_date() {
        let d = parse_date("2000/01/01").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
        // Whitespace tolerated
        assert!(parse_date(" 1987/11/23 ").is_ok());
    }

    #[test]
    fn rejects_bad_dates() {
        assert!(parse_date("2000-01-01").is_err());
        assert!(parse_date("2000/01").is_err());
        assert!(parse_date("2000/13/01").is_err());
        assert!(parse_date("2000/02/30").is_err());
        assert!(parse_date("abcd/01/01").is_err());
    }

    #[test]
    fn date_error_message_keeps_wire_contract() {
        let err = parse_date("nonsense").unwrap_err();
        assert!(err.to_string().starts_with("Invalid date or time format:"));
    }

    #[test]
    fn parses_colon_time() {
        let t = parse_time("09:30").unwrap();
        assert_eq!(t, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
    }

    #[test]
    fn rejects_bad_times() {
        assert!(parse_time("09:30:00").is_err());
        assert!(parse_time("25:00").is_err());
        assert!(parse_time("10:61").is_err());
        assert!(parse_time("ten:30").is_err());
    }

    #[test]
    fn location_bounds() {
        assert!(validate_location(40.7, -74.0, -5.0).is_ok());
        assert!(validate_location(90.0, 180.0, 14.0).is_ok());
        assert!(validate_location(91.0, 0.0, 0.0).is_err());
        assert!(validate_location(0.0, -181.0, 0.0).is_err());
        assert!(validate_location(0.0, 0.0, 15.0).is_err());
        assert!(validate_location(f64::NAN, 0.0, 0.0).is_err());
    }

    #[test]
    fn utc_shift_crosses_midnight() {
        let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let time = NaiveTime::from_hms_opt(1, 0, 0).unwrap();
        // UTC+8: 01:00 local is 17:00 the previous day in UT
        let utc = local_to_utc(date, time, 8.0);
        assert_eq!(
            utc,
            NaiveDate::from_ymd_opt(1999, 12, 31)
                .unwrap()
                .and_hms_opt(17, 0, 0)
                .unwrap()
        );
        // Half-hour offsets round to the nearest second
        let utc = local_to_utc(date, time, 5.5);
        assert_eq!(
            utc,
            NaiveDate::from_ymd_opt(1999, 12, 31)
                .unwrap()
                .and_hms_opt(19, 30, 0)
                .unwrap()
        );
    }
}
