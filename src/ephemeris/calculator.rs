//! Safe wrappers around the libswisseph-sys FFI bindings.
//!
//! The library is initialized without ephemeris files and falls back to
//! the Moshier analytical ephemeris, which needs no data on disk.

use std::os::raw::c_char;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use thiserror::Error;

use super::{init_ephemeris, EPHE_LOCK};
use crate::models::Body;

const SE_GREG_CAL: i32 = 1;
const SEFLG_SWIEPH: i32 = 2;
const SEFLG_SPEED: i32 = 256;

#[derive(Debug, Error)]
pub enum EphemerisError {
    #[error("Swiss Ephemeris error: {0}")]
    Calc(String),
    #[error("house calculation failed")]
    Houses,
}

/// Raw ephemeris output for one body at one instant.
#[derive(Debug, Clone)]
pub struct BodyPosition {
    /// Ecliptic longitude, degrees [0, 360).
    pub longitude: f64,
    /// Ecliptic latitude, degrees.
    pub latitude: f64,
    /// Distance in AU.
    pub distance: f64,
    /// Longitude speed, degrees per day. Negative means retrograde.
    pub speed_longitude: f64,
    pub is_retrograde: bool,
}

/// Convert a UT date/time to a Julian Day number (Gregorian calendar).
pub fn datetime_to_julian_day(datetime: NaiveDateTime) -> f64 {
    let hour = datetime.hour() as f64
        + datetime.minute() as f64 / 60.0
        + datetime.second() as f64 / 3600.0;

    unsafe {
        libswisseph_sys::swe_julday(
            datetime.year(),
            datetime.month() as i32,
            datetime.day() as i32,
            hour,
            SE_GREG_CAL,
        )
    }
}

/// Julian Day at midnight UT for a date.
pub fn date_to_julian_day(date: NaiveDate) -> f64 {
    datetime_to_julian_day(NaiveDateTime::new(
        date,
        NaiveTime::from_hms_opt(0, 0, 0).unwrap_or_default(),
    ))
}

/// Convert a Julian Day back to a calendar date, dropping the time part.
pub fn julian_day_to_date(julian_day: f64) -> NaiveDate {
    let mut year: i32 = 0;
    let mut month: i32 = 0;
    let mut day: i32 = 0;
    let mut hour: f64 = 0.0;

    unsafe {
        libswisseph_sys::swe_revjul(julian_day, SE_GREG_CAL, &mut year, &mut month, &mut day, &mut hour);
    }

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
        .unwrap_or(NaiveDate::MIN)
}

/// Ecliptic position of a body at a Julian Day (UT).
pub fn calc_body_position(body: Body, julian_day: f64) -> Result<BodyPosition, EphemerisError> {
    init_ephemeris();

    let mut xx: [f64; 6] = [0.0; 6];
    let mut serr: [c_char; 256] = [0; 256];

    let ret = {
        let _guard = EPHE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        unsafe {
            libswisseph_sys::swe_calc_ut(
                julian_day,
                body.swe_id(),
                SEFLG_SWIEPH | SEFLG_SPEED,
                xx.as_mut_ptr(),
                serr.as_mut_ptr(),
            )
        }
    };

    if ret < 0 {
        let message = unsafe {
            std::ffi::CStr::from_ptr(serr.as_ptr())
                .to_string_lossy()
                .into_owned()
        };
        return Err(EphemerisError::Calc(message));
    }

    let speed_longitude = xx[3];
    Ok(BodyPosition {
        longitude: xx[0],
        latitude: xx[1],
        distance: xx[2],
        speed_longitude,
        is_retrograde: body.can_retrograde() && speed_longitude < 0.0,
    })
}

/// Positions of every chart body at a Julian Day.
pub fn calc_all_bodies(julian_day: f64) -> Result<Vec<(Body, BodyPosition)>, EphemerisError> {
    Body::all()
        .iter()
        .map(|&body| calc_body_position(body, julian_day).map(|pos| (body, pos)))
        .collect()
}

/// Moon longitude minus Sun longitude, normalized to [0, 360).
pub fn calc_phase_angle(julian_day: f64) -> Result<f64, EphemerisError> {
    let sun = calc_body_position(Body::Sun, julian_day)?;
    let moon = calc_body_position(Body::Moon, julian_day)?;
    Ok((moon.longitude - sun.longitude).rem_euclid(360.0))
}

/// Next Sun-Moon conjunction at or after the given Julian Day.
pub fn find_next_new_moon(start: f64, max_days: i32) -> Result<Option<f64>, EphemerisError> {
    find_next_phase_angle(start, 0.0, max_days)
}

/// Next Sun-Moon opposition at or after the given Julian Day.
pub fn find_next_full_moon(start: f64, max_days: i32) -> Result<Option<f64>, EphemerisError> {
    find_next_phase_angle(start, 180.0, max_days)
}

/// Scan forward for the moment the phase angle crosses `target`.
///
/// The phase angle grows monotonically at roughly 12°/day, so a crossing
/// shows up as the wrapped distance to the target collapsing from near
/// 360 to near 0 between consecutive samples.
fn find_next_phase_angle(
    start: f64,
    target: f64,
    max_days: i32,
) -> Result<Option<f64>, EphemerisError> {
    let step = 0.5; // half-day samples, ~6° of lunar motion
    let end = start + max_days as f64;

    let rel = |jd: f64| -> Result<f64, EphemerisError> {
        Ok((calc_phase_angle(jd)? - target).rem_euclid(360.0))
    };

    let mut jd = start;
    let mut prev = rel(jd)?;

    while jd < end {
        jd += step;
        let current = rel(jd)?;

        if prev > 300.0 && current < 60.0 {
            // Crossed the target; bisect down to ~1.4 minutes
            let mut low = jd - step;
            let mut high = jd;
            while high - low > 0.001 {
                let mid = (low + high) / 2.0;
                if rel(mid)? > 180.0 {
                    low = mid;
                } else {
                    high = mid;
                }
            }
            return Ok(Some(high));
        }

        prev = current;
    }

    Ok(None)
}

/// Find the next station (direction change) of a body.
///
/// Returns the Julian Day of the station and `true` when the body turns
/// retrograde there, `false` when it turns direct. Bodies that cannot
/// retrograde never station.
pub fn find_next_station(
    body: Body,
    start: f64,
    max_days: i32,
) -> Result<Option<(f64, bool)>, EphemerisError> {
    if !body.can_retrograde() {
        return Ok(None);
    }

    let start_retrograde = calc_body_position(body, start)?.is_retrograde;
    let step = 1.0;
    let end = start + max_days as f64;

    let mut jd = start;
    while jd < end {
        jd += step;
        let pos = calc_body_position(body, jd)?;

        if pos.is_retrograde != start_retrograde {
            // Refine to ~15 minutes
            let mut low = jd - step;
            let mut high = jd;
            while high - low > 0.01 {
                let mid = (low + high) / 2.0;
                if calc_body_position(body, mid)?.is_retrograde == start_retrograde {
                    low = mid;
                } else {
                    high = mid;
                }
            }
            return Ok(Some((high, !start_retrograde)));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jd2000() -> f64 {
        date_to_julian_day(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap())
    }

    #[test]
    fn julian_day_epoch() {
        // Midnight UT on 2000-01-01 is JD 2451544.5
        assert!((jd2000() - 2451544.5).abs() < 1e-6);
    }

    #[test]
    fn julian_day_roundtrip() {
        let date = NaiveDate::from_ymd_opt(1987, 11, 23).unwrap();
        assert_eq!(julian_day_to_date(date_to_julian_day(date)), date);
    }

    #[test]
    fn sun_position_at_epoch() {
        init_ephemeris();
        let sun = calc_body_position(Body::Sun, jd2000()).unwrap();
        // Sun sits in Capricorn around 280° on Jan 1, 2000
        assert!(sun.longitude > 270.0 && sun.longitude < 290.0);
        assert!(!sun.is_retrograde);
    }

    #[test]
    fn all_bodies_in_range() {
        init_ephemeris();
        let positions = calc_all_bodies(jd2000()).unwrap();
        assert_eq!(positions.len(), Body::all().len());
        for (_, pos) in positions {
            assert!((0.0..360.0).contains(&pos.longitude));
        }
    }

    #[test]
    fn phase_angle_in_range() {
        init_ephemeris();
        let angle = calc_phase_angle(jd2000()).unwrap();
        assert!((0.0..360.0).contains(&angle));
    }

    #[test]
    fn finds_new_moon_within_synodic_month() {
        init_ephemeris();
        let jd = jd2000();
        let new_moon = find_next_new_moon(jd, 31).unwrap().unwrap();
        assert!(new_moon > jd && new_moon < jd + 31.0);
        let angle = calc_phase_angle(new_moon).unwrap();
        assert!(angle < 1.0 || angle > 359.0);
    }

    #[test]
    fn full_moon_has_opposition_angle() {
        init_ephemeris();
        let jd = jd2000();
        let full_moon = find_next_full_moon(jd, 31).unwrap().unwrap();
        let angle = calc_phase_angle(full_moon).unwrap();
        assert!((angle - 180.0).abs() < 1.0);
    }

    #[test]
    fn sun_never_stations() {
        assert!(find_next_station(Body::Sun, jd2000(), 365).unwrap().is_none());
    }

    #[test]
    fn mercury_stations_within_four_months() {
        init_ephemeris();
        // Mercury's synodic cycle is ~116 days, so a station must occur
        let station = find_next_station(Body::Mercury, jd2000(), 120).unwrap();
        assert!(station.is_some());
    }
}
