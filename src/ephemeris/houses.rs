//! House cusp calculation.

use super::{init_ephemeris, EphemerisError, EPHE_LOCK};
use crate::models::ZodiacPosition;

/// Supported house systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HouseSystem {
    Placidus,
    Koch,
    Equal,
    WholeSign,
}

impl HouseSystem {
    fn code(self) -> i32 {
        (match self {
            HouseSystem::Placidus => b'P',
            HouseSystem::Koch => b'K',
            HouseSystem::Equal => b'E',
            HouseSystem::WholeSign => b'W',
        }) as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            HouseSystem::Placidus => "Placidus",
            HouseSystem::Koch => "Koch",
            HouseSystem::Equal => "Equal",
            HouseSystem::WholeSign => "Whole Sign",
        }
    }
}

/// House cusps and angles for one time and place.
#[derive(Debug, Clone)]
pub struct Houses {
    /// Ascendant longitude (1st house cusp).
    pub ascendant: f64,
    /// Midheaven longitude (10th house cusp).
    pub midheaven: f64,
    /// Twelve cusps, index 0 = 1st house.
    pub cusps: [f64; 12],
}

impl Houses {
    pub fn ascendant_position(&self) -> ZodiacPosition {
        ZodiacPosition::from_longitude(self.ascendant)
    }

    pub fn midheaven_position(&self) -> ZodiacPosition {
        ZodiacPosition::from_longitude(self.midheaven)
    }
}

/// Compute house cusps for a Julian Day (UT) and geographic location.
pub fn calc_houses(
    julian_day: f64,
    latitude: f64,
    longitude: f64,
    system: HouseSystem,
) -> Result<Houses, EphemerisError> {
    init_ephemeris();

    // swe_houses wants a 13-element cusp array (1-indexed) and 10 extra
    // points (asc, mc, armc, vertex, ...)
    let mut raw_cusps: [f64; 13] = [0.0; 13];
    let mut ascmc: [f64; 10] = [0.0; 10];

    let ret = {
        let _guard = EPHE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        unsafe {
            libswisseph_sys::swe_houses(
                julian_day,
                latitude,
                longitude,
                system.code(),
                raw_cusps.as_mut_ptr(),
                ascmc.as_mut_ptr(),
            )
        }
    };

    if ret < 0 {
        return Err(EphemerisError::Houses);
    }

    let mut cusps = [0.0; 12];
    cusps.copy_from_slice(&raw_cusps[1..13]);

    Ok(Houses {
        ascendant: ascmc[0],
        midheaven: ascmc[1],
        cusps,
    })
}

/// House number (1-12) containing an ecliptic longitude.
pub fn house_of(longitude: f64, cusps: &[f64; 12]) -> u8 {
    let lon = longitude.rem_euclid(360.0);

    for i in 0..12 {
        let start = cusps[i];
        let end = cusps[(i + 1) % 12];

        let inside = if start <= end {
            lon >= start && lon < end
        } else {
            // Cusp interval wraps 360°/0°
            lon >= start || lon < end
        };

        if inside {
            return (i + 1) as u8;
        }
    }

    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::date_to_julian_day;
    use chrono::NaiveDate;

    #[test]
    fn house_lookup_handles_wrap() {
        let cusps = [
            350.0, 20.0, 50.0, 80.0, 110.0, 140.0, 170.0, 200.0, 230.0, 260.0, 290.0, 320.0,
        ];
        assert_eq!(house_of(355.0, &cusps), 1);
        assert_eq!(house_of(10.0, &cusps), 1);
        assert_eq!(house_of(20.0, &cusps), 2);
        assert_eq!(house_of(340.0, &cusps), 12);
    }

    #[test]
    fn cusps_cover_the_zodiac() {
        let jd = date_to_julian_day(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
        let houses = calc_houses(jd, 40.7, -74.0, HouseSystem::Placidus).unwrap();

        for cusp in houses.cusps {
            assert!((0.0..360.0).contains(&cusp));
        }
        // The ascendant is the first cusp
        assert!((houses.ascendant - houses.cusps[0]).abs() < 1e-6);
    }

    #[test]
    fn every_longitude_lands_in_a_house() {
        let jd = date_to_julian_day(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
        let houses = calc_houses(jd, 51.5, 0.0, HouseSystem::Placidus).unwrap();

        for deg in 0..360 {
            let house = house_of(deg as f64, &houses.cusps);
            assert!((1..=12).contains(&house));
        }
    }
}
