use serde::{Deserialize, Serialize};
use std::fmt;

/// The twelve zodiac signs, in ecliptic order starting at 0° Aries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

const SIGNS: [ZodiacSign; 12] = [
    ZodiacSign::Aries,
    ZodiacSign::Taurus,
    ZodiacSign::Gemini,
    ZodiacSign::Cancer,
    ZodiacSign::Leo,
    ZodiacSign::Virgo,
    ZodiacSign::Libra,
    ZodiacSign::Scorpio,
    ZodiacSign::Sagittarius,
    ZodiacSign::Capricorn,
    ZodiacSign::Aquarius,
    ZodiacSign::Pisces,
];

impl ZodiacSign {
    /// Sign containing the given ecliptic longitude (degrees).
    pub fn from_longitude(longitude: f64) -> Self {
        let normalized = longitude.rem_euclid(360.0);
        SIGNS[(normalized / 30.0).floor() as usize % 12]
    }

    /// Index in ecliptic order (0 = Aries, 11 = Pisces).
    pub fn index(&self) -> usize {
        SIGNS.iter().position(|s| s == self).unwrap_or(0)
    }

    /// Ecliptic longitude where this sign begins.
    pub fn start_degree(&self) -> f64 {
        self.index() as f64 * 30.0
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        };
        write!(f, "{}", name)
    }
}

/// Celestial bodies included in a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    /// True lunar North Node.
    NorthNode,
}

impl Body {
    pub fn all() -> &'static [Body] {
        &[
            Body::Sun,
            Body::Moon,
            Body::Mercury,
            Body::Venus,
            Body::Mars,
            Body::Jupiter,
            Body::Saturn,
            Body::Uranus,
            Body::Neptune,
            Body::Pluto,
            Body::NorthNode,
        ]
    }

    /// Swiss Ephemeris body number (SE_SUN..SE_TRUE_NODE).
    pub fn swe_id(&self) -> i32 {
        match self {
            Body::Sun => 0,
            Body::Moon => 1,
            Body::Mercury => 2,
            Body::Venus => 3,
            Body::Mars => 4,
            Body::Jupiter => 5,
            Body::Saturn => 6,
            Body::Uranus => 7,
            Body::Neptune => 8,
            Body::Pluto => 9,
            Body::NorthNode => 11,
        }
    }

    /// Sun and Moon never show apparent retrograde motion.
    pub fn can_retrograde(&self) -> bool {
        !matches!(self, Body::Sun | Body::Moon)
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
            Body::NorthNode => "North Node",
        };
        write!(f, "{}", name)
    }
}

/// A point on the ecliptic expressed as sign plus degree within the sign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZodiacPosition {
    pub sign: ZodiacSign,
    /// Degree within the sign, [0, 30).
    pub degree: f64,
    /// Full ecliptic longitude, [0, 360).
    pub longitude: f64,
}

impl ZodiacPosition {
    pub fn from_longitude(longitude: f64) -> Self {
        let normalized = longitude.rem_euclid(360.0);
        let sign = ZodiacSign::from_longitude(normalized);
        Self {
            sign,
            degree: normalized - sign.start_degree(),
            longitude: normalized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_from_longitude() {
        assert_eq!(ZodiacSign::from_longitude(0.0), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::from_longitude(45.0), ZodiacSign::Taurus);
        assert_eq!(ZodiacSign::from_longitude(280.0), ZodiacSign::Capricorn);
        assert_eq!(ZodiacSign::from_longitude(359.99), ZodiacSign::Pisces);
        // Wraps past 360
        assert_eq!(ZodiacSign::from_longitude(365.0), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::from_longitude(-10.0), ZodiacSign::Pisces);
    }

    #[test]
    fn position_degree_within_sign() {
        let pos = ZodiacPosition::from_longitude(123.4);
        assert_eq!(pos.sign, ZodiacSign::Leo);
        assert!((pos.degree - 3.4).abs() < 1e-9);
        assert!((pos.longitude - 123.4).abs() < 1e-9);
    }

    #[test]
    fn all_bodies_have_distinct_swe_ids() {
        let mut ids: Vec<i32> = Body::all().iter().map(|b| b.swe_id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), Body::all().len());
    }
}
