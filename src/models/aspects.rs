use serde::{Deserialize, Serialize};
use std::fmt;

/// Angular relationships between two chart points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectType {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
    // Minor aspects
    SemiSextile,
    SemiSquare,
    Sesquiquadrate,
    Quincunx,
}

impl AspectType {
    /// Exact angle of the aspect in degrees.
    pub fn angle(&self) -> f64 {
        match self {
            AspectType::Conjunction => 0.0,
            AspectType::SemiSextile => 30.0,
            AspectType::SemiSquare => 45.0,
            AspectType::Sextile => 60.0,
            AspectType::Square => 90.0,
            AspectType::Trine => 120.0,
            AspectType::Sesquiquadrate => 135.0,
            AspectType::Quincunx => 150.0,
            AspectType::Opposition => 180.0,
        }
    }

    /// Allowed deviation from the exact angle.
    pub fn orb(&self) -> f64 {
        match self {
            AspectType::Conjunction | AspectType::Opposition | AspectType::Trine => 8.0,
            AspectType::Square => 7.0,
            AspectType::Sextile => 6.0,
            AspectType::Quincunx => 3.0,
            AspectType::SemiSextile | AspectType::SemiSquare | AspectType::Sesquiquadrate => 2.0,
        }
    }

    pub fn is_major(&self) -> bool {
        matches!(
            self,
            AspectType::Conjunction
                | AspectType::Sextile
                | AspectType::Square
                | AspectType::Trine
                | AspectType::Opposition
        )
    }

    pub fn major() -> &'static [AspectType] {
        &[
            AspectType::Conjunction,
            AspectType::Sextile,
            AspectType::Square,
            AspectType::Trine,
            AspectType::Opposition,
        ]
    }

    pub fn all() -> &'static [AspectType] {
        &[
            AspectType::Conjunction,
            AspectType::SemiSextile,
            AspectType::SemiSquare,
            AspectType::Sextile,
            AspectType::Square,
            AspectType::Trine,
            AspectType::Sesquiquadrate,
            AspectType::Quincunx,
            AspectType::Opposition,
        ]
    }
}

impl fmt::Display for AspectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AspectType::Conjunction => "conjunction",
            AspectType::SemiSextile => "semi-sextile",
            AspectType::SemiSquare => "semi-square",
            AspectType::Sextile => "sextile",
            AspectType::Square => "square",
            AspectType::Trine => "trine",
            AspectType::Sesquiquadrate => "sesquiquadrate",
            AspectType::Quincunx => "quincunx",
            AspectType::Opposition => "opposition",
        };
        write!(f, "{}", name)
    }
}

/// Check whether two ecliptic longitudes form an aspect.
///
/// Returns the matched aspect and its orb (distance from exact).
pub fn find_aspect(
    longitude1: f64,
    longitude2: f64,
    include_minor: bool,
) -> Option<(AspectType, f64)> {
    let aspects = if include_minor {
        AspectType::all()
    } else {
        AspectType::major()
    };

    // Shortest angular separation
    let diff = (longitude1 - longitude2).abs() % 360.0;
    let separation = if diff > 180.0 { 360.0 - diff } else { diff };

    for aspect in aspects {
        let orb = (separation - aspect.angle()).abs();
        if orb <= aspect.orb() {
            return Some((*aspect, orb));
        }
    }

    None
}

/// An aspect between two bodies in a chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aspect {
    pub body_a: String,
    pub body_b: String,
    pub aspect: AspectType,
    /// Degrees from exact.
    pub orb: f64,
    /// Within one degree of exact.
    pub is_exact: bool,
}

impl Aspect {
    pub fn new(body_a: String, body_b: String, aspect: AspectType, orb: f64) -> Self {
        Self {
            body_a,
            body_b,
            aspect,
            is_exact: orb < 1.0,
            orb,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_major_aspects() {
        let (aspect, orb) = find_aspect(10.0, 130.5, false).unwrap();
        assert_eq!(aspect, AspectType::Trine);
        assert!((orb - 0.5).abs() < 1e-9);

        let (aspect, _) = find_aspect(5.0, 185.0, false).unwrap();
        assert_eq!(aspect, AspectType::Opposition);
    }

    #[test]
    fn separation_wraps_around_zero() {
        // 355° and 5° are 10° apart, within conjunction orb
        let (aspect, orb) = find_aspect(355.0, 3.0, false).unwrap();
        assert_eq!(aspect, AspectType::Conjunction);
        assert!((orb - 8.0).abs() < 1e-9);
    }

    #[test]
    fn minor_aspects_only_when_requested() {
        assert!(find_aspect(0.0, 150.0, false).is_none());
        let (aspect, _) = find_aspect(0.0, 150.0, true).unwrap();
        assert_eq!(aspect, AspectType::Quincunx);
    }

    #[test]
    fn no_aspect_outside_orb() {
        assert!(find_aspect(0.0, 20.0, false).is_none());
    }

    #[test]
    fn exactness_threshold() {
        let a = Aspect::new("Sun".into(), "Moon".into(), AspectType::Square, 0.4);
        assert!(a.is_exact);
        let b = Aspect::new("Sun".into(), "Moon".into(), AspectType::Square, 2.1);
        assert!(!b.is_exact);
    }
}
