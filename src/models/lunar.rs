use serde::{Deserialize, Serialize};

use super::ZodiacSign;

/// Query parameters for `GET /lunar`.
#[derive(Debug, Clone, Deserialize)]
pub struct LunarQuery {
    /// Date in `YYYY/MM/DD` format.
    pub date: String,
}

/// The eight-fold lunar phase wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LunarPhaseName {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl LunarPhaseName {
    /// Phase from the Moon-minus-Sun longitude angle, 45° bins centered
    /// on the cardinal angles.
    pub fn from_phase_angle(angle: f64) -> Self {
        match angle.rem_euclid(360.0) {
            a if a < 22.5 => LunarPhaseName::NewMoon,
            a if a < 67.5 => LunarPhaseName::WaxingCrescent,
            a if a < 112.5 => LunarPhaseName::FirstQuarter,
            a if a < 157.5 => LunarPhaseName::WaxingGibbous,
            a if a < 202.5 => LunarPhaseName::FullMoon,
            a if a < 247.5 => LunarPhaseName::WaningGibbous,
            a if a < 292.5 => LunarPhaseName::LastQuarter,
            a if a < 337.5 => LunarPhaseName::WaningCrescent,
            _ => LunarPhaseName::NewMoon,
        }
    }
}

/// Illuminated fraction of the Moon's disc for a phase angle.
pub fn illumination_from_angle(angle: f64) -> f64 {
    (1.0 - angle.rem_euclid(360.0).to_radians().cos()) / 2.0
}

/// Response body for `GET /lunar`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LunarResponse {
    pub date: String,
    pub phase: LunarPhaseName,
    /// Moon longitude minus Sun longitude, [0, 360).
    pub phase_angle: f64,
    /// Illuminated fraction, [0, 1].
    pub illumination: f64,
    pub moon_sign: ZodiacSign,
    pub moon_degree: f64,
    pub next_new_moon: Option<String>,
    pub next_full_moon: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_bins() {
        assert_eq!(LunarPhaseName::from_phase_angle(0.0), LunarPhaseName::NewMoon);
        assert_eq!(
            LunarPhaseName::from_phase_angle(90.0),
            LunarPhaseName::FirstQuarter
        );
        assert_eq!(
            LunarPhaseName::from_phase_angle(180.0),
            LunarPhaseName::FullMoon
        );
        assert_eq!(
            LunarPhaseName::from_phase_angle(270.0),
            LunarPhaseName::LastQuarter
        );
        assert_eq!(
            LunarPhaseName::from_phase_angle(350.0),
            LunarPhaseName::NewMoon
        );
        assert_eq!(
            LunarPhaseName::from_phase_angle(-90.0),
            LunarPhaseName::LastQuarter
        );
    }

    #[test]
    fn illumination_endpoints() {
        assert!(illumination_from_angle(0.0).abs() < 1e-9);
        assert!((illumination_from_angle(180.0) - 1.0).abs() < 1e-9);
        assert!((illumination_from_angle(90.0) - 0.5).abs() < 1e-9);
    }
}
