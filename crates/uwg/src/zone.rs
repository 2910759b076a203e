//! ASHRAE climate zones and the building waste-heat profile they imply.

use std::fmt;
use std::str::FromStr;

use crate::error::UwgError;

/// ASHRAE 90.1 climate zone of the simulated city.
///
/// The zone selects the building stock's heating and cooling intensity, which
/// sets the seasonal waste heat rejected into the urban canyon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClimateZone {
    /// Very hot, humid.
    Zone1A,
    /// Hot, humid.
    Zone2A,
    /// Hot, dry.
    Zone2B,
    /// Warm, humid.
    Zone3A,
    /// Warm, dry, coastal California.
    Zone3BCa,
    /// Warm, dry.
    Zone3B,
    /// Warm, marine.
    Zone3C,
    /// Mixed, humid.
    Zone4A,
    /// Mixed, dry.
    Zone4B,
    /// Mixed, marine.
    Zone4C,
    /// Cool, humid.
    Zone5A,
    /// Cool, dry.
    Zone5B,
    /// Cool, marine.
    Zone5C,
    /// Cold, humid.
    Zone6A,
    /// Cold, dry.
    Zone6B,
    /// Very cold.
    Zone7,
    /// Subarctic.
    Zone8,
}

/// Waste heat per floor area for heating, indexed by thermal zone number - 1 (W/m²).
const HEATING_INTENSITY: [f64; 8] = [0.0, 0.5, 1.0, 1.8, 2.6, 3.4, 4.2, 5.0];

/// Waste heat per floor area for cooling, indexed by thermal zone number - 1 (W/m²).
const COOLING_INTENSITY: [f64; 8] = [5.0, 4.2, 3.4, 2.6, 1.8, 1.0, 0.5, 0.0];

/// Damping applied to marine zones, whose mild climate runs HVAC less.
const MARINE_DAMPING: f64 = 0.7;

impl ClimateZone {
    /// Every zone, in ASHRAE order.
    pub const ALL: [ClimateZone; 17] = [
        Self::Zone1A,
        Self::Zone2A,
        Self::Zone2B,
        Self::Zone3A,
        Self::Zone3BCa,
        Self::Zone3B,
        Self::Zone3C,
        Self::Zone4A,
        Self::Zone4B,
        Self::Zone4C,
        Self::Zone5A,
        Self::Zone5B,
        Self::Zone5C,
        Self::Zone6A,
        Self::Zone6B,
        Self::Zone7,
        Self::Zone8,
    ];

    /// Zone code as written on the command line, e.g. `"3B-CA"`.
    pub fn code(self) -> &'static str {
        match self {
            Self::Zone1A => "1A",
            Self::Zone2A => "2A",
            Self::Zone2B => "2B",
            Self::Zone3A => "3A",
            Self::Zone3BCa => "3B-CA",
            Self::Zone3B => "3B",
            Self::Zone3C => "3C",
            Self::Zone4A => "4A",
            Self::Zone4B => "4B",
            Self::Zone4C => "4C",
            Self::Zone5A => "5A",
            Self::Zone5B => "5B",
            Self::Zone5C => "5C",
            Self::Zone6A => "6A",
            Self::Zone6B => "6B",
            Self::Zone7 => "7",
            Self::Zone8 => "8",
        }
    }

    /// Thermal zone number (1 = hottest, 8 = coldest).
    pub fn thermal_number(self) -> u8 {
        // The code always starts with the digit.
        self.code().as_bytes()[0] - b'0'
    }

    fn is_marine(self) -> bool {
        matches!(
            self,
            Self::Zone3BCa | Self::Zone3C | Self::Zone4C | Self::Zone5C
        )
    }

    /// Building waste heat per floor area in W/m², as `(heating, cooling)`.
    pub fn waste_heat_intensity(self) -> (f64, f64) {
        let idx = usize::from(self.thermal_number() - 1);
        let damping = if self.is_marine() { MARINE_DAMPING } else { 1.0 };
        (
            HEATING_INTENSITY[idx] * damping,
            COOLING_INTENSITY[idx] * damping,
        )
    }
}

impl fmt::Display for ClimateZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ClimateZone {
    type Err = UwgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|z| z.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let codes: Vec<&str> = Self::ALL.iter().map(|z| z.code()).collect();
                UwgError::config(format!(
                    "unknown climate zone {wanted:?} (expected one of {})",
                    codes.join(", ")
                ))
            })
    }
}
