//! Hourly integration of the urban canopy model.

use std::ops::Range;

use canopy_epw::{EpwField, EpwFile, EpwRecord};
use tracing::{debug, info};

use crate::config::{DT_WEATHER, UwgConfig};
use crate::error::UwgError;
use crate::geometry::{RURAL_ROUGHNESS, UrbanGeometry};
use crate::physics;

/// Heat-island fraction retained while the sun is up.
const DAYTIME_FRACTION: f64 = 0.35;

/// Wind assumed when the rural record has none (m/s).
const CALM_WIND: f64 = 1.0;

/// Lower bound on the wind that ventilates anthropogenic heat (m/s).
const MIN_MIXING_WIND: f64 = 0.5;

/// Lower bound on canyon wind when the rural site is not calm (m/s).
const MIN_CANYON_WIND: f64 = 0.1;

/// Evaporative cooling per unit grass cover.
const GRASS_COOLING: f64 = 0.25;

/// Evaporative and shading cooling per unit tree cover.
const TREE_COOLING: f64 = 0.45;

/// Model output for one simulated hour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourDiagnostics {
    /// Index of the record within the weather file.
    pub index: usize,
    /// Rural dry bulb temperature (°C).
    pub rural_dry_bulb: f64,
    /// Urban dry bulb temperature written to the output (°C).
    pub urban_dry_bulb: f64,
    /// Urban minus rural temperature before rounding (°C).
    pub heat_island: f64,
    /// Share of the heat island caused by anthropogenic heat (°C).
    pub anthropogenic: f64,
}

/// Finds the records covered by the simulation window.
///
/// # Errors
///
/// Returns [`UwgError::Simulation`] if the start date is not in the file or
/// the window runs past its end.
pub(crate) fn simulation_window(
    file: &EpwFile,
    month: u8,
    day: u8,
    n_day: u32,
) -> Result<Range<usize>, UwgError> {
    let start = file
        .records()
        .iter()
        .position(|r| r.month == month && r.day == day && r.hour == 1)
        .ok_or_else(|| {
            UwgError::simulation(format!(
                "weather data has no record for {month}/{day} hour 1"
            ))
        })?;
    let end = start + n_day as usize * 24;
    if end > file.len() {
        return Err(UwgError::simulation(format!(
            "{n_day}-day period from {month}/{day} needs records up to {end}, weather data has {}",
            file.len()
        )));
    }
    Ok(start..end)
}

/// Month as experienced by the site: southern sites are shifted six months so
/// seasonal rules written for the north apply.
fn seasonal_month(month: u8, southern: bool) -> u8 {
    if southern { (month + 5) % 12 + 1 } else { month }
}

fn vegetation_active(month: u8, (start, end): (u8, u8)) -> bool {
    if start <= end {
        (start..=end).contains(&month)
    } else {
        month >= start || month <= end
    }
}

/// Share of the heating and cooling waste heat that is active in `month`.
fn hvac_weights(month: u8) -> (f64, f64) {
    match month {
        12 | 1 | 2 => (1.0, 0.0),
        6..=8 => (0.0, 1.0),
        _ => (0.5, 0.5),
    }
}

/// Hourly forcing state shared by every simulated hour.
pub(crate) struct CanopyModel<'a> {
    config: &'a UwgConfig,
    geometry: &'a UrbanGeometry,
    southern: bool,
}

impl<'a> CanopyModel<'a> {
    pub(crate) fn new(config: &'a UwgConfig, geometry: &'a UrbanGeometry, southern: bool) -> Self {
        Self {
            config,
            geometry,
            southern,
        }
    }

    /// Equilibrium heat island for one rural record, split into
    /// `(total, anthropogenic)`.
    fn target(&self, rec: &EpwRecord) -> (f64, f64) {
        let cfg = self.config;
        let month = seasonal_month(rec.month, self.southern);

        let wind = if rec.is_missing(EpwField::WindSpeed) {
            CALM_WIND
        } else {
            rec.wind_speed()
        };
        let cloud = if rec.is_missing(EpwField::OpaqueSkyCover) {
            0.0
        } else {
            rec.get(EpwField::OpaqueSkyCover)
        };
        let daylight = if rec.is_missing(EpwField::GlobalHorizontalRadiation) {
            (7..=18).contains(&rec.hour)
        } else {
            rec.get(EpwField::GlobalHorizontalRadiation) > 0.0
        };

        let diurnal = if daylight { DAYTIME_FRACTION } else { 1.0 };
        let vegetation = if vegetation_active(month, cfg.veg_season()) {
            1.0 - GRASS_COOLING * cfg.grass_cover() - TREE_COOLING * cfg.tree_cover()
        } else {
            1.0
        };
        let canyon = self.geometry.heat_island_potential
            * physics::wind_damping(wind)
            * physics::cloud_damping(cloud)
            * diurnal
            * vegetation;

        let (heat, cool) = cfg.zone().waste_heat_intensity();
        let (w_heat, w_cool) = hvac_weights(month);
        let building_heat = (w_heat * heat + w_cool * cool) * self.geometry.floors * cfg.bld_density();
        let flux = cfg.sens_anth() + building_heat;
        let mixing_wind = physics::log_wind(wind, cfg.h_wind(), cfg.h_ref(), RURAL_ROUGHNESS, 0.0)
            .max(MIN_MIXING_WIND);
        let depth = if daylight {
            cfg.h_ubl_day()
        } else {
            cfg.h_ubl_night()
        };
        let anthropogenic =
            physics::anthropogenic_increment(flux, cfg.char_length(), mixing_wind, depth);

        (canyon + anthropogenic, anthropogenic)
    }

    /// Runs the model over `window`, returning the adjusted file and one
    /// diagnostics entry per simulated hour.
    ///
    /// Records outside the window, and hours whose rural dry bulb is missing,
    /// are copied unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`UwgError::Simulation`] if the state becomes non-finite.
    pub(crate) fn run(
        &self,
        rural: &EpwFile,
        window: Range<usize>,
    ) -> Result<(EpwFile, Vec<HourDiagnostics>), UwgError> {
        let steps = DT_WEATHER / self.config.dt_sim();
        let dt = f64::from(self.config.dt_sim());
        let tau = self.geometry.time_constant;

        let mut urban = rural.clone();
        let mut diagnostics = Vec::with_capacity(window.len());
        // (heat island, last target); starts at equilibrium with the first hour.
        let mut state: Option<(f64, f64)> = None;

        for idx in window {
            let rec = &rural.records()[idx];
            if rec.is_missing(EpwField::DryBulb) {
                debug!(index = idx, "rural dry bulb missing, hour copied unchanged");
                continue;
            }

            let (target, anthropogenic) = self.target(rec);
            let (mut heat_island, previous) = state.unwrap_or((target, target));
            // Forcing is interpolated linearly across the sub-steps of the hour.
            for k in 1..=steps {
                let frac = f64::from(k) / f64::from(steps);
                let forcing = previous + (target - previous) * frac;
                heat_island = physics::relax(heat_island, forcing, dt, tau);
            }
            if !heat_island.is_finite() {
                return Err(UwgError::simulation(format!(
                    "non-finite heat island at record {idx} ({}/{} hour {})",
                    rec.month, rec.day, rec.hour
                )));
            }
            state = Some((heat_island, target));

            let urban_dry_bulb = physics::round_to(rec.dry_bulb() + heat_island, 1);
            let out = &mut urban.records_mut()[idx];
            out.set(EpwField::DryBulb, urban_dry_bulb);

            if !rec.is_missing(EpwField::DewPoint) {
                let dew_point = rec.dew_point().min(urban_dry_bulb);
                out.set(EpwField::DewPoint, dew_point);
                out.set(
                    EpwField::RelativeHumidity,
                    physics::round_to(physics::relative_humidity(urban_dry_bulb, dew_point), 0),
                );
            }

            if !rec.is_missing(EpwField::WindSpeed) && rec.wind_speed() > 0.0 {
                let canyon_wind =
                    (rec.wind_speed() * self.geometry.wind_transfer).max(MIN_CANYON_WIND);
                out.set(EpwField::WindSpeed, physics::round_to(canyon_wind, 1));
            }

            diagnostics.push(HourDiagnostics {
                index: idx,
                rural_dry_bulb: rec.dry_bulb(),
                urban_dry_bulb,
                heat_island,
                anthropogenic,
            });
        }

        if let Some(summary) = summarize(&diagnostics) {
            info!(
                n_hours = diagnostics.len(),
                mean_heat_island = summary.0,
                max_heat_island = summary.1,
                "canopy model complete"
            );
        }
        Ok((urban, diagnostics))
    }
}

/// Mean and maximum heat island over the simulated hours.
pub(crate) fn summarize(diagnostics: &[HourDiagnostics]) -> Option<(f64, f64)> {
    if diagnostics.is_empty() {
        return None;
    }
    let sum: f64 = diagnostics.iter().map(|d| d.heat_island).sum();
    let max = diagnostics
        .iter()
        .map(|d| d.heat_island)
        .fold(f64::NEG_INFINITY, f64::max);
    Some((sum / diagnostics.len() as f64, max))
}
