//! Simulation configuration.

use std::path::{Path, PathBuf};

use crate::error::UwgError;
use crate::geometry::RURAL_ROUGHNESS;
use crate::validate::ValidationCollector;
use crate::zone::ClimateZone;

/// Seconds between consecutive EPW records.
pub const DT_WEATHER: u32 = 3600;

/// Suffix appended to the input file stem to name the default output file.
pub const OUTPUT_SUFFIX: &str = "_UWG";

/// Longest month length per calendar month, leap day allowed.
const MAX_DAY: [u8; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Parameters of one urban weather simulation.
///
/// The EPW source path and climate zone are required; every other parameter
/// starts at the generator's default and can be changed with the `with_*`
/// builders. The configuration is validated when the model is created, see
/// [`validate`](Self::validate).
#[derive(Debug, Clone)]
pub struct UwgConfig {
    epw_path: PathBuf,
    output_path: Option<PathBuf>,
    zone: ClimateZone,
    bld_height: f64,
    bld_density: f64,
    ver_to_hor: f64,
    grass_cover: f64,
    tree_cover: f64,
    char_length: f64,
    alb_road: f64,
    sens_anth: f64,
    rur_veg_cover: f64,
    veg_start: u8,
    veg_end: u8,
    h_ubl1: f64,
    h_ubl2: f64,
    h_ref: f64,
    h_wind: f64,
    month: u8,
    day: u8,
    n_day: u32,
    dt_sim: u32,
}

impl UwgConfig {
    /// Creates a configuration for `epw_path` in climate `zone` with default
    /// urban parameters.
    pub fn new(epw_path: impl Into<PathBuf>, zone: ClimateZone) -> Self {
        Self {
            epw_path: epw_path.into(),
            output_path: None,
            zone,
            bld_height: 10.0,
            bld_density: 0.5,
            ver_to_hor: 0.8,
            grass_cover: 0.1,
            tree_cover: 0.1,
            char_length: 1000.0,
            alb_road: 0.1,
            sens_anth: 20.0,
            rur_veg_cover: 0.9,
            veg_start: 4,
            veg_end: 10,
            h_ubl1: 1000.0,
            h_ubl2: 80.0,
            h_ref: 150.0,
            h_wind: 10.0,
            month: 1,
            day: 1,
            n_day: 31,
            dt_sim: 300,
        }
    }

    /// Sets an explicit output path instead of the `_UWG` default.
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Sets the average building height (m).
    pub fn with_bld_height(mut self, height: f64) -> Self {
        self.bld_height = height;
        self
    }

    /// Sets the building plan-area density (fraction).
    pub fn with_bld_density(mut self, density: f64) -> Self {
        self.bld_density = density;
        self
    }

    /// Sets the vertical-to-horizontal (facade to plan area) ratio.
    pub fn with_ver_to_hor(mut self, ratio: f64) -> Self {
        self.ver_to_hor = ratio;
        self
    }

    /// Sets the fraction of urban ground covered by grass and shrubs.
    pub fn with_grass_cover(mut self, fraction: f64) -> Self {
        self.grass_cover = fraction;
        self
    }

    /// Sets the fraction of urban ground covered by trees.
    pub fn with_tree_cover(mut self, fraction: f64) -> Self {
        self.tree_cover = fraction;
        self
    }

    /// Sets the characteristic urban length (m).
    pub fn with_char_length(mut self, length: f64) -> Self {
        self.char_length = length;
        self
    }

    /// Sets the road albedo.
    pub fn with_alb_road(mut self, albedo: f64) -> Self {
        self.alb_road = albedo;
        self
    }

    /// Sets the street-level sensible anthropogenic heat (W/m²).
    pub fn with_sens_anth(mut self, flux: f64) -> Self {
        self.sens_anth = flux;
        self
    }

    /// Sets the rural vegetation cover fraction.
    pub fn with_rur_veg_cover(mut self, fraction: f64) -> Self {
        self.rur_veg_cover = fraction;
        self
    }

    /// Sets the months in which vegetation is active.
    pub fn with_veg_season(mut self, start: u8, end: u8) -> Self {
        self.veg_start = start;
        self.veg_end = end;
        self
    }

    /// Sets the daytime and night-time urban boundary-layer heights (m).
    pub fn with_ubl_heights(mut self, day: f64, night: f64) -> Self {
        self.h_ubl1 = day;
        self.h_ubl2 = night;
        self
    }

    /// Sets the blending height (m).
    pub fn with_h_ref(mut self, height: f64) -> Self {
        self.h_ref = height;
        self
    }

    /// Sets the rural wind measurement height (m).
    pub fn with_h_wind(mut self, height: f64) -> Self {
        self.h_wind = height;
        self
    }

    /// Sets the simulation window: start month, start day and length in days.
    pub fn with_period(mut self, month: u8, day: u8, n_day: u32) -> Self {
        self.month = month;
        self.day = day;
        self.n_day = n_day;
        self
    }

    /// Sets the simulation sub-step (s).
    pub fn with_dt_sim(mut self, seconds: u32) -> Self {
        self.dt_sim = seconds;
        self
    }

    // --- Accessors ---

    /// Returns the EPW source path.
    pub fn epw_path(&self) -> &Path {
        &self.epw_path
    }

    /// Returns where the adjusted EPW will be written.
    ///
    /// Without an explicit output path this is the source path with
    /// [`OUTPUT_SUFFIX`] appended to the file stem.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .clone()
            .unwrap_or_else(|| default_output_path(&self.epw_path))
    }

    /// Returns the climate zone.
    pub fn zone(&self) -> ClimateZone {
        self.zone
    }

    /// Returns the average building height (m).
    pub fn bld_height(&self) -> f64 {
        self.bld_height
    }

    /// Returns the building plan-area density.
    pub fn bld_density(&self) -> f64 {
        self.bld_density
    }

    /// Returns the vertical-to-horizontal ratio.
    pub fn ver_to_hor(&self) -> f64 {
        self.ver_to_hor
    }

    /// Returns the grass cover fraction.
    pub fn grass_cover(&self) -> f64 {
        self.grass_cover
    }

    /// Returns the tree cover fraction.
    pub fn tree_cover(&self) -> f64 {
        self.tree_cover
    }

    /// Returns the characteristic urban length (m).
    pub fn char_length(&self) -> f64 {
        self.char_length
    }

    /// Returns the road albedo.
    pub fn alb_road(&self) -> f64 {
        self.alb_road
    }

    /// Returns the sensible anthropogenic heat (W/m²).
    pub fn sens_anth(&self) -> f64 {
        self.sens_anth
    }

    /// Returns the rural vegetation cover fraction.
    pub fn rur_veg_cover(&self) -> f64 {
        self.rur_veg_cover
    }

    /// Returns the vegetation season as `(start month, end month)`.
    pub fn veg_season(&self) -> (u8, u8) {
        (self.veg_start, self.veg_end)
    }

    /// Returns the daytime boundary-layer height (m).
    pub fn h_ubl_day(&self) -> f64 {
        self.h_ubl1
    }

    /// Returns the night-time boundary-layer height (m).
    pub fn h_ubl_night(&self) -> f64 {
        self.h_ubl2
    }

    /// Returns the blending height (m).
    pub fn h_ref(&self) -> f64 {
        self.h_ref
    }

    /// Returns the rural wind measurement height (m).
    pub fn h_wind(&self) -> f64 {
        self.h_wind
    }

    /// Returns the simulation window as `(month, day, n_day)`.
    pub fn period(&self) -> (u8, u8, u32) {
        (self.month, self.day, self.n_day)
    }

    /// Returns the simulation sub-step (s).
    pub fn dt_sim(&self) -> u32 {
        self.dt_sim
    }

    /// Validates every parameter, reporting all violations together.
    ///
    /// # Errors
    ///
    /// Returns [`UwgError::Config`] listing each out-of-range parameter.
    pub fn validate(&self) -> Result<(), UwgError> {
        let mut c = ValidationCollector::new();

        if self.epw_path.as_os_str().is_empty() {
            c.push("epw_path must not be empty");
        }
        if self
            .output_path
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            c.push("output_path must not be empty when given");
        }

        c.positive("bldheight", self.bld_height);
        c.fraction("blddensity", self.bld_density);
        c.positive("vertohor", self.ver_to_hor);
        c.fraction("grasscover", self.grass_cover);
        c.fraction("treecover", self.tree_cover);
        if self.grass_cover + self.tree_cover > 1.0 {
            c.push(format!(
                "grasscover + treecover must not exceed 1, got {}",
                self.grass_cover + self.tree_cover
            ));
        }

        c.positive("charlength", self.char_length);
        c.fraction("albroad", self.alb_road);
        c.non_negative("sensanth", self.sens_anth);
        c.fraction("rurvegcover", self.rur_veg_cover);
        c.month("vegstart", self.veg_start);
        c.month("vegend", self.veg_end);

        c.positive("h_ubl1", self.h_ubl1);
        c.positive("h_ubl2", self.h_ubl2);
        if self.h_ubl1 <= self.h_ubl2 {
            c.push(format!(
                "h_ubl1 ({}) must exceed h_ubl2 ({})",
                self.h_ubl1, self.h_ubl2
            ));
        }
        c.positive("h_ref", self.h_ref);
        if self.h_ref <= self.bld_height {
            c.push(format!(
                "h_ref ({}) must exceed bldheight ({})",
                self.h_ref, self.bld_height
            ));
        }
        let h_wind_in_range = self.h_wind.is_finite()
            && self.h_wind > RURAL_ROUGHNESS
            && self.h_wind < self.h_ref;
        if !h_wind_in_range {
            c.push(format!(
                "h_wind must be finite and between the rural roughness length \
                 {RURAL_ROUGHNESS} m and h_ref ({} m), got {}",
                self.h_ref, self.h_wind
            ));
        }

        c.month("month", self.month);
        if (1..=12).contains(&self.month) {
            let max_day = MAX_DAY[usize::from(self.month - 1)];
            if !(1..=max_day).contains(&self.day) {
                c.push(format!(
                    "day must be 1..={max_day} for month {}, got {}",
                    self.month, self.day
                ));
            }
        }
        if self.n_day == 0 {
            c.push("nday must be at least 1");
        }
        if self.dt_sim == 0 || DT_WEATHER % self.dt_sim != 0 {
            c.push(format!(
                "dtsim must divide {DT_WEATHER} s evenly, got {}",
                self.dt_sim
            ));
        }

        c.finish()
    }
}

/// Derives the default output path: `dir/name.epw` becomes `dir/name_UWG.epw`.
pub fn default_output_path(epw_path: &Path) -> PathBuf {
    let stem = epw_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    epw_path.with_file_name(format!("{stem}{OUTPUT_SUFFIX}.epw"))
}
