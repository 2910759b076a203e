//! Urban canyon geometry derived from the configuration.

use crate::config::UwgConfig;
use crate::physics;

/// Roughness length of the rural measurement site (m).
pub const RURAL_ROUGHNESS: f64 = 0.1;

/// Storey height used to count floors (m).
const FLOOR_HEIGHT: f64 = 3.05;

/// Road fraction below which the canyon is treated as fully closed.
const MIN_ROAD_FRACTION: f64 = 1e-3;

/// Road albedo the heat-island correlation was fitted for.
const REFERENCE_ROAD_ALBEDO: f64 = 0.1;

/// Static description of the urban canopy.
#[derive(Debug, Clone, PartialEq)]
pub struct UrbanGeometry {
    /// Plan-area fraction not covered by buildings.
    pub road_fraction: f64,
    /// Canyon height-to-width ratio.
    pub aspect_ratio: f64,
    /// Sky-view factor of the canyon floor.
    pub sky_view_factor: f64,
    /// Plan-area fraction that is sealed (buildings plus bare street).
    pub impervious_fraction: f64,
    /// Number of storeys of the average building.
    pub floors: f64,
    /// Potential night-time canyon heat island before weather damping (°C).
    pub heat_island_potential: f64,
    /// Ratio of canopy wind to rural wind at measurement height.
    pub wind_transfer: f64,
    /// Thermal response time of the urban fabric (s).
    pub time_constant: f64,
}

impl UrbanGeometry {
    /// Derives the canopy geometry from a validated configuration.
    pub fn from_config(config: &UwgConfig) -> Self {
        let height = config.bld_height();
        let density = config.bld_density();

        let road_fraction = 1.0 - density;
        // Infinite 2-D canyons: facade area per plan area is 2H / (W + B).
        let aspect_ratio = config.ver_to_hor() / (2.0 * road_fraction.max(MIN_ROAD_FRACTION));
        let sky_view_factor = physics::sky_view_factor(aspect_ratio);

        let vegetated = config.grass_cover() + config.tree_cover();
        let impervious_fraction = density + road_fraction * (1.0 - vegetated);

        let albedo_scale = (1.0 - config.alb_road()) / (1.0 - REFERENCE_ROAD_ALBEDO);
        let rural_contrast = 0.5 + 0.5 * config.rur_veg_cover();
        let heat_island_potential = physics::max_heat_island(sky_view_factor)
            * impervious_fraction
            * albedo_scale
            * rural_contrast;

        // Rural wind is lifted to the blending height, then brought down to
        // roof level through the urban roughness layer.
        let z0_urban = 0.1 * height;
        let displacement = 0.7 * height;
        let lift = physics::log_wind(1.0, config.h_wind(), config.h_ref(), RURAL_ROUGHNESS, 0.0);
        let wind_transfer =
            physics::log_wind(lift, config.h_ref(), height, z0_urban, displacement);

        let time_constant = (1.0 + 0.2 * height * density) * 3600.0;

        Self {
            road_fraction,
            aspect_ratio,
            sky_view_factor,
            impervious_fraction,
            floors: height / FLOOR_HEIGHT,
            heat_island_potential,
            wind_transfer,
            time_constant,
        }
    }
}
