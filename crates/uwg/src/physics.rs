//! Bulk urban-climate relations used by the canopy model.
//!
//! Every function here is pure and works in SI units with temperatures in °C.

/// Volumetric heat capacity of air, ρ·c_p (J/m³/K).
pub const AIR_HEAT_CAPACITY: f64 = 1.2 * 1005.0;

/// Magnus-Tetens coefficient (dimensionless).
const MAGNUS_A: f64 = 17.27;

/// Magnus-Tetens temperature offset (°C).
const MAGNUS_B: f64 = 237.7;

/// Saturation vapour pressure over water (hPa), Magnus-Tetens form.
///
/// # Scientific Reference
/// Alduchov, O.A. and Eskridge, R.E. (1996). "Improved Magnus Form
/// Approximation of Saturation Vapor Pressure." Journal of Applied
/// Meteorology, 35(4), 601-609.
pub fn saturation_vapour_pressure(temp: f64) -> f64 {
    6.112 * (MAGNUS_A * temp / (MAGNUS_B + temp)).exp()
}

/// Relative humidity (%) of air at `dry_bulb` with dew point `dew_point`.
///
/// Clamped to `[0, 100]`.
pub fn relative_humidity(dry_bulb: f64, dew_point: f64) -> f64 {
    let ratio = saturation_vapour_pressure(dew_point) / saturation_vapour_pressure(dry_bulb);
    (100.0 * ratio).clamp(0.0, 100.0)
}

/// Sky-view factor of the floor of an infinite 2-D canyon with height to
/// width ratio `aspect_ratio`.
///
/// # Scientific Reference
/// Oke, T.R. (1988). "Street design and urban canopy layer climate."
/// Energy and Buildings, 11, 103-113.
pub fn sky_view_factor(aspect_ratio: f64) -> f64 {
    (1.0 + aspect_ratio * aspect_ratio).sqrt() - aspect_ratio
}

/// Maximum nocturnal canyon heat island (°C) for a given sky-view factor.
///
/// # Scientific Reference
/// Oke, T.R. (1981). "Canyon geometry and the nocturnal urban heat island."
/// Journal of Climatology, 1, 237-254.
pub fn max_heat_island(svf: f64) -> f64 {
    (15.27 - 13.88 * svf).max(0.0)
}

/// Heat-island damping by wind: `U^-1/2`, with calm air capped at 1 m/s.
pub fn wind_damping(wind_speed: f64) -> f64 {
    wind_speed.max(1.0).powf(-0.5)
}

/// Heat-island damping by cloud: overcast nights lose less longwave, so the
/// urban-rural contrast shrinks. `opaque_cover` is in tenths (0..=10).
pub fn cloud_damping(opaque_cover: f64) -> f64 {
    1.0 - 0.08 * opaque_cover.clamp(0.0, 10.0)
}

/// Neutral logarithmic wind profile: scales `speed` measured at `z_from` to
/// height `z_to` over a surface with roughness `z0` and displacement `d`.
pub fn log_wind(speed: f64, z_from: f64, z_to: f64, z0: f64, d: f64) -> f64 {
    speed * ((z_to - d) / z0).ln() / ((z_from - d) / z0).ln()
}

/// Temperature increment (°C) from an anthropogenic heat flux `flux` (W/m²)
/// advected over `fetch` metres by wind `speed` and mixed through a layer
/// `depth` metres deep.
pub fn anthropogenic_increment(flux: f64, fetch: f64, speed: f64, depth: f64) -> f64 {
    flux * fetch / (AIR_HEAT_CAPACITY * speed * depth)
}

/// Exact first-order relaxation of `current` toward `target` over `dt`
/// seconds with time constant `tau` seconds.
pub fn relax(current: f64, target: f64, dt: f64, tau: f64) -> f64 {
    target + (current - target) * (-dt / tau).exp()
}

/// Rounds to `decimals` decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
