//! Pure conversion functions: CLI arguments and TOML config -> crate API config types.

use anyhow::Result;

use canopy_uwg::{ClimateZone, UwgConfig};

use crate::cli::UwgArgs;
use crate::config::ParametersToml;

/// Parses a climate zone code such as `"4A"` or `"3B-CA"`.
///
/// Unknown codes surface as a `ConfigError` from the generator crate.
pub fn parse_zone(s: &str) -> Result<ClimateZone> {
    Ok(s.parse::<ClimateZone>()?)
}

/// Builds a [`UwgConfig`] from the `uwg` arguments and supplemental
/// parameters.
///
/// The configuration is not validated here; that happens when the model is
/// created so every violation is reported at once.
pub fn build_uwg_config(args: &UwgArgs, params: &ParametersToml) -> Result<UwgConfig> {
    let zone = parse_zone(&args.zone)?;
    let mut cfg = UwgConfig::new(&args.epw_path, zone)
        .with_bld_height(args.bldheight)
        .with_bld_density(args.blddensity)
        .with_ver_to_hor(args.vertohor)
        .with_grass_cover(args.grasscover)
        .with_tree_cover(args.treecover)
        .with_char_length(params.charlength)
        .with_alb_road(params.albroad)
        .with_sens_anth(params.sensanth)
        .with_rur_veg_cover(params.rurvegcover)
        .with_veg_season(params.vegstart, params.vegend)
        .with_ubl_heights(params.h_ubl1, params.h_ubl2)
        .with_h_ref(params.h_ref)
        .with_h_wind(params.h_wind)
        .with_period(params.month, params.day, params.nday)
        .with_dt_sim(params.dtsim);
    if let Some(ref out) = args.output_path {
        cfg = cfg.with_output_path(out);
    }
    Ok(cfg)
}
