use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Optional TOML configuration for the `uwg` subcommand.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct UwgToml {
    /// Supplemental urban weather generator parameters.
    #[serde(default)]
    pub parameters: ParametersToml,
}

/// `[parameters]` table: supplemental urban weather generator parameters.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParametersToml {
    /// Characteristic urban length (m).
    #[serde(default = "default_charlength")]
    pub charlength: f64,
    /// Road albedo (0-1).
    #[serde(default = "default_albroad")]
    pub albroad: f64,
    /// Street-level sensible anthropogenic heat (W/m²).
    #[serde(default = "default_sensanth")]
    pub sensanth: f64,
    /// Rural vegetation cover fraction (0-1).
    #[serde(default = "default_rurvegcover")]
    pub rurvegcover: f64,
    /// Month vegetation becomes active (1-12).
    #[serde(default = "default_vegstart")]
    pub vegstart: u8,
    /// Month vegetation becomes inactive (1-12).
    #[serde(default = "default_vegend")]
    pub vegend: u8,
    /// Daytime urban boundary-layer height (m).
    #[serde(default = "default_h_ubl1")]
    pub h_ubl1: f64,
    /// Night-time urban boundary-layer height (m).
    #[serde(default = "default_h_ubl2")]
    pub h_ubl2: f64,
    /// Blending height (m).
    #[serde(default = "default_h_ref")]
    pub h_ref: f64,
    /// Rural wind measurement height (m).
    #[serde(default = "default_h_wind")]
    pub h_wind: f64,
    /// Simulation start month.
    #[serde(default = "default_month")]
    pub month: u8,
    /// Simulation start day of month.
    #[serde(default = "default_day")]
    pub day: u8,
    /// Simulation length (days).
    #[serde(default = "default_nday")]
    pub nday: u32,
    /// Simulation time step (s); must divide 3600.
    #[serde(default = "default_dtsim")]
    pub dtsim: u32,
}

impl Default for ParametersToml {
    fn default() -> Self {
        Self {
            charlength: default_charlength(),
            albroad: default_albroad(),
            sensanth: default_sensanth(),
            rurvegcover: default_rurvegcover(),
            vegstart: default_vegstart(),
            vegend: default_vegend(),
            h_ubl1: default_h_ubl1(),
            h_ubl2: default_h_ubl2(),
            h_ref: default_h_ref(),
            h_wind: default_h_wind(),
            month: default_month(),
            day: default_day(),
            nday: default_nday(),
            dtsim: default_dtsim(),
        }
    }
}

fn default_charlength() -> f64 {
    1000.0
}
fn default_albroad() -> f64 {
    0.1
}
fn default_sensanth() -> f64 {
    20.0
}
fn default_rurvegcover() -> f64 {
    0.9
}
fn default_vegstart() -> u8 {
    4
}
fn default_vegend() -> u8 {
    10
}
fn default_h_ubl1() -> f64 {
    1000.0
}
fn default_h_ubl2() -> f64 {
    80.0
}
fn default_h_ref() -> f64 {
    150.0
}
fn default_h_wind() -> f64 {
    10.0
}
fn default_month() -> u8 {
    1
}
fn default_day() -> u8 {
    1
}
fn default_nday() -> u32 {
    31
}
fn default_dtsim() -> u32 {
    300
}

/// Reads and parses a `uwg` TOML configuration file.
pub fn load(path: &Path) -> Result<UwgToml> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read uwg config: {}", path.display()))?;
    toml::from_str(&toml_str)
        .with_context(|| format!("failed to parse uwg config: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_takes_defaults() {
        let cfg: UwgToml = toml::from_str("").unwrap();
        let p = cfg.parameters;
        assert_eq!(p.charlength, 1000.0);
        assert_eq!(p.sensanth, 20.0);
        assert_eq!((p.vegstart, p.vegend), (4, 10));
        assert_eq!((p.month, p.day, p.nday), (1, 1, 31));
        assert_eq!(p.dtsim, 300);
    }

    #[test]
    fn partial_table_keeps_other_defaults() {
        let cfg: UwgToml = toml::from_str(
            r#"
            [parameters]
            month = 7
            nday = 14
            albroad = 0.25
            "#,
        )
        .unwrap();
        let p = cfg.parameters;
        assert_eq!(p.month, 7);
        assert_eq!(p.nday, 14);
        assert_eq!(p.albroad, 0.25);
        assert_eq!(p.h_ref, 150.0);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<UwgToml>("[parameters]\nbldheight = 10.0\n").is_err());
        assert!(toml::from_str::<UwgToml>("[model]\nx = 1\n").is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = load(Path::new("/tmp/canopy_missing_config.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read uwg config"));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("uwg.toml");
        std::fs::write(&path, "[parameters]\ndtsim = 600\n").unwrap();
        assert_eq!(load(&path).unwrap().parameters.dtsim, 600);
    }
}
