//! Integration tests for canopy-uwg failure modes.

use std::path::{Path, PathBuf};

use canopy_uwg::{ClimateZone, Uwg, UwgConfig, UwgError, UwgSession};

const MISSING: &str = "/tmp/canopy_uwg_missing_input.epw";

/// One week of January hourly data, enough to generate but not to cover the
/// default 31-day period.
fn week_content() -> String {
    let mut out = String::from(
        "LOCATION,Short,ST,CTY,TMY3,000000,45.0,7.0,1.0,100.0\n\
DESIGN CONDITIONS,0\n\
TYPICAL/EXTREME PERIODS,0\n\
GROUND TEMPERATURES,0\n\
HOLIDAYS/DAYLIGHT SAVINGS,No,0,0,0\n\
COMMENTS 1,\n\
COMMENTS 2,\n\
DATA PERIODS,1,1,Data,Sunday, 1/ 1, 1/ 7\n",
    );
    for d in 1..=7u8 {
        for h in 1..=24u8 {
            out.push_str(&format!(
                "2001,1,{d},{h},60,?9?9,3.0,-1.0,75,100000,0,0,280,0,0,0,0,0,0,0,90,2.0,8,8,15,2000,9,999999999,5,0.1,0,88,0.2,0,0\n"
            ));
        }
    }
    out
}

fn write_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write fixture");
    path
}

fn config_error_count(err: UwgError) -> usize {
    match err {
        UwgError::Config { count, .. } => count,
        other => panic!("expected Config, got {other:?}"),
    }
}

#[test]
fn density_out_of_range_fails_before_file_access() {
    for density in [-0.1, 1.1] {
        let config = UwgConfig::new(MISSING, ClimateZone::Zone1A).with_bld_density(density);
        let err = Uwg::new(config).unwrap_err();
        assert_eq!(err.kind(), "ConfigError");
        assert_eq!(config_error_count(err), 1);
    }
}

#[test]
fn cover_out_of_range_fails_before_file_access() {
    let config = UwgConfig::new(MISSING, ClimateZone::Zone1A)
        .with_grass_cover(1.5)
        .with_tree_cover(-0.2);
    let err = Uwg::new(config).unwrap_err();
    assert_eq!(err.kind(), "ConfigError");
    let message = err.to_string();
    assert!(message.contains("grasscover"), "{message}");
    assert!(message.contains("treecover"), "{message}");
}

#[test]
fn all_violations_reported_together() {
    let config = UwgConfig::new("", ClimateZone::Zone5A)
        .with_bld_height(0.0)
        .with_ver_to_hor(-1.0)
        .with_dt_sim(7);
    let err = Uwg::new(config).unwrap_err();
    assert_eq!(config_error_count(err), 4);
}

#[test]
fn missing_file_fails_generate() {
    let uwg = Uwg::new(UwgConfig::new(MISSING, ClimateZone::Zone1A)).expect("valid config");
    let err = uwg.generate().unwrap_err();
    assert!(matches!(err, UwgError::Epw(_)), "got {err:?}");
    assert_eq!(err.kind(), "FileAccessError");
}

#[test]
fn malformed_file_fails_generate_with_format_error() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_fixture(dir.path(), "bad.epw", "this is not weather data\n");

    let err = Uwg::new(UwgConfig::new(&path, ClimateZone::Zone1A))
        .and_then(Uwg::generate)
        .unwrap_err();
    assert_eq!(err.kind(), "FormatError");
}

#[test]
fn simulate_before_generate_is_not_initialized() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_fixture(dir.path(), "short.epw", &week_content());

    let mut session =
        UwgSession::new(UwgConfig::new(&path, ClimateZone::Zone4C).with_period(1, 1, 7)).unwrap();
    let err = session.simulate().unwrap_err();
    assert_eq!(err.kind(), "NotInitializedError");
    assert_eq!(err.to_string(), "cannot simulate: model is configured");

    // The rejected call leaves the session usable.
    session.generate().unwrap();
    session.simulate().unwrap();
    session.write().unwrap();
}

#[test]
fn period_past_end_of_data_is_simulation_error() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_fixture(dir.path(), "short.epw", &week_content());

    // Default period is 31 days from January 1st.
    let err = Uwg::new(UwgConfig::new(&path, ClimateZone::Zone4C))
        .and_then(Uwg::generate)
        .unwrap_err();
    assert_eq!(err.kind(), "SimulationError");
}

#[test]
fn period_start_missing_from_data_is_simulation_error() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_fixture(dir.path(), "short.epw", &week_content());

    let err = Uwg::new(UwgConfig::new(&path, ClimateZone::Zone4C).with_period(6, 1, 1))
        .and_then(Uwg::generate)
        .unwrap_err();
    assert!(matches!(err, UwgError::Simulation { .. }), "got {err:?}");
}

#[test]
fn unwritable_output_is_file_access_error() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_fixture(dir.path(), "short.epw", &week_content());
    let target = dir.path().join("no-such-dir").join("out.epw");

    let err = Uwg::new(
        UwgConfig::new(&path, ClimateZone::Zone4C)
            .with_period(1, 1, 7)
            .with_output_path(&target),
    )
    .and_then(Uwg::generate)
    .and_then(Uwg::simulate)
    .and_then(Uwg::write)
    .unwrap_err();
    assert_eq!(err.kind(), "FileAccessError");
}
