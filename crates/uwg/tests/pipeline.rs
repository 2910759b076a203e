//! Integration tests for the canopy-uwg generate → simulate → write pipeline.

use std::path::{Path, PathBuf};

use canopy_epw::{EpwField, read_epw, read_metadata};
use canopy_uwg::{ClimateZone, Uwg, UwgConfig, UwgSession};

const DAYS_IN_MONTH: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Builds a non-leap year of hourly EPW content. With `diurnal` the
/// temperature follows a daily cycle and the sun is up from 7 to 18;
/// otherwise every hour is the same calm, clear night.
fn year_content(city: &str, latitude: f64, diurnal: bool) -> String {
    let mut out = format!(
        "LOCATION,{city},ST,CTY,TMY3,722190,{latitude},-84.43,-5.0,308.0\n\
DESIGN CONDITIONS,0\n\
TYPICAL/EXTREME PERIODS,0\n\
GROUND TEMPERATURES,0\n\
HOLIDAYS/DAYLIGHT SAVINGS,No,0,0,0\n\
COMMENTS 1,pipeline fixture\n\
COMMENTS 2,hourly synthetic data\n\
DATA PERIODS,1,1,Data,Sunday, 1/ 1,12/31\n"
    );
    for (m, &days) in DAYS_IN_MONTH.iter().enumerate() {
        for d in 1..=days {
            for h in 1..=24u8 {
                let (t, ghr) = if diurnal {
                    let phase = (f64::from(h) - 9.0) / 24.0 * std::f64::consts::TAU;
                    let ghr = if (7..=18).contains(&h) { 400 } else { 0 };
                    (12.0 + 6.0 * phase.sin(), ghr)
                } else {
                    (8.0, 0)
                };
                out.push_str(&format!(
                    "1999,{},{d},{h},60,?9?9,{t:.1},4.0,70,101325,0,0,300,{ghr},0,0,0,0,0,0,180,3.0,5,2,20,7000,9,999999999,10,0.1,0,88,0.2,0,0\n",
                    m + 1
                ));
            }
        }
    }
    out
}

fn write_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write fixture");
    path
}

/// The reference scenario: a mid-rise, half-covered neighbourhood in zone 1A.
fn scenario(path: &Path) -> UwgConfig {
    UwgConfig::new(path, ClimateZone::Zone1A)
        .with_bld_height(10.0)
        .with_bld_density(0.5)
        .with_ver_to_hor(0.8)
        .with_grass_cover(0.1)
        .with_tree_cover(0.1)
}

#[test]
fn scenario_writes_uwg_file_next_to_input() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_fixture(dir.path(), "sample.epw", &year_content("Atlanta", 33.64, true));

    let written = Uwg::new(scenario(&path))
        .expect("valid config")
        .generate()
        .expect("generate succeeds")
        .simulate()
        .expect("simulate succeeds")
        .write()
        .expect("write succeeds");

    let expected = dir.path().join("sample_UWG.epw");
    assert_eq!(written.output_path(), expected.as_path());
    assert!(expected.exists());
    assert_eq!(read_epw(&expected).expect("output readable").len(), 8760);
}

#[test]
fn output_preserves_location() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_fixture(dir.path(), "sample.epw", &year_content("Atlanta", 33.64, true));

    let written = Uwg::new(scenario(&path))
        .and_then(Uwg::generate)
        .and_then(Uwg::simulate)
        .and_then(Uwg::write)
        .expect("pipeline succeeds");

    let rural = read_metadata(&path).expect("rural metadata").to_map();
    let urban = read_metadata(written.output_path())
        .expect("urban metadata")
        .to_map();
    assert_eq!(rural, urban);
}

#[test]
fn hours_outside_window_are_unchanged() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_fixture(dir.path(), "sample.epw", &year_content("Atlanta", 33.64, true));
    let config = scenario(&path).with_period(3, 1, 7);

    let generated = Uwg::new(config).unwrap().generate().unwrap();
    let window = generated.window();
    assert_eq!(window.len(), 7 * 24);
    let rural = generated.rural().clone();

    let written = generated.simulate().unwrap().write().unwrap();
    let urban = read_epw(written.output_path()).unwrap();

    for (i, (r, u)) in rural.records().iter().zip(urban.records()).enumerate() {
        if !window.contains(&i) {
            assert_eq!(r, u, "record {i} outside the window changed");
        }
    }
    for (r, u) in rural.header_lines().iter().zip(urban.header_lines()) {
        if !r.starts_with("COMMENTS 2") {
            assert_eq!(r, u);
        }
    }
}

#[test]
fn output_records_the_adjustment() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_fixture(dir.path(), "sample.epw", &year_content("Atlanta", 33.64, true));

    let written = Uwg::new(scenario(&path))
        .and_then(Uwg::generate)
        .and_then(Uwg::simulate)
        .and_then(Uwg::write)
        .unwrap();

    let urban = read_epw(written.output_path()).unwrap();
    let comment = urban.header_line("COMMENTS 2").expect("comment line kept");
    assert!(
        comment.starts_with("COMMENTS 2,hourly synthetic data; urban weather for zone 1A"),
        "{comment}"
    );
    assert!(comment.contains("blddensity 0.5"), "{comment}");
    assert_eq!(urban.header_line("COMMENTS 1"), Some("COMMENTS 1,pipeline fixture"));
}

#[test]
fn night_is_not_cooler_in_town() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_fixture(dir.path(), "sample.epw", &year_content("Atlanta", 33.64, true));

    let simulated = Uwg::new(scenario(&path))
        .and_then(Uwg::generate)
        .and_then(Uwg::simulate)
        .unwrap();

    let diagnostics = simulated.diagnostics();
    assert_eq!(diagnostics.len(), 31 * 24);

    let urban = simulated.result();
    let mut night_hours = 0;
    for d in diagnostics {
        let rec = &urban.records()[d.index];
        if rec.get(EpwField::GlobalHorizontalRadiation) <= 0.0 {
            night_hours += 1;
            assert!(
                rec.dry_bulb() >= d.rural_dry_bulb,
                "hour {}: urban {} below rural {}",
                d.index,
                rec.dry_bulb(),
                d.rural_dry_bulb
            );
        }
        assert!(d.heat_island >= 0.0);
        assert!(rec.dew_point() <= rec.dry_bulb());
    }
    assert!(night_hours > 0);

    let mean_island: f64 =
        diagnostics.iter().map(|d| d.heat_island).sum::<f64>() / diagnostics.len() as f64;
    assert!(mean_island > 0.1, "mean heat island {mean_island}");
}

#[test]
fn warmer_air_is_drier_and_canopy_wind_is_slower() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_fixture(dir.path(), "sample.epw", &year_content("Atlanta", 33.64, false));

    let simulated = Uwg::new(scenario(&path))
        .and_then(Uwg::generate)
        .and_then(Uwg::simulate)
        .unwrap();

    let rec = &simulated.result().records()[0];
    assert!(rec.dry_bulb() > 8.0);
    assert_eq!(rec.dew_point(), 4.0);
    assert!(rec.relative_humidity() < 76.0);
    assert_eq!(rec.relative_humidity(), rec.relative_humidity().round());
    assert!(rec.wind_speed() > 0.0 && rec.wind_speed() < 3.0);
}

#[test]
fn explicit_output_path_wins() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_fixture(dir.path(), "sample.epw", &year_content("Atlanta", 33.64, true));
    let target = dir.path().join("out").join("urban.epw");
    std::fs::create_dir(dir.path().join("out")).unwrap();

    let written = Uwg::new(scenario(&path).with_output_path(&target))
        .and_then(Uwg::generate)
        .and_then(Uwg::simulate)
        .and_then(Uwg::write)
        .unwrap();

    assert_eq!(written.output_path(), target.as_path());
    assert!(target.exists());
    assert!(!dir.path().join("sample_UWG.epw").exists());
}

#[test]
fn session_runs_all_phases() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_fixture(dir.path(), "sample.epw", &year_content("Atlanta", 33.64, true));

    let mut session = UwgSession::new(scenario(&path)).unwrap();
    session.generate().unwrap();
    assert_eq!(session.phase(), "generated");
    assert!(session.result().is_none());

    session.simulate().unwrap();
    assert_eq!(session.phase(), "simulated");
    assert_eq!(session.result().map(|r| r.len()), Some(8760));

    let out = session.write().unwrap();
    assert_eq!(session.phase(), "written");
    assert_eq!(out, dir.path().join("sample_UWG.epw"));
}

#[test]
fn southern_summer_vegetation_cools_january() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let north = write_fixture(dir.path(), "north.epw", &year_content("North", 40.0, false));
    let south = write_fixture(dir.path(), "south.epw", &year_content("South", -40.0, false));

    let canyon_term = |path: &Path| {
        let config = scenario(path)
            .with_grass_cover(0.4)
            .with_tree_cover(0.4)
            .with_sens_anth(0.0);
        let simulated = Uwg::new(config)
            .and_then(Uwg::generate)
            .and_then(Uwg::simulate)
            .unwrap();
        let d = simulated.diagnostics()[0];
        d.heat_island - d.anthropogenic
    };

    let north_canyon = canyon_term(&north);
    let south_canyon = canyon_term(&south);
    assert!(
        south_canyon < north_canyon,
        "south {south_canyon} should be below north {north_canyon}"
    );
    approx::assert_relative_eq!(south_canyon / north_canyon, 1.0 - 0.25 * 0.4 - 0.45 * 0.4, epsilon = 1e-9);
}

#[test]
fn finer_time_step_gives_same_steady_state() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_fixture(dir.path(), "sample.epw", &year_content("Atlanta", 33.64, false));

    let run = |dt: u32| {
        Uwg::new(scenario(&path).with_dt_sim(dt))
            .and_then(Uwg::generate)
            .and_then(Uwg::simulate)
            .unwrap()
            .into_result()
    };
    assert_eq!(run(60).records(), run(3600).records());
}
