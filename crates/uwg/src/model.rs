//! Typestate urban weather model: `Configured → Generated → Simulated → Written`.
//!
//! Each phase consumes the previous one, so an out-of-order call is a compile
//! error rather than a run-time check:
//!
//! ```compile_fail
//! use canopy_uwg::{ClimateZone, Uwg, UwgConfig};
//!
//! let uwg = Uwg::new(UwgConfig::new("sample.epw", ClimateZone::Zone1A)).unwrap();
//! // `simulate` only exists once the model has been generated.
//! let simulated = uwg.simulate();
//! ```

use std::ops::Range;
use std::path::{Path, PathBuf};

use canopy_epw::{EpwFile, read_epw, write_epw};
use tracing::{debug, info, info_span};

use crate::config::UwgConfig;
use crate::error::UwgError;
use crate::geometry::UrbanGeometry;
use crate::simulate::{CanopyModel, HourDiagnostics, simulation_window};

/// Header line that records the urban adjustment in the output file.
const PROVENANCE_KEYWORD: &str = "COMMENTS 2";

/// Validated configuration, nothing read yet.
#[derive(Debug)]
pub struct Configured;

/// Rural weather loaded and canopy geometry derived.
#[derive(Debug)]
pub struct Generated {
    rural: EpwFile,
    geometry: UrbanGeometry,
    window: Range<usize>,
    southern: bool,
}

/// Urban weather computed, not yet persisted.
#[derive(Debug)]
pub struct Simulated {
    urban: EpwFile,
    diagnostics: Vec<HourDiagnostics>,
}

/// Urban weather persisted to disk.
#[derive(Debug)]
pub struct Written {
    path: PathBuf,
}

/// Urban weather generator in phase `S`.
#[derive(Debug)]
pub struct Uwg<S> {
    config: UwgConfig,
    state: S,
}

impl<S> Uwg<S> {
    /// Returns the configuration the model was built from.
    pub fn config(&self) -> &UwgConfig {
        &self.config
    }
}

impl Uwg<Configured> {
    /// Validates `config` and creates a model ready to generate.
    ///
    /// # Errors
    ///
    /// Returns [`UwgError::Config`] listing every invalid parameter. No file
    /// is touched.
    pub fn new(config: UwgConfig) -> Result<Self, UwgError> {
        config.validate()?;
        Ok(Self {
            config,
            state: Configured,
        })
    }

    /// Reads the rural weather file and builds the simulation state.
    ///
    /// # Errors
    ///
    /// Returns [`UwgError::Epw`] if the file cannot be read or parsed, and
    /// [`UwgError::Simulation`] if the simulation period is not covered by
    /// the data.
    pub fn generate(self) -> Result<Uwg<Generated>, UwgError> {
        let _span = info_span!("generate").entered();
        let config = self.config;

        let rural = read_epw(config.epw_path())?;
        let (month, day, n_day) = config.period();
        let window = simulation_window(&rural, month, day, n_day)?;
        let geometry = UrbanGeometry::from_config(&config);
        let southern = rural.metadata().is_southern();

        debug!(
            aspect_ratio = geometry.aspect_ratio,
            sky_view_factor = geometry.sky_view_factor,
            wind_transfer = geometry.wind_transfer,
            "canopy geometry"
        );
        info!(
            path = %config.epw_path().display(),
            n_records = rural.len(),
            start = window.start,
            n_hours = window.len(),
            southern,
            "model generated"
        );

        Ok(Uwg {
            config,
            state: Generated {
                rural,
                geometry,
                window,
                southern,
            },
        })
    }
}

impl Uwg<Generated> {
    /// Returns the rural weather the model will adjust.
    pub fn rural(&self) -> &EpwFile {
        &self.state.rural
    }

    /// Returns the derived canopy geometry.
    pub fn geometry(&self) -> &UrbanGeometry {
        &self.state.geometry
    }

    /// Returns the record indices covered by the simulation period.
    pub fn window(&self) -> Range<usize> {
        self.state.window.clone()
    }

    /// Runs the canopy model over the simulation period.
    ///
    /// # Errors
    ///
    /// Returns [`UwgError::Simulation`] if the model state becomes
    /// non-finite.
    pub fn simulate(self) -> Result<Uwg<Simulated>, UwgError> {
        let _span = info_span!("simulate").entered();
        let Generated {
            rural,
            geometry,
            window,
            southern,
        } = self.state;

        let model = CanopyModel::new(&self.config, &geometry, southern);
        let (mut urban, diagnostics) = model.run(&rural, window)?;

        let line = provenance_line(&self.config, urban.header_line(PROVENANCE_KEYWORD));
        if !urban.set_header_line(PROVENANCE_KEYWORD, line) {
            debug!("no {PROVENANCE_KEYWORD} header, adjustment not recorded");
        }

        Ok(Uwg {
            config: self.config,
            state: Simulated { urban, diagnostics },
        })
    }
}

impl Uwg<Simulated> {
    /// Returns the adjusted weather file.
    pub fn result(&self) -> &EpwFile {
        &self.state.urban
    }

    /// Returns per-hour diagnostics for the simulated period.
    pub fn diagnostics(&self) -> &[HourDiagnostics] {
        &self.state.diagnostics
    }

    /// Consumes the model and returns the adjusted weather file.
    pub fn into_result(self) -> EpwFile {
        self.state.urban
    }

    /// Writes the adjusted weather to the configured output path.
    ///
    /// # Errors
    ///
    /// Returns [`UwgError::Epw`] if the file cannot be written.
    pub fn write(self) -> Result<Uwg<Written>, UwgError> {
        let path = self.config.output_path();
        self.write_to(&path)
    }

    /// Writes the adjusted weather to `path`, ignoring the configured output.
    ///
    /// # Errors
    ///
    /// Returns [`UwgError::Epw`] if the file cannot be written.
    pub fn write_to(self, path: &Path) -> Result<Uwg<Written>, UwgError> {
        let _span = info_span!("write").entered();
        write_epw(path, &self.state.urban)?;
        info!(path = %path.display(), "urban weather written");
        Ok(Uwg {
            config: self.config,
            state: Written {
                path: path.to_path_buf(),
            },
        })
    }
}

impl Uwg<Written> {
    /// Returns the path the adjusted weather was written to.
    pub fn output_path(&self) -> &Path {
        &self.state.path
    }
}

/// Appends the urban parameters to the existing `COMMENTS 2` text.
fn provenance_line(config: &UwgConfig, existing: Option<&str>) -> String {
    let note = format!(
        "urban weather for zone {} with bldheight {} m; blddensity {}; vertohor {}; \
         grasscover {}; treecover {}",
        config.zone(),
        config.bld_height(),
        config.bld_density(),
        config.ver_to_hor(),
        config.grass_cover(),
        config.tree_cover()
    );
    let previous = existing
        .and_then(|line| line.split_once(','))
        .map(|(_, text)| text.trim())
        .filter(|text| !text.is_empty());
    match previous {
        Some(text) => format!("{PROVENANCE_KEYWORD},{text}; {note}"),
        None => format!("{PROVENANCE_KEYWORD},{note}"),
    }
}
