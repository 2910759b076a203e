//! # canopy-uwg
//!
//! Urban weather generator: turns rural EPW weather into urban canyon weather
//! for a described neighbourhood.
//!
//! ## Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["UwgConfig"] -->|"Uwg::new()"| B["Uwg<Configured>"]
//!     B -->|"generate()"| C["Uwg<Generated>"]
//!     C -->|"simulate()"| D["Uwg<Simulated>"]
//!     D -->|"write()"| E["Uwg<Written>"]
//!     D --> F[".result(): adjusted EpwFile"]
//!     D --> G[".diagnostics(): per hour"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use canopy_uwg::{ClimateZone, Uwg, UwgConfig};
//!
//! let config = UwgConfig::new("sample.epw", ClimateZone::Zone1A)
//!     .with_bld_height(10.0)
//!     .with_bld_density(0.5)
//!     .with_ver_to_hor(0.8)
//!     .with_grass_cover(0.1)
//!     .with_tree_cover(0.1);
//! let written = Uwg::new(config)?.generate()?.simulate()?.write()?;
//! assert!(written.output_path().ends_with("sample_UWG.epw"));
//! ```
//!
//! [`UwgSession`] drives the same phases behind a single mutable binding,
//! with out-of-order calls reported as [`UwgError::NotInitialized`].

mod config;
mod error;
mod geometry;
mod model;
mod physics;
mod session;
mod simulate;
mod validate;
mod zone;

pub use config::{DT_WEATHER, OUTPUT_SUFFIX, UwgConfig, default_output_path};
pub use error::UwgError;
pub use geometry::{RURAL_ROUGHNESS, UrbanGeometry};
pub use model::{Configured, Generated, Simulated, Uwg, Written};
pub use session::UwgSession;
pub use simulate::HourDiagnostics;
pub use zone::ClimateZone;
