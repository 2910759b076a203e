//! # canopy-epw
//!
//! Read and write EnergyPlus Weather (EPW) files.
//!
//! An EPW file holds eight header lines (`LOCATION`, `DESIGN CONDITIONS`,
//! `TYPICAL/EXTREME PERIODS`, `GROUND TEMPERATURES`,
//! `HOLIDAYS/DAYLIGHT SAVINGS`, `COMMENTS 1`, `COMMENTS 2`, `DATA PERIODS`)
//! followed by hourly records of 35 comma-separated fields. The `LOCATION`
//! line is parsed into [`EpwMetadata`]; the other header lines are kept
//! verbatim so a file can be adjusted and written back.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::path::Path;
//! use canopy_epw::{EpwField, read_epw, read_metadata, write_epw};
//!
//! let meta = read_metadata(Path::new("sample.epw"))?;
//! println!("{} ({}, {})", meta.city, meta.latitude, meta.longitude);
//!
//! let mut file = read_epw(Path::new("sample.epw"))?;
//! for rec in file.records_mut() {
//!     rec.set(EpwField::DryBulb, rec.dry_bulb() + 1.0);
//! }
//! write_epw(Path::new("sample_warm.epw"), &file)?;
//! ```

mod error;
mod file;
mod format;
mod metadata;
mod reader;
mod record;
mod writer;

pub use error::EpwError;
pub use file::EpwFile;
pub use metadata::{EpwMetadata, MetadataValue};
pub use reader::{parse_epw, read_epw, read_metadata};
pub use record::{EpwField, EpwRecord, RECORD_FIELDS};
pub use writer::{write_epw, write_to};
