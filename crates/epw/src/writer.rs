//! EPW writing.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::EpwError;
use crate::file::EpwFile;

/// Line terminator used for written files, matching EnergyPlus distributions.
const LINE_END: &str = "\r\n";

/// Write an EPW file to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`EpwError::FileNotFound`] if the parent directory does not exist
/// and [`EpwError::Io`] for any other write failure.
pub fn write_epw(path: &Path, file: &EpwFile) -> Result<(), EpwError> {
    info!(path = %path.display(), n_records = file.len(), "writing EPW file");
    let out = File::create(path).map_err(|e| EpwError::from_io(path, e))?;
    let mut out = BufWriter::new(out);
    write_to(&mut out, file).map_err(|e| EpwError::from_io(path, e))?;
    out.flush().map_err(|e| EpwError::from_io(path, e))?;
    Ok(())
}

/// Serialise an EPW file into any writer.
///
/// # Errors
///
/// Returns the underlying I/O error if writing fails.
pub fn write_to<W: Write>(out: &mut W, file: &EpwFile) -> std::io::Result<()> {
    write!(out, "{}{LINE_END}", file.metadata().to_location_line())?;
    for line in file.header_lines() {
        write!(out, "{line}{LINE_END}")?;
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(out);
    for record in file.records() {
        writer.write_record(record.to_fields())?;
    }
    writer.flush()?;
    Ok(())
}
