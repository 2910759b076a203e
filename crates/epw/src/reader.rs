//! EPW reading.

use std::path::Path;

use tracing::{debug, info};

use crate::error::EpwError;
use crate::file::{EpwFile, HEADER_KEYWORDS, starts_with_keyword};
use crate::metadata::EpwMetadata;
use crate::record::EpwRecord;

/// Number of header lines preceding the hourly records.
const HEADER_LINES: usize = HEADER_KEYWORDS.len();

/// Records in a non-leap year of hourly data.
const LIKELY_RECORD_COUNT: usize = 8760;

/// Read and parse an EPW file.
///
/// # Errors
///
/// Returns [`EpwError::FileNotFound`] if `path` does not exist,
/// [`EpwError::Io`] if it cannot be read, and [`EpwError::Format`] if the
/// contents are not a valid EPW file.
pub fn read_epw(path: &Path) -> Result<EpwFile, EpwError> {
    info!(path = %path.display(), "reading EPW file");
    let content = std::fs::read_to_string(path).map_err(|e| EpwError::from_io(path, e))?;
    let file = parse_epw(&content)?;
    info!(
        city = %file.metadata().city,
        n_records = file.len(),
        "EPW file loaded"
    );
    Ok(file)
}

/// Read only the location metadata of an EPW file.
///
/// The whole file is parsed, so a file with a valid header but malformed
/// records is still rejected.
///
/// # Errors
///
/// Same as [`read_epw`].
pub fn read_metadata(path: &Path) -> Result<EpwMetadata, EpwError> {
    read_epw(path).map(EpwFile::into_metadata)
}

/// Parse EPW content already held in memory.
///
/// # Errors
///
/// Returns [`EpwError::Format`] if the header is incomplete or out of order,
/// the `LOCATION` line is invalid, a record is malformed, or there are no
/// records at all.
pub fn parse_epw(content: &str) -> Result<EpwFile, EpwError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let (header, data) = split_header(content)?;

    let metadata = EpwMetadata::parse_location(header[0], 1)?;
    for (idx, (line, keyword)) in header.iter().zip(HEADER_KEYWORDS).enumerate().skip(1) {
        if !starts_with_keyword(line, keyword) {
            return Err(EpwError::format(
                idx + 1,
                format!("expected {keyword} header"),
            ));
        }
    }

    let records = parse_records(data)?;
    if records.is_empty() {
        return Err(EpwError::format(HEADER_LINES + 1, "no hourly records"));
    }
    if records.len() % 24 != 0 {
        debug!(n_records = records.len(), "record count is not a whole number of days");
    }

    let header = header[1..].iter().map(|s| s.to_string()).collect();
    Ok(EpwFile::new(metadata, header, records))
}

/// Split off the eight header lines, returning them and the remaining data.
fn split_header(content: &str) -> Result<(Vec<&str>, &str), EpwError> {
    let mut header = Vec::with_capacity(HEADER_LINES);
    let mut rest = content;
    for line_no in 1..=HEADER_LINES {
        let Some((line, tail)) = rest.split_once('\n') else {
            return Err(EpwError::format(
                line_no,
                format!(
                    "unexpected end of file in header, expected {}",
                    HEADER_KEYWORDS[line_no - 1]
                ),
            ));
        };
        header.push(line.trim_end_matches('\r'));
        rest = tail;
    }
    Ok((header, rest))
}

/// Parse the comma-separated hourly records following the header.
fn parse_records(data: &str) -> Result<Vec<EpwRecord>, EpwError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data.as_bytes());

    let mut records = Vec::with_capacity(LIKELY_RECORD_COUNT);
    for (i, result) in reader.records().enumerate() {
        let fallback_line = HEADER_LINES + i + 1;
        let row = result.map_err(|e| {
            let line = e
                .position()
                .map_or(fallback_line, |p| HEADER_LINES + p.line() as usize);
            EpwError::format(line, e.to_string())
        })?;
        if row.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        let line = row
            .position()
            .map_or(fallback_line, |p| HEADER_LINES + p.line() as usize);
        records.push(EpwRecord::parse(&row, line)?);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "LOCATION,Testville,TS,TST,TMY3,123456,52.0,13.0,1.0,50.0\n\
DESIGN CONDITIONS,0\n\
TYPICAL/EXTREME PERIODS,0\n\
GROUND TEMPERATURES,0\n\
HOLIDAYS/DAYLIGHT SAVINGS,No,0,0,0\n\
COMMENTS 1,test\n\
COMMENTS 2,test\n\
DATA PERIODS,1,1,Data,Sunday, 1/ 1,12/31\n";

    const ROW: &str = "2020,1,1,1,60,?,5.0,2.0,80,101325,0,0,0,0,0,0,0,0,0,0,180,3.0,0,0,0,0,0,999999999,0,0,0,0,0,0,0\n";

    #[test]
    fn parses_minimal_file() {
        let content = format!("{HEADER}{ROW}");
        let file = parse_epw(&content).expect("valid content");
        assert_eq!(file.metadata().city, "Testville");
        assert_eq!(file.len(), 1);
        assert_eq!(file.header_lines().len(), 7);
        assert_eq!(file.records()[0].dry_bulb(), 5.0);
    }

    #[test]
    fn accepts_crlf_and_bom() {
        let content = format!("\u{feff}{HEADER}{ROW}").replace('\n', "\r\n");
        let file = parse_epw(&content).expect("valid content");
        assert_eq!(file.header_lines()[6], "DATA PERIODS,1,1,Data,Sunday, 1/ 1,12/31");
        assert_eq!(file.len(), 1);
    }

    #[test]
    fn skips_trailing_blank_lines() {
        let content = format!("{HEADER}{ROW}{ROW}\n\n");
        let file = parse_epw(&content).expect("valid content");
        assert_eq!(file.len(), 2);
    }

    #[test]
    fn truncated_header_is_format_error() {
        let content = "LOCATION,Testville,TS,TST,TMY3,123456,52.0,13.0,1.0,50.0\nDESIGN CONDITIONS,0\n";
        let err = parse_epw(content).unwrap_err();
        match err {
            EpwError::Format { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("TYPICAL/EXTREME PERIODS"));
            }
            other => panic!("expected Format, got {other:?}"),
        }
    }

    #[test]
    fn misordered_header_is_format_error() {
        let content = format!("{HEADER}{ROW}").replacen("GROUND TEMPERATURES", "GROUND TEMPS", 1);
        let err = parse_epw(&content).unwrap_err();
        assert!(matches!(err, EpwError::Format { line: 4, .. }));
    }

    #[test]
    fn no_records_is_format_error() {
        let err = parse_epw(HEADER).unwrap_err();
        assert!(matches!(err, EpwError::Format { line: 9, .. }));
    }

    #[test]
    fn bad_record_reports_its_line() {
        let bad = "2020,1,1,2,60,?,5.0\n";
        let content = format!("{HEADER}{ROW}{bad}");
        let err = parse_epw(&content).unwrap_err();
        assert!(
            matches!(err, EpwError::Format { line: 10, .. }),
            "got {err:?}"
        );
    }
}
