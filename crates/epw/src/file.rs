//! In-memory representation of a whole EPW file.

use crate::metadata::EpwMetadata;
use crate::record::EpwRecord;

/// Header keywords of the eight EPW header lines, in order.
pub(crate) const HEADER_KEYWORDS: [&str; 8] = [
    "LOCATION",
    "DESIGN CONDITIONS",
    "TYPICAL/EXTREME PERIODS",
    "GROUND TEMPERATURES",
    "HOLIDAYS/DAYLIGHT SAVINGS",
    "COMMENTS 1",
    "COMMENTS 2",
    "DATA PERIODS",
];

/// A parsed EPW file: location metadata, the remaining header lines and the
/// hourly records.
///
/// Header lines other than `LOCATION` are carried verbatim so a file can be
/// written back without losing design conditions, ground temperatures or
/// comments.
#[derive(Debug, Clone, PartialEq)]
pub struct EpwFile {
    metadata: EpwMetadata,
    /// Header lines 2..=8, without line terminators.
    header: Vec<String>,
    records: Vec<EpwRecord>,
}

impl EpwFile {
    pub(crate) fn new(metadata: EpwMetadata, header: Vec<String>, records: Vec<EpwRecord>) -> Self {
        Self {
            metadata,
            header,
            records,
        }
    }

    /// Returns the location metadata.
    pub fn metadata(&self) -> &EpwMetadata {
        &self.metadata
    }

    /// Consumes the file and returns its metadata.
    pub fn into_metadata(self) -> EpwMetadata {
        self.metadata
    }

    /// Returns the header lines following `LOCATION`, verbatim.
    pub fn header_lines(&self) -> &[String] {
        &self.header
    }

    /// Returns the hourly records.
    pub fn records(&self) -> &[EpwRecord] {
        &self.records
    }

    /// Returns the hourly records for in-place modification.
    pub fn records_mut(&mut self) -> &mut [EpwRecord] {
        &mut self.records
    }

    /// Returns the verbatim header line that opens with `keyword`.
    pub fn header_line(&self, keyword: &str) -> Option<&str> {
        self.header
            .iter()
            .find(|h| starts_with_keyword(h, keyword))
            .map(String::as_str)
    }

    /// Replaces one verbatim header line, identified by its keyword.
    ///
    /// Returns `false` when no header line carries `keyword`.
    pub fn set_header_line(&mut self, keyword: &str, line: impl Into<String>) -> bool {
        match self
            .header
            .iter_mut()
            .find(|h| starts_with_keyword(h, keyword))
        {
            Some(slot) => {
                *slot = line.into();
                true
            }
            None => false,
        }
    }

    /// Returns the number of hourly records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the file holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Case-insensitive test that `line` opens with `keyword` followed by a comma
/// or end of line.
pub(crate) fn starts_with_keyword(line: &str, keyword: &str) -> bool {
    let head = line.split(',').next().unwrap_or_default().trim();
    head.eq_ignore_ascii_case(keyword)
}
