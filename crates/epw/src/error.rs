//! Error types for canopy-epw.

use std::path::PathBuf;

/// Error type for all fallible operations in the canopy-epw crate.
///
/// File-system failures (`FileNotFound`, `Io`) are reported separately from
/// structural problems with the file contents (`Format`), so callers can tell
/// an unreadable path apart from a malformed weather file.
#[derive(Debug, thiserror::Error)]
pub enum EpwError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Returned when a file exists but cannot be read or written.
    #[error("i/o error on {}: {reason}", path.display())]
    Io {
        /// Path of the file being accessed.
        path: PathBuf,
        /// Description of the underlying I/O failure.
        reason: String,
    },

    /// Returned when the file contents do not follow the EPW layout.
    #[error("malformed EPW at line {line}: {reason}")]
    Format {
        /// 1-based line number where the problem was found.
        line: usize,
        /// Description of the structural problem.
        reason: String,
    },
}

impl EpwError {
    /// Name of the error kind, as reported to users.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } | Self::Io { .. } => "FileAccessError",
            Self::Format { .. } => "FormatError",
        }
    }

    /// Maps a `std::io::Error` on `path` to the matching variant.
    pub(crate) fn from_io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        if err.kind() == std::io::ErrorKind::NotFound {
            EpwError::FileNotFound { path }
        } else {
            EpwError::Io {
                path,
                reason: err.to_string(),
            }
        }
    }

    pub(crate) fn format(line: usize, reason: impl Into<String>) -> Self {
        EpwError::Format {
            line,
            reason: reason.into(),
        }
    }
}
