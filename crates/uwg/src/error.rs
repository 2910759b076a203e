//! Error types for the canopy-uwg crate.

use canopy_epw::EpwError;

/// Error type for all fallible operations in the canopy-uwg crate.
#[derive(Debug, thiserror::Error)]
pub enum UwgError {
    /// Returned when one or more configuration parameters are invalid.
    #[error("{count} invalid parameter(s): {details}")]
    Config {
        /// Number of accumulated violations.
        count: usize,
        /// Human-readable summary of the violations.
        details: String,
    },

    /// Returned when a phase is requested before its prerequisite completed.
    #[error("cannot {operation}: model is {phase}")]
    NotInitialized {
        /// The requested operation.
        operation: &'static str,
        /// The phase the model was in.
        phase: &'static str,
    },

    /// Returned when the physical model fails.
    #[error("simulation failed: {reason}")]
    Simulation {
        /// Description of the failure.
        reason: String,
    },

    /// Wrapped error from the EPW codec.
    #[error(transparent)]
    Epw(#[from] EpwError),
}

impl UwgError {
    /// Name of the error kind, as reported to users.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config { .. } => "ConfigError",
            Self::NotInitialized { .. } => "NotInitializedError",
            Self::Simulation { .. } => "SimulationError",
            Self::Epw(e) => e.kind(),
        }
    }

    pub(crate) fn config(reason: impl Into<String>) -> Self {
        UwgError::Config {
            count: 1,
            details: reason.into(),
        }
    }

    pub(crate) fn simulation(reason: impl Into<String>) -> Self {
        UwgError::Simulation {
            reason: reason.into(),
        }
    }
}
