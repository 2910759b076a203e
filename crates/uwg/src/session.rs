//! Run-time phase tracking for callers that keep the model in one binding.

use std::mem;
use std::path::PathBuf;

use canopy_epw::EpwFile;

use crate::config::UwgConfig;
use crate::error::UwgError;
use crate::model::{Configured, Generated, Simulated, Uwg, Written};

#[derive(Debug)]
enum Phase {
    Configured(Uwg<Configured>),
    Generated(Uwg<Generated>),
    Simulated(Uwg<Simulated>),
    Written(Uwg<Written>),
    /// A transition failed; the session cannot continue.
    Failed,
}

impl Phase {
    fn name(&self) -> &'static str {
        match self {
            Phase::Configured(_) => "configured",
            Phase::Generated(_) => "generated",
            Phase::Simulated(_) => "simulated",
            Phase::Written(_) => "written",
            Phase::Failed => "failed",
        }
    }
}

/// Dynamic driver over [`Uwg`].
///
/// Phase order is checked when each method is called: asking to simulate
/// before generating, or to write before simulating, returns
/// [`UwgError::NotInitialized`] and leaves the session untouched. A phase
/// that fails moves the session to `failed`, after which every call is
/// rejected.
#[derive(Debug)]
pub struct UwgSession {
    phase: Phase,
}

impl UwgSession {
    /// Validates `config` and starts a session in the `configured` phase.
    ///
    /// # Errors
    ///
    /// Returns [`UwgError::Config`] if the configuration is invalid.
    pub fn new(config: UwgConfig) -> Result<Self, UwgError> {
        Ok(Self {
            phase: Phase::Configured(Uwg::new(config)?),
        })
    }

    /// Name of the current phase.
    pub fn phase(&self) -> &'static str {
        self.phase.name()
    }

    /// Reads the rural weather and builds the simulation state.
    ///
    /// # Errors
    ///
    /// Returns [`UwgError::NotInitialized`] unless the session is
    /// `configured`; otherwise any error of [`Uwg::generate`].
    pub fn generate(&mut self) -> Result<(), UwgError> {
        match mem::replace(&mut self.phase, Phase::Failed) {
            Phase::Configured(uwg) => {
                self.phase = Phase::Generated(uwg.generate()?);
                Ok(())
            }
            other => Err(self.reject("generate", other)),
        }
    }

    /// Runs the canopy model.
    ///
    /// # Errors
    ///
    /// Returns [`UwgError::NotInitialized`] unless the session is
    /// `generated`; otherwise any error of [`Uwg::simulate`].
    pub fn simulate(&mut self) -> Result<(), UwgError> {
        match mem::replace(&mut self.phase, Phase::Failed) {
            Phase::Generated(uwg) => {
                self.phase = Phase::Simulated(uwg.simulate()?);
                Ok(())
            }
            other => Err(self.reject("simulate", other)),
        }
    }

    /// Writes the adjusted weather to the configured output path and returns
    /// that path.
    ///
    /// # Errors
    ///
    /// Returns [`UwgError::NotInitialized`] unless the session is
    /// `simulated`; otherwise any error of [`Uwg::write`].
    pub fn write(&mut self) -> Result<PathBuf, UwgError> {
        match mem::replace(&mut self.phase, Phase::Failed) {
            Phase::Simulated(uwg) => {
                let written = uwg.write()?;
                let path = written.output_path().to_path_buf();
                self.phase = Phase::Written(written);
                Ok(path)
            }
            other => Err(self.reject("write", other)),
        }
    }

    /// Returns the adjusted weather once the session has simulated.
    pub fn result(&self) -> Option<&EpwFile> {
        match &self.phase {
            Phase::Simulated(uwg) => Some(uwg.result()),
            _ => None,
        }
    }

    fn reject(&mut self, operation: &'static str, phase: Phase) -> UwgError {
        let name = phase.name();
        self.phase = phase;
        UwgError::NotInitialized {
            operation,
            phase: name,
        }
    }
}
