//! Accumulated parameter validation.
//!
//! [`ValidationCollector`] gathers every violation found in a configuration
//! and converts them into a single [`UwgError::Config`], so a user sees all
//! bad parameters at once instead of fixing them one run at a time.

use crate::error::UwgError;

/// Accumulates validation errors and converts them into a single
/// [`UwgError::Config`].
pub(crate) struct ValidationCollector {
    errors: Vec<String>,
}

impl ValidationCollector {
    /// Create an empty collector.
    pub(crate) fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record one validation error.
    pub(crate) fn push(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Returns the number of recorded errors.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.errors.len()
    }

    /// Require `value` to be finite and strictly positive.
    pub(crate) fn positive(&mut self, name: &str, value: f64) {
        if !value.is_finite() || value <= 0.0 {
            self.push(format!("{name} must be finite and > 0, got {value}"));
        }
    }

    /// Require `value` to be finite and non-negative.
    pub(crate) fn non_negative(&mut self, name: &str, value: f64) {
        if !value.is_finite() || value < 0.0 {
            self.push(format!("{name} must be finite and >= 0, got {value}"));
        }
    }

    /// Require `value` to be a fraction in `[0, 1]`.
    pub(crate) fn fraction(&mut self, name: &str, value: f64) {
        if !(0.0..=1.0).contains(&value) {
            self.push(format!("{name} must be in [0, 1], got {value}"));
        }
    }

    /// Require `value` to be a calendar month.
    pub(crate) fn month(&mut self, name: &str, value: u8) {
        if !(1..=12).contains(&value) {
            self.push(format!("{name} must be 1..=12, got {value}"));
        }
    }

    /// Consume the collector and return `Ok(())` if no errors were recorded,
    /// or `Err(UwgError::Config { count, details })` otherwise.
    ///
    /// The `details` string joins all messages with `"; "`.
    pub(crate) fn finish(self) -> Result<(), UwgError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(UwgError::Config {
                count: self.errors.len(),
                details: self.errors.join("; "),
            })
        }
    }
}
