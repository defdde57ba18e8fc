//! Dialogue behaviour configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::dialogue::{CorrectionGate, DEFAULT_CORRECTION_RATE};

/// Dialogue configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DialogueConfig {
    /// Share of turns on which a found correction is shown
    #[serde(default = "default_correction_rate")]
    pub correction_rate: f64,
}

impl DialogueConfig {
    /// Gate matching the configured rate
    pub fn correction_gate(&self) -> CorrectionGate {
        if self.correction_rate <= 0.0 {
            CorrectionGate::Never
        } else if self.correction_rate >= 1.0 {
            CorrectionGate::Always
        } else {
            CorrectionGate::Probabilistic(self.correction_rate)
        }
    }

    /// Validate dialogue configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=1.0).contains(&self.correction_rate) {
            return Err(ValidationError::InvalidCorrectionRate);
        }
        Ok(())
    }
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            correction_rate: default_correction_rate(),
        }
    }
}

fn default_correction_rate() -> f64 {
    DEFAULT_CORRECTION_RATE
}
