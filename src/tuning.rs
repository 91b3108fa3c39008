//! Data-driven engine constants
//!
//! Loaded from JSON; any field left out keeps its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors from loading or validating a tuning file
#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid tuning: {0}")]
    Invalid(String),
}

/// Engine constants the external race driver is allowed to vary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Highest accepted thrust value
    pub max_thrust: u32,
    /// Pod collision radius
    pub pod_radius: f32,
    /// Distance at which a checkpoint counts as reached
    pub checkpoint_radius: f32,
    /// Turns a pod may go without reaching a checkpoint
    pub timeout_turns: i32,
    /// Turns a shield stays up once activated
    ///
    /// Read only by the external race driver, which owns shield activation and
    /// expiry; the pod itself only sees the resulting `shield` flag.
    pub shield_turns: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_thrust: 200,
            pod_radius: 400.0,
            checkpoint_radius: 600.0,
            timeout_turns: 100,
            shield_turns: 3,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON string
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the physics cannot work with
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.max_thrust == 0 {
            return Err(TuningError::Invalid("max_thrust must be positive".into()));
        }
        if !(self.pod_radius >= 0.0) {
            return Err(TuningError::Invalid(format!(
                "pod_radius must be >= 0, got {}",
                self.pod_radius
            )));
        }
        if !(self.checkpoint_radius >= 0.0) {
            return Err(TuningError::Invalid(format!(
                "checkpoint_radius must be >= 0, got {}",
                self.checkpoint_radius
            )));
        }
        if self.timeout_turns <= 0 {
            return Err(TuningError::Invalid(format!(
                "timeout_turns must be positive, got {}",
                self.timeout_turns
            )));
        }
        Ok(())
    }

    /// Pretty JSON, for writing a starter file
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
