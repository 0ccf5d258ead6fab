//! Merge configuration.

use serde::{Deserialize, Serialize};

use crate::matcher;
use crate::types::MergeError;

/// Configuration for segment merging.
///
/// Fields are public for struct-update syntax; call
/// [`validate`](Self::validate) (the merge entry points do) before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Per-axis endpoint matching tolerance. Must be finite and
    /// non-negative.
    pub tolerance: f64,

    /// Color assigned to a merged segment whose seed segment has none.
    pub fallback_color: String,
}

impl MergeConfig {
    /// Default endpoint matching tolerance.
    pub const DEFAULT_TOLERANCE: f64 = matcher::DEFAULT_TOLERANCE;

    /// Default color for merged segments without a seed color.
    pub const DEFAULT_FALLBACK_COLOR: &'static str = "#FF6633";

    /// Check the configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::InvalidConfig`] if the tolerance is negative,
    /// NaN or infinite.
    pub fn validate(&self) -> Result<(), MergeError> {
        if !self.tolerance.is_finite() {
            return Err(MergeError::InvalidConfig(format!(
                "tolerance must be finite, got {}",
                self.tolerance
            )));
        }
        if self.tolerance < 0.0 {
            return Err(MergeError::InvalidConfig(format!(
                "tolerance must be non-negative, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            tolerance: Self::DEFAULT_TOLERANCE,
            fallback_color: Self::DEFAULT_FALLBACK_COLOR.to_string(),
        }
    }
}
