//! Merge diagnostics: timing and counts for one reconstruction.
//!
//! Timing goes through the [`Clock`] trait so this crate stays free of
//! platform time sources; the binary supplies a `std::time::Instant`
//! backed implementation.
//!
//! Durations are serialized as fractional seconds (`f64`) for JSON
//! compatibility, since `std::time::Duration` does not implement serde
//! traits.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::MergeConfig;
use crate::reconstruct::{MergeOutcome, reconstruct};
use crate::types::{MergeError, Segment, total_points};

/// A monotonic time source.
pub trait Clock {
    /// Opaque point in time.
    type Instant;

    /// Capture the current instant.
    fn now(&self) -> Self::Instant;

    /// Time elapsed since `since`.
    fn elapsed(&self, since: &Self::Instant) -> Duration;
}

/// Serde support for `std::time::Duration` as fractional seconds.
mod duration_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a `Duration` as fractional seconds (`f64`).
    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs_f64().serialize(serializer)
    }

    /// Deserialize a `Duration` from fractional seconds (`f64`).
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            serde::de::Error::custom(
                "duration seconds must be finite, non-negative, and representable as a Duration",
            )
        })
    }
}

/// Diagnostics collected from a single merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeDiagnostics {
    /// Wall-clock duration of the reconstruction (seconds).
    #[serde(with = "duration_serde")]
    pub duration: Duration,
    /// Tolerance the merge ran with.
    pub tolerance: f64,
    /// Segments handed to the reconstructor.
    pub input_segment_count: usize,
    /// Coordinates across all input segments.
    pub input_point_count: usize,
    /// Reconstructed paths.
    pub output_path_count: usize,
    /// Coordinates across all reconstructed paths.
    pub output_point_count: usize,
    /// Segments attached to an existing path.
    pub join_count: usize,
    /// Pool scans performed.
    pub pass_count: usize,
}

impl MergeDiagnostics {
    /// Fraction of input segments eliminated by merging, in `[0, 1)`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn reduction_ratio(&self) -> f64 {
        if self.input_segment_count == 0 {
            0.0
        } else {
            1.0 - self.output_path_count as f64 / self.input_segment_count as f64
        }
    }

    /// Format diagnostics as a human-readable report.
    #[must_use]
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Merge Diagnostics Report\n{}", "=".repeat(60)));
        lines.push(format!("Duration: {:.3}ms", duration_ms(self.duration)));
        lines.push(format!("Tolerance: {:e}", self.tolerance));
        lines.push(String::new());
        lines.push(format!(
            "Segments: {} -> {} ({:.1}% reduction)",
            self.input_segment_count,
            self.output_path_count,
            self.reduction_ratio() * 100.0,
        ));
        lines.push(format!(
            "Points: {} -> {}",
            self.input_point_count, self.output_point_count,
        ));
        lines.push(format!(
            "Joins: {}  |  Passes: {}",
            self.join_count, self.pass_count,
        ));

        lines.join("\n")
    }
}

/// Convert a `Duration` to milliseconds as `f64`.
fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// Run [`reconstruct`] and collect diagnostics alongside the outcome.
///
/// # Errors
///
/// Propagates every error [`reconstruct`] returns.
pub fn reconstruct_with_diagnostics<C: Clock>(
    segments: &[Segment],
    base_id: &str,
    config: &MergeConfig,
    clock: &C,
) -> Result<(MergeOutcome, MergeDiagnostics), MergeError> {
    let start = clock.now();
    let outcome = reconstruct(segments, base_id, config)?;
    let duration = clock.elapsed(&start);

    let (join_count, pass_count) = match &outcome {
        MergeOutcome::NothingToMerge => (0, 0),
        MergeOutcome::Merged(result) => (result.join_count, result.pass_count),
    };

    let diagnostics = MergeDiagnostics {
        duration,
        tolerance: config.tolerance,
        input_segment_count: segments.len(),
        input_point_count: total_points(segments),
        output_path_count: outcome.segments().len(),
        output_point_count: total_points(outcome.segments()),
        join_count,
        pass_count,
    };

    Ok((outcome, diagnostics))
}
