//! cable-merge: Pure segment merging for cable documents (sans-IO).
//!
//! Cable routes are drawn from many short polyline segments. This crate
//! joins segments whose endpoints coincide into the fewest continuous
//! paths, and converts bare coordinate lists into cable documents.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! documents and returns structured data. File handling and the command
//! line live in `cable-helper`.

pub mod config;
pub mod convert;
pub mod diagnostics;
pub mod matcher;
pub mod reconstruct;
pub mod types;

pub use config::MergeConfig;
pub use convert::convert;
pub use reconstruct::{Connection, MergeOutcome, MergeResult, reconstruct};
pub use types::{CableDocument, MergeError, Point, Polyline, Segment};

/// Merge the segments of a cable document.
///
/// Uses the document id as the base for merged segment ids. The
/// document itself is not modified; on
/// [`MergeOutcome::Merged`] callers typically write
/// `cable.clone().with_segments(result.segments)` back out so every
/// other field survives.
///
/// # Errors
///
/// Returns [`MergeError::InvalidConfig`] if `config` is invalid.
/// Returns [`MergeError::MalformedSegment`] if any segment has no
/// coordinates.
///
/// # Examples
///
/// ```
/// use cable_merge::{CableDocument, MergeConfig, MergeOutcome, Point, Segment, merge_cable};
///
/// let cable = CableDocument::new(
///     "apg",
///     "Asia Pacific Gateway",
///     vec![
///         Segment::new("apg-1", vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]),
///         Segment::new("apg-2", vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)]),
///     ],
/// );
/// let outcome = merge_cable(&cable, &MergeConfig::default()).unwrap();
/// assert_eq!(outcome.segments().len(), 1);
/// assert_eq!(outcome.segments()[0].id, "apg-merged-1");
/// ```
pub fn merge_cable(
    cable: &CableDocument,
    config: &MergeConfig,
) -> Result<MergeOutcome, MergeError> {
    reconstruct(&cable.segments, &cable.id, config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_cable() -> CableDocument {
        let json = r##"{
            "id": "aae1",
            "name": "AAE-1",
            "color": "#3366CC",
            "segments": [
                {"id": "aae1-1", "hidden": false, "color": "#111111", "coordinates": [[0, 0], [1, 0]]},
                {"id": "aae1-2", "hidden": true, "coordinates": [[5, 5], [6, 6]]},
                {"id": "aae1-3", "coordinates": [[2, 0], [1, 0]]}
            ],
            "equipments": [{"id": "ls", "name": "Vung Tau", "coordinate": [10.3, 107.1]}]
        }"##;
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn merge_cable_uses_document_id() {
        let outcome = merge_cable(&sample_cable(), &MergeConfig::default()).unwrap();
        let ids: Vec<&str> = outcome.segments().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["aae1-merged-1", "aae1-merged-2"]);
    }

    #[test]
    fn merge_cable_carries_seed_metadata() {
        let outcome = merge_cable(&sample_cable(), &MergeConfig::default()).unwrap();
        let segments = outcome.segments();
        assert_eq!(segments[0].color.as_deref(), Some("#111111"));
        assert!(!segments[0].hidden);
        assert_eq!(segments[1].color.as_deref(), Some("#FF6633"));
        assert!(segments[1].hidden);
    }

    #[test]
    fn merged_document_keeps_other_fields() {
        let cable = sample_cable();
        let MergeOutcome::Merged(result) = merge_cable(&cable, &MergeConfig::default()).unwrap()
        else {
            unreachable!("sample has segments");
        };
        let merged = cable.clone().with_segments(result.segments);

        assert_eq!(merged.id, cable.id);
        assert_eq!(merged.name, cable.name);
        assert_eq!(merged.color, cable.color);
        assert_eq!(merged.extra, cable.extra);
        assert_eq!(merged.segment_count(), 2);
    }

    #[test]
    fn merge_cable_without_segments() {
        let cable: CableDocument = serde_json::from_str(r#"{"id": "x", "name": "X"}"#).unwrap();
        let outcome = merge_cable(&cable, &MergeConfig::default()).unwrap();
        assert_eq!(outcome, MergeOutcome::NothingToMerge);
    }
}
