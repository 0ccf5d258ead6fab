//! Shared types for cable documents and segment merging.

use serde::{Deserialize, Deserializer, Serialize};

/// A 2D coordinate pair.
///
/// Cable documents store coordinates in Leaflet order, `[lat, lng]`, so
/// `x` holds the latitude and `y` the longitude. The merge logic never
/// interprets the axes; only the preview exporter does.
///
/// Serialized as a two-element JSON array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    /// First coordinate (latitude in cable documents).
    pub x: f64,
    /// Second coordinate (longitude in cable documents).
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether `other` lies within `tolerance` of this point on both axes.
    ///
    /// See [`crate::matcher::close`].
    #[must_use]
    pub fn is_close(self, other: Self, tolerance: f64) -> bool {
        crate::matcher::close(self, other, tolerance)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// A sequence of connected points forming a path segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polyline(Vec<Point>);

impl Polyline {
    /// Create a new polyline from a vector of points.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Returns `true` if the polyline has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of points in the polyline.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the first point (the head), if any.
    #[must_use]
    pub fn first(&self) -> Option<&Point> {
        self.0.first()
    }

    /// Returns the last point (the tail), if any.
    #[must_use]
    pub fn last(&self) -> Option<&Point> {
        self.0.last()
    }

    /// Returns a slice of all points.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }
}

impl From<Vec<Point>> for Polyline {
    fn from(points: Vec<Point>) -> Self {
        Self(points)
    }
}

/// One drawable piece of a cable: a polyline plus display metadata.
///
/// The metadata is opaque to the merge logic. When segments are merged,
/// the segment that seeds a path donates its `hidden` flag and `color`
/// to the merged result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Segment identifier, unique within its cable.
    #[serde(default)]
    pub id: String,

    /// Whether the front end should hide this segment.
    #[serde(default)]
    pub hidden: bool,

    /// Display color as a CSS hex string (e.g. `#FF6633`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// The segment geometry.
    pub coordinates: Polyline,
}

impl Segment {
    /// Create a visible segment with no color.
    #[must_use]
    pub fn new(id: impl Into<String>, coordinates: impl Into<Polyline>) -> Self {
        Self {
            id: id.into(),
            hidden: false,
            color: None,
            coordinates: coordinates.into(),
        }
    }

    /// Builder-style setter for the display color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Builder-style setter for the visibility flag.
    #[must_use]
    pub const fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

/// A cable as stored on disk and loaded by the map front end.
///
/// Only `id`, `name`, `color` and `segments` are modelled. Every other
/// top-level field (`equipments`, `available_path`, ...) is kept in
/// [`extra`](Self::extra) and written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CableDocument {
    /// Cable identifier; also the base for merged segment ids.
    pub id: String,

    /// Human-readable cable name.
    pub name: String,

    /// Optional cable-level display color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// The cable's drawable segments. A missing or `null` list reads as
    /// empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub segments: Vec<Segment>,

    /// Fields this tool does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CableDocument {
    /// Create a document with no extra fields.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, segments: Vec<Segment>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: None,
            segments,
            extra: serde_json::Map::new(),
        }
    }

    /// Replace the segment list, keeping every other field.
    #[must_use]
    pub fn with_segments(mut self, segments: Vec<Segment>) -> Self {
        self.segments = segments;
        self
    }

    /// Number of segments in the document.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Total number of coordinates across all segments.
    #[must_use]
    pub fn point_count(&self) -> usize {
        total_points(&self.segments)
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Segment>, D::Error> {
    Ok(Option::<Vec<Segment>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Total coordinates across a slice of segments.
#[must_use]
pub fn total_points(segments: &[Segment]) -> usize {
    segments.iter().map(|s| s.coordinates.len()).sum()
}

/// Errors that can occur while merging segments.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// A segment has no coordinates, so it has no head or tail.
    #[error("segment {index} ({id:?}) has no coordinates")]
    MalformedSegment {
        /// Position of the segment in the input list.
        index: usize,
        /// Identifier of the offending segment.
        id: String,
    },

    /// Merge configuration is invalid.
    #[error("invalid merge configuration: {0}")]
    InvalidConfig(String),
}
