//! Path reconstruction: merge segments whose endpoints coincide.
//!
//! Cable geometry usually arrives as many short segments that were
//! split at arbitrary points. This module stitches them back into the
//! fewest continuous paths by greedily growing one path at a time from
//! both ends.
//!
//! The strategy is order-sensitive on purpose. When three or more
//! segments meet at one point, the first candidate in pool order wins,
//! and the connection kinds are tried in a fixed order (see
//! [`Connection`]). Running the same input twice always produces the
//! same output.

use std::collections::VecDeque;

use tracing::{debug, instrument};

use crate::config::MergeConfig;
use crate::types::{MergeError, Point, Polyline, Segment};

/// How a candidate segment attaches to a growing path.
///
/// Variants are listed in the order [`Connection::between`] tests them;
/// the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connection {
    /// The candidate's start meets the path's tail: append it as is.
    TailToStart,
    /// The candidate's end meets the path's tail: append it reversed.
    TailToEnd,
    /// The candidate's end meets the path's head: prepend it as is.
    HeadToEnd,
    /// The candidate's start meets the path's head: prepend it reversed.
    HeadToStart,
    /// The candidate touches neither end of the path.
    None,
}

impl Connection {
    /// Classify how `candidate` connects to a path with the given
    /// `head` and `tail`.
    ///
    /// An empty candidate never connects.
    ///
    /// # Examples
    ///
    /// ```
    /// use cable_merge::{Point, reconstruct::Connection};
    ///
    /// let head = Point::new(0.0, 0.0);
    /// let tail = Point::new(1.0, 0.0);
    /// let reversed = [Point::new(2.0, 0.0), Point::new(1.0, 0.0)];
    /// assert_eq!(
    ///     Connection::between(&reversed, head, tail, 1e-9),
    ///     Connection::TailToEnd,
    /// );
    /// ```
    #[must_use]
    pub fn between(candidate: &[Point], head: Point, tail: Point, tolerance: f64) -> Self {
        let (Some(&start), Some(&end)) = (candidate.first(), candidate.last()) else {
            return Self::None;
        };

        if start.is_close(tail, tolerance) {
            Self::TailToStart
        } else if end.is_close(tail, tolerance) {
            Self::TailToEnd
        } else if end.is_close(head, tolerance) {
            Self::HeadToEnd
        } else if start.is_close(head, tolerance) {
            Self::HeadToStart
        } else {
            Self::None
        }
    }
}

/// Merged segments plus counters describing the work done.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeResult {
    /// One segment per reconstructed path, in completion order.
    pub segments: Vec<Segment>,
    /// Number of segments attached to an existing path. Each join drops
    /// exactly one duplicated junction point.
    pub join_count: usize,
    /// Number of pool scans performed across all paths.
    pub pass_count: usize,
}

/// Outcome of a merge that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum MergeOutcome {
    /// The input held no segments. Callers usually skip writing output.
    NothingToMerge,
    /// At least one path was reconstructed.
    Merged(MergeResult),
}

impl MergeOutcome {
    /// The merged segments, or an empty slice when there was nothing to merge.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        match self {
            Self::NothingToMerge => &[],
            Self::Merged(result) => &result.segments,
        }
    }
}

/// A path under construction, extendable at both ends in O(1).
struct GrowingPath {
    points: VecDeque<Point>,
}

impl GrowingPath {
    fn seed(polyline: &Polyline) -> Self {
        Self {
            points: polyline.points().iter().copied().collect(),
        }
    }

    fn endpoints(&self) -> Option<(Point, Point)> {
        Some((*self.points.front()?, *self.points.back()?))
    }

    /// Splice `candidate` onto the path, dropping its junction point.
    fn attach(&mut self, connection: Connection, candidate: &[Point]) {
        let n = candidate.len();
        match connection {
            Connection::TailToStart => {
                self.points.extend(&candidate[1..]);
            }
            Connection::TailToEnd => {
                self.points.extend(candidate[..n - 1].iter().rev());
            }
            Connection::HeadToEnd => {
                for &p in candidate[..n - 1].iter().rev() {
                    self.points.push_front(p);
                }
            }
            Connection::HeadToStart => {
                for &p in &candidate[1..] {
                    self.points.push_front(p);
                }
            }
            Connection::None => {}
        }
    }

    /// Run one pass over the pool, attaching every candidate that
    /// touches the path as it stands when the candidate is visited.
    ///
    /// Unmatched candidates keep their relative order. Returns the
    /// number of candidates attached.
    fn extend_from_pool(&mut self, pool: &mut VecDeque<&Segment>, tolerance: f64) -> usize {
        let mut joined = 0;
        let mut unmatched = VecDeque::with_capacity(pool.len());

        for candidate in pool.drain(..) {
            let points = candidate.coordinates.points();
            let connection = self
                .endpoints()
                .map_or(Connection::None, |(head, tail)| {
                    Connection::between(points, head, tail, tolerance)
                });

            if connection == Connection::None {
                unmatched.push_back(candidate);
            } else {
                self.attach(connection, points);
                joined += 1;
            }
        }

        *pool = unmatched;
        joined
    }

    fn into_polyline(self) -> Polyline {
        Polyline::new(self.points.into())
    }
}

/// Reject segments without coordinates before any path is built.
fn validate_segments(segments: &[Segment]) -> Result<(), MergeError> {
    match segments
        .iter()
        .enumerate()
        .find(|(_, s)| s.coordinates.is_empty())
    {
        Some((index, segment)) => Err(MergeError::MalformedSegment {
            index,
            id: segment.id.clone(),
        }),
        None => Ok(()),
    }
}

/// Merge `segments` into maximal continuous paths.
///
/// Segments are consumed in input order. The first remaining segment
/// seeds a path, which is then extended by repeated passes over the
/// remaining pool until a pass attaches nothing. Each finished path
/// becomes a segment with id `{base_id}-merged-{n}` (1-based, in
/// completion order) that inherits `hidden` and `color` from its seed
/// segment, falling back to [`MergeConfig::fallback_color`].
///
/// # Errors
///
/// Returns [`MergeError::InvalidConfig`] if `config` fails validation
/// and [`MergeError::MalformedSegment`] if any segment has no
/// coordinates. Nothing is merged in either case.
///
/// # Examples
///
/// ```
/// use cable_merge::{MergeConfig, MergeOutcome, Point, Segment, reconstruct};
///
/// let segments = vec![
///     Segment::new("c-1", vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]),
///     Segment::new("c-2", vec![Point::new(2.0, 0.0), Point::new(1.0, 0.0)]),
/// ];
/// let outcome = reconstruct(&segments, "c", &MergeConfig::default()).unwrap();
/// let MergeOutcome::Merged(result) = outcome else { unreachable!() };
///
/// assert_eq!(result.segments.len(), 1);
/// assert_eq!(result.segments[0].id, "c-merged-1");
/// assert_eq!(
///     result.segments[0].coordinates.points(),
///     &[Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(2.0, 0.0)],
/// );
/// ```
#[instrument(level = "debug", skip_all, fields(base_id = %base_id, input = segments.len()))]
pub fn reconstruct(
    segments: &[Segment],
    base_id: &str,
    config: &MergeConfig,
) -> Result<MergeOutcome, MergeError> {
    config.validate()?;
    validate_segments(segments)?;

    if segments.is_empty() {
        return Ok(MergeOutcome::NothingToMerge);
    }

    let mut pool: VecDeque<&Segment> = segments.iter().collect();
    let mut merged = Vec::new();
    let mut join_count = 0;
    let mut pass_count = 0;

    while let Some(seed) = pool.pop_front() {
        let mut path = GrowingPath::seed(&seed.coordinates);
        let mut path_joins = 0;

        loop {
            pass_count += 1;
            let joined = path.extend_from_pool(&mut pool, config.tolerance);
            if joined == 0 {
                break;
            }
            path_joins += joined;
        }
        join_count += path_joins;

        let segment = Segment {
            id: format!("{base_id}-merged-{}", merged.len() + 1),
            hidden: seed.hidden,
            color: Some(
                seed.color
                    .clone()
                    .unwrap_or_else(|| config.fallback_color.clone()),
            ),
            coordinates: path.into_polyline(),
        };
        debug!(
            id = %segment.id,
            seed = %seed.id,
            joins = path_joins,
            points = segment.coordinates.len(),
            "path complete"
        );
        merged.push(segment);
    }

    Ok(MergeOutcome::Merged(MergeResult {
        segments: merged,
        join_count,
        pass_count,
    }))
}
