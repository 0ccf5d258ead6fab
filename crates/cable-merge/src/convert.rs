//! Conversion of bare coordinate lists into cable documents.
//!
//! Raw cable traces are often exported as a JSON array of coordinate
//! lists with no metadata. [`convert`] wraps them into a
//! [`CableDocument`], numbering the segments and giving each one a
//! display color.

use std::hash::Hasher;

use siphasher::sip::SipHasher13;

use crate::types::{CableDocument, Point, Segment};

/// Fixed SipHash keys so colors are stable across runs and platforms.
const COLOR_KEY_0: u64 = 0x6361_626c_655f_6d61;
const COLOR_KEY_1: u64 = 0x705f_636f_6c6f_7273;

/// Derive a display color from a segment id.
///
/// Returns an uppercase `#RRGGBB` string. The same id always yields the
/// same color; different ids are spread uniformly over the RGB cube.
///
/// # Examples
///
/// ```
/// use cable_merge::convert::segment_color;
///
/// let color = segment_color("sjc-1");
/// assert_eq!(color.len(), 7);
/// assert!(color.starts_with('#'));
/// assert_eq!(color, segment_color("sjc-1"));
/// ```
#[must_use]
pub fn segment_color(segment_id: &str) -> String {
    let mut hasher = SipHasher13::new_with_keys(COLOR_KEY_0, COLOR_KEY_1);
    hasher.write(segment_id.as_bytes());
    let rgb = hasher.finish() & 0x00FF_FFFF;
    format!("#{rgb:06X}")
}

/// Wrap raw coordinate lists into a cable document.
///
/// Segment `i` (0-based) gets id `{cable_id}-{i + 1}`, is visible, and
/// is colored by [`segment_color`]. Coordinate lists are copied as is;
/// empty lists are kept and will be rejected by a later merge.
#[must_use]
pub fn convert(raw: Vec<Vec<Point>>, cable_id: &str, cable_name: &str) -> CableDocument {
    let segments = raw
        .into_iter()
        .enumerate()
        .map(|(i, coordinates)| {
            let id = format!("{cable_id}-{}", i + 1);
            let color = segment_color(&id);
            Segment::new(id, coordinates).with_color(color)
        })
        .collect();

    CableDocument::new(cable_id, cable_name, segments)
}
