//! SVG preview serializer.
//!
//! Renders a [`CableDocument`] as an SVG so merged output can be
//! eyeballed without loading the map front end. Built with the [`svg`]
//! crate for document construction, XML escaping and path data
//! formatting.
//!
//! Cable coordinates are `[lat, lng]`. The preview is a plain
//! equirectangular plot: longitude grows to the right, latitude grows
//! upward (SVG `y` is negated latitude).
//!
//! This is a pure function with no I/O -- it returns a `String`.

use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Description, Path, Title};
use svg::node::{Text, Value};

use cable_merge::{CableDocument, MergeConfig, Point, Polyline, Segment};

/// Rendered preview width in pixels. Height follows the aspect ratio.
const PREVIEW_WIDTH_PX: f64 = 1024.0;

/// Margin around the drawing, as a fraction of its larger extent.
const MARGIN_RATIO: f64 = 0.02;

/// Smallest extent used for the `viewBox`, so a single point or a
/// perfectly straight meridian still produces a drawable box.
const MIN_EXTENT: f64 = 1e-3;

/// Stroke width in screen pixels (strokes do not scale with the view).
const STROKE_WIDTH_PX: u32 = 2;

/// Metadata to embed in the SVG document.
///
/// When present, a `<title>` and/or `<desc>` element is emitted right
/// after the opening `<svg>` tag. Text is XML-escaped by the `svg`
/// crate.
#[derive(Debug, Clone, Default)]
pub struct SvgMetadata<'a> {
    /// Document title, typically the cable name.
    pub title: Option<&'a str>,

    /// Document description, typically the source file and merge stats.
    pub description: Option<&'a str>,
}

/// Map a `[lat, lng]` coordinate into preview space.
fn project(p: Point) -> (f64, f64) {
    (p.y, -p.x)
}

/// Build an SVG path `d` attribute string from a polyline.
///
/// Uses `M` for the first point and `L` for subsequent points, in
/// preview space. Returns an empty string for polylines with fewer than
/// 2 points.
///
/// # Examples
///
/// ```
/// use cable_merge::{Point, Polyline};
/// use cable_export::build_path_data;
///
/// // [lat, lng] pairs: x is longitude, y is negated latitude.
/// let polyline = Polyline::new(vec![Point::new(10.0, 20.0), Point::new(30.0, 40.0)]);
/// assert_eq!(build_path_data(&polyline), "M20,-10 L40,-30");
/// ```
#[must_use]
pub fn build_path_data(polyline: &Polyline) -> String {
    let points = polyline.points();
    if points.len() < 2 {
        return String::new();
    }

    let mut data = Data::new().move_to(project(points[0]));
    for &p in &points[1..] {
        data = data.line_to(project(p));
    }
    String::from(Value::from(data))
}

/// Axis-aligned bounds in preview space.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    fn of<'a>(segments: impl IntoIterator<Item = &'a Segment>) -> Option<Self> {
        segments
            .into_iter()
            .flat_map(|s| s.coordinates.points())
            .map(|&p| project(p))
            .fold(None, |acc: Option<Self>, (x, y)| {
                Some(acc.map_or(
                    Self {
                        min_x: x,
                        min_y: y,
                        max_x: x,
                        max_y: y,
                    },
                    |b| Self {
                        min_x: b.min_x.min(x),
                        min_y: b.min_y.min(y),
                        max_x: b.max_x.max(x),
                        max_y: b.max_y.max(y),
                    },
                ))
            })
    }

    /// `(min_x, min_y, width, height)` with margin, never degenerate.
    fn view_box(self) -> (f64, f64, f64, f64) {
        let width = (self.max_x - self.min_x).max(MIN_EXTENT);
        let height = (self.max_y - self.min_y).max(MIN_EXTENT);
        let margin = width.max(height) * MARGIN_RATIO;
        (
            self.min_x - margin,
            self.min_y - margin,
            2.0f64.mul_add(margin, width),
            2.0f64.mul_add(margin, height),
        )
    }
}

/// Segments that appear in the preview: visible ones with 2+ points.
fn drawable(cable: &CableDocument) -> impl Iterator<Item = &Segment> {
    cable
        .segments
        .iter()
        .filter(|s| !s.hidden && s.coordinates.len() >= 2)
}

/// Serialize a cable document into an SVG preview string.
///
/// Each visible segment with 2 or more points becomes a `<path>`
/// stroked with the segment's color, falling back to the cable color and
/// then to [`MergeConfig::DEFAULT_FALLBACK_COLOR`]. Hidden segments and
/// single-point segments are skipped. The `viewBox` is fitted to the
/// drawn segments plus a small margin.
///
/// # Examples
///
/// ```
/// use cable_merge::{CableDocument, Point, Segment};
/// use cable_export::{SvgMetadata, to_svg};
///
/// let cable = CableDocument::new(
///     "tgn",
///     "TGN-IA",
///     vec![Segment::new("tgn-1", vec![Point::new(10.0, 20.0), Point::new(30.0, 40.0)])
///         .with_color("#00AA00")],
/// );
/// let metadata = SvgMetadata {
///     title: Some("TGN-IA"),
///     ..SvgMetadata::default()
/// };
/// let svg = to_svg(&cable, &metadata);
/// assert!(svg.contains("<title>TGN-IA</title>"));
/// assert!(svg.contains(r##"stroke="#00AA00""##));
/// assert!(svg.contains("M20,-10 L40,-30"));
/// ```
#[must_use]
pub fn to_svg(cable: &CableDocument, metadata: &SvgMetadata<'_>) -> String {
    let (vx, vy, vw, vh) =
        Bounds::of(drawable(cable)).map_or((0.0, 0.0, 1.0, 1.0), Bounds::view_box);
    let height_px = PREVIEW_WIDTH_PX * vh / vw;

    let mut doc = Document::new()
        .set("width", format!("{PREVIEW_WIDTH_PX:.0}"))
        .set("height", format!("{height_px:.0}"))
        .set("viewBox", format!("{vx} {vy} {vw} {vh}"))
        .set("preserveAspectRatio", "xMidYMid meet");

    if let Some(title) = metadata.title {
        doc = doc.add(Title::new(title));
    }

    if let Some(description) = metadata.description {
        doc = doc.add(Description::new().add(Text::new(description)));
    }

    let fallback = cable
        .color
        .as_deref()
        .unwrap_or(MergeConfig::DEFAULT_FALLBACK_COLOR);

    for segment in drawable(cable) {
        let path = Path::new()
            .set("id", segment.id.as_str())
            .set("d", build_path_data(&segment.coordinates))
            .set("fill", "none")
            .set("stroke", segment.color.as_deref().unwrap_or(fallback))
            .set("stroke-width", STROKE_WIDTH_PX)
            .set("stroke-linecap", "round")
            .set("stroke-linejoin", "round")
            .set("vector-effect", "non-scaling-stroke");
        doc = doc.add(path);
    }

    // The svg crate omits the XML declaration, so we prepend it.
    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{doc}\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn pl(coords: &[(f64, f64)]) -> Polyline {
        Polyline::new(coords.iter().map(|&(x, y)| Point::new(x, y)).collect())
    }

    fn cable(segments: Vec<Segment>) -> CableDocument {
        CableDocument::new("c", "Cable", segments)
    }

    fn no_meta() -> SvgMetadata<'static> {
        SvgMetadata::default()
    }

    fn view_box_of(svg: &str) -> Vec<f64> {
        let start = svg.find("viewBox=\"").unwrap() + "viewBox=\"".len();
        let end = start + svg[start..].find('"').unwrap();
        svg[start..end]
            .split_whitespace()
            .map(|v| v.parse().unwrap())
            .collect()
    }

    // --- build_path_data ---

    #[test]
    fn build_path_data_empty_polyline() {
        assert_eq!(build_path_data(&Polyline::default()), "");
    }

    #[test]
    fn build_path_data_single_point() {
        assert_eq!(build_path_data(&pl(&[(5.0, 5.0)])), "");
    }

    #[test]
    fn build_path_data_swaps_axes_and_flips_latitude() {
        let d = build_path_data(&pl(&[(1.0, 2.0), (-3.0, 4.0), (5.0, -6.0)]));
        assert_eq!(d, "M2,-1 L4,3 L-6,-5");
    }

    // --- Document structure ---

    #[test]
    fn empty_cable_produces_valid_svg_with_no_paths() {
        let svg = to_svg(&cable(vec![]), &no_meta());
        assert!(svg.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(svg.contains(r#"viewBox="0 0 1 1""#));
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn hidden_segments_are_skipped() {
        let svg = to_svg(
            &cable(vec![
                Segment::new("shown", pl(&[(0.0, 0.0), (1.0, 1.0)])),
                Segment::new("gone", pl(&[(5.0, 5.0), (6.0, 6.0)])).with_hidden(true),
            ]),
            &no_meta(),
        );
        assert!(svg.contains(r#"id="shown""#));
        assert!(!svg.contains(r#"id="gone""#));
    }

    #[test]
    fn single_point_segments_are_skipped() {
        let svg = to_svg(
            &cable(vec![Segment::new("dot", pl(&[(1.0, 1.0)]))]),
            &no_meta(),
        );
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn one_path_per_drawable_segment() {
        let svg = to_svg(
            &cable(vec![
                Segment::new("a", pl(&[(0.0, 0.0), (1.0, 1.0)])),
                Segment::new("b", pl(&[(2.0, 2.0), (3.0, 3.0), (4.0, 2.0)])),
            ]),
            &no_meta(),
        );
        assert_eq!(svg.matches("<path").count(), 2);
    }

    #[test]
    fn stroke_color_falls_back_to_cable_then_default() {
        let mut doc = cable(vec![
            Segment::new("own", pl(&[(0.0, 0.0), (1.0, 1.0)])).with_color("#123456"),
            Segment::new("inherit", pl(&[(2.0, 2.0), (3.0, 3.0)])),
        ]);
        let svg = to_svg(&doc, &no_meta());
        assert!(svg.contains(r##"stroke="#123456""##));
        assert!(svg.contains(r##"stroke="#FF6633""##));

        doc.color = Some("#ABCDEF".to_string());
        let svg = to_svg(&doc, &no_meta());
        assert!(svg.contains(r##"stroke="#ABCDEF""##));
        assert!(!svg.contains(r##"stroke="#FF6633""##));
    }

    #[test]
    fn view_box_contains_all_drawn_points() {
        let svg = to_svg(
            &cable(vec![Segment::new(
                "a",
                pl(&[(10.0, 100.0), (-5.0, 120.0), (0.0, 110.0)]),
            )]),
            &no_meta(),
        );
        let vb = view_box_of(&svg);
        let (x, y, w, h) = (vb[0], vb[1], vb[2], vb[3]);
        // x spans longitudes 100..120, y spans negated latitudes -10..5.
        assert!(x < 100.0 && x + w > 120.0);
        assert!(y < -10.0 && y + h > 5.0);
    }

    #[test]
    fn view_box_ignores_hidden_segments() {
        let svg = to_svg(
            &cable(vec![
                Segment::new("a", pl(&[(0.0, 0.0), (1.0, 1.0)])),
                Segment::new("far", pl(&[(80.0, 170.0), (81.0, 171.0)])).with_hidden(true),
            ]),
            &no_meta(),
        );
        let vb = view_box_of(&svg);
        assert!(vb[0] + vb[2] < 2.0);
    }

    #[test]
    fn degenerate_extent_is_widened() {
        let svg = to_svg(
            &cable(vec![Segment::new("a", pl(&[(0.0, 5.0), (0.0, 5.0)]))]),
            &no_meta(),
        );
        let vb = view_box_of(&svg);
        assert!(vb[2] > 0.0 && vb[3] > 0.0);
    }

    // --- Metadata ---

    #[test]
    fn title_and_desc_emitted_when_present() {
        let meta = SvgMetadata {
            title: Some("SEA-ME-WE 3"),
            description: Some("merged from 12 segments"),
        };
        let svg = to_svg(&cable(vec![]), &meta);
        assert!(svg.contains("<title>SEA-ME-WE 3</title>"));
        assert!(svg.contains("<desc>merged from 12 segments</desc>"));
    }

    #[test]
    fn title_and_desc_omitted_when_none() {
        let svg = to_svg(&cable(vec![]), &no_meta());
        assert!(!svg.contains("<title>"));
        assert!(!svg.contains("<desc>"));
    }

    #[test]
    fn special_characters_in_title_are_escaped() {
        let meta = SvgMetadata {
            title: Some("A & B <cable>"),
            ..SvgMetadata::default()
        };
        let svg = to_svg(&cable(vec![]), &meta);
        assert!(svg.contains("<title>A &amp; B &lt;cable&gt;</title>"));
    }
}
