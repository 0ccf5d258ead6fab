//! cable-export: Pure preview serializers for cable documents (sans-IO).
//!
//! Converts cable documents into formats for inspection outside the map
//! front end. Currently supports SVG.

pub mod svg;

pub use svg::{SvgMetadata, build_path_data, to_svg};
