//! Curve flattening for PCB geometry
//!
//! This module turns curved or variable-width input geometry into plain
//! point sequences the converter can emit as polygons.
//!
//! # Submodules
//! - `bulge` - Bulge-arc flattening of polyline vertices
//! - `stroke` - Variable-width stroke expansion into outline polygons

mod bulge;
mod stroke;

pub use bulge::{
    DEFAULT_SEGMENT_LENGTH,
    flatten_bulge_points,
};

pub use stroke::{
    StrokePoint,
    expand_stroke,
};
