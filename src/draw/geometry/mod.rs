//! Geometry module for drawing primitives
//!
//! This module provides the output side of the converter: the primitive
//! shapes handed to a drawing backend and the id source used to name them.
//!
//! # Submodules
//! - `types` - Layers, primitive shapes, metadata links
//! - `ids` - Per-run primitive id generator

mod types;
mod ids;

pub use types::{
    Layer,
    Line,
    Rect,
    Circle,
    Pill,
    Oval,
    Polygon,
    PolygonWithArcs,
    Text,
    PrimitiveShape,
    PrimitiveMeta,
    Primitive,
};

pub use ids::PrimitiveIdGenerator;
