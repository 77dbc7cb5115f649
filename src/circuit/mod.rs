//! Circuit element data model
//!
//! Typed records for the subset of circuit JSON that has a physical
//! footprint on the board, plus the component/port records used to link
//! drawn geometry back to its owner.
//!
//! # Submodules
//! - `types` - Points, layer references, length and point-reference values
//! - `elements` - The `CircuitElement` enum and per-kind records

mod types;
mod elements;

pub use types::{
    Point,
    PointWithBulge,
    LayerRef,
    TextAlign,
    LengthValue,
    PointRef,
    ExtraIds,
    RawRecord,
    raw_number,
    raw_point,
};

pub use elements::*;
