//! Lenient value parsing for circuit element fields
//!
//! Handles the few fields circuit JSON leaves loosely typed: unit-suffixed
//! lengths and dimension endpoints that may be points, coordinate strings,
//! or references to other elements.
//!
//! # Submodules
//! - `units` - Length strings to millimeters, fixed-point formatting
//! - `references` - Dimension endpoint resolution

mod units;
mod references;

pub use units::{
    format_fixed,
    parse_length,
    parse_length_str,
};

pub use references::{
    parse_point_str,
    find_element_referencing_id,
    resolve_point_reference,
};
