//! Drawing primitive pipeline
//!
//! # Submodules
//! - `geometry` - Primitive shapes, layers and id assignment
//! - `parsing` - Length values and dimension endpoint resolution
//! - `metadata` - Component/port links for primitives
//! - `tessellation` - Bulge-arc flattening and stroke expansion
//! - `generation` - Element to primitive conversion

pub mod geometry;
pub mod parsing;
pub mod metadata;
pub mod tessellation;
pub mod generation;

pub use geometry::{Layer, Primitive, PrimitiveIdGenerator, PrimitiveMeta, PrimitiveShape};
pub use generation::{convert_element_to_primitives, PrimitiveConverter};
pub use metadata::MetadataLinker;
