//! Primitive generation for circuit elements
//!
//! This module converts decoded circuit elements into drawing primitives,
//! one element at a time, linking each primitive back to the records it
//! came from.
//!
//! # Submodules
//! - `board` - Board outline edges
//! - `pads` - SMT pads, plated and unplated holes
//! - `vias` - Via pads and drill
//! - `traces` - Segmented and interpolated traces
//! - `annotations` - Silkscreen and fabrication-note shapes, paths and text
//! - `regions` - Keepouts, copper pours and cutouts
//! - `dimensions` - Measurement callouts

mod board;
mod pads;
mod vias;
mod traces;
mod annotations;
mod regions;
mod dimensions;

use crate::circuit::CircuitElement;
use crate::draw::geometry::*;
use crate::draw::metadata::MetadataLinker;

pub use board::generate_board;
pub use pads::{generate_hole, generate_plated_hole, generate_smtpad};
pub use vias::generate_via;
pub use traces::{generate_trace, DEFAULT_TRACE_WIDTH, DEFAULT_VIA_OUTER_DIAMETER};
pub use annotations::{
    generate_fabrication_note_path,
    generate_fabrication_note_text,
    generate_silkscreen_circle,
    generate_silkscreen_line,
    generate_silkscreen_oval,
    generate_silkscreen_path,
    generate_silkscreen_pill,
    generate_silkscreen_rect,
    generate_silkscreen_text,
    DEFAULT_STROKE_WIDTH,
};
pub use regions::{generate_copper_pour, generate_cutout, generate_keepout};
pub use dimensions::{
    create_dimension_primitives,
    generate_fabrication_note_dimension,
    generate_note_dimension,
    DimensionStyle,
};

/// Build a primitive whose id prefix is its own kind
pub(crate) fn emit<'a>(
    ids: &mut PrimitiveIdGenerator,
    layer: Layer,
    shape: PrimitiveShape,
    meta: PrimitiveMeta<'a>,
) -> Primitive<'a> {
    let prefix = shape.kind();
    emit_with_prefix(ids, prefix, layer, shape, meta)
}

pub(crate) fn emit_with_prefix<'a>(
    ids: &mut PrimitiveIdGenerator,
    prefix: &str,
    layer: Layer,
    shape: PrimitiveShape,
    meta: PrimitiveMeta<'a>,
) -> Primitive<'a> {
    Primitive {
        id: ids.next_id(prefix),
        layer,
        shape,
        color: None,
        meta,
    }
}

/// Converter bound to one element collection
///
/// Builds the id index once so converting a whole board stays linear in
/// the number of elements.
pub struct PrimitiveConverter<'a> {
    all_elements: &'a [CircuitElement],
    linker: MetadataLinker<'a>,
}

impl<'a> PrimitiveConverter<'a> {
    pub fn new(all_elements: &'a [CircuitElement]) -> Self {
        Self {
            all_elements,
            linker: MetadataLinker::new(all_elements),
        }
    }

    /// Primitives for a single element, in drawing order
    pub fn convert(
        &self,
        element: &'a CircuitElement,
        ids: &mut PrimitiveIdGenerator,
    ) -> Vec<Primitive<'a>> {
        let meta = self.linker.resolve(element);
        let element_only = PrimitiveMeta::element_only(element);

        match element {
            CircuitElement::PcbBoard(board) => generate_board(board, element_only, ids),
            CircuitElement::PcbSmtpad(pad) => generate_smtpad(pad, meta, ids),
            CircuitElement::PcbHole(hole) => generate_hole(hole, meta, ids),
            CircuitElement::PcbPlatedHole(hole) => generate_plated_hole(hole, meta, ids),
            CircuitElement::PcbVia(via) => generate_via(via, meta, ids),
            CircuitElement::PcbTrace(trace) => generate_trace(trace, element_only, ids),
            CircuitElement::PcbKeepout(keepout) => generate_keepout(keepout, meta, ids),
            CircuitElement::PcbCopperPour(pour) => generate_copper_pour(pour, element_only, ids),
            CircuitElement::PcbCutout(cutout) => generate_cutout(cutout, meta, ids),
            CircuitElement::PcbSilkscreenRect(rect) => generate_silkscreen_rect(rect, element_only, ids),
            CircuitElement::PcbSilkscreenCircle(circle) => {
                generate_silkscreen_circle(circle, element_only, ids)
            }
            CircuitElement::PcbSilkscreenOval(oval) => generate_silkscreen_oval(oval, element_only, ids),
            CircuitElement::PcbSilkscreenPill(pill) => generate_silkscreen_pill(pill, element_only, ids),
            CircuitElement::PcbSilkscreenLine(line) => generate_silkscreen_line(line, element_only, ids),
            CircuitElement::PcbSilkscreenPath(path) => generate_silkscreen_path(path, meta, ids),
            CircuitElement::PcbSilkscreenText(text) => generate_silkscreen_text(text, element_only, ids),
            CircuitElement::PcbFabricationNotePath(path) => {
                generate_fabrication_note_path(path, meta, ids)
            }
            CircuitElement::PcbFabricationNoteText(text) => {
                generate_fabrication_note_text(text, element_only, ids)
            }
            CircuitElement::PcbNoteDimension(note) => {
                generate_note_dimension(note, element, self.all_elements, meta, ids)
            }
            CircuitElement::PcbFabricationNoteDimension(note) => {
                generate_fabrication_note_dimension(note, element, self.all_elements, meta, ids)
            }
            CircuitElement::PcbComponent(_)
            | CircuitElement::PcbPort(_)
            | CircuitElement::SourceComponent(_)
            | CircuitElement::SourcePort(_) => Vec::new(),
            CircuitElement::Unsupported(_) => {
                tracing::trace!(kind = element.type_name(), "no primitives for unmodeled element");
                Vec::new()
            }
        }
    }

    /// Primitives for every element of the collection, in input order
    pub fn convert_all(&self, ids: &mut PrimitiveIdGenerator) -> Vec<Primitive<'a>> {
        let primitives: Vec<Primitive<'a>> = self
            .all_elements
            .iter()
            .flat_map(|element| self.convert(element, ids))
            .collect();
        tracing::trace!(
            elements = self.all_elements.len(),
            primitives = primitives.len(),
            "converted circuit elements"
        );
        primitives
    }
}

/// Convert one element, resolving its links against `all_elements`
///
/// `element` does not need to belong to `all_elements`.
pub fn convert_element_to_primitives<'a>(
    element: &'a CircuitElement,
    all_elements: &'a [CircuitElement],
    ids: &mut PrimitiveIdGenerator,
) -> Vec<Primitive<'a>> {
    PrimitiveConverter::new(all_elements).convert(element, ids)
}
