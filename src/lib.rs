//! Circuit element to drawing primitive conversion
//!
//! Turns decoded circuit JSON (boards, pads, holes, traces, vias, pours,
//! silkscreen and fabrication annotations, dimension notes) into a flat list
//! of layer-tagged drawing primitives that any canvas or vector backend can
//! paint. Also provides a content fingerprint for render caching.
//!
//! ```ignore
//! let elements = circuit_primitives::parse_circuit_json(&json)?;
//! let mut ids = PrimitiveIdGenerator::new();
//! let primitives = circuit_primitives::convert_circuit_elements(&elements, &mut ids);
//! ```

use anyhow::{Context, Result};

pub mod circuit;
pub mod draw;
pub mod fingerprint;

pub use circuit::CircuitElement;
pub use draw::{
    convert_element_to_primitives,
    Layer,
    Primitive,
    PrimitiveConverter,
    PrimitiveIdGenerator,
    PrimitiveMeta,
    PrimitiveShape,
};
pub use fingerprint::calculate_circuit_json_key;

/// Convert every element of a collection, in input order
pub fn convert_circuit_elements<'a>(
    all_elements: &'a [CircuitElement],
    ids: &mut PrimitiveIdGenerator,
) -> Vec<Primitive<'a>> {
    PrimitiveConverter::new(all_elements).convert_all(ids)
}

/// Decode a circuit JSON array
///
/// The document itself must be a JSON array. Objects of unknown kinds, or of
/// known kinds whose fields do not decode, are kept raw as
/// `CircuitElement::Unsupported`. Records that are not objects at all are
/// skipped with a warning so one malformed record does not drop the whole
/// board.
pub fn parse_circuit_json(text: &str) -> Result<Vec<CircuitElement>> {
    let records: Vec<serde_json::Value> =
        serde_json::from_str(text).context("circuit JSON must be an array of element records")?;

    let total = records.len();
    let elements: Vec<CircuitElement> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let kind = record.get("type").and_then(|t| t.as_str()).map(str::to_owned);
            match serde_json::from_value::<CircuitElement>(record) {
                Ok(element) => Some(element),
                Err(err) => {
                    tracing::warn!(index, kind = ?kind, error = %err, "skipping undecodable circuit element");
                    None
                }
            }
        })
        .collect();

    tracing::trace!(total, decoded = elements.len(), "parsed circuit JSON");
    Ok(elements)
}
