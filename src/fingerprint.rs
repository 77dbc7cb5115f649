//! Circuit fingerprint
//!
//! A short content key over the PCB elements of a circuit, used by callers
//! to skip re-rendering when nothing visible has moved. The key depends only
//! on per-element ids and bounding boxes, never on input order.

use serde_json::Value;

use crate::circuit::{raw_number, CircuitElement, PcbSmtPad, PcbTrace, RawRecord};
use crate::draw::parsing::format_fixed;

/// Key for a circuit with no PCB elements
pub const EMPTY_KEY: &str = "0";

const HASH_SEED: i64 = 5381;

/// Id fields checked, in order, before falling back to the type tag
const KEY_ID_FIELDS: [&str; 4] = [
    "pcb_smtpad_id",
    "pcb_plated_hole_id",
    "pcb_trace_id",
    "pcb_board_id",
];

#[derive(Debug, Clone, Copy, PartialEq)]
struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    fn point(x: f64, y: f64) -> Self {
        Self { min_x: x, min_y: y, max_x: x, max_y: y }
    }

    fn center_size(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            min_x: x - width / 2.0,
            min_y: y - height / 2.0,
            max_x: x + width / 2.0,
            max_y: y + height / 2.0,
        }
    }

    /// Grow to include a point; a NaN coordinate poisons its axis
    fn include(self, x: f64, y: f64) -> Self {
        Self {
            min_x: nan_min(self.min_x, x),
            min_y: nan_min(self.min_y, y),
            max_x: nan_max(self.max_x, x),
            max_y: nan_max(self.max_y, y),
        }
    }
}

fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.min(b)
    }
}

fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}

/// Box around route coordinates; an empty route sits at the origin
fn route_bounds(mut points: impl Iterator<Item = (f64, f64)>) -> Bounds {
    let Some((x, y)) = points.next() else {
        return Bounds::point(0.0, 0.0);
    };
    points.fold(Bounds::point(x, y), |b, (x, y)| b.include(x, y))
}

/// Center ± size / 2, ignoring rotation; pads without a width/height box are NaN
fn pad_bounds(pad: &PcbSmtPad) -> Bounds {
    match (pad.shape.center(), pad.shape.size()) {
        (Some(c), Some((w, h))) => Bounds::center_size(c.x, c.y, w, h),
        _ => Bounds::point(f64::NAN, f64::NAN),
    }
}

/// Box around raw route coordinates, ignoring stroke width
fn trace_bounds(trace: &PcbTrace) -> Bounds {
    route_bounds(trace.route.iter().map(|p| match p.point() {
        Some(p) => (p.x, p.y),
        None => (f64::NAN, f64::NAN),
    }))
}

fn raw_route(raw: &RawRecord) -> &[Value] {
    raw.get("route")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Same rules for records kept raw, read straight from their fields
fn raw_bounds(raw: &RawRecord) -> Bounds {
    let number = |value: &Value, key: &str| value.get(key).and_then(Value::as_f64);
    match raw.get("type").and_then(Value::as_str) {
        Some("pcb_smtpad") => {
            let field = |key| raw_number(raw, key).unwrap_or(f64::NAN);
            Bounds::center_size(field("x"), field("y"), field("width"), field("height"))
        }
        Some("pcb_trace") => route_bounds(raw_route(raw).iter().map(|p| {
            (number(p, "x").unwrap_or(f64::NAN), number(p, "y").unwrap_or(f64::NAN))
        })),
        _ => Bounds::point(
            raw_number(raw, "x").unwrap_or(0.0),
            raw_number(raw, "y").unwrap_or(0.0),
        ),
    }
}

fn element_bounds(element: &CircuitElement) -> Bounds {
    match element {
        CircuitElement::PcbSmtpad(pad) => pad_bounds(pad),
        CircuitElement::PcbTrace(trace) => trace_bounds(trace),
        CircuitElement::Unsupported(raw) => raw_bounds(raw),
        other => {
            let p = other.position().unwrap_or_default();
            Bounds::point(p.x, p.y)
        }
    }
}

fn element_key(element: &CircuitElement) -> &str {
    let id = match element {
        CircuitElement::PcbSmtpad(e) => e.pcb_smtpad_id.as_deref(),
        CircuitElement::PcbPlatedHole(e) => e.pcb_plated_hole_id.as_deref(),
        CircuitElement::PcbTrace(e) => e.pcb_trace_id.as_deref(),
        CircuitElement::PcbBoard(e) => e.pcb_board_id.as_deref(),
        CircuitElement::Unsupported(raw) => KEY_ID_FIELDS
            .iter()
            .filter_map(|key| raw.get(*key).and_then(Value::as_str))
            .find(|id| !id.is_empty()),
        _ => None,
    };
    id.filter(|id| !id.is_empty()).unwrap_or(element.type_name())
}

fn route_len(element: &CircuitElement) -> Option<usize> {
    match element {
        CircuitElement::PcbTrace(trace) => Some(trace.route.len()),
        CircuitElement::Unsupported(raw) if element.type_name() == "pcb_trace" => {
            Some(raw_route(raw).len())
        }
        _ => None,
    }
}

fn format_coord(value: f64) -> String {
    if value.is_finite() {
        format_fixed(value, 4)
    } else {
        "NaN".to_string()
    }
}

fn signature(element: &CircuitElement) -> String {
    let b = element_bounds(element);
    let mut sig = format!(
        "{}:{},{},{},{}",
        element_key(element),
        format_coord(b.min_x),
        format_coord(b.min_y),
        format_coord(b.max_x),
        format_coord(b.max_y),
    );
    if let Some(len) = route_len(element) {
        sig.push_str(&format!(":{}", len));
    }
    sig
}

/// `hash * 33 + unit` per UTF-16 unit, where only the shifted term wraps to 32 bits
fn hash_signature(input: &str) -> u64 {
    let hash = input.encode_utf16().fold(HASH_SEED, |hash, unit| {
        let shifted = (hash as i32).wrapping_shl(5) as i64;
        shifted.wrapping_add(hash).wrapping_add(i64::from(unit))
    });
    hash.unsigned_abs()
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

/// Order-independent content key for the PCB elements of a circuit
///
/// Returns `"<count>_<hash>"`, or `"0"` when there are no PCB elements.
pub fn calculate_circuit_json_key(elements: &[CircuitElement]) -> String {
    let mut signatures: Vec<String> = elements
        .iter()
        .filter(|e| e.type_name().starts_with("pcb_"))
        .map(signature)
        .collect();

    if signatures.is_empty() {
        return EMPTY_KEY.to_string();
    }

    signatures.sort();
    let combined = signatures.join(",");
    let key = format!("{}_{}", signatures.len(), to_base36(hash_signature(&combined)));
    tracing::trace!(signatures = signatures.len(), %key, "computed circuit key");
    key
}
