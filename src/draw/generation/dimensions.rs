//! Dimension annotation generation
//!
//! [`create_dimension_primitives`] builds a complete measurement callout
//! from two resolved points and is independent of element kind. The note
//! generators below resolve `pcb_note_dimension` and
//! `pcb_fabrication_note_dimension` endpoints and feed it.
//!
//! One policy applies everywhere:
//! - arrow size and font size default to 1 and are floored at 0.01
//! - line width is `max(arrow_size * 0.1, 0.05)`
//! - arrow legs sit ±30° off the line direction
//! - with no literal text the label is the distance with two decimals, no unit
//! - the label sits `max(arrow_size * 1.2, font_size * 0.6)` off the line, on
//!   the side the offset points to, and is never upside-down

use std::f64::consts::PI;

use crate::circuit::{CircuitElement, DimensionNote, Point, TextAlign};
use crate::draw::geometry::*;
use crate::draw::parsing::{format_fixed, parse_length, resolve_point_reference};

use super::emit_with_prefix;

/// Offsets at or below this magnitude draw no extension lines
const OFFSET_EPSILON: f64 = 1e-6;
const MIN_SIZE: f64 = 0.01;
const ARROW_ANGLE: f64 = PI / 6.0;

/// Sizing and labelling for one dimension callout
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionStyle {
    pub arrow_size: f64,
    pub font_size: f64,
    /// Literal label; blank or absent falls back to the measured distance
    pub text: Option<String>,
    /// Uniform color override for every emitted primitive
    pub color: Option<String>,
}

impl Default for DimensionStyle {
    fn default() -> Self {
        Self {
            arrow_size: 1.0,
            font_size: 1.0,
            text: None,
            color: None,
        }
    }
}

impl DimensionStyle {
    pub fn line_width(&self) -> f64 {
        (self.arrow_size * 0.1).max(0.05)
    }

    pub fn label_distance(&self) -> f64 {
        (self.arrow_size * 1.2).max(self.font_size * 0.6)
    }

    /// Trimmed literal text, else the distance to two decimals
    pub fn label(&self, distance: f64) -> String {
        match self.text.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => format_fixed(distance, 2),
        }
    }

    fn clamped(&self) -> Self {
        Self {
            arrow_size: self.arrow_size.max(MIN_SIZE),
            font_size: self.font_size.max(MIN_SIZE),
            ..self.clone()
        }
    }
}

fn rotate(v: Point, angle: f64) -> Point {
    let (sin, cos) = angle.sin_cos();
    Point::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Label angle in `[0, 360)`, turned half a revolution when it would read upside-down
fn label_angle(unit: Point) -> f64 {
    let angle = (unit.y.atan2(unit.x).to_degrees() + 360.0) % 360.0;
    if angle > 90.0 && angle < 270.0 {
        (angle + 180.0) % 360.0
    } else {
        angle
    }
}

/// Build a measurement callout between `from` and `to`
///
/// Emits, in order: two extension lines (only for a non-zero `offset`), the
/// main line between the offset endpoints, two arrow legs at each end, and
/// the label. Coincident or non-finite endpoints produce nothing.
pub fn create_dimension_primitives<'a>(
    from: Point,
    to: Point,
    layer: Layer,
    offset: f64,
    style: &DimensionStyle,
    meta: PrimitiveMeta<'a>,
    ids: &mut PrimitiveIdGenerator,
) -> Vec<Primitive<'a>> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let distance = dx.hypot(dy);
    if !distance.is_finite() || distance == 0.0 {
        return Vec::new();
    }

    let style = style.clamped();
    let offset = if offset.is_finite() { offset } else { 0.0 };
    let unit = Point::new(dx / distance, dy / distance);
    let normal = Point::new(-unit.y, unit.x);

    let start = Point::new(from.x + normal.x * offset, from.y + normal.y * offset);
    let end = Point::new(to.x + normal.x * offset, to.y + normal.y * offset);
    let width = style.line_width();

    let mut primitives = Vec::with_capacity(8);
    let line = |ids: &mut PrimitiveIdGenerator, prefix: &str, a: Point, b: Point| {
        let shape = PrimitiveShape::Line(Line {
            x1: a.x,
            y1: a.y,
            x2: b.x,
            y2: b.y,
            width,
            ..Default::default()
        });
        emit_with_prefix(ids, prefix, layer, shape, meta)
    };

    if offset.abs() > OFFSET_EPSILON {
        primitives.push(line(ids, "dimension_extension", from, start));
        primitives.push(line(ids, "dimension_extension", to, end));
    }

    primitives.push(line(ids, "dimension", start, end));

    let reverse = Point::new(-unit.x, -unit.y);
    for (tip, direction) in [(start, unit), (end, reverse)] {
        for angle in [ARROW_ANGLE, -ARROW_ANGLE] {
            let leg = rotate(direction, angle);
            let tail = Point::new(tip.x + leg.x * style.arrow_size, tip.y + leg.y * style.arrow_size);
            primitives.push(line(ids, "dimension_arrow", tip, tail));
        }
    }

    let side = if offset >= 0.0 { 1.0 } else { -1.0 };
    let lift = style.label_distance() * side;
    let label = Text {
        x: (start.x + end.x) / 2.0 + normal.x * lift,
        y: (start.y + end.y) / 2.0 + normal.y * lift,
        text: style.label(distance),
        size: style.font_size,
        align: TextAlign::Center,
        ccw_rotation: Some(label_angle(unit)),
    };
    primitives.push(emit_with_prefix(ids, "dimension_text", layer, PrimitiveShape::Text(label), meta));

    if let Some(color) = &style.color {
        for primitive in &mut primitives {
            primitive.color = Some(color.clone());
        }
    }

    primitives
}

fn note_style(note: &DimensionNote, with_color: bool) -> DimensionStyle {
    let defaults = DimensionStyle::default();
    DimensionStyle {
        arrow_size: parse_length(note.arrow_size.as_ref(), defaults.arrow_size),
        font_size: parse_length(note.font_size.as_ref(), defaults.font_size),
        text: note.text.clone(),
        color: if with_color { note.color.clone() } else { None },
    }
}

/// Resolve both endpoints, logging which one failed
fn note_endpoints(
    note: &DimensionNote,
    element: &CircuitElement,
    all_elements: &[CircuitElement],
) -> Option<(Point, Point)> {
    let from = resolve_point_reference(note.from.as_ref(), all_elements, element);
    let to = resolve_point_reference(note.to.as_ref(), all_elements, element);
    match (from, to) {
        (Some(from), Some(to)) => Some((from, to)),
        _ => {
            tracing::debug!(
                kind = element.type_name(),
                from = ?note.from,
                to = ?note.to,
                "dimension endpoint did not resolve"
            );
            None
        }
    }
}

/// Plain note dimension: drafting layer, no offset
pub fn generate_note_dimension<'a>(
    note: &DimensionNote,
    element: &CircuitElement,
    all_elements: &[CircuitElement],
    meta: PrimitiveMeta<'a>,
    ids: &mut PrimitiveIdGenerator,
) -> Vec<Primitive<'a>> {
    let Some((from, to)) = note_endpoints(note, element, all_elements) else {
        return Vec::new();
    };
    create_dimension_primitives(from, to, Layer::DwgsUser, 0.0, &note_style(note, false), meta, ids)
}

/// Fabrication dimension: honors `offset`, `color` and a bottom/top layer choice
pub fn generate_fabrication_note_dimension<'a>(
    note: &DimensionNote,
    element: &CircuitElement,
    all_elements: &[CircuitElement],
    meta: PrimitiveMeta<'a>,
    ids: &mut PrimitiveIdGenerator,
) -> Vec<Primitive<'a>> {
    let Some((from, to)) = note_endpoints(note, element, all_elements) else {
        return Vec::new();
    };
    let layer = match note.layer.as_deref() {
        Some("bottom" | "bottom_fabrication") => Layer::BottomFabrication,
        _ => Layer::TopFabrication,
    };
    let offset = parse_length(note.offset.as_ref(), 0.0);
    create_dimension_primitives(from, to, layer, offset, &note_style(note, true), meta, ids)
}
