//! Pad and hole generation
//!
//! SMT pads map to a single copper primitive. Plated holes emit a pad half
//! on the top layer and a hole half on the drill layer; the hole half only
//! links back to its element so one logical hole highlights once.

use crate::circuit::{HoleShape, LayerRef, PcbHole, PcbPlatedHole, PcbSmtPad, PlatedHoleShape, SmtPadShape};
use crate::draw::geometry::*;

use super::emit;

pub fn generate_smtpad<'a>(
    pad: &PcbSmtPad,
    meta: PrimitiveMeta<'a>,
    ids: &mut PrimitiveIdGenerator,
) -> Vec<Primitive<'a>> {
    let layer = Layer::from(pad.layer.unwrap_or(LayerRef::Top));

    let shape = match &pad.shape {
        SmtPadShape::Rect { x, y, width, height, rect_border_radius } => PrimitiveShape::Rect(Rect {
            x: *x,
            y: *y,
            w: *width,
            h: *height,
            roundness: *rect_border_radius,
            ..Default::default()
        }),
        SmtPadShape::RotatedRect { x, y, width, height, ccw_rotation, rect_border_radius } => {
            PrimitiveShape::Rect(Rect {
                x: *x,
                y: *y,
                w: *width,
                h: *height,
                ccw_rotation: Some(*ccw_rotation),
                roundness: *rect_border_radius,
                ..Default::default()
            })
        }
        SmtPadShape::Circle { x, y, radius } => PrimitiveShape::Circle(Circle {
            x: *x,
            y: *y,
            r: *radius,
            mesh_fill: false,
        }),
        SmtPadShape::Polygon { points } => PrimitiveShape::Polygon(Polygon {
            points: points.clone(),
        }),
        SmtPadShape::Pill { x, y, width, height, .. } => PrimitiveShape::Pill(Pill {
            x: *x,
            y: *y,
            w: *width,
            h: *height,
            ccw_rotation: None,
        }),
        SmtPadShape::RotatedPill { x, y, width, height, ccw_rotation, .. } => {
            PrimitiveShape::Pill(Pill {
                x: *x,
                y: *y,
                w: *width,
                h: *height,
                ccw_rotation: Some(*ccw_rotation),
            })
        }
        SmtPadShape::Unsupported => {
            tracing::debug!(id = ?pad.pcb_smtpad_id, "skipping pcb_smtpad with unsupported shape");
            return Vec::new();
        }
    };

    vec![emit(ids, layer, shape, meta)]
}

/// Unplated holes; only circular bores are drawn
pub fn generate_hole<'a>(
    hole: &PcbHole,
    meta: PrimitiveMeta<'a>,
    ids: &mut PrimitiveIdGenerator,
) -> Vec<Primitive<'a>> {
    match (hole.hole_shape, hole.hole_diameter) {
        (None | Some(HoleShape::Circle), Some(diameter)) => {
            let circle = Circle {
                x: hole.x,
                y: hole.y,
                r: diameter / 2.0,
                mesh_fill: false,
            };
            vec![emit(ids, Layer::Drill, PrimitiveShape::Circle(circle), meta.without_port())]
        }
        (shape, _) => {
            tracing::debug!(id = ?hole.pcb_hole_id, ?shape, "skipping pcb_hole that is not a sized circle");
            Vec::new()
        }
    }
}

pub fn generate_plated_hole<'a>(
    hole: &PcbPlatedHole,
    meta: PrimitiveMeta<'a>,
    ids: &mut PrimitiveIdGenerator,
) -> Vec<Primitive<'a>> {
    let (x, y) = (hole.x, hole.y);
    let drill_meta = PrimitiveMeta {
        element: meta.element,
        ..PrimitiveMeta::default()
    };

    let (pad, drill) = match &hole.shape {
        PlatedHoleShape::Circle { outer_diameter, hole_diameter } => (
            PrimitiveShape::Circle(Circle {
                x,
                y,
                r: outer_diameter / 2.0,
                mesh_fill: false,
            }),
            PrimitiveShape::Circle(Circle {
                x,
                y,
                r: hole_diameter / 2.0,
                mesh_fill: false,
            }),
        ),
        PlatedHoleShape::Oval { outer_width, outer_height, hole_width, hole_height } => (
            PrimitiveShape::Oval(Oval {
                x,
                y,
                rx: outer_width / 2.0,
                ry: outer_height / 2.0,
            }),
            PrimitiveShape::Oval(Oval {
                x,
                y,
                rx: hole_width / 2.0,
                ry: hole_height / 2.0,
            }),
        ),
        PlatedHoleShape::Pill { outer_width, outer_height, hole_width, hole_height, ccw_rotation } => (
            PrimitiveShape::Pill(Pill {
                x,
                y,
                w: *outer_width,
                h: *outer_height,
                ccw_rotation: *ccw_rotation,
            }),
            PrimitiveShape::Pill(Pill {
                x,
                y,
                w: *hole_width,
                h: *hole_height,
                ccw_rotation: *ccw_rotation,
            }),
        ),
        PlatedHoleShape::CircularHoleWithRectPad {
            hole_diameter,
            rect_pad_width,
            rect_pad_height,
            rect_border_radius,
            hole_offset_x,
            hole_offset_y,
        } => (
            PrimitiveShape::Rect(Rect {
                x,
                y,
                w: *rect_pad_width,
                h: *rect_pad_height,
                roundness: *rect_border_radius,
                ..Default::default()
            }),
            PrimitiveShape::Circle(Circle {
                x: x + hole_offset_x.unwrap_or(0.0),
                y: y + hole_offset_y.unwrap_or(0.0),
                r: hole_diameter / 2.0,
                mesh_fill: false,
            }),
        ),
        PlatedHoleShape::PillHoleWithRectPad {
            hole_width,
            hole_height,
            rect_pad_width,
            rect_pad_height,
            rect_border_radius,
        } => (
            PrimitiveShape::Rect(Rect {
                x,
                y,
                w: *rect_pad_width,
                h: *rect_pad_height,
                roundness: *rect_border_radius,
                ..Default::default()
            }),
            PrimitiveShape::Pill(Pill {
                x,
                y,
                w: *hole_width,
                h: *hole_height,
                ccw_rotation: None,
            }),
        ),
        PlatedHoleShape::RotatedPillHoleWithRectPad {
            hole_width,
            hole_height,
            hole_ccw_rotation,
            rect_pad_width,
            rect_pad_height,
            rect_ccw_rotation,
            rect_border_radius,
        } => (
            PrimitiveShape::Rect(Rect {
                x,
                y,
                w: *rect_pad_width,
                h: *rect_pad_height,
                ccw_rotation: Some(*rect_ccw_rotation),
                roundness: *rect_border_radius,
                ..Default::default()
            }),
            PrimitiveShape::Pill(Pill {
                x,
                y,
                w: *hole_width,
                h: *hole_height,
                ccw_rotation: Some(*hole_ccw_rotation),
            }),
        ),
        PlatedHoleShape::Unsupported => {
            tracing::debug!(id = ?hole.pcb_plated_hole_id, "skipping pcb_plated_hole with unsupported shape");
            return Vec::new();
        }
    };

    vec![
        emit(ids, Layer::Top, pad, meta),
        emit(ids, Layer::Drill, drill, drill_meta),
    ]
}
