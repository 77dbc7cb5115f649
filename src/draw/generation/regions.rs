//! Area generation: keepouts, copper pours and board cutouts

use crate::circuit::{CopperPourShape, CutoutShape, KeepoutShape, PcbCopperPour, PcbCutout, PcbKeepout};
use crate::draw::geometry::*;

use super::emit;

/// Keepouts are hatched on the top layer so they read as "no copper here"
pub fn generate_keepout<'a>(
    keepout: &PcbKeepout,
    meta: PrimitiveMeta<'a>,
    ids: &mut PrimitiveIdGenerator,
) -> Vec<Primitive<'a>> {
    let shape = match &keepout.shape {
        KeepoutShape::Circle { center, radius } => PrimitiveShape::Circle(Circle {
            x: center.x,
            y: center.y,
            r: *radius,
            mesh_fill: true,
        }),
        KeepoutShape::Rect { center, width, height } => PrimitiveShape::Rect(Rect {
            x: center.x,
            y: center.y,
            w: *width,
            h: *height,
            mesh_fill: true,
            ..Default::default()
        }),
        KeepoutShape::Unsupported => {
            tracing::debug!(id = ?keepout.pcb_keepout_id, "skipping pcb_keepout with unsupported shape");
            return Vec::new();
        }
    };
    vec![emit(ids, Layer::Top, shape, meta.without_port())]
}

pub fn generate_copper_pour<'a>(
    pour: &PcbCopperPour,
    meta: PrimitiveMeta<'a>,
    ids: &mut PrimitiveIdGenerator,
) -> Vec<Primitive<'a>> {
    let shape = match &pour.shape {
        CopperPourShape::Rect { center, width, height, rotation } => PrimitiveShape::Rect(Rect {
            x: center.x,
            y: center.y,
            w: *width,
            h: *height,
            ccw_rotation: *rotation,
            ..Default::default()
        }),
        CopperPourShape::Polygon { points } => PrimitiveShape::Polygon(Polygon {
            points: points.clone(),
        }),
        // Arcs stay bulged; flattening is left to whoever paints them
        CopperPourShape::Brep { brep_shape } => PrimitiveShape::PolygonWithArcs(PolygonWithArcs {
            brep_shape: brep_shape.clone(),
        }),
        CopperPourShape::Unsupported => {
            tracing::debug!(id = ?pour.pcb_copper_pour_id, "skipping pcb_copper_pour with unsupported shape");
            return Vec::new();
        }
    };
    vec![emit(ids, pour.layer.into(), shape, meta)]
}

pub fn generate_cutout<'a>(
    cutout: &PcbCutout,
    meta: PrimitiveMeta<'a>,
    ids: &mut PrimitiveIdGenerator,
) -> Vec<Primitive<'a>> {
    let shape = match &cutout.shape {
        CutoutShape::Rect { center, width, height, rotation } => PrimitiveShape::Rect(Rect {
            x: center.x,
            y: center.y,
            w: *width,
            h: *height,
            ccw_rotation: *rotation,
            ..Default::default()
        }),
        CutoutShape::Circle { center, radius } => PrimitiveShape::Circle(Circle {
            x: center.x,
            y: center.y,
            r: *radius,
            mesh_fill: false,
        }),
        CutoutShape::Polygon { points } => PrimitiveShape::Polygon(Polygon {
            points: points.clone(),
        }),
        CutoutShape::Unsupported => {
            tracing::warn!(id = ?cutout.pcb_cutout_id, "unsupported pcb_cutout shape, nothing drawn");
            return Vec::new();
        }
    };
    vec![emit(ids, Layer::Drill, shape, meta.without_port())]
}
