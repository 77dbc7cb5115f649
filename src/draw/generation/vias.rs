//! Via generation
//!
//! A via is drawn as its pad on each end layer with the drill bore between.

use crate::circuit::PcbVia;
use crate::draw::geometry::*;

use super::emit;

pub fn generate_via<'a>(
    via: &PcbVia,
    meta: PrimitiveMeta<'a>,
    ids: &mut PrimitiveIdGenerator,
) -> Vec<Primitive<'a>> {
    let meta = meta.without_port();
    let circle = |r: f64| {
        PrimitiveShape::Circle(Circle {
            x: via.x,
            y: via.y,
            r,
            mesh_fill: false,
        })
    };

    vec![
        emit(ids, via.start_layer().into(), circle(via.outer_diameter / 2.0), meta),
        emit(ids, Layer::Drill, circle(via.hole_diameter / 2.0), meta),
        emit(ids, via.end_layer().into(), circle(via.outer_diameter / 2.0), meta),
    ]
}
