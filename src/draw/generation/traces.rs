//! Trace generation
//!
//! Constant-width traces become one line per consecutive pair of wire
//! points. Interpolated traces are expanded into a single outline polygon
//! with a circle for every via along the route.

use crate::circuit::{PcbTrace, Point, RouteThicknessMode, TraceRoutePoint};
use crate::draw::geometry::*;
use crate::draw::tessellation::{expand_stroke, StrokePoint};

use super::emit;

/// Stroke width for via points and wires without a usable width
pub const DEFAULT_TRACE_WIDTH: f64 = 0.5;

/// Pad diameter for vias inside an interpolated route that omit one
pub const DEFAULT_VIA_OUTER_DIAMETER: f64 = 0.6;

pub fn generate_trace<'a>(
    trace: &PcbTrace,
    meta: PrimitiveMeta<'a>,
    ids: &mut PrimitiveIdGenerator,
) -> Vec<Primitive<'a>> {
    match trace.route_thickness_mode {
        Some(RouteThicknessMode::Interpolated) => generate_interpolated_trace(trace, meta, ids),
        _ => generate_segmented_trace(trace, meta, ids),
    }
}

fn generate_segmented_trace<'a>(
    trace: &PcbTrace,
    meta: PrimitiveMeta<'a>,
    ids: &mut PrimitiveIdGenerator,
) -> Vec<Primitive<'a>> {
    let mut primitives = Vec::new();
    let mut prev: Option<Point> = None;

    // Vias and other non-wire points break nothing: the segment continues
    // from the last wire point
    for point in &trace.route {
        let TraceRoutePoint::Wire { x, y, width, layer, .. } = point else {
            continue;
        };
        if let Some(start) = prev {
            let line = Line {
                x1: start.x,
                y1: start.y,
                x2: *x,
                y2: *y,
                width: *width,
                ..Default::default()
            };
            primitives.push(emit(ids, (*layer).into(), PrimitiveShape::Line(line), meta));
        }
        prev = Some(Point::new(*x, *y));
    }

    primitives
}

fn generate_interpolated_trace<'a>(
    trace: &PcbTrace,
    meta: PrimitiveMeta<'a>,
    ids: &mut PrimitiveIdGenerator,
) -> Vec<Primitive<'a>> {
    let Some(first) = trace.route.first() else {
        return Vec::new();
    };
    let layer = Layer::from(first.layer().unwrap_or_default());

    let centerline: Vec<StrokePoint> = trace
        .route
        .iter()
        .filter_map(|point| match point {
            TraceRoutePoint::Wire { x, y, width, .. } => Some(StrokePoint::new(*x, *y, Some(*width))),
            other => {
                let p = other.point()?;
                Some(StrokePoint::new(p.x, p.y, Some(DEFAULT_TRACE_WIDTH)))
            }
        })
        .collect();

    let mut primitives = Vec::new();
    let outline = expand_stroke(&centerline, DEFAULT_TRACE_WIDTH);
    if outline.is_empty() {
        tracing::debug!(id = ?trace.pcb_trace_id, "interpolated trace has no extent");
    } else {
        primitives.push(emit(ids, layer, PrimitiveShape::Polygon(Polygon { points: outline }), meta));
    }

    for point in &trace.route {
        if let TraceRoutePoint::Via { x, y, from_layer, outer_diameter, .. } = point {
            let circle = Circle {
                x: *x,
                y: *y,
                r: outer_diameter.unwrap_or(DEFAULT_VIA_OUTER_DIAMETER) / 2.0,
                mesh_fill: false,
            };
            primitives.push(emit(ids, (*from_layer).into(), PrimitiveShape::Circle(circle), meta));
        }
    }

    primitives
}
