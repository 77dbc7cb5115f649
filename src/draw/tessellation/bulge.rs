//! Bulge-arc flattening
//!
//! Expands polyline vertices carrying a CAD-style bulge (`tan(angle / 4)`)
//! into straight point sequences. Every vertex is paired with the next one
//! modulo the vertex count, so the last vertex's bulge arcs back to the first
//! even when the path is open.

use crate::circuit::{Point, PointWithBulge};
use std::f64::consts::PI;

/// Default chord length used when subdividing arcs (mm)
pub const DEFAULT_SEGMENT_LENGTH: f64 = 0.1;

const EPSILON: f64 = 1e-9;

fn points_approximately_equal(a: &PointWithBulge, b: &PointWithBulge) -> bool {
    (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON
}

/// Interior points of the arc from `start` to `end`, excluding both endpoints
fn create_arc_points(start: Point, end: Point, bulge: f64, segment_length: f64) -> Vec<Point> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let chord = dx.hypot(dy);

    if chord < EPSILON {
        return Vec::new();
    }

    let angle = 4.0 * bulge.atan();
    if angle.abs() < EPSILON {
        return Vec::new();
    }

    let radius = (chord / (2.0 * (angle / 2.0).sin())).abs();
    if !radius.is_finite() || radius < EPSILON {
        return Vec::new();
    }

    let mid_x = (start.x + end.x) / 2.0;
    let mid_y = (start.y + end.y) / 2.0;
    let perp_x = -dy / chord;
    let perp_y = dx / chord;
    let dist_to_center = (radius * radius - (chord / 2.0).powi(2)).max(0.0).sqrt();

    let side = bulge.signum();
    let cx = mid_x + dist_to_center * perp_x * side;
    let cy = mid_y + dist_to_center * perp_y * side;

    let start_angle = (start.y - cy).atan2(start.x - cx);
    let mut end_angle = (end.y - cy).atan2(end.x - cx);

    if bulge > 0.0 && end_angle < start_angle {
        end_angle += 2.0 * PI;
    } else if bulge < 0.0 && end_angle > start_angle {
        end_angle -= 2.0 * PI;
    }

    let sweep = end_angle - start_angle;
    let arc_length = sweep.abs() * radius;
    let segments = ((arc_length / segment_length).ceil() as usize).max(1);

    (1..segments)
        .map(|i| {
            let t = start_angle + sweep * i as f64 / segments as f64;
            Point::new(cx + radius * t.cos(), cy + radius * t.sin())
        })
        .collect()
}

/// Flatten bulged vertices into a plain point sequence
///
/// A closing vertex that duplicates the first one is dropped. Straight
/// vertices are kept verbatim; arc interiors are inserted after the vertex
/// that carries the bulge.
pub fn flatten_bulge_points(raw_points: &[PointWithBulge], segment_length: f64) -> Vec<Point> {
    let points = match raw_points {
        [] => return Vec::new(),
        [first, .., last] if points_approximately_equal(first, last) => {
            &raw_points[..raw_points.len() - 1]
        }
        _ => raw_points,
    };

    let segment_length = if segment_length > 0.0 {
        segment_length
    } else {
        DEFAULT_SEGMENT_LENGTH
    };

    let mut flattened = Vec::with_capacity(points.len());
    for (i, current) in points.iter().enumerate() {
        let next = &points[(i + 1) % points.len()];
        flattened.push(current.point());

        let bulge = current.bulge.unwrap_or(0.0);
        if bulge.abs() < EPSILON {
            continue;
        }

        flattened.extend(create_arc_points(current.point(), next.point(), bulge, segment_length));
    }

    flattened
}
