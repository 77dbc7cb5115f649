//! Variable-width stroke expansion
//!
//! Turns a centerline with a per-point width into a single closed outline
//! polygon: the left offset walked forward followed by the right offset
//! walked backward, with mitered joins between segments.

use crate::circuit::Point;

/// Miter length limit as a multiple of the local half width
const MITER_LIMIT: f64 = 4.0;

/// Centerline vertex with an optional stroke width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokePoint {
    pub x: f64,
    pub y: f64,
    pub width: Option<f64>,
}

impl StrokePoint {
    pub fn new(x: f64, y: f64, width: Option<f64>) -> Self {
        Self { x, y, width }
    }
}

fn normalize(dx: f64, dy: f64) -> Option<(f64, f64)> {
    let len = dx.hypot(dy);
    if len < 1e-12 {
        None
    } else {
        Some((dx / len, dy / len))
    }
}

/// Expand a centerline into an outline polygon
///
/// Points without a usable width take `default_width`. Consecutive
/// duplicate points are collapsed; fewer than two distinct points yield an
/// empty outline.
pub fn expand_stroke(points: &[StrokePoint], default_width: f64) -> Vec<Point> {
    let mut work: Vec<StrokePoint> = Vec::with_capacity(points.len());
    for point in points {
        match work.last() {
            Some(prev) if normalize(point.x - prev.x, point.y - prev.y).is_none() => {}
            _ => work.push(*point),
        }
    }

    if work.len() < 2 {
        return Vec::new();
    }

    let n = work.len();
    let seg_dir: Vec<(f64, f64)> = work
        .windows(2)
        .map(|pair| {
            normalize(pair[1].x - pair[0].x, pair[1].y - pair[0].y).unwrap_or((1.0, 0.0))
        })
        .collect();

    let mut left = Vec::with_capacity(n);
    let mut right = Vec::with_capacity(n);

    for (i, point) in work.iter().enumerate() {
        let half_w = match point.width {
            Some(w) if w.is_finite() && w > 0.0 => w * 0.5,
            _ => default_width * 0.5,
        };

        let (normal, scale) = if i == 0 {
            let d = seg_dir[0];
            ((-d.1, d.0), 1.0)
        } else if i == n - 1 {
            let d = seg_dir[n - 2];
            ((-d.1, d.0), 1.0)
        } else {
            let d_in = seg_dir[i - 1];
            let d_out = seg_dir[i];
            let in_normal = (-d_in.1, d_in.0);
            match normalize(d_in.0 + d_out.0, d_in.1 + d_out.1) {
                Some(tangent) => {
                    let normal = (-tangent.1, tangent.0);
                    let cos_half = normal.0 * in_normal.0 + normal.1 * in_normal.1;
                    let scale = if cos_half.abs() < 1.0 / MITER_LIMIT {
                        MITER_LIMIT
                    } else {
                        1.0 / cos_half
                    };
                    (normal, scale)
                }
                // Full reversal: square off against the incoming segment
                None => (in_normal, 1.0),
            }
        };

        let offset_x = normal.0 * half_w * scale;
        let offset_y = normal.1 * half_w * scale;
        left.push(Point::new(point.x + offset_x, point.y + offset_y));
        right.push(Point::new(point.x - offset_x, point.y - offset_y));
    }

    left.extend(right.into_iter().rev());
    left
}
