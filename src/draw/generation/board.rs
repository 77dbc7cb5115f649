//! Board outline generation

use crate::circuit::{PcbBoard, Point};
use crate::draw::geometry::*;

use super::emit;

/// Stroke width for outline edges; drawn zoom-independent
const BOARD_EDGE_WIDTH: f64 = 1.0;

fn edge<'a>(ids: &mut PrimitiveIdGenerator, a: Point, b: Point, meta: PrimitiveMeta<'a>) -> Primitive<'a> {
    let line = Line {
        x1: a.x,
        y1: a.y,
        x2: b.x,
        y2: b.y,
        width: BOARD_EDGE_WIDTH,
        zoom_independent: true,
        ..Default::default()
    };
    emit(ids, Layer::Board, PrimitiveShape::Line(line), meta)
}

/// One line per outline edge (closed back to the first point), or the four
/// sides of `center ± size / 2` when there is no usable outline
pub fn generate_board<'a>(
    board: &PcbBoard,
    meta: PrimitiveMeta<'a>,
    ids: &mut PrimitiveIdGenerator,
) -> Vec<Primitive<'a>> {
    if let Some(outline) = board.outline.as_ref().filter(|o| o.len() > 2) {
        return outline
            .iter()
            .enumerate()
            .map(|(i, &point)| edge(ids, point, outline[(i + 1) % outline.len()], meta))
            .collect();
    }

    let hw = board.width / 2.0;
    let hh = board.height / 2.0;
    let c = board.center;
    // y grows downward: `y - h/2` is the top edge
    let top_left = Point::new(c.x - hw, c.y - hh);
    let top_right = Point::new(c.x + hw, c.y - hh);
    let bottom_left = Point::new(c.x - hw, c.y + hh);
    let bottom_right = Point::new(c.x + hw, c.y + hh);

    vec![
        edge(ids, top_left, top_right, meta),
        edge(ids, bottom_left, bottom_right, meta),
        edge(ids, top_left, bottom_left, meta),
        edge(ids, top_right, bottom_right, meta),
    ]
}
