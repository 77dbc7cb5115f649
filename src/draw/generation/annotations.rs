//! Silkscreen and fabrication-note generation
//!
//! Legend shapes, paths and text. Shapes and texts link only to their own
//! element; paths carry the full component/port link set.

use crate::circuit::{Point, TextAlign};
use crate::circuit::{
    PcbFabricationNotePath, PcbFabricationNoteText, PcbSilkscreenCircle, PcbSilkscreenLine,
    PcbSilkscreenOval, PcbSilkscreenPath, PcbSilkscreenPill, PcbSilkscreenRect, PcbSilkscreenText,
};
use crate::draw::geometry::*;

use super::emit;

/// Stroke width for lines and paths that do not declare one
pub const DEFAULT_STROKE_WIDTH: f64 = 0.1;

pub fn generate_silkscreen_rect<'a>(
    rect: &PcbSilkscreenRect,
    meta: PrimitiveMeta<'a>,
    ids: &mut PrimitiveIdGenerator,
) -> Vec<Primitive<'a>> {
    let shape = Rect {
        x: rect.center.x,
        y: rect.center.y,
        w: rect.width,
        h: rect.height,
        stroke_width: rect.stroke_width,
        is_filled: rect.is_filled,
        has_stroke: rect.has_stroke,
        is_stroke_dashed: rect.is_stroke_dashed,
        ..Default::default()
    };
    vec![emit(ids, Layer::silkscreen(rect.layer), PrimitiveShape::Rect(shape), meta)]
}

pub fn generate_silkscreen_circle<'a>(
    circle: &PcbSilkscreenCircle,
    meta: PrimitiveMeta<'a>,
    ids: &mut PrimitiveIdGenerator,
) -> Vec<Primitive<'a>> {
    let shape = Circle {
        x: circle.center.x,
        y: circle.center.y,
        r: circle.radius,
        mesh_fill: false,
    };
    vec![emit(ids, Layer::silkscreen(circle.layer), PrimitiveShape::Circle(shape), meta)]
}

pub fn generate_silkscreen_oval<'a>(
    oval: &PcbSilkscreenOval,
    meta: PrimitiveMeta<'a>,
    ids: &mut PrimitiveIdGenerator,
) -> Vec<Primitive<'a>> {
    let shape = Oval {
        x: oval.center.x,
        y: oval.center.y,
        rx: oval.radius_x,
        ry: oval.radius_y,
    };
    vec![emit(ids, Layer::silkscreen(oval.layer), PrimitiveShape::Oval(shape), meta)]
}

pub fn generate_silkscreen_pill<'a>(
    pill: &PcbSilkscreenPill,
    meta: PrimitiveMeta<'a>,
    ids: &mut PrimitiveIdGenerator,
) -> Vec<Primitive<'a>> {
    let shape = Pill {
        x: pill.center.x,
        y: pill.center.y,
        w: pill.width,
        h: pill.height,
        ccw_rotation: None,
    };
    vec![emit(ids, Layer::silkscreen(pill.layer), PrimitiveShape::Pill(shape), meta)]
}

pub fn generate_silkscreen_line<'a>(
    line: &PcbSilkscreenLine,
    meta: PrimitiveMeta<'a>,
    ids: &mut PrimitiveIdGenerator,
) -> Vec<Primitive<'a>> {
    let shape = Line {
        x1: line.x1,
        y1: line.y1,
        x2: line.x2,
        y2: line.y2,
        width: line.stroke_width.unwrap_or(DEFAULT_STROKE_WIDTH),
        ..Default::default()
    };
    vec![emit(ids, Layer::silkscreen(line.layer), PrimitiveShape::Line(shape), meta)]
}

/// One line per consecutive pair of route points
fn route_lines<'a>(
    route: &[Point],
    stroke_width: Option<f64>,
    layer: Layer,
    meta: PrimitiveMeta<'a>,
    ids: &mut PrimitiveIdGenerator,
) -> Vec<Primitive<'a>> {
    let width = stroke_width.unwrap_or(DEFAULT_STROKE_WIDTH);
    route
        .windows(2)
        .map(|pair| {
            let line = Line {
                x1: pair[0].x,
                y1: pair[0].y,
                x2: pair[1].x,
                y2: pair[1].y,
                width,
                ..Default::default()
            };
            emit(ids, layer, PrimitiveShape::Line(line), meta)
        })
        .collect()
}

pub fn generate_silkscreen_path<'a>(
    path: &PcbSilkscreenPath,
    meta: PrimitiveMeta<'a>,
    ids: &mut PrimitiveIdGenerator,
) -> Vec<Primitive<'a>> {
    route_lines(&path.route, path.stroke_width, Layer::silkscreen(path.layer), meta, ids)
}

pub fn generate_fabrication_note_path<'a>(
    path: &PcbFabricationNotePath,
    meta: PrimitiveMeta<'a>,
    ids: &mut PrimitiveIdGenerator,
) -> Vec<Primitive<'a>> {
    route_lines(&path.route, path.stroke_width, Layer::fabrication(path.layer), meta, ids)
}

#[allow(clippy::too_many_arguments)]
fn text<'a>(
    anchor: Point,
    content: &str,
    size: f64,
    align: Option<TextAlign>,
    ccw_rotation: Option<f64>,
    layer: Layer,
    meta: PrimitiveMeta<'a>,
    ids: &mut PrimitiveIdGenerator,
) -> Primitive<'a> {
    let shape = Text {
        x: anchor.x,
        y: anchor.y,
        text: content.to_string(),
        size,
        align: align.unwrap_or_default(),
        ccw_rotation,
    };
    emit(ids, layer, PrimitiveShape::Text(shape), meta)
}

pub fn generate_silkscreen_text<'a>(
    label: &PcbSilkscreenText,
    meta: PrimitiveMeta<'a>,
    ids: &mut PrimitiveIdGenerator,
) -> Vec<Primitive<'a>> {
    vec![text(
        label.anchor_position,
        &label.text,
        label.font_size,
        label.anchor_alignment,
        label.ccw_rotation,
        Layer::silkscreen(label.layer),
        meta,
        ids,
    )]
}

pub fn generate_fabrication_note_text<'a>(
    label: &PcbFabricationNoteText,
    meta: PrimitiveMeta<'a>,
    ids: &mut PrimitiveIdGenerator,
) -> Vec<Primitive<'a>> {
    vec![text(
        label.anchor_position,
        &label.text,
        label.font_size,
        label.anchor_alignment,
        None,
        Layer::fabrication(label.layer),
        meta,
        ids,
    )]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::LayerRef;

    #[test]
    fn test_path_emits_one_line_per_segment() {
        let path = PcbSilkscreenPath {
            pcb_silkscreen_path_id: None,
            pcb_component_id: None,
            route: vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)],
            stroke_width: None,
            layer: Some(LayerRef::Bottom),
            extra_ids: Default::default(),
        };
        let mut ids = PrimitiveIdGenerator::new();
        let lines = generate_silkscreen_path(&path, PrimitiveMeta::default(), &mut ids);

        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert_eq!(line.layer, Layer::BottomSilkscreen);
            match &line.shape {
                PrimitiveShape::Line(l) => assert_eq!(l.width, DEFAULT_STROKE_WIDTH),
                other => panic!("expected line, got {:?}", other.kind()),
            }
        }
    }

    #[test]
    fn test_single_point_path_is_empty() {
        let path = PcbFabricationNotePath {
            pcb_fabrication_note_path_id: None,
            pcb_component_id: None,
            route: vec![Point::new(2.0, 2.0)],
            stroke_width: Some(0.2),
            layer: None,
            extra_ids: Default::default(),
        };
        let mut ids = PrimitiveIdGenerator::new();
        assert!(generate_fabrication_note_path(&path, PrimitiveMeta::default(), &mut ids).is_empty());
        assert_eq!(ids.issued(), 0);
    }

    #[test]
    fn test_oval_radii_pass_through() {
        let oval = PcbSilkscreenOval {
            pcb_silkscreen_oval_id: None,
            pcb_component_id: None,
            center: Point::new(1.0, 2.0),
            radius_x: 3.0,
            radius_y: 1.5,
            layer: None,
            extra_ids: Default::default(),
        };
        let mut ids = PrimitiveIdGenerator::new();
        let out = generate_silkscreen_oval(&oval, PrimitiveMeta::default(), &mut ids);
        assert_eq!(
            out[0].shape,
            PrimitiveShape::Oval(Oval { x: 1.0, y: 2.0, rx: 3.0, ry: 1.5 })
        );
        assert_eq!(out[0].layer, Layer::TopSilkscreen);
    }
}
