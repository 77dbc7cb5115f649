// Element to primitive conversion over realistic circuit JSON
use circuit_primitives::circuit::{CircuitElement, Point};
use circuit_primitives::draw::geometry::{Circle, Layer, Pill, Polygon, Primitive, PrimitiveShape};
use circuit_primitives::{
    convert_circuit_elements, convert_element_to_primitives, parse_circuit_json,
    PrimitiveIdGenerator,
};
use serde_json::{json, Value};

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(value: Value) -> Vec<CircuitElement> {
        serde_json::from_value(value).expect("fixture should decode")
    }

    fn convert_one(element: Value) -> (Vec<CircuitElement>, usize) {
        let elements = decode(json!([element]));
        let mut ids = PrimitiveIdGenerator::new();
        let count = convert_element_to_primitives(&elements[0], &elements, &mut ids).len();
        (elements, count)
    }

    fn shapes(primitives: &[Primitive]) -> Vec<PrimitiveShape> {
        primitives.iter().map(|p| p.shape.clone()).collect()
    }

    #[test]
    fn test_board_outline_closes_loop() {
        let elements = decode(json!([{
            "type": "pcb_board", "pcb_board_id": "b", "width": 10, "height": 10,
            "center": { "x": 0, "y": 0 },
            "outline": [
                { "x": 0, "y": 0 }, { "x": 10, "y": 0 }, { "x": 10, "y": 5 },
                { "x": 5, "y": 8 }, { "x": 0, "y": 5 }
            ]
        }]));
        let mut ids = PrimitiveIdGenerator::new();
        let out = convert_element_to_primitives(&elements[0], &elements, &mut ids);

        assert_eq!(out.len(), 5, "one edge per outline point");
        match &out[4].shape {
            PrimitiveShape::Line(line) => {
                assert_eq!((line.x1, line.y1, line.x2, line.y2), (0.0, 5.0, 0.0, 0.0));
                assert!(line.zoom_independent);
                assert_eq!(line.width, 1.0);
            }
            other => panic!("expected line, got {}", other.kind()),
        }
        assert!(out.iter().all(|p| p.layer == Layer::Board));
    }

    #[test]
    fn test_board_without_outline_draws_rectangle() {
        let elements = decode(json!([{
            "type": "pcb_board", "width": 20, "height": 10, "center": { "x": 5, "y": 5 },
            "outline": [{ "x": 0, "y": 0 }, { "x": 1, "y": 1 }]
        }]));
        let mut ids = PrimitiveIdGenerator::new();
        let out = convert_element_to_primitives(&elements[0], &elements, &mut ids);
        assert_eq!(out.len(), 4);
        match &out[0].shape {
            PrimitiveShape::Line(line) => {
                assert_eq!((line.x1, line.y1, line.x2, line.y2), (-5.0, 0.0, 15.0, 0.0));
            }
            other => panic!("expected line, got {}", other.kind()),
        }
    }

    #[test]
    fn test_plated_hole_shape_counts() {
        let shapes = [
            json!({ "shape": "circle", "outer_diameter": 1.2, "hole_diameter": 0.8 }),
            json!({ "shape": "oval", "outer_width": 2, "outer_height": 1,
                    "hole_width": 1.5, "hole_height": 0.6 }),
            json!({ "shape": "pill", "outer_width": 2, "outer_height": 1,
                    "hole_width": 1.5, "hole_height": 0.6 }),
            json!({ "shape": "circular_hole_with_rect_pad", "hole_diameter": 0.8,
                    "rect_pad_width": 1.5, "rect_pad_height": 1.5 }),
            json!({ "shape": "pill_hole_with_rect_pad", "hole_width": 1, "hole_height": 0.5,
                    "rect_pad_width": 2, "rect_pad_height": 1 }),
            json!({ "shape": "rotated_pill_hole_with_rect_pad", "hole_width": 1,
                    "hole_height": 0.5, "hole_ccw_rotation": 10, "rect_pad_width": 2,
                    "rect_pad_height": 1, "rect_ccw_rotation": 20 }),
        ];
        for shape in shapes {
            let mut element = json!({ "type": "pcb_plated_hole", "x": 1, "y": 1 });
            if let (Some(target), Some(fields)) = (element.as_object_mut(), shape.as_object()) {
                target.extend(fields.clone());
            }
            let (_, count) = convert_one(element);
            assert_eq!(count, 2, "shape {} should emit pad and drill", shape["shape"]);
        }

        let (_, count) = convert_one(json!({
            "type": "pcb_plated_hole", "x": 0, "y": 0, "shape": "hexagon"
        }));
        assert_eq!(count, 0);
    }

    #[test]
    fn test_rotated_pill_hole_keeps_rotations_apart() {
        let elements = decode(json!([{
            "type": "pcb_plated_hole", "pcb_plated_hole_id": "ph", "x": 3, "y": 4,
            "shape": "rotated_pill_hole_with_rect_pad",
            "hole_width": 1, "hole_height": 2, "hole_ccw_rotation": 45,
            "rect_pad_width": 2, "rect_pad_height": 3, "rect_ccw_rotation": 30,
            "rect_border_radius": 0.2
        }]));
        let mut ids = PrimitiveIdGenerator::new();
        let out = convert_element_to_primitives(&elements[0], &elements, &mut ids);

        assert_eq!(out[0].layer, Layer::Top);
        assert_eq!(out[0].shape.kind(), "rect");
        assert_eq!(out[0].shape.ccw_rotation(), Some(30.0));
        assert_eq!(out[1].layer, Layer::Drill);
        assert_eq!(out[1].shape.kind(), "pill");
        assert_eq!(out[1].shape.ccw_rotation(), Some(45.0));
    }

    #[test]
    fn test_circular_hole_offset_moves_drill_only() {
        let elements = decode(json!([{
            "type": "pcb_plated_hole", "x": 1, "y": 1, "shape": "circular_hole_with_rect_pad",
            "hole_diameter": 0.6, "rect_pad_width": 2, "rect_pad_height": 2,
            "hole_offset_x": 0.25, "hole_offset_y": -0.5
        }]));
        let mut ids = PrimitiveIdGenerator::new();
        let out = convert_element_to_primitives(&elements[0], &elements, &mut ids);
        match (&out[0].shape, &out[1].shape) {
            (PrimitiveShape::Rect(pad), PrimitiveShape::Circle(drill)) => {
                assert_eq!((pad.x, pad.y), (1.0, 1.0));
                assert_eq!((drill.x, drill.y, drill.r), (1.25, 0.5, 0.3));
            }
            _ => panic!("expected rect pad and circular drill"),
        }
        assert!(!out[1].meta.has_parent_links());
    }

    #[test]
    fn test_trace_segments_bridge_vias() {
        let wire = |x: f64, width: f64| {
            json!({ "route_type": "wire", "x": x, "y": 0, "width": width, "layer": "top" })
        };
        let (_, count) = convert_one(json!({
            "type": "pcb_trace",
            "route": [wire(0.0, 0.1), wire(1.0, 0.2), wire(2.0, 0.3), wire(3.0, 0.4)]
        }));
        assert_eq!(count, 3);

        let elements = decode(json!([{
            "type": "pcb_trace",
            "route": [
                wire(0.0, 0.1), wire(1.0, 0.2),
                { "route_type": "via", "x": 1.5, "y": 0, "from_layer": "top", "to_layer": "bottom" },
                wire(2.0, 0.3), wire(3.0, 0.4)
            ]
        }]));
        let mut ids = PrimitiveIdGenerator::new();
        let out = convert_element_to_primitives(&elements[0], &elements, &mut ids);
        assert_eq!(out.len(), 3, "a via is skipped, not a break");
        match &out[1].shape {
            PrimitiveShape::Line(line) => {
                assert_eq!((line.x1, line.x2), (1.0, 2.0));
                assert_eq!(line.width, 0.3, "later point's width");
                assert!(!line.square_cap);
            }
            other => panic!("expected line, got {}", other.kind()),
        }
    }

    #[test]
    fn test_interpolated_trace_outline_and_vias() {
        let elements = decode(json!([{
            "type": "pcb_trace", "route_thickness_mode": "interpolated",
            "route": [
                { "route_type": "wire", "x": 0, "y": 0, "width": 0.2, "layer": "bottom" },
                { "route_type": "wire", "x": 5, "y": 0, "width": 1.0, "layer": "bottom" },
                { "route_type": "via", "x": 5, "y": 0, "from_layer": "bottom", "to_layer": "top",
                  "outer_diameter": 0.8 },
                { "route_type": "wire", "x": 5, "y": 5, "width": 0.4, "layer": "top" }
            ]
        }]));
        let mut ids = PrimitiveIdGenerator::new();
        let out = convert_element_to_primitives(&elements[0], &elements, &mut ids);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].layer, Layer::Bottom);
        match &out[0].shape {
            PrimitiveShape::Polygon(polygon) => assert!(polygon.points.len() >= 6),
            other => panic!("expected polygon, got {}", other.kind()),
        }
        match &out[1].shape {
            PrimitiveShape::Circle(circle) => assert_eq!(circle.r, 0.4),
            other => panic!("expected circle, got {}", other.kind()),
        }
        assert_eq!(out[1].layer, Layer::Bottom);
    }

    #[test]
    fn test_via_emits_pad_drill_pad() {
        let elements = decode(json!([{
            "type": "pcb_via", "x": 1, "y": 2, "outer_diameter": 0.6, "hole_diameter": 0.3,
            "from_layer": "top", "to_layer": "inner2"
        }]));
        let mut ids = PrimitiveIdGenerator::new();
        let out = convert_element_to_primitives(&elements[0], &elements, &mut ids);
        let layers: Vec<Layer> = out.iter().map(|p| p.layer).collect();
        assert_eq!(layers, vec![Layer::Top, Layer::Drill, Layer::Inner2]);
    }

    #[test]
    fn test_regions() {
        let elements = decode(json!([
            { "type": "pcb_keepout", "shape": "rect", "center": { "x": 0, "y": 0 },
              "width": 2, "height": 1, "layers": ["top"] },
            { "type": "pcb_copper_pour", "layer": "inner1", "shape": "brep",
              "brep_shape": { "outer_ring": { "vertices": [
                  { "x": 0, "y": 0, "bulge": 0.5 }, { "x": 4, "y": 0 }, { "x": 4, "y": 4 }
              ]}}},
            { "type": "pcb_cutout", "shape": "circle", "center": { "x": 1, "y": 1 }, "radius": 2 },
            { "type": "pcb_cutout", "shape": "path", "route": [] }
        ]));
        let mut ids = PrimitiveIdGenerator::new();
        let out = convert_circuit_elements(&elements, &mut ids);

        assert_eq!(out.len(), 3, "unsupported cutout shape contributes nothing");
        match &out[0].shape {
            PrimitiveShape::Rect(rect) => assert!(rect.mesh_fill),
            other => panic!("expected rect, got {}", other.kind()),
        }
        assert_eq!(out[1].layer, Layer::Inner1);
        match &out[1].shape {
            PrimitiveShape::PolygonWithArcs(poly) => {
                assert_eq!(poly.brep_shape.outer_ring.vertices[0].bulge, Some(0.5));
            }
            other => panic!("expected polygon_with_arcs, got {}", other.kind()),
        }
        assert_eq!(out[2].layer, Layer::Drill);
    }

    #[test]
    fn test_silkscreen_and_fabrication_layers() {
        let elements = decode(json!([
            { "type": "pcb_silkscreen_text", "anchor_position": { "x": 0, "y": 0 },
              "text": "U1", "layer": "bottom", "anchor_alignment": "top_left" },
            { "type": "pcb_silkscreen_rect", "center": { "x": 0, "y": 0 }, "width": 1,
              "height": 1, "layer": "top", "is_filled": false, "stroke_width": 0.15 },
            { "type": "pcb_fabrication_note_text", "anchor_position": { "x": 0, "y": 0 },
              "text": "REV A", "layer": "bottom" },
            { "type": "pcb_silkscreen_line", "x1": 0, "y1": 0, "x2": 1, "y2": 1 }
        ]));
        let mut ids = PrimitiveIdGenerator::new();
        let out = convert_circuit_elements(&elements, &mut ids);

        let layers: Vec<Layer> = out.iter().map(|p| p.layer).collect();
        assert_eq!(
            layers,
            vec![
                Layer::BottomSilkscreen,
                Layer::TopSilkscreen,
                Layer::BottomFabrication,
                Layer::TopSilkscreen
            ]
        );
        match &out[1].shape {
            PrimitiveShape::Rect(rect) => {
                assert_eq!(rect.is_filled, Some(false));
                assert_eq!(rect.stroke_width, Some(0.15));
            }
            other => panic!("expected rect, got {}", other.kind()),
        }
        match &out[3].shape {
            PrimitiveShape::Line(line) => assert_eq!(line.width, 0.1),
            other => panic!("expected line, got {}", other.kind()),
        }
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let text = serde_json::to_string(&json!([
            { "type": "pcb_component", "pcb_component_id": "c1" },
            { "type": "pcb_smtpad", "pcb_component_id": "c1", "shape": "rotated_rect",
              "x": 1, "y": 1, "width": 1, "height": 0.5, "ccw_rotation": 90 },
            { "type": "pcb_hole", "x": 2, "y": 2, "hole_diameter": 0.5 },
            { "type": "pcb_note_dimension", "from": "0,0", "to": { "x": 3, "y": 4 } },
            { "type": "pcb_silkscreen_path", "route": [
                { "x": 0, "y": 0 }, { "x": 1, "y": 0 }, { "x": 1, "y": 1 }
            ]}
        ]))
        .expect("fixture serializes");
        let elements = parse_circuit_json(&text).expect("fixture parses");

        let first = shapes(&convert_circuit_elements(&elements, &mut PrimitiveIdGenerator::new()));
        let second = shapes(&convert_circuit_elements(&elements, &mut PrimitiveIdGenerator::new()));
        assert_eq!(first, second);
        assert_eq!(first.len(), 1 + 1 + 6 + 2);
    }

    #[test]
    fn test_ids_unique_across_batch() {
        let elements = decode(json!([
            { "type": "pcb_via", "x": 0, "y": 0, "outer_diameter": 0.6, "hole_diameter": 0.3 },
            { "type": "pcb_via", "x": 1, "y": 0, "outer_diameter": 0.6, "hole_diameter": 0.3 }
        ]));
        let mut ids = PrimitiveIdGenerator::new();
        let out = convert_circuit_elements(&elements, &mut ids);
        let mut seen: Vec<&str> = out.iter().map(|p| p.id.as_str()).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 6);
        assert_eq!(ids.issued(), 6);
    }

    #[test]
    fn test_primitives_serialize_for_backends() {
        let elements = decode(json!([
            { "type": "pcb_smtpad", "pcb_smtpad_id": "p", "shape": "pill", "x": 0, "y": 0,
              "width": 2, "height": 1, "radius": 0.5 }
        ]));
        let mut ids = PrimitiveIdGenerator::new();
        let out = convert_circuit_elements(&elements, &mut ids);
        let json = serde_json::to_value(&out).expect("primitives serialize");

        assert_eq!(json[0]["pcb_drawing_type"], "pill");
        assert_eq!(json[0]["layer"], "top");
        assert_eq!(json[0]["_pcb_drawing_object_id"], "pill_0");
        assert_eq!(json[0]["_element"]["pcb_smtpad_id"], "p");
    }

    #[test]
    fn test_unplated_hole_only_draws_sized_circles() {
        for shape in ["square", "oval", "pill", "rect"] {
            let (_, count) = convert_one(json!({
                "type": "pcb_hole", "hole_shape": shape, "x": 0, "y": 0,
                "hole_diameter": 1, "hole_width": 1, "hole_height": 2
            }));
            assert_eq!(count, 0, "{} hole", shape);
        }
        let (_, count) = convert_one(json!({
            "type": "pcb_hole", "hole_shape": "circle", "x": 0, "y": 0
        }));
        assert_eq!(count, 0, "circle without a diameter");
    }

    #[test]
    fn test_smtpad_polygon_points_pass_through() {
        let elements = decode(json!([{
            "type": "pcb_smtpad", "shape": "polygon", "layer": "bottom",
            "points": [{ "x": 0, "y": 0 }, { "x": 2, "y": 0.5 }, { "x": 1, "y": 3 }]
        }]));
        let mut ids = PrimitiveIdGenerator::new();
        let out = convert_element_to_primitives(&elements[0], &elements, &mut ids);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].layer, Layer::Bottom);
        assert_eq!(
            out[0].shape,
            PrimitiveShape::Polygon(Polygon {
                points: vec![Point::new(0.0, 0.0), Point::new(2.0, 0.5), Point::new(1.0, 3.0)],
            })
        );
    }

    #[test]
    fn test_smtpad_pill_rotation_only_on_rotated_variant() {
        let elements = decode(json!([
            { "type": "pcb_smtpad", "shape": "pill", "x": 1, "y": 2,
              "width": 3, "height": 1, "radius": 0.5, "ccw_rotation": 30 },
            { "type": "pcb_smtpad", "shape": "rotated_pill", "x": 1, "y": 2,
              "width": 3, "height": 1, "radius": 0.5, "ccw_rotation": 30 }
        ]));
        let mut ids = PrimitiveIdGenerator::new();
        let out = shapes(&convert_circuit_elements(&elements, &mut ids));

        assert_eq!(
            out,
            vec![
                PrimitiveShape::Pill(Pill { x: 1.0, y: 2.0, w: 3.0, h: 1.0, ccw_rotation: None }),
                PrimitiveShape::Pill(Pill { x: 1.0, y: 2.0, w: 3.0, h: 1.0, ccw_rotation: Some(30.0) }),
            ]
        );
    }

    #[test]
    fn test_keepout_circle_is_hatched_on_top() {
        let elements = decode(json!([{
            "type": "pcb_keepout", "shape": "circle", "center": { "x": 1, "y": 2 },
            "radius": 0.5, "layers": ["bottom"]
        }]));
        let mut ids = PrimitiveIdGenerator::new();
        let out = convert_element_to_primitives(&elements[0], &elements, &mut ids);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].layer, Layer::Top);
        assert_eq!(
            out[0].shape,
            PrimitiveShape::Circle(Circle { x: 1.0, y: 2.0, r: 0.5, mesh_fill: true })
        );
    }

    #[test]
    fn test_copper_pour_rect_and_polygon() {
        let elements = decode(json!([
            { "type": "pcb_copper_pour", "layer": "bottom", "shape": "rect",
              "center": { "x": 3, "y": 4 }, "width": 6, "height": 2, "rotation": 15 },
            { "type": "pcb_copper_pour", "layer": "top", "shape": "polygon",
              "points": [{ "x": 0, "y": 0 }, { "x": 4, "y": 0 }, { "x": 0, "y": 4 }] }
        ]));
        let mut ids = PrimitiveIdGenerator::new();
        let out = convert_circuit_elements(&elements, &mut ids);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].layer, Layer::Bottom);
        match &out[0].shape {
            PrimitiveShape::Rect(rect) => {
                assert_eq!((rect.x, rect.y, rect.w, rect.h), (3.0, 4.0, 6.0, 2.0));
                assert_eq!(rect.ccw_rotation, Some(15.0));
                assert!(!rect.mesh_fill);
            }
            other => panic!("expected rect, got {}", other.kind()),
        }
        assert_eq!(out[1].layer, Layer::Top);
        assert_eq!(
            out[1].shape,
            PrimitiveShape::Polygon(Polygon {
                points: vec![Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(0.0, 4.0)],
            })
        );
    }

    #[test]
    fn test_unknown_route_point_is_skipped_not_fatal() {
        let route = json!([
            { "route_type": "wire", "x": 0, "y": 0, "width": 0.2, "layer": "top" },
            { "route_type": "through_hole", "x": 1, "y": 0 },
            { "route_type": "wire", "x": 2, "y": 0, "width": 0.3, "layer": "top" }
        ]);
        let text = json!([
            { "type": "pcb_trace", "pcb_trace_id": "segmented", "route": route.clone() },
            { "type": "pcb_trace", "pcb_trace_id": "interpolated",
              "route_thickness_mode": "interpolated", "route": route }
        ])
        .to_string();
        let elements = parse_circuit_json(&text).expect("array parses");
        assert_eq!(elements.len(), 2);
        assert!(elements.iter().all(|e| matches!(e, CircuitElement::PcbTrace(_))));

        let mut ids = PrimitiveIdGenerator::new();
        let segmented = convert_element_to_primitives(&elements[0], &elements, &mut ids);
        assert_eq!(segmented.len(), 1, "the line bridges the unknown point");
        match &segmented[0].shape {
            PrimitiveShape::Line(line) => {
                assert_eq!((line.x1, line.y1, line.x2, line.y2), (0.0, 0.0, 2.0, 0.0));
                assert_eq!(line.width, 0.3);
            }
            other => panic!("expected line, got {}", other.kind()),
        }

        let interpolated = convert_element_to_primitives(&elements[1], &elements, &mut ids);
        assert_eq!(interpolated.len(), 1, "outline only, no via circle");
        assert_eq!(interpolated[0].layer, Layer::Top);
        assert!(matches!(interpolated[0].shape, PrimitiveShape::Polygon(_)));
    }
}
