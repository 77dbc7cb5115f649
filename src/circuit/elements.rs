//! Circuit element records
//!
//! A closed set of decoded circuit JSON records. Each record kind is a struct;
//! kinds with several geometries carry a nested shape enum tagged on `shape`.
//! Unknown shapes decode to an `Unsupported` shape variant. Unknown kinds, and
//! known kinds whose fields fail to decode, keep their raw fields in
//! `CircuitElement::Unsupported` so a single odd record never fails the
//! whole collection and still takes part in id lookups and fingerprinting.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::{
    raw_number, raw_point, ExtraIds, LayerRef, LengthValue, Point, PointRef, PointWithBulge,
    RawRecord, TextAlign,
};
use crate::draw::tessellation::flatten_bulge_points;

/// Any decoded circuit element, discriminated by its `type` tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CircuitElement {
    PcbBoard(PcbBoard),
    PcbSmtpad(PcbSmtPad),
    PcbHole(PcbHole),
    PcbPlatedHole(PcbPlatedHole),
    PcbVia(PcbVia),
    PcbTrace(PcbTrace),
    PcbKeepout(PcbKeepout),
    PcbCopperPour(PcbCopperPour),
    PcbCutout(PcbCutout),
    PcbSilkscreenRect(PcbSilkscreenRect),
    PcbSilkscreenCircle(PcbSilkscreenCircle),
    PcbSilkscreenOval(PcbSilkscreenOval),
    PcbSilkscreenPill(PcbSilkscreenPill),
    PcbSilkscreenLine(PcbSilkscreenLine),
    PcbSilkscreenPath(PcbSilkscreenPath),
    PcbSilkscreenText(PcbSilkscreenText),
    PcbFabricationNotePath(PcbFabricationNotePath),
    PcbFabricationNoteText(PcbFabricationNoteText),
    PcbNoteDimension(DimensionNote),
    PcbFabricationNoteDimension(DimensionNote),
    PcbComponent(PcbComponent),
    PcbPort(PcbPort),
    SourceComponent(SourceComponent),
    SourcePort(SourcePort),
    #[serde(untagged)]
    Unsupported(RawRecord),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbBoard {
    pub pcb_board_id: Option<String>,
    #[serde(default)]
    pub center: Point,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    pub outline: Option<Vec<Point>>,
    pub thickness: Option<f64>,
    pub num_layers: Option<u32>,
    #[serde(flatten)]
    pub extra_ids: ExtraIds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbSmtPad {
    pub pcb_smtpad_id: Option<String>,
    pub pcb_component_id: Option<String>,
    pub pcb_port_id: Option<String>,
    pub layer: Option<LayerRef>,
    #[serde(flatten)]
    pub shape: SmtPadShape,
    #[serde(flatten)]
    pub extra_ids: ExtraIds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum SmtPadShape {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        rect_border_radius: Option<f64>,
    },
    RotatedRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        ccw_rotation: f64,
        rect_border_radius: Option<f64>,
    },
    Circle {
        x: f64,
        y: f64,
        radius: f64,
    },
    Polygon {
        points: Vec<Point>,
    },
    Pill {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: Option<f64>,
    },
    RotatedPill {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        ccw_rotation: f64,
        radius: Option<f64>,
    },
    #[serde(other)]
    Unsupported,
}

impl SmtPadShape {
    pub fn center(&self) -> Option<Point> {
        match self {
            SmtPadShape::Rect { x, y, .. }
            | SmtPadShape::RotatedRect { x, y, .. }
            | SmtPadShape::Circle { x, y, .. }
            | SmtPadShape::Pill { x, y, .. }
            | SmtPadShape::RotatedPill { x, y, .. } => Some(Point::new(*x, *y)),
            SmtPadShape::Polygon { .. } | SmtPadShape::Unsupported => None,
        }
    }

    /// Width and height for shapes that declare them
    pub fn size(&self) -> Option<(f64, f64)> {
        match self {
            SmtPadShape::Rect { width, height, .. }
            | SmtPadShape::RotatedRect { width, height, .. }
            | SmtPadShape::Pill { width, height, .. }
            | SmtPadShape::RotatedPill { width, height, .. } => Some((*width, *height)),
            _ => None,
        }
    }
}

/// Unplated hole
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbHole {
    pub pcb_hole_id: Option<String>,
    pub pcb_component_id: Option<String>,
    pub x: f64,
    pub y: f64,
    pub hole_shape: Option<HoleShape>,
    pub hole_diameter: Option<f64>,
    pub hole_width: Option<f64>,
    pub hole_height: Option<f64>,
    #[serde(flatten)]
    pub extra_ids: ExtraIds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoleShape {
    Circle,
    Square,
    Oval,
    Pill,
    Rect,
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbPlatedHole {
    pub pcb_plated_hole_id: Option<String>,
    pub pcb_component_id: Option<String>,
    pub pcb_port_id: Option<String>,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub layers: Vec<LayerRef>,
    #[serde(flatten)]
    pub shape: PlatedHoleShape,
    #[serde(flatten)]
    pub extra_ids: ExtraIds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum PlatedHoleShape {
    Circle {
        outer_diameter: f64,
        hole_diameter: f64,
    },
    Oval {
        outer_width: f64,
        outer_height: f64,
        hole_width: f64,
        hole_height: f64,
    },
    Pill {
        outer_width: f64,
        outer_height: f64,
        hole_width: f64,
        hole_height: f64,
        ccw_rotation: Option<f64>,
    },
    CircularHoleWithRectPad {
        hole_diameter: f64,
        rect_pad_width: f64,
        rect_pad_height: f64,
        rect_border_radius: Option<f64>,
        hole_offset_x: Option<f64>,
        hole_offset_y: Option<f64>,
    },
    PillHoleWithRectPad {
        hole_width: f64,
        hole_height: f64,
        rect_pad_width: f64,
        rect_pad_height: f64,
        rect_border_radius: Option<f64>,
    },
    RotatedPillHoleWithRectPad {
        hole_width: f64,
        hole_height: f64,
        hole_ccw_rotation: f64,
        rect_pad_width: f64,
        rect_pad_height: f64,
        rect_ccw_rotation: f64,
        rect_border_radius: Option<f64>,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbVia {
    pub pcb_via_id: Option<String>,
    pub pcb_component_id: Option<String>,
    pub x: f64,
    pub y: f64,
    pub outer_diameter: f64,
    pub hole_diameter: f64,
    pub from_layer: Option<LayerRef>,
    pub to_layer: Option<LayerRef>,
    #[serde(default)]
    pub layers: Vec<LayerRef>,
    #[serde(flatten)]
    pub extra_ids: ExtraIds,
}

impl PcbVia {
    /// Layer of the first pad: `from_layer`, else the first listed layer, else top
    pub fn start_layer(&self) -> LayerRef {
        self.from_layer
            .or_else(|| self.layers.first().copied())
            .unwrap_or(LayerRef::Top)
    }

    /// Layer of the second pad: `to_layer`, else the last listed layer, else bottom
    pub fn end_layer(&self) -> LayerRef {
        self.to_layer
            .or_else(|| self.layers.last().copied())
            .unwrap_or(LayerRef::Bottom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbTrace {
    pub pcb_trace_id: Option<String>,
    pub pcb_component_id: Option<String>,
    pub source_trace_id: Option<String>,
    #[serde(default)]
    pub route: Vec<TraceRoutePoint>,
    pub route_thickness_mode: Option<RouteThicknessMode>,
    pub trace_length: Option<f64>,
    #[serde(flatten)]
    pub extra_ids: ExtraIds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteThicknessMode {
    Constant,
    Interpolated,
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "route_type", rename_all = "snake_case")]
pub enum TraceRoutePoint {
    Wire {
        x: f64,
        y: f64,
        width: f64,
        layer: LayerRef,
        start_pcb_port_id: Option<String>,
        end_pcb_port_id: Option<String>,
    },
    Via {
        x: f64,
        y: f64,
        from_layer: LayerRef,
        to_layer: LayerRef,
        outer_diameter: Option<f64>,
        hole_diameter: Option<f64>,
    },
    /// Any other route point kind, kept as its raw fields
    #[serde(untagged)]
    Other(RawRecord),
}

impl TraceRoutePoint {
    pub fn point(&self) -> Option<Point> {
        match self {
            TraceRoutePoint::Wire { x, y, .. } | TraceRoutePoint::Via { x, y, .. } => {
                Some(Point::new(*x, *y))
            }
            TraceRoutePoint::Other(raw) => {
                Some(Point::new(raw_number(raw, "x")?, raw_number(raw, "y")?))
            }
        }
    }

    pub fn layer(&self) -> Option<LayerRef> {
        match self {
            TraceRoutePoint::Wire { layer, .. } => Some(*layer),
            TraceRoutePoint::Via { from_layer, .. } => Some(*from_layer),
            TraceRoutePoint::Other(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbKeepout {
    pub pcb_keepout_id: Option<String>,
    pub pcb_component_id: Option<String>,
    #[serde(default)]
    pub layers: Vec<LayerRef>,
    pub description: Option<String>,
    #[serde(flatten)]
    pub shape: KeepoutShape,
    #[serde(flatten)]
    pub extra_ids: ExtraIds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum KeepoutShape {
    Circle { center: Point, radius: f64 },
    Rect { center: Point, width: f64, height: f64 },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbCopperPour {
    pub pcb_copper_pour_id: Option<String>,
    pub pcb_group_id: Option<String>,
    pub source_net_id: Option<String>,
    #[serde(default)]
    pub layer: LayerRef,
    #[serde(flatten)]
    pub shape: CopperPourShape,
    #[serde(flatten)]
    pub extra_ids: ExtraIds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum CopperPourShape {
    Rect {
        center: Point,
        width: f64,
        height: f64,
        rotation: Option<f64>,
    },
    Polygon {
        points: Vec<Point>,
    },
    Brep {
        brep_shape: BRepShape,
    },
    #[serde(other)]
    Unsupported,
}

/// Boundary representation: an outer ring plus holes, each ring a bulged polyline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BRepShape {
    pub outer_ring: Ring,
    #[serde(default)]
    pub inner_rings: Vec<Ring>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    pub vertices: Vec<PointWithBulge>,
}

impl Ring {
    /// Ring vertices with every bulged edge replaced by arc points
    pub fn flatten(&self, segment_length: f64) -> Vec<Point> {
        flatten_bulge_points(&self.vertices, segment_length)
    }
}

impl BRepShape {
    /// Outer ring followed by each inner ring, arcs flattened to points
    pub fn flatten(&self, segment_length: f64) -> Vec<Vec<Point>> {
        std::iter::once(&self.outer_ring)
            .chain(&self.inner_rings)
            .map(|ring| ring.flatten(segment_length))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbCutout {
    pub pcb_cutout_id: Option<String>,
    pub pcb_group_id: Option<String>,
    pub pcb_component_id: Option<String>,
    #[serde(flatten)]
    pub shape: CutoutShape,
    #[serde(flatten)]
    pub extra_ids: ExtraIds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum CutoutShape {
    Rect {
        center: Point,
        width: f64,
        height: f64,
        rotation: Option<f64>,
    },
    Circle {
        center: Point,
        radius: f64,
    },
    Polygon {
        points: Vec<Point>,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbSilkscreenRect {
    pub pcb_silkscreen_rect_id: Option<String>,
    pub pcb_component_id: Option<String>,
    pub center: Point,
    pub width: f64,
    pub height: f64,
    pub layer: Option<LayerRef>,
    pub stroke_width: Option<f64>,
    pub is_filled: Option<bool>,
    pub has_stroke: Option<bool>,
    pub is_stroke_dashed: Option<bool>,
    #[serde(flatten)]
    pub extra_ids: ExtraIds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbSilkscreenCircle {
    pub pcb_silkscreen_circle_id: Option<String>,
    pub pcb_component_id: Option<String>,
    pub center: Point,
    pub radius: f64,
    pub layer: Option<LayerRef>,
    #[serde(flatten)]
    pub extra_ids: ExtraIds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbSilkscreenOval {
    pub pcb_silkscreen_oval_id: Option<String>,
    pub pcb_component_id: Option<String>,
    pub center: Point,
    pub radius_x: f64,
    pub radius_y: f64,
    pub layer: Option<LayerRef>,
    #[serde(flatten)]
    pub extra_ids: ExtraIds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbSilkscreenPill {
    pub pcb_silkscreen_pill_id: Option<String>,
    pub pcb_component_id: Option<String>,
    pub center: Point,
    pub width: f64,
    pub height: f64,
    pub layer: Option<LayerRef>,
    #[serde(flatten)]
    pub extra_ids: ExtraIds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbSilkscreenLine {
    pub pcb_silkscreen_line_id: Option<String>,
    pub pcb_component_id: Option<String>,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: Option<f64>,
    pub layer: Option<LayerRef>,
    #[serde(flatten)]
    pub extra_ids: ExtraIds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbSilkscreenPath {
    pub pcb_silkscreen_path_id: Option<String>,
    pub pcb_component_id: Option<String>,
    #[serde(default)]
    pub route: Vec<Point>,
    pub stroke_width: Option<f64>,
    pub layer: Option<LayerRef>,
    #[serde(flatten)]
    pub extra_ids: ExtraIds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbSilkscreenText {
    pub pcb_silkscreen_text_id: Option<String>,
    pub pcb_component_id: Option<String>,
    pub anchor_position: Point,
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    pub anchor_alignment: Option<TextAlign>,
    pub ccw_rotation: Option<f64>,
    pub layer: Option<LayerRef>,
    #[serde(flatten)]
    pub extra_ids: ExtraIds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbFabricationNotePath {
    pub pcb_fabrication_note_path_id: Option<String>,
    pub pcb_component_id: Option<String>,
    #[serde(default)]
    pub route: Vec<Point>,
    pub stroke_width: Option<f64>,
    pub layer: Option<LayerRef>,
    #[serde(flatten)]
    pub extra_ids: ExtraIds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbFabricationNoteText {
    pub pcb_fabrication_note_text_id: Option<String>,
    pub pcb_component_id: Option<String>,
    pub anchor_position: Point,
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    pub anchor_alignment: Option<TextAlign>,
    pub layer: Option<LayerRef>,
    #[serde(flatten)]
    pub extra_ids: ExtraIds,
}

fn default_font_size() -> f64 {
    1.0
}

/// Measurement annotation between two points
///
/// Shared by `pcb_note_dimension` and `pcb_fabrication_note_dimension`;
/// only the fabrication variant honors `offset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionNote {
    pub pcb_note_dimension_id: Option<String>,
    pub pcb_fabrication_note_dimension_id: Option<String>,
    pub pcb_component_id: Option<String>,
    pub from: Option<PointRef>,
    pub to: Option<PointRef>,
    pub text: Option<String>,
    pub font_size: Option<LengthValue>,
    pub arrow_size: Option<LengthValue>,
    pub offset: Option<LengthValue>,
    pub layer: Option<String>,
    pub color: Option<String>,
    #[serde(flatten)]
    pub extra_ids: ExtraIds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbComponent {
    pub pcb_component_id: String,
    pub source_component_id: Option<String>,
    #[serde(default)]
    pub center: Point,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    pub rotation: Option<f64>,
    pub layer: Option<LayerRef>,
    #[serde(flatten)]
    pub extra_ids: ExtraIds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbPort {
    pub pcb_port_id: String,
    pub source_port_id: Option<String>,
    pub pcb_component_id: Option<String>,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub layers: Vec<LayerRef>,
    #[serde(flatten)]
    pub extra_ids: ExtraIds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceComponent {
    pub source_component_id: String,
    pub name: Option<String>,
    pub ftype: Option<String>,
    #[serde(flatten)]
    pub extra_ids: ExtraIds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcePort {
    pub source_port_id: String,
    pub source_component_id: Option<String>,
    pub name: Option<String>,
    pub pin_number: Option<u32>,
    #[serde(flatten)]
    pub extra_ids: ExtraIds,
}

fn collect_ids<'a>(ids: &[Option<&'a String>]) -> Vec<&'a str> {
    ids.iter().flatten().map(|id| id.as_str()).collect()
}

impl CircuitElement {
    /// The `type` tag this element was decoded from
    pub fn type_name(&self) -> &str {
        match self {
            CircuitElement::PcbBoard(_) => "pcb_board",
            CircuitElement::PcbSmtpad(_) => "pcb_smtpad",
            CircuitElement::PcbHole(_) => "pcb_hole",
            CircuitElement::PcbPlatedHole(_) => "pcb_plated_hole",
            CircuitElement::PcbVia(_) => "pcb_via",
            CircuitElement::PcbTrace(_) => "pcb_trace",
            CircuitElement::PcbKeepout(_) => "pcb_keepout",
            CircuitElement::PcbCopperPour(_) => "pcb_copper_pour",
            CircuitElement::PcbCutout(_) => "pcb_cutout",
            CircuitElement::PcbSilkscreenRect(_) => "pcb_silkscreen_rect",
            CircuitElement::PcbSilkscreenCircle(_) => "pcb_silkscreen_circle",
            CircuitElement::PcbSilkscreenOval(_) => "pcb_silkscreen_oval",
            CircuitElement::PcbSilkscreenPill(_) => "pcb_silkscreen_pill",
            CircuitElement::PcbSilkscreenLine(_) => "pcb_silkscreen_line",
            CircuitElement::PcbSilkscreenPath(_) => "pcb_silkscreen_path",
            CircuitElement::PcbSilkscreenText(_) => "pcb_silkscreen_text",
            CircuitElement::PcbFabricationNotePath(_) => "pcb_fabrication_note_path",
            CircuitElement::PcbFabricationNoteText(_) => "pcb_fabrication_note_text",
            CircuitElement::PcbNoteDimension(_) => "pcb_note_dimension",
            CircuitElement::PcbFabricationNoteDimension(_) => "pcb_fabrication_note_dimension",
            CircuitElement::PcbComponent(_) => "pcb_component",
            CircuitElement::PcbPort(_) => "pcb_port",
            CircuitElement::SourceComponent(_) => "source_component",
            CircuitElement::SourcePort(_) => "source_port",
            CircuitElement::Unsupported(raw) => {
                raw.get("type").and_then(Value::as_str).unwrap_or_default()
            }
        }
    }

    /// Owning PCB component, for kinds that can belong to one
    pub fn pcb_component_id(&self) -> Option<&str> {
        let id = match self {
            CircuitElement::PcbSmtpad(e) => e.pcb_component_id.as_ref(),
            CircuitElement::PcbHole(e) => e.pcb_component_id.as_ref(),
            CircuitElement::PcbPlatedHole(e) => e.pcb_component_id.as_ref(),
            CircuitElement::PcbVia(e) => e.pcb_component_id.as_ref(),
            CircuitElement::PcbTrace(e) => e.pcb_component_id.as_ref(),
            CircuitElement::PcbKeepout(e) => e.pcb_component_id.as_ref(),
            CircuitElement::PcbCutout(e) => e.pcb_component_id.as_ref(),
            CircuitElement::PcbSilkscreenRect(e) => e.pcb_component_id.as_ref(),
            CircuitElement::PcbSilkscreenCircle(e) => e.pcb_component_id.as_ref(),
            CircuitElement::PcbSilkscreenOval(e) => e.pcb_component_id.as_ref(),
            CircuitElement::PcbSilkscreenPill(e) => e.pcb_component_id.as_ref(),
            CircuitElement::PcbSilkscreenLine(e) => e.pcb_component_id.as_ref(),
            CircuitElement::PcbSilkscreenPath(e) => e.pcb_component_id.as_ref(),
            CircuitElement::PcbSilkscreenText(e) => e.pcb_component_id.as_ref(),
            CircuitElement::PcbFabricationNotePath(e) => e.pcb_component_id.as_ref(),
            CircuitElement::PcbFabricationNoteText(e) => e.pcb_component_id.as_ref(),
            CircuitElement::PcbNoteDimension(e) | CircuitElement::PcbFabricationNoteDimension(e) => {
                e.pcb_component_id.as_ref()
            }
            CircuitElement::PcbComponent(e) => Some(&e.pcb_component_id),
            CircuitElement::PcbPort(e) => e.pcb_component_id.as_ref(),
            CircuitElement::Unsupported(raw) => {
                return raw.get("pcb_component_id").and_then(Value::as_str);
            }
            _ => None,
        };
        id.map(String::as_str)
    }

    pub fn pcb_port_id(&self) -> Option<&str> {
        match self {
            CircuitElement::PcbSmtpad(e) => e.pcb_port_id.as_deref(),
            CircuitElement::PcbPlatedHole(e) => e.pcb_port_id.as_deref(),
            CircuitElement::PcbPort(e) => Some(&e.pcb_port_id),
            _ => None,
        }
    }

    /// Explicit source port reference carried on the element itself
    pub fn source_port_id(&self) -> Option<&str> {
        match self {
            CircuitElement::PcbPort(e) => e.source_port_id.as_deref(),
            CircuitElement::SourcePort(e) => Some(&e.source_port_id),
            _ => None,
        }
    }

    /// Values of every populated top-level field whose name ends in `_id`
    pub fn id_fields(&self) -> Vec<&str> {
        let mut ids = self.declared_ids();
        if let Some(extra) = self.extra_ids() {
            ids.extend(extra.values());
        }
        ids
    }

    fn declared_ids(&self) -> Vec<&str> {
        match self {
            CircuitElement::PcbBoard(e) => collect_ids(&[e.pcb_board_id.as_ref()]),
            CircuitElement::PcbSmtpad(e) => collect_ids(&[
                e.pcb_smtpad_id.as_ref(),
                e.pcb_component_id.as_ref(),
                e.pcb_port_id.as_ref(),
            ]),
            CircuitElement::PcbHole(e) => {
                collect_ids(&[e.pcb_hole_id.as_ref(), e.pcb_component_id.as_ref()])
            }
            CircuitElement::PcbPlatedHole(e) => collect_ids(&[
                e.pcb_plated_hole_id.as_ref(),
                e.pcb_component_id.as_ref(),
                e.pcb_port_id.as_ref(),
            ]),
            CircuitElement::PcbVia(e) => {
                collect_ids(&[e.pcb_via_id.as_ref(), e.pcb_component_id.as_ref()])
            }
            CircuitElement::PcbTrace(e) => collect_ids(&[
                e.pcb_trace_id.as_ref(),
                e.pcb_component_id.as_ref(),
                e.source_trace_id.as_ref(),
            ]),
            CircuitElement::PcbKeepout(e) => {
                collect_ids(&[e.pcb_keepout_id.as_ref(), e.pcb_component_id.as_ref()])
            }
            CircuitElement::PcbCopperPour(e) => collect_ids(&[
                e.pcb_copper_pour_id.as_ref(),
                e.pcb_group_id.as_ref(),
                e.source_net_id.as_ref(),
            ]),
            CircuitElement::PcbCutout(e) => collect_ids(&[
                e.pcb_cutout_id.as_ref(),
                e.pcb_group_id.as_ref(),
                e.pcb_component_id.as_ref(),
            ]),
            CircuitElement::PcbSilkscreenRect(e) => {
                collect_ids(&[e.pcb_silkscreen_rect_id.as_ref(), e.pcb_component_id.as_ref()])
            }
            CircuitElement::PcbSilkscreenCircle(e) => {
                collect_ids(&[e.pcb_silkscreen_circle_id.as_ref(), e.pcb_component_id.as_ref()])
            }
            CircuitElement::PcbSilkscreenOval(e) => {
                collect_ids(&[e.pcb_silkscreen_oval_id.as_ref(), e.pcb_component_id.as_ref()])
            }
            CircuitElement::PcbSilkscreenPill(e) => {
                collect_ids(&[e.pcb_silkscreen_pill_id.as_ref(), e.pcb_component_id.as_ref()])
            }
            CircuitElement::PcbSilkscreenLine(e) => {
                collect_ids(&[e.pcb_silkscreen_line_id.as_ref(), e.pcb_component_id.as_ref()])
            }
            CircuitElement::PcbSilkscreenPath(e) => {
                collect_ids(&[e.pcb_silkscreen_path_id.as_ref(), e.pcb_component_id.as_ref()])
            }
            CircuitElement::PcbSilkscreenText(e) => {
                collect_ids(&[e.pcb_silkscreen_text_id.as_ref(), e.pcb_component_id.as_ref()])
            }
            CircuitElement::PcbFabricationNotePath(e) => collect_ids(&[
                e.pcb_fabrication_note_path_id.as_ref(),
                e.pcb_component_id.as_ref(),
            ]),
            CircuitElement::PcbFabricationNoteText(e) => collect_ids(&[
                e.pcb_fabrication_note_text_id.as_ref(),
                e.pcb_component_id.as_ref(),
            ]),
            CircuitElement::PcbNoteDimension(e) | CircuitElement::PcbFabricationNoteDimension(e) => {
                collect_ids(&[
                    e.pcb_note_dimension_id.as_ref(),
                    e.pcb_fabrication_note_dimension_id.as_ref(),
                    e.pcb_component_id.as_ref(),
                ])
            }
            CircuitElement::PcbComponent(e) => collect_ids(&[
                Some(&e.pcb_component_id),
                e.source_component_id.as_ref(),
            ]),
            CircuitElement::PcbPort(e) => collect_ids(&[
                Some(&e.pcb_port_id),
                e.source_port_id.as_ref(),
                e.pcb_component_id.as_ref(),
            ]),
            CircuitElement::SourceComponent(e) => collect_ids(&[Some(&e.source_component_id)]),
            CircuitElement::SourcePort(e) => collect_ids(&[
                Some(&e.source_port_id),
                e.source_component_id.as_ref(),
            ]),
            CircuitElement::Unsupported(raw) => raw
                .iter()
                .filter(|(key, _)| key.ends_with("_id"))
                .filter_map(|(_, value)| value.as_str())
                .collect(),
        }
    }

    /// Undeclared `*_id` fields of a modeled record
    pub fn extra_ids(&self) -> Option<&ExtraIds> {
        let extra = match self {
            CircuitElement::PcbBoard(e) => &e.extra_ids,
            CircuitElement::PcbSmtpad(e) => &e.extra_ids,
            CircuitElement::PcbHole(e) => &e.extra_ids,
            CircuitElement::PcbPlatedHole(e) => &e.extra_ids,
            CircuitElement::PcbVia(e) => &e.extra_ids,
            CircuitElement::PcbTrace(e) => &e.extra_ids,
            CircuitElement::PcbKeepout(e) => &e.extra_ids,
            CircuitElement::PcbCopperPour(e) => &e.extra_ids,
            CircuitElement::PcbCutout(e) => &e.extra_ids,
            CircuitElement::PcbSilkscreenRect(e) => &e.extra_ids,
            CircuitElement::PcbSilkscreenCircle(e) => &e.extra_ids,
            CircuitElement::PcbSilkscreenOval(e) => &e.extra_ids,
            CircuitElement::PcbSilkscreenPill(e) => &e.extra_ids,
            CircuitElement::PcbSilkscreenLine(e) => &e.extra_ids,
            CircuitElement::PcbSilkscreenPath(e) => &e.extra_ids,
            CircuitElement::PcbSilkscreenText(e) => &e.extra_ids,
            CircuitElement::PcbFabricationNotePath(e) => &e.extra_ids,
            CircuitElement::PcbFabricationNoteText(e) => &e.extra_ids,
            CircuitElement::PcbNoteDimension(e) | CircuitElement::PcbFabricationNoteDimension(e) => {
                &e.extra_ids
            }
            CircuitElement::PcbComponent(e) => &e.extra_ids,
            CircuitElement::PcbPort(e) => &e.extra_ids,
            CircuitElement::SourceComponent(e) => &e.extra_ids,
            CircuitElement::SourcePort(e) => &e.extra_ids,
            CircuitElement::Unsupported(_) => return None,
        };
        Some(extra)
    }

    /// Literal `x`/`y` position, for kinds that carry one
    pub fn position(&self) -> Option<Point> {
        match self {
            CircuitElement::PcbSmtpad(e) => e.shape.center(),
            CircuitElement::PcbHole(e) => Some(Point::new(e.x, e.y)),
            CircuitElement::PcbPlatedHole(e) => Some(Point::new(e.x, e.y)),
            CircuitElement::PcbVia(e) => Some(Point::new(e.x, e.y)),
            CircuitElement::PcbPort(e) => Some(Point::new(e.x, e.y)),
            CircuitElement::Unsupported(raw) => {
                Some(Point::new(raw_number(raw, "x")?, raw_number(raw, "y")?))
            }
            _ => None,
        }
    }

    /// Point used when another element refers to this one by id
    ///
    /// Priority: `x`/`y`, then `center`, `anchor_position`, `position`, `point`.
    pub fn anchor_point(&self) -> Option<Point> {
        if let Some(position) = self.position() {
            return Some(position);
        }
        match self {
            CircuitElement::PcbBoard(e) => Some(e.center),
            CircuitElement::PcbKeepout(e) => match &e.shape {
                KeepoutShape::Circle { center, .. } | KeepoutShape::Rect { center, .. } => {
                    Some(*center)
                }
                KeepoutShape::Unsupported => None,
            },
            CircuitElement::PcbCopperPour(e) => match &e.shape {
                CopperPourShape::Rect { center, .. } => Some(*center),
                _ => None,
            },
            CircuitElement::PcbCutout(e) => match &e.shape {
                CutoutShape::Rect { center, .. } | CutoutShape::Circle { center, .. } => {
                    Some(*center)
                }
                _ => None,
            },
            CircuitElement::PcbSilkscreenRect(e) => Some(e.center),
            CircuitElement::PcbSilkscreenCircle(e) => Some(e.center),
            CircuitElement::PcbSilkscreenOval(e) => Some(e.center),
            CircuitElement::PcbSilkscreenPill(e) => Some(e.center),
            CircuitElement::PcbSilkscreenText(e) => Some(e.anchor_position),
            CircuitElement::PcbFabricationNoteText(e) => Some(e.anchor_position),
            CircuitElement::PcbComponent(e) => Some(e.center),
            CircuitElement::Unsupported(raw) => ["center", "anchor_position", "position", "point"]
                .iter()
                .find_map(|key| raw.get(*key).and_then(raw_point)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decodes_smtpad_shapes() {
        let pad: CircuitElement = serde_json::from_value(json!({
            "type": "pcb_smtpad",
            "pcb_smtpad_id": "pad_1",
            "shape": "rotated_rect",
            "x": 1, "y": 2, "width": 3, "height": 4,
            "ccw_rotation": 45,
            "layer": "bottom"
        }))
        .unwrap();

        match pad {
            CircuitElement::PcbSmtpad(pad) => {
                assert_eq!(pad.layer, Some(LayerRef::Bottom));
                assert_eq!(
                    pad.shape,
                    SmtPadShape::RotatedRect {
                        x: 1.0,
                        y: 2.0,
                        width: 3.0,
                        height: 4.0,
                        ccw_rotation: 45.0,
                        rect_border_radius: None,
                    }
                );
            }
            other => panic!("expected smtpad, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_and_shape_degrade() {
        let unknown: CircuitElement =
            serde_json::from_value(json!({ "type": "schematic_box", "x": 0 })).unwrap();
        assert!(matches!(unknown, CircuitElement::Unsupported(_)));
        assert_eq!(unknown.type_name(), "schematic_box");

        let hole: CircuitElement = serde_json::from_value(json!({
            "type": "pcb_plated_hole",
            "shape": "hexagon",
            "x": 1, "y": 1
        }))
        .unwrap();
        match hole {
            CircuitElement::PcbPlatedHole(hole) => {
                assert_eq!(hole.shape, PlatedHoleShape::Unsupported)
            }
            other => panic!("expected plated hole, got {:?}", other),
        }
    }

    #[test]
    fn test_id_fields_and_anchor_point() {
        let port: CircuitElement = serde_json::from_value(json!({
            "type": "pcb_port",
            "pcb_port_id": "pcb_port_1",
            "source_port_id": "source_port_1",
            "x": 4, "y": -1
        }))
        .unwrap();

        assert_eq!(port.id_fields(), vec!["pcb_port_1", "source_port_1"]);
        assert_eq!(port.anchor_point(), Some(Point::new(4.0, -1.0)));
        assert_eq!(port.type_name(), "pcb_port");
    }

    #[test]
    fn test_via_layer_fallbacks() {
        let via = PcbVia {
            pcb_via_id: None,
            pcb_component_id: None,
            x: 0.0,
            y: 0.0,
            outer_diameter: 0.6,
            hole_diameter: 0.3,
            from_layer: None,
            to_layer: None,
            layers: vec![LayerRef::Top, LayerRef::Inner1],
            extra_ids: ExtraIds::default(),
        };
        assert_eq!(via.start_layer(), LayerRef::Top);
        assert_eq!(via.end_layer(), LayerRef::Inner1);
    }

    #[test]
    fn test_brep_flatten_keeps_ring_order() {
        let shape: BRepShape = serde_json::from_value(json!({
            "outer_ring": { "vertices": [
                { "x": 0, "y": 0 }, { "x": 4, "y": 0 }, { "x": 4, "y": 4 }, { "x": 0, "y": 4 }
            ]},
            "inner_rings": [{ "vertices": [
                { "x": 1, "y": 1, "bulge": 1 }, { "x": 3, "y": 1 }, { "x": 2, "y": 2 }
            ]}]
        }))
        .unwrap();

        let rings = shape.flatten(0.1);
        assert_eq!(rings.len(), 2);
        assert_eq!(rings[0].len(), 4);
        assert!(rings[1].len() > 3);
        assert_eq!(rings[1][0], Point::new(1.0, 1.0));
    }

    #[test]
    fn test_unmodeled_kind_keeps_raw_fields() {
        let group: CircuitElement = serde_json::from_value(json!({
            "type": "pcb_group",
            "pcb_group_id": "group_1",
            "subcircuit_id": "sub_1",
            "center": { "x": 10, "y": -2 },
            "width": 4
        }))
        .unwrap();

        assert_eq!(group.type_name(), "pcb_group");
        assert_eq!(group.id_fields(), vec!["group_1", "sub_1"]);
        assert_eq!(group.position(), None);
        assert_eq!(group.anchor_point(), Some(Point::new(10.0, -2.0)));

        let rect: CircuitElement = serde_json::from_value(json!({
            "type": "pcb_fabrication_note_rect", "x": 5, "y": 7
        }))
        .unwrap();
        assert_eq!(rect.position(), Some(Point::new(5.0, 7.0)));

        // the raw record serializes back unchanged
        assert_eq!(
            serde_json::to_value(&rect).unwrap(),
            json!({ "type": "pcb_fabrication_note_rect", "x": 5, "y": 7 })
        );
    }

    #[test]
    fn test_modeled_kind_keeps_undeclared_ids() {
        let pad: CircuitElement = serde_json::from_value(json!({
            "type": "pcb_smtpad",
            "pcb_smtpad_id": "pad_1",
            "pcb_group_id": "group_1",
            "subcircuit_id": "sub_1",
            "shape": "circle",
            "x": 0, "y": 0, "radius": 0.5
        }))
        .unwrap();

        assert!(matches!(pad, CircuitElement::PcbSmtpad(_)));
        assert_eq!(pad.id_fields(), vec!["pad_1", "group_1", "sub_1"]);
    }

    #[test]
    fn test_unknown_route_point_keeps_the_trace() {
        let trace: CircuitElement = serde_json::from_value(json!({
            "type": "pcb_trace",
            "route": [
                { "route_type": "wire", "x": 0, "y": 0, "width": 0.2, "layer": "top" },
                { "route_type": "through_hole", "x": 1, "y": 0 },
                { "route_type": "wire", "x": 2, "y": 0, "width": 0.2, "layer": "top" }
            ]
        }))
        .unwrap();

        let trace = match trace {
            CircuitElement::PcbTrace(trace) => trace,
            other => panic!("expected trace, got {:?}", other),
        };
        assert_eq!(trace.route.len(), 3);
        assert!(matches!(trace.route[1], TraceRoutePoint::Other(_)));
        assert_eq!(trace.route[1].point(), Some(Point::new(1.0, 0.0)));
        assert_eq!(trace.route[1].layer(), None);
    }
}
