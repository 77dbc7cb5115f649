//! Core drawing primitive types
//!
//! This module contains the renderer-agnostic shapes emitted by the
//! converter: lines, rectangles, circles, pills, ovals, polygons, arc
//! polygons and text, each tagged with a physical layer and optional links
//! back to the circuit elements that produced them.

use serde::Serialize;

use crate::circuit::{
    BRepShape, CircuitElement, LayerRef, PcbComponent, Point, SourceComponent, SourcePort,
    TextAlign,
};

/// Physical or drafting layer a primitive is painted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Top,
    Bottom,
    Inner1,
    Inner2,
    Inner3,
    Inner4,
    Inner5,
    Inner6,
    Drill,
    TopSilkscreen,
    BottomSilkscreen,
    TopFabrication,
    BottomFabrication,
    Board,
    DwgsUser,
}

impl Layer {
    /// Silkscreen layer on the same side as `layer`; only an explicit bottom flips it
    pub fn silkscreen(layer: Option<LayerRef>) -> Self {
        match layer {
            Some(LayerRef::Bottom) => Layer::BottomSilkscreen,
            _ => Layer::TopSilkscreen,
        }
    }

    /// Fabrication layer on the same side as `layer`; only an explicit bottom flips it
    pub fn fabrication(layer: Option<LayerRef>) -> Self {
        match layer {
            Some(LayerRef::Bottom) => Layer::BottomFabrication,
            _ => Layer::TopFabrication,
        }
    }
}

impl From<LayerRef> for Layer {
    fn from(layer: LayerRef) -> Self {
        match layer {
            LayerRef::Top => Layer::Top,
            LayerRef::Bottom => Layer::Bottom,
            LayerRef::Inner1 => Layer::Inner1,
            LayerRef::Inner2 => Layer::Inner2,
            LayerRef::Inner3 => Layer::Inner3,
            LayerRef::Inner4 => Layer::Inner4,
            LayerRef::Inner5 => Layer::Inner5,
            LayerRef::Inner6 => Layer::Inner6,
        }
    }
}

/// Straight stroke between two points
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub width: f64,
    pub square_cap: bool,
    /// Stroke width stays constant in screen space regardless of zoom
    pub zoom_independent: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ccw_rotation: Option<f64>,
    /// Corner radius
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roundness: Option<f64>,
    /// Hatch instead of solid fill
    pub mesh_fill: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_filled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_stroke: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_stroke_dashed: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub mesh_fill: bool,
}

/// Stadium: a rectangle whose short sides are semicircles
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Pill {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ccw_rotation: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Oval {
    pub x: f64,
    pub y: f64,
    pub rx: f64,
    pub ry: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Polygon {
    pub points: Vec<Point>,
}

/// Polygon whose rings may contain bulged arc segments, left for the backend to tessellate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolygonWithArcs {
    pub brep_shape: BRepShape,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Text {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub size: f64,
    pub align: TextAlign,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ccw_rotation: Option<f64>,
}

/// Geometry of a drawing primitive
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "pcb_drawing_type", rename_all = "snake_case")]
pub enum PrimitiveShape {
    Line(Line),
    Rect(Rect),
    Circle(Circle),
    Pill(Pill),
    Oval(Oval),
    Polygon(Polygon),
    PolygonWithArcs(PolygonWithArcs),
    Text(Text),
}

impl PrimitiveShape {
    /// Tag used as the id prefix and by backends to pick a paint operation
    pub fn kind(&self) -> &'static str {
        match self {
            PrimitiveShape::Line(_) => "line",
            PrimitiveShape::Rect(_) => "rect",
            PrimitiveShape::Circle(_) => "circle",
            PrimitiveShape::Pill(_) => "pill",
            PrimitiveShape::Oval(_) => "oval",
            PrimitiveShape::Polygon(_) => "polygon",
            PrimitiveShape::PolygonWithArcs(_) => "polygon_with_arcs",
            PrimitiveShape::Text(_) => "text",
        }
    }

    /// Rotation in counter-clockwise degrees, for shapes that can rotate
    pub fn ccw_rotation(&self) -> Option<f64> {
        match self {
            PrimitiveShape::Rect(rect) => rect.ccw_rotation,
            PrimitiveShape::Pill(pill) => pill.ccw_rotation,
            PrimitiveShape::Text(text) => text.ccw_rotation,
            _ => None,
        }
    }
}

/// Links from a primitive back to the records it represents
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct PrimitiveMeta<'a> {
    #[serde(rename = "_element", skip_serializing_if = "Option::is_none")]
    pub element: Option<&'a CircuitElement>,
    #[serde(rename = "_parent_pcb_component", skip_serializing_if = "Option::is_none")]
    pub parent_pcb_component: Option<&'a PcbComponent>,
    #[serde(rename = "_parent_source_component", skip_serializing_if = "Option::is_none")]
    pub parent_source_component: Option<&'a SourceComponent>,
    #[serde(rename = "_source_port", skip_serializing_if = "Option::is_none")]
    pub source_port: Option<&'a SourcePort>,
}

impl<'a> PrimitiveMeta<'a> {
    /// Only the originating element, no ownership links
    pub fn element_only(element: &'a CircuitElement) -> Self {
        Self {
            element: Some(element),
            ..Self::default()
        }
    }

    /// Same links without the source port
    pub fn without_port(self) -> Self {
        Self {
            source_port: None,
            ..self
        }
    }

    pub fn has_parent_links(&self) -> bool {
        self.parent_pcb_component.is_some()
            || self.parent_source_component.is_some()
            || self.source_port.is_some()
    }
}

/// A single drawing primitive on one layer
#[derive(Debug, Clone, Serialize)]
pub struct Primitive<'a> {
    #[serde(rename = "_pcb_drawing_object_id")]
    pub id: String,
    pub layer: Layer,
    #[serde(flatten)]
    pub shape: PrimitiveShape,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(flatten)]
    pub meta: PrimitiveMeta<'a>,
}

impl PartialEq for PrimitiveMeta<'_> {
    fn eq(&self, other: &Self) -> bool {
        fn same<T>(a: Option<&T>, b: Option<&T>) -> bool {
            match (a, b) {
                (Some(a), Some(b)) => std::ptr::eq(a, b),
                (None, None) => true,
                _ => false,
            }
        }
        same(self.element, other.element)
            && same(self.parent_pcb_component, other.parent_pcb_component)
            && same(self.parent_source_component, other.parent_source_component)
            && same(self.source_port, other.source_port)
    }
}
