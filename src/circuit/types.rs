//! Shared value types used by circuit element records
//!
//! Points, layer references, and the loosely-typed values (lengths, point
//! references) that circuit JSON allows in a few annotation fields.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A 2D point in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Polyline vertex with an optional arc bulge to the next vertex
///
/// `bulge = tan(included_angle / 4)`; positive sweeps counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointWithBulge {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulge: Option<f64>,
}

impl PointWithBulge {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, bulge: None }
    }

    pub const fn with_bulge(x: f64, y: f64, bulge: f64) -> Self {
        Self { x, y, bulge: Some(bulge) }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Copper layer named by an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerRef {
    #[default]
    Top,
    Bottom,
    Inner1,
    Inner2,
    Inner3,
    Inner4,
    Inner5,
    Inner6,
}

/// Text anchor alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Center,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    CenterLeft,
    CenterRight,
    TopCenter,
    BottomCenter,
}

/// A length given either as a number (mm) or as a string with a unit suffix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LengthValue {
    Number(f64),
    Text(String),
}

/// Dimension endpoint: a literal point, an `"x,y"` string, or an element id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointRef {
    Point(Point),
    Text(String),
}

/// Fields of a record kind this crate does not model, kept as decoded
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// Numeric field of a raw record
pub fn raw_number(raw: &RawRecord, key: &str) -> Option<f64> {
    raw.get(key).and_then(serde_json::Value::as_f64)
}

/// `{x, y}` object with numeric coordinates
pub fn raw_point(value: &serde_json::Value) -> Option<Point> {
    Some(Point::new(value.get("x")?.as_f64()?, value.get("y")?.as_f64()?))
}

/// `*_id` string fields a record carries beyond the ones its kind declares
///
/// Flattened into every record struct so id lookups see `pcb_group_id`,
/// `subcircuit_id` and similar without each kind listing them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtraIds(IndexMap<String, String>);

impl ExtraIds {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.0.values().map(String::as_str)
    }
}

impl Serialize for ExtraIds {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(&self.0)
    }
}

impl<'de> Deserialize<'de> for ExtraIds {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ExtraIdsVisitor;

        impl<'de> Visitor<'de> for ExtraIdsVisitor {
            type Value = ExtraIds;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of record fields")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ExtraIds, A::Error> {
                let mut ids = IndexMap::new();
                while let Some(key) = map.next_key::<String>()? {
                    if key.ends_with("_id") {
                        if let serde_json::Value::String(value) = map.next_value()? {
                            ids.insert(key, value);
                        }
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
                Ok(ExtraIds(ids))
            }
        }

        deserializer.deserialize_map(ExtraIdsVisitor)
    }
}
