//! Dimension endpoint resolution
//!
//! A dimension endpoint is a literal point, an `"x,y"` / `"x;y"` string, or
//! the id of some other element whose anchor point should be used.

use std::sync::OnceLock;

use regex::Regex;

use crate::circuit::{CircuitElement, Point, PointRef};

/// Leading decimal literal of `part`, ignoring whatever follows (`"2mm"` is 2)
fn parse_number_prefix(part: &str) -> Option<f64> {
    static NUMBER_PREFIX_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = NUMBER_PREFIX_REGEX.get_or_init(|| {
        Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("invalid regex pattern")
    });
    regex.find(part)?.as_str().parse::<f64>().ok()
}

/// Parse `"x,y"`, `"x;y"` or `"x y"` into a point
///
/// Exactly two parts, each starting with a finite number. Empty parts count,
/// so a leading or trailing separator rejects the string.
pub fn parse_point_str(text: &str) -> Option<Point> {
    static SEPARATOR_REGEX: OnceLock<Regex> = OnceLock::new();
    let separator =
        SEPARATOR_REGEX.get_or_init(|| Regex::new(r"[;,\s]+").expect("invalid regex pattern"));

    let parts: Vec<&str> = separator.split(text).collect();
    match parts.as_slice() {
        [x, y] => {
            let x = parse_number_prefix(x).filter(|v| v.is_finite())?;
            let y = parse_number_prefix(y).filter(|v| v.is_finite())?;
            Some(Point::new(x, y))
        }
        _ => None,
    }
}

/// First element, other than `exclude`, with an `*_id` field equal to `id`
pub fn find_element_referencing_id<'a>(
    id: &str,
    all_elements: &'a [CircuitElement],
    exclude: Option<&CircuitElement>,
) -> Option<&'a CircuitElement> {
    all_elements.iter().find(|element| {
        let excluded = exclude.is_some_and(|ex| std::ptr::eq(ex, *element));
        !excluded && element.id_fields().iter().any(|field| *field == id)
    })
}

/// Resolve an endpoint to a concrete point
pub fn resolve_point_reference(
    reference: Option<&PointRef>,
    all_elements: &[CircuitElement],
    current: &CircuitElement,
) -> Option<Point> {
    match reference? {
        PointRef::Point(point) => Some(*point),
        PointRef::Text(text) => parse_point_str(text).or_else(|| {
            find_element_referencing_id(text, all_elements, Some(current))
                .and_then(CircuitElement::anchor_point)
        }),
    }
}
