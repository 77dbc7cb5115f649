//! Length value parsing and fixed-point formatting
//!
//! Converts numbers or unit-suffixed strings (`"10mil"`, `"0.5in"`, `"2mm"`)
//! to millimeters, and prints numbers with a fixed number of decimals.

use std::sync::OnceLock;

use regex::Regex;

use crate::circuit::LengthValue;

/// First signed decimal number appearing anywhere in `text`
pub(crate) fn find_number(text: &str) -> Option<f64> {
    static NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex =
        NUMBER_REGEX.get_or_init(|| Regex::new(r"-?\d+(?:\.\d+)?").expect("invalid regex pattern"));
    regex.find(text)?.as_str().parse::<f64>().ok()
}

/// Format with `digits` decimals, rounding exact halfway values away from zero
///
/// Same output as JavaScript `toFixed`: `{:.N}` alone would round a value
/// sitting exactly on a binary half to even. `-0` prints without a sign.
pub fn format_fixed(value: f64, digits: u32) -> String {
    let value = value + 0.0;
    if value.is_finite() && digits <= MAX_EXACT_DIGITS {
        if let Some(rounded) = round_half_up(value.abs(), digits) {
            let sign = if value < 0.0 { "-" } else { "" };
            let scale = 10u64.pow(digits);
            let (whole, frac) = (rounded / scale, rounded % scale);
            return if digits == 0 {
                format!("{sign}{whole}")
            } else {
                format!("{sign}{whole}.{frac:0width$}", width = digits as usize)
            };
        }
    }
    format!("{:.*}", digits as usize, value)
}

const MAX_EXACT_DIGITS: u32 = 15;

/// `magnitude * 10^digits` rounded up, only when it lies exactly on a half
///
/// A tie means `magnitude * 2^(digits + 1)` is an odd integer. Both scalings
/// are exact while the scaled value stays below 2^51.
fn round_half_up(magnitude: f64, digits: u32) -> Option<u64> {
    let halves = magnitude * 2f64.powi(digits as i32 + 1);
    if halves.fract() != 0.0 || halves % 2.0 != 1.0 {
        return None;
    }
    let scaled = magnitude * 10f64.powi(digits as i32);
    if scaled >= 2f64.powi(51) {
        return None;
    }
    Some(scaled.floor() as u64 + 1)
}

/// Parse a length string, returning millimeters
///
/// Unit suffixes: `mil`, `mm`, `cm`, `um`, `in`, `"`, `m`. A bare number is
/// taken as millimeters.
pub fn parse_length_str(text: &str) -> Option<f64> {
    let trimmed = text.trim().to_ascii_lowercase();
    if trimmed.is_empty() {
        return None;
    }

    let value = find_number(&trimmed).filter(|v| v.is_finite())?;

    let mm = if trimmed.ends_with("mil") {
        value * 0.0254
    } else if trimmed.ends_with("mm") {
        value
    } else if trimmed.ends_with("cm") {
        value * 10.0
    } else if trimmed.ends_with("um") {
        value / 1000.0
    } else if trimmed.ends_with("in") || trimmed.ends_with('"') {
        value * 25.4
    } else if trimmed.ends_with('m') {
        value * 1000.0
    } else {
        value
    };
    Some(mm)
}

/// Resolve an optional length value to millimeters, falling back on anything unparsable
pub fn parse_length(value: Option<&LengthValue>, fallback: f64) -> f64 {
    match value {
        Some(LengthValue::Number(n)) if n.is_finite() => *n,
        Some(LengthValue::Text(text)) => parse_length_str(text).unwrap_or(fallback),
        _ => fallback,
    }
}
