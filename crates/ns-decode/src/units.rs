//! Unit decoders: vectors, durations, sizes, and timestamps.
//!
//! These compose the coercion engine with unit-specific validation. Unlike
//! plain coercion they never fall back to the raw string: a malformed unit
//! or a tuple of the wrong arity is an error.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use ns_common::{Error, Result};

use crate::coerce::{coerce, coerce_text, Raw};
use crate::value::ScalarValue;

/// Timestamp layout used by the host, e.g. `"14 Mar 2019 09:26 AM"`.
pub const DEFAULT_DATE_FORMAT: &str = "%d %b %Y %I:%M %p";

/// Conversion factors into canonical units (seconds, megabytes).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitScales {
    /// Factor applied to `ms` durations.
    ///
    /// Defaults to 0.01, the factor the host tooling has always applied.
    /// This is not the SI 0.001; confirm against real cook times before
    /// relying on absolute values.
    pub ms_to_seconds: f64,
    /// Factor applied to `KB` sizes.
    pub kb_to_megabytes: f64,
}

impl Default for UnitScales {
    fn default() -> Self {
        UnitScales {
            ms_to_seconds: 0.01,
            kb_to_megabytes: 0.001,
        }
    }
}

/// A 2D vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

/// A 3D vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Numeric components of a tuple with exactly `N` entries.
fn components<const N: usize>(value: &ScalarValue, context: &str) -> Result<[f64; N]> {
    let expected = format!("a {}-tuple of numbers", N);
    let items = value
        .as_tuple()
        .ok_or_else(|| Error::shape(context, &expected, value.kind()))?;
    if items.len() != N {
        return Err(Error::shape(context, &expected, value.kind()));
    }

    let mut out = [0.0; N];
    for (slot, item) in out.iter_mut().zip(items) {
        *slot = item
            .as_f64()
            .ok_or_else(|| Error::shape(context, &expected, format!("{} component", item.kind())))?;
    }
    Ok(out)
}

impl TryFrom<&ScalarValue> for Vector2 {
    type Error = Error;

    fn try_from(value: &ScalarValue) -> Result<Self> {
        let [x, y] = components::<2>(value, "vector2")?;
        Ok(Vector2 { x, y })
    }
}

impl TryFrom<&ScalarValue> for Vector3 {
    type Error = Error;

    fn try_from(value: &ScalarValue) -> Result<Self> {
        let [x, y, z] = components::<3>(value, "vector3")?;
        Ok(Vector3 { x, y, z })
    }
}

impl Vector3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3 { x, y, z }
    }
}

/// Decode a 2D vector field. Absent stays `None`.
pub fn decode_vector2(raw: Raw<'_>) -> Result<Option<Vector2>> {
    match coerce(raw)? {
        ScalarValue::Absent => Ok(None),
        value => Vector2::try_from(&value).map(Some),
    }
}

/// Decode a 3D vector field. Absent stays `None`.
pub fn decode_vector3(raw: Raw<'_>) -> Result<Option<Vector3>> {
    match coerce(raw)? {
        ScalarValue::Absent => Ok(None),
        value => Vector3::try_from(&value).map(Some),
    }
}

/// Coerce the leading number of a unit expression.
fn leading_number(text: &str, context: &str, full: &str) -> Result<f64> {
    coerce_text(text)
        .as_f64()
        .ok_or_else(|| Error::format(context, format!("'{}' has no numeric value", full)))
}

/// Decode `"<number> <s|ms>"` into seconds.
pub fn decode_seconds(text: &str, scales: &UnitScales) -> Result<f64> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let [number, unit] = parts.as_slice() else {
        return Err(Error::format(
            "duration",
            format!("expected '<number> <unit>', got '{}'", text),
        ));
    };

    let value = leading_number(number, "duration", text)?;
    match *unit {
        "s" => Ok(value),
        "ms" => Ok(value * scales.ms_to_seconds),
        other => Err(Error::format(
            "duration",
            format!("unknown unit '{}' in '{}'", other, text),
        )),
    }
}

/// Decode `"<number> <MB|KB> <instanced>"` into megabytes.
///
/// The trailing instanced flag is required but not interpreted.
pub fn decode_megabytes(text: &str, scales: &UnitScales) -> Result<f64> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let [number, unit, _instanced] = parts.as_slice() else {
        return Err(Error::format(
            "size",
            format!("expected '<number> <unit> <instanced>', got '{}'", text),
        ));
    };

    let value = leading_number(number, "size", text)?;
    match *unit {
        "MB" => Ok(value),
        "KB" => Ok(value * scales.kb_to_megabytes),
        other => Err(Error::format(
            "size",
            format!("unknown unit '{}' in '{}'", other, text),
        )),
    }
}

/// Decode a host timestamp with `format` (see [`DEFAULT_DATE_FORMAT`]).
///
/// The result is naive: the host writes local wall-clock time and no
/// timezone conversion is applied.
pub fn decode_date(text: &str, format: &str) -> Result<NaiveDateTime> {
    let value = coerce_text(text);
    let Some(text) = value.as_str() else {
        return Err(Error::format(
            "date",
            format!("expected a timestamp, got {}", value.kind()),
        ));
    };
    NaiveDateTime::parse_from_str(text.trim(), format)
        .map_err(|e| Error::format("date", format!("'{}': {}", text, e)))
}
