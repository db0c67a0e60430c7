// src/data.rs

//! Loosely-typed input values.
//!
//! Callers hand plotting operations scalars, flat vectors, nested lists or
//! keyed maps. [`Data`] is the closed set of shapes we accept; everything the
//! validators and converters do starts from here. Conversions from plain Rust
//! collections are provided so call sites can pass `vec![1.0, 2.0]` or
//! `[[0.0, 1.0], [1.0, 0.0]]` directly.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{Result, VizError};

/// A scalar, a sequence, or a mapping.
///
/// Sequences may nest and may be ragged; whether a particular nesting is
/// acceptable is decided by the consumer (see [`Data::shape`]).
#[derive(Debug, Clone, PartialEq)]
pub enum Data {
    Scalar(f64),
    Text(String),
    Seq(Vec<Data>),
    Map(BTreeMap<String, Data>),
}

impl Default for Data {
    fn default() -> Self {
        Data::Seq(Vec::new())
    }
}

impl Data {
    /// Returns the scalar value, if this is one.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Data::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Data]> {
        match self {
            Data::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Shape of a rectangular numeric array, numpy style.
    ///
    /// A scalar has shape `[]`, a flat list `[n]`, a list of `m` rows of
    /// length `n` has `[m, n]` and so on. Ragged nesting, text and mappings
    /// have no array shape and yield a `Shape` error.
    pub fn shape(&self) -> Result<Vec<usize>> {
        match self {
            Data::Scalar(_) => Ok(Vec::new()),
            Data::Text(_) => Err(VizError::shape("text value has no numeric shape")),
            Data::Map(_) => Err(VizError::shape("mapping has no numeric shape")),
            Data::Seq(items) => {
                let Some(first) = items.first() else {
                    return Ok(vec![0]);
                };
                let inner = first.shape()?;
                for item in &items[1..] {
                    if item.shape()? != inner {
                        return Err(VizError::shape(
                            "ragged nested sequence cannot be treated as an array",
                        ));
                    }
                }
                let mut shape = Vec::with_capacity(inner.len() + 1);
                shape.push(items.len());
                shape.extend(inner);
                Ok(shape)
            }
        }
    }

    /// Number of dimensions (`shape().len()`).
    pub fn ndim(&self) -> Result<usize> {
        Ok(self.shape()?.len())
    }

    /// Total number of scalar elements of a rectangular array.
    pub fn size(&self) -> Result<usize> {
        Ok(self.shape()?.iter().product())
    }

    /// Row-major flattening of a rectangular array.
    pub fn flatten(&self) -> Result<Vec<f64>> {
        // Validate rectangularity first so ragged input never flattens silently.
        self.shape()?;
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        Ok(out)
    }

    fn flatten_into(&self, out: &mut Vec<f64>) {
        match self {
            Data::Scalar(v) => out.push(*v),
            Data::Seq(items) => items.iter().for_each(|item| item.flatten_into(out)),
            Data::Text(_) | Data::Map(_) => {}
        }
    }

    /// Interprets the value as a flat rank-1 vector.
    pub fn to_vec(&self, name: &str) -> Result<Vec<f64>> {
        match self.ndim()? {
            1 => self.flatten(),
            n => Err(VizError::shape(format!(
                "{name} must be one-dimensional, got {n} dimensions"
            ))),
        }
    }

    /// Interprets the value as a rectangular rank-2 array of rows.
    pub fn to_rows(&self, name: &str) -> Result<Vec<Vec<f64>>> {
        let shape = self.shape()?;
        if shape.len() != 2 {
            return Err(VizError::shape(format!(
                "{name} must be two-dimensional, got {} dimensions",
                shape.len()
            )));
        }
        match self {
            Data::Seq(rows) => rows.iter().map(Data::flatten).collect(),
            _ => Err(VizError::shape(format!("{name} must be a sequence of rows"))),
        }
    }

    /// Converts to the JSON wire form.
    ///
    /// Integral floats are emitted as JSON integers so indices and counts
    /// reach the server as `1` rather than `1.0`.
    pub fn to_json(&self) -> Value {
        match self {
            Data::Scalar(v) => number(*v),
            Data::Text(s) => Value::String(s.clone()),
            Data::Seq(items) => Value::Array(items.iter().map(Data::to_json).collect()),
            Data::Map(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

/// JSON number for `v`, preferring an integer representation when exact.
pub(crate) fn number(v: f64) -> Value {
    // 2^53: beyond this integral floats are no longer exactly representable.
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    if v.is_finite() && v.fract() == 0.0 && v.abs() <= MAX_EXACT {
        Value::from(v as i64)
    } else {
        serde_json::Number::from_f64(v)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

/// Rewrites every integral float inside `value` as an integer.
pub(crate) fn normalize_numbers(value: Value) -> Value {
    match value {
        Value::Number(n) if n.is_f64() => n.as_f64().map(number).unwrap_or(Value::Null),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_numbers).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, normalize_numbers(v)))
                .collect(),
        ),
        other => other,
    }
}

// --- Conversions from plain Rust values ---

macro_rules! scalar_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Data {
                fn from(v: $t) -> Self {
                    Data::Scalar(v as f64)
                }
            }
        )*
    };
}

scalar_from!(f64, f32, i64, i32, u32, u8, usize);

impl From<&str> for Data {
    fn from(s: &str) -> Self {
        Data::Text(s.to_string())
    }
}

impl From<String> for Data {
    fn from(s: String) -> Self {
        Data::Text(s)
    }
}

impl<T: Into<Data>> From<Vec<T>> for Data {
    fn from(items: Vec<T>) -> Self {
        Data::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Data> + Clone> From<&[T]> for Data {
    fn from(items: &[T]) -> Self {
        Data::Seq(items.iter().cloned().map(Into::into).collect())
    }
}

impl<T: Into<Data>, const N: usize> From<[T; N]> for Data {
    fn from(items: [T; N]) -> Self {
        Data::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Data>> From<BTreeMap<String, T>> for Data {
    fn from(map: BTreeMap<String, T>) -> Self {
        Data::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl TryFrom<Value> for Data {
    type Error = VizError;

    /// JSON `null` has no counterpart; booleans become 0/1.
    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Null => Err(VizError::shape("null cannot be used as plot data")),
            Value::Bool(b) => Ok(Data::Scalar(if b { 1.0 } else { 0.0 })),
            Value::Number(n) => n
                .as_f64()
                .map(Data::Scalar)
                .ok_or_else(|| VizError::shape(format!("number {n} is not representable"))),
            Value::String(s) => Ok(Data::Text(s)),
            Value::Array(items) => Ok(Data::Seq(
                items
                    .into_iter()
                    .map(Data::try_from)
                    .collect::<Result<Vec<_>>>()?,
            )),
            Value::Object(map) => Ok(Data::Map(
                map.into_iter()
                    .map(|(k, v)| Ok((k, Data::try_from(v)?)))
                    .collect::<Result<BTreeMap<_, _>>>()?,
            )),
        }
    }
}
