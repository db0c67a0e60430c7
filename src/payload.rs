// src/payload.rs

//! The canonical payload assembled by a plot type's `clean` step.
//!
//! A payload is a set of named fields (points, links, series, decorative
//! properties...) plus an ordered list of encoded images. Optional
//! properties are only present when the caller supplied them; absence is
//! never sent as `null`.

use log::warn;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::data::{normalize_numbers, Data};
use crate::error::{Result, VizError};
use crate::validate::{check_1d, check_alpha, check_color, check_coordinates, check_index, check_size};

/// Field name of the pass-through escape hatch.
pub const DATA_KEY: &str = "data";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    fields: Map<String, Value>,
    images: Vec<Vec<u8>>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes `value` under `key`. Integral floats become integers.
    pub fn insert<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let value = normalize_numbers(serde_json::to_value(value)?);
        self.fields.insert(key.to_string(), value);
        Ok(())
    }

    /// Builder form of [`Payload::insert`].
    pub fn with<T: Serialize + ?Sized>(mut self, key: &str, value: &T) -> Result<Self> {
        self.insert(key, value)?;
        Ok(self)
    }

    /// Validates and attaches an optional property; `None` leaves the payload untouched.
    pub fn add_property(&mut self, name: &str, value: Option<&Data>) -> Result<()> {
        if let Some(value) = value {
            let checked = check_property(name, value)?;
            self.fields.insert(name.to_string(), checked);
        }
        Ok(())
    }

    /// Attaches an optional text-valued property (axis labels, colormap names).
    pub fn add_text(&mut self, name: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.fields
                .insert(name.to_string(), Value::String(value.to_string()));
        }
    }

    pub fn push_image(&mut self, png: Vec<u8>) {
        self.images.push(png);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn images(&self) -> &[Vec<u8>] {
        &self.images
    }

    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }

    pub fn has_fields(&self) -> bool {
        !self.fields.is_empty()
    }

    /// Structured fields as a JSON object (images excluded).
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    pub fn into_parts(self) -> (Map<String, Value>, Vec<Vec<u8>>) {
        (self.fields, self.images)
    }
}

/// Runs the validator registered for `name`, or the generic rank-1 check.
///
/// Mappings and text have no generic check and pass through unchanged.
pub fn check_property(name: &str, value: &Data) -> Result<Value> {
    let checked = match name {
        "color" => serde_json::to_value(check_color(value)?)?,
        "alpha" => serde_json::to_value(check_alpha(value)?)?,
        "size" | "thickness" => serde_json::to_value(check_size(value)?)?,
        "index" => serde_json::to_value(check_index(value)?)?,
        "coordinates" => serde_json::to_value(check_coordinates(value, false)?)?,
        _ => match value {
            Data::Scalar(_) | Data::Seq(_) => serde_json::to_value(check_1d(value, name)?)?,
            Data::Map(_) | Data::Text(_) => value.to_json(),
        },
    };
    Ok(normalize_numbers(checked))
}

/// Accepts only sequences and mappings; anything else is rejected.
pub fn ensure_dict_or_list(data: &Data) -> Result<Value> {
    match data {
        Data::Seq(_) | Data::Map(_) => Ok(data.to_json()),
        Data::Scalar(v) => Err(VizError::shape(format!(
            "could not convert scalar {v} to a list or mapping"
        ))),
        Data::Text(s) => Err(VizError::shape(format!(
            "could not convert text {s:?} to a list or mapping"
        ))),
    }
}

/// Field names used when rows are sent as keyed objects.
fn row_keys(field: &str) -> Option<&'static [&'static str]> {
    match field {
        "points" | "nodes" => Some(&["x", "y", "z"]),
        "links" => Some(&["source", "target", "value"]),
        "color" => Some(&["r", "g", "b"]),
        _ => None,
    }
}

/// Rewrites `[[a, b], ...]` rows of a known field as `[{x: a, y: b}, ...]`.
///
/// Already-keyed rows and non-row entries (e.g. plain node indices) are left
/// alone.
pub fn keyed_rows(field: &str, value: Value) -> Value {
    let Some(keys) = row_keys(field) else {
        return value;
    };
    match value {
        Value::Array(rows) if rows.iter().all(Value::is_array) => Value::Array(
            rows.into_iter()
                .map(|row| match row {
                    Value::Array(cells) => Value::Object(
                        keys.iter()
                            .map(|k| k.to_string())
                            .zip(cells)
                            .collect(),
                    ),
                    other => other,
                })
                .collect(),
        ),
        other => other,
    }
}

/// Builds the `data` member of a create/append request from payload fields.
///
/// When the escape-hatch `data` field is present it is sent on its own;
/// otherwise all fields are sent as one object.
pub fn wire_data(fields: Map<String, Value>, keyed: bool) -> Result<Value> {
    let mut fields = fields;
    if let Some(raw) = fields.remove(DATA_KEY) {
        if !fields.is_empty() {
            warn!(
                "payload carries '{DATA_KEY}' alongside {:?}; only '{DATA_KEY}' is sent",
                fields.keys().collect::<Vec<_>>()
            );
        }
        return match raw {
            Value::Array(_) | Value::Object(_) => Ok(raw),
            other => Err(VizError::shape(format!(
                "could not convert {other} to a list or mapping"
            ))),
        };
    }
    Ok(Value::Object(
        fields
            .into_iter()
            .map(|(k, v)| {
                let v = if keyed { keyed_rows(&k, v) } else { v };
                (k, v)
            })
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_log::test;

    #[test]
    fn it_should_not_send_omitted_properties() {
        let mut payload = Payload::new().with("points", &[[1.0, 2.0]]).unwrap();
        payload.add_property("color", None).unwrap();
        payload.add_text("xaxis", None);
        assert_eq!(payload.to_value(), json!({"points": [[1, 2]]}));
    }

    #[test]
    fn it_should_dispatch_properties_to_their_validator() {
        let mut payload = Payload::new();
        payload
            .add_property("color", Some(&Data::from(vec![1.0, 0.0, 0.0])))
            .unwrap();
        payload.add_property("group", Some(&Data::from(2))).unwrap();
        assert_eq!(payload.get("color"), Some(&json!([[1, 0, 0]])));
        assert_eq!(payload.get("group"), Some(&json!([2])));

        let err = payload
            .add_property("size", Some(&Data::from(vec![1.0, -2.0])))
            .unwrap_err();
        assert!(matches!(err, VizError::Range(_)));
        assert!(payload.get("size").is_none());
    }

    #[test]
    fn it_should_reject_scalar_payloads() {
        assert_eq!(ensure_dict_or_list(&Data::from(vec![1, 2])).unwrap(), json!([1, 2]));
        assert!(matches!(
            ensure_dict_or_list(&Data::from(4.0)),
            Err(VizError::Shape(_))
        ));
        assert!(ensure_dict_or_list(&Data::from("x")).is_err());
    }

    #[test]
    fn it_should_key_only_known_row_fields() {
        assert_eq!(
            keyed_rows("points", json!([[1, 2], [3, 4]])),
            json!([{"x": 1, "y": 2}, {"x": 3, "y": 4}])
        );
        assert_eq!(
            keyed_rows("links", json!([[0, 1, 0.5]])),
            json!([{"source": 0, "target": 1, "value": 0.5}])
        );
        assert_eq!(keyed_rows("nodes", json!([0, 1, 2])), json!([0, 1, 2]));
        assert_eq!(keyed_rows("series", json!([[1, 2]])), json!([[1, 2]]));
    }

    #[test]
    fn it_should_prefer_the_escape_hatch_payload() {
        let mut fields = Map::new();
        fields.insert("data".into(), json!({"anything": [1, 2]}));
        fields.insert("color".into(), json!([[1, 0, 0]]));
        assert_eq!(wire_data(fields, true).unwrap(), json!({"anything": [1, 2]}));

        let mut fields = Map::new();
        fields.insert("points".into(), json!([[1, 2]]));
        assert_eq!(wire_data(fields.clone(), false).unwrap(), json!({"points": [[1, 2]]}));
        assert_eq!(wire_data(fields, true).unwrap(), json!({"points": [{"x": 1, "y": 2}]}));
    }
}
