/// Minimal cursor-based reader over a decoded JSON document.
///
/// Wraps `serde_json::Value` with the handful of operations the parsers
/// need (find field, read scalar, enter object/array) and keeps track of
/// the field path so every error points at the offending value
/// (e.g. `passes[2].reads[0].access`). A `null` field is treated as absent.

use serde_json::{Map, Value};
use crate::error::Result;
use crate::{graph_bail, graph_err};

const SOURCE: &str = "galaxy3d::JsonReader";

/// Human-readable JSON type name for error messages
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Read a non-negative integer that fits in a u32
pub(crate) fn value_as_u32(value: &Value, path: &str) -> Result<u32> {
    let number = value.as_u64()
        .ok_or_else(|| graph_err!(Format, SOURCE, path,
            "expected a non-negative integer, found {}", type_name(value)))?;
    u32::try_from(number)
        .map_err(|_| graph_err!(Format, SOURCE, path, "integer {} is out of range", number))
}

/// Read a string value
pub(crate) fn value_as_str<'a>(value: &'a Value, path: &str) -> Result<&'a str> {
    value.as_str()
        .ok_or_else(|| graph_err!(Format, SOURCE, path,
            "expected a string, found {}", type_name(value)))
}

/// Read a number as f32
pub(crate) fn value_as_f32(value: &Value, path: &str) -> Result<f32> {
    value.as_f64()
        .map(|v| v as f32)
        .ok_or_else(|| graph_err!(Format, SOURCE, path,
            "expected a number, found {}", type_name(value)))
}

// ===== OBJECT CURSOR =====

/// Cursor on a JSON object
#[derive(Debug, Clone)]
pub(crate) struct JsonObject<'a> {
    map: &'a Map<String, Value>,
    path: String,
}

impl<'a> JsonObject<'a> {
    /// Enter an object value
    pub(crate) fn new(value: &'a Value, path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        match value {
            Value::Object(map) => Ok(Self { map, path }),
            other => graph_bail!(Format, SOURCE, display_path(&path),
                "expected an object, found {}", type_name(other)),
        }
    }

    /// Path of this object ("" for the document root)
    pub(crate) fn path(&self) -> &str {
        &self.path
    }

    /// Path of a field of this object
    pub(crate) fn field_path(&self, field: &str) -> String {
        if self.path.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", self.path, field)
        }
    }

    /// Find a field (null counts as absent)
    pub(crate) fn find(&self, field: &str) -> Option<&'a Value> {
        self.map.get(field).filter(|v| !v.is_null())
    }

    pub(crate) fn has(&self, field: &str) -> bool {
        self.find(field).is_some()
    }

    fn require(&self, field: &str) -> Result<&'a Value> {
        self.find(field)
            .ok_or_else(|| graph_err!(Format, SOURCE, self.field_path(field),
                "missing required field"))
    }

    pub(crate) fn required_str(&self, field: &str) -> Result<&'a str> {
        value_as_str(self.require(field)?, &self.field_path(field))
    }

    pub(crate) fn optional_str(&self, field: &str) -> Result<Option<&'a str>> {
        self.find(field)
            .map(|v| value_as_str(v, &self.field_path(field)))
            .transpose()
    }

    pub(crate) fn required_u32(&self, field: &str) -> Result<u32> {
        value_as_u32(self.require(field)?, &self.field_path(field))
    }

    pub(crate) fn optional_u32(&self, field: &str) -> Result<Option<u32>> {
        self.find(field)
            .map(|v| value_as_u32(v, &self.field_path(field)))
            .transpose()
    }

    pub(crate) fn required_u64(&self, field: &str) -> Result<u64> {
        let value = self.require(field)?;
        value.as_u64()
            .ok_or_else(|| graph_err!(Format, SOURCE, self.field_path(field),
                "expected a non-negative integer, found {}", type_name(value)))
    }

    pub(crate) fn optional_f32(&self, field: &str) -> Result<Option<f32>> {
        self.find(field)
            .map(|v| value_as_f32(v, &self.field_path(field)))
            .transpose()
    }

    pub(crate) fn optional_bool(&self, field: &str) -> Result<Option<bool>> {
        match self.find(field) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => graph_bail!(Format, SOURCE, self.field_path(field),
                "expected a boolean, found {}", type_name(other)),
        }
    }

    pub(crate) fn optional_object(&self, field: &str) -> Result<Option<JsonObject<'a>>> {
        self.find(field)
            .map(|v| JsonObject::new(v, self.field_path(field)))
            .transpose()
    }

    pub(crate) fn optional_array(&self, field: &str) -> Result<Option<JsonArray<'a>>> {
        self.find(field)
            .map(|v| JsonArray::new(v, self.field_path(field)))
            .transpose()
    }

    /// Absent array reads as empty
    pub(crate) fn array_or_empty(&self, field: &str) -> Result<JsonArray<'a>> {
        Ok(self.optional_array(field)?
            .unwrap_or_else(|| JsonArray::empty(self.field_path(field))))
    }
}

// ===== ARRAY CURSOR =====

/// Cursor on a JSON array
#[derive(Debug, Clone)]
pub(crate) struct JsonArray<'a> {
    items: &'a [Value],
    path: String,
}

impl<'a> JsonArray<'a> {
    /// Enter an array value
    pub(crate) fn new(value: &'a Value, path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        match value {
            Value::Array(items) => Ok(Self { items, path }),
            other => graph_bail!(Format, SOURCE, display_path(&path),
                "expected an array, found {}", type_name(other)),
        }
    }

    fn empty(path: String) -> Self {
        Self { items: &[], path }
    }

    /// Path of an element of this array
    pub(crate) fn item_path(&self, index: usize) -> String {
        format!("{}[{}]", self.path, index)
    }

    /// Enter every element as an object
    pub(crate) fn objects(&self) -> impl Iterator<Item = Result<JsonObject<'a>>> + '_ {
        self.items.iter()
            .enumerate()
            .map(move |(i, v)| JsonObject::new(v, self.item_path(i)))
    }

    /// Read every element as a string, paired with its path
    pub(crate) fn strings(&self) -> Result<Vec<(&'a str, String)>> {
        self.items.iter()
            .enumerate()
            .map(|(i, v)| {
                let path = self.item_path(i);
                value_as_str(v, &path).map(|s| (s, path))
            })
            .collect()
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() { "<root>" } else { path }
}
