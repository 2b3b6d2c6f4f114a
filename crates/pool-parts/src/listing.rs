use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::error::UnsupportedListing;

/// Lowercase and trim every object key, recursively.
///
/// Vendors are inconsistent about key spelling (`"Power Rating"`,
/// `"power rating "`), so everything downstream looks keys up in this form.
pub fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key.trim().to_lowercase(), normalize_keys(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_keys).collect()),
        other => other,
    }
}

/// Best-effort name for a record in log messages.
pub fn label(record: &Value) -> &str {
    ["mpn", "id"]
        .iter()
        .find_map(|key| record.get(key).and_then(Value::as_str))
        .unwrap_or("<unknown>")
}

/// Read-only view over one normalized listing record.
#[derive(Debug, Clone, Copy)]
pub struct Listing<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> Listing<'a> {
    pub fn new(record: &'a Value) -> Result<Self, UnsupportedListing> {
        match record {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(UnsupportedListing::WrongType {
                field: "listing".to_string(),
                expected: "an object",
            }),
        }
    }

    /// A required string field. `null` counts as missing.
    pub fn str_field(&self, name: &str) -> Result<&'a str, UnsupportedListing> {
        match self.fields.get(name) {
            None | Some(Value::Null) => Err(UnsupportedListing::MissingField(name.to_string())),
            Some(Value::String(s)) => Ok(s),
            Some(_) => Err(UnsupportedListing::WrongType {
                field: name.to_string(),
                expected: "a string",
            }),
        }
    }

    pub fn mpn(&self) -> Result<&'a str, UnsupportedListing> {
        self.str_field("mpn")
    }

    pub fn id(&self) -> Result<&'a str, UnsupportedListing> {
        self.str_field("id")
    }

    pub fn attrs(&self) -> Result<Attributes<'a>, UnsupportedListing> {
        match self.fields.get("part_attrs") {
            None | Some(Value::Null) => {
                Err(UnsupportedListing::MissingField("part_attrs".to_string()))
            }
            Some(Value::Object(fields)) => Ok(Attributes { fields }),
            Some(_) => Err(UnsupportedListing::WrongType {
                field: "part_attrs".to_string(),
                expected: "an object",
            }),
        }
    }
}

/// The `part_attrs` mapping of a listing.
///
/// Attribute values are usually strings but some vendors send bare numbers,
/// which are read as their JSON text.
#[derive(Debug, Clone, Copy)]
pub struct Attributes<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> Attributes<'a> {
    pub fn get(&self, name: &str) -> Result<Option<Cow<'a, str>>, UnsupportedListing> {
        match self.fields.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(Cow::Borrowed(s))),
            Some(Value::Number(n)) => Ok(Some(Cow::Owned(n.to_string()))),
            Some(_) => Err(UnsupportedListing::WrongType {
                field: format!("part_attrs.{name}"),
                expected: "a string or number",
            }),
        }
    }

    pub fn require(&self, name: &str) -> Result<Cow<'a, str>, UnsupportedListing> {
        self.get(name)?
            .ok_or_else(|| UnsupportedListing::MissingField(format!("part_attrs.{name}")))
    }
}
