use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

/// Every generated record is a plain part.
pub const PART_TYPE: &str = "part";

/// A value paired with whether downstream tools may override it.
///
/// Serializes as a two element array, `[false, "RC0603FR-0710KL"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Editable<T>(pub bool, pub T);

impl<T> Editable<T> {
    pub fn locked(value: T) -> Self {
        Editable(false, value)
    }
}

/// One part file in the pool.
///
/// Field order is the serialization order, so output stays byte-stable
/// between runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartDefinition {
    #[serde(rename = "MPN")]
    pub mpn: Editable<String>,
    pub base: String,
    pub datasheet: Editable<String>,
    pub description: Editable<String>,
    pub inherit_model: bool,
    pub inherit_tags: bool,
    pub manufacturer: Editable<String>,
    pub parametric: Parametric,
    pub tags: Vec<String>,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub uuid: String,
    pub value: Editable<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Parametric {
    Resistor(ResistorParams),
    Capacitor(CapacitorParams),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResistorParams {
    #[serde(with = "rust_decimal::serde::str")]
    pub pmax: Decimal,
    pub table: &'static str,
    #[serde(serialize_with = "decimal_or_blank")]
    pub tolerance: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str")]
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapacitorParams {
    pub table: &'static str,
    #[serde(serialize_with = "decimal_or_blank")]
    pub tolerance: Option<Decimal>,
    #[serde(rename = "type")]
    pub dielectric: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub value: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub wvdc: Decimal,
}

/// Unknown tolerances are written as `""` rather than `null`.
fn decimal_or_blank<S: Serializer>(value: &Option<Decimal>, s: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(d) => s.serialize_str(&d.to_string()),
        None => s.serialize_str(""),
    }
}

impl PartDefinition {
    /// Four-space indented JSON, ending at the closing brace. Non-ASCII text
    /// such as `Ω` is written as-is.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut ser)?;
        // serde_json only ever emits UTF-8.
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}
