use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Component classes the pool is synced for, in sync order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ComponentClass {
    Resistor,
    Capacitor,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown component class '{0}' (expected resistor or capacitor)")]
pub struct UnknownClass(pub String);

impl ComponentClass {
    pub const ALL: [ComponentClass; 2] = [ComponentClass::Resistor, ComponentClass::Capacitor];

    /// Class name sent to the search API.
    pub fn api_name(self) -> &'static str {
        match self {
            ComponentClass::Resistor => "resistor",
            ComponentClass::Capacitor => "capacitor",
        }
    }

    /// Directory under `parts/` holding this class.
    pub fn dir_name(self) -> &'static str {
        self.api_name()
    }

    /// Value of `parametric.table` in generated parts.
    pub fn table_name(self) -> &'static str {
        match self {
            ComponentClass::Resistor => "resistors",
            ComponentClass::Capacitor => "capacitors",
        }
    }

    /// Unit appended to the human-readable value.
    pub fn display_unit(self) -> &'static str {
        match self {
            ComponentClass::Resistor => "Ω",
            ComponentClass::Capacitor => "F",
        }
    }
}

impl fmt::Display for ComponentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

impl FromStr for ComponentClass {
    type Err = UnknownClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "resistor" | "resistors" => Ok(ComponentClass::Resistor),
            "capacitor" | "capacitors" => Ok(ComponentClass::Capacitor),
            _ => Err(UnknownClass(s.to_string())),
        }
    }
}
