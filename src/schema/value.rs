use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A parameter value as written in a deployment file or built in code.
///
/// Deserialization is untagged, so TOML `true`, `16`, `1.0`, `"JAVAFF"` and
/// `["javaff", "scheduler"]` map directly to the matching variant. Any other
/// shape (mixed or numeric arrays, inline tables, datetimes) is kept as
/// [`ParamValue::Unsupported`] so composition can report it with the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<String>),
    Unsupported(toml::Value),
}

/// Fully resolved parameters of one launch unit, keyed by wire name.
pub type ParamMap = BTreeMap<String, ParamValue>;

impl ParamValue {
    /// Short name of the value's shape, used in type mismatch reports.
    pub fn kind(&self) -> &'static str {
        match self {
            ParamValue::Bool(_) => "boolean",
            ParamValue::Int(_) => "integer",
            ParamValue::Float(_) => "float",
            ParamValue::Str(_) => "string",
            ParamValue::List(_) => "list",
            ParamValue::Unsupported(raw) => match raw {
                toml::Value::Array(_) => "list of non-strings",
                other => other.type_str(),
            },
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, ParamValue::Unsupported(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            ParamValue::Float(f) => Some(*f),
            ParamValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Int(i) => write!(f, "{}", i),
            // Debug keeps the trailing ".0" so floats stay floats downstream
            ParamValue::Float(v) => write!(f, "{:?}", v),
            ParamValue::Str(s) => write!(f, "{}", s),
            ParamValue::List(items) => write!(f, "[{}]", items.join(", ")),
            ParamValue::Unsupported(raw) => write!(f, "{}", raw),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        ParamValue::List(value)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(value: Vec<&str>) -> Self {
        ParamValue::List(value.into_iter().map(str::to_string).collect())
    }
}
