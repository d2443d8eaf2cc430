use super::value::ParamValue;
use crate::error::Violation;
use std::fmt;

/// The value contract a parameter key enforces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueType {
    String,
    FilePath,
    Boolean,
    Integer { min: Option<i64> },
    Float { min: Option<f64>, max: Option<f64> },
    StringList,
    Enumerated(&'static [&'static str]),
    /// `true`/`false` to accept or refuse every group, or an explicit list of groups.
    GroupGate,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::String => write!(f, "string"),
            ValueType::FilePath => write!(f, "file path"),
            ValueType::Boolean => write!(f, "boolean"),
            ValueType::Integer { min: Some(min) } => write!(f, "integer >= {}", min),
            ValueType::Integer { min: None } => write!(f, "integer"),
            ValueType::Float { min, max } => match (min, max) {
                (Some(lo), Some(hi)) => write!(f, "float in [{:?}, {:?}]", lo, hi),
                (Some(lo), None) => write!(f, "float >= {:?}", lo),
                (None, Some(hi)) => write!(f, "float <= {:?}", hi),
                (None, None) => write!(f, "float"),
            },
            ValueType::StringList => write!(f, "list of strings"),
            ValueType::Enumerated(allowed) => write!(f, "one of {}", allowed.join("|")),
            ValueType::GroupGate => write!(f, "boolean or list of groups"),
        }
    }
}

impl ValueType {
    /// Check `value` against this contract and return its normalized form.
    ///
    /// Integers are widened where a float is expected.
    pub fn check(&self, key: &str, value: &ParamValue) -> Result<ParamValue, Violation> {
        match (self, value) {
            (ValueType::String | ValueType::FilePath, ParamValue::Str(_)) => Ok(value.clone()),
            (ValueType::Boolean, ParamValue::Bool(_)) => Ok(value.clone()),
            (ValueType::Integer { min }, ParamValue::Int(i)) => {
                if let Some(min) = min {
                    if i < min {
                        return Err(Violation::OutOfRange {
                            key: key.to_string(),
                            reason: format!("{} is below the minimum of {}", i, min),
                        });
                    }
                }
                Ok(value.clone())
            }
            (ValueType::Float { min, max }, ParamValue::Int(_) | ParamValue::Float(_)) => {
                let v = value.as_float().unwrap_or(f64::NAN);
                if !v.is_finite() {
                    return Err(Violation::OutOfRange {
                        key: key.to_string(),
                        reason: "value must be a finite number".to_string(),
                    });
                }
                if let Some(lo) = min {
                    if v < *lo {
                        return Err(Violation::OutOfRange {
                            key: key.to_string(),
                            reason: format!("{:?} is below the minimum of {:?}", v, lo),
                        });
                    }
                }
                if let Some(hi) = max {
                    if v > *hi {
                        return Err(Violation::OutOfRange {
                            key: key.to_string(),
                            reason: format!("{:?} is above the maximum of {:?}", v, hi),
                        });
                    }
                }
                Ok(ParamValue::Float(v))
            }
            (ValueType::StringList, ParamValue::List(_)) => Ok(value.clone()),
            (ValueType::Enumerated(allowed), ParamValue::Str(s)) => {
                if allowed.contains(&s.as_str()) {
                    Ok(value.clone())
                } else {
                    Err(Violation::IllegalEnumValue {
                        key: key.to_string(),
                        value: s.clone(),
                        allowed: allowed.iter().map(|a| a.to_string()).collect(),
                    })
                }
            }
            (ValueType::GroupGate, ParamValue::Bool(_) | ParamValue::List(_)) => Ok(value.clone()),
            _ => Err(Violation::TypeMismatch {
                key: key.to_string(),
                expected: self.to_string(),
                found: value.kind().to_string(),
            }),
        }
    }
}
