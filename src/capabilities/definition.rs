//! Data structures for capability declarations in deployment files.

use crate::error::LaunchError;
use crate::schema::ParamValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Whether a capability acts on the world or observes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityRole {
    Action,
    Sensor,
}

impl CapabilityRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            CapabilityRole::Action => "action",
            CapabilityRole::Sensor => "sensor",
        }
    }
}

impl fmt::Display for CapabilityRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Points at one declared capability, for error reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityRef {
    pub role: CapabilityRole,
    /// Zero-based position in the agent's action or sensor list.
    pub position: usize,
    pub instance_name: String,
    pub package: String,
    pub executable: String,
}

impl fmt::Display for CapabilityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} #{} '{}' ({}/{})",
            self.role,
            self.position + 1,
            self.instance_name,
            self.package,
            self.executable
        )
    }
}

/// One single-key override scoped to a capability instance.
///
/// In deployment files these are written as one-entry tables:
/// `specific_params = [{ init_sleep = 2 }, { sensing_freq = 1.0 }]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, ParamValue>",
    into = "BTreeMap<String, ParamValue>"
)]
pub struct SpecificParam {
    pub key: String,
    pub value: ParamValue,
}

impl SpecificParam {
    pub fn new(key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl TryFrom<BTreeMap<String, ParamValue>> for SpecificParam {
    type Error = String;

    fn try_from(map: BTreeMap<String, ParamValue>) -> Result<Self, Self::Error> {
        if map.len() != 1 {
            let keys: Vec<_> = map.keys().map(String::as_str).collect();
            return Err(format!(
                "each specific_params entry must hold exactly one key, found [{}]",
                keys.join(", ")
            ));
        }
        let (key, value) = map.into_iter().next().ok_or("empty specific_params entry")?;
        Ok(Self { key, value })
    }
}

impl From<SpecificParam> for BTreeMap<String, ParamValue> {
    fn from(param: SpecificParam) -> Self {
        BTreeMap::from([(param.key, param.value)])
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDescriptor {
    package: String,
    executable: String,
    #[serde(alias = "name")]
    instance_name: String,
    #[serde(default)]
    specific_params: Vec<SpecificParam>,
}

/// A pluggable action or sensor exposed by an agent.
///
/// Descriptors are immutable once built: construction (in code or from a
/// deployment file) is the only place their invariants are checked.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawDescriptor")]
pub struct CapabilityDescriptor {
    package: String,
    executable: String,
    instance_name: String,
    specific_params: Vec<SpecificParam>,
}

impl TryFrom<RawDescriptor> for CapabilityDescriptor {
    type Error = LaunchError;

    fn try_from(raw: RawDescriptor) -> Result<Self, Self::Error> {
        CapabilityDescriptor::new(raw.package, raw.executable, raw.instance_name)
            .map(|descriptor| descriptor.with_params(raw.specific_params))
    }
}

impl CapabilityDescriptor {
    pub fn new(
        package: impl Into<String>,
        executable: impl Into<String>,
        instance_name: impl Into<String>,
    ) -> crate::error::Result<Self> {
        let descriptor = Self {
            package: package.into(),
            executable: executable.into(),
            instance_name: instance_name.into(),
            specific_params: Vec::new(),
        };

        for (field, value) in [
            ("package", &descriptor.package),
            ("executable", &descriptor.executable),
            ("instance_name", &descriptor.instance_name),
        ] {
            if value.trim().is_empty() {
                return Err(LaunchError::InvalidCapability(format!(
                    "{} cannot be empty (package '{}', executable '{}', name '{}')",
                    field, descriptor.package, descriptor.executable, descriptor.instance_name
                )));
            }
        }

        Ok(descriptor)
    }

    /// Append one override; later overrides of the same key win.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.specific_params.push(SpecificParam::new(key, value));
        self
    }

    pub fn with_params(mut self, params: impl IntoIterator<Item = SpecificParam>) -> Self {
        self.specific_params.extend(params);
        self
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn instance_name(&self) -> &str {
        &self.instance_name
    }

    pub fn specific_params(&self) -> &[SpecificParam] {
        &self.specific_params
    }

    pub fn reference(&self, role: CapabilityRole, position: usize) -> CapabilityRef {
        CapabilityRef {
            role,
            position,
            instance_name: self.instance_name.clone(),
            package: self.package.clone(),
            executable: self.executable.clone(),
        }
    }
}
