//! Parameter schema for BDI agent definitions.
//!
//! The schema is the closed registry of keys an agent's `init_params` may
//! carry. Each key has a value contract ([`ValueType`]) and is either required
//! or optional with a default. Defaults that depend on the agent identity
//! (the group of one, or gates that only accept the agent's own group) are
//! expressed as [`DefaultValue`] variants and resolved at composition time.
//!
//! # Example
//!
//! ```
//! use bdi_launch::schema::{ParameterSchema, ParamValue};
//!
//! let schema = ParameterSchema::standard();
//! assert!(schema.validate("search_interval", &ParamValue::Int(100)).is_ok());
//! assert!(schema.validate("search_interval", &ParamValue::Int(0)).is_err());
//! assert!(schema.lookup("serach_interval").is_err());
//! ```

pub mod enums;
pub mod keys;
pub mod types;
pub mod value;

pub use enums::{PlanningMode, ReschedulePolicy};
pub use keys::{Concern, ParamKey};
pub use types::ValueType;
pub use value::{ParamMap, ParamValue};

use crate::error::Violation;
use std::fmt;
use std::sync::OnceLock;

/// Default applied to an optional key the caller left out.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Value(ParamValue),
    /// The agent's own id.
    AgentId,
    /// A one-element list holding the agent's group.
    OwnGroup,
}

impl DefaultValue {
    pub fn resolve(&self, agent_id: &str, agent_group: &str) -> ParamValue {
        match self {
            DefaultValue::Value(value) => value.clone(),
            DefaultValue::AgentId => ParamValue::Str(agent_id.to_string()),
            DefaultValue::OwnGroup => ParamValue::List(vec![agent_group.to_string()]),
        }
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Value(ParamValue::Str(s)) if s.is_empty() => write!(f, "\"\""),
            DefaultValue::Value(value) => write!(f, "{}", value),
            DefaultValue::AgentId => write!(f, "<agent_id>"),
            DefaultValue::OwnGroup => write!(f, "[<agent_group>]"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Requirement {
    Required,
    Optional(DefaultValue),
}

/// Contract for one key.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub key: ParamKey,
    pub value_type: ValueType,
    pub requirement: Requirement,
    pub description: &'static str,
}

impl ParamSpec {
    pub fn is_required(&self) -> bool {
        matches!(self.requirement, Requirement::Required)
    }

    pub fn default_value(&self) -> Option<&DefaultValue> {
        match &self.requirement {
            Requirement::Required => None,
            Requirement::Optional(default) => Some(default),
        }
    }
}

pub struct ParameterSchema {
    specs: Vec<ParamSpec>,
}

impl ParameterSchema {
    /// The schema shared by every agent of the fleet.
    pub fn standard() -> &'static ParameterSchema {
        static SCHEMA: OnceLock<ParameterSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| ParameterSchema {
            specs: ParamKey::ALL.iter().map(|key| build_spec(*key)).collect(),
        })
    }

    pub fn specs(&self) -> &[ParamSpec] {
        &self.specs
    }

    pub fn spec(&self, key: ParamKey) -> &ParamSpec {
        // specs are built from ParamKey::ALL in declaration order
        &self.specs[key as usize]
    }

    pub fn lookup(&self, name: &str) -> Result<&ParamSpec, Violation> {
        ParamKey::from_str(name)
            .map(|key| self.spec(key))
            .ok_or_else(|| Violation::UnknownParameter {
                key: name.to_string(),
            })
    }

    /// Validate `value` for key `name`, returning the normalized value.
    pub fn validate(&self, name: &str, value: &ParamValue) -> Result<ParamValue, Violation> {
        let spec = self.lookup(name)?;
        spec.value_type.check(name, value)
    }

    pub fn default_for(&self, name: &str) -> Result<&DefaultValue, Violation> {
        let spec = self.lookup(name)?;
        spec.default_value().ok_or_else(|| Violation::NoDefault {
            key: name.to_string(),
        })
    }

    pub fn required_keys(&self) -> impl Iterator<Item = ParamKey> + '_ {
        self.specs.iter().filter(|s| s.is_required()).map(|s| s.key)
    }
}

fn build_spec(key: ParamKey) -> ParamSpec {
    use DefaultValue::Value;
    use ParamValue::{Bool, Float, Int, List, Str};

    let (requirement, description) = match key {
        ParamKey::AgentId => (Requirement::Required, "unique agent identifier"),
        ParamKey::AgentGroup => (
            Requirement::Optional(DefaultValue::AgentId),
            "group tag used for group-addressed coordination",
        ),
        ParamKey::PddlFile => (Requirement::Required, "PDDL domain file"),
        ParamKey::InitBset => (
            Requirement::Optional(Value(Str(String::new()))),
            "initial belief set (empty: start with no beliefs)",
        ),
        ParamKey::InitDset => (
            Requirement::Optional(Value(Str(String::new()))),
            "initial desire set (empty: start with no desires)",
        ),
        ParamKey::InitReactiveRulesSet => (
            Requirement::Optional(Value(Str(String::new()))),
            "initial reactive rules (empty: no rules)",
        ),
        ParamKey::PlanningMode => (
            Requirement::Optional(Value(Str(PlanningMode::Offline.as_str().to_string()))),
            "offline full-plan search or online partial-plan search",
        ),
        ParamKey::Planner => (
            Requirement::Optional(Value(Str("POPF".to_string()))),
            "planner backend name",
        ),
        ParamKey::SearchInterval => (
            Requirement::Optional(Value(Int(500))),
            "online search interval in milliseconds",
        ),
        ParamKey::MaxPplanSize => (
            Requirement::Optional(Value(Int(32000))),
            "maximum partial plan size",
        ),
        ParamKey::MaxNullSearchIntervals => (
            Requirement::Optional(Value(Int(16))),
            "consecutive empty search intervals before giving up",
        ),
        ParamKey::BeliefCk => (
            Requirement::Optional(DefaultValue::OwnGroup),
            "groups allowed to read beliefs",
        ),
        ParamKey::BeliefW => (
            Requirement::Optional(DefaultValue::OwnGroup),
            "groups allowed to write beliefs",
        ),
        ParamKey::DesireCk => (
            Requirement::Optional(DefaultValue::OwnGroup),
            "groups allowed to read desires",
        ),
        ParamKey::DesireW => (
            Requirement::Optional(DefaultValue::OwnGroup),
            "groups allowed to submit desires",
        ),
        ParamKey::DesirePr => (
            Requirement::Optional(Value(Float(0.6))),
            "maximum priority accepted for submitted desires",
        ),
        ParamKey::RtcDeadline => (
            Requirement::Optional(Value(Float(2.0))),
            "abort a plan once its deadline is surpassed by this factor",
        ),
        ParamKey::CompPlanTries => (
            Requirement::Optional(Value(Int(16))),
            "plan computation attempts per desire",
        ),
        ParamKey::ExecPlanTries => (
            Requirement::Optional(Value(Int(16))),
            "plan execution attempts per desire",
        ),
        ParamKey::AutosubPrec => (
            Requirement::Optional(Value(Bool(false))),
            "submit unmet preconditions as desires",
        ),
        ParamKey::AutosubContext => (
            Requirement::Optional(Value(Bool(false))),
            "submit unmet context conditions as desires",
        ),
        ParamKey::ReschedulePolicy => (
            Requirement::Optional(Value(Str(
                ReschedulePolicy::NoPreempt.as_str().to_string(),
            ))),
            "how a new plan replaces a running one",
        ),
        ParamKey::MinCommitSteps => (
            Requirement::Optional(Value(Int(1))),
            "plan steps committed before execution starts",
        ),
        ParamKey::SimToN => (
            Requirement::Optional(Value(Int(0))),
            "simulation horizon in steps (0 disables)",
        ),
        ParamKey::Debug => (
            Requirement::Optional(Value(Bool(false))),
            "enable debug output",
        ),
        ParamKey::DebugLogActive => (
            Requirement::Optional(Value(List(Vec::new()))),
            "subsystems with verbose logging",
        ),
    };

    ParamSpec {
        key,
        value_type: key.value_type(),
        requirement,
        description,
    }
}
