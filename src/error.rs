use crate::capabilities::CapabilityRef;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A single configuration violation found while composing an agent.
///
/// Violations never surface alone: the composer collects every one it finds
/// into a [`CompositionReport`] so a misconfigured agent can be fixed in one pass.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Violation {
    #[error("unknown parameter '{key}'")]
    UnknownParameter { key: String },

    #[error("parameter '{key}' expects {expected}, got {found}")]
    TypeMismatch {
        key: String,
        expected: String,
        found: String,
    },

    #[error("parameter '{key}' has illegal value '{value}' (allowed: {})", .allowed.join(", "))]
    IllegalEnumValue {
        key: String,
        value: String,
        allowed: Vec<String>,
    },

    #[error("parameter '{key}' is out of range: {reason}")]
    OutOfRange { key: String, reason: String },

    #[error("missing required parameter '{key}'")]
    MissingRequiredParameter { key: String },

    #[error("parameter '{key}' is required and has no default")]
    NoDefault { key: String },

    #[error("init parameter '{key}' is '{found}' but the agent is declared as '{expected}'")]
    IdentityConflict {
        key: String,
        expected: String,
        found: String,
    },

    #[error("{capability} redefines reserved parameter '{key}'")]
    ReservedCapabilityParameter {
        capability: CapabilityRef,
        key: String,
    },

    #[error("{capability} takes the node name '{name}' of the agent's support unit")]
    SupportUnitNameClash {
        capability: CapabilityRef,
        name: String,
    },

    #[error("{capability} parameter '{key}' has unsupported value shape {found}")]
    UnsupportedCapabilityParameter {
        capability: CapabilityRef,
        key: String,
        found: String,
    },

    #[error("duplicate capability name '{name}': {first} and {second}")]
    DuplicateCapabilityName {
        name: String,
        first: CapabilityRef,
        second: CapabilityRef,
    },

    #[error(
        "planning mode '{planning_mode}' does not allow reschedule policy '{policy}' (allowed: {})",
        .allowed.join(", ")
    )]
    InconsistentPolicyCombination {
        planning_mode: String,
        policy: String,
        allowed: Vec<String>,
    },

    #[error("agent id '{agent_id}' is declared more than once in the deployment")]
    DuplicateAgentId { agent_id: String },
}

/// Every violation found while composing one agent.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionReport {
    pub agent_id: String,
    pub violations: Vec<Violation>,
}

impl CompositionReport {
    pub fn new(agent_id: impl Into<String>, violations: Vec<Violation>) -> Self {
        Self {
            agent_id: agent_id.into(),
            violations,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }
}

impl fmt::Display for CompositionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let agent = if self.agent_id.is_empty() {
            "<unnamed>"
        } else {
            self.agent_id.as_str()
        };
        write!(
            f,
            "agent '{}' has {} configuration violation(s):",
            agent,
            self.violations.len()
        )?;
        for violation in &self.violations {
            write!(f, "\n  - {}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for CompositionReport {}

/// Reports for every agent of a deployment that failed to compose.
#[derive(Debug, Clone, PartialEq)]
pub struct FleetReport {
    pub reports: Vec<CompositionReport>,
}

impl FleetReport {
    /// Total number of violations across all agents.
    pub fn violation_count(&self) -> usize {
        self.reports.iter().map(CompositionReport::len).sum()
    }

    pub fn for_agent(&self, agent_id: &str) -> Option<&CompositionReport> {
        self.reports.iter().find(|r| r.agent_id == agent_id)
    }
}

impl fmt::Display for FleetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, report) in self.reports.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", report)?;
        }
        Ok(())
    }
}

impl std::error::Error for FleetReport {}

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Composition failed: {0}")]
    Composition(#[from] CompositionReport),

    #[error("Deployment is invalid:\n{0}")]
    Fleet(#[from] FleetReport),

    #[error("Invalid capability: {0}")]
    InvalidCapability(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Deployment file not found: {0}")]
    DeploymentNotFound(PathBuf),

    #[error("Unknown scenario '{name}' (available: {})", .available.join(", "))]
    UnknownScenario {
        name: String,
        available: Vec<String>,
    },

    #[error("Agent '{0}' is not declared in the deployment")]
    UnknownAgent(String),

    #[error("Cannot locate share directory for package '{0}'. Add it to [share] or AMENT_PREFIX_PATH")]
    PackageNotFound(String),

    #[error("Launcher not available: {0}")]
    LauncherNotFound(String),

    #[error("Unit '{name}' exited during start-up with {status}")]
    UnitExited { name: String, status: String },

    #[error("Failed to serialize topology: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LaunchError>;
