use crate::capabilities::CapabilityRole;
use crate::schema::{ParamMap, ParamValue};
use serde::Serialize;
use std::fmt::{self, Write};

/// What a launch unit does within the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitRole {
    BeliefManager,
    Scheduler,
    PlannerBridge,
    Action,
    Sensor,
}

impl UnitRole {
    pub const INFRASTRUCTURE: [UnitRole; 3] = [
        UnitRole::BeliefManager,
        UnitRole::Scheduler,
        UnitRole::PlannerBridge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitRole::BeliefManager => "belief_manager",
            UnitRole::Scheduler => "scheduler",
            UnitRole::PlannerBridge => "planner_bridge",
            UnitRole::Action => "action",
            UnitRole::Sensor => "sensor",
        }
    }

    pub fn is_infrastructure(&self) -> bool {
        !matches!(self, UnitRole::Action | UnitRole::Sensor)
    }
}

impl From<CapabilityRole> for UnitRole {
    fn from(role: CapabilityRole) -> Self {
        match role {
            CapabilityRole::Action => UnitRole::Action,
            CapabilityRole::Sensor => UnitRole::Sensor,
        }
    }
}

impl fmt::Display for UnitRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One process of the agent, with everything it receives at start-up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchUnit {
    pub role: UnitRole,
    /// Namespace shared by every process of the agent (the agent id).
    pub namespace: String,
    pub instance_name: String,
    pub package: String,
    pub executable: String,
    pub resolved_params: ParamMap,
}

impl LaunchUnit {
    pub fn param(&self, key: &str) -> Option<&ParamValue> {
        self.resolved_params.get(key)
    }
}

/// The ordered process topology of one agent.
///
/// Infrastructure units always come first, then actions, then sensors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedTopology {
    agent_id: String,
    agent_group: String,
    units: Vec<LaunchUnit>,
}

impl ResolvedTopology {
    pub(crate) fn new(agent_id: String, agent_group: String, units: Vec<LaunchUnit>) -> Self {
        Self {
            agent_id,
            agent_group,
            units,
        }
    }

    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    pub fn agent_group(&self) -> &str {
        &self.agent_group
    }

    pub fn units(&self) -> &[LaunchUnit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn infrastructure(&self) -> impl Iterator<Item = &LaunchUnit> {
        self.units.iter().filter(|u| u.role.is_infrastructure())
    }

    pub fn capabilities(&self) -> impl Iterator<Item = &LaunchUnit> {
        self.units.iter().filter(|u| !u.role.is_infrastructure())
    }

    pub fn unit(&self, role: UnitRole) -> Option<&LaunchUnit> {
        self.units.iter().find(|u| u.role == role)
    }

    pub fn find(&self, instance_name: &str) -> Option<&LaunchUnit> {
        self.units.iter().find(|u| u.instance_name == instance_name)
    }

    /// Digest of the topology's canonical text form.
    ///
    /// Two compositions of the same definition always share a fingerprint.
    pub fn fingerprint(&self) -> String {
        let mut canonical = String::new();
        // writing to a String cannot fail
        let _ = writeln!(canonical, "{}|{}", self.agent_id, self.agent_group);
        for unit in &self.units {
            let _ = write!(
                canonical,
                "{}|{}|{}|{}|{}",
                unit.role, unit.namespace, unit.instance_name, unit.package, unit.executable
            );
            for (key, value) in &unit.resolved_params {
                let _ = write!(canonical, "|{}:{}={}", key, value.kind(), value);
            }
            canonical.push('\n');
        }
        format!("{:x}", md5::compute(canonical.as_bytes()))
    }
}
