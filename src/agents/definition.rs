//! The declarative description of one agent.

use crate::capabilities::{CapabilityDescriptor, CapabilityRole};
use crate::schema::{ParamMap, ParamValue};
use serde::Deserialize;

/// One agent of the fleet, as a deployment declares it.
///
/// `init_params` is unvalidated until the agent is composed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentDefinition {
    pub agent_id: String,

    /// Group tag for group-addressed coordination; defaults to the agent id.
    #[serde(default)]
    pub agent_group: Option<String>,

    #[serde(default)]
    pub init_params: ParamMap,

    #[serde(default)]
    pub actions: Vec<CapabilityDescriptor>,

    #[serde(default)]
    pub sensors: Vec<CapabilityDescriptor>,

    /// Start only the belief manager, scheduler and planner bridge.
    #[serde(default, alias = "run_only_psys2")]
    pub run_only_support_layer: bool,
}

impl AgentDefinition {
    pub fn new(agent_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            agent_group: None,
            init_params: ParamMap::new(),
            actions: Vec::new(),
            sensors: Vec::new(),
            run_only_support_layer: false,
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.agent_group = Some(group.into());
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.init_params.insert(key.into(), value.into());
        self
    }

    pub fn with_action(mut self, action: CapabilityDescriptor) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_sensor(mut self, sensor: CapabilityDescriptor) -> Self {
        self.sensors.push(sensor);
        self
    }

    pub fn support_layer_only(mut self, enabled: bool) -> Self {
        self.run_only_support_layer = enabled;
        self
    }

    /// Actions then sensors, each with its role and position in its own list.
    pub fn capabilities(
        &self,
    ) -> impl Iterator<Item = (CapabilityRole, usize, &CapabilityDescriptor)> + '_ {
        let actions = self
            .actions
            .iter()
            .enumerate()
            .map(|(i, d)| (CapabilityRole::Action, i, d));
        let sensors = self
            .sensors
            .iter()
            .enumerate()
            .map(|(i, d)| (CapabilityRole::Sensor, i, d));
        actions.chain(sensors)
    }

    pub fn capability_count(&self) -> usize {
        self.actions.len() + self.sensors.len()
    }
}
