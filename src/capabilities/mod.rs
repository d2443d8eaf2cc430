//! Capability system: the actions and sensors an agent exposes.
//!
//! Every capability becomes one launch unit. Its parameters are built in
//! layers, later layers overriding earlier ones:
//!
//! 1. the shared agent identity (`agent_id`, `agent_group`)
//! 2. role defaults (sensors get `init_sleep` and `sensing_freq`)
//! 3. the capability's own `specific_params`, in declaration order
//!
//! # Example
//!
//! ```toml
//! [[agents.sensors]]
//! package = "ros2_bdi_on_litter_world"
//! executable = "load_map_sensor"
//! instance_name = "plastic_agent_load_map"
//! specific_params = [{ init_sleep = 2 }, { sensing_freq = 1.0 }]
//! ```

pub mod definition;

pub use definition::{CapabilityDescriptor, CapabilityRef, CapabilityRole, SpecificParam};

use crate::schema::{ParamKey, ParamMap, ParamValue};
use serde::{Deserialize, Serialize};

pub const INIT_SLEEP_PARAM: &str = "init_sleep";
pub const SENSING_FREQ_PARAM: &str = "sensing_freq";

/// Keys owned by the agent that capability overrides may not replace.
pub const RESERVED_PARAMS: [ParamKey; 2] = [ParamKey::AgentId, ParamKey::AgentGroup];

/// Timing defaults threaded into every sensor that does not set them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorDefaults {
    /// Seconds to wait before the first reading.
    #[serde(default = "default_init_sleep")]
    pub init_sleep: i64,

    /// Readings per second.
    #[serde(default = "default_sensing_freq")]
    pub sensing_freq: f64,
}

impl Default for SensorDefaults {
    fn default() -> Self {
        Self {
            init_sleep: default_init_sleep(),
            sensing_freq: default_sensing_freq(),
        }
    }
}

fn default_init_sleep() -> i64 {
    2
}

fn default_sensing_freq() -> f64 {
    1.0
}

pub fn is_reserved(key: &str) -> bool {
    RESERVED_PARAMS.iter().any(|reserved| reserved.as_str() == key)
}

/// Build the parameter set a capability process receives.
pub fn resolve_params(
    descriptor: &CapabilityDescriptor,
    role: CapabilityRole,
    agent_id: &str,
    agent_group: &str,
    sensor_defaults: &SensorDefaults,
) -> ParamMap {
    let mut params = ParamMap::new();
    params.insert(
        ParamKey::AgentId.as_str().to_string(),
        ParamValue::Str(agent_id.to_string()),
    );
    params.insert(
        ParamKey::AgentGroup.as_str().to_string(),
        ParamValue::Str(agent_group.to_string()),
    );

    if role == CapabilityRole::Sensor {
        params.insert(
            INIT_SLEEP_PARAM.to_string(),
            ParamValue::Int(sensor_defaults.init_sleep),
        );
        params.insert(
            SENSING_FREQ_PARAM.to_string(),
            ParamValue::Float(sensor_defaults.sensing_freq),
        );
    }

    for param in descriptor.specific_params() {
        if is_reserved(&param.key) {
            continue;
        }
        params.insert(param.key.clone(), param.value.clone());
    }

    params
}
