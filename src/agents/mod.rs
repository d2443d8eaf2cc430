//! Agent definitions: identity, tuning parameters and capabilities.
//!
//! # Example
//!
//! ```toml
//! [[agents]]
//! agent_id = "plastic_agent"
//! agent_group = "recyclers"
//!
//! [agents.init_params]
//! pddl_file = "package://ros2_bdi_on_litter_world/pddl/recycling-agent-domain.pddl"
//! planning_mode = "online"
//! reschedule_policy = "CLEAN_PREEMPT"
//!
//! [[agents.actions]]
//! package = "ros2_bdi_on_litter_world"
//! executable = "move"
//! instance_name = "plastic_agent_move"
//! ```

pub mod definition;

pub use definition::AgentDefinition;
