//! Agent composition: turns an [`AgentDefinition`] into a [`ResolvedTopology`].
//!
//! Composition is a pre-flight gate. It runs every check, collects every
//! violation into one [`CompositionReport`], and only emits a topology when
//! nothing was found. Steps, in order:
//!
//! 1. identity: non-empty `agent_id`, `agent_group` defaulting to the id
//! 2. parameters: schema validation, required keys, default injection
//! 3. cross-key consistency: planning mode x reschedule policy matrix
//! 4. capabilities: pairwise distinct instance names that leave the support
//!    unit names free, no reserved overrides, supported value shapes
//! 5. emission: belief manager, scheduler, planner bridge, actions, sensors

pub mod fleet;
pub mod policy;
pub mod topology;

pub use policy::PolicyMatrix;
pub use topology::{LaunchUnit, ResolvedTopology, UnitRole};

use crate::agents::AgentDefinition;
use crate::capabilities::{self, CapabilityRef, SensorDefaults};
use crate::error::{CompositionReport, Violation};
use crate::schema::{
    ParamKey, ParamMap, ParamValue, ParameterSchema, PlanningMode, ReschedulePolicy,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// Where the three support processes of every agent live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfrastructureLayout {
    #[serde(default = "default_infrastructure_package")]
    pub package: String,

    #[serde(default = "default_belief_manager")]
    pub belief_manager: String,

    #[serde(default = "default_scheduler")]
    pub scheduler: String,

    #[serde(default = "default_planner_bridge")]
    pub planner_bridge: String,
}

impl Default for InfrastructureLayout {
    fn default() -> Self {
        Self {
            package: default_infrastructure_package(),
            belief_manager: default_belief_manager(),
            scheduler: default_scheduler(),
            planner_bridge: default_planner_bridge(),
        }
    }
}

fn default_infrastructure_package() -> String {
    "ros2_bdi_core".to_string()
}

fn default_belief_manager() -> String {
    "belief_manager".to_string()
}

fn default_scheduler() -> String {
    "scheduler".to_string()
}

fn default_planner_bridge() -> String {
    "planner_bridge".to_string()
}

impl InfrastructureLayout {
    pub fn executable(&self, role: UnitRole) -> Option<&str> {
        match role {
            UnitRole::BeliefManager => Some(&self.belief_manager),
            UnitRole::Scheduler => Some(&self.scheduler),
            UnitRole::PlannerBridge => Some(&self.planner_bridge),
            UnitRole::Action | UnitRole::Sensor => None,
        }
    }
}

/// Composes agent definitions under one policy matrix and set of defaults.
#[derive(Debug, Clone, Default)]
pub struct Composer {
    pub policy: PolicyMatrix,
    pub sensor_defaults: SensorDefaults,
    pub infrastructure: InfrastructureLayout,
}

struct Identity {
    agent_id: String,
    agent_group: String,
}

/// Compose with the built-in policy matrix and defaults.
pub fn compose(definition: &AgentDefinition) -> Result<ResolvedTopology, CompositionReport> {
    Composer::default().compose(definition)
}

impl Composer {
    pub fn compose(
        &self,
        definition: &AgentDefinition,
    ) -> Result<ResolvedTopology, CompositionReport> {
        let mut violations = Vec::new();

        let identity = check_identity(definition, &mut violations);
        let params = resolve_params(definition, &identity, &mut violations);
        self.check_policy(definition, &params, &mut violations);
        check_capabilities(definition, &mut violations);

        if !violations.is_empty() {
            debug!(
                agent_id = %definition.agent_id,
                violations = violations.len(),
                "Composition rejected"
            );
            return Err(CompositionReport::new(
                definition.agent_id.clone(),
                violations,
            ));
        }

        let units = self.emit_units(definition, &identity, &params);
        info!(
            agent_id = %identity.agent_id,
            agent_group = %identity.agent_group,
            units = units.len(),
            support_layer_only = definition.run_only_support_layer,
            "Composed launch topology"
        );

        Ok(ResolvedTopology::new(
            identity.agent_id,
            identity.agent_group,
            units,
        ))
    }

    fn check_policy(
        &self,
        definition: &AgentDefinition,
        params: &ParamMap,
        violations: &mut Vec<Violation>,
    ) {
        // Earlier steps already reported malformed values; only judge legal ones.
        let mode = params
            .get(ParamKey::PlanningMode.as_str())
            .and_then(ParamValue::as_str)
            .and_then(PlanningMode::from_str);
        let policy = params
            .get(ParamKey::ReschedulePolicy.as_str())
            .and_then(ParamValue::as_str)
            .and_then(ReschedulePolicy::from_str);

        let (Some(mode), Some(policy)) = (mode, policy) else {
            return;
        };

        if let Err(violation) = self.policy.check(mode, policy) {
            violations.push(violation);
        }

        if mode == PlanningMode::Offline {
            for name in definition.init_params.keys() {
                if ParamKey::from_str(name).is_some_and(|key| key.inert_offline()) {
                    debug!(
                        agent_id = %definition.agent_id,
                        key = %name,
                        "Parameter has no effect in offline planning mode"
                    );
                }
            }
        }
    }

    fn emit_units(
        &self,
        definition: &AgentDefinition,
        identity: &Identity,
        params: &ParamMap,
    ) -> Vec<LaunchUnit> {
        let mut units = Vec::with_capacity(3 + definition.capability_count());

        for role in UnitRole::INFRASTRUCTURE {
            let executable = self.infrastructure.executable(role).unwrap_or(role.as_str());
            units.push(LaunchUnit {
                role,
                namespace: identity.agent_id.clone(),
                instance_name: role.as_str().to_string(),
                package: self.infrastructure.package.clone(),
                executable: executable.to_string(),
                resolved_params: params.clone(),
            });
        }

        if definition.run_only_support_layer {
            debug!(
                agent_id = %identity.agent_id,
                skipped = definition.capability_count(),
                "Support layer only, capability units skipped"
            );
            return units;
        }

        for (role, _, descriptor) in definition.capabilities() {
            units.push(LaunchUnit {
                role: role.into(),
                namespace: identity.agent_id.clone(),
                instance_name: descriptor.instance_name().to_string(),
                package: descriptor.package().to_string(),
                executable: descriptor.executable().to_string(),
                resolved_params: capabilities::resolve_params(
                    descriptor,
                    role,
                    &identity.agent_id,
                    &identity.agent_group,
                    &self.sensor_defaults,
                ),
            });
        }

        units
    }
}

fn check_identity(definition: &AgentDefinition, violations: &mut Vec<Violation>) -> Identity {
    let agent_id = definition.agent_id.trim().to_string();
    if agent_id.is_empty() {
        violations.push(Violation::MissingRequiredParameter {
            key: ParamKey::AgentId.as_str().to_string(),
        });
    }

    let declared_group = definition
        .agent_group
        .as_deref()
        .map(str::trim)
        .filter(|g| !g.is_empty());
    let param_group = definition
        .init_params
        .get(ParamKey::AgentGroup.as_str())
        .and_then(ParamValue::as_str)
        .map(str::trim)
        .filter(|g| !g.is_empty());

    let agent_group = declared_group
        .or(param_group)
        .map(str::to_string)
        .unwrap_or_else(|| agent_id.clone());

    for (key, expected) in [
        (ParamKey::AgentId, agent_id.as_str()),
        (ParamKey::AgentGroup, agent_group.as_str()),
    ] {
        if let Some(ParamValue::Str(found)) = definition.init_params.get(key.as_str()) {
            if !found.trim().is_empty() && found.trim() != expected {
                violations.push(Violation::IdentityConflict {
                    key: key.as_str().to_string(),
                    expected: expected.to_string(),
                    found: found.clone(),
                });
            }
        }
    }

    Identity {
        agent_id,
        agent_group,
    }
}

fn resolve_params(
    definition: &AgentDefinition,
    identity: &Identity,
    violations: &mut Vec<Violation>,
) -> ParamMap {
    let schema = ParameterSchema::standard();
    let mut params = ParamMap::new();

    for (name, value) in &definition.init_params {
        match schema.validate(name, value) {
            Ok(normalized) => {
                params.insert(name.clone(), normalized);
            }
            Err(violation) => violations.push(violation),
        }
    }

    // Identity fields are authoritative; conflicts were reported above.
    params.insert(
        ParamKey::AgentId.as_str().to_string(),
        ParamValue::Str(identity.agent_id.clone()),
    );
    params.insert(
        ParamKey::AgentGroup.as_str().to_string(),
        ParamValue::Str(identity.agent_group.clone()),
    );

    for spec in schema.specs() {
        let name = spec.key.as_str();
        if spec.key == ParamKey::AgentId {
            continue;
        }

        match (spec.default_value(), params.get(name)) {
            (None, None) => {
                if !definition.init_params.contains_key(name) {
                    violations.push(Violation::MissingRequiredParameter {
                        key: name.to_string(),
                    });
                }
            }
            (None, Some(ParamValue::Str(s))) if s.trim().is_empty() => {
                violations.push(Violation::MissingRequiredParameter {
                    key: name.to_string(),
                })
            }
            (Some(default), None) => {
                // A key that failed validation stays reported, not silently defaulted.
                if definition.init_params.contains_key(name) {
                    continue;
                }
                let value = default.resolve(&identity.agent_id, &identity.agent_group);
                debug!(
                    agent_id = %identity.agent_id,
                    key = name,
                    value = %value,
                    "Injected default"
                );
                params.insert(name.to_string(), value);
            }
            _ => {}
        }
    }

    params
}

fn check_capabilities(definition: &AgentDefinition, violations: &mut Vec<Violation>) {
    let mut seen: HashMap<&str, CapabilityRef> = HashMap::new();

    for (role, position, descriptor) in definition.capabilities() {
        let reference = descriptor.reference(role, position);

        for param in descriptor.specific_params() {
            if capabilities::is_reserved(&param.key) {
                violations.push(Violation::ReservedCapabilityParameter {
                    capability: reference.clone(),
                    key: param.key.clone(),
                });
            }
            if !param.value.is_supported() {
                violations.push(Violation::UnsupportedCapabilityParameter {
                    capability: reference.clone(),
                    key: param.key.clone(),
                    found: param.value.kind().to_string(),
                });
            }
        }

        // Support units share the agent namespace with every capability.
        let name = descriptor.instance_name();
        if UnitRole::INFRASTRUCTURE.iter().any(|unit| unit.as_str() == name) {
            violations.push(Violation::SupportUnitNameClash {
                capability: reference,
                name: name.to_string(),
            });
            continue;
        }

        match seen.get(name) {
            Some(first) => violations.push(Violation::DuplicateCapabilityName {
                name: descriptor.instance_name().to_string(),
                first: first.clone(),
                second: reference,
            }),
            None => {
                seen.insert(descriptor.instance_name(), reference);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::CapabilityDescriptor;

    fn minimal(agent_id: &str) -> AgentDefinition {
        AgentDefinition::new(agent_id).with_param("pddl_file", "/share/domain.pddl")
    }

    fn action(name: &str) -> CapabilityDescriptor {
        CapabilityDescriptor::new("ros2_bdi_on_webots", name, name).unwrap()
    }

    #[test]
    fn test_minimal_definition_composes() {
        let topology = compose(&minimal("gripper_a")).unwrap();
        assert_eq!(topology.len(), 3);
        assert_eq!(topology.agent_group(), "gripper_a");
        let roles: Vec<_> = topology.units().iter().map(|u| u.role).collect();
        assert_eq!(roles, UnitRole::INFRASTRUCTURE.to_vec());
    }

    #[test]
    fn test_infrastructure_units_share_full_params() {
        let topology = compose(&minimal("gripper_a")).unwrap();
        let schema = ParameterSchema::standard();
        for unit in topology.infrastructure() {
            assert_eq!(unit.resolved_params.len(), schema.specs().len());
            assert_eq!(unit.namespace, "gripper_a");
            assert_eq!(unit.package, "ros2_bdi_core");
        }
    }

    #[test]
    fn test_empty_agent_id() {
        let report = compose(&minimal("  ")).unwrap_err();
        assert!(report.violations.contains(&Violation::MissingRequiredParameter {
            key: "agent_id".into()
        }));
    }

    #[test]
    fn test_empty_pddl_file_is_missing() {
        let definition = AgentDefinition::new("a").with_param("pddl_file", "");
        let report = compose(&definition).unwrap_err();
        assert_eq!(
            report.violations,
            vec![Violation::MissingRequiredParameter {
                key: "pddl_file".into()
            }]
        );
    }

    #[test]
    fn test_group_from_init_params() {
        let definition = minimal("gripper_a").with_param("agent_group", "grippers");
        let topology = compose(&definition).unwrap();
        assert_eq!(topology.agent_group(), "grippers");
        assert_eq!(
            topology.units()[0].param("belief_ck"),
            Some(&ParamValue::from(vec!["grippers"]))
        );
    }

    #[test]
    fn test_identity_conflict() {
        let definition = minimal("gripper_a")
            .with_group("grippers")
            .with_param("agent_id", "gripper_b");
        let report = compose(&definition).unwrap_err();
        assert_eq!(
            report.violations,
            vec![Violation::IdentityConflict {
                key: "agent_id".into(),
                expected: "gripper_a".into(),
                found: "gripper_b".into(),
            }]
        );
    }

    #[test]
    fn test_invalid_value_is_not_replaced_by_default() {
        let definition = minimal("a").with_param("min_commit_steps", "one");
        let report = compose(&definition).unwrap_err();
        assert_eq!(report.len(), 1);
        assert!(matches!(
            report.violations[0],
            Violation::TypeMismatch { ref key, .. } if key == "min_commit_steps"
        ));
    }

    #[test]
    fn test_widened_override_allows_online_no_preempt() {
        let composer = Composer {
            policy: PolicyMatrix {
                online: ReschedulePolicy::ALL.to_vec(),
                ..PolicyMatrix::default()
            },
            ..Composer::default()
        };
        let definition = minimal("a")
            .with_param("planning_mode", "online")
            .with_param("reschedule_policy", "NO_PREEMPT");
        assert!(composer.compose(&definition).is_ok());
        assert!(compose(&definition).is_err());
    }

    #[test]
    fn test_offline_accepts_inert_keys() {
        let definition = minimal("a")
            .with_param("planning_mode", "offline")
            .with_param("search_interval", 250)
            .with_param("reschedule_policy", "NO_PREEMPT");
        let topology = compose(&definition).unwrap();
        assert_eq!(
            topology.units()[2].param("search_interval"),
            Some(&ParamValue::Int(250))
        );
    }

    #[test]
    fn test_policy_not_judged_when_mode_invalid() {
        let definition = minimal("a")
            .with_param("planning_mode", "hybrid")
            .with_param("reschedule_policy", "NO_PREEMPT");
        let report = compose(&definition).unwrap_err();
        assert_eq!(report.len(), 1);
        assert!(matches!(
            report.violations[0],
            Violation::IllegalEnumValue { .. }
        ));
    }

    #[test]
    fn test_reserved_capability_param() {
        let definition = minimal("a").with_action(action("move").with_param("agent_group", "x"));
        let report = compose(&definition).unwrap_err();
        assert!(matches!(
            report.violations[0],
            Violation::ReservedCapabilityParameter { ref key, .. } if key == "agent_group"
        ));
    }

    #[test]
    fn test_capability_named_after_support_unit() {
        let definition = minimal("a")
            .with_action(action("scheduler"))
            .with_sensor(CapabilityDescriptor::new("p", "bm_sensor", "belief_manager").unwrap())
            .with_action(action("move"));
        let report = compose(&definition).unwrap_err();
        assert_eq!(report.len(), 2, "{}", report);
        let clashes: Vec<_> = report
            .violations
            .iter()
            .map(|v| match v {
                Violation::SupportUnitNameClash { capability, name } => {
                    assert_eq!(&capability.instance_name, name);
                    name.as_str()
                }
                other => panic!("unexpected violation: {}", other),
            })
            .collect();
        assert_eq!(clashes, vec!["scheduler", "belief_manager"]);
    }

    #[test]
    fn test_unsupported_value_shapes_are_reported() {
        let ints = toml::Value::Array(vec![toml::Value::Integer(1), toml::Value::Integer(2)]);
        let definition = minimal("a")
            .with_param("debug_log_active", ParamValue::Unsupported(ints.clone()))
            .with_param("serach_interval", 100)
            .with_action(action("move").with_param("speeds", ParamValue::Unsupported(ints)));
        let report = compose(&definition).unwrap_err();
        assert_eq!(report.len(), 3, "{}", report);
        assert!(report.violations.contains(&Violation::TypeMismatch {
            key: "debug_log_active".into(),
            expected: "list of strings".into(),
            found: "list of non-strings".into(),
        }));
        assert!(report.violations.iter().any(|v| matches!(
            v,
            Violation::UnsupportedCapabilityParameter { key, found, .. }
                if key == "speeds" && found == "list of non-strings"
        )));
    }

    #[test]
    fn test_action_and_sensor_share_a_name() {
        let definition = minimal("a")
            .with_action(action("status"))
            .with_sensor(CapabilityDescriptor::new("p", "status_sensor", "status").unwrap());
        let report = compose(&definition).unwrap_err();
        match &report.violations[0] {
            Violation::DuplicateCapabilityName {
                name,
                first,
                second,
            } => {
                assert_eq!(name, "status");
                assert_eq!(first.role, crate::capabilities::CapabilityRole::Action);
                assert_eq!(second.role, crate::capabilities::CapabilityRole::Sensor);
            }
            other => panic!("unexpected violation: {}", other),
        }
    }

    #[test]
    fn test_every_violation_is_reported() {
        let definition = AgentDefinition::new("a")
            .with_param("planning_mode", "online")
            .with_param("reschedule_policy", "NO_PREEMPT")
            .with_param("serach_interval", 100)
            .with_action(action("move"))
            .with_action(action("move"));
        let report = compose(&definition).unwrap_err();
        assert_eq!(report.len(), 4, "{}", report);
    }

    #[test]
    fn test_custom_infrastructure_layout() {
        let composer = Composer {
            infrastructure: InfrastructureLayout {
                planner_bridge: "javaff_server".into(),
                ..InfrastructureLayout::default()
            },
            ..Composer::default()
        };
        let topology = composer.compose(&minimal("a")).unwrap();
        let bridge = topology.unit(UnitRole::PlannerBridge).unwrap();
        assert_eq!(bridge.executable, "javaff_server");
        assert_eq!(bridge.instance_name, "planner_bridge");
    }
}
