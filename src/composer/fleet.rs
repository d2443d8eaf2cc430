use super::{Composer, ResolvedTopology};
use crate::agents::AgentDefinition;
use crate::error::{CompositionReport, FleetReport, Violation};
use std::collections::HashSet;

impl Composer {
    /// Compose every agent of a deployment.
    ///
    /// Agent ids must be unique across the fleet. Nothing is returned unless
    /// every agent composes; otherwise each failing agent gets its own report.
    pub fn compose_fleet(
        &self,
        definitions: &[AgentDefinition],
    ) -> Result<Vec<ResolvedTopology>, FleetReport> {
        let mut seen = HashSet::new();
        let mut topologies = Vec::with_capacity(definitions.len());
        let mut reports = Vec::new();

        for definition in definitions {
            let agent_id = definition.agent_id.trim();
            let duplicate = !agent_id.is_empty() && !seen.insert(agent_id);

            let mut violations = match self.compose(definition) {
                Ok(topology) => {
                    topologies.push(topology);
                    Vec::new()
                }
                Err(report) => report.violations,
            };

            if duplicate {
                violations.insert(
                    0,
                    Violation::DuplicateAgentId {
                        agent_id: agent_id.to_string(),
                    },
                );
            }

            if !violations.is_empty() {
                reports.push(CompositionReport::new(agent_id, violations));
            }
        }

        if reports.is_empty() {
            Ok(topologies)
        } else {
            Err(FleetReport { reports })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(id: &str) -> AgentDefinition {
        AgentDefinition::new(id).with_param("pddl_file", "/share/domain.pddl")
    }

    #[test]
    fn test_fleet_composes_in_order() {
        let fleet = Composer::default()
            .compose_fleet(&[agent("gripper_a"), agent("gripper_b")])
            .unwrap();
        let ids: Vec<_> = fleet.iter().map(|t| t.agent_id()).collect();
        assert_eq!(ids, vec!["gripper_a", "gripper_b"]);
    }

    #[test]
    fn test_duplicate_agent_id() {
        let report = Composer::default()
            .compose_fleet(&[agent("gripper_a"), agent("gripper_a")])
            .unwrap_err();
        assert_eq!(report.reports.len(), 1);
        assert_eq!(
            report.reports[0].violations,
            vec![Violation::DuplicateAgentId {
                agent_id: "gripper_a".into()
            }]
        );
    }

    #[test]
    fn test_fleet_aggregates_every_agent() {
        let broken = AgentDefinition::new("carrier_a");
        let report = Composer::default()
            .compose_fleet(&[agent("gripper_a"), broken, agent("gripper_a")])
            .unwrap_err();
        assert_eq!(report.reports.len(), 2);
        assert!(report.for_agent("carrier_a").is_some());
        assert_eq!(report.violation_count(), 2);
    }
}
