//! Deployment files: one or more agents declared together in TOML.
//!
//! ```toml
//! name = "warehouse"
//!
//! [[agents]]
//! agent_id = "gripper_a"
//! agent_group = "grippers"
//!
//! [agents.init_params]
//! pddl_file = "package://ros2_bdi_on_webots/pddl/gripper/gripper-domain.pddl"
//!
//! [[agents.actions]]
//! package = "ros2_bdi_on_webots"
//! executable = "gripper_move"
//! instance_name = "gripper_move"
//! ```

pub mod scenarios;
pub mod share;

pub use scenarios::ScenarioRegistry;
pub use share::ShareResolver;

use crate::agents::AgentDefinition;
use crate::composer::{Composer, ResolvedTopology};
use crate::error::{LaunchError, Result};
use crate::schema::ParamValue;
use serde::Deserialize;
use std::path::Path;

/// Prefix selecting a built-in scenario instead of a file, e.g. `scenario:webots`.
pub const SCENARIO_PREFIX: &str = "scenario:";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Deployment {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub agents: Vec<AgentDefinition>,
}

impl Deployment {
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LaunchError::DeploymentNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let mut deployment = Self::parse(&content)?;
        if deployment.name.is_none() {
            deployment.name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().to_string());
        }
        Ok(deployment)
    }

    /// Load a deployment file, or a built-in scenario when `source` is `scenario:<name>`.
    pub fn load(source: &str) -> Result<Self> {
        match source.strip_prefix(SCENARIO_PREFIX) {
            Some(name) => ScenarioRegistry::load(name),
            None => Self::from_file(Path::new(source)),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }

    /// Replace `package://` references in every agent's init parameters
    /// with absolute paths.
    pub fn resolve_paths(&mut self, resolver: &ShareResolver) -> Result<()> {
        for agent in &mut self.agents {
            for value in agent.init_params.values_mut() {
                if let ParamValue::Str(s) = value {
                    *s = resolver.resolve(s)?;
                }
            }
        }
        Ok(())
    }

    /// Keep only the named agent, or every agent when `agent_id` is `None`.
    pub fn select(&self, agent_id: Option<&str>) -> Result<Vec<AgentDefinition>> {
        let Some(agent_id) = agent_id else {
            return Ok(self.agents.clone());
        };

        let selected: Vec<_> = self
            .agents
            .iter()
            .filter(|agent| agent.agent_id == agent_id)
            .cloned()
            .collect();

        if selected.is_empty() {
            return Err(LaunchError::UnknownAgent(agent_id.to_string()));
        }
        Ok(selected)
    }

    /// Compose the selected agents; nothing is returned unless every one composes.
    pub fn compose(
        &self,
        composer: &Composer,
        agent_id: Option<&str>,
    ) -> Result<Vec<ResolvedTopology>> {
        let agents = self.select(agent_id)?;
        tracing::debug!(
            deployment = self.display_name(),
            agents = agents.len(),
            "Composing deployment"
        );
        Ok(composer.compose_fleet(&agents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Violation;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    const TWO_GRIPPERS: &str = r#"
        [[agents]]
        agent_id = "gripper_a"
        agent_group = "grippers"
        [agents.init_params]
        pddl_file = "package://ros2_bdi_on_webots/pddl/gripper-domain.pddl"

        [[agents]]
        agent_id = "gripper_b"
        agent_group = "grippers"
        [agents.init_params]
        pddl_file = "/abs/gripper-domain.pddl"
    "#;

    #[test]
    fn test_from_file_names_after_stem() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("warehouse.toml");
        std::fs::write(&path, TWO_GRIPPERS).unwrap();

        let deployment = Deployment::from_file(&path).unwrap();
        assert_eq!(deployment.display_name(), "warehouse");
        assert_eq!(deployment.agents.len(), 2);
    }

    #[test]
    fn test_missing_file() {
        let err = Deployment::load("/nonexistent/deployment.toml").unwrap_err();
        assert!(matches!(err, LaunchError::DeploymentNotFound(_)));
    }

    #[test]
    fn test_load_builtin_scenario() {
        let deployment = Deployment::load("scenario:webots").unwrap();
        assert_eq!(deployment.display_name(), "webots");
    }

    #[test]
    fn test_select_agent() {
        let deployment = Deployment::parse(TWO_GRIPPERS).unwrap();
        assert_eq!(deployment.select(None).unwrap().len(), 2);

        let selected = deployment.select(Some("gripper_b")).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].agent_id, "gripper_b");

        let err = deployment.select(Some("carrier_a")).unwrap_err();
        assert!(matches!(err, LaunchError::UnknownAgent(ref id) if id == "carrier_a"));
    }

    #[test]
    fn test_resolve_paths() {
        let mut deployment = Deployment::parse(TWO_GRIPPERS).unwrap();
        let explicit = BTreeMap::from([(
            "ros2_bdi_on_webots".to_string(),
            "/ws/install/share/ros2_bdi_on_webots".to_string(),
        )]);
        deployment
            .resolve_paths(&ShareResolver::new(&explicit, vec![]))
            .unwrap();

        assert_eq!(
            deployment.agents[0].init_params["pddl_file"],
            ParamValue::from("/ws/install/share/ros2_bdi_on_webots/pddl/gripper-domain.pddl")
        );
        assert_eq!(
            deployment.agents[1].init_params["pddl_file"],
            ParamValue::from("/abs/gripper-domain.pddl")
        );
    }

    #[test]
    fn test_resolve_paths_unknown_package() {
        let mut deployment = Deployment::parse(TWO_GRIPPERS).unwrap();
        let err = deployment
            .resolve_paths(&ShareResolver::default())
            .unwrap_err();
        assert!(matches!(err, LaunchError::PackageNotFound(_)));
    }

    #[test]
    fn test_misspelled_fields_rejected() {
        for source in [
            "nmae = \"warehouse\"",
            "[[agents]]\nagent_id = \"a\"\nagent_gruop = \"grippers\"",
            "[[agents]]\nagent_id = \"a\"\nrun_only_suport_layer = true",
            "[[agents]]\nagent_id = \"a\"\n[[agents.sensors]]\npackage = \"p\"\nexecutable = \"e\"\ninstance_name = \"n\"\nspecific_param = []",
        ] {
            let err = Deployment::parse(source).unwrap_err();
            assert!(matches!(err, LaunchError::ConfigParse(_)), "{}", source);
        }
    }

    #[test]
    fn test_unsupported_value_shape_reaches_the_report() {
        let deployment = Deployment::parse(
            r#"
            [[agents]]
            agent_id = "a"
            [agents.init_params]
            pddl_file = "/abs/domain.pddl"
            debug_log_active = [1, 2]
            "#,
        )
        .unwrap();

        let err = deployment.compose(&Composer::default(), None).unwrap_err();
        match err {
            LaunchError::Fleet(report) => assert_eq!(
                report.reports[0].violations,
                vec![Violation::TypeMismatch {
                    key: "debug_log_active".into(),
                    expected: "list of strings".into(),
                    found: "list of non-strings".into(),
                }]
            ),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_compose_reports_every_failing_agent() {
        let deployment = Deployment::parse(
            r#"
            [[agents]]
            agent_id = "a"
            [[agents]]
            agent_id = "b"
            "#,
        )
        .unwrap();

        let err = deployment.compose(&Composer::default(), None).unwrap_err();
        match err {
            LaunchError::Fleet(report) => assert_eq!(report.reports.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }
}
