use super::Deployment;
use crate::error::{LaunchError, Result};

/// Built-in deployments, embedded at compile time.
/// To add one: drop a TOML file in `deployments/` and list it here.
const SCENARIO_FILES: &[(&str, &str)] = &[
    (
        "litter_world",
        include_str!("../../deployments/litter_world.toml"),
    ),
    ("webots", include_str!("../../deployments/webots.toml")),
];

pub struct ScenarioRegistry;

impl ScenarioRegistry {
    pub fn names() -> Vec<&'static str> {
        SCENARIO_FILES.iter().map(|(name, _)| *name).collect()
    }

    pub fn load(name: &str) -> Result<Deployment> {
        let (_, content) = SCENARIO_FILES
            .iter()
            .find(|(id, _)| *id == name)
            .ok_or_else(|| LaunchError::UnknownScenario {
                name: name.to_string(),
                available: Self::names().into_iter().map(str::to_string).collect(),
            })?;

        Deployment::parse(content).map_err(|e| {
            LaunchError::InvalidConfig(format!("Failed to parse scenario '{}': {}", name, e))
        })
    }

    pub fn load_all() -> Result<Vec<Deployment>> {
        Self::names().into_iter().map(Self::load).collect()
    }
}
