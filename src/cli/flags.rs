use clap::{Parser, ValueEnum};

/// Which deployment to read and which of its agents to act on.
/// Shared by compose, validate and launch.
#[derive(Parser, Debug, Clone, Default)]
pub struct DeploymentArgs {
    /// Deployment file, or scenario:<name> for a built-in scenario
    pub deployment: String,

    /// Only act on the agent with this id
    #[arg(short = 'a', long = "agent")]
    pub agent: Option<String>,

    /// Leave package:// references unresolved instead of locating share directories
    #[arg(long = "no-resolve")]
    pub no_resolve: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
