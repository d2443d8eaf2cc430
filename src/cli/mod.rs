use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod flags;
pub use flags::{DeploymentArgs, OutputFormat};

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Validate configuration files
    Validate {
        /// Optional path to a specific config file to validate
        file: Option<PathBuf>,
    },

    /// Show effective configuration after merging all sources
    Show,
}

#[derive(Parser, Debug)]
#[command(name = "bdi-launch")]
#[command(about = "Compose and launch BDI agents on ROS 2", long_about = None)]
#[command(version = env!("BDI_LAUNCH_VERSION"))]
#[command(after_help = "\
EXAMPLES:
  bdi-launch validate warehouse.toml          Check every agent of a deployment
  bdi-launch compose scenario:webots          Print the topology of a built-in scenario
  bdi-launch compose fleet.toml -a gripper_a --format json
  bdi-launch launch fleet.toml --dry-run      Print the ros2 commands without running them

For details about a specific command, use:
  bdi-launch <command> --help")]
pub struct Cli {
    /// Show debug logs
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Read this config file after the global and project ones
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the resolved launch topology of each agent
    Compose(ComposeCmd),

    /// Check that every agent of a deployment composes
    #[command(
        long_about = "Check that every agent of a deployment composes.\n\n\
        All violations of all agents are reported at once. Exits non-zero\n\
        when any agent is misconfigured."
    )]
    Validate(DeploymentArgs),

    /// Compose, then start every unit in topology order
    Launch(LaunchCmd),

    /// List the recognized agent parameters
    Schema {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List built-in scenarios
    Scenarios,

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Parser, Debug)]
pub struct ComposeCmd {
    #[command(flatten)]
    pub target: DeploymentArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct LaunchCmd {
    #[command(flatten)]
    pub target: DeploymentArgs,

    /// Print the commands instead of running them
    #[arg(long)]
    pub dry_run: bool,

    /// Milliseconds each support unit must stay up before the next starts
    #[arg(long, default_value = "1500")]
    pub grace_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_compose() {
        let cli = Cli::parse_from([
            "bdi-launch",
            "compose",
            "scenario:webots",
            "--agent",
            "gripper_a",
            "--format",
            "json",
            "-v",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Compose(cmd) => {
                assert_eq!(cmd.target.deployment, "scenario:webots");
                assert_eq!(cmd.target.agent.as_deref(), Some("gripper_a"));
                assert_eq!(cmd.format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_launch_defaults() {
        let cli = Cli::parse_from(["bdi-launch", "launch", "fleet.toml", "--dry-run"]);
        match cli.command {
            Commands::Launch(cmd) => {
                assert!(cmd.dry_run);
                assert_eq!(cmd.grace_ms, 1500);
                assert!(!cmd.target.no_resolve);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::parse_from(["bdi-launch", "scenarios", "--config", "ci.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("ci.toml")));
    }
}
