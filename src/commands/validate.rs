use super::helpers::compose_selected;
use crate::cli::DeploymentArgs;
use crate::config::Config;
use crate::error::Result;

pub fn execute(config: &Config, args: &DeploymentArgs) -> Result<()> {
    println!("Validating {}...\n", args.deployment);

    match compose_selected(config, args) {
        Ok(topologies) => {
            for topology in &topologies {
                println!(
                    "  ✓ {} ({} units)",
                    topology.agent_id(),
                    topology.len()
                );
            }
            println!("\n✓ Deployment is valid!");
            Ok(())
        }
        Err(e) => {
            println!("✗ Deployment is invalid!");
            Err(e)
        }
    }
}
