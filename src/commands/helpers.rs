use crate::cli::DeploymentArgs;
use crate::composer::ResolvedTopology;
use crate::config::Config;
use crate::deployment::Deployment;
use crate::error::Result;

/// Load the deployment named on the command line, resolving `package://`
/// references unless `--no-resolve` was given.
pub fn load_deployment(config: &Config, args: &DeploymentArgs) -> Result<Deployment> {
    let mut deployment = Deployment::load(&args.deployment)?;
    if !args.no_resolve {
        deployment.resolve_paths(&config.share_resolver())?;
    }
    Ok(deployment)
}

/// Load, then compose the selected agents with the configured composer.
pub fn compose_selected(config: &Config, args: &DeploymentArgs) -> Result<Vec<ResolvedTopology>> {
    let deployment = load_deployment(config, args)?;
    deployment.compose(&config.composer(), args.agent.as_deref())
}
