#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;

use bdi_launch::cli::{Cli, Commands};
use bdi_launch::commands;
use bdi_launch::config::Config;
use bdi_launch::logging::{init_logging, LoggingConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config commands report on broken files themselves
    if let Commands::Config { command } = &cli.command {
        init_logging(&LoggingConfig::default(), cli.verbose)?;
        commands::config::execute(command, cli.config.as_deref())?;
        return Ok(());
    }

    let project_root = std::env::current_dir()?;
    let config = Config::load(&project_root, cli.config.as_deref())?.with_cli_overrides(&cli);
    init_logging(&config.logging, config.verbose)?;
    config.validate()?;

    match &cli.command {
        Commands::Compose(cmd) => commands::compose::execute(&config, cmd)?,
        Commands::Validate(args) => commands::validate::execute(&config, args)?,
        Commands::Launch(cmd) => commands::launch::execute(&config, cmd)?,
        Commands::Schema { format } => commands::schema::execute(*format)?,
        Commands::Scenarios => commands::scenarios::execute()?,
        Commands::Config { .. } => unreachable!(),
    }

    Ok(())
}
