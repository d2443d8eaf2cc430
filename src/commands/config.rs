use crate::cli::ConfigCommands;
use crate::config::{Config, CONFIG_FILE_NAME};
use crate::error::Result;
use std::path::{Path, PathBuf};

pub fn execute(command: &ConfigCommands, explicit: Option<&Path>) -> Result<()> {
    match command {
        ConfigCommands::Validate { file } => validate(file.as_deref().or(explicit)),
        ConfigCommands::Show => show(explicit),
    }
}

fn project_root() -> Result<PathBuf> {
    Ok(std::env::current_dir()?)
}

fn validate(file: Option<&Path>) -> Result<()> {
    let project_config = project_root()?.join(CONFIG_FILE_NAME);
    let global_config = std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(CONFIG_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from("~").join(CONFIG_FILE_NAME));

    println!("Validating configuration files...\n");

    for (label, path) in [("Global", &global_config), ("Project", &project_config)] {
        if path.exists() {
            println!("  {} config: {}", label, path.display());
        } else {
            println!("  {} config: {} - not found (optional)", label, path.display());
        }
    }
    if let Some(file) = file {
        println!("  Explicit config: {}", file.display());
    }

    println!("\nLoading and validating configuration...");
    let result = Config::load(&project_root()?, file).and_then(|config| {
        config.validate()?;
        Ok(config)
    });

    match result {
        Ok(config) => {
            for (package, dir) in &config.share {
                if !crate::utils::path::expand_tilde(dir)
                    .unwrap_or_else(|| PathBuf::from(dir))
                    .is_dir()
                {
                    println!("  ! share directory for '{}' does not exist: {}", package, dir);
                }
            }
            println!("✓ Configuration is valid!");
            Ok(())
        }
        Err(e) => {
            println!("✗ Configuration is invalid!");
            println!("  Error: {}", e);
            Err(e)
        }
    }
}

fn show(explicit: Option<&Path>) -> Result<()> {
    let config = Config::load(&project_root()?, explicit)?;

    println!("Effective Configuration:");
    println!("(CLI > Environment > --config file > Project config > Global config > Defaults)\n");

    println!("Infrastructure:");
    println!("  package: {}", config.infrastructure.package);
    println!("  belief_manager: {}", config.infrastructure.belief_manager);
    println!("  scheduler: {}", config.infrastructure.scheduler);
    println!("  planner_bridge: {}", config.infrastructure.planner_bridge);

    println!("\nSensors:");
    println!("  init_sleep: {}s", config.sensors.init_sleep);
    println!("  sensing_freq: {}Hz", config.sensors.sensing_freq);

    println!("\nPolicy:");
    println!("  offline: {}", join(&config.policy.offline));
    println!("  online: {}", join(&config.policy.online));

    if !config.share.is_empty() {
        println!("\nShare directories:");
        for (package, dir) in &config.share {
            println!("  {} -> {}", package, dir);
        }
    }

    if !config.ament_prefixes.is_empty() {
        println!("\nInstall prefixes (AMENT_PREFIX_PATH):");
        for prefix in &config.ament_prefixes {
            println!("  - {}", prefix.display());
        }
    }

    println!("\nLogging:");
    println!("  level: {}", config.logging.level);
    println!("  format: {:?}", config.logging.format);

    Ok(())
}

fn join<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
