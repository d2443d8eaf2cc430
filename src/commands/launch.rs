use super::helpers::compose_selected;
use crate::cli::LaunchCmd;
use crate::config::Config;
use crate::error::Result;
use crate::launcher::{self, DryRunLauncher, ProcessLauncher, Ros2Launcher};
use std::time::Duration;

pub fn execute(config: &Config, cmd: &LaunchCmd) -> Result<()> {
    let topologies = compose_selected(config, &cmd.target)?;

    if cmd.dry_run {
        let mut dry_run = DryRunLauncher::new();
        launcher::launch(&topologies, &mut dry_run)?;
        for command in dry_run.commands() {
            println!("{}", command);
        }
        return Ok(());
    }

    let mut ros2 = Ros2Launcher::locate(Duration::from_millis(cmd.grace_ms))?;
    launcher::launch(&topologies, &mut ros2)?;
    println!(
        "Started {} unit(s) for {} agent(s). Press Ctrl-C to stop.",
        ros2.running(),
        topologies.len()
    );
    ros2.wait()
}
