//! Starting a composed topology.
//!
//! Units are handed to a [`ProcessLauncher`] strictly in topology order, so
//! the belief manager, scheduler and planner bridge are always up before any
//! action or sensor.

pub mod command;
pub mod ros2;

pub use command::RunCommand;
pub use ros2::Ros2Launcher;

use crate::composer::{LaunchUnit, ResolvedTopology};
use crate::error::Result;

pub trait ProcessLauncher {
    fn start(&mut self, unit: &LaunchUnit) -> Result<()>;

    /// Stop everything started so far, newest first.
    fn stop_all(&mut self);

    /// Block until every started unit has exited.
    fn wait(&mut self) -> Result<()>;
}

/// Start every unit of every topology; on the first failure, stop what was
/// already started and return the error.
pub fn launch(topologies: &[ResolvedTopology], launcher: &mut dyn ProcessLauncher) -> Result<()> {
    for topology in topologies {
        tracing::info!(
            agent_id = topology.agent_id(),
            units = topology.len(),
            fingerprint = %topology.fingerprint(),
            "Launching agent"
        );
        for unit in topology.units() {
            if let Err(e) = launcher.start(unit) {
                tracing::warn!(unit = %unit.instance_name, error = %e, "Launch aborted");
                launcher.stop_all();
                return Err(e);
            }
        }
    }
    Ok(())
}

/// Records the commands that would be run instead of running them.
#[derive(Debug, Default)]
pub struct DryRunLauncher {
    commands: Vec<RunCommand>,
}

impl DryRunLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[RunCommand] {
        &self.commands
    }
}

impl ProcessLauncher for DryRunLauncher {
    fn start(&mut self, unit: &LaunchUnit) -> Result<()> {
        self.commands.push(RunCommand::for_unit(unit));
        Ok(())
    }

    fn stop_all(&mut self) {
        self.commands.clear();
    }

    fn wait(&mut self) -> Result<()> {
        Ok(())
    }
}
