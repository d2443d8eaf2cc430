use super::command::{RunCommand, ROS2_PROGRAM};
use super::ProcessLauncher;
use crate::composer::LaunchUnit;
use crate::error::{LaunchError, Result};
use std::path::PathBuf;
use std::process::Child;
use std::time::Duration;
use wait_timeout::ChildExt;

/// Starts launch units as `ros2 run` child processes.
pub struct Ros2Launcher {
    program: PathBuf,
    grace: Duration,
    children: Vec<(String, Child)>,
}

impl Ros2Launcher {
    /// Locate the `ros2` binary on `PATH`.
    pub fn locate(grace: Duration) -> Result<Self> {
        let program = which::which(ROS2_PROGRAM).map_err(|_| {
            LaunchError::LauncherNotFound(
                "'ros2' is not on PATH. Source your ROS 2 setup script first".to_string(),
            )
        })?;
        Ok(Self::with_program(program, grace))
    }

    pub fn with_program(program: PathBuf, grace: Duration) -> Self {
        Self {
            program,
            grace,
            children: Vec::new(),
        }
    }

    pub fn running(&self) -> usize {
        self.children.len()
    }
}

impl ProcessLauncher for Ros2Launcher {
    fn start(&mut self, unit: &LaunchUnit) -> Result<()> {
        let command = RunCommand::for_unit(unit);
        tracing::info!(
            unit = %unit.instance_name,
            role = %unit.role,
            namespace = %unit.namespace,
            "Starting unit"
        );
        tracing::debug!(command = %command, "Spawn");

        let mut child = command.to_command(&self.program).spawn()?;

        // The support layer must be up before capabilities register with it.
        if unit.role.is_infrastructure() {
            if let Some(status) = child.wait_timeout(self.grace)? {
                return Err(LaunchError::UnitExited {
                    name: unit.instance_name.clone(),
                    status: status.to_string(),
                });
            }
        }

        self.children.push((unit.instance_name.clone(), child));
        Ok(())
    }

    fn stop_all(&mut self) {
        for (name, mut child) in self.children.drain(..).rev() {
            tracing::debug!(unit = %name, "Stopping unit");
            let _ = child.kill();
            let _ = child.wait();
        }
    }

    fn wait(&mut self) -> Result<()> {
        for (name, child) in &mut self.children {
            let status = child.wait()?;
            if status.success() {
                tracing::info!(unit = %name, "Unit exited");
            } else {
                tracing::warn!(unit = %name, %status, "Unit exited with failure");
            }
        }
        self.children.clear();
        Ok(())
    }
}

impl Drop for Ros2Launcher {
    fn drop(&mut self) {
        self.stop_all();
    }
}
