use crate::composer::LaunchUnit;
use crate::schema::ParamValue;
use crate::utils::shell::join_args;
use std::fmt;
use std::path::Path;
use std::process::Command;

pub const ROS2_PROGRAM: &str = "ros2";

/// Render a parameter value the way `--ros-args -p` parses it (YAML scalars).
///
/// Strings are single-quoted so values such as `"16"` or `"true"` keep their
/// string type on the node side.
pub fn render_value(value: &ParamValue) -> String {
    match value {
        ParamValue::Bool(b) => b.to_string(),
        ParamValue::Int(i) => i.to_string(),
        ParamValue::Float(f) => format!("{:?}", f),
        ParamValue::Str(s) => yaml_quote(s),
        ParamValue::List(items) => {
            let items: Vec<_> = items.iter().map(|s| yaml_quote(s)).collect();
            format!("[{}]", items.join(", "))
        }
        // rejected during composition; TOML inline syntax is also valid YAML flow
        ParamValue::Unsupported(raw) => raw.to_string(),
    }
}

fn yaml_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// A `ros2 run` invocation for one launch unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunCommand {
    pub unit_name: String,
    args: Vec<String>,
}

impl RunCommand {
    pub fn for_unit(unit: &LaunchUnit) -> Self {
        let mut args = vec![
            "run".to_string(),
            unit.package.clone(),
            unit.executable.clone(),
            "--ros-args".to_string(),
            "-r".to_string(),
            format!("__ns:=/{}", unit.namespace),
            "-r".to_string(),
            format!("__node:={}", unit.instance_name),
        ];

        for (key, value) in &unit.resolved_params {
            args.push("-p".to_string());
            args.push(format!("{}:={}", key, render_value(value)));
        }

        Self {
            unit_name: unit.instance_name.clone(),
            args,
        }
    }

    /// Arguments passed to the `ros2` program.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn to_command(&self, program: &Path) -> Command {
        let mut cmd = Command::new(program);
        cmd.args(&self.args);
        cmd
    }
}

impl fmt::Display for RunCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", ROS2_PROGRAM, join_args(&self.args))
    }
}
