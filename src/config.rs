use crate::capabilities::SensorDefaults;
use crate::cli::Cli;
use crate::composer::{Composer, InfrastructureLayout, PolicyMatrix};
use crate::deployment::ShareResolver;
use crate::error::{LaunchError, Result};
use crate::logging::{LogFormat, LoggingConfig};
use crate::schema::ReschedulePolicy;
use crate::utils::path::split_prefixes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".bdi-launch.toml";
pub const AMENT_PREFIX_ENV: &str = "AMENT_PREFIX_PATH";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Package name to share directory, consulted before the install prefixes.
    #[serde(default)]
    pub share: BTreeMap<String, String>,

    #[serde(default)]
    pub infrastructure: InfrastructureLayout,

    #[serde(default)]
    pub sensors: SensorDefaults,

    #[serde(default)]
    pub policy: PolicyMatrix,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Force debug logging (not stored in config file)
    #[serde(skip)]
    pub verbose: bool,

    /// Install prefixes from AMENT_PREFIX_PATH (not stored in config file)
    #[serde(skip)]
    pub ament_prefixes: Vec<PathBuf>,
}

impl Config {
    /// Load configuration with precedence:
    /// 1. CLI flags (applied later via with_cli_overrides)
    /// 2. Environment variables
    /// 3. File passed with --config
    /// 4. Project config (.bdi-launch.toml in the working directory)
    /// 5. Global config (~/.bdi-launch.toml)
    /// 6. Built-in defaults
    pub fn load(project_root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(home) = home_dir() {
            let global_config = home.join(CONFIG_FILE_NAME);
            if global_config.exists() {
                tracing::debug!(path = %global_config.display(), "Loading global config");
                config = config.merge(ConfigLayer::from_file(&global_config)?);
            }
        }

        let project_config = project_root.join(CONFIG_FILE_NAME);
        if project_config.exists() {
            tracing::debug!(path = %project_config.display(), "Loading project config");
            config = config.merge(ConfigLayer::from_file(&project_config)?);
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(LaunchError::InvalidConfig(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            config = config.merge(ConfigLayer::from_file(path)?);
        }

        Ok(config.merge_env())
    }

    /// Merge a config file layer into this one (every key the layer sets wins)
    fn merge(mut self, layer: ConfigLayer) -> Self {
        // Share directories (per package, later wins)
        self.share.extend(layer.share);

        let infrastructure = layer.infrastructure;
        set(&mut self.infrastructure.package, infrastructure.package);
        set(&mut self.infrastructure.belief_manager, infrastructure.belief_manager);
        set(&mut self.infrastructure.scheduler, infrastructure.scheduler);
        set(&mut self.infrastructure.planner_bridge, infrastructure.planner_bridge);

        set(&mut self.sensors.init_sleep, layer.sensors.init_sleep);
        set(&mut self.sensors.sensing_freq, layer.sensors.sensing_freq);

        set(&mut self.policy.offline, layer.policy.offline);
        set(&mut self.policy.online, layer.policy.online);

        set(&mut self.logging.level, layer.logging.level);
        set(&mut self.logging.format, layer.logging.format);

        self
    }

    /// Apply environment variable overrides
    ///
    /// `BDI_LAUNCH_LOG` is read when logging is initialized.
    fn merge_env(mut self) -> Self {
        if let Ok(search_path) = std::env::var(AMENT_PREFIX_ENV) {
            self.ament_prefixes = split_prefixes(&search_path);
        }
        self
    }

    /// Apply CLI overrides (highest precedence)
    pub fn with_cli_overrides(mut self, cli: &Cli) -> Self {
        self.verbose = cli.verbose;
        self
    }

    /// Check settings that deserialize fine but cannot work.
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();

        for (field, value) in [
            ("infrastructure.package", &self.infrastructure.package),
            ("infrastructure.belief_manager", &self.infrastructure.belief_manager),
            ("infrastructure.scheduler", &self.infrastructure.scheduler),
            ("infrastructure.planner_bridge", &self.infrastructure.planner_bridge),
        ] {
            if value.trim().is_empty() {
                problems.push(format!("{} must not be empty", field));
            }
        }

        if self.sensors.init_sleep < 0 {
            problems.push(format!(
                "sensors.init_sleep must be >= 0, got {}",
                self.sensors.init_sleep
            ));
        }
        if !self.sensors.sensing_freq.is_finite() || self.sensors.sensing_freq <= 0.0 {
            problems.push(format!(
                "sensors.sensing_freq must be > 0, got {}",
                self.sensors.sensing_freq
            ));
        }

        if self.policy.offline.is_empty() {
            problems.push("policy.offline must allow at least one reschedule policy".to_string());
        }
        if self.policy.online.is_empty() {
            problems.push("policy.online must allow at least one reschedule policy".to_string());
        }

        for (package, dir) in &self.share {
            if package.trim().is_empty() {
                problems.push(format!("share entry with empty package name ('{}')", dir));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(LaunchError::InvalidConfig(problems.join("; ")))
        }
    }

    pub fn composer(&self) -> Composer {
        Composer {
            policy: self.policy.clone(),
            sensor_defaults: self.sensors,
            infrastructure: self.infrastructure.clone(),
        }
    }

    pub fn share_resolver(&self) -> ShareResolver {
        ShareResolver::new(&self.share, self.ament_prefixes.clone())
    }
}

/// Get the home directory
fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

fn set<T>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}

/// One config file as written: only the keys it sets are `Some`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigLayer {
    share: BTreeMap<String, String>,
    infrastructure: InfrastructureLayer,
    sensors: SensorsLayer,
    policy: PolicyLayer,
    logging: LoggingLayer,
}

impl ConfigLayer {
    fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct InfrastructureLayer {
    package: Option<String>,
    belief_manager: Option<String>,
    scheduler: Option<String>,
    planner_bridge: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SensorsLayer {
    init_sleep: Option<i64>,
    sensing_freq: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PolicyLayer {
    offline: Option<Vec<ReschedulePolicy>>,
    online: Option<Vec<ReschedulePolicy>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LoggingLayer {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.infrastructure.package, "ros2_bdi_core");
        assert_eq!(config.sensors.init_sleep, 2);
        assert_eq!(config.sensors.sensing_freq, 1.0);
        assert!(config.share.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_all_sections() {
        let config: Config = toml::from_str(
            r#"
            [share]
            ros2_bdi_on_webots = "~/ros2_ws/install/ros2_bdi_on_webots/share/ros2_bdi_on_webots"

            [infrastructure]
            package = "my_bdi_core"

            [sensors]
            sensing_freq = 2.5

            [policy]
            online = ["NO_PREEMPT", "PREEMPT", "CLEAN_PREEMPT"]

            [logging]
            level = "bdi_launch::composer=debug"
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.share.len(), 1);
        assert_eq!(config.infrastructure.package, "my_bdi_core");
        assert_eq!(config.infrastructure.scheduler, "scheduler");
        assert_eq!(config.sensors.init_sleep, 2);
        assert_eq!(config.sensors.sensing_freq, 2.5);
        assert_eq!(config.policy.online.len(), 3);
        assert_eq!(config.policy.offline.len(), 3);
        assert_eq!(config.logging.format, crate::logging::LogFormat::Json);
    }

    fn layer(source: &str) -> ConfigLayer {
        toml::from_str(source).unwrap()
    }

    #[test]
    fn test_merge_config() {
        let base = Config::default().merge(layer(
            "[sensors]\ninit_sleep = 5\n[share]\npkg_a = \"/global/pkg_a\"\n",
        ));

        let merged = base.merge(layer(
            "[infrastructure]\nscheduler = \"bdi_scheduler\"\n[share]\npkg_a = \"/project/pkg_a\"\n",
        ));
        assert_eq!(merged.sensors.init_sleep, 5); // Kept from base
        assert_eq!(merged.infrastructure.scheduler, "bdi_scheduler"); // From override
        assert_eq!(merged.share["pkg_a"], "/project/pkg_a");
    }

    #[test]
    fn test_later_layer_can_restore_default_values() {
        let global = Config::default().merge(layer(
            r#"
            [sensors]
            init_sleep = 5
            [policy]
            online = ["NO_PREEMPT", "PREEMPT", "CLEAN_PREEMPT"]
            [logging]
            format = "json"
            "#,
        ));
        assert_eq!(global.policy.online.len(), 3);

        let project = global.merge(layer(
            r#"
            [sensors]
            init_sleep = 2
            [policy]
            online = ["PREEMPT", "CLEAN_PREEMPT"]
            [logging]
            format = "text"
            "#,
        ));
        assert_eq!(
            project.policy.online,
            vec![ReschedulePolicy::Preempt, ReschedulePolicy::CleanPreempt]
        );
        assert_eq!(project.sensors.init_sleep, 2);
        assert_eq!(project.logging.format, LogFormat::Text);
        assert_eq!(project, Config::default());
    }

    #[test]
    fn test_validate_collects_problems() {
        let mut config = Config::default();
        config.sensors.sensing_freq = 0.0;
        config.policy.online.clear();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("sensors.sensing_freq"));
        assert!(err.contains("policy.online"));
    }

    #[test]
    #[serial]
    fn test_load_layers_project_then_explicit() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        let original_home = std::env::var("HOME").ok();
        std::env::set_var("HOME", home.path());

        std::fs::write(
            home.path().join(CONFIG_FILE_NAME),
            "[sensors]\ninit_sleep = 4\n[logging]\nlevel = \"info\"\n",
        )
        .unwrap();
        std::fs::write(
            project.path().join(CONFIG_FILE_NAME),
            "[sensors]\ninit_sleep = 6\n",
        )
        .unwrap();
        let explicit = project.path().join("ci.toml");
        std::fs::write(&explicit, "[policy]\nonline = [\"NO_PREEMPT\"]\n").unwrap();

        let config = Config::load(project.path(), Some(&explicit)).unwrap();

        if let Some(home) = original_home {
            std::env::set_var("HOME", home);
        }

        assert_eq!(config.sensors.init_sleep, 6);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.policy.online, vec![ReschedulePolicy::NoPreempt]);
    }

    #[test]
    #[serial]
    fn test_missing_explicit_config() {
        let project = TempDir::new().unwrap();
        let err = Config::load(project.path(), Some(Path::new("/nonexistent/bdi.toml")))
            .unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    #[serial]
    fn test_ament_prefixes_from_env() {
        let original = std::env::var(AMENT_PREFIX_ENV).ok();
        std::env::set_var(AMENT_PREFIX_ENV, "/opt/ros/humble:/ws/install");

        let config = Config::default().merge_env();

        match original {
            Some(value) => std::env::set_var(AMENT_PREFIX_ENV, value),
            None => std::env::remove_var(AMENT_PREFIX_ENV),
        }

        assert_eq!(
            config.ament_prefixes,
            vec![PathBuf::from("/opt/ros/humble"), PathBuf::from("/ws/install")]
        );
    }
}
