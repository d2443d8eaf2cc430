use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn bdi_launch(home: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("bdi-launch"));
    cmd.env("HOME", home.path())
        .env_remove("BDI_LAUNCH_LOG")
        .env_remove("AMENT_PREFIX_PATH")
        .current_dir(home.path());
    cmd
}

#[test]
fn test_help_output() {
    let home = TempDir::new().unwrap();
    bdi_launch(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Compose and launch BDI agents"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_output() {
    let home = TempDir::new().unwrap();
    bdi_launch(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("bdi-launch "));
}

#[test]
fn test_schema_lists_keys() {
    let home = TempDir::new().unwrap();
    bdi_launch(&home)
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("reschedule_policy"))
        .stdout(predicate::str::contains("one of NO_PREEMPT|PREEMPT|CLEAN_PREEMPT"))
        .stdout(predicate::str::contains("(required)"));
}

#[test]
fn test_scenarios_listed() {
    let home = TempDir::new().unwrap();
    bdi_launch(&home)
        .arg("scenarios")
        .assert()
        .success()
        .stdout(predicate::str::contains("litter_world"))
        .stdout(predicate::str::contains("gripper_a"));
}

#[test]
fn test_validate_builtin_scenario_without_resolution() {
    let home = TempDir::new().unwrap();
    bdi_launch(&home)
        .args(["validate", "scenario:litter_world", "--no-resolve"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ plastic_agent (8 units)"));
}

#[test]
fn test_validate_reports_every_violation() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("broken.toml");
    std::fs::write(
        &path,
        r#"
        [[agents]]
        agent_id = "gripper_a"
        [agents.init_params]
        planning_mode = "online"
        reschedule_policy = "NO_PREEMPT"
        "#,
    )
    .unwrap();

    bdi_launch(&home)
        .args(["validate", path.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("✗ Deployment is invalid!"))
        .stderr(predicate::str::contains("missing required parameter 'pddl_file'"))
        .stderr(predicate::str::contains(
            "planning mode 'online' does not allow reschedule policy 'NO_PREEMPT'",
        ));
}

#[test]
fn test_compose_json_with_share_config() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join(".bdi-launch.toml"),
        "[share]\nros2_bdi_on_webots = \"/opt/webots/share\"\n",
    )
    .unwrap();

    let output = bdi_launch(&home)
        .args(["compose", "scenario:webots", "--format", "json"])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    let agent = &json[0];
    assert_eq!(agent["agent_id"], "gripper_a");
    assert_eq!(agent["units"].as_array().unwrap().len(), 11);
    assert_eq!(
        agent["units"][0]["resolved_params"]["pddl_file"],
        "/opt/webots/share/pddl/gripper/gripper-domain.pddl"
    );
}

#[test]
fn test_compose_unknown_agent() {
    let home = TempDir::new().unwrap();
    bdi_launch(&home)
        .args(["compose", "scenario:webots", "--no-resolve", "--agent", "carrier_a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Agent 'carrier_a' is not declared in the deployment",
        ));
}

#[test]
fn test_launch_dry_run() {
    let home = TempDir::new().unwrap();
    bdi_launch(&home)
        .args(["launch", "scenario:webots", "--no-resolve", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "ros2 run ros2_bdi_core scheduler --ros-args -r __ns:=/gripper_a -r __node:=scheduler",
        ))
        .stdout(predicate::str::contains("__node:=req_carrier_to_come3"));
}

#[test]
fn test_unknown_scenario() {
    let home = TempDir::new().unwrap();
    bdi_launch(&home)
        .args(["validate", "scenario:warehouse"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown scenario 'warehouse'"));
}

#[test]
fn test_config_validate_rejects_bad_values() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join(".bdi-launch.toml"),
        "[sensors]\nsensing_freq = -1.0\n",
    )
    .unwrap();

    bdi_launch(&home)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("✗ Configuration is invalid!"))
        .stdout(predicate::str::contains("sensors.sensing_freq"));
}

#[test]
fn test_config_show_reports_policy() {
    let home = TempDir::new().unwrap();
    bdi_launch(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("online: PREEMPT, CLEAN_PREEMPT"));
}
