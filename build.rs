use std::env;
use std::process::Command;

fn main() {
    let version = env::var("CARGO_PKG_VERSION").unwrap_or_default();
    let release = env::var("PROFILE").is_ok_and(|p| p == "release");

    // Dev builds carry the commit they were built from
    let full_version = match git_describe().filter(|_| !release) {
        Some(commit) => format!("{}-dev+{}", version, commit),
        None => version,
    };
    println!("cargo:rustc-env=BDI_LAUNCH_VERSION={}", full_version);

    // Built-in scenarios are embedded with include_str!
    println!("cargo:rerun-if-changed=deployments");
    println!("cargo:rerun-if-changed=.git/HEAD");
}

fn git_describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--always", "--dirty=.dirty", "--abbrev=8"])
        .output()
        .ok()?;

    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .filter(|s| !s.is_empty())
}
