use super::helpers::compose_selected;
use crate::cli::{ComposeCmd, OutputFormat};
use crate::composer::ResolvedTopology;
use crate::config::Config;
use crate::error::Result;
use serde::Serialize;
use std::fmt::Write;

#[derive(Serialize)]
struct TopologyView<'a> {
    fingerprint: String,
    #[serde(flatten)]
    topology: &'a ResolvedTopology,
}

pub fn execute(config: &Config, cmd: &ComposeCmd) -> Result<()> {
    let topologies = compose_selected(config, &cmd.target)?;

    match cmd.format {
        OutputFormat::Json => {
            let views: Vec<_> = topologies
                .iter()
                .map(|topology| TopologyView {
                    fingerprint: topology.fingerprint(),
                    topology,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&views)?);
        }
        OutputFormat::Text => {
            for (i, topology) in topologies.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print!("{}", render(topology));
            }
        }
    }

    Ok(())
}

/// Human-readable listing of a topology, one unit per block.
pub fn render(topology: &ResolvedTopology) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Agent {} (group {}): {} units, fingerprint {}",
        topology.agent_id(),
        topology.agent_group(),
        topology.len(),
        topology.fingerprint()
    );

    for (i, unit) in topology.units().iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>2}. {} [{}] {}/{}",
            i + 1,
            unit.instance_name,
            unit.role,
            unit.package,
            unit.executable
        );
        for (key, value) in &unit.resolved_params {
            let _ = writeln!(out, "        {} = {}", key, value);
        }
    }
    out
}
