use crate::deployment::ScenarioRegistry;
use crate::error::Result;

pub fn execute() -> Result<()> {
    println!("Built-in scenarios (use as scenario:<name>):\n");

    for (name, deployment) in ScenarioRegistry::names()
        .into_iter()
        .zip(ScenarioRegistry::load_all()?)
    {
        let agents: Vec<_> = deployment
            .agents
            .iter()
            .map(|a| a.agent_id.as_str())
            .collect();
        println!("  {:<14} agents: {}", name, agents.join(", "));
        if let Some(description) = &deployment.description {
            println!("  {:<14} {}", "", description);
        }
    }

    Ok(())
}
