use std::path::Path;

use sc_simulation::{NoInput, SimConfig, Simulation};

pub fn run(file: &Path, ticks: u64, output: Option<&Path>) -> Result<(), String> {
    let project = super::load_project(file)?;
    let mut sim = Simulation::new(project, SimConfig::default())
        .map_err(|e| format!("cannot start simulation: {e}"))?;
    sim.run(ticks, &NoInput)
        .map_err(|e| format!("simulation error: {e}"))?;

    let content = serde_json::to_string_pretty(&sim.frame())
        .map_err(|e| format!("JSON serialization error: {e}"))?;

    if let Some(path) = output {
        std::fs::write(path, &content)
            .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
        println!("  Exported tick {} to {}", sim.current_tick(), path.display());
    } else {
        println!("{content}");
    }
    Ok(())
}
