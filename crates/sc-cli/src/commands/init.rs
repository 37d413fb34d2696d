use std::path::PathBuf;

use sc_core::Preset;

pub fn run(name: &str, preset: &str) -> Result<(), String> {
    let Some(preset) = Preset::parse(preset) else {
        let names: Vec<_> = Preset::ALL.iter().map(Preset::name).collect();
        return Err(format!(
            "unknown preset \"{preset}\". Use: {}",
            names.join(", ")
        ));
    };

    let path = PathBuf::from(format!("{name}.json"));
    if path.exists() {
        return Err(format!("'{}' already exists", path.display()));
    }

    let project = preset.build(name);
    project
        .save(&path)
        .map_err(|e| format!("cannot write {}: {e}", path.display()))?;

    println!("Created project '{name}' in {}", path.display());
    println!("  preset: {preset} ({})", preset.description());
    println!(
        "  {} scene(s), {} global variable(s)",
        project.scenes.len(),
        project.variables.len()
    );
    println!();
    println!("Get started:");
    println!("  sc check {}        # Validate the project", path.display());
    println!("  sc scenes {}       # List scenes", path.display());
    println!("  sc run {} -k Space@0..10", path.display());

    Ok(())
}
