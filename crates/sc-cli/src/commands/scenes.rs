use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(file: &Path) -> Result<(), String> {
    let project = super::load_project(file)?;

    if project.scenes.is_empty() {
        println!("  No scenes found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "", "Id", "Name", "View", "Objects", "Prefabs", "Rules", "Variables",
    ]);

    for scene in &project.scenes {
        let marker = if scene.id == project.current_scene_id {
            "*"
        } else {
            ""
        };
        table.add_row(vec![
            marker.to_string(),
            super::short_id(&scene.id).to_string(),
            scene.name.clone(),
            scene.view.to_string(),
            scene.placed_objects().count().to_string(),
            scene.prefabs().count().to_string(),
            scene.rules.len().to_string(),
            scene.variables.len().to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} scenes in '{}' (* = start scene)",
        project.scenes.len(),
        project.name()
    );
    Ok(())
}
