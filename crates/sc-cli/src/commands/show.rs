use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use sc_core::rule::Action;
use sc_core::{ObjectTemplate, Project, Rule};

pub fn run(file: &Path, scene: &str) -> Result<(), String> {
    let project = super::load_project(file)?;
    let scene = project.find_scene(scene).map_err(|e| e.to_string())?;

    println!(
        "  {} {}",
        scene.name.bold(),
        format!("({}, {})", scene.view, scene.id).dimmed()
    );
    println!();

    if !scene.objects.is_empty() {
        println!("  {}", "Objects".bold().underline());
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Name", "Type", "Position", "Size", "Flags", "Variables"]);
        for object in &scene.objects {
            table.add_row(vec![
                object.name.clone(),
                object.kind.to_string(),
                format!("{}, {}", object.x, object.y),
                format!("{}x{}", object.width, object.height),
                flags(object),
                object
                    .variables
                    .iter()
                    .map(|(k, v)| format!("{k}={v}"))
                    .collect::<Vec<_>>()
                    .join(" "),
            ]);
        }
        println!("{table}");
        println!();
    }

    if !scene.rules.is_empty() {
        println!("  {}", "Rules".bold().underline());
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["#", "When", "Do", "Target", "Cooldown"]);
        for (i, rule) in scene.rules.iter().enumerate() {
            table.add_row(vec![
                (i + 1).to_string(),
                rule.condition.to_string(),
                describe_action(&project, rule),
                rule.target.to_string(),
                if rule.cooldown > 0.0 {
                    format!("{}s", rule.cooldown)
                } else {
                    "-".to_string()
                },
            ]);
        }
        println!("{table}");
        println!();
    }

    if !scene.variables.is_empty() {
        println!("  {}", "Scene Variables".bold().underline());
        for var in &scene.variables {
            println!("  {} = {}", var.name, var.initial_value);
        }
        println!();
    }

    Ok(())
}

fn flags(object: &ObjectTemplate) -> String {
    let mut flags = Vec::new();
    if object.is_prefab {
        flags.push(format!("prefab(pool {})", object.pool_size));
    }
    if object.has_gravity {
        flags.push("gravity".to_string());
    }
    if object.has_collision {
        flags.push("solid".to_string());
    }
    if object.patrols() {
        flags.push("patrol".to_string());
    }
    if object.spawn_cooldown > 0.0 {
        flags.push(format!("spawn every {}s", object.spawn_cooldown));
    }
    flags.join(", ")
}

/// Render an action with variable, prefab, and scene ids replaced by names.
fn describe_action(project: &Project, rule: &Rule) -> String {
    let named = |id: &str| super::variable_name(project, id).to_string();
    match &rule.action {
        Action::VarSet { variable_id, value } => format!("{} = {value}", named(variable_id)),
        Action::VarAdd { variable_id, value } => format!("{} += {value}", named(variable_id)),
        Action::VarSub { variable_id, value } => format!("{} -= {value}", named(variable_id)),
        Action::GotoScene { scene_id } => {
            let name = project
                .scene(scene_id)
                .map_or(scene_id.as_str(), |s| s.name.as_str());
            format!("go to scene '{name}'")
        }
        Action::CreateObject {
            prefab_id,
            offset_x,
            offset_y,
        } => {
            let name = project
                .scenes
                .iter()
                .find_map(|s| s.object(prefab_id))
                .map_or(prefab_id.as_str(), |o| o.name.as_str());
            format!("spawn '{name}' at ({offset_x}, {offset_y})")
        }
        other => other.to_string(),
    }
}
