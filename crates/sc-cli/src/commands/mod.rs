pub mod check;
pub mod export;
pub mod init;
pub mod run;
pub mod scenes;
pub mod show;

use std::path::Path;

use sc_core::Project;

/// Load a project file, mapping errors to a printable message.
fn load_project(path: &Path) -> Result<Project, String> {
    Project::load(path).map_err(|e| format!("cannot load {}: {e}", path.display()))
}

/// Display name for a variable id: the declared name, else the id itself.
fn variable_name<'a>(project: &'a Project, id: &'a str) -> &'a str {
    project
        .variables
        .iter()
        .chain(project.scenes.iter().flat_map(|s| &s.variables))
        .find(|v| v.id == id)
        .map(|v| v.name.as_str())
        .unwrap_or(id)
}

/// Shorten long ids (uuids) for tables.
fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
