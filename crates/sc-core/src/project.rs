use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::scene::Scene;
use crate::variable::Variable;

/// Metadata about the project itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMeta {
    /// Project name.
    pub name: String,
    /// When the project was first created.
    pub created_at: DateTime<Utc>,
}

impl ProjectMeta {
    /// Metadata stamped with the current time.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created_at: Utc::now(),
        }
    }
}

/// A complete authored project: scenes plus project-level (global) variables.
///
/// Asset and tileset tables are not interpreted by the runtime; they are
/// kept in [`Project::extra`] so a load/save cycle preserves them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Optional project metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ProjectMeta>,
    /// Scenes in authoring order.
    #[serde(default)]
    pub scenes: Vec<Scene>,
    /// The scene that starts playing.
    #[serde(default)]
    pub current_scene_id: String,
    /// Global variable declarations.
    #[serde(default)]
    pub variables: Vec<Variable>,
    /// Assets, tilesets and other editor data, carried through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Project {
    /// Create an empty project with metadata.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: Some(ProjectMeta::new(name)),
            scenes: Vec::new(),
            current_scene_id: String::new(),
            variables: Vec::new(),
            extra: BTreeMap::new(),
        }
    }

    /// Append a scene. The first scene added becomes the current scene.
    pub fn with_scene(mut self, scene: Scene) -> Self {
        if self.current_scene_id.is_empty() {
            self.current_scene_id = scene.id.clone();
        }
        self.scenes.push(scene);
        self
    }

    /// Declare a global variable.
    pub fn with_variable(mut self, variable: Variable) -> Self {
        self.variables.push(variable);
        self
    }

    /// Parse a project from JSON text.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a project file.
    pub fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the project to a file as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> CoreResult<()> {
        let json = self.to_json_pretty()?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// The project's display name, or `"untitled"`.
    pub fn name(&self) -> &str {
        self.meta
            .as_ref()
            .map(|m| m.name.as_str())
            .unwrap_or("untitled")
    }

    /// Find a scene by id.
    pub fn scene(&self, id: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id == id)
    }

    /// Find a scene by id, falling back to a case-insensitive name match.
    pub fn find_scene(&self, id_or_name: &str) -> CoreResult<&Scene> {
        self.scene(id_or_name)
            .or_else(|| {
                self.scenes
                    .iter()
                    .find(|s| s.name.eq_ignore_ascii_case(id_or_name))
            })
            .ok_or_else(|| CoreError::SceneNotFound(id_or_name.to_string()))
    }

    /// The scene that starts playing: the current scene, else the first one.
    pub fn start_scene(&self) -> Option<&Scene> {
        self.scene(&self.current_scene_id)
            .or_else(|| self.scenes.first())
    }

    /// Find a global variable declaration by id.
    pub fn variable(&self, id: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{ObjectTemplate, ObjectType};

    fn sample() -> Project {
        Project::new("Demo")
            .with_variable(Variable::global("score", "Score", 0.0))
            .with_scene(Scene::new("s1", "Level 1").with_object(ObjectTemplate::new(
                "p",
                "Hero",
                ObjectType::Player,
                10.0,
                20.0,
                32.0,
                32.0,
            )))
            .with_scene(Scene::new("s2", "Level 2"))
    }

    #[test]
    fn first_scene_becomes_current() {
        let project = sample();
        assert_eq!(project.current_scene_id, "s1");
        assert_eq!(project.start_scene().map(|s| s.id.as_str()), Some("s1"));
    }

    #[test]
    fn start_scene_falls_back_to_first() {
        let mut project = sample();
        project.current_scene_id = "gone".into();
        assert_eq!(project.start_scene().map(|s| s.id.as_str()), Some("s1"));
    }

    #[test]
    fn find_scene_by_name() {
        let project = sample();
        assert_eq!(project.find_scene("level 2").unwrap().id, "s2");
        assert!(matches!(
            project.find_scene("nope"),
            Err(CoreError::SceneNotFound(_))
        ));
    }

    #[test]
    fn editor_json_loads_and_keeps_assets() {
        let json = r#"{
            "scenes": [{"id": "a", "name": "A", "objects": [], "events": []}],
            "currentSceneId": "a",
            "variables": [{"id": "v", "name": "Lives", "initialValue": 3}],
            "assets": [{"id": "img1", "name": "hero.png"}],
            "tilesets": []
        }"#;
        let project = Project::from_json(json).unwrap();
        assert!(project.meta.is_none());
        assert_eq!(project.name(), "untitled");
        assert_eq!(project.variable("v").map(|v| v.initial_value), Some(3.0));

        let back: Value = serde_json::from_str(&project.to_json_pretty().unwrap()).unwrap();
        assert_eq!(back["assets"][0]["name"], "hero.png");
        assert_eq!(back["currentSceneId"], "a");
    }

    #[test]
    fn save_and_load_file() {
        let dir = std::env::temp_dir().join(format!("sc-core-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("demo.json");

        let project = sample();
        project.save(&path).unwrap();
        let loaded = Project::load(&path).unwrap();
        assert_eq!(loaded, project);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            Project::from_json("{ not json"),
            Err(CoreError::Json(_))
        ));
    }
}
