use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::object::ObjectTemplate;
use crate::rule::Rule;
use crate::variable::Variable;

/// Camera/gameplay perspective of a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewMode {
    /// Side-scroller with gravity.
    #[default]
    Side,
    /// Top-down; spawned projectiles inherit the spawner's heading.
    TopDown,
    /// Isometric projection (simulated like side view, drawn differently).
    Iso,
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Side => write!(f, "side"),
            Self::TopDown => write!(f, "top-down"),
            Self::Iso => write!(f, "isometric"),
        }
    }
}

/// A scene: objects, rules, and scene-scoped variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Unique identifier referenced by `GOTO_SCENE`.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Perspective.
    #[serde(default)]
    pub view: ViewMode,
    /// Placed objects and prefabs, in authoring order.
    #[serde(default)]
    pub objects: Vec<ObjectTemplate>,
    /// Rules, in priority (authoring) order.
    #[serde(default, rename = "events")]
    pub rules: Vec<Rule>,
    /// Scene-scoped variable declarations.
    #[serde(default)]
    pub variables: Vec<Variable>,
    /// Audio asset looped while the scene plays.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_music_id: Option<String>,
    /// Volume for the background music, [`Scene::DEFAULT_MUSIC_VOLUME`] when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music_volume: Option<f64>,
    /// Presentation fields (background, lights) carried through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Scene {
    /// Music volume used when a scene sets a track but no volume.
    pub const DEFAULT_MUSIC_VOLUME: f64 = 0.5;

    /// Create an empty side-view scene.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            view: ViewMode::Side,
            objects: Vec::new(),
            rules: Vec::new(),
            variables: Vec::new(),
            background_music_id: None,
            music_volume: None,
            extra: BTreeMap::new(),
        }
    }

    /// Loop a music clip while the scene plays.
    pub fn with_music(mut self, clip_id: impl Into<String>, volume: f64) -> Self {
        self.background_music_id = Some(clip_id.into());
        self.music_volume = Some(volume);
        self
    }

    /// The scene's music clip and volume, or `None` for silence.
    pub fn music(&self) -> Option<(&str, f64)> {
        self.background_music_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(|id| (id, self.music_volume.unwrap_or(Self::DEFAULT_MUSIC_VOLUME)))
    }

    /// Set the view mode.
    pub fn with_view(mut self, view: ViewMode) -> Self {
        self.view = view;
        self
    }

    /// Append an object template.
    pub fn with_object(mut self, object: ObjectTemplate) -> Self {
        self.objects.push(object);
        self
    }

    /// Append a rule at the lowest priority.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Declare a scene variable.
    pub fn with_variable(mut self, variable: Variable) -> Self {
        self.variables.push(variable);
        self
    }

    /// Templates flagged as prefabs.
    pub fn prefabs(&self) -> impl Iterator<Item = &ObjectTemplate> {
        self.objects.iter().filter(|o| o.is_prefab)
    }

    /// Templates placed in the scene at load time.
    pub fn placed_objects(&self) -> impl Iterator<Item = &ObjectTemplate> {
        self.objects.iter().filter(|o| !o.is_prefab)
    }

    /// Find a template by id.
    pub fn object(&self, id: &str) -> Option<&ObjectTemplate> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Find a template by name (case-insensitive).
    pub fn object_by_name(&self, name: &str) -> Option<&ObjectTemplate> {
        self.objects
            .iter()
            .find(|o| o.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectType;

    #[test]
    fn view_mode_wire_names() {
        assert_eq!(
            serde_json::to_value(ViewMode::TopDown).unwrap(),
            serde_json::json!("TOP_DOWN")
        );
        let parsed: ViewMode = serde_json::from_str("\"ISO\"").unwrap();
        assert_eq!(parsed, ViewMode::Iso);
    }

    #[test]
    fn scene_partitions_prefabs() {
        let scene = Scene::new("s1", "Level")
            .with_object(ObjectTemplate::new("p", "Hero", ObjectType::Player, 0.0, 0.0, 32.0, 32.0))
            .with_object(
                ObjectTemplate::new("b", "Bullet", ObjectType::Sprite, 0.0, 0.0, 8.0, 8.0).prefab(4),
            );
        assert_eq!(scene.prefabs().count(), 1);
        assert_eq!(scene.placed_objects().count(), 1);
        assert_eq!(scene.object_by_name("bullet").map(|o| o.id.as_str()), Some("b"));
    }

    #[test]
    fn missing_view_defaults_to_side() {
        let scene: Scene =
            serde_json::from_str(r#"{"id": "s", "name": "S", "objects": [], "events": []}"#).unwrap();
        assert_eq!(scene.view, ViewMode::Side);
        assert!(scene.variables.is_empty());
        assert_eq!(scene.music(), None);
    }

    #[test]
    fn music_volume_defaults_to_half() {
        let scene: Scene = serde_json::from_str(
            r##"{"id": "s", "name": "S", "backgroundMusicId": "bgm1", "backgroundColor": "#000"}"##,
        )
        .unwrap();
        assert_eq!(scene.music(), Some(("bgm1", 0.5)));
        assert!(scene.extra.contains_key("backgroundColor"));

        let quiet = Scene::new("q", "Quiet").with_music("bgm2", 0.2);
        let json = serde_json::to_value(&quiet).unwrap();
        assert_eq!(json["backgroundMusicId"], "bgm2");
        assert_eq!(json["musicVolume"], 0.2);

        let blank: Scene =
            serde_json::from_str(r#"{"id": "s", "backgroundMusicId": ""}"#).unwrap();
        assert_eq!(blank.music(), None);
    }
}
