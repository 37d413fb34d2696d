use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The authored type of an object. Rules select their targets by type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObjectType {
    /// The player-controlled character.
    Player,
    /// A hostile character.
    Enemy,
    /// A collectible.
    Coin,
    /// A static obstacle or platform.
    Wall,
    /// A generic sprite (often used for projectiles).
    Sprite,
    /// A tile painted from a tileset.
    Tile,
}

impl ObjectType {
    /// Every object type, in authoring order.
    pub const ALL: [ObjectType; 6] = [
        ObjectType::Player,
        ObjectType::Enemy,
        ObjectType::Coin,
        ObjectType::Wall,
        ObjectType::Sprite,
        ObjectType::Tile,
    ];

    /// Parse the exact type literal used in project files (`"Player"`, `"Wall"`, ...).
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    /// The type literal used in project files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Player => "Player",
            Self::Enemy => "Enemy",
            Self::Coin => "Coin",
            Self::Wall => "Wall",
            Self::Sprite => "Sprite",
            Self::Tile => "Tile",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A per-instance variable value: number, string, or boolean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VarValue {
    /// A boolean value.
    Flag(bool),
    /// A numeric value.
    Number(f64),
    /// A text value.
    Text(String),
}

impl VarValue {
    /// Numeric view of the value.
    ///
    /// Booleans count as 1/0 and numeric strings are parsed; anything else
    /// has no numeric value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Flag(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }

    /// Returns the number if this is a [`VarValue::Number`].
    pub fn number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Loose equality: same-kind values compare directly, mixed kinds compare numerically.
    pub fn loose_eq(&self, other: &VarValue) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Flag(a), Self::Flag(b)) => a == b,
            _ => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl From<f64> for VarValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for VarValue {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

impl From<&str> for VarValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl fmt::Display for VarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "\"{s}\""),
        }
    }
}

/// Automatic patrol movement, independent of rule-driven input.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AutoMove {
    /// Whether the patrol is active.
    pub enabled: bool,
    /// Horizontal patrol speed per nominal frame.
    pub speed_x: f64,
    /// Vertical patrol speed per nominal frame.
    pub speed_y: f64,
    /// Whether the patrol turns around at the end of its range.
    #[serde(rename = "loop")]
    pub looping: bool,
    /// Patrol distance from the anchor before turning around.
    pub range: f64,
}

impl AutoMove {
    /// Range used when the authored range is zero.
    pub const DEFAULT_RANGE: f64 = 200.0;

    /// A looping patrol with the given speeds and range.
    pub fn looping(speed_x: f64, speed_y: f64, range: f64) -> Self {
        Self {
            enabled: true,
            speed_x,
            speed_y,
            looping: true,
            range,
        }
    }

    /// A one-way patrol (projectiles, conveyors).
    pub fn straight(speed_x: f64, speed_y: f64) -> Self {
        Self {
            enabled: true,
            speed_x,
            speed_y,
            looping: false,
            range: 0.0,
        }
    }

    /// The turn-around distance, substituting [`AutoMove::DEFAULT_RANGE`] for zero.
    pub fn effective_range(&self) -> f64 {
        if self.range == 0.0 {
            Self::DEFAULT_RANGE
        } else {
            self.range
        }
    }
}

/// A named frame sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animation {
    /// Unique identifier of the animation.
    #[serde(default)]
    pub id: String,
    /// Name used by `SET_ANIMATION` rules.
    pub name: String,
    /// Asset ids of the frames, in playback order.
    #[serde(default)]
    pub frame_asset_ids: Vec<String>,
    /// Playback rate in frames per second.
    #[serde(default = "default_fps")]
    pub fps: f64,
    /// Whether playback wraps to the first frame.
    #[serde(default, rename = "loop")]
    pub looping: bool,
}

fn default_fps() -> f64 {
    8.0
}

fn default_size() -> f64 {
    32.0
}

/// An authored, scene-resident object definition.
///
/// Templates are never mutated by the simulation. Placed templates become
/// live instances when their scene loads; prefab templates are spawned on
/// demand by `CREATE_OBJECT` rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectTemplate {
    /// Unique identifier within the scene.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Authored type, used by rule target selectors.
    #[serde(rename = "type")]
    pub kind: ObjectType,
    /// Left edge in world units.
    #[serde(default)]
    pub x: f64,
    /// Top edge in world units (y grows downward).
    #[serde(default)]
    pub y: f64,
    /// Width in world units.
    #[serde(default = "default_size")]
    pub width: f64,
    /// Height in world units.
    #[serde(default = "default_size")]
    pub height: f64,
    /// Rotation in degrees.
    #[serde(default)]
    pub rotation: f64,
    /// Whether gravity and the floor line apply.
    #[serde(default)]
    pub has_gravity: bool,
    /// Whether the object takes part in solid collision resolution.
    #[serde(default)]
    pub has_collision: bool,
    /// Optional patrol movement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_move: Option<AutoMove>,
    /// Whether this template is spawned on demand instead of placed.
    #[serde(default)]
    pub is_prefab: bool,
    /// Number of instances to pre-allocate for a prefab.
    #[serde(default)]
    pub pool_size: u32,
    /// Minimum seconds between spawns when this object acts as a spawner.
    #[serde(default)]
    pub spawn_cooldown: f64,
    /// Named instance variables and their initial values.
    #[serde(default)]
    pub variables: BTreeMap<String, VarValue>,
    /// Available animations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub animations: Vec<Animation>,
    /// Name of the animation playing at creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_animation: Option<String>,
    /// Presentation fields (color, sprite, tile, shadow, ...) carried through untouched.
    #[serde(flatten)]
    pub presentation: BTreeMap<String, Value>,
}

impl ObjectTemplate {
    /// Create a plain template with the given geometry and no behaviors.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: ObjectType,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            x,
            y,
            width,
            height,
            rotation: 0.0,
            has_gravity: false,
            has_collision: false,
            auto_move: None,
            is_prefab: false,
            pool_size: 0,
            spawn_cooldown: 0.0,
            variables: BTreeMap::new(),
            animations: Vec::new(),
            current_animation: None,
            presentation: BTreeMap::new(),
        }
    }

    /// Enable gravity.
    pub fn with_gravity(mut self) -> Self {
        self.has_gravity = true;
        self
    }

    /// Enable solid collision.
    pub fn solid(mut self) -> Self {
        self.has_collision = true;
        self
    }

    /// Attach a patrol.
    pub fn with_auto_move(mut self, auto_move: AutoMove) -> Self {
        self.auto_move = Some(auto_move);
        self
    }

    /// Set an initial instance variable.
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<VarValue>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Mark as a prefab with the given pool pre-allocation.
    pub fn prefab(mut self, pool_size: u32) -> Self {
        self.is_prefab = true;
        self.pool_size = pool_size;
        self
    }

    /// Set the spawner cooldown in seconds.
    pub fn with_spawn_cooldown(mut self, seconds: f64) -> Self {
        self.spawn_cooldown = seconds;
        self
    }

    /// Set the rotation in degrees.
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    /// Add an animation; the first one added becomes the current animation.
    pub fn with_animation(mut self, animation: Animation) -> Self {
        if self.current_animation.is_none() {
            self.current_animation = Some(animation.name.clone());
        }
        self.animations.push(animation);
        self
    }

    /// Set a presentation field such as `color`.
    pub fn with_presentation(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.presentation.insert(key.into(), value.into());
        self
    }

    /// The numeric value of the variable named `hp` (any casing), if present.
    pub fn hp(&self) -> Option<f64> {
        self.variables
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("hp"))
            .and_then(|(_, v)| v.number())
    }

    /// Maximum hit points: the `hp` variable, or 100 when absent or not numeric.
    pub fn max_hp(&self) -> f64 {
        self.hp().unwrap_or(100.0)
    }

    /// Find an animation by name.
    pub fn animation(&self, name: &str) -> Option<&Animation> {
        self.animations.iter().find(|a| a.name == name)
    }

    /// Whether the patrol is present and enabled.
    pub fn patrols(&self) -> bool {
        self.auto_move.is_some_and(|m| m.enabled)
    }
}
