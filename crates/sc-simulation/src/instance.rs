use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use sc_core::object::{Animation, AutoMove, ObjectTemplate, ObjectType, VarValue};
use sc_core::rule::CompareOp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Coordinate used to park pooled instances outside the playfield.
pub const OFF_WORLD: f64 = -99999.0;

/// Unique identifier for every live instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub Uuid);

impl InstanceId {
    /// Generate a new random instance ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// An axis-aligned box. `x`/`y` is the top-left corner; y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Aabb {
    /// Center point.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Overlap test. Touching edges count as overlapping.
    pub fn intersects(&self, other: &Aabb) -> bool {
        !(other.x > self.x + self.width
            || other.x + other.width < self.x
            || other.y > self.y + self.height
            || other.y + other.height < self.y)
    }

    /// Penetration depth on each axis, from center distances.
    pub fn overlap(&self, other: &Aabb) -> (f64, f64) {
        let (ax, ay) = self.center();
        let (bx, by) = other.center();
        (
            (self.width + other.width) / 2.0 - (ax - bx).abs(),
            (self.height + other.height) / 2.0 - (ay - by).abs(),
        )
    }
}

/// A live copy of a template plus simulation-only state.
///
/// The template is shared; everything the simulation mutates lives on the
/// instance. Variables are deep copies, so pooled reuse never leaks state
/// between lives.
#[derive(Debug, Clone)]
pub struct RuntimeInstance {
    /// Unique id within the live set; regenerated on every pool reuse.
    pub id: InstanceId,
    /// The authored template this instance was made from.
    pub template: Arc<ObjectTemplate>,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Horizontal velocity per nominal frame.
    pub vx: f64,
    /// Vertical velocity per nominal frame.
    pub vy: f64,
    /// Resting on the floor line or on top of a solid.
    pub grounded: bool,
    /// Seconds of remaining damage immunity.
    pub invincible_timer: f64,
    /// Per-instance variables.
    pub variables: BTreeMap<String, VarValue>,
    /// Patrol anchor.
    pub start_x: f64,
    /// Patrol anchor.
    pub start_y: f64,
    /// Current patrol velocity.
    pub auto_vx: f64,
    /// Current patrol velocity.
    pub auto_vy: f64,
    /// Hit points at creation, used when an `hp` variable is first damaged.
    pub max_hp: f64,
    /// Whether the instance is live (false while parked in a pool).
    pub active: bool,
    /// Playing animation name.
    pub current_animation: Option<String>,
    /// Frame index within the playing animation.
    pub anim_frame: usize,
    /// Milliseconds accumulated toward the next frame.
    pub anim_timer: f64,
    /// Scene time of this instance's last spawn, when it acts as a spawner.
    pub last_spawn_time: Option<f64>,
}

impl RuntimeInstance {
    /// Instantiate a template at its authored position.
    pub fn from_template(template: Arc<ObjectTemplate>) -> Self {
        let (auto_vx, auto_vy) = patrol_speed(template.auto_move.as_ref());
        Self {
            id: InstanceId::new(),
            x: template.x,
            y: template.y,
            width: template.width,
            height: template.height,
            rotation: template.rotation,
            vx: 0.0,
            vy: 0.0,
            grounded: false,
            invincible_timer: 0.0,
            variables: template.variables.clone(),
            start_x: template.x,
            start_y: template.y,
            auto_vx,
            auto_vy,
            max_hp: template.max_hp(),
            active: true,
            current_animation: template.current_animation.clone(),
            anim_frame: 0,
            anim_timer: 0.0,
            last_spawn_time: None,
            template,
        }
    }

    /// Restore template defaults for another life. Position is left to the caller.
    pub fn reset(&mut self) {
        let (auto_vx, auto_vy) = patrol_speed(self.template.auto_move.as_ref());
        self.id = InstanceId::new();
        self.rotation = self.template.rotation;
        self.vx = 0.0;
        self.vy = 0.0;
        self.grounded = false;
        self.invincible_timer = 0.0;
        self.variables = self.template.variables.clone();
        self.auto_vx = auto_vx;
        self.auto_vy = auto_vy;
        self.max_hp = self.template.max_hp();
        self.current_animation = self.template.current_animation.clone();
        self.anim_frame = 0;
        self.anim_timer = 0.0;
        self.last_spawn_time = None;
    }

    /// Take the instance out of play: inactive, off-world, at rest.
    pub fn park(&mut self) {
        self.active = false;
        self.x = OFF_WORLD;
        self.y = OFF_WORLD;
        self.vx = 0.0;
        self.vy = 0.0;
    }

    /// Center the instance on `(x, y)` and anchor any patrol at that point.
    ///
    /// The anchor is the center while the position is the top-left corner,
    /// so a looping patrol's window starts half a width to the right.
    pub fn place_centered(&mut self, x: f64, y: f64) {
        self.x = x - self.width / 2.0;
        self.y = y - self.height / 2.0;
        self.start_x = x;
        self.start_y = y;
    }

    /// Authored type.
    pub fn kind(&self) -> ObjectType {
        self.template.kind
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.template.name
    }

    /// The prefab id this instance returns to, if it came from a prefab.
    pub fn prefab_id(&self) -> Option<&str> {
        self.template
            .is_prefab
            .then_some(self.template.id.as_str())
    }

    /// Whether gravity applies.
    pub fn has_gravity(&self) -> bool {
        self.template.has_gravity
    }

    /// Whether solid collision applies.
    pub fn has_collision(&self) -> bool {
        self.template.has_collision
    }

    /// The enabled patrol, if any.
    pub fn patrol(&self) -> Option<&AutoMove> {
        self.template.auto_move.as_ref().filter(|m| m.enabled)
    }

    /// Current bounding box.
    pub fn bounds(&self) -> Aabb {
        Aabb {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    /// Current center point.
    pub fn center(&self) -> (f64, f64) {
        self.bounds().center()
    }

    /// Whether damage is currently ignored.
    pub fn is_invincible(&self) -> bool {
        self.invincible_timer > 0.0
    }

    /// -1 when moving left (by velocity or patrol), else 1.
    pub fn facing(&self) -> f64 {
        if self.vx < 0.0 || self.auto_vx < 0.0 {
            -1.0
        } else {
            1.0
        }
    }

    /// Whether the instance has a variable satisfying the comparison.
    pub fn var_satisfies(&self, name: &str, op: CompareOp, value: &VarValue) -> bool {
        self.variables
            .get(name)
            .is_some_and(|current| op.holds(current, value))
    }

    /// Find one of this instance's animations by name.
    pub fn animation(&self, name: &str) -> Option<&Animation> {
        self.template.animation(name)
    }

    /// The definition of the playing animation.
    pub fn playing(&self) -> Option<&Animation> {
        self.current_animation
            .as_deref()
            .and_then(|name| self.animation(name))
    }
}

fn patrol_speed(auto_move: Option<&AutoMove>) -> (f64, f64) {
    auto_move.map_or((0.0, 0.0), |m| (m.speed_x, m.speed_y))
}
