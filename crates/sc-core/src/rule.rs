//! Rules: guarded actions evaluated every tick in authoring order.
//!
//! On disk a rule is the loose `{id, condition: {type, ...}, action: {type, ...}}`
//! record the editor writes. In memory it is decoded into the closed
//! [`Condition`] and [`Action`] enums. Records that are malformed (unknown
//! kind, missing required field) decode to an `Invalid` variant that keeps
//! the raw record. Such a rule never fires and encodes back
//! unchanged.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::object::{ObjectType, VarValue};

/// Who an action applies to, or which object type a condition inspects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// `SELF`: every instance in a rule pass, or the subject of a collision pair.
    SelfRef,
    /// `OTHER`: the target of a collision pair.
    Other,
    /// Every instance of the given type.
    Type(ObjectType),
    /// A literal that names no type. Matches nothing.
    Unknown(String),
}

impl Target {
    /// Decode the literal used in project files.
    pub fn parse(s: &str) -> Self {
        match s {
            "SELF" => Self::SelfRef,
            "OTHER" => Self::Other,
            other => ObjectType::parse(other)
                .map(Self::Type)
                .unwrap_or_else(|| Self::Unknown(other.to_string())),
        }
    }

    /// The literal used in project files.
    pub fn as_str(&self) -> &str {
        match self {
            Self::SelfRef => "SELF",
            Self::Other => "OTHER",
            Self::Type(t) => t.as_str(),
            Self::Unknown(s) => s,
        }
    }

    /// Whether this selector names exactly the given type.
    pub fn matches_type(&self, kind: ObjectType) -> bool {
        matches!(self, Self::Type(t) if *t == kind)
    }
}

impl From<ObjectType> for Target {
    fn from(kind: ObjectType) -> Self {
        Self::Type(kind)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison operator used by variable conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// `=` (loose equality).
    Eq,
    /// `>`.
    Gt,
    /// `<`.
    Lt,
    /// `>=`.
    Ge,
    /// `<=`.
    Le,
}

impl CompareOp {
    /// Parse an operator literal.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "=" | "==" => Some(Self::Eq),
            ">" => Some(Self::Gt),
            "<" => Some(Self::Lt),
            ">=" => Some(Self::Ge),
            "<=" => Some(Self::Le),
            _ => None,
        }
    }

    /// The operator literal.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Ge => ">=",
            Self::Le => "<=",
        }
    }

    /// Compare two instance-variable values. Ordering operators are false
    /// unless both sides are numeric.
    pub fn holds(&self, lhs: &VarValue, rhs: &VarValue) -> bool {
        if *self == Self::Eq {
            return lhs.loose_eq(rhs);
        }
        match (lhs.as_number(), rhs.as_number()) {
            (Some(a), Some(b)) => self.holds_f64(a, b),
            _ => false,
        }
    }

    /// Compare two numbers.
    pub fn holds_f64(&self, lhs: f64, rhs: f64) -> bool {
        match self {
            Self::Eq => lhs == rhs,
            Self::Gt => lhs > rhs,
            Self::Lt => lhs < rhs,
            Self::Ge => lhs >= rhs,
            Self::Le => lhs <= rhs,
        }
    }
}

/// When a rule fires.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Every tick.
    Always,
    /// While the key code is held.
    KeyPressed {
        /// Key code as reported by the input source.
        key: String,
    },
    /// Global/scene variable equals the literal.
    VarEquals {
        /// Variable id.
        variable_id: String,
        /// Literal to compare against.
        value: f64,
    },
    /// Global/scene variable is greater than the literal.
    VarGreater {
        /// Variable id.
        variable_id: String,
        /// Literal to compare against.
        value: f64,
    },
    /// Global/scene variable is less than the literal.
    VarLess {
        /// Variable id.
        variable_id: String,
        /// Literal to compare against.
        value: f64,
    },
    /// Some live instance of `target` has a variable satisfying the comparison.
    ObjVarCompare {
        /// Type selector of the inspected instances.
        target: Target,
        /// Instance variable name.
        variable_name: String,
        /// Comparison operator.
        op: CompareOp,
        /// Literal to compare against.
        value: VarValue,
    },
    /// A `subject` instance overlaps a `target` instance (evaluated after physics).
    Collision {
        /// Type selector of the first member of each pair.
        subject: Target,
        /// Type selector of the second member of each pair.
        target: Target,
    },
    /// Mouse click. Accepted for compatibility; never true.
    MouseClick,
    /// Malformed condition. Never true.
    Invalid(Box<RawCondition>),
}

impl Condition {
    /// The wire name of the condition kind.
    pub fn kind_name(&self) -> &str {
        match self {
            Self::Always => "ALWAYS",
            Self::KeyPressed { .. } => "KEY_PRESSED",
            Self::VarEquals { .. } => "VAR_EQUALS",
            Self::VarGreater { .. } => "VAR_GT",
            Self::VarLess { .. } => "VAR_LT",
            Self::ObjVarCompare { .. } => "OBJ_VAR_COMPARE",
            Self::Collision { .. } => "COLLISION",
            Self::MouseClick => "MOUSE_CLICK",
            Self::Invalid(raw) => &raw.kind,
        }
    }

    /// Whether this is a collision condition (evaluated in the post-physics pass).
    pub fn is_collision(&self) -> bool {
        matches!(self, Self::Collision { .. })
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always | Self::MouseClick => f.write_str(self.kind_name()),
            Self::KeyPressed { key } => write!(f, "KEY_PRESSED {key}"),
            Self::VarEquals { variable_id, value } => write!(f, "VAR {variable_id} = {value}"),
            Self::VarGreater { variable_id, value } => write!(f, "VAR {variable_id} > {value}"),
            Self::VarLess { variable_id, value } => write!(f, "VAR {variable_id} < {value}"),
            Self::ObjVarCompare {
                target,
                variable_name,
                op,
                value,
            } => write!(f, "{target}.{variable_name} {} {value}", op.symbol()),
            Self::Collision { subject, target } => write!(f, "COLLISION {subject} x {target}"),
            Self::Invalid(raw) => write!(f, "invalid condition '{}'", raw.kind),
        }
    }
}

/// What a rule does when it fires. The instances it applies to are chosen
/// by the rule's [`Target`].
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Shift horizontally by `amount` per nominal frame.
    MoveX {
        /// Distance per nominal frame.
        amount: f64,
    },
    /// Shift vertically by `amount` per nominal frame.
    MoveY {
        /// Distance per nominal frame.
        amount: f64,
    },
    /// Accelerate vertically.
    Gravity {
        /// Velocity added per nominal frame.
        amount: f64,
    },
    /// Set vertical velocity, only when grounded.
    Jump {
        /// New vertical velocity (negative is up).
        velocity: f64,
    },
    /// Reverse horizontal velocity and patrol direction.
    ReverseX,
    /// Reverse vertical velocity and patrol direction.
    ReverseY,
    /// Remove the targets.
    Destroy,
    /// Spawn a prefab centered on each spawner.
    CreateObject {
        /// Template id of the prefab.
        prefab_id: String,
        /// Horizontal offset from the spawner's center.
        offset_x: f64,
        /// Vertical offset from the spawner's center.
        offset_y: f64,
    },
    /// Assign a global/scene variable.
    VarSet {
        /// Variable id.
        variable_id: String,
        /// New value.
        value: f64,
    },
    /// Add to a global/scene variable.
    VarAdd {
        /// Variable id.
        variable_id: String,
        /// Amount to add.
        value: f64,
    },
    /// Subtract from a global/scene variable.
    VarSub {
        /// Variable id.
        variable_id: String,
        /// Amount to subtract.
        value: f64,
    },
    /// Assign an instance variable.
    ObjVarSet {
        /// Instance variable name.
        variable_name: String,
        /// New value.
        value: VarValue,
    },
    /// Add to a numeric instance variable.
    ObjVarAdd {
        /// Instance variable name.
        variable_name: String,
        /// Amount to add.
        value: VarValue,
    },
    /// Subtract from a numeric instance variable (`hp` triggers damage handling).
    ObjVarSub {
        /// Instance variable name.
        variable_name: String,
        /// Amount to subtract.
        value: VarValue,
    },
    /// Switch the playing animation.
    SetAnimation {
        /// Animation name.
        animation_name: String,
    },
    /// Request a scene switch.
    GotoScene {
        /// Target scene id.
        scene_id: String,
    },
    /// Ask the host to play an audio clip.
    PlaySound {
        /// Audio asset id.
        clip_id: String,
        /// Playback volume in `0..=1`.
        volume: f64,
    },
    /// Malformed action. Applies nothing.
    Invalid(Box<RawAction>),
}

impl Action {
    /// The wire name of the action kind.
    pub fn kind_name(&self) -> &str {
        match self {
            Self::MoveX { .. } => "MOVE_X",
            Self::MoveY { .. } => "MOVE_Y",
            Self::Gravity { .. } => "GRAVITY",
            Self::Jump { .. } => "JUMP",
            Self::ReverseX => "REVERSE_X",
            Self::ReverseY => "REVERSE_Y",
            Self::Destroy => "DESTROY",
            Self::CreateObject { .. } => "CREATE_OBJECT",
            Self::VarSet { .. } => "VAR_SET",
            Self::VarAdd { .. } => "VAR_ADD",
            Self::VarSub { .. } => "VAR_SUB",
            Self::ObjVarSet { .. } => "OBJ_VAR_SET",
            Self::ObjVarAdd { .. } => "OBJ_VAR_ADD",
            Self::ObjVarSub { .. } => "OBJ_VAR_SUB",
            Self::SetAnimation { .. } => "SET_ANIMATION",
            Self::GotoScene { .. } => "GOTO_SCENE",
            Self::PlaySound { .. } => "PLAY_SOUND",
            Self::Invalid(raw) => &raw.kind,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoveX { amount }
            | Self::MoveY { amount }
            | Self::Gravity { amount } => write!(f, "{} {amount}", self.kind_name()),
            Self::Jump { velocity } => write!(f, "JUMP {velocity}"),
            Self::ReverseX | Self::ReverseY | Self::Destroy => f.write_str(self.kind_name()),
            Self::CreateObject {
                prefab_id,
                offset_x,
                offset_y,
            } => write!(f, "CREATE_OBJECT {prefab_id} @ ({offset_x}, {offset_y})"),
            Self::VarSet { variable_id, value } => write!(f, "VAR {variable_id} := {value}"),
            Self::VarAdd { variable_id, value } => write!(f, "VAR {variable_id} += {value}"),
            Self::VarSub { variable_id, value } => write!(f, "VAR {variable_id} -= {value}"),
            Self::ObjVarSet {
                variable_name,
                value,
            } => write!(f, ".{variable_name} := {value}"),
            Self::ObjVarAdd {
                variable_name,
                value,
            } => write!(f, ".{variable_name} += {value}"),
            Self::ObjVarSub {
                variable_name,
                value,
            } => write!(f, ".{variable_name} -= {value}"),
            Self::SetAnimation { animation_name } => write!(f, "SET_ANIMATION {animation_name}"),
            Self::GotoScene { scene_id } => write!(f, "GOTO_SCENE {scene_id}"),
            Self::PlaySound { clip_id, volume } => write!(f, "PLAY_SOUND {clip_id} ({volume})"),
            Self::Invalid(raw) => write!(f, "invalid action '{}'", raw.kind),
        }
    }
}

/// A condition → action pair ("when/then").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRule", into = "RawRule")]
pub struct Rule {
    /// Unique identifier; keys the rule's cooldown record.
    pub id: String,
    /// When the rule fires.
    pub condition: Condition,
    /// What the rule does.
    pub action: Action,
    /// Which instances the action applies to (spawners for `CREATE_OBJECT`).
    pub target: Target,
    /// Minimum seconds between firings; `0` disables gating.
    pub cooldown: f64,
}

impl Rule {
    /// Create a rule whose action targets the player.
    pub fn new(id: impl Into<String>, condition: Condition, action: Action) -> Self {
        Self {
            id: id.into(),
            condition,
            action,
            target: Target::Type(ObjectType::Player),
            cooldown: 0.0,
        }
    }

    /// Set the action target.
    pub fn targeting(mut self, target: impl Into<Target>) -> Self {
        self.target = target.into();
        self
    }

    /// Set the rule cooldown in seconds.
    pub fn with_cooldown(mut self, seconds: f64) -> Self {
        self.cooldown = seconds;
        self
    }
}

/// Condition record as written by the editor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCondition {
    /// Condition kind, e.g. `KEY_PRESSED`.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Key code (`KEY_PRESSED`) or target type (`COLLISION`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    /// Variable id for `VAR_*`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable_id: Option<String>,
    /// Instance variable name for `OBJ_VAR_COMPARE`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable_name: Option<String>,
    /// Comparison literal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<VarValue>,
    /// Inspected type (`OBJ_VAR_COMPARE`) or subject type (`COLLISION`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Comparison operator for `OBJ_VAR_COMPARE`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
}

/// Action record as written by the editor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAction {
    /// Action kind, e.g. `MOVE_X`.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// `SELF`, `OTHER`, or an object type literal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Numeric parameter for movement actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<f64>,
    /// Variable id for `VAR_*`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable_id: Option<String>,
    /// Instance variable name for `OBJ_VAR_*`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable_name: Option<String>,
    /// Value for variable actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<VarValue>,
    /// Animation name for `SET_ANIMATION`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_name: Option<String>,
    /// Scene id for `GOTO_SCENE`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_id: Option<String>,
    /// Audio asset id for `PLAY_SOUND`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_clip_id: Option<String>,
    /// Volume for `PLAY_SOUND`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    /// Prefab template id for `CREATE_OBJECT`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefab_id: Option<String>,
    /// Spawn offset from the spawner's center.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_x: Option<f64>,
    /// Spawn offset from the spawner's center.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_y: Option<f64>,
    /// Rule cooldown in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooldown: Option<f64>,
}

/// Rule record as written by the editor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRule {
    /// Rule id.
    #[serde(default)]
    pub id: String,
    /// Condition record.
    #[serde(default)]
    pub condition: RawCondition,
    /// Action record.
    #[serde(default)]
    pub action: RawAction,
}

fn non_empty(s: &Option<String>) -> Option<String> {
    s.as_ref().filter(|s| !s.is_empty()).cloned()
}

fn numeric(value: &Option<VarValue>) -> f64 {
    value.as_ref().and_then(VarValue::as_number).unwrap_or(0.0)
}

impl From<RawCondition> for Condition {
    fn from(raw: RawCondition) -> Self {
        let decoded = match raw.kind.as_str() {
            "ALWAYS" => Some(Self::Always),
            "MOUSE_CLICK" => Some(Self::MouseClick),
            "KEY_PRESSED" => non_empty(&raw.param).map(|key| Self::KeyPressed { key }),
            "VAR_EQUALS" | "VAR_GT" | "VAR_LT" => {
                non_empty(&raw.variable_id).map(|variable_id| {
                    let value = numeric(&raw.value);
                    match raw.kind.as_str() {
                        "VAR_EQUALS" => Self::VarEquals { variable_id, value },
                        "VAR_GT" => Self::VarGreater { variable_id, value },
                        _ => Self::VarLess { variable_id, value },
                    }
                })
            }
            "OBJ_VAR_COMPARE" => {
                let op = match raw.operator.as_deref() {
                    None | Some("") => Some(CompareOp::Eq),
                    Some(s) => CompareOp::parse(s),
                };
                match (non_empty(&raw.variable_name), raw.value.clone(), op) {
                    (Some(variable_name), Some(value), Some(op)) => Some(Self::ObjVarCompare {
                        target: Target::parse(raw.target.as_deref().unwrap_or("Player")),
                        variable_name,
                        op,
                        value,
                    }),
                    _ => None,
                }
            }
            "COLLISION" => non_empty(&raw.param).map(|target| Self::Collision {
                subject: Target::parse(raw.target.as_deref().unwrap_or("Player")),
                target: Target::parse(&target),
            }),
            _ => None,
        };
        decoded.unwrap_or_else(|| Self::Invalid(Box::new(raw)))
    }
}

impl From<Condition> for RawCondition {
    fn from(condition: Condition) -> Self {
        let kind = condition.kind_name().to_string();
        match condition {
            Condition::Always | Condition::MouseClick => Self {
                kind,
                ..Self::default()
            },
            Condition::KeyPressed { key } => Self {
                kind,
                param: Some(key),
                ..Self::default()
            },
            Condition::VarEquals { variable_id, value }
            | Condition::VarGreater { variable_id, value }
            | Condition::VarLess { variable_id, value } => Self {
                kind,
                variable_id: Some(variable_id),
                value: Some(VarValue::Number(value)),
                ..Self::default()
            },
            Condition::ObjVarCompare {
                target,
                variable_name,
                op,
                value,
            } => Self {
                kind,
                variable_name: Some(variable_name),
                value: Some(value),
                target: Some(target.as_str().to_string()),
                operator: Some(op.symbol().to_string()),
                ..Self::default()
            },
            Condition::Collision { subject, target } => Self {
                kind,
                param: Some(target.as_str().to_string()),
                target: Some(subject.as_str().to_string()),
                ..Self::default()
            },
            Condition::Invalid(raw) => *raw,
        }
    }
}

impl From<&RawAction> for Action {
    fn from(raw: &RawAction) -> Self {
        let amount = raw.param.unwrap_or(0.0);
        let decoded = match raw.kind.as_str() {
            "MOVE_X" => Some(Self::MoveX { amount }),
            "MOVE_Y" => Some(Self::MoveY { amount }),
            "GRAVITY" => Some(Self::Gravity { amount }),
            "JUMP" => Some(Self::Jump { velocity: amount }),
            "REVERSE_X" => Some(Self::ReverseX),
            "REVERSE_Y" => Some(Self::ReverseY),
            "DESTROY" => Some(Self::Destroy),
            "CREATE_OBJECT" => non_empty(&raw.prefab_id).map(|prefab_id| Self::CreateObject {
                prefab_id,
                offset_x: raw.offset_x.unwrap_or(0.0),
                offset_y: raw.offset_y.unwrap_or(0.0),
            }),
            "VAR_SET" | "VAR_ADD" | "VAR_SUB" => {
                non_empty(&raw.variable_id).map(|variable_id| {
                    let value = numeric(&raw.value);
                    match raw.kind.as_str() {
                        "VAR_SET" => Self::VarSet { variable_id, value },
                        "VAR_ADD" => Self::VarAdd { variable_id, value },
                        _ => Self::VarSub { variable_id, value },
                    }
                })
            }
            "OBJ_VAR_SET" | "OBJ_VAR_ADD" | "OBJ_VAR_SUB" => {
                match (non_empty(&raw.variable_name), raw.value.clone()) {
                    (Some(variable_name), Some(value)) => Some(match raw.kind.as_str() {
                        "OBJ_VAR_SET" => Self::ObjVarSet {
                            variable_name,
                            value,
                        },
                        "OBJ_VAR_ADD" => Self::ObjVarAdd {
                            variable_name,
                            value,
                        },
                        _ => Self::ObjVarSub {
                            variable_name,
                            value,
                        },
                    }),
                    _ => None,
                }
            }
            "SET_ANIMATION" => non_empty(&raw.animation_name)
                .map(|animation_name| Self::SetAnimation { animation_name }),
            "GOTO_SCENE" => non_empty(&raw.scene_id).map(|scene_id| Self::GotoScene { scene_id }),
            "PLAY_SOUND" => non_empty(&raw.audio_clip_id).map(|clip_id| Self::PlaySound {
                clip_id,
                volume: raw.volume.unwrap_or(1.0),
            }),
            _ => None,
        };
        decoded.unwrap_or_else(|| Self::Invalid(Box::new(raw.clone())))
    }
}

impl From<RawRule> for Rule {
    fn from(raw: RawRule) -> Self {
        let action = Action::from(&raw.action);
        let target = match (&action, raw.action.target.as_deref()) {
            (_, Some(t)) if !t.is_empty() => Target::parse(t),
            (Action::CreateObject { .. }, _) => Target::Type(ObjectType::Player),
            _ => Target::Unknown(String::new()),
        };
        Self {
            id: raw.id,
            condition: Condition::from(raw.condition),
            action,
            target,
            cooldown: raw.action.cooldown.unwrap_or(0.0),
        }
    }
}

impl From<Rule> for RawRule {
    fn from(rule: Rule) -> Self {
        let target = match &rule.target {
            Target::Unknown(s) if s.is_empty() => None,
            t => Some(t.as_str().to_string()),
        };
        let cooldown = (rule.cooldown != 0.0).then_some(rule.cooldown);
        let kind = rule.action.kind_name().to_string();
        let base = RawAction {
            kind,
            target,
            cooldown,
            ..RawAction::default()
        };
        let action = match rule.action {
            Action::MoveX { amount } | Action::MoveY { amount } | Action::Gravity { amount } => {
                RawAction {
                    param: Some(amount),
                    ..base
                }
            }
            Action::Jump { velocity } => RawAction {
                param: Some(velocity),
                ..base
            },
            Action::ReverseX | Action::ReverseY | Action::Destroy => base,
            Action::CreateObject {
                prefab_id,
                offset_x,
                offset_y,
            } => RawAction {
                prefab_id: Some(prefab_id),
                offset_x: (offset_x != 0.0).then_some(offset_x),
                offset_y: (offset_y != 0.0).then_some(offset_y),
                ..base
            },
            Action::VarSet { variable_id, value }
            | Action::VarAdd { variable_id, value }
            | Action::VarSub { variable_id, value } => RawAction {
                variable_id: Some(variable_id),
                value: Some(VarValue::Number(value)),
                ..base
            },
            Action::ObjVarSet {
                variable_name,
                value,
            }
            | Action::ObjVarAdd {
                variable_name,
                value,
            }
            | Action::ObjVarSub {
                variable_name,
                value,
            } => RawAction {
                variable_name: Some(variable_name),
                value: Some(value),
                ..base
            },
            Action::SetAnimation { animation_name } => RawAction {
                animation_name: Some(animation_name),
                ..base
            },
            Action::GotoScene { scene_id } => RawAction {
                scene_id: Some(scene_id),
                ..base
            },
            Action::PlaySound { clip_id, volume } => RawAction {
                audio_clip_id: Some(clip_id),
                volume: Some(volume),
                ..base
            },
            Action::Invalid(raw) => *raw,
        };
        Self {
            id: rule.id,
            condition: rule.condition.into(),
            action,
        }
    }
}
