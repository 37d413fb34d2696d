//! Read-only snapshots of the stage, for rendering hosts and exports.

use std::collections::BTreeMap;

use sc_core::object::VarValue;
use serde::Serialize;

use crate::instance::RuntimeInstance;
use crate::stage::Stage;

/// What a renderer needs to draw one instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceView {
    /// Instance id.
    pub id: String,
    /// Id of the template it was created from.
    pub template_id: String,
    /// Display name.
    pub name: String,
    /// Authored type.
    pub kind: String,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// Heading in degrees.
    pub rotation: f64,
    /// -1 when facing left, else 1.
    pub facing: f64,
    /// Playing animation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation: Option<String>,
    /// Frame index within the playing animation.
    pub frame: usize,
    /// Whether the instance is inside its invincibility window (renderers blink it).
    pub invincible: bool,
    /// Instance variables.
    pub variables: BTreeMap<String, VarValue>,
}

impl From<&RuntimeInstance> for InstanceView {
    fn from(inst: &RuntimeInstance) -> Self {
        Self {
            id: inst.id.0.to_string(),
            template_id: inst.template.id.clone(),
            name: inst.name().to_string(),
            kind: inst.kind().as_str().to_string(),
            x: inst.x,
            y: inst.y,
            width: inst.width,
            height: inst.height,
            rotation: inst.rotation,
            facing: inst.facing(),
            animation: inst.current_animation.clone(),
            frame: inst.anim_frame,
            invincible: inst.is_invincible(),
            variables: inst.variables.clone(),
        }
    }
}

/// The stage as of the end of one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    /// Tick number.
    pub tick: u64,
    /// Active scene id.
    pub scene_id: String,
    /// Live instances in draw order.
    pub instances: Vec<InstanceView>,
    /// Global and scene variables.
    pub variables: BTreeMap<String, f64>,
}

impl Frame {
    /// Snapshot the stage.
    pub fn capture(stage: &Stage, tick: u64) -> Self {
        Self {
            tick,
            scene_id: stage.scene_id.clone(),
            instances: stage.instances.iter().map(InstanceView::from).collect(),
            variables: stage.variables.snapshot(),
        }
    }

    /// Find an instance by display name (case-insensitive).
    pub fn instance_named(&self, name: &str) -> Option<&InstanceView> {
        self.instances
            .iter()
            .find(|i| i.name.eq_ignore_ascii_case(name))
    }
}
