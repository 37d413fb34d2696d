//! Action effects: how a fired rule changes instances, variables, and the stage.

use log::{debug, trace, warn};
use sc_core::object::{ObjectType, VarValue};
use sc_core::rule::Action;
use sc_core::scene::ViewMode;

use crate::config::SimConfig;
use crate::context::SimContext;
use crate::event::SimEventKind;
use crate::instance::{InstanceId, RuntimeInstance};
use crate::stage::Stage;
use crate::variables::VariableTable;

/// Distance an instance is nudged after reversing, so it leaves the contact.
const REVERSE_NUDGE: f64 = 2.0;

/// Something a per-instance action did that the rest of the stage must hear about.
#[derive(Debug, Clone, PartialEq)]
pub enum InstanceEffect {
    /// The instance should leave the stage at the end of the tick.
    Recycle,
    /// The instance took `hp` damage and is now invincible.
    Damaged,
    /// The instance switched to the named animation.
    AnimationChanged(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VarOp {
    Set,
    Add,
    Sub,
}

/// Apply a per-instance action to one instance.
///
/// Actions that are not per-instance (variables, sounds, scene switches,
/// spawning) do nothing here.
pub fn apply_to_instance(
    action: &Action,
    inst: &mut RuntimeInstance,
    physics_scale: f64,
    config: &SimConfig,
) -> Option<InstanceEffect> {
    match action {
        Action::MoveX { amount } => inst.x += amount * physics_scale,
        Action::MoveY { amount } => inst.y += amount * physics_scale,
        Action::Gravity { amount } => inst.vy += amount * physics_scale,
        Action::Jump { velocity } => {
            if inst.grounded {
                inst.vy = *velocity;
                inst.grounded = false;
            }
        }
        Action::ReverseX => {
            inst.vx = -inst.vx;
            inst.auto_vx = -inst.auto_vx;
            inst.x += nudge(inst.auto_vx);
        }
        Action::ReverseY => {
            inst.vy = -inst.vy;
            inst.auto_vy = -inst.auto_vy;
            inst.y += nudge(inst.auto_vy);
        }
        Action::Destroy => return Some(InstanceEffect::Recycle),
        Action::ObjVarSet {
            variable_name,
            value,
        } => return change_variable(inst, VarOp::Set, variable_name, value, config),
        Action::ObjVarAdd {
            variable_name,
            value,
        } => return change_variable(inst, VarOp::Add, variable_name, value, config),
        Action::ObjVarSub {
            variable_name,
            value,
        } => return change_variable(inst, VarOp::Sub, variable_name, value, config),
        Action::SetAnimation { animation_name } => {
            let differs = inst.current_animation.as_deref() != Some(animation_name.as_str());
            if differs && inst.animation(animation_name).is_some() {
                inst.current_animation = Some(animation_name.clone());
                inst.anim_frame = 0;
                inst.anim_timer = 0.0;
                return Some(InstanceEffect::AnimationChanged(animation_name.clone()));
            }
        }
        Action::CreateObject { .. }
        | Action::VarSet { .. }
        | Action::VarAdd { .. }
        | Action::VarSub { .. }
        | Action::GotoScene { .. }
        | Action::PlaySound { .. }
        | Action::Invalid(_) => {}
    }
    None
}

fn nudge(velocity: f64) -> f64 {
    if velocity > 0.0 {
        REVERSE_NUDGE
    } else {
        -REVERSE_NUDGE
    }
}

/// Change an instance variable.
///
/// A missing variable starts at 0, except that subtracting from a missing
/// `hp` starts it at the instance's max hp. Subtracting a number from `hp`
/// is damage: ignored while invincible, otherwise it starts the invincibility
/// window.
fn change_variable(
    inst: &mut RuntimeInstance,
    op: VarOp,
    name: &str,
    value: &VarValue,
    config: &SimConfig,
) -> Option<InstanceEffect> {
    let is_hp_sub = op == VarOp::Sub && name.eq_ignore_ascii_case("hp");
    let max_hp = inst.max_hp;
    let current = inst
        .variables
        .entry(name.to_string())
        .or_insert_with(|| VarValue::Number(if is_hp_sub { max_hp } else { 0.0 }));

    if is_hp_sub {
        if let Some(amount) = value.number() {
            if inst.invincible_timer > 0.0 {
                return None;
            }
            inst.invincible_timer = config.invincibility;
            if let VarValue::Number(hp) = current {
                *hp -= amount;
            }
            return Some(InstanceEffect::Damaged);
        }
    }

    match (op, &mut *current, value.number()) {
        (VarOp::Set, _, _) => *current = value.clone(),
        (VarOp::Add, VarValue::Number(n), Some(amount)) => *n += amount,
        (VarOp::Sub, VarValue::Number(n), Some(amount)) => *n -= amount,
        _ => {}
    }
    None
}

/// Apply a `VAR_*` action to the variable table. Returns whether it was one.
pub fn apply_variable_action(action: &Action, variables: &mut VariableTable) -> bool {
    match action {
        Action::VarSet { variable_id, value } => variables.set(variable_id, *value),
        Action::VarAdd { variable_id, value } => variables.add(variable_id, *value),
        Action::VarSub { variable_id, value } => variables.add(variable_id, -value),
        _ => return false,
    }
    true
}

/// Spawn a prefab centered on the instance at `source_index` plus an offset.
///
/// Gated by the source's own spawn cooldown. In top-down scenes the spawn
/// inherits the source's heading and its patrol is rotated to match, so a
/// prefab authored to move "forward" (+x) travels the way the source faces.
/// The rotated patrol also seeds the spawn's velocity, so it moves under
/// both each tick.
/// Returns the new instance's id, or `None` when the prefab is unknown or
/// the source is cooling down.
pub fn spawn_from(
    stage: &mut Stage,
    source_index: usize,
    prefab_id: &str,
    offset: (f64, f64),
    now: f64,
) -> Option<InstanceId> {
    let Some(prefab) = stage.prefabs.get(prefab_id).cloned() else {
        trace!("CREATE_OBJECT skipped: no prefab '{prefab_id}' in scene");
        return None;
    };

    let source = stage.instances.get_mut(source_index)?;
    let cooldown = source.template.spawn_cooldown;
    if cooldown > 0.0 {
        if let Some(last) = source.last_spawn_time {
            if now - last < cooldown {
                return None;
            }
        }
        source.last_spawn_time = Some(now);
    }
    let (cx, cy) = source.center();
    let heading = source.rotation;

    let mut inst = stage.pool.acquire(&prefab);
    if stage.view == ViewMode::TopDown {
        inst.rotation = heading;
        if let Some(patrol) = inst.patrol().copied() {
            let (sin, cos) = heading.to_radians().sin_cos();
            inst.auto_vx = patrol.speed_x * cos - patrol.speed_y * sin;
            inst.auto_vy = patrol.speed_x * sin + patrol.speed_y * cos;
            inst.vx = inst.auto_vx;
            inst.vy = inst.auto_vy;
        }
    }
    inst.place_centered(cx + offset.0, cy + offset.1);

    let id = inst.id;
    stage.scratch.spawns.push(inst);
    Some(id)
}

/// Fire a rule's action.
///
/// `members` are the indices of the instances the action applies to: the
/// targets of per-instance actions, or the spawners of `CREATE_OBJECT`.
pub fn fire(ctx: &mut SimContext<'_>, action: &Action, members: &[usize]) {
    match action {
        Action::PlaySound { clip_id, volume } => ctx.emit(
            SimEventKind::SoundTriggered {
                clip_id: clip_id.clone(),
                volume: *volume,
            },
            format!("play '{clip_id}' at volume {volume}"),
        ),
        Action::GotoScene { scene_id } => request_scene(ctx, scene_id),
        Action::VarSet { .. } | Action::VarAdd { .. } | Action::VarSub { .. } => {
            apply_variable_action(action, &mut ctx.stage.variables);
        }
        Action::CreateObject {
            prefab_id,
            offset_x,
            offset_y,
        } => {
            let now = ctx.now();
            for &index in members {
                if let Some(id) =
                    spawn_from(ctx.stage, index, prefab_id, (*offset_x, *offset_y), now)
                {
                    debug!("tick {}: spawned {id} from prefab '{prefab_id}'", ctx.tick());
                    ctx.emit(
                        SimEventKind::Spawned {
                            instance: id,
                            prefab_id: prefab_id.clone(),
                        },
                        format!("spawned {id} from prefab '{prefab_id}'"),
                    );
                }
            }
        }
        Action::Invalid(_) => {}
        _ => {
            let scale = ctx.step.physics_scale;
            for &index in members {
                let Some(inst) = ctx.stage.instances.get_mut(index) else {
                    continue;
                };
                if let Some(effect) = apply_to_instance(action, inst, scale, ctx.config) {
                    settle(ctx, index, effect);
                }
            }
        }
    }
}

/// Record a scene switch request.
pub fn request_scene(ctx: &mut SimContext<'_>, scene_id: &str) {
    ctx.stage.request_scene(scene_id);
    ctx.emit(
        SimEventKind::SceneSwitchRequested {
            scene_id: scene_id.to_string(),
        },
        format!("switch to scene '{scene_id}' requested"),
    );
}

fn settle(ctx: &mut SimContext<'_>, index: usize, effect: InstanceEffect) {
    let Some(inst) = ctx.stage.instances.get(index) else {
        warn!("instance index {index} vanished while applying an action");
        return;
    };
    let id = inst.id;
    match effect {
        InstanceEffect::Recycle => ctx.stage.mark_recycled(id),
        InstanceEffect::Damaged => {
            let (x, y) = inst.center();
            let is_player = inst.kind() == ObjectType::Player;
            let name = inst.name().to_string();
            ctx.stage.hit_stop = ctx.config.hit_stop;
            ctx.emit(
                SimEventKind::DamageFeedback {
                    instance: id,
                    x,
                    y,
                    is_player,
                },
                format!("{name} ({id}) took damage"),
            );
            let seconds = ctx.config.hit_stop;
            ctx.emit(
                SimEventKind::HitStop { seconds },
                format!("hit-stop for {seconds}s"),
            );
        }
        InstanceEffect::AnimationChanged(animation) => {
            let name = inst.name().to_string();
            ctx.emit(
                SimEventKind::AnimationChanged {
                    instance: id,
                    animation: animation.clone(),
                },
                format!("{name} ({id}) plays '{animation}'"),
            );
        }
    }
}
