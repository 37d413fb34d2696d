//! Movement: gravity, patrols, velocity integration, the floor line, and
//! push-out against solid instances.

use log::trace;
use sc_core::object::{AutoMove, ObjectType};
use sc_core::scene::ViewMode;

use crate::config::SimConfig;
use crate::context::SimContext;
use crate::error::SimResult;
use crate::instance::RuntimeInstance;
use crate::stage::Stage;
use crate::system::System;

/// Minimum movement per tick that turns a top-down player.
const HEADING_EPSILON: f64 = 0.01;

/// Integrates motion and resolves solid collisions.
///
/// Instances are processed in order and resolved against the solids in
/// place, so an earlier push-out is visible to later instances in the
/// same tick. Nothing moves while hit-stop freezes time.
#[derive(Debug, Default)]
pub struct PhysicsSystem;

impl PhysicsSystem {
    /// Create the system.
    pub fn new() -> Self {
        Self
    }
}

impl System for PhysicsSystem {
    fn name(&self) -> &str {
        "physics"
    }

    fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        if ctx.stage.view == ViewMode::TopDown {
            update_headings(ctx.stage);
        }
        if ctx.step.frozen() {
            return Ok(());
        }

        let stage = &mut *ctx.stage;
        let solids: Vec<usize> = stage
            .instances
            .iter()
            .enumerate()
            .filter(|(_, inst)| inst.has_collision() && !stage.scratch.recycle.contains(&inst.id))
            .map(|(index, _)| index)
            .collect();

        let scale = ctx.step.physics_scale;
        for index in 0..stage.instances.len() {
            if stage.is_recycled(stage.instances[index].id) {
                continue;
            }
            integrate(&mut stage.instances[index], scale, ctx.config);
            if stage.instances[index].has_collision() {
                resolve_solids(&mut stage.instances, index, &solids);
            }
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

/// Turn each top-down player to face the way it moved since the tick began.
fn update_headings(stage: &mut Stage) {
    for inst in &mut stage.instances {
        if inst.kind() != ObjectType::Player {
            continue;
        }
        let Some(&(start_x, start_y)) = stage.scratch.start_positions.get(&inst.id) else {
            continue;
        };
        let (dx, dy) = (inst.x - start_x, inst.y - start_y);
        if dx.abs() > HEADING_EPSILON || dy.abs() > HEADING_EPSILON {
            inst.rotation = dy.atan2(dx).to_degrees();
        }
    }
}

/// Gravity, patrol, velocity, and the floor line for one instance.
pub fn integrate(inst: &mut RuntimeInstance, scale: f64, config: &SimConfig) {
    if inst.has_gravity() {
        inst.vy += config.gravity * scale;
    }

    if let Some(patrol) = inst.patrol().copied() {
        inst.x += inst.auto_vx * scale;
        inst.y += inst.auto_vy * scale;
        if patrol.looping {
            bounce(inst, &patrol);
        }
    }

    inst.x += inst.vx * scale;
    inst.y += inst.vy * scale;

    if inst.has_gravity() && inst.y + inst.height > config.floor_y {
        inst.y = config.floor_y - inst.height;
        inst.vy = 0.0;
        inst.grounded = true;
    }
}

/// Flip a looping patrol once it passes either end of its range.
fn bounce(inst: &mut RuntimeInstance, patrol: &AutoMove) {
    let range = patrol.effective_range();
    if patrol.speed_x != 0.0 {
        let dist = inst.x - inst.start_x;
        if inst.auto_vx > 0.0 && dist > range {
            inst.auto_vx = -patrol.speed_x.abs();
        } else if inst.auto_vx < 0.0 && dist < 0.0 {
            inst.auto_vx = patrol.speed_x.abs();
        }
    }
    if patrol.speed_y != 0.0 {
        let dist = inst.y - inst.start_y;
        if inst.auto_vy > 0.0 && dist > range {
            inst.auto_vy = -patrol.speed_y.abs();
        } else if inst.auto_vy < 0.0 && dist < 0.0 {
            inst.auto_vy = patrol.speed_y.abs();
        }
    }
}

/// Push the instance at `index` out of every solid it overlaps.
///
/// Each overlap resolves along the axis with the strictly smaller
/// penetration, so equal overlaps resolve vertically. Landing on top of a
/// solid grounds the instance.
pub fn resolve_solids(instances: &mut [RuntimeInstance], index: usize, solids: &[usize]) {
    for &other_index in solids {
        if other_index == index || instances[other_index].id == instances[index].id {
            continue;
        }
        let other = instances[other_index].bounds();
        let inst = &mut instances[index];
        let bounds = inst.bounds();
        if !bounds.intersects(&other) {
            continue;
        }

        let (overlap_x, overlap_y) = bounds.overlap(&other);
        let (cx, cy) = bounds.center();
        let (other_cx, other_cy) = other.center();
        if overlap_x < overlap_y {
            inst.x += if cx < other_cx { -overlap_x } else { overlap_x };
            inst.vx = 0.0;
        } else {
            if cy < other_cy {
                inst.y -= overlap_y;
                inst.grounded = true;
            } else {
                inst.y += overlap_y;
            }
            inst.vy = 0.0;
        }
        trace!(
            "{} pushed out of solid {} ({overlap_x:.2}, {overlap_y:.2})",
            instances[index].name(),
            instances[other_index].name()
        );
    }
}
