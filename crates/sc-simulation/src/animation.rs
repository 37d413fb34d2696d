use sc_core::object::Animation;

use crate::context::SimContext;
use crate::error::SimResult;
use crate::event::SimEventKind;
use crate::instance::RuntimeInstance;
use crate::system::System;

/// Horizontal speed above which an instance counts as moving.
const MOVING_SPEED: f64 = 0.1;

/// Switches between idle and run animations and advances frames.
///
/// Frame timers run on simulated time, so animations hold still during
/// hit-stop.
#[derive(Debug, Default)]
pub struct AnimationSystem;

impl AnimationSystem {
    /// Create the system.
    pub fn new() -> Self {
        Self
    }
}

impl System for AnimationSystem {
    fn name(&self) -> &str {
        "animation"
    }

    fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        let elapsed_ms = ctx.step.frame_ms * ctx.step.effect_scale;
        let mut switched = Vec::new();

        for inst in &mut ctx.stage.instances {
            if ctx.stage.scratch.recycle.contains(&inst.id) || inst.template.animations.is_empty() {
                continue;
            }
            if let Some(name) = auto_switch(inst) {
                switched.push((inst.id, inst.name().to_string(), name));
            }
            advance(inst, elapsed_ms);
        }

        for (instance, name, animation) in switched {
            ctx.emit(
                SimEventKind::AnimationChanged {
                    instance,
                    animation: animation.clone(),
                },
                format!("{name} ({instance}) plays '{animation}'"),
            );
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

fn is_moving(inst: &RuntimeInstance) -> bool {
    inst.vx.abs() > MOVING_SPEED || inst.patrol().is_some_and(|_| inst.auto_vx != 0.0)
}

/// Idle becomes Run (or Walk) while moving, and back again when still.
/// Only the frame index restarts; the frame timer carries over.
fn auto_switch(inst: &mut RuntimeInstance) -> Option<String> {
    let moving = is_moving(inst);
    let current = inst.current_animation.as_deref();
    let next = if moving && current == Some("Idle") {
        find(inst, |a| a.name == "Run" || a.name == "Walk")
    } else if !moving && matches!(current, Some("Run" | "Walk")) {
        find(inst, |a| a.name == "Idle")
    } else {
        None
    }?;
    inst.current_animation = Some(next.clone());
    inst.anim_frame = 0;
    Some(next)
}

fn find(inst: &RuntimeInstance, pred: impl Fn(&Animation) -> bool) -> Option<String> {
    inst.template
        .animations
        .iter()
        .find(|a| pred(a))
        .map(|a| a.name.clone())
}

/// Advance the playing animation by `elapsed_ms`, at most one frame per call.
fn advance(inst: &mut RuntimeInstance, elapsed_ms: f64) {
    let Some((frames, fps, looping)) = inst
        .playing()
        .map(|a| (a.frame_asset_ids.len(), a.fps, a.looping))
    else {
        return;
    };
    if frames == 0 {
        return;
    }
    inst.anim_timer += elapsed_ms;
    let ms_per_frame = 1000.0 / fps;
    if inst.anim_timer >= ms_per_frame {
        inst.anim_timer -= ms_per_frame;
        inst.anim_frame += 1;
        if inst.anim_frame >= frames {
            inst.anim_frame = if looping { 0 } else { frames - 1 };
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use sc_core::object::{AutoMove, ObjectTemplate, ObjectType};

    use super::*;

    fn anim(name: &str, frames: usize, looping: bool) -> Animation {
        Animation {
            id: name.to_lowercase(),
            name: name.into(),
            frame_asset_ids: (0..frames).map(|i| format!("{name}{i}")).collect(),
            fps: 10.0,
            looping,
        }
    }

    fn hero(template: ObjectTemplate) -> RuntimeInstance {
        let mut inst = RuntimeInstance::from_template(Arc::new(
            template
                .with_animation(anim("Idle", 2, true))
                .with_animation(anim("Run", 4, true)),
        ));
        inst.current_animation = Some("Idle".into());
        inst
    }

    fn base() -> ObjectTemplate {
        ObjectTemplate::new("p", "Hero", ObjectType::Player, 0.0, 0.0, 32.0, 32.0)
    }

    #[test]
    fn moving_switches_to_run_and_back() {
        let mut inst = hero(base());
        inst.vx = 3.0;
        assert_eq!(auto_switch(&mut inst).as_deref(), Some("Run"));
        assert_eq!(auto_switch(&mut inst), None);

        inst.vx = 0.05;
        assert_eq!(auto_switch(&mut inst).as_deref(), Some("Idle"));
    }

    #[test]
    fn patrol_counts_as_moving() {
        let mut inst = hero(base().with_auto_move(AutoMove::looping(1.0, 0.0, 50.0)));
        assert_eq!(auto_switch(&mut inst).as_deref(), Some("Run"));
    }

    #[test]
    fn frames_wrap_or_clamp() {
        let mut inst = hero(base());
        for _ in 0..2 {
            advance(&mut inst, 100.0);
        }
        assert_eq!(inst.anim_frame, 0);

        let mut once = RuntimeInstance::from_template(Arc::new(
            base().with_animation(anim("Hit", 2, false)),
        ));
        once.current_animation = Some("Hit".into());
        for _ in 0..5 {
            advance(&mut once, 100.0);
        }
        assert_eq!(once.anim_frame, 1);
    }

    #[test]
    fn one_frame_per_tick_at_most() {
        let mut inst = hero(base());
        advance(&mut inst, 250.0);
        assert_eq!(inst.anim_frame, 1);
        assert_eq!(inst.anim_timer, 150.0);
    }

    #[test]
    fn frozen_time_holds_frame() {
        let mut inst = hero(base());
        advance(&mut inst, 0.0);
        assert_eq!((inst.anim_frame, inst.anim_timer), (0, 0.0));
    }
}
