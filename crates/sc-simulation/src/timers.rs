use sc_core::object::VarValue;

use crate::context::SimContext;
use crate::error::SimResult;
use crate::system::System;

/// Name of the instance variable that counts down to automatic removal.
pub const LIFETIME_VAR: &str = "lifetime";

/// Counts down invincibility and `lifetime` timers.
///
/// Invincibility runs on simulated time, so it pauses during hit-stop.
/// Lifetimes are not touched at all while time is frozen. An instance
/// whose numeric `lifetime` reaches zero is recycled at the end of the tick.
#[derive(Debug, Default)]
pub struct TimerSystem;

impl TimerSystem {
    /// Create the system.
    pub fn new() -> Self {
        Self
    }
}

impl System for TimerSystem {
    fn name(&self) -> &str {
        "timers"
    }

    fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        let step = ctx.step;
        let mut expired = Vec::new();

        for inst in &mut ctx.stage.instances {
            if inst.invincible_timer > 0.0 {
                inst.invincible_timer = (inst.invincible_timer - step.sim_dt).max(0.0);
            }
            if step.frozen() {
                continue;
            }
            if let Some(VarValue::Number(life)) = inst.variables.get_mut(LIFETIME_VAR) {
                *life -= step.sim_dt;
                if *life <= 0.0 {
                    expired.push(inst.id);
                }
            }
        }

        for id in expired {
            ctx.stage.mark_recycled(id);
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
