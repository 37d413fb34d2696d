//! The collision rule pass: fires `COLLISION` rules once per overlapping pair.

use std::sync::Arc;

use sc_core::rule::{Condition, Target};

use super::action;
use crate::context::SimContext;
use crate::error::SimResult;
use crate::stage::Stage;
use crate::system::System;

/// Runs `COLLISION` rules after physics has settled positions.
///
/// Each touching (subject, target) pair fires the rule once. Per-instance
/// actions apply to the pair members the rule's target selects: `SELF`
/// picks the subject, `OTHER` picks the target, and a type picks whichever
/// members have it. Collision rules have no cooldown and do not run while
/// hit-stop freezes time.
#[derive(Debug, Default)]
pub struct CollisionRuleSystem;

impl CollisionRuleSystem {
    /// Create the system.
    pub fn new() -> Self {
        Self
    }
}

impl System for CollisionRuleSystem {
    fn name(&self) -> &str {
        "collision-rules"
    }

    fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        if ctx.step.frozen() {
            return Ok(());
        }
        let rules = Arc::clone(&ctx.stage.rules);

        for rule in rules.iter() {
            let Condition::Collision { subject, target } = &rule.condition else {
                continue;
            };
            let count = ctx.stage.instances.len();
            for a in 0..count {
                if !subject.matches_type(ctx.stage.instances[a].kind()) {
                    continue;
                }
                for b in 0..count {
                    if a == b || !touching(ctx.stage, a, b, target) {
                        continue;
                    }
                    let members = pair_members(ctx.stage, &rule.target, a, b);
                    action::fire(ctx, &rule.action, &members);
                }
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

fn touching(stage: &Stage, a: usize, b: usize, target: &Target) -> bool {
    let (first, second) = (&stage.instances[a], &stage.instances[b]);
    target.matches_type(second.kind())
        && first.bounds().intersects(&second.bounds())
}

fn pair_members(stage: &Stage, selector: &Target, subject: usize, other: usize) -> Vec<usize> {
    let mut members = Vec::with_capacity(2);
    if *selector == Target::SelfRef || selector.matches_type(stage.instances[subject].kind()) {
        members.push(subject);
    }
    if *selector == Target::Other || selector.matches_type(stage.instances[other].kind()) {
        members.push(other);
    }
    members
}
