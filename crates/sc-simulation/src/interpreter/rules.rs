//! The main rule pass: every non-collision rule in authored order, with cooldowns.

use std::collections::HashMap;
use std::sync::Arc;

use log::trace;
use sc_core::rule::{Action, Condition, Rule, Target};

use super::action;
use super::condition;
use crate::context::SimContext;
use crate::error::SimResult;
use crate::stage::Stage;
use crate::system::System;

/// Runs every non-collision rule once per tick, in authored order.
///
/// A rule with a cooldown fires at most once per cooldown window, measured
/// in scene time. While hit-stop freezes time only `GOTO_SCENE` still takes
/// effect, though cooldowns keep being consumed.
#[derive(Debug, Default)]
pub struct RuleSystem {
    last_fired: HashMap<String, f64>,
}

impl RuleSystem {
    /// Create the system with no cooldown history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scene time at which a rule last fired, if it has.
    pub fn last_fired(&self, rule_id: &str) -> Option<f64> {
        self.last_fired.get(rule_id).copied()
    }

    fn cooled_down(&mut self, rule: &Rule, now: f64) -> bool {
        if rule.cooldown <= 0.0 {
            return true;
        }
        if let Some(last) = self.last_fired.get(&rule.id) {
            if now - last < rule.cooldown {
                return false;
            }
        }
        self.last_fired.insert(rule.id.clone(), now);
        true
    }
}

impl System for RuleSystem {
    fn name(&self) -> &str {
        "rules"
    }

    fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        let rules = Arc::clone(&ctx.stage.rules);
        let now = ctx.now();
        let frozen = ctx.step.frozen();

        for rule in rules.iter() {
            if rule.condition.is_collision()
                || !condition::evaluate(&rule.condition, ctx.stage, ctx.input)
            {
                continue;
            }
            if !self.cooled_down(rule, now) {
                continue;
            }

            if frozen {
                if let Action::GotoScene { scene_id } = &rule.action {
                    action::request_scene(ctx, scene_id);
                }
                continue;
            }

            let members = members(rule, ctx.stage);
            trace!(
                "rule '{}' fired: {} -> {} on {} instance(s)",
                rule.id,
                rule.condition,
                rule.action,
                members.len()
            );
            action::fire(ctx, &rule.action, &members);
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.last_fired.clear();
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

/// Indices of the instances a fired rule acts on.
///
/// `SELF` selects every instance; `OTHER` selects nothing outside a
/// collision. Spawners for `CREATE_OBJECT` are picked by type only. An
/// `OBJ_VAR_COMPARE` condition narrows per-instance targets to those whose
/// own variable passes the comparison.
fn members(rule: &Rule, stage: &Stage) -> Vec<usize> {
    let spawning = matches!(rule.action, Action::CreateObject { .. });
    let narrowing = match &rule.condition {
        Condition::ObjVarCompare {
            variable_name,
            op,
            value,
            ..
        } if !spawning => Some((variable_name.as_str(), *op, value)),
        _ => None,
    };

    stage
        .instances
        .iter()
        .enumerate()
        .filter(|(_, inst)| {
            let selected = rule.target.matches_type(inst.kind())
                || (!spawning && rule.target == Target::SelfRef);
            selected
                && narrowing.is_none_or(|(name, op, value)| inst.var_satisfies(name, op, value))
        })
        .map(|(index, _)| index)
        .collect()
}
