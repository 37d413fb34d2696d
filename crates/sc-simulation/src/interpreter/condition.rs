//! Condition evaluation against the stage and held input.

use sc_core::rule::Condition;

use crate::input::InputSource;
use crate::stage::Stage;

/// Evaluate a non-collision condition against the current stage.
///
/// Collision conditions are handled by the post-physics pass and are
/// always false here, as are malformed conditions and mouse clicks.
pub fn evaluate(condition: &Condition, stage: &Stage, input: &dyn InputSource) -> bool {
    match condition {
        Condition::Always => true,
        Condition::KeyPressed { key } => input.is_key_held(key),
        Condition::VarEquals { variable_id, value } => stage.variables.get(variable_id) == *value,
        Condition::VarGreater { variable_id, value } => stage.variables.get(variable_id) > *value,
        Condition::VarLess { variable_id, value } => stage.variables.get(variable_id) < *value,
        Condition::ObjVarCompare {
            target,
            variable_name,
            op,
            value,
        } => stage.instances.iter().any(|inst| {
            target.matches_type(inst.kind()) && inst.var_satisfies(variable_name, *op, value)
        }),
        Condition::Collision { .. } | Condition::MouseClick | Condition::Invalid(_) => false,
    }
}
