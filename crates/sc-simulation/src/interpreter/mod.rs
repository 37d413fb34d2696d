//! The rule interpreter: condition evaluation, action effects, and the two
//! per-tick rule passes (before physics and after it).

pub mod action;
pub mod collision;
pub mod condition;
pub mod rules;

pub use action::InstanceEffect;
pub use collision::CollisionRuleSystem;
pub use rules::RuleSystem;
