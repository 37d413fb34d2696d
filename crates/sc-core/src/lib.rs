//! Core types for Scenecraft: projects, scenes, object templates, variables, and rules.
//!
//! This crate defines the authored data model that the runtime consumes. It
//! is independent of the simulation: a [`Project`] can be built
//! programmatically, created from a starter [`Preset`], or deserialized from
//! the JSON the editor writes.

/// Error types used throughout the crate.
pub mod error;
/// Object templates, instance variable values, patrol and animation specs.
pub mod object;
/// Starter projects for common genres.
pub mod preset;
/// The top-level project container and its JSON persistence.
pub mod project;
/// Rules: the closed set of conditions and actions.
pub mod rule;
/// Scenes and their view mode.
pub mod scene;
/// Authoring-time validation of projects.
pub mod validate;
/// Variable declarations and their scopes.
pub mod variable;

/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export object model types.
pub use object::{Animation, AutoMove, ObjectTemplate, ObjectType, VarValue};
/// Re-export preset types.
pub use preset::Preset;
/// Re-export project types.
pub use project::{Project, ProjectMeta};
/// Re-export rule types.
pub use rule::{Action, CompareOp, Condition, Rule, Target};
/// Re-export scene types.
pub use scene::{Scene, ViewMode};
/// Re-export validation types.
pub use validate::{ValidationIssue, validate_project};
/// Re-export variable types.
pub use variable::{Variable, VariableScope};
