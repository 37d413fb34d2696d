//! Headless runtime for Scenecraft scenes.
//!
//! A [`Simulation`] loads a [`sc_core::Project`], plays one scene at a time,
//! and advances it tick by tick: rules fire, instances move and collide,
//! prefabs spawn from object pools, and scene switches carry variables
//! across. Rendering, audio, and particles are left to the host, which
//! reads a [`Frame`] snapshot and the [`EventLog`] after each tick.

/// Frame cycling and idle/run switching.
pub mod animation;
/// Simulation clock and per-tick time scaling.
pub mod clock;
/// Tuning constants for simulation runs.
pub mod config;
/// Mutable context passed to systems each tick.
pub mod context;
/// Error types for the simulation crate.
pub mod error;
/// Simulation event types and the event log.
pub mod event;
/// Read-only snapshots for renderers and exports.
pub mod frame;
/// Keyboard state supplied by the host.
pub mod input;
/// Live instances and their bounding boxes.
pub mod instance;
/// Conditions, actions, and the rule passes.
pub mod interpreter;
/// Turning authored scenes into a playable stage.
pub mod lifecycle;
/// Gravity, patrols, and solid collision.
pub mod physics;
/// Per-prefab free lists of parked instances.
pub mod pool;
/// Top-level simulation orchestrator.
pub mod simulation;
/// The live state of the active scene.
pub mod stage;
/// The trait that all simulation systems implement.
pub mod system;
/// Invincibility and lifetime countdowns.
pub mod timers;
/// The flat global/scene variable table.
pub mod variables;

/// Re-export of [`clock::SimClock`] and [`clock::TickStep`].
pub use clock::{SimClock, TickStep};
/// Re-export of [`config::SimConfig`].
pub use config::SimConfig;
/// Re-export of [`context::SimContext`].
pub use context::SimContext;
/// Re-exports of [`error::SimError`] and [`error::SimResult`].
pub use error::{SimError, SimResult};
/// Re-exports of [`event::EventLog`], [`event::SimEvent`], and [`event::SimEventKind`].
pub use event::{EventLog, SimEvent, SimEventKind};
/// Re-exports of [`frame::Frame`] and [`frame::InstanceView`].
pub use frame::{Frame, InstanceView};
/// Re-exports of the input types.
pub use input::{HeldKeys, InputSource, NoInput};
/// Re-exports of the live instance types.
pub use instance::{Aabb, InstanceId, RuntimeInstance};
/// Re-exports of [`pool::ObjectPool`] and [`pool::PoolStats`].
pub use pool::{ObjectPool, PoolStats};
/// Re-export of [`simulation::Simulation`].
pub use simulation::Simulation;
/// Re-export of [`stage::Stage`].
pub use stage::Stage;
/// Re-export of [`system::System`].
pub use system::System;
/// Re-export of [`variables::VariableTable`].
pub use variables::VariableTable;
