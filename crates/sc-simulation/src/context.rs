use crate::clock::{SimClock, TickStep};
use crate::config::SimConfig;
use crate::event::{EventLog, SimEvent, SimEventKind};
use crate::input::InputSource;
use crate::stage::Stage;

/// Mutable context passed to each system during a tick.
pub struct SimContext<'a> {
    /// The active scene.
    pub stage: &'a mut Stage,
    /// Tick counter and scene time.
    pub clock: &'a SimClock,
    /// Tuning constants.
    pub config: &'a SimConfig,
    /// Time scaling for this tick.
    pub step: TickStep,
    /// Keyboard state for this tick.
    pub input: &'a dyn InputSource,
    /// Event sink.
    pub events: &'a mut EventLog,
}

impl SimContext<'_> {
    /// Emit a simulation event at the current tick.
    pub fn emit(&mut self, kind: SimEventKind, description: impl Into<String>) {
        self.events
            .push(SimEvent::new(self.clock.tick(), kind, description));
    }

    /// The current tick number.
    pub fn tick(&self) -> u64 {
        self.clock.tick()
    }

    /// Seconds of host time since the scene loaded.
    pub fn now(&self) -> f64 {
        self.clock.scene_elapsed()
    }
}
