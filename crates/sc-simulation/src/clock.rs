use crate::config::SimConfig;

/// Tracks simulation time: a monotonic tick counter and host time elapsed
/// since the current scene loaded.
///
/// Scene time keeps running during hit-stop, so rule cooldowns and spawner
/// cooldowns measure wall time, not simulated time.
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    tick: u64,
    scene_elapsed: f64,
    total_elapsed: f64,
}

impl SimClock {
    /// Create a clock at tick 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one tick of `frame_ms` host milliseconds. Returns the new tick number.
    pub fn advance(&mut self, frame_ms: f64) -> u64 {
        self.tick += 1;
        let seconds = frame_ms / 1000.0;
        self.scene_elapsed += seconds;
        self.total_elapsed += seconds;
        self.tick
    }

    /// Restart scene time at zero. The tick counter keeps counting.
    pub fn reset_scene(&mut self) {
        self.scene_elapsed = 0.0;
    }

    /// Return the current tick number.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Seconds of host time since the current scene loaded.
    pub fn scene_elapsed(&self) -> f64 {
        self.scene_elapsed
    }

    /// Seconds of host time since the simulation started.
    pub fn total_elapsed(&self) -> f64 {
        self.total_elapsed
    }
}

/// Time scaling for one tick, derived from the frame length and hit-stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickStep {
    /// Host milliseconds covered by the tick.
    pub frame_ms: f64,
    /// 0 while hit-stop freezes time, else 1.
    pub effect_scale: f64,
    /// Multiplier for per-nominal-frame speeds.
    pub physics_scale: f64,
    /// Simulated seconds elapsed.
    pub sim_dt: f64,
}

impl TickStep {
    /// Compute the step for a frame of `frame_ms`.
    pub fn new(frame_ms: f64, effect_scale: f64, config: &SimConfig) -> Self {
        let physics_scale =
            (frame_ms / config.nominal_frame_ms).min(config.max_physics_scale) * effect_scale;
        Self {
            frame_ms,
            effect_scale,
            physics_scale,
            sim_dt: frame_ms / 1000.0 * effect_scale,
        }
    }

    /// Whether time is frozen by hit-stop.
    pub fn frozen(&self) -> bool {
        self.effect_scale <= 0.0
    }
}

/// Count down a hit-stop timer by one frame and return the resulting time scale.
///
/// The timer snaps to zero once it runs out, and that frame already runs at
/// full speed.
pub fn consume_hit_stop(timer: &mut f64, frame_ms: f64) -> f64 {
    if *timer <= 0.0 {
        return 1.0;
    }
    *timer -= frame_ms / 1000.0;
    if *timer > 0.0 {
        0.0
    } else {
        *timer = 0.0;
        1.0
    }
}
