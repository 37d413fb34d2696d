/// Tuning constants for a simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Frame length (ms) at which per-frame speeds are authored.
    pub nominal_frame_ms: f64,
    /// Upper bound on the per-tick physics multiplier, so long stalls do not tunnel.
    pub max_physics_scale: f64,
    /// Frame length (ms) used by [`crate::Simulation::run`].
    pub frame_ms: f64,
    /// Downward acceleration per nominal frame for `hasGravity` instances.
    pub gravity: f64,
    /// The floor line gravity-affected instances cannot fall through.
    pub floor_y: f64,
    /// Seconds of frozen time after an instance takes `hp` damage.
    pub hit_stop: f64,
    /// Seconds an instance ignores further `hp` damage.
    pub invincibility: f64,
    /// Maximum event log size (oldest events dropped when exceeded). 0 = unlimited.
    pub max_events: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            nominal_frame_ms: 16.67,
            max_physics_scale: 4.0,
            frame_ms: 16.67,
            gravity: 0.5,
            floor_y: 400.0,
            hit_stop: 0.15,
            invincibility: 1.5,
            max_events: 0,
        }
    }
}

impl SimConfig {
    /// Set the frame length used by fixed-step runs.
    pub fn with_frame_ms(mut self, ms: f64) -> Self {
        self.frame_ms = ms;
        self
    }

    /// Set the gravity acceleration.
    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the floor line.
    pub fn with_floor_y(mut self, floor_y: f64) -> Self {
        self.floor_y = floor_y;
        self
    }

    /// Set the hit-stop duration in seconds.
    pub fn with_hit_stop(mut self, seconds: f64) -> Self {
        self.hit_stop = seconds;
        self
    }

    /// Set the post-damage invincibility window in seconds.
    pub fn with_invincibility(mut self, seconds: f64) -> Self {
        self.invincibility = seconds;
        self
    }

    /// Set the maximum event log size (0 = unlimited).
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = SimConfig::default();
        assert!((config.nominal_frame_ms - 16.67).abs() < f64::EPSILON);
        assert!((config.max_physics_scale - 4.0).abs() < f64::EPSILON);
        assert!((config.gravity - 0.5).abs() < f64::EPSILON);
        assert!((config.floor_y - 400.0).abs() < f64::EPSILON);
        assert!((config.hit_stop - 0.15).abs() < f64::EPSILON);
        assert!((config.invincibility - 1.5).abs() < f64::EPSILON);
        assert_eq!(config.max_events, 0);
    }

    #[test]
    fn config_builder_chain() {
        let config = SimConfig::default()
            .with_frame_ms(33.3)
            .with_gravity(1.0)
            .with_floor_y(600.0)
            .with_max_events(500);
        assert!((config.frame_ms - 33.3).abs() < f64::EPSILON);
        assert!((config.gravity - 1.0).abs() < f64::EPSILON);
        assert!((config.floor_y - 600.0).abs() < f64::EPSILON);
        assert_eq!(config.max_events, 500);
    }
}
