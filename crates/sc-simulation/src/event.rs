use crate::instance::InstanceId;

/// What kind of simulation event occurred.
///
/// Events are the discrete signals a host reacts to: playing a clip,
/// loading another scene, emitting damage particles.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEventKind {
    // Lifecycle
    /// A scene finished loading.
    SceneLoaded {
        /// The loaded scene id.
        scene_id: String,
        /// Whether global variables were carried over.
        kept_globals: bool,
    },
    /// A rule asked to switch scenes; applied at the start of the next tick.
    SceneSwitchRequested {
        /// The requested scene id.
        scene_id: String,
    },
    /// A pending scene switch named a scene that does not exist and was dropped.
    SceneNotFound {
        /// The unknown scene id.
        scene_id: String,
    },

    // Host signals
    /// A scene load changed the background music. `None` means stop.
    MusicChanged {
        /// The audio asset id to loop.
        clip_id: Option<String>,
        /// Playback volume.
        volume: f64,
    },
    /// A `PLAY_SOUND` rule fired.
    SoundTriggered {
        /// The audio asset id.
        clip_id: String,
        /// Playback volume.
        volume: f64,
    },
    /// An instance took `hp` damage; hosts typically emit particles here.
    DamageFeedback {
        /// The damaged instance.
        instance: InstanceId,
        /// Horizontal center of the instance.
        x: f64,
        /// Vertical center of the instance.
        y: f64,
        /// Whether the damaged instance is a player.
        is_player: bool,
    },
    /// Time froze for a hit-stop.
    HitStop {
        /// Freeze duration in seconds.
        seconds: f64,
    },

    // Instances
    /// A prefab instance entered the stage.
    Spawned {
        /// The new instance.
        instance: InstanceId,
        /// The prefab it was made from.
        prefab_id: String,
    },
    /// An instance left the stage.
    Recycled {
        /// The removed instance.
        instance: InstanceId,
        /// Whether it went back to a prefab pool.
        pooled: bool,
    },
    /// An instance switched animations.
    AnimationChanged {
        /// The animated instance.
        instance: InstanceId,
        /// The new animation name.
        animation: String,
    },
}

impl SimEventKind {
    /// Check whether a given instance is involved in this event.
    pub fn involves(&self, id: InstanceId) -> bool {
        match self {
            Self::DamageFeedback { instance, .. }
            | Self::Spawned { instance, .. }
            | Self::Recycled { instance, .. }
            | Self::AnimationChanged { instance, .. } => *instance == id,
            Self::SceneLoaded { .. }
            | Self::SceneSwitchRequested { .. }
            | Self::SceneNotFound { .. }
            | Self::MusicChanged { .. }
            | Self::SoundTriggered { .. }
            | Self::HitStop { .. } => false,
        }
    }

    /// Short label for the event kind.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SceneLoaded { .. } => "scene",
            Self::SceneSwitchRequested { .. } => "goto",
            Self::SceneNotFound { .. } => "missing",
            Self::MusicChanged { .. } => "music",
            Self::SoundTriggered { .. } => "sound",
            Self::DamageFeedback { .. } => "damage",
            Self::HitStop { .. } => "hitstop",
            Self::Spawned { .. } => "spawn",
            Self::Recycled { .. } => "recycle",
            Self::AnimationChanged { .. } => "anim",
        }
    }
}

/// A record of something that happened during simulation.
#[derive(Debug, Clone)]
pub struct SimEvent {
    /// The simulation tick when this event occurred.
    pub tick: u64,
    /// The specific kind of event that occurred.
    pub kind: SimEventKind,
    /// A human-readable description of the event.
    pub description: String,
}

impl SimEvent {
    /// Create a new simulation event with the given tick, kind, and description.
    pub fn new(tick: u64, kind: SimEventKind, description: impl Into<String>) -> Self {
        Self {
            tick,
            kind,
            description: description.into(),
        }
    }
}

/// Accumulates events during a simulation run.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<SimEvent>,
    max_events: usize,
}

impl EventLog {
    /// Create a new event log with the given maximum capacity (0 = unlimited).
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    /// Append an event, dropping the oldest events if the log exceeds its capacity.
    pub fn push(&mut self, event: SimEvent) {
        self.events.push(event);
        if self.max_events > 0 && self.events.len() > self.max_events {
            let drain_count = self.events.len() - self.max_events;
            self.events.drain(..drain_count);
        }
    }

    /// Return a slice of all recorded events.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Return all events that occurred at the given tick.
    pub fn events_at_tick(&self, tick: u64) -> Vec<&SimEvent> {
        self.events.iter().filter(|e| e.tick == tick).collect()
    }

    /// Return all events involving the given instance.
    pub fn events_for_instance(&self, id: InstanceId) -> Vec<&SimEvent> {
        self.events.iter().filter(|e| e.kind.involves(id)).collect()
    }

    /// Count events matching a predicate on their kind.
    pub fn count(&self, pred: impl Fn(&SimEventKind) -> bool) -> usize {
        self.events.iter().filter(|e| pred(&e.kind)).count()
    }

    /// Return the number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Return `true` if no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sound(tick: u64) -> SimEvent {
        SimEvent::new(
            tick,
            SimEventKind::SoundTriggered {
                clip_id: "jump".into(),
                volume: 1.0,
            },
            "sound",
        )
    }

    #[test]
    fn event_log_push_and_query() {
        let mut log = EventLog::new(0);
        let id = InstanceId::new();
        log.push(SimEvent::new(
            1,
            SimEventKind::Spawned {
                instance: id,
                prefab_id: "bullet".into(),
            },
            "spawned",
        ));
        assert_eq!(log.len(), 1);
        assert_eq!(log.events_at_tick(1).len(), 1);
        assert_eq!(log.events_for_instance(id).len(), 1);
    }

    #[test]
    fn event_log_max_events_trims() {
        let mut log = EventLog::new(2);
        for i in 0..5 {
            log.push(sound(i));
        }
        assert_eq!(log.len(), 2);
        // Oldest events were dropped, newest remain
        assert_eq!(log.events()[0].tick, 3);
        assert_eq!(log.events()[1].tick, 4);
    }

    #[test]
    fn event_kind_involves_instance() {
        let a = InstanceId::new();
        let b = InstanceId::new();

        let kind = SimEventKind::Recycled {
            instance: a,
            pooled: true,
        };
        assert!(kind.involves(a));
        assert!(!kind.involves(b));

        let kind = SimEventKind::HitStop { seconds: 0.15 };
        assert!(!kind.involves(a));
    }

    #[test]
    fn event_log_count_and_clear() {
        let mut log = EventLog::new(0);
        log.push(sound(1));
        log.push(sound(2));
        log.push(SimEvent::new(
            2,
            SimEventKind::HitStop { seconds: 0.15 },
            "freeze",
        ));
        assert_eq!(
            log.count(|k| matches!(k, SimEventKind::SoundTriggered { .. })),
            2
        );
        log.clear();
        assert!(log.is_empty());
    }
}
