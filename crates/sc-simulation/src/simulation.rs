use log::{debug, warn};
use sc_core::project::Project;

use crate::animation::AnimationSystem;
use crate::clock::{SimClock, TickStep, consume_hit_stop};
use crate::config::SimConfig;
use crate::context::SimContext;
use crate::error::{SimError, SimResult};
use crate::event::{EventLog, SimEvent, SimEventKind};
use crate::frame::Frame;
use crate::input::InputSource;
use crate::interpreter::{CollisionRuleSystem, RuleSystem};
use crate::lifecycle;
use crate::physics::PhysicsSystem;
use crate::stage::Stage;
use crate::system::System;
use crate::timers::TimerSystem;

/// The top-level simulation orchestrator.
///
/// Owns the project, the stage of the active scene, the clock, the event
/// log, and the systems. Each tick runs timers, rules, physics, collision
/// rules, and animation in that order, then reaps destroyed instances and
/// adds new spawns.
pub struct Simulation {
    project: Project,
    stage: Stage,
    clock: SimClock,
    config: SimConfig,
    events: EventLog,
    systems: Vec<Box<dyn System>>,
    pending_scene: Option<String>,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("tick", &self.clock.tick())
            .field("scene", &self.stage.scene_id)
            .field("instances", &self.stage.instances.len())
            .field("systems", &self.systems.len())
            .field("events", &self.events.len())
            .finish()
    }
}

impl Simulation {
    /// Create a simulation and load the project's start scene with fresh globals.
    pub fn new(project: Project, config: SimConfig) -> SimResult<Self> {
        let scene_id = project
            .start_scene()
            .map(|s| s.id.clone())
            .ok_or(SimError::NoScenes)?;
        let events = EventLog::new(config.max_events);
        let mut sim = Self {
            project,
            stage: Stage::new(),
            clock: SimClock::new(),
            config,
            events,
            systems: vec![
                Box::new(TimerSystem::new()),
                Box::new(RuleSystem::new()),
                Box::new(PhysicsSystem::new()),
                Box::new(CollisionRuleSystem::new()),
                Box::new(AnimationSystem::new()),
            ],
            pending_scene: None,
        };
        sim.load_scene(&scene_id, false)?;
        Ok(sim)
    }

    /// Register an extra system. It runs after the built-in systems.
    pub fn add_system<S: System + 'static>(&mut self, system: S) {
        self.systems.push(Box::new(system));
    }

    /// Load a scene by id.
    ///
    /// Clears pools, hit-stop, and every system's per-scene state, and
    /// restarts scene time. With `keep_globals` the variable values carry
    /// over; the scene's own variables are always reset. On error the
    /// current scene keeps playing.
    pub fn load_scene(&mut self, scene_id: &str, keep_globals: bool) -> SimResult<()> {
        lifecycle::load_scene(&mut self.stage, &self.project, scene_id, keep_globals)?;
        for system in &mut self.systems {
            system.reset();
        }
        self.clock.reset_scene();
        self.pending_scene = None;
        self.events.push(SimEvent::new(
            self.clock.tick(),
            SimEventKind::SceneLoaded {
                scene_id: scene_id.to_string(),
                kept_globals: keep_globals,
            },
            format!("scene '{scene_id}' loaded"),
        ));
        self.emit_music(scene_id);
        Ok(())
    }

    /// Tell the host which music the newly loaded scene plays, if any.
    fn emit_music(&mut self, scene_id: &str) {
        let music = self.project.scene(scene_id).and_then(|s| s.music());
        let (clip_id, volume, description) = match music {
            Some((clip, volume)) => (
                Some(clip.to_string()),
                volume,
                format!("music '{clip}' at volume {volume}"),
            ),
            None => (None, 0.0, "music stopped".to_string()),
        };
        self.events.push(SimEvent::new(
            self.clock.tick(),
            SimEventKind::MusicChanged { clip_id, volume },
            description,
        ));
    }

    /// Apply a scene switch requested by a rule during the last tick.
    ///
    /// Globals carry over. A request for an unknown scene is logged,
    /// recorded as [`SimEventKind::SceneNotFound`], and dropped. Returns
    /// whether a scene was loaded.
    pub fn apply_pending_scene(&mut self) -> bool {
        let Some(scene_id) = self.pending_scene.take() else {
            return false;
        };
        match self.load_scene(&scene_id, true) {
            Ok(()) => true,
            Err(err) => {
                warn!("dropping scene switch: {err}");
                self.events.push(SimEvent::new(
                    self.clock.tick(),
                    SimEventKind::SceneNotFound {
                        scene_id: scene_id.clone(),
                    },
                    format!("scene '{scene_id}' does not exist"),
                ));
                false
            }
        }
    }

    /// Reload the active scene with every variable reset.
    pub fn restart(&mut self) -> SimResult<()> {
        let scene_id = self.stage.scene_id.clone();
        self.load_scene(&scene_id, false)
    }

    /// Advance by one tick covering `frame_ms` milliseconds of host time.
    pub fn tick(&mut self, input: &dyn InputSource, frame_ms: f64) -> SimResult<()> {
        self.apply_pending_scene();

        self.clock.advance(frame_ms);
        let effect_scale = consume_hit_stop(&mut self.stage.hit_stop, frame_ms);
        let step = TickStep::new(frame_ms, effect_scale, &self.config);
        self.stage.begin_tick();

        for i in 0..self.systems.len() {
            let mut system = std::mem::replace(&mut self.systems[i], Box::new(NoopSystem));
            let mut ctx = SimContext {
                stage: &mut self.stage,
                clock: &self.clock,
                config: &self.config,
                step,
                input,
                events: &mut self.events,
            };
            let result = system.tick(&mut ctx);
            self.systems[i] = system;
            result?;
            if self.stage.scene_requested() {
                break;
            }
        }

        if let Some(scene_id) = self.stage.scratch.scene_request.take() {
            debug!("tick {}: switching to scene '{scene_id}'", self.clock.tick());
            self.pending_scene = Some(scene_id);
            return Ok(());
        }

        for (id, pooled) in self.stage.reap_and_spawn() {
            let description = if pooled {
                format!("{id} returned to its pool")
            } else {
                format!("{id} removed")
            };
            self.events.push(SimEvent::new(
                self.clock.tick(),
                SimEventKind::Recycled {
                    instance: id,
                    pooled,
                },
                description,
            ));
        }
        debug_assert!(self.stage.ids_unique(), "duplicate live instance ids");
        Ok(())
    }

    /// Advance by one tick of the configured frame length.
    pub fn step(&mut self, input: &dyn InputSource) -> SimResult<()> {
        let frame_ms = self.config.frame_ms;
        self.tick(input, frame_ms)
    }

    /// Advance by `n` ticks of the configured frame length with the same input.
    pub fn run(&mut self, n: u64, input: &dyn InputSource) -> SimResult<()> {
        for _ in 0..n {
            self.step(input)?;
        }
        Ok(())
    }

    /// Snapshot the stage for rendering or export.
    pub fn frame(&self) -> Frame {
        Frame::capture(&self.stage, self.clock.tick())
    }

    /// The project being played.
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// The live state of the active scene.
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Mutable access to the active scene, for hosts and tests.
    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    /// The tuning constants in use.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The simulation clock.
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Every event recorded so far.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Access a system by downcasting to a concrete type.
    pub fn get_system<T: System + 'static>(&self) -> Option<&T> {
        self.systems
            .iter()
            .find_map(|s| s.as_any().downcast_ref::<T>())
    }

    /// Access a system mutably by downcasting to a concrete type.
    pub fn get_system_mut<T: System + 'static>(&mut self) -> Option<&mut T> {
        self.systems
            .iter_mut()
            .find_map(|s| s.as_any_mut().downcast_mut::<T>())
    }

    /// The last completed tick.
    pub fn current_tick(&self) -> u64 {
        self.clock.tick()
    }

    /// Id of the active scene.
    pub fn scene_id(&self) -> &str {
        &self.stage.scene_id
    }

    /// A scene switch waiting for the next tick.
    pub fn pending_scene(&self) -> Option<&str> {
        self.pending_scene.as_deref()
    }
}

/// Placeholder system used during the swap-and-tick pattern.
#[derive(Debug)]
struct NoopSystem;

impl System for NoopSystem {
    fn name(&self) -> &str {
        "noop"
    }
    fn tick(&mut self, _ctx: &mut SimContext<'_>) -> SimResult<()> {
        Ok(())
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use sc_core::object::{ObjectTemplate, ObjectType};
    use sc_core::rule::{Action, Condition, Rule, Target};
    use sc_core::scene::Scene;
    use sc_core::variable::Variable;

    use super::*;
    use crate::input::{HeldKeys, NoInput};

    fn hero() -> ObjectTemplate {
        ObjectTemplate::new("p", "Hero", ObjectType::Player, 0.0, 0.0, 32.0, 32.0)
    }

    fn goto(scene_id: &str) -> Action {
        Action::GotoScene {
            scene_id: scene_id.into(),
        }
    }

    fn two_scenes() -> Project {
        Project::new("Test")
            .with_variable(Variable::global("score", "Score", 0.0))
            .with_scene(
                Scene::new("one", "One")
                    .with_object(hero())
                    .with_rule(Rule::new(
                        "score",
                        Condition::Always,
                        Action::VarAdd {
                            variable_id: "score".into(),
                            value: 1.0,
                        },
                    ))
                    .with_rule(Rule::new(
                        "next",
                        Condition::KeyPressed { key: "n".into() },
                        goto("two"),
                    ))
                    .with_rule(
                        Rule::new("move", Condition::Always, Action::MoveX { amount: 1.0 })
                            .targeting(Target::SelfRef),
                    ),
            )
            .with_scene(Scene::new("two", "Two").with_object(hero()))
    }

    #[test]
    fn new_loads_start_scene() {
        let sim = Simulation::new(two_scenes(), SimConfig::default()).unwrap();
        assert_eq!(sim.scene_id(), "one");
        assert_eq!(sim.current_tick(), 0);
        assert_eq!(
            sim.events()
                .count(|k| matches!(k, SimEventKind::SceneLoaded { kept_globals: false, .. })),
            1
        );
    }

    #[test]
    fn scene_loads_signal_music() {
        let project = Project::new("Test")
            .with_scene(
                Scene::new("one", "One")
                    .with_music("theme", 0.8)
                    .with_rule(Rule::new(
                        "next",
                        Condition::KeyPressed { key: "n".into() },
                        goto("two"),
                    )),
            )
            .with_scene(Scene::new("two", "Two"));
        let mut sim = Simulation::new(project, SimConfig::default()).unwrap();
        let music = |sim: &Simulation| -> Vec<SimEventKind> {
            sim.events()
                .events()
                .iter()
                .filter(|e| matches!(e.kind, SimEventKind::MusicChanged { .. }))
                .map(|e| e.kind.clone())
                .collect()
        };
        assert_eq!(
            music(&sim),
            vec![SimEventKind::MusicChanged {
                clip_id: Some("theme".into()),
                volume: 0.8,
            }]
        );

        let keys: HeldKeys = ["n"].into_iter().collect();
        sim.step(&keys).unwrap();
        sim.step(&NoInput).unwrap();
        assert_eq!(sim.scene_id(), "two");
        assert_eq!(
            music(&sim).last(),
            Some(&SimEventKind::MusicChanged {
                clip_id: None,
                volume: 0.0,
            })
        );
    }

    #[test]
    fn empty_project_is_rejected() {
        assert!(matches!(
            Simulation::new(Project::new("Empty"), SimConfig::default()),
            Err(SimError::NoScenes)
        ));
    }

    #[test]
    fn goto_collapses_tick_and_applies_next_tick() {
        let mut sim = Simulation::new(two_scenes(), SimConfig::default()).unwrap();
        sim.run(3, &NoInput).unwrap();
        assert_eq!(sim.stage().variables.get("score"), 3.0);

        let keys: HeldKeys = ["n"].into_iter().collect();
        sim.step(&keys).unwrap();
        assert_eq!(sim.pending_scene(), Some("two"));
        assert_eq!(sim.scene_id(), "one");
        let hero = sim.stage().instance_named("hero").unwrap();
        assert_eq!(hero.x, 4.0);

        sim.step(&NoInput).unwrap();
        assert_eq!(sim.scene_id(), "two");
        assert_eq!(sim.pending_scene(), None);
        assert_eq!(sim.stage().variables.get("score"), 4.0);
    }

    #[test]
    fn unknown_pending_scene_is_dropped() {
        let project = Project::new("Test").with_scene(
            Scene::new("one", "One").with_rule(Rule::new(
                "bad",
                Condition::Always,
                goto("nowhere"),
            )),
        );
        let mut sim = Simulation::new(project, SimConfig::default()).unwrap();
        sim.step(&NoInput).unwrap();
        sim.step(&NoInput).unwrap();
        assert_eq!(sim.scene_id(), "one");
        assert_eq!(
            sim.events()
                .count(|k| matches!(k, SimEventKind::SceneNotFound { .. })),
            1
        );
    }

    #[test]
    fn load_unknown_scene_keeps_current() {
        let mut sim = Simulation::new(two_scenes(), SimConfig::default()).unwrap();
        assert!(matches!(
            sim.load_scene("missing", true),
            Err(SimError::SceneNotFound(_))
        ));
        assert_eq!(sim.scene_id(), "one");
    }

    #[test]
    fn restart_resets_globals() {
        let mut sim = Simulation::new(two_scenes(), SimConfig::default()).unwrap();
        sim.run(5, &NoInput).unwrap();
        sim.restart().unwrap();
        assert_eq!(sim.stage().variables.get("score"), 0.0);
        assert_eq!(sim.clock().scene_elapsed(), 0.0);
        assert_eq!(sim.current_tick(), 5);
    }

    #[test]
    fn systems_are_reachable_by_type() {
        let mut sim = Simulation::new(two_scenes(), SimConfig::default()).unwrap();
        assert!(sim.get_system::<PhysicsSystem>().is_some());
        assert!(sim.get_system_mut::<RuleSystem>().is_some());
        assert!(format!("{sim:?}").contains("systems: 5"));
    }

    #[derive(Debug, Default)]
    struct Counter {
        ticks: u32,
        resets: u32,
    }

    impl System for Counter {
        fn name(&self) -> &str {
            "counter"
        }
        fn tick(&mut self, _ctx: &mut SimContext<'_>) -> SimResult<()> {
            self.ticks += 1;
            Ok(())
        }
        fn reset(&mut self) {
            self.resets += 1;
        }
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
    }

    #[test]
    fn added_systems_tick_and_reset() {
        let mut sim = Simulation::new(two_scenes(), SimConfig::default()).unwrap();
        sim.add_system(Counter::default());
        sim.run(3, &NoInput).unwrap();
        sim.restart().unwrap();

        let counter = sim.get_system::<Counter>().unwrap();
        assert_eq!(counter.ticks, 3);
        assert_eq!(counter.resets, 1);
    }
}
