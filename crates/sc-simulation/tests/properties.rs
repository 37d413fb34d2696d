//! Engine-level behavior checked through the public `Simulation` API.

use proptest::prelude::*;
use sc_core::object::{AutoMove, ObjectTemplate, ObjectType, VarValue};
use sc_core::project::Project;
use sc_core::rule::{Action, Condition, Rule, Target};
use sc_core::scene::Scene;
use sc_core::variable::Variable;
use sc_simulation::{HeldKeys, NoInput, SimConfig, SimEventKind, Simulation};

fn project(scene: Scene) -> Project {
    Project::new("Props")
        .with_variable(Variable::global("score", "Score", 0.0))
        .with_scene(scene)
}

fn sim(scene: Scene) -> Simulation {
    Simulation::new(project(scene), SimConfig::default()).unwrap()
}

fn hero(x: f64, y: f64) -> ObjectTemplate {
    ObjectTemplate::new("p", "Hero", ObjectType::Player, x, y, 32.0, 32.0)
}

fn x_of(sim: &Simulation, name: &str) -> f64 {
    sim.stage().instance_named(name).unwrap().x
}

// ---------------------------------------------------------------------------
// Physics
// ---------------------------------------------------------------------------

#[test]
fn resting_on_a_platform_stays_grounded() {
    let scene = Scene::new("s", "Ground")
        .with_object(hero(50.0, 268.0).with_gravity().solid())
        .with_object(
            ObjectTemplate::new("w", "Ledge", ObjectType::Wall, 0.0, 300.0, 200.0, 20.0).solid(),
        );
    let mut sim = sim(scene);

    for _ in 0..100 {
        sim.step(&NoInput).unwrap();
        let hero = sim.stage().instance_named("hero").unwrap();
        assert!(hero.grounded);
        assert_eq!(hero.vy, 0.0);
        assert_eq!(hero.y, 268.0);
    }
    let ledge = sim.stage().instance_named("ledge").unwrap();
    assert_eq!((ledge.x, ledge.y), (0.0, 300.0));
}

#[test]
fn looping_patrol_is_periodic() {
    let scene = Scene::new("s", "Patrol").with_object(
        ObjectTemplate::new("e", "Guard", ObjectType::Enemy, 0.0, 0.0, 32.0, 32.0)
            .with_auto_move(AutoMove::looping(2.0, 0.0, 100.0)),
    );
    let mut sim = sim(scene);

    let mut first_lap = Vec::new();
    for _ in 0..104 {
        sim.step(&NoInput).unwrap();
        first_lap.push(x_of(&sim, "guard"));
    }
    assert_eq!(first_lap.last().copied(), Some(0.0));
    assert_eq!(first_lap.iter().copied().fold(f64::MIN, f64::max), 102.0);
    assert_eq!(first_lap.iter().copied().fold(f64::MAX, f64::min), -2.0);

    for expected in first_lap {
        sim.step(&NoInput).unwrap();
        assert_eq!(x_of(&sim, "guard"), expected);
    }
}

#[test]
fn equal_overlap_resolves_on_y_every_time() {
    let scene = || {
        Scene::new("s", "Tie")
            .with_object(
                ObjectTemplate::new("a", "Crate", ObjectType::Sprite, 0.0, 0.0, 10.0, 10.0)
                    .solid(),
            )
            .with_object(
                ObjectTemplate::new("b", "Block", ObjectType::Wall, 6.0, 6.0, 10.0, 10.0).solid(),
            )
    };
    for _ in 0..3 {
        let mut sim = sim(scene());
        sim.step(&NoInput).unwrap();
        let crate_ = sim.stage().instance_named("crate").unwrap();
        assert_eq!((crate_.x, crate_.y), (0.0, -4.0));
        assert!(crate_.grounded);
        let block = sim.stage().instance_named("block").unwrap();
        assert_eq!((block.x, block.y), (6.0, 6.0));
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

#[test]
fn cooldown_fires_once_per_window() {
    let scene = Scene::new("s", "Cooldown").with_object(hero(0.0, 0.0)).with_rule(
        Rule::new(
            "shoot",
            Condition::Always,
            Action::VarAdd {
                variable_id: "score".into(),
                value: 1.0,
            },
        )
        .with_cooldown(0.2),
    );
    let mut sim = sim(scene);
    sim.run(60, &NoInput).unwrap();
    assert_eq!(sim.stage().variables.get("score"), 5.0);
}

#[test]
fn invincibility_absorbs_repeated_hits() {
    let scene = Scene::new("s", "Spikes")
        .with_object(hero(0.0, 0.0).with_variable("hp", 10.0))
        .with_object(ObjectTemplate::new(
            "e",
            "Spikes",
            ObjectType::Enemy,
            10.0,
            0.0,
            32.0,
            32.0,
        ))
        .with_rule(
            Rule::new(
                "hurt",
                Condition::Collision {
                    subject: Target::Type(ObjectType::Player),
                    target: Target::Type(ObjectType::Enemy),
                },
                Action::ObjVarSub {
                    variable_name: "hp".into(),
                    value: VarValue::Number(1.0),
                },
            )
            .targeting(Target::SelfRef),
        );
    let mut sim = sim(scene);
    let hp = |sim: &Simulation| sim.stage().instance_named("hero").unwrap().variables["hp"].clone();
    let hits = |sim: &Simulation| {
        sim.events()
            .count(|k| matches!(k, SimEventKind::DamageFeedback { .. }))
    };

    sim.run(90, &NoInput).unwrap();
    assert_eq!(hp(&sim), VarValue::Number(9.0));
    assert_eq!(hits(&sim), 1);
    assert_eq!(
        sim.events()
            .count(|k| matches!(k, SimEventKind::HitStop { .. })),
        1
    );

    sim.run(60, &NoInput).unwrap();
    assert_eq!(hp(&sim), VarValue::Number(8.0));
    assert_eq!(hits(&sim), 2);
}

// ---------------------------------------------------------------------------
// Scene lifecycle
// ---------------------------------------------------------------------------

#[test]
fn scene_reload_keeps_globals_and_resets_scene_vars() {
    let scene = Scene::new("s", "Loop")
        .with_variable(Variable::scene("timer", "Timer", 30.0))
        .with_object(hero(0.0, 0.0))
        .with_rule(Rule::new(
            "score",
            Condition::Always,
            Action::VarAdd {
                variable_id: "score".into(),
                value: 1.0,
            },
        ))
        .with_rule(Rule::new(
            "tick-down",
            Condition::Always,
            Action::VarSub {
                variable_id: "timer".into(),
                value: 1.0,
            },
        ))
        .with_rule(Rule::new(
            "again",
            Condition::KeyPressed { key: "n".into() },
            Action::GotoScene {
                scene_id: "s".into(),
            },
        ));
    let mut sim = sim(scene);
    let vars = |sim: &Simulation| {
        (
            sim.stage().variables.get("score"),
            sim.stage().variables.get("timer"),
        )
    };

    sim.run(5, &NoInput).unwrap();
    assert_eq!(vars(&sim), (5.0, 25.0));

    let keys: HeldKeys = ["n"].into_iter().collect();
    sim.step(&keys).unwrap();
    assert_eq!(vars(&sim), (6.0, 24.0));

    sim.step(&NoInput).unwrap();
    assert_eq!(vars(&sim), (7.0, 29.0));

    sim.restart().unwrap();
    assert_eq!(vars(&sim), (0.0, 30.0));
}

// ---------------------------------------------------------------------------
// Pooling
// ---------------------------------------------------------------------------

fn gun_range() -> Scene {
    Scene::new("s", "Range")
        .with_object(hero(0.0, 0.0))
        .with_object(
            ObjectTemplate::new("b", "Bullet", ObjectType::Sprite, 0.0, 0.0, 4.0, 4.0)
                .prefab(0)
                .with_variable("lifetime", 0.1)
                .with_auto_move(AutoMove::straight(5.0, 0.0)),
        )
        .with_rule(
            Rule::new(
                "fire",
                Condition::KeyPressed { key: "x".into() },
                Action::CreateObject {
                    prefab_id: "b".into(),
                    offset_x: 0.0,
                    offset_y: 0.0,
                },
            )
            .targeting(ObjectType::Player),
        )
}

proptest! {
    #[test]
    fn pool_grows_only_to_peak_demand(trigger in proptest::collection::vec(any::<bool>(), 1..120)) {
        let mut sim = sim(gun_range());
        let mut live_before = 0usize;
        let mut peak = 0usize;

        for held in trigger {
            let mut keys = HeldKeys::new();
            if held {
                keys.press("x");
            }
            let tick = sim.current_tick() + 1;
            sim.step(&keys).unwrap();

            let spawned = sim
                .events()
                .events_at_tick(tick)
                .iter()
                .filter(|e| matches!(e.kind, SimEventKind::Spawned { .. }))
                .count();
            peak = peak.max(live_before + spawned);

            let live = sim
                .stage()
                .instances
                .iter()
                .filter(|i| i.template.id == "b")
                .count();
            let stats = sim.stage().pool.stats("b");
            prop_assert_eq!(stats.total, peak);
            prop_assert_eq!(stats.idle + live, stats.total);
            prop_assert!(sim.stage().ids_unique());
            live_before = live;
        }
    }
}
