//! Starter projects for common genres.
//!
//! Presets are written the way an author would write them: rules name
//! variables, prefabs, and scenes by their display names. [`Preset::build`]
//! assigns fresh ids to everything and rewrites those names into ids.

use std::collections::HashMap;

use uuid::Uuid;

use crate::object::{AutoMove, ObjectTemplate, ObjectType};
use crate::project::Project;
use crate::rule::{Action, CompareOp, Condition, Rule, Target};
use crate::scene::{Scene, ViewMode};
use crate::variable::Variable;

/// A starter project template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// One empty side-view scene.
    Empty,
    /// Side-scrolling platformer with ground, platforms, an enemy, and a coin.
    Platformer,
    /// Top-down adventure with 4-way movement.
    Rpg,
    /// Top-down racing between track walls.
    Racing,
    /// Top-down shooter with pooled bullets and enemies with hit points.
    Shooter,
    /// Top-down survival arena fed by a spawner, with a game-over scene.
    Chase,
}

impl Preset {
    /// Every preset, in menu order.
    pub const ALL: [Preset; 6] = [
        Preset::Empty,
        Preset::Platformer,
        Preset::Rpg,
        Preset::Racing,
        Preset::Shooter,
        Preset::Chase,
    ];

    /// The command-line name of the preset.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Platformer => "platformer",
            Self::Rpg => "rpg",
            Self::Racing => "racing",
            Self::Shooter => "shooter",
            Self::Chase => "chase",
        }
    }

    /// One-line description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Empty => "A blank side-view scene.",
            Self::Platformer => "Side-scrolling action. Jump, run, and collect items.",
            Self::Rpg => "Top-down adventure. Move in 4 directions and explore.",
            Self::Racing => "High speed movement within track boundaries.",
            Self::Shooter => "Move and dodge enemies. Press X to shoot.",
            Self::Chase => "Survive a stream of hunters. Grab coins, avoid contact.",
        }
    }

    /// Parse a preset name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
    }

    /// Build a fresh project from this preset.
    pub fn build(&self, project_name: &str) -> Project {
        let (globals, scenes) = match self {
            Self::Empty => (vec![], vec![(ViewMode::Side, "Level 1", vec![], vec![])]),
            Self::Platformer => platformer(),
            Self::Rpg => rpg(),
            Self::Racing => racing(),
            Self::Shooter => shooter(),
            Self::Chase => chase(),
        };
        assemble(project_name, globals, scenes)
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

type SceneDraft = (ViewMode, &'static str, Vec<ObjectTemplate>, Vec<Rule>);

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn assemble(project_name: &str, globals: Vec<(&str, f64)>, drafts: Vec<SceneDraft>) -> Project {
    let variables: Vec<Variable> = globals
        .into_iter()
        .map(|(name, value)| Variable::global(new_id(), name, value))
        .collect();
    let var_ids: HashMap<String, String> = variables
        .iter()
        .map(|v| (v.name.clone(), v.id.clone()))
        .collect();
    let scene_ids: HashMap<&str, String> =
        drafts.iter().map(|(_, name, _, _)| (*name, new_id())).collect();

    let mut project = Project::new(project_name);
    project.variables = variables;

    for (view, name, objects, rules) in drafts {
        let mut scene = Scene::new(scene_ids[name].clone(), name).with_view(view);
        let mut object_ids = HashMap::new();
        for mut object in objects {
            object.id = new_id();
            object_ids.insert(object.name.clone(), object.id.clone());
            scene.objects.push(object);
        }
        for mut rule in rules {
            rule.id = new_id();
            resolve_names(&mut rule, &var_ids, &object_ids, &scene_ids);
            scene.rules.push(rule);
        }
        project = project.with_scene(scene);
    }
    project
}

fn resolve_names(
    rule: &mut Rule,
    var_ids: &HashMap<String, String>,
    object_ids: &HashMap<String, String>,
    scene_ids: &HashMap<&str, String>,
) {
    let swap = |name: &mut String, table: &HashMap<String, String>| {
        if let Some(id) = table.get(name.as_str()) {
            *name = id.clone();
        }
    };

    match &mut rule.condition {
        Condition::VarEquals { variable_id, .. }
        | Condition::VarGreater { variable_id, .. }
        | Condition::VarLess { variable_id, .. } => swap(variable_id, var_ids),
        _ => {}
    }
    match &mut rule.action {
        Action::VarSet { variable_id, .. }
        | Action::VarAdd { variable_id, .. }
        | Action::VarSub { variable_id, .. } => swap(variable_id, var_ids),
        Action::CreateObject { prefab_id, .. } => swap(prefab_id, object_ids),
        Action::GotoScene { scene_id } => {
            if let Some(id) = scene_ids.get(scene_id.as_str()) {
                *scene_id = id.clone();
            }
        }
        _ => {}
    }
}

fn object(
    name: &str,
    kind: ObjectType,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    color: &str,
) -> ObjectTemplate {
    ObjectTemplate::new("", name, kind, x, y, w, h).with_presentation("color", color)
}

fn key(code: &str) -> Condition {
    Condition::KeyPressed { key: code.into() }
}

fn touching(subject: ObjectType, target: ObjectType) -> Condition {
    Condition::Collision {
        subject: subject.into(),
        target: target.into(),
    }
}

fn hp_is_zero(kind: ObjectType) -> Condition {
    Condition::ObjVarCompare {
        target: kind.into(),
        variable_name: "hp".into(),
        op: CompareOp::Eq,
        value: 0.0.into(),
    }
}

fn rule(condition: Condition, action: Action) -> Rule {
    Rule::new("", condition, action)
}

fn platformer() -> (Vec<(&'static str, f64)>, Vec<SceneDraft>) {
    use ObjectType::*;
    let objects = vec![
        object("Player", Player, 100.0, 300.0, 32.0, 32.0, "#3b82f6")
            .with_gravity()
            .solid(),
        object("Ground", Wall, 0.0, 500.0, 800.0, 40.0, "#64748b").solid(),
        object("Platform 1", Wall, 200.0, 400.0, 120.0, 20.0, "#64748b").solid(),
        object("Platform 2", Wall, 450.0, 300.0, 120.0, 20.0, "#64748b").solid(),
        object("Enemy", Enemy, 500.0, 268.0, 32.0, 32.0, "#ef4444")
            .with_gravity()
            .solid()
            .with_auto_move(AutoMove::looping(2.0, 0.0, 100.0)),
        object("Coin 1", Coin, 250.0, 350.0, 20.0, 20.0, "#eab308"),
    ];
    let rules = vec![
        rule(Condition::Always, Action::Gravity { amount: 0.5 }),
        rule(key("ArrowRight"), Action::MoveX { amount: 5.0 }),
        rule(key("ArrowLeft"), Action::MoveX { amount: -5.0 }),
        rule(key("Space"), Action::Jump { velocity: -12.0 }),
        rule(touching(Player, Coin), Action::Destroy).targeting(Target::Other),
        rule(
            touching(Player, Coin),
            Action::VarAdd {
                variable_id: "Score".into(),
                value: 10.0,
            },
        )
        .targeting(Target::SelfRef),
        rule(
            touching(Player, Enemy),
            Action::VarSub {
                variable_id: "Lives".into(),
                value: 1.0,
            },
        )
        .targeting(Target::SelfRef),
    ];
    (
        vec![("Score", 0.0), ("Lives", 3.0)],
        vec![(ViewMode::Side, "Level 1", objects, rules)],
    )
}

fn rpg() -> (Vec<(&'static str, f64)>, Vec<SceneDraft>) {
    use ObjectType::*;
    let objects = vec![
        object("Hero", Player, 400.0, 300.0, 32.0, 32.0, "#3b82f6").solid(),
        object("House", Wall, 100.0, 100.0, 100.0, 100.0, "#64748b").solid(),
        object("Tree 1", Wall, 600.0, 100.0, 40.0, 40.0, "#22c55e").solid(),
        object("Tree 2", Wall, 650.0, 150.0, 40.0, 40.0, "#22c55e").solid(),
        object("Villager", Sprite, 400.0, 200.0, 32.0, 32.0, "#a855f7").solid(),
    ];
    let rules = vec![
        rule(key("ArrowRight"), Action::MoveX { amount: 4.0 }),
        rule(key("ArrowLeft"), Action::MoveX { amount: -4.0 }),
        rule(key("ArrowUp"), Action::MoveY { amount: -4.0 }),
        rule(key("ArrowDown"), Action::MoveY { amount: 4.0 }),
    ];
    (
        vec![("Gold", 0.0), ("HP", 100.0)],
        vec![(ViewMode::TopDown, "Level 1", objects, rules)],
    )
}

fn racing() -> (Vec<(&'static str, f64)>, Vec<SceneDraft>) {
    use ObjectType::*;
    let objects = vec![
        object("Car", Player, 400.0, 500.0, 32.0, 64.0, "#ef4444").solid(),
        object("Wall L", Wall, 100.0, 0.0, 20.0, 600.0, "#334155").solid(),
        object("Wall R", Wall, 680.0, 0.0, 20.0, 600.0, "#334155").solid(),
        object("Obstacle", Wall, 300.0, 300.0, 64.0, 64.0, "#334155").solid(),
    ];
    let rules = vec![
        rule(key("ArrowRight"), Action::MoveX { amount: 8.0 }),
        rule(key("ArrowLeft"), Action::MoveX { amount: -8.0 }),
        rule(key("ArrowUp"), Action::MoveY { amount: -15.0 }),
        rule(key("ArrowDown"), Action::MoveY { amount: 5.0 }),
        rule(touching(Player, Wall), Action::ReverseX).targeting(Target::SelfRef),
    ];
    (
        vec![("Lap", 1.0)],
        vec![(ViewMode::TopDown, "Level 1", objects, rules)],
    )
}

fn shooter() -> (Vec<(&'static str, f64)>, Vec<SceneDraft>) {
    use ObjectType::*;
    let objects = vec![
        object("Hero", Player, 400.0, 300.0, 32.0, 32.0, "#3b82f6")
            .solid()
            .with_variable("hp", 100.0),
        object("Bullet", Sprite, 0.0, 0.0, 10.0, 10.0, "#fbbf24")
            .prefab(8)
            .solid()
            .with_variable("lifetime", 1.5)
            .with_auto_move(AutoMove::straight(10.0, 0.0)),
        object("Zombie 1", Enemy, 100.0, 100.0, 32.0, 32.0, "#16a34a")
            .solid()
            .with_variable("hp", 10.0)
            .with_auto_move(AutoMove::looping(2.0, 2.0, 150.0)),
        object("Zombie 2", Enemy, 700.0, 500.0, 32.0, 32.0, "#16a34a")
            .solid()
            .with_variable("hp", 10.0)
            .with_auto_move(AutoMove::looping(-2.0, -1.0, 150.0)),
        object("Block", Wall, 200.0, 400.0, 100.0, 100.0, "#475569").solid(),
    ];
    let hp_sub = |amount: f64| Action::ObjVarSub {
        variable_name: "hp".into(),
        value: amount.into(),
    };
    let rules = vec![
        rule(key("w"), Action::MoveY { amount: -5.0 }),
        rule(key("s"), Action::MoveY { amount: 5.0 }),
        rule(key("a"), Action::MoveX { amount: -5.0 }),
        rule(key("d"), Action::MoveX { amount: 5.0 }),
        rule(
            key("x"),
            Action::CreateObject {
                prefab_id: "Bullet".into(),
                offset_x: 0.0,
                offset_y: 0.0,
            },
        )
        .with_cooldown(0.2),
        rule(touching(Enemy, Sprite), hp_sub(5.0)).targeting(Enemy),
        rule(touching(Enemy, Sprite), Action::Destroy).targeting(Sprite),
        rule(hp_is_zero(Enemy), Action::Destroy).targeting(Enemy),
        rule(
            hp_is_zero(Enemy),
            Action::VarAdd {
                variable_id: "Score".into(),
                value: 100.0,
            },
        ),
        rule(touching(Player, Enemy), hp_sub(10.0)).targeting(Player),
        rule(hp_is_zero(Player), Action::Destroy).targeting(Player),
    ];
    (
        vec![("Score", 0.0)],
        vec![(ViewMode::TopDown, "Level 1", objects, rules)],
    )
}

fn chase() -> (Vec<(&'static str, f64)>, Vec<SceneDraft>) {
    use ObjectType::*;
    let arena_objects = vec![
        object("Runner", Player, 400.0, 300.0, 28.0, 28.0, "#3b82f6")
            .solid()
            .with_variable("hp", 30.0),
        object("Portal", Sprite, 40.0, 284.0, 32.0, 32.0, "#94a3b8").with_spawn_cooldown(1.5),
        object("Hunter", Enemy, 0.0, 0.0, 24.0, 24.0, "#ef4444")
            .prefab(6)
            .with_variable("lifetime", 8.0)
            .with_auto_move(AutoMove::straight(3.0, 0.0)),
        object("Coin 1", Coin, 200.0, 120.0, 16.0, 16.0, "#eab308"),
        object("Coin 2", Coin, 600.0, 480.0, 16.0, 16.0, "#eab308"),
        object("Pillar", Wall, 360.0, 160.0, 48.0, 48.0, "#475569").solid(),
    ];
    let arena_rules = vec![
        rule(key("ArrowRight"), Action::MoveX { amount: 4.0 }),
        rule(key("ArrowLeft"), Action::MoveX { amount: -4.0 }),
        rule(key("ArrowUp"), Action::MoveY { amount: -4.0 }),
        rule(key("ArrowDown"), Action::MoveY { amount: 4.0 }),
        rule(
            Condition::Always,
            Action::CreateObject {
                prefab_id: "Hunter".into(),
                offset_x: 0.0,
                offset_y: 0.0,
            },
        )
        .targeting(Sprite),
        rule(
            Condition::Always,
            Action::VarAdd {
                variable_id: "Ticks Survived".into(),
                value: 1.0,
            },
        ),
        rule(touching(Player, Coin), Action::Destroy).targeting(Target::Other),
        rule(
            touching(Player, Coin),
            Action::VarAdd {
                variable_id: "Score".into(),
                value: 10.0,
            },
        ),
        rule(
            touching(Player, Enemy),
            Action::ObjVarSub {
                variable_name: "hp".into(),
                value: 10.0.into(),
            },
        )
        .targeting(Target::SelfRef),
        rule(
            Condition::ObjVarCompare {
                target: Player.into(),
                variable_name: "hp".into(),
                op: CompareOp::Le,
                value: 0.0.into(),
            },
            Action::GotoScene {
                scene_id: "Game Over".into(),
            },
        ),
    ];
    let game_over_rules = vec![rule(
        key("Enter"),
        Action::GotoScene {
            scene_id: "Arena".into(),
        },
    )];
    (
        vec![("Score", 0.0), ("Ticks Survived", 0.0)],
        vec![
            (ViewMode::TopDown, "Arena", arena_objects, arena_rules),
            (ViewMode::Side, "Game Over", vec![], game_over_rules),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate_project;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Preset::parse("Shooter"), Some(Preset::Shooter));
        assert_eq!(Preset::parse("tower-defense"), None);
        for preset in Preset::ALL {
            assert_eq!(Preset::parse(preset.name()), Some(preset));
        }
    }

    #[test]
    fn every_preset_validates_cleanly() {
        for preset in Preset::ALL {
            let project = preset.build("Test");
            let issues = validate_project(&project);
            assert!(issues.is_empty(), "{preset}: {issues:?}");
        }
    }

    #[test]
    fn names_are_resolved_to_ids() {
        let project = Preset::Shooter.build("Shots");
        let scene = &project.scenes[0];
        let bullet = scene.object_by_name("Bullet").unwrap();
        let spawn = scene
            .rules
            .iter()
            .find_map(|r| match &r.action {
                Action::CreateObject { prefab_id, .. } => Some(prefab_id.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(spawn, bullet.id);
        assert!(Uuid::parse_str(&bullet.id).is_ok());

        let score = &project.variables[0];
        assert_eq!(score.name, "Score");
        assert!(scene.rules.iter().any(|r| matches!(
            &r.action,
            Action::VarAdd { variable_id, .. } if *variable_id == score.id
        )));
    }

    #[test]
    fn chase_links_its_two_scenes() {
        let project = Preset::Chase.build("Run");
        assert_eq!(project.scenes.len(), 2);
        assert_eq!(project.current_scene_id, project.scenes[0].id);
        let over_id = &project.scenes[1].id;
        assert!(project.scenes[0].rules.iter().any(|r| matches!(
            &r.action,
            Action::GotoScene { scene_id } if scene_id == over_id
        )));
    }

    #[test]
    fn rule_ids_are_unique() {
        let project = Preset::Platformer.build("Jump");
        let mut ids: Vec<&str> = project.scenes[0].rules.iter().map(|r| r.id.as_str()).collect();
        let before = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }
}
