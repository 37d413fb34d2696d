//! Authoring-time checks over a whole project.
//!
//! The runtime treats malformed references as inert, so none of these
//! problems stop a project from running. Validation surfaces them before
//! they turn into "nothing happens" bugs.

use std::collections::HashSet;

use crate::project::Project;
use crate::rule::{Action, Condition, RawAction, RawCondition, Rule};
use crate::scene::Scene;
use crate::variable::Variable;

/// A warning or error found during project validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    /// Where the issue was found, e.g. `scene 'Level 1'` or `rule 'r3'`.
    pub location: String,
    /// A human-readable description of the issue.
    pub message: String,
    /// Whether this is an error (true) or a warning (false).
    pub is_error: bool,
}

impl ValidationIssue {
    fn error(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            message: message.into(),
            is_error: true,
        }
    }

    fn warning(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            message: message.into(),
            is_error: false,
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        write!(f, "{level}: {}: {}", self.location, self.message)
    }
}

const CONDITION_KINDS: &[&str] = &[
    "ALWAYS",
    "KEY_PRESSED",
    "VAR_EQUALS",
    "VAR_GT",
    "VAR_LT",
    "OBJ_VAR_COMPARE",
    "COLLISION",
    "MOUSE_CLICK",
];

const ACTION_KINDS: &[&str] = &[
    "MOVE_X",
    "MOVE_Y",
    "GRAVITY",
    "JUMP",
    "REVERSE_X",
    "REVERSE_Y",
    "DESTROY",
    "CREATE_OBJECT",
    "VAR_SET",
    "VAR_ADD",
    "VAR_SUB",
    "OBJ_VAR_SET",
    "OBJ_VAR_ADD",
    "OBJ_VAR_SUB",
    "SET_ANIMATION",
    "GOTO_SCENE",
    "PLAY_SOUND",
];

/// Validate a project.
///
/// Structural problems (no scenes, dangling start scene, duplicate ids) are
/// errors. Dangling references inside rules are warnings, since the runtime
/// skips them.
pub fn validate_project(project: &Project) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let project_loc = format!("project '{}'", project.name());

    if project.scenes.is_empty() {
        issues.push(ValidationIssue::error(&project_loc, "project has no scenes"));
        return issues;
    }

    if project.scene(&project.current_scene_id).is_none() {
        issues.push(ValidationIssue::error(
            &project_loc,
            format!(
                "current scene '{}' does not exist",
                project.current_scene_id
            ),
        ));
    }

    check_duplicate_variables(&project_loc, &project.variables, &mut issues);

    let scene_ids: HashSet<&str> = project.scenes.iter().map(|s| s.id.as_str()).collect();
    for scene in &project.scenes {
        validate_scene(project, scene, &scene_ids, &mut issues);
    }

    issues
}

fn check_duplicate_variables(
    location: &str,
    variables: &[Variable],
    issues: &mut Vec<ValidationIssue>,
) {
    let mut seen = HashSet::new();
    for var in variables {
        if !seen.insert(var.id.as_str()) {
            issues.push(ValidationIssue::error(
                location,
                format!("duplicate variable id '{}'", var.id),
            ));
        }
    }
}

fn validate_scene(
    project: &Project,
    scene: &Scene,
    scene_ids: &HashSet<&str>,
    issues: &mut Vec<ValidationIssue>,
) {
    let scene_loc = format!("scene '{}'", scene.name);

    let mut seen = HashSet::new();
    for object in &scene.objects {
        if !seen.insert(object.id.as_str()) {
            issues.push(ValidationIssue::error(
                &scene_loc,
                format!("duplicate object id '{}' ({})", object.id, object.name),
            ));
        }
    }

    check_duplicate_variables(&scene_loc, &scene.variables, issues);

    let declared: HashSet<&str> = project
        .variables
        .iter()
        .chain(&scene.variables)
        .map(|v| v.id.as_str())
        .collect();

    for rule in &scene.rules {
        validate_rule(scene, rule, scene_ids, &declared, issues);
    }
}

fn validate_rule(
    scene: &Scene,
    rule: &Rule,
    scene_ids: &HashSet<&str>,
    declared: &HashSet<&str>,
    issues: &mut Vec<ValidationIssue>,
) {
    let loc = format!("scene '{}' rule '{}'", scene.name, rule.id);
    let undeclared = |id: &str| !declared.contains(id);

    match &rule.condition {
        Condition::VarEquals { variable_id, .. }
        | Condition::VarGreater { variable_id, .. }
        | Condition::VarLess { variable_id, .. }
            if undeclared(variable_id) =>
        {
            issues.push(ValidationIssue::warning(
                &loc,
                format!("condition reads undeclared variable '{variable_id}'"),
            ));
        }
        Condition::Invalid(raw) => issues.push(ValidationIssue::warning(
            &loc,
            describe_invalid_condition(raw),
        )),
        _ => {}
    }

    match &rule.action {
        Action::CreateObject { prefab_id, .. } => match scene.object(prefab_id) {
            None => issues.push(ValidationIssue::warning(
                &loc,
                format!("CREATE_OBJECT references missing template '{prefab_id}'"),
            )),
            Some(t) if !t.is_prefab => issues.push(ValidationIssue::warning(
                &loc,
                format!("CREATE_OBJECT references '{}', which is not a prefab", t.name),
            )),
            Some(_) => {}
        },
        Action::VarSet { variable_id, .. }
        | Action::VarAdd { variable_id, .. }
        | Action::VarSub { variable_id, .. }
            if undeclared(variable_id) =>
        {
            issues.push(ValidationIssue::warning(
                &loc,
                format!("action writes undeclared variable '{variable_id}'"),
            ));
        }
        Action::GotoScene { scene_id } if !scene_ids.contains(scene_id.as_str()) => {
            issues.push(ValidationIssue::warning(
                &loc,
                format!("GOTO_SCENE targets unknown scene '{scene_id}'"),
            ));
        }
        Action::SetAnimation { animation_name } => {
            let owned = scene
                .objects
                .iter()
                .any(|o| o.animation(animation_name).is_some());
            if !owned {
                issues.push(ValidationIssue::warning(
                    &loc,
                    format!("no object has an animation named '{animation_name}'"),
                ));
            }
        }
        Action::Invalid(raw) => issues.push(ValidationIssue::warning(
            &loc,
            describe_invalid_action(raw),
        )),
        _ => {}
    }
}

fn describe_invalid_condition(raw: &RawCondition) -> String {
    if raw.kind == "KEY_PRESSED" {
        "KEY_PRESSED condition has no key".to_string()
    } else if CONDITION_KINDS.contains(&raw.kind.as_str()) {
        format!("{} condition is missing a required field", raw.kind)
    } else {
        format!("unknown condition kind '{}'", raw.kind)
    }
}

fn describe_invalid_action(raw: &RawAction) -> String {
    if ACTION_KINDS.contains(&raw.kind.as_str()) {
        format!("{} action is missing a required field", raw.kind)
    } else {
        format!("unknown action kind '{}'", raw.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Animation, ObjectTemplate, ObjectType};
    use crate::rule::Target;

    fn hero() -> ObjectTemplate {
        ObjectTemplate::new("p", "Hero", ObjectType::Player, 0.0, 0.0, 32.0, 32.0)
    }

    fn project_with(scene: Scene) -> Project {
        Project::new("Test")
            .with_variable(Variable::global("score", "Score", 0.0))
            .with_scene(scene)
    }

    #[test]
    fn clean_project_has_no_issues() {
        let scene = Scene::new("s1", "Main").with_object(hero()).with_rule(Rule::new(
            "r1",
            Condition::Always,
            Action::VarAdd {
                variable_id: "score".into(),
                value: 1.0,
            },
        ));
        assert!(validate_project(&project_with(scene)).is_empty());
    }

    #[test]
    fn empty_project_is_an_error() {
        let issues = validate_project(&Project::new("Nothing"));
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error);
        assert!(issues[0].to_string().contains("no scenes"));
    }

    #[test]
    fn dangling_current_scene_is_an_error() {
        let mut project = project_with(Scene::new("s1", "Main"));
        project.current_scene_id = "missing".into();
        let issues = validate_project(&project);
        assert!(issues.iter().any(|i| i.is_error && i.message.contains("missing")));
    }

    #[test]
    fn duplicate_object_ids_are_errors() {
        let scene = Scene::new("s1", "Main").with_object(hero()).with_object(hero());
        let issues = validate_project(&project_with(scene));
        assert!(issues.iter().any(|i| i.is_error && i.message.contains("duplicate object id")));
    }

    #[test]
    fn dangling_rule_references_are_warnings() {
        let scene = Scene::new("s1", "Main")
            .with_object(hero())
            .with_rule(Rule::new(
                "spawn",
                Condition::Always,
                Action::CreateObject {
                    prefab_id: "p".into(),
                    offset_x: 0.0,
                    offset_y: 0.0,
                },
            ))
            .with_rule(Rule::new(
                "goto",
                Condition::Always,
                Action::GotoScene {
                    scene_id: "nowhere".into(),
                },
            ))
            .with_rule(Rule::new(
                "anim",
                Condition::Always,
                Action::SetAnimation {
                    animation_name: "Dance".into(),
                },
            ))
            .with_rule(
                Rule::new(
                    "var",
                    Condition::VarGreater {
                        variable_id: "ghost".into(),
                        value: 1.0,
                    },
                    Action::Destroy,
                )
                .targeting(Target::SelfRef),
            );
        let issues = validate_project(&project_with(scene));
        assert_eq!(issues.len(), 4);
        assert!(issues.iter().all(|i| !i.is_error));
        assert!(issues.iter().any(|i| i.message.contains("not a prefab")));
        assert!(issues.iter().any(|i| i.message.contains("unknown scene")));
        assert!(issues.iter().any(|i| i.message.contains("'Dance'")));
        assert!(issues.iter().any(|i| i.message.contains("'ghost'")));
    }

    #[test]
    fn owned_animation_passes() {
        let scene = Scene::new("s1", "Main")
            .with_object(hero().with_animation(Animation {
                id: "a1".into(),
                name: "Run".into(),
                frame_asset_ids: vec!["f1".into()],
                fps: 8.0,
                looping: true,
            }))
            .with_rule(Rule::new(
                "anim",
                Condition::Always,
                Action::SetAnimation {
                    animation_name: "Run".into(),
                },
            ));
        assert!(validate_project(&project_with(scene)).is_empty());
    }

    #[test]
    fn invalid_records_are_described() {
        let json = r#"{
            "scenes": [{"id": "s1", "name": "Main", "objects": [], "events": [
                {"id": "k", "condition": {"type": "KEY_PRESSED"}, "action": {"type": "DESTROY", "target": "SELF"}},
                {"id": "u", "condition": {"type": "ALWAYS"}, "action": {"type": "EXPLODE"}}
            ]}],
            "currentSceneId": "s1"
        }"#;
        let project = Project::from_json(json).unwrap();
        let issues = validate_project(&project);
        assert_eq!(issues.len(), 2);
        assert!(issues[0].message.contains("has no key"));
        assert!(issues[1].message.contains("unknown action kind 'EXPLODE'"));
    }
}
